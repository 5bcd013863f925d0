use crate::api::models::StreamResponse;
use crate::error::{Result, RohBotError};
use crate::models::{FunctionCall, ToolCall};
use crate::orchestrator::TurnObserver;
use colored::*;
use futures::StreamExt;
use tokio::time::{timeout, Duration};

pub struct StreamingResult {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Default)]
struct PendingToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// Fold streamed tool-call fragments into complete calls. The id and name
/// arrive with the first fragment for an index; argument text is concatenated
/// across fragments.
fn finalize_tool_calls(pending: Vec<PendingToolCall>) -> Vec<ToolCall> {
    pending
        .into_iter()
        .filter(|p| !p.name.is_empty())
        .map(|p| ToolCall {
            id: p.id,
            tool_type: "function".to_string(),
            function: FunctionCall {
                name: p.name,
                arguments: if p.arguments.is_empty() {
                    "{}".to_string()
                } else {
                    p.arguments
                },
            },
        })
        .collect()
}

pub async fn process_streaming_response(
    response: reqwest::Response,
    timeout_secs: u64,
    verbose: bool,
    observer: &dyn TurnObserver,
) -> Result<StreamingResult> {
    let mut stream = response.bytes_stream();
    let mut buffer = String::new();
    let mut incomplete_line = String::new();
    let mut assistant_response = String::new();
    let mut pending: Vec<PendingToolCall> = Vec::new();
    let chunk_timeout = Duration::from_secs(timeout_secs);

    loop {
        match timeout(chunk_timeout, stream.next()).await {
            Ok(Some(chunk)) => {
                let chunk = chunk.map_err(RohBotError::NetworkError)?;
                let text = String::from_utf8_lossy(&chunk);
                incomplete_line.push_str(&text);
            }
            Ok(None) => break,
            Err(_) => {
                eprintln!(
                    "{}",
                    format!(
                        "Error: Connection timeout - no data received for {} seconds",
                        timeout_secs
                    )
                    .red()
                );
                eprintln!(
                    "{}",
                    "The AI service may be experiencing issues or the connection was lost."
                        .dimmed()
                );
                return Err(RohBotError::Timeout);
            }
        }

        // Find last newline to ensure we only process complete lines
        if let Some(last_newline_pos) = incomplete_line.rfind('\n') {
            buffer.push_str(&incomplete_line[..=last_newline_pos]);
            incomplete_line = incomplete_line[last_newline_pos + 1..].to_string();
        } else {
            continue;
        }

        // Process complete lines
        while let Some(line_end) = buffer.find('\n') {
            let line = buffer[..line_end].to_string();
            buffer = buffer[line_end + 1..].to_string();

            if line.is_empty() || line.starts_with(':') {
                continue;
            }

            // Parse SSE field
            if let Some(colon_pos) = line.find(':') {
                let field = line[..colon_pos].trim();
                let value = line[colon_pos + 1..].trim_start();

                match field {
                    "data" => {
                        if value == "[DONE]" {
                            return Ok(StreamingResult {
                                content: assistant_response,
                                tool_calls: finalize_tool_calls(pending),
                            });
                        }

                        match serde_json::from_str::<StreamResponse>(value) {
                            Ok(parsed) => {
                                if let Some(choices) = parsed.choices {
                                    for choice in choices {
                                        if let Some(delta) = choice.delta {
                                            if let Some(content) = delta.content {
                                                assistant_response.push_str(&content);
                                                observer.on_token(&content);
                                            }

                                            if let Some(tool_calls) = delta.tool_calls {
                                                for tc in tool_calls {
                                                    // A fragment without an index belongs to a
                                                    // new call when it carries an id, else to
                                                    // the call currently being assembled.
                                                    let index = tc.index.unwrap_or_else(|| {
                                                        if tc.id.is_some() {
                                                            pending.len()
                                                        } else {
                                                            pending.len().saturating_sub(1)
                                                        }
                                                    });
                                                    while pending.len() <= index {
                                                        pending.push(PendingToolCall::default());
                                                    }
                                                    let slot = &mut pending[index];
                                                    if let Some(id) = tc.id {
                                                        slot.id = id;
                                                    }
                                                    if let Some(function) = tc.function {
                                                        if let Some(name) = function.name {
                                                            slot.name.push_str(&name);
                                                        }
                                                        if let Some(arguments) = function.arguments
                                                        {
                                                            slot.arguments.push_str(&arguments);
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                            Err(e) => {
                                if verbose {
                                    eprintln!(
                                        "{}",
                                        format!("[AI] JSON parse error: {}", e).dimmed()
                                    );
                                }
                            }
                        }
                    }
                    "event" | "id" | "retry" => {
                        if verbose {
                            eprintln!("{}", format!("[AI] SSE {}: {}", field, value).dimmed());
                        }
                    }
                    _ => {
                        if verbose {
                            eprintln!("{}", format!("[AI] Unknown SSE field: {}", field).dimmed());
                        }
                    }
                }
            }
        }
    }

    // Stream ended without [DONE]
    Ok(StreamingResult {
        content: assistant_response,
        tool_calls: finalize_tool_calls(pending),
    })
}
