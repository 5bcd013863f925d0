use crate::api::response::{extract_content, parse_tool_calls};
use crate::api::streaming::process_streaming_response;
use crate::api::{make_api_request, RequestBody};
use crate::config::Config;
use crate::error::{Result, RohBotError};
use crate::models::{Message, ToolCall};
use crate::orchestrator::{AssistantTurn, ChatModel, TurnObserver};
use colored::*;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// `ChatModel` backed by an OpenAI-compatible chat-completions endpoint.
///
/// In streaming mode the SSE body is consumed incrementally and content
/// deltas go to the observer as they arrive; otherwise the whole body is
/// parsed at once and the observer sees the content as a single token.
pub struct HttpChatModel {
    api_key: String,
    api_endpoint: String,
    model: String,
    stream_timeout: u64,
    streaming: bool,
    verbose: bool,
}

impl HttpChatModel {
    pub fn from_config(config: &Config, streaming: bool) -> Self {
        Self {
            api_key: config.api_key.clone(),
            api_endpoint: config.api_endpoint.clone(),
            model: config.model.clone(),
            stream_timeout: config.stream_timeout,
            streaming,
            verbose: config.verbose,
        }
    }

    async fn complete_inner(
        &self,
        messages: &[Message],
        tools: Option<&[Value]>,
        observer: &dyn TurnObserver,
    ) -> Result<AssistantTurn> {
        let request_body = RequestBody {
            model: self.model.clone(),
            messages: messages.to_vec(),
            stream: self.streaming,
            tools: tools.map(|t| t.to_vec()),
        };

        if self.verbose {
            eprintln!("{}", format!("[AI] Using model: {}", self.model).dimmed());
            eprintln!("{}", "[AI] Making API request...".dimmed());
        }

        let response =
            make_api_request(&self.api_key, &self.api_endpoint, &request_body).await?;

        if self.verbose {
            eprintln!(
                "{}",
                format!("[AI] Response status: {}", response.status()).dimmed()
            );
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RohBotError::ApiError {
                status,
                message: error_text,
            });
        }

        if self.streaming {
            let result =
                process_streaming_response(response, self.stream_timeout, self.verbose, observer)
                    .await?;

            let content = if result.content.is_empty() {
                None
            } else {
                Some(result.content)
            };
            return Ok(AssistantTurn {
                content,
                tool_calls: result.tool_calls,
            });
        }

        let response_text = response.text().await?;
        if self.verbose {
            eprintln!(
                "{}",
                format!("[AI] Raw response: {}", response_text).dimmed()
            );
        }

        let response_json: Value = serde_json::from_str(&response_text)?;

        let content = extract_content(&response_json)?;
        let tool_calls: Vec<ToolCall> = parse_tool_calls(&response_json)?
            .unwrap_or_default()
            .iter()
            .filter_map(|tc| serde_json::from_value(tc.clone()).ok())
            .collect();

        if let Some(content) = &content {
            observer.on_token(content);
        }

        Ok(AssistantTurn {
            content,
            tool_calls,
        })
    }
}

impl ChatModel for HttpChatModel {
    fn complete<'a>(
        &'a self,
        messages: &'a [Message],
        tools: Option<&'a [Value]>,
        observer: &'a dyn TurnObserver,
    ) -> Pin<Box<dyn Future<Output = Result<AssistantTurn>> + Send + 'a>> {
        Box::pin(self.complete_inner(messages, tools, observer))
    }
}
