use crate::config::Config;
use crate::error::{Result, RohBotError};
use crate::models::{Message, ToolCall};
use crate::tools::ToolRegistry;
use colored::*;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

/// System directive prepended fresh to every model call; never persisted into
/// the conversation history.
pub const SYSTEM_MESSAGE_TEXT: &str = "Jsi užitečný asistent, který komunikuje s uživateli VÝHRADNĚ V ČEŠTINĚ! \
Radíš uživatelům s recepty a jsi schopný těchto úkonů: \
- přidávat a odebírat ingredience z nákupního seznamu \
- vyhledávat recepty podle diety nebo typu jídla pomocí MCP serveru \
- plánovat jídelníček na více dní podle dietních požadavků uživatele \
- vytvářet strukturovaný přehled jídelníčku \
\n\nPro vyhledávání receptů používej nástroje search_recipes a get_all_recipes. \
Pokud nenajdeš recepty pro specifickou dietu, navrhni alternativy z dostupných receptů. \
\n\nKdyž vytváříš jídelníček, VŽDY ho prezentuj v tomto formátu: \
\n📅 JÍDELNÍČEK: \
\n🗓️ Den 1: \
\n  • Snídaně: [název receptu] \
\n  • Oběd: [název receptu] \
\n  • Večeře: [název receptu] \
\n🗓️ Den 2: \
\n  • Snídaně: [název receptu] \
\n  • atd... \
\n\nVždy přidej všechny ingredience z vybraných receptů na nákupní seznam. \
\nVše na co odpovídáš se píše do bash konzole, formátuj odpovědi podle toho (nepoužívej markdown formátování)";

/// Display-only side channel of a running turn. Implementations must not
/// influence the turn outcome; the authoritative answer always comes from
/// `run_turn`'s return value.
pub trait TurnObserver: Send + Sync {
    fn on_token(&self, _token: &str) {}
    fn on_tool_started(&self, _name: &str) {}
    fn on_tool_completed(&self, _name: &str) {}
}

pub struct NullObserver;

impl TurnObserver for NullObserver {}

/// One assistant utterance: final text, requested tool calls, or both.
pub struct AssistantTurn {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

/// Capability boundary for "complete one assistant turn given history".
/// Satisfied by `api::HttpChatModel` in production and by scripted doubles in
/// the test suite.
pub trait ChatModel: Send + Sync {
    fn complete<'a>(
        &'a self,
        messages: &'a [Message],
        tools: Option<&'a [Value]>,
        observer: &'a dyn TurnObserver,
    ) -> Pin<Box<dyn Future<Output = Result<AssistantTurn>> + Send + 'a>>;
}

enum TurnState {
    AwaitingModel,
    ExecutingTools(Vec<ToolCall>),
    Done(String),
}

/// Run one user turn to its terminal state: alternate between asking the
/// model and executing requested tools until the model answers with no tool
/// requests. `history` only ever grows; the caller owns it across turns.
///
/// `config.max_turns` bounds the number of model calls per turn. Exceeding it
/// abandons the turn with `TurnLimitExceeded` instead of looping forever —
/// nothing in the tool-call protocol guarantees the model stops on its own.
pub async fn run_turn(
    model: &dyn ChatModel,
    registry: &ToolRegistry,
    config: &Config,
    history: &mut Vec<Message>,
    observer: &dyn TurnObserver,
) -> Result<String> {
    let definitions = registry.definitions();
    let mut state = TurnState::AwaitingModel;
    let mut model_calls = 0u32;

    loop {
        match state {
            TurnState::AwaitingModel => {
                model_calls += 1;
                if model_calls > config.max_turns {
                    return Err(RohBotError::TurnLimitExceeded {
                        limit: config.max_turns,
                    });
                }

                // Seed with the system directive plus the full history
                let mut seeded = Vec::with_capacity(history.len() + 1);
                seeded.push(Message {
                    role: "system".to_string(),
                    content: Some(SYSTEM_MESSAGE_TEXT.to_string()),
                    tool_calls: None,
                    tool_call_id: None,
                });
                seeded.extend(history.iter().cloned());

                let turn = model
                    .complete(&seeded, Some(definitions.as_slice()), observer)
                    .await?;

                history.push(Message {
                    role: "assistant".to_string(),
                    content: turn.content.clone(),
                    tool_calls: if turn.tool_calls.is_empty() {
                        None
                    } else {
                        Some(turn.tool_calls.clone())
                    },
                    tool_call_id: None,
                });

                state = if turn.tool_calls.is_empty() {
                    TurnState::Done(turn.content.unwrap_or_default())
                } else {
                    TurnState::ExecutingTools(turn.tool_calls)
                };
            }
            TurnState::ExecutingTools(tool_calls) => {
                // Requests are independent and executed sequentially in issue
                // order, so tool results line up with their requests.
                for tool_call in &tool_calls {
                    let result = execute_tool_call(registry, config, tool_call, observer).await;
                    history.push(result);
                }
                state = TurnState::AwaitingModel;
            }
            TurnState::Done(answer) => return Ok(answer),
        }
    }
}

/// Dispatch a single tool request and package its outcome as a tool-result
/// message. Protocol errors (unknown tool, bad arguments) become result text
/// too, so the model can self-correct instead of the turn aborting.
async fn execute_tool_call(
    registry: &ToolRegistry,
    config: &Config,
    tool_call: &ToolCall,
    observer: &dyn TurnObserver,
) -> Message {
    let name = tool_call.function.name.as_str();
    let arguments_str = tool_call.function.arguments.as_str();

    if config.verbose {
        let args_preview = if arguments_str.len() > 100 {
            let cut = arguments_str
                .char_indices()
                .take_while(|(i, _)| *i < 100)
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            format!("{}...", &arguments_str[..cut])
        } else {
            arguments_str.to_string()
        };
        eprintln!(
            "{}",
            format!("[tools] Selected tool: '{}' with args: {}", name, args_preview).dimmed()
        );
    }

    observer.on_tool_started(name);

    let result_text = match serde_json::from_str::<Value>(arguments_str) {
        Ok(arguments) => match registry.call_tool(name, &arguments).await {
            Ok(text) => text,
            Err(e) => format!("Error: {}", e),
        },
        Err(e) => format!(
            "Error: failed to parse arguments for tool '{}': {}",
            name, e
        ),
    };

    observer.on_tool_completed(name);

    // Streamed tool calls can arrive without an id; synthesize one so the
    // result still pairs with a request slot.
    let id = if tool_call.id.is_empty() {
        format!("missing_{}", Uuid::new_v4())
    } else {
        tool_call.id.clone()
    };

    Message {
        role: "tool".to_string(),
        content: Some(result_text),
        tool_calls: None,
        tool_call_id: Some(id),
    }
}
