use crate::api::HttpChatModel;
use crate::config::Config;
use crate::error::Result;
use crate::mcp::McpClient;
use crate::models::Message;
use crate::orchestrator::{self, ChatModel, NullObserver, TurnObserver};
use crate::tools::{ToolRegistry, ToolSettings};
use crate::ui;
use colored::*;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One conversation with RohBot: owns the history, the tool registry and the
/// model handle. Verbose tracing is a config field here, not a global, so
/// concurrent sessions (e.g. under test) cannot interfere.
pub struct Session {
    config: Config,
    registry: ToolRegistry,
    model: Box<dyn ChatModel>,
    history: Vec<Message>,
}

impl Session {
    pub fn new(config: Config, streaming: bool) -> Self {
        let client = McpClient::new(&config.mcp_base_url);
        let settings = ToolSettings {
            plans_dir: config.plans_dir.clone(),
            verbose: config.verbose,
        };
        let registry = ToolRegistry::new(client, settings);
        let model: Box<dyn ChatModel> = Box::new(HttpChatModel::from_config(&config, streaming));

        Self {
            config,
            registry,
            model,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Append the user's message and run the turn to its terminal state.
    pub async fn process_turn(
        &mut self,
        input: &str,
        observer: &dyn TurnObserver,
    ) -> Result<String> {
        self.history.push(Message {
            role: "user".to_string(),
            content: Some(input.to_string()),
            tool_calls: None,
            tool_call_id: None,
        });

        orchestrator::run_turn(
            self.model.as_ref(),
            &self.registry,
            &self.config,
            &mut self.history,
            observer,
        )
        .await
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Best-effort shopping-list cleanup used on exit and reset; failures are
    /// reported to the user, never propagated.
    pub async fn clean_shopping_list(&self) {
        match self.registry.client().clear_shopping_list().await {
            Ok(_) => println!("🧹 Nákupní seznam byl vyčištěn."),
            Err(e) => println!("⚠️ Chyba při čištění nákupního seznamu: {}", e),
        }
    }
}

/// The interactive loop. Returns the process exit code; the health check has
/// already passed by the time this runs.
pub async fn run(config: Config) -> Result<i32> {
    let verbose = config.verbose;
    let mut session = Session::new(config, false);

    ui::print_welcome();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        // Ctrl-C while waiting for input exits like KONEC
        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => None,
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            println!("{}", ui::GOODBYE_MESSAGE);
            session.clean_shopping_list().await;
            return Ok(0);
        };

        let input = line.trim();
        match input.to_uppercase().as_str() {
            "KONEC" | "STAČILO" => {
                println!("{}", ui::GOODBYE_MESSAGE);
                session.clean_shopping_list().await;
                return Ok(0);
            }
            "POMOC" => {
                ui::print_help();
                continue;
            }
            "RESET" => {
                session.reset();
                session.clean_shopping_list().await;
                println!("🔄 Konverzace byla resetována a nákupní seznam vyčištěn.\n");
                continue;
            }
            "" => continue,
            _ => {}
        }

        println!("\n🤔 Přemýšlím...\n");

        let trace_observer = ui::ToolTraceObserver;
        let null_observer = NullObserver;
        let observer: &dyn TurnObserver = if verbose {
            &trace_observer
        } else {
            &null_observer
        };

        // Ctrl-C mid-turn aborts the pending turn and exits with cleanup
        let outcome = tokio::select! {
            _ = tokio::signal::ctrl_c() => None,
            result = session.process_turn(input, observer) => Some(result),
        };

        match outcome {
            None => {
                println!("{}", ui::GOODBYE_MESSAGE);
                session.clean_shopping_list().await;
                return Ok(0);
            }
            Some(Ok(answer)) => {
                println!("\n🤖 RohBot: {}\n", answer);
            }
            Some(Err(e)) => {
                println!("{}", format!("❌ Chyba při zpracování dotazu: {}\n", e).red());
            }
        }
    }
}
