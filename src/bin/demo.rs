use clap::Parser;
use colored::*;
use rohbot::cli::Args;
use rohbot::config::{defaults, Config};
use rohbot::mcp;
use rohbot::repl::Session;
use rohbot::ui::ConsoleObserver;
use std::io::Write;
use std::process;

/// One-shot demo: a single hardcoded turn with streamed output.
#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    println!("🤖 RohBot Demo");
    println!("=====================================\n");

    if !mcp::check_mcp_server(&config.mcp_base_url, defaults::default_health_timeout()).await {
        eprintln!("❌ MCP server is not available. Please start the server and try again.");
        process::exit(1);
    }

    let human_message_text = "Chci abys mi vytvořil jídelníček na 3 dny dopředu. Jsem vegetarian";

    println!(
        "Tohle je malé demo RohBota (Rohlík asistent pro plánování jídelníčku a správu nákupního seznamu)\n"
    );
    println!("User: {}", human_message_text);

    print!("\n🤔 Přemýšlím... ");
    let _ = std::io::stdout().flush();

    let mut session = Session::new(config, true);

    match session.process_turn(human_message_text, &ConsoleObserver).await {
        Ok(_) => println!(),
        Err(e) => {
            eprintln!("\n{}", format!("❌ Error during demo: {}", e).red());
        }
    }

    println!("🎯 Chceš použít tohoto agenta interaktivně? Spusť: rohbot");
}
