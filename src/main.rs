use clap::Parser;
use colored::*;
use rohbot::cli::Args;
use rohbot::config::{defaults, Config};
use rohbot::mcp;
use rohbot::repl;
use std::process;

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

    // The assistant is useless without the recipe service; refuse to start
    if !mcp::check_mcp_server(&config.mcp_base_url, defaults::default_health_timeout()).await {
        eprintln!("❌ MCP server is not available. Please start the server and try again.");
        process::exit(1);
    }

    match repl::run(config).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", format!("❌ Fatal error: {}", e).red());
            process::exit(1);
        }
    }
}
