use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "rohbot")]
#[command(about = "Rohlík asistent pro plánování jídelníčku (Czech meal-planning CLI)", long_about = None)]
pub struct Args {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Trace tool calls and API requests to stderr"
    )]
    pub verbose: bool,

    #[arg(
        long = "mcp-url",
        help = "Base URL of the recipe/shopping-list service (default: http://localhost:8001)"
    )]
    pub mcp_url: Option<String>,

    #[arg(
        long = "api-endpoint",
        help = "Custom chat API base URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(long = "model", help = "Override the chat model")]
    pub model: Option<String>,

    #[arg(
        long = "plans-dir",
        help = "Directory for generated meal-plan documents"
    )]
    pub plans_dir: Option<PathBuf>,

    #[arg(
        long = "max-turns",
        help = "Maximum model/tool alternations per user turn"
    )]
    pub max_turns: Option<u32>,
}
