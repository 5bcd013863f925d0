pub mod client;
pub mod health;
pub mod types;

pub use client::McpClient;
pub use health::check_mcp_server;
pub use types::{Recipe, RecipeList};
