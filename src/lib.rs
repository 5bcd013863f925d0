//! RohBot: a Czech meal-planning assistant around a chat model and a remote
//! recipe/shopping-list service.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod models;
pub mod orchestrator;
pub mod repl;
pub mod tools;
pub mod ui;
