use crate::mcp::types::RecipeList;
use colored::*;
use std::fmt;
use std::time::Duration;

/// Why the startup probe decided the service is unreachable. Each variant
/// surfaces its own human-readable reason.
#[derive(Debug)]
pub enum HealthCheckError {
    Timeout,
    Connect(String),
    Status(u16),
    Parse(String),
}

impl fmt::Display for HealthCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthCheckError::Timeout => write!(f, "health check timed out"),
            HealthCheckError::Connect(msg) => write!(f, "cannot connect: {}", msg),
            HealthCheckError::Status(status) => {
                write!(f, "server responded with status {}", status)
            }
            HealthCheckError::Parse(msg) => write!(f, "unparseable response body: {}", msg),
        }
    }
}

/// Probe `GET /get_recipes` and report how many recipes the catalog holds.
pub async fn probe(base_url: &str, timeout_secs: u64) -> Result<usize, HealthCheckError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| HealthCheckError::Connect(e.to_string()))?;

    let url = format!("{}/get_recipes", base_url.trim_end_matches('/'));
    let response = client.get(&url).send().await.map_err(|e| {
        if e.is_timeout() {
            HealthCheckError::Timeout
        } else {
            HealthCheckError::Connect(e.to_string())
        }
    })?;

    if !response.status().is_success() {
        return Err(HealthCheckError::Status(response.status().as_u16()));
    }

    let list: RecipeList = response
        .json()
        .await
        .map_err(|e| HealthCheckError::Parse(e.to_string()))?;

    Ok(list.recipes.len())
}

/// Startup gate: prints the probe outcome and returns whether the service is
/// usable. Neither the REPL nor the demo may start when this returns false.
pub async fn check_mcp_server(base_url: &str, timeout_secs: u64) -> bool {
    println!("🔍 Checking MCP server at {}...", base_url);

    match probe(base_url, timeout_secs).await {
        Ok(count) => {
            println!(
                "{}",
                format!("✅ MCP server is healthy! Found {} recipes.", count).green()
            );
            true
        }
        Err(HealthCheckError::Timeout) => {
            eprintln!("{}", "❌ MCP server health check timed out".red());
            eprintln!(
                "{}",
                "💡 Make sure the MCP server is running on the correct port".dimmed()
            );
            false
        }
        Err(HealthCheckError::Connect(msg)) => {
            eprintln!(
                "{}",
                format!("❌ Cannot connect to MCP server at {}: {}", base_url, msg).red()
            );
            eprintln!(
                "{}",
                "💡 Make sure the MCP server is running and accessible".dimmed()
            );
            false
        }
        Err(HealthCheckError::Status(status)) => {
            eprintln!(
                "{}",
                format!("❌ MCP server responded with status {}", status).red()
            );
            false
        }
        Err(HealthCheckError::Parse(msg)) => {
            eprintln!(
                "{}",
                format!("❌ MCP server returned an unparseable body: {}", msg).red()
            );
            false
        }
    }
}
