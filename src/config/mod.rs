pub mod defaults;

use crate::cli::Args;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiSection {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub stream_timeout: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelSection {
    #[serde(default)]
    pub default_model: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct McpSection {
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionSection {
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub max_turns: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlansSection {
    #[serde(default)]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct YamlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub mcp: McpSection,
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub plans: PlansSection,
}

/// Resolved runtime configuration. Owned by the session shell and passed by
/// reference into turn processing; there is no process-wide mutable state.
pub struct Config {
    pub api_key: String,
    pub api_endpoint: String,
    pub model: String,
    pub mcp_base_url: String,
    pub stream_timeout: u64,
    pub max_turns: u32,
    pub verbose: bool,
    pub plans_dir: PathBuf,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> std::result::Result<Self, String> {
        let yaml_config = YamlConfig::load().unwrap_or_default();

        // API key stays env-only (never read from a config file on disk)
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| "OPENAI_API_KEY environment variable not set")?;

        // API endpoint: CLI args > env var > YAML config > default
        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| env::var("ROHBOT_API_ENDPOINT").ok())
            .or(yaml_config.api.endpoint.clone())
            .map(|endpoint| {
                // Accept base URLs with or without the /chat/completions suffix
                if endpoint.ends_with("/chat/completions") {
                    endpoint
                } else if endpoint.ends_with("/v1") {
                    format!("{}/chat/completions", endpoint)
                } else if endpoint.ends_with("/v1/") {
                    format!("{}chat/completions", endpoint)
                } else {
                    format!("{}/v1/chat/completions", endpoint.trim_end_matches('/'))
                }
            })
            .unwrap_or_else(defaults::default_api_endpoint);

        let model = args
            .model
            .clone()
            .or_else(|| env::var("ROHBOT_MODEL").ok())
            .or(yaml_config.model.default_model.clone())
            .unwrap_or_else(defaults::default_model);

        let mcp_base_url = args
            .mcp_url
            .clone()
            .or_else(|| env::var("MCP_BASE_URL").ok())
            .or(yaml_config.mcp.base_url.clone())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(defaults::default_mcp_base_url);

        let stream_timeout = env::var("ROHBOT_STREAM_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(yaml_config.api.stream_timeout)
            .unwrap_or_else(defaults::default_stream_timeout);

        let max_turns = args
            .max_turns
            .or_else(|| {
                env::var("ROHBOT_MAX_TURNS")
                    .ok()
                    .and_then(|s| s.parse::<u32>().ok())
            })
            .or(yaml_config.session.max_turns)
            .unwrap_or_else(defaults::default_max_turns);

        let verbose = args.verbose
            || env::var("ROHBOT_VERBOSE")
                .ok()
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                .or(yaml_config.session.verbose)
                .unwrap_or(false);

        let plans_dir = args
            .plans_dir
            .clone()
            .or_else(|| env::var("ROHBOT_PLANS_DIR").ok().map(PathBuf::from))
            .or(yaml_config.plans.dir.clone().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(defaults::default_plans_dir()));

        Ok(Config {
            api_key,
            api_endpoint,
            model,
            mcp_base_url,
            stream_timeout,
            max_turns,
            verbose,
            plans_dir,
        })
    }
}

impl YamlConfig {
    pub fn load() -> Result<Self> {
        let config_paths = Self::get_config_paths();

        for path in config_paths {
            if path.exists() {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

                let config: YamlConfig = serde_yaml::from_str(&contents).with_context(|| {
                    format!("Failed to parse YAML config file: {}", path.display())
                })?;

                return Ok(config);
            }
        }

        Ok(YamlConfig::default())
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Current directory (local override)
        paths.push(PathBuf::from(".rohbot.yaml"));
        paths.push(PathBuf::from(".rohbot.yml"));

        // 2. User's config directory (global config)
        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("rohbot");
            paths.push(config_dir.join("rohbot.yaml"));
            paths.push(config_dir.join("rohbot.yml"));
        }

        paths
    }
}
