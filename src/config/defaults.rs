pub fn default_api_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

pub fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

pub fn default_mcp_base_url() -> String {
    "http://localhost:8001".to_string()
}

pub fn default_stream_timeout() -> u64 {
    30
}

/// Bound on model/tool alternations per turn; nothing in the tool-call
/// protocol otherwise guarantees the model stops requesting tools.
pub fn default_max_turns() -> u32 {
    50
}

pub fn default_plans_dir() -> String {
    "plans".to_string()
}

/// Timeout for the startup health probe against the recipe service.
pub fn default_health_timeout() -> u64 {
    5
}
