use std::fmt;

#[derive(Debug)]
pub enum RohBotError {
    ApiError {
        status: u16,
        message: String,
    },
    #[allow(dead_code)]
    ConfigError(String),
    #[allow(dead_code)]
    ToolError(String),
    /// The model kept requesting tools past the configured alternation bound.
    TurnLimitExceeded {
        limit: u32,
    },
    NetworkError(reqwest::Error),
    Timeout,
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl fmt::Display for RohBotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RohBotError::ApiError { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            RohBotError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            RohBotError::ToolError(msg) => write!(f, "Tool error: {}", msg),
            RohBotError::TurnLimitExceeded { limit } => {
                write!(
                    f,
                    "turn aborted after {} model/tool alternations without a final answer",
                    limit
                )
            }
            RohBotError::NetworkError(e) => write!(f, "Network error: {}", e),
            RohBotError::Timeout => write!(f, "Request timeout"),
            RohBotError::IoError(e) => write!(f, "IO error: {}", e),
            RohBotError::JsonError(e) => write!(f, "JSON error: {}", e),
            RohBotError::YamlError(e) => write!(f, "YAML error: {}", e),
            RohBotError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RohBotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RohBotError::NetworkError(e) => Some(e),
            RohBotError::IoError(e) => Some(e),
            RohBotError::JsonError(e) => Some(e),
            RohBotError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RohBotError {
    fn from(err: reqwest::Error) -> Self {
        RohBotError::NetworkError(err)
    }
}

impl From<std::io::Error> for RohBotError {
    fn from(err: std::io::Error) -> Self {
        RohBotError::IoError(err)
    }
}

impl From<serde_json::Error> for RohBotError {
    fn from(err: serde_json::Error) -> Self {
        RohBotError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for RohBotError {
    fn from(err: serde_yaml::Error) -> Self {
        RohBotError::YamlError(err)
    }
}

impl From<anyhow::Error> for RohBotError {
    fn from(err: anyhow::Error) -> Self {
        RohBotError::Other(err.to_string())
    }
}

impl From<String> for RohBotError {
    fn from(msg: String) -> Self {
        RohBotError::Other(msg)
    }
}

impl From<&str> for RohBotError {
    fn from(msg: &str) -> Self {
        RohBotError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RohBotError>;
