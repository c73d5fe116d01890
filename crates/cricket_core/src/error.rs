use thiserror::Error;

/// Everything the engine can report back to a caller.
///
/// Derivation code never propagates these past a refresh cycle: a malformed
/// score becomes a zero score, an empty over list becomes an empty timeline,
/// and an unknown match id becomes an absent result. Only the JSON API and
/// the config loaders hand them to callers.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Malformed score '{input}': {reason}")]
    MalformedScore { input: String, reason: String },

    #[error("Match not found: {0}")]
    MatchNotFound(u32),

    #[error("No over data supplied")]
    EmptyOverData,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        CoreError::MalformedScore { input: input.to_string(), reason: reason.into() }
    }

    /// Whether a refresh cycle can carry on after this error by substituting
    /// a safe default.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::MalformedScore { .. } => true,
            CoreError::MatchNotFound(_) => true,
            CoreError::EmptyOverData => true,
            CoreError::InvalidConfig(_) => false,
            CoreError::InvalidRequest(_) => false,
            CoreError::Json(_) => false,
            CoreError::Yaml(_) => false,
            CoreError::Io(_) => true,
        }
    }

    /// Stable machine-readable code used in JSON API error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::MalformedScore { .. } => "MALFORMED_SCORE",
            CoreError::MatchNotFound(_) => "MATCH_NOT_FOUND",
            CoreError::EmptyOverData => "EMPTY_OVER_DATA",
            CoreError::InvalidConfig(_) => "INVALID_CONFIG",
            CoreError::InvalidRequest(_) => "INVALID_REQUEST",
            CoreError::Json(_) => "JSON_ERROR",
            CoreError::Yaml(_) => "YAML_ERROR",
            CoreError::Io(_) => "IO_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
