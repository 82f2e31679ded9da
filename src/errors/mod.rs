use std::path::Path;

use thiserror::Error;

/// Typed failures raised by the rating library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatingError {
    #[error("Invalid match {match_id}: {reason}")]
    InvalidMatch { match_id: String, reason: String },

    #[error("Component '{name}' not found. Available: {available}")]
    UnknownComponent { name: String, available: String },

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Player {puuid} has no stats, cannot compute {component}")]
    MissingStats { puuid: String, component: String },

    #[error("{component} for player {puuid} is not a finite number")]
    NonFinite { puuid: String, component: String },
}

impl RatingError {
    pub fn invalid_match(match_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMatch {
            match_id: match_id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Add context to file load errors
pub fn load_context(what: &str, path: &Path) -> String {
    format!("Failed to load {} from: {}", what, path.display())
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to save errors
pub fn save_context(path: &Path) -> String {
    format!("Failed to save output to: {}", path.display())
}
