//! Error types for the accessibility checker.
//!
//! Most malformed or missing input is not an error here: structure-tree
//! operations return `None` and checkers skip elements they cannot resolve.
//! The variants below cover the remaining cases that callers must handle.

/// Result type alias for checker operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while checking or editing a document.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Result store received an action outside the supported set
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Structure tree value could not be parsed
    #[error("Invalid structure tree: {0}")]
    InvalidStructureTree(String),

    /// Element type tag is not one of the known element types
    #[error("Unknown element type: {0}")]
    UnknownElementType(String),

    /// External contrast scorer failed for one sample
    #[error("Contrast scorer error for element {element_id}: {reason}")]
    Scorer {
        /// Element that was being scored
        element_id: String,
        /// Reason reported by the scorer
        reason: String,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_action_error() {
        let err = Error::InvalidAction("FLIP_EVERYTHING".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid action"));
        assert!(msg.contains("FLIP_EVERYTHING"));
    }

    #[test]
    fn test_scorer_error() {
        let err = Error::Scorer {
            element_id: "text-1".to_string(),
            reason: "no canvas".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("text-1"));
        assert!(msg.contains("no canvas"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(format!("{}", err).starts_with("JSON error"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
