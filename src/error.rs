//! Error types for relmap
//!
//! Inference itself is total and never fails; errors exist only for the
//! strict entry points that refuse to degrade malformed input.

use thiserror::Error;

/// The main error type for relmap
#[derive(Error, Debug)]
pub enum Error {
    /// The input text was not valid JSON and strict parsing was requested.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Result type alias for relmap
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_parse_display() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::from(err);
        assert!(err.to_string().starts_with("Failed to parse JSON:"));
    }
}
