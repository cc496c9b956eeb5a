use serde::{Deserialize, Serialize};
use std::fmt;

/// Error object returned by the API for any non-200 response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiError {
    /// HTTP status of the response
    pub status: u16,

    /// Machine-friendly error code, such as `not_found`
    pub code: String,

    /// Human-readable explanation
    pub details: String,

    /// Refinement of `code`, such as `ambiguous`
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Additional human-readable problems with the request
    pub warnings: Vec<String>,
}

impl ApiError {
    /// True for 404 responses
    pub const fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// True when a name lookup matched more than one card
    pub fn is_ambiguous(&self) -> bool {
        self.kind.as_deref() == Some("ambiguous")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error {} ({}): {}", self.status, self.code, self.details)?;
        if !self.warnings.is_empty() {
            write!(f, " [{}]", self.warnings.join(" | "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ambiguous() {
        let err: ApiError = serde_json::from_str(
            r#"{"object":"error","code":"not_found","status":404,"type":"ambiguous",
                "details":"Too many cards match ambiguous name \"ow\"."}"#,
        )
        .unwrap();

        assert!(err.is_not_found());
        assert!(err.is_ambiguous());
        assert!(err.warnings.is_empty());
    }

    #[test]
    fn test_display_includes_warnings() {
        let err = ApiError {
            status: 400,
            code: "bad_request".to_string(),
            details: "invalid query".to_string(),
            kind: None,
            warnings: vec!["a".to_string(), "b".to_string()],
        };

        assert_eq!(err.to_string(), "API error 400 (bad_request): invalid query [a | b]");
    }
}
