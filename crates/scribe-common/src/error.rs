//! Error types for scribe - thin wrapper over transport and serde errors

use miette::Diagnostic;

/// Main error type for scribe operations
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum ScribeError {
    /// The request never produced a usable response.
    #[error("request to {endpoint} failed")]
    #[diagnostic(code(scribe::http))]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("{endpoint} answered with status {status}: {body}")]
    #[diagnostic(code(scribe::status))]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Serialization/deserialization error
    #[error(transparent)]
    #[diagnostic_source]
    Serde(#[from] SerDeError),

    /// A base or endpoint URL could not be built
    #[error("invalid url: {0}")]
    #[diagnostic(code(scribe::url))]
    Url(#[from] url::ParseError),

    /// Input rejected locally before anything was sent.
    #[error("{message}")]
    #[diagnostic(code(scribe::validation))]
    Validation {
        field: &'static str,
        message: String,
    },
}

impl ScribeError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Whether the error was raised locally, without a request being made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// HTTP status of the backend answer, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Serialization/deserialization errors
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum SerDeError {
    #[error(transparent)]
    #[diagnostic(code(scribe::json))]
    Json(#[from] serde_json::Error),
}

impl From<serde_json::Error> for ScribeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(SerDeError::Json(err))
    }
}

pub type Result<T> = std::result::Result<T, ScribeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_local() {
        let err = ScribeError::validation("title", "Title is required");
        assert!(err.is_validation());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn status_errors_carry_code() {
        let err = ScribeError::Status {
            endpoint: "/api/save".into(),
            status: 500,
            body: "disk full".into(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(
            err.to_string(),
            "/api/save answered with status 500: disk full"
        );
    }

    #[test]
    fn json_errors_convert() {
        let bad = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err: ScribeError = bad.into();
        assert!(matches!(err, ScribeError::Serde(SerDeError::Json(_))));
    }
}
