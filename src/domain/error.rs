use thiserror::Error;

/// Core directory errors
///
/// Callers rely on `NotFound` being distinguishable from `Connection` so a
/// lookup of an unknown user maps to a "no such user" response instead of an
/// internal error, and on `Decode` being distinct from both so a malformed
/// attribute aggregate surfaces as a data-integrity problem rather than being
/// silently defaulted.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("connection error: {message}")]
    Connection { message: String },

    #[error("authentication error: {message}")]
    Authentication { message: String },

    #[error("decode error: {message}")]
    Decode { message: String },

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl DirectoryError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DirectoryError::not_found("user 'abc' not found");
        assert_eq!(error.to_string(), "not found: user 'abc' not found");
    }

    #[test]
    fn test_connection_error() {
        let error = DirectoryError::connection("replica unreachable");
        assert_eq!(error.to_string(), "connection error: replica unreachable");
    }

    #[test]
    fn test_not_found_distinct_from_connection() {
        let not_found = DirectoryError::not_found("user 'abc' not found");
        let connection = DirectoryError::connection("replica unreachable");

        assert!(matches!(not_found, DirectoryError::NotFound { .. }));
        assert!(matches!(connection, DirectoryError::Connection { .. }));
    }

    #[test]
    fn test_decode_error() {
        let error = DirectoryError::decode("malformed attribute aggregate");
        assert!(matches!(error, DirectoryError::Decode { .. }));
        assert_eq!(
            error.to_string(),
            "decode error: malformed attribute aggregate"
        );
    }
}
