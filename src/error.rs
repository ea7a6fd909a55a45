use thiserror::Error;

/// Result type for salary predictor operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a model unavailable error
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Error::ModelUnavailable(msg.into())
    }

    /// Create an inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Error::Inference(msg.into())
    }

    /// Create an artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Error::Artifact(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Error context trait for adding context to errors
pub trait WithErrorContext {
    fn with_context(self, context: impl Into<String>) -> Self;
}

impl<T> WithErrorContext for Result<T> {
    fn with_context(self, context: impl Into<String>) -> Self {
        self.map_err(|e| {
            let context_str = context.into();
            match e {
                Error::Validation(msg) => Error::Validation(format!("{}: {}", context_str, msg)),
                Error::ModelUnavailable(msg) => Error::ModelUnavailable(format!("{}: {}", context_str, msg)),
                Error::Inference(msg) => Error::Inference(format!("{}: {}", context_str, msg)),
                Error::Artifact(msg) => Error::Artifact(format!("{}: {}", context_str, msg)),
                Error::Config(msg) => Error::Config(format!("{}: {}", context_str, msg)),
                Error::Serialization(msg) => Error::Serialization(format!("{}: {}", context_str, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context_str, msg)),
                Error::Io(err) => Error::Io(std::io::Error::new(
                    err.kind(),
                    format!("{}: {}", context_str, err),
                )),
            }
        })
    }
}

/// Main error type for the salary predictor
#[derive(Error, Debug)]
pub enum Error {
    /// Input outside the declared domain
    #[error("Validation error: {0}")]
    Validation(String),

    /// Model not loaded
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Scaler or model failed while computing a prediction
    #[error("Prediction error: {0}")]
    Inference(String),

    /// Model or scaler artifact could not be parsed or is inconsistent
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/Deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_prefixes_message() {
        let result: Result<()> = Err(Error::artifact("coefficients are empty"));
        let err = result.with_context("model/model.json").unwrap_err();
        assert_eq!(err.to_string(), "Artifact error: model/model.json: coefficients are empty");
    }

    #[test]
    fn test_with_context_keeps_io_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let result: Result<()> = Err(Error::from(io));
        match result.with_context("reading scaler").unwrap_err() {
            Error::Io(err) => {
                assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
                assert!(err.to_string().starts_with("reading scaler"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::validation("bad").is_client_error());
        assert!(!Error::model_unavailable("none").is_client_error());
        assert!(!Error::inference("shape").is_client_error());
    }
}
