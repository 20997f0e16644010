use thiserror::Error;

/// Failure kinds surfaced by the client. Callers match on the variant
/// rather than comparing against a shared sentinel.
#[derive(Debug, Error)]
pub enum MalpediaError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("got status code {0}")]
    UnexpectedStatus(u16),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("{0}: illegal file path")]
    IllegalPath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MalpediaError>;

impl MalpediaError {
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound(what.into())
    }

    /// Stable code used in the `--json` error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::UnexpectedStatus(_) => "UNEXPECTED_STATUS",
            Self::Decode(_) => "DECODE_ERROR",
            Self::IllegalPath(_) => "ILLEGAL_PATH",
            Self::Io(_) => "IO_ERROR",
        }
    }
}

impl From<serde_json::Error> for MalpediaError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

impl From<base64::DecodeError> for MalpediaError {
    fn from(e: base64::DecodeError) -> Self {
        Self::Decode(format!("invalid base64 content: {e}"))
    }
}

impl From<zip::result::ZipError> for MalpediaError {
    fn from(e: zip::result::ZipError) -> Self {
        match e {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::Decode(format!("zip archive: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MalpediaError;

    #[test]
    fn codes_follow_variant() {
        assert_eq!(MalpediaError::not_found("x").code(), "NOT_FOUND");
        assert_eq!(
            MalpediaError::invalid_argument("x").code(),
            "INVALID_ARGUMENT"
        );
        assert_eq!(MalpediaError::UnexpectedStatus(500).code(), "UNEXPECTED_STATUS");
        assert_eq!(
            MalpediaError::IllegalPath("../x".into()).code(),
            "ILLEGAL_PATH"
        );
    }

    #[test]
    fn zip_io_errors_stay_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: MalpediaError = zip::result::ZipError::Io(io).into();
        assert!(matches!(err, MalpediaError::Io(_)));
    }
}
