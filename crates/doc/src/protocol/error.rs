use std::error::Error;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocError {
    #[error("io error while duplicating body: {source}")]
    Io { source: Box<dyn Error + Send + Sync> },

    #[error("attribute extraction error: {source}")]
    Extraction {
        #[from]
        source: AttributeExtractionError,
    },
}

impl DocError {
    pub fn io<E: Into<Box<dyn Error + Send + Sync>>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

/// What went wrong while turning a body into attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionErrorKind {
    /// The `Content-Type` header could not be parsed as a media type
    InvalidContentType,
    /// A url-encoded segment did not split into a single non-empty `key=value`
    MalformedForm,
    /// `multipart/form-data` arrived without a `boundary` parameter
    MissingBoundary,
    /// The multipart stream failed before its end
    Multipart,
}

impl fmt::Display for ExtractionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContentType => write!(f, "invalid content type"),
            Self::MalformedForm => write!(f, "malformed form"),
            Self::MissingBoundary => write!(f, "missing multipart boundary"),
            Self::Multipart => write!(f, "multipart read failure"),
        }
    }
}

/// The single recoverable error produced by dispatching and decoding a body.
///
/// It carries the content type that was being decoded so a caller logging it
/// can tell which request shape was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} for content type '{content_type}': {message}")]
pub struct AttributeExtractionError {
    kind: ExtractionErrorKind,
    content_type: String,
    message: String,
}

impl AttributeExtractionError {
    pub fn new<C: ToString, M: ToString>(kind: ExtractionErrorKind, content_type: C, message: M) -> Self {
        Self { kind, content_type: content_type.to_string(), message: message.to_string() }
    }

    pub fn invalid_content_type<C: ToString, M: ToString>(content_type: C, message: M) -> Self {
        Self::new(ExtractionErrorKind::InvalidContentType, content_type, message)
    }

    pub fn malformed_form<C: ToString, M: ToString>(content_type: C, message: M) -> Self {
        Self::new(ExtractionErrorKind::MalformedForm, content_type, message)
    }

    pub fn missing_boundary<C: ToString>(content_type: C) -> Self {
        Self::new(ExtractionErrorKind::MissingBoundary, content_type, "no boundary parameter")
    }

    pub fn multipart<C: ToString, M: ToString>(content_type: C, message: M) -> Self {
        Self::new(ExtractionErrorKind::Multipart, content_type, message)
    }

    pub fn kind(&self) -> ExtractionErrorKind {
        self.kind
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
