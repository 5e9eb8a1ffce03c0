//! Error types for jsongate.
//!
//! Every failure of a call is one [`Error`]. Errors are grouped into four
//! [`ErrorKind`]s so callers can decide what to do without matching every
//! variant: fix their code, retry, or give up on the response.

use bytes::Bytes;
use derive_more::{Display, Error, From};

// ============================================================================
// Error Kind
// ============================================================================

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// The call was set up wrongly; nothing was sent.
    #[display("configuration")]
    Configuration,
    /// The transport failed or the server answered with a non-2xx status.
    #[display("transport")]
    Transport,
    /// The body could not be parsed as JSON.
    #[display("malformed response")]
    MalformedResponse,
    /// The requested field is missing, has the wrong JSON kind, or does not
    /// decode into the target type.
    #[display("field extraction")]
    FieldExtraction,
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for jsongate operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Invalid encoding, URL template or request shape.
    #[display("configuration error: {_0}")]
    #[from(skip)]
    Configuration(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// JSON request body serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// HTTP-level errors (non-2xx status codes).
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Response body, if available.
        #[error(not(source))]
        body: Option<Bytes>,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The response body is not valid JSON.
    #[display("malformed response body: {_0}")]
    #[from(skip)]
    MalformedResponse(#[error(not(source))] String),

    /// The field is absent or holds the wrong kind of JSON value.
    #[display("cannot extract field '{field}': {message}")]
    #[from(skip)]
    FieldExtraction {
        /// Field name, or `<body>` when the whole body was the target.
        field: String,
        /// What went wrong.
        message: String,
    },

    /// The extracted value does not decode into the target type.
    #[display("decode error at '{path}': {message}")]
    #[from(skip)]
    Decode {
        /// JSON path to the error (e.g., "data[2].id").
        path: String,
        /// Error message.
        message: String,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an HTTP error from status code and message.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Create an HTTP error with body.
    #[must_use]
    pub fn http_with_body(status: u16, message: impl Into<String>, body: Bytes) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: Some(body),
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create a malformed response error.
    #[must_use]
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Create a field extraction error.
    #[must_use]
    pub fn field_extraction(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FieldExtraction {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a decode error with path context.
    #[must_use]
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The coarse kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_)
            | Self::InvalidUrl(_)
            | Self::JsonSerialization(_)
            | Self::FormSerialization(_) => ErrorKind::Configuration,
            Self::Http { .. } | Self::Connection(_) | Self::Tls(_) | Self::Timeout => {
                ErrorKind::Transport
            }
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::FieldExtraction { .. } | Self::Decode { .. } => ErrorKind::FieldExtraction,
        }
    }

    /// Returns `true` if the transport failed or the status was not 2xx.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport)
    }

    /// Returns `true` if the call was rejected before anything was sent.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.kind(), ErrorKind::Configuration)
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the response body if this is an HTTP error with a body.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Try to decode the HTTP error body as JSON.
    ///
    /// Returns `None` if there is no body or this is not an HTTP error.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }
}
