//! Body encodings and serialization utilities.

use std::str::FromStr;

use bytes::Bytes;
use serde_json::Value;

use crate::{Error, Result};

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
    /// Multipart content type (`multipart/form-data`), without boundary.
    MultipartFormData,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::MultipartFormData => "multipart/form-data",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the parameters of a request are put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BodyEncoding {
    /// No body; parameters fill the URL template.
    #[default]
    None,
    /// `application/x-www-form-urlencoded` body.
    FormUrlEncoded,
    /// `multipart/form-data` body, one text part per value.
    Multipart,
    /// A flat JSON object body.
    Json,
}

impl BodyEncoding {
    /// The content type this encoding produces, if it produces a body.
    #[must_use]
    pub const fn content_type(&self) -> Option<ContentType> {
        match self {
            Self::None => None,
            Self::FormUrlEncoded => Some(ContentType::FormUrlEncoded),
            Self::Multipart => Some(ContentType::MultipartFormData),
            Self::Json => Some(ContentType::Json),
        }
    }
}

impl FromStr for BodyEncoding {
    type Err = Error;

    /// Parse an encoding name.
    ///
    /// Accepts `none`, `form`, `form/url`, `x-www-form-urlencoded`,
    /// `multipart`, `file` and `json` (case-insensitive), plus the matching
    /// MIME types.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "form" | "form/url" | "x-www-form-urlencoded" | "application/x-www-form-urlencoded" => {
                Ok(Self::FormUrlEncoded)
            }
            "multipart" | "file" | "multipart/form-data" => Ok(Self::Multipart),
            "json" | "application/json" => Ok(Self::Json),
            _ => Err(Error::configuration(format!("unknown body encoding `{s}`"))),
        }
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to form URL-encoded bytes.
///
/// Uses `serde_html_form`, so a sequence of pairs with repeated names
/// encodes as repeated fields (`tag=a&tag=b`).
///
/// # Errors
///
/// Returns an error if form serialization fails.
///
/// # Example
///
/// ```
/// use jsongate_core::to_form;
///
/// let pairs = vec![("tag", "a"), ("tag", "b")];
/// let bytes = to_form(&pairs).expect("serialize");
/// assert_eq!(bytes.as_ref(), b"tag=a&tag=b");
/// ```
pub fn to_form<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_html_form::to_string(value)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns [`Error::Decode`] with the path to the failing field.
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| Error::decode(e.path().to_string(), e.inner().to_string()))
}

/// Decode an already parsed JSON value with path-aware error messages.
///
/// # Errors
///
/// Returns [`Error::Decode`] with the path to the failing field.
///
/// # Example
///
/// ```
/// use jsongate_core::from_value;
/// use serde_json::json;
///
/// let ids: Vec<u64> = from_value(json!([1, 2, 3])).expect("decode");
/// assert_eq!(ids, vec![1, 2, 3]);
/// ```
pub fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value)
        .map_err(|e| Error::decode(e.path().to_string(), e.inner().to_string()))
}
