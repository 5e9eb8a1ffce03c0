//! Response body parsing.

use std::str::FromStr;

use serde_json::Value;

use crate::{Error, Result};

/// How the server's body is declared.
///
/// Both formats end up as JSON: `Text` bodies are served as strings (often
/// `text/plain`) but must still contain JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseFormat {
    /// Parse the raw bytes as JSON.
    #[default]
    Json,
    /// Decode the bytes as UTF-8 text, then parse the text as JSON.
    Text,
}

impl FromStr for ResponseFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "string" => Ok(Self::Text),
            _ => Err(Error::configuration(format!("unknown response format `{s}`"))),
        }
    }
}

/// Parse a response body into a generic JSON value.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if the body is not JSON (or, for
/// [`ResponseFormat::Text`], not UTF-8).
///
/// # Example
///
/// ```
/// use jsongate_core::{ResponseFormat, parse_body};
///
/// let value = parse_body(br#"{"code":"200"}"#, ResponseFormat::Text).expect("parse");
/// assert_eq!(value["code"], "200");
/// ```
pub fn parse_body(body: &[u8], format: ResponseFormat) -> Result<Value> {
    match format {
        ResponseFormat::Json => serde_json::from_slice(body)
            .map_err(|e| Error::malformed_response(format!("invalid JSON: {e}"))),
        ResponseFormat::Text => {
            let text = std::str::from_utf8(body)
                .map_err(|e| Error::malformed_response(format!("invalid UTF-8 text: {e}")))?;
            serde_json::from_str(text)
                .map_err(|e| Error::malformed_response(format!("text is not JSON: {e}")))
        }
    }
}
