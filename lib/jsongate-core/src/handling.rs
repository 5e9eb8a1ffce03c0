//! What to do with a response body once it has arrived.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    Extraction, Outcome, ResponseFormat, Result, Shape, SuccessCriteria, parse_body,
};

/// Response format, success criteria and extraction for one call.
///
/// # Example
///
/// ```
/// use jsongate_core::{Outcome, Payload, ResponseHandling};
///
/// let handling = ResponseHandling::new().expect("code", "200").single("token");
/// let outcome: Outcome<String> = handling
///     .apply(br#"{"code": 200, "token": "abc"}"#)
///     .expect("well-formed body");
///
/// assert_eq!(outcome, Outcome::Success(Payload::Single("abc".to_string())));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHandling {
    format: ResponseFormat,
    criteria: SuccessCriteria,
    extraction: Extraction,
}

impl ResponseHandling {
    /// JSON body, no criteria, whole body decoded as one value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response format.
    #[must_use]
    pub const fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Parse the body as text holding JSON.
    #[must_use]
    pub const fn text(self) -> Self {
        self.format(ResponseFormat::Text)
    }

    /// Replace the success criteria.
    #[must_use]
    pub fn criteria(mut self, criteria: SuccessCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Add one success criterion.
    #[must_use]
    pub fn expect(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.criteria = self.criteria.expect(field, value);
        self
    }

    /// Replace the extraction.
    #[must_use]
    pub fn extraction(mut self, extraction: Extraction) -> Self {
        self.extraction = extraction;
        self
    }

    /// Decode `field` as one value.
    #[must_use]
    pub fn single(self, field: impl Into<String>) -> Self {
        self.extraction(Extraction::single(field))
    }

    /// Decode the array `field` as a list.
    #[must_use]
    pub fn list(self, field: impl Into<String>) -> Self {
        self.extraction(Extraction::list(field))
    }

    /// Decode the whole body with `shape`.
    #[must_use]
    pub fn whole_body(self, shape: Shape) -> Self {
        self.extraction(Extraction::body(shape))
    }

    /// Response format.
    #[must_use]
    pub const fn response_format(&self) -> ResponseFormat {
        self.format
    }

    /// Success criteria.
    #[must_use]
    pub const fn success_criteria(&self) -> &SuccessCriteria {
        &self.criteria
    }

    /// Extraction.
    #[must_use]
    pub const fn field_extraction(&self) -> &Extraction {
        &self.extraction
    }

    /// Returns `true` when validation is skipped and the whole body is
    /// decoded: no criteria, or no field name.
    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        self.criteria.is_empty() || self.extraction.field_name().is_none()
    }

    /// Parse, validate and extract `body`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`](crate::Error::MalformedResponse)
    /// if the body cannot be parsed, and a
    /// [`FieldExtraction`](crate::ErrorKind::FieldExtraction) error if the
    /// target cannot be extracted or decoded. Failing criteria are not an
    /// error: they give [`Outcome::Failure`].
    pub fn apply<T: DeserializeOwned>(&self, body: &[u8]) -> Result<Outcome<T>> {
        let value = parse_body(body, self.format)?;

        let extraction = if self.is_passthrough() {
            debug!(
                criteria = self.criteria.len(),
                field = ?self.extraction.field_name(),
                "no validation, decoding whole body"
            );
            self.extraction.whole_body()
        } else {
            if let Err(mismatches) = self.criteria.validate(&value) {
                warn!(%mismatches, body = %value, "response did not meet success criteria");
                return Ok(Outcome::Failure(mismatches));
            }
            self.extraction.clone()
        };

        extraction
            .extract(value)
            .map(Outcome::Success)
            .inspect_err(|err| warn!(error = %err, "cannot extract response payload"))
    }
}
