//! Business-level success checks against top-level response fields.
//!
//! Many APIs answer `200 OK` and report failure inside the body, e.g.
//! `{"code": "500", "msg": "..."}`. [`SuccessCriteria`] states which fields
//! must hold which values for the call to count as successful.
//!
//! Values are compared as strings so `200`, `"200"` and `200` from different
//! servers all match an expected `"200"`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text used for fields that are absent or `null`.
pub const NULL_TEXT: &str = "null";

/// Expected values of top-level response fields.
///
/// # Example
///
/// ```
/// use jsongate_core::SuccessCriteria;
/// use serde_json::json;
///
/// let criteria = SuccessCriteria::new().expect("code", "200");
/// assert!(criteria.validate(&json!({"code": 200, "data": {}})).is_ok());
///
/// let mismatches = criteria.validate(&json!({"code": "500"})).unwrap_err();
/// assert_eq!(mismatches.get("code"), Some("returned: 500; expected: 200"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuccessCriteria(BTreeMap<String, String>);

impl SuccessCriteria {
    /// No criteria: every response succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to stringify to `value`.
    #[must_use]
    pub fn expect(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Returns `true` if there is nothing to check.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of checked fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check every criterion against the top-level fields of `body`.
    ///
    /// A body that is not an object has no fields, so each criterion sees
    /// [`NULL_TEXT`].
    ///
    /// # Errors
    ///
    /// Returns every failing field with a `returned: …; expected: …`
    /// description.
    pub fn validate(&self, body: &Value) -> Result<(), Mismatches> {
        let mismatches: BTreeMap<_, _> = self
            .0
            .iter()
            .filter_map(|(field, expected)| {
                let actual = field_text(body.get(field));
                (actual != *expected).then(|| {
                    (
                        field.clone(),
                        format!("returned: {actual}; expected: {expected}"),
                    )
                })
            })
            .collect();

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(Mismatches(mismatches))
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SuccessCriteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NULL_TEXT.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Failing fields, each mapped to a human-readable description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mismatches(BTreeMap<String, String>);

impl Mismatches {
    /// Description for one field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for mismatches produced by validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, description)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl fmt::Display for Mismatches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, description) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {description}")?;
            first = false;
        }
        Ok(())
    }
}
