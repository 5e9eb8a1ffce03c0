//! Field extraction and typed decoding.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::params::json_kind;
use crate::{Error, Payload, Result, from_value};

/// Label used in errors when the whole body is the extraction target.
const BODY_LABEL: &str = "<body>";

/// Whether the extracted value is one item or a list of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    /// Decode the value as one `T`.
    #[default]
    Single,
    /// The value must be an array; decode each element as `T`.
    List,
}

impl FromStr for Shape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "obj" | "object" => Ok(Self::Single),
            "list" | "array" => Ok(Self::List),
            _ => Err(Error::configuration(format!("unknown result shape `{s}`"))),
        }
    }
}

/// Which part of the body to decode, and in which shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Extraction {
    field: Option<String>,
    shape: Shape,
}

impl Extraction {
    /// Decode the whole body.
    #[must_use]
    pub const fn body(shape: Shape) -> Self {
        Self { field: None, shape }
    }

    /// Decode one top-level field.
    #[must_use]
    pub fn field(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            field: Some(name.into()),
            shape,
        }
    }

    /// Decode a top-level field as one value.
    #[must_use]
    pub fn single(name: impl Into<String>) -> Self {
        Self::field(name, Shape::Single)
    }

    /// Decode a top-level array field as a list.
    #[must_use]
    pub fn list(name: impl Into<String>) -> Self {
        Self::field(name, Shape::List)
    }

    /// Field name, `None` for the whole body.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Result shape.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// The same shape applied to the whole body.
    #[must_use]
    pub const fn whole_body(&self) -> Self {
        Self::body(self.shape)
    }

    /// Pull the target out of `body` and decode it into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldExtraction`] if the field is missing, the body
    /// is not an object, or a list was asked for and the value is not an
    /// array. Returns [`Error::Decode`] if the value does not fit `T`; its
    /// path starts with the field name.
    pub fn extract<T: DeserializeOwned>(&self, body: Value) -> Result<Payload<T>> {
        let (label, target) = match self.field.as_deref() {
            None => (BODY_LABEL, body),
            Some(name) => (name, take_field(body, name)?),
        };

        let decoded = match self.shape {
            Shape::Single => from_value(target).map(Payload::Single),
            Shape::List => match target {
                Value::Array(_) => from_value(target).map(Payload::List),
                other => {
                    return Err(Error::field_extraction(
                        label,
                        format!("expected an array, got {}", json_kind(&other)),
                    ));
                }
            },
        };

        match (decoded, self.field.as_deref()) {
            (Err(Error::Decode { path, message }), Some(name)) => {
                Err(Error::decode(prefix_path(name, &path), message))
            }
            (result, _) => result,
        }
    }
}

fn take_field(body: Value, name: &str) -> Result<Value> {
    match body {
        Value::Object(mut fields) => fields
            .remove(name)
            .ok_or_else(|| Error::field_extraction(name, "field is missing")),
        other => Err(Error::field_extraction(
            name,
            format!("response body is {}, not an object", json_kind(&other)),
        )),
    }
}

fn prefix_path(field: &str, path: &str) -> String {
    if path == "." {
        field.to_string()
    } else if path.starts_with('[') {
        format!("{field}{path}")
    } else {
        format!("{field}.{path}")
    }
}
