//! Core types for jsongate, a small helper for calling JSON-over-HTTP APIs.
//!
//! This crate is transport-agnostic:
//! - [`RequestSpec`] describes one call and builds a [`Request`]
//! - [`ResponseHandling`] parses a body, checks [`SuccessCriteria`] and
//!   extracts a typed [`Payload`]
//! - [`HttpClient`] is the seam for the transport
//! - [`Error`] and [`Result`] cover every failure
//!
//! The `jsongate` crate ties them together with a hyper transport.

mod body;
mod client;
mod criteria;
mod error;
mod extract;
mod handling;
mod method;
mod multipart;
mod outcome;
mod params;
mod parse;
pub mod prelude;
mod request;
mod request_spec;
mod response;
mod template;

pub use body::{BodyEncoding, ContentType, from_json, from_value, to_form, to_json};
pub use client::HttpClient;
pub use criteria::{Mismatches, NULL_TEXT, SuccessCriteria};
pub use error::{Error, ErrorKind, Result};
pub use extract::{Extraction, Shape};
pub use handling::ResponseHandling;
pub use method::Method;
pub use multipart::{Form, Part};
pub use outcome::{Outcome, Payload};
pub use params::Params;
pub use parse::{ResponseFormat, parse_body};
pub use request::{Request, RequestBuilder};
pub use request_spec::RequestSpec;
pub use response::Response;
pub use template::UrlTemplate;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
