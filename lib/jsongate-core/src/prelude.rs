//! Prelude module for convenient imports.
//!
//! ```ignore
//! use jsongate_core::prelude::*;
//! ```

pub use crate::{
    BodyEncoding, Error, ErrorKind, Extraction, HttpClient, Method, Mismatches, Outcome, Params,
    Part, Payload, RequestSpec, ResponseFormat, ResponseHandling, Result, Shape, SuccessCriteria,
};
