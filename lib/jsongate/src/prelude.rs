//! Prelude module for convenient imports.
//!
//! ```ignore
//! use jsongate::prelude::*;
//! ```

pub use crate::{
    BlockingDispatcher, BodyEncoding, ClientConfig, Dispatcher, Error, ErrorKind, Extraction,
    HttpClient, HyperClient, Mismatches, Outcome, Params, Part, Payload, RequestSpec,
    ResponseFormat, ResponseHandling, Result, Shape, SuccessCriteria,
};
pub use serde::{Deserialize, Serialize};
