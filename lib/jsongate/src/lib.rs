//! Send GET/POST requests, gate JSON responses on success fields and
//! extract typed results.
//!
//! Many HTTP APIs answer every call with a `200` and an envelope like
//! `{"code": "200", "msg": "...", "data": ...}`. jsongate builds the
//! request, checks the envelope against [`SuccessCriteria`] and decodes the
//! interesting field into your type.
//!
//! # Example
//!
//! ```no_run
//! use jsongate::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! struct Order {
//!     id: u64,
//! }
//!
//! # async fn run() -> jsongate::Result<()> {
//! let dispatcher = Dispatcher::new();
//! let handling = ResponseHandling::new().expect("code", "200").list("data");
//!
//! let outcome: Outcome<Order> = dispatcher
//!     .post(
//!         "https://shop.example.com/orders/search",
//!         Params::new().with("customer", "c-42"),
//!         None,
//!         BodyEncoding::Json,
//!         &handling,
//!     )
//!     .await?;
//!
//! if let Some(orders) = outcome.into_vec() {
//!     println!("{} orders", orders.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Use [`BlockingDispatcher`] from synchronous code.

mod blocking;
mod client;
mod config;
mod connector;
mod dispatcher;
pub mod middleware;
pub mod prelude;

// Re-export client types
pub use blocking::BlockingDispatcher;
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use dispatcher::Dispatcher;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use jsongate_core::{
    BodyEncoding, ContentType, Error, ErrorKind, Extraction, Form, HttpClient, Method,
    Mismatches, NULL_TEXT, Outcome, Params, Part, Payload, Request, RequestBuilder, RequestSpec,
    Response, ResponseFormat, ResponseHandling, Result, Shape, SuccessCriteria, UrlTemplate,
    from_json, from_value, parse_body, to_form, to_json,
};

// Re-export http types for status codes and headers
pub use jsongate_core::{StatusCode, header};

pub use url;
