//! Tower middleware layers for the jsongate transport.
//!
//! Layers wrap [`BoxedService`](crate::BoxedService) and are added with
//! [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer). The last
//! layer added is the first to process requests.
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower building blocks for custom layers
pub use tower::{Layer, ServiceBuilder};
