//! HTTP transport trait.

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Sends one request and returns the raw response.
///
/// Implementations own connection pooling, TLS and timeouts. Non-2xx
/// statuses are returned as responses, not errors.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns a transport error if no response was received:
    /// - [`Error::Connection`](crate::Error::Connection) for network errors
    /// - [`Error::Tls`](crate::Error::Tls) for TLS errors
    /// - [`Error::Timeout`](crate::Error::Timeout) for timeouts
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

impl<C: HttpClient> HttpClient for std::sync::Arc<C> {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}
