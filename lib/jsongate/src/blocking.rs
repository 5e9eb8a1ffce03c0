//! Blocking front end.
//!
//! [`BlockingDispatcher`] owns a single-threaded tokio runtime and drives a
//! [`Dispatcher`] to completion on the calling thread.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tokio::runtime::{Builder, Handle, Runtime};

use crate::{
    BodyEncoding, ClientConfig, Dispatcher, Error, HttpClient, HyperClient, Outcome, Params,
    RequestSpec, ResponseHandling, Result, UrlTemplate,
};

/// Synchronous counterpart of [`Dispatcher`]: every call blocks until the
/// response has been handled.
///
/// Must not be used from inside an async runtime; such calls fail with a
/// configuration error instead of blocking the executor.
///
/// # Example
///
/// ```no_run
/// use jsongate::prelude::*;
///
/// # fn run() -> jsongate::Result<()> {
/// let dispatcher = BlockingDispatcher::new()?;
/// let handling = ResponseHandling::new().expect("status", "ok").single("token");
///
/// let outcome: Outcome<String> = dispatcher.post(
///     "https://auth.example.com/login",
///     Params::new().with("user", "alice").with("password", "secret"),
///     None,
///     BodyEncoding::FormUrlEncoded,
///     &handling,
/// )?;
/// # drop(outcome);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BlockingDispatcher<C = HyperClient> {
    runtime: Runtime,
    inner: Dispatcher<C>,
}

impl BlockingDispatcher<HyperClient> {
    /// A blocking dispatcher over a default [`HyperClient`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the runtime cannot be started.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// A blocking dispatcher over a [`HyperClient`] built from `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the runtime cannot be started.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_client(HyperClient::with_config(config))
    }
}

impl<C: HttpClient> BlockingDispatcher<C> {
    /// A blocking dispatcher over `client`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the runtime cannot be started.
    pub fn with_client(client: C) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::configuration(format!("cannot start runtime: {e}")))?;
        Ok(Self {
            runtime,
            inner: Dispatcher::with_client(client),
        })
    }

    /// The async dispatcher driven by this one.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<C> {
        &self.inner
    }

    /// Blocking [`Dispatcher::get`].
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`].
    pub fn get<T: DeserializeOwned>(
        &self,
        url: impl Into<UrlTemplate>,
        params: Params,
        handling: &ResponseHandling,
    ) -> Result<Outcome<T>> {
        self.block_on(self.inner.get(url, params, handling))
    }

    /// Blocking [`Dispatcher::post`].
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`].
    pub fn post<T: DeserializeOwned>(
        &self,
        url: impl Into<UrlTemplate>,
        params: Params,
        headers: Option<HashMap<String, String>>,
        encoding: BodyEncoding,
        handling: &ResponseHandling,
    ) -> Result<Outcome<T>> {
        self.block_on(self.inner.post(url, params, headers, encoding, handling))
    }

    /// Blocking [`Dispatcher::dispatch`].
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`].
    pub fn dispatch<T: DeserializeOwned>(
        &self,
        spec: &RequestSpec,
        handling: &ResponseHandling,
    ) -> Result<Outcome<T>> {
        self.block_on(self.inner.dispatch(spec, handling))
    }

    fn block_on<F, T>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if Handle::try_current().is_ok() {
            return Err(Error::configuration(
                "blocking dispatcher called from within an async runtime",
            ));
        }
        self.runtime.block_on(future)
    }
}
