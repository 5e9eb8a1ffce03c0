//! Request dispatch: build, send, check status, then gate and extract.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, error, info_span, warn};

use crate::{
    BodyEncoding, ClientConfig, HttpClient, HyperClient, Outcome, Params, RequestSpec,
    ResponseHandling, Result, UrlTemplate,
};

/// Issues calls through any [`HttpClient`] and maps the answers onto
/// caller types.
///
/// Each call runs the same pipeline: build the request, send it, turn a
/// non-2xx status into [`Error::Http`](crate::Error::Http), then hand the
/// body to [`ResponseHandling::apply`].
///
/// # Example
///
/// ```no_run
/// use jsongate::prelude::*;
///
/// #[derive(Debug, Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// # async fn run() -> jsongate::Result<()> {
/// let dispatcher = Dispatcher::new();
/// let handling = ResponseHandling::new().expect("code", "200").single("data");
///
/// let outcome: Outcome<User> = dispatcher
///     .get(
///         "https://api.example.com/users/{id}",
///         Params::new().with("id", 42),
///         &handling,
///     )
///     .await?;
///
/// match outcome {
///     Outcome::Success(payload) => println!("{:?}", payload.into_single()),
///     Outcome::Failure(mismatches) => println!("rejected: {mismatches}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Dispatcher<C = HyperClient> {
    client: C,
}

impl<C: Clone> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl Dispatcher<HyperClient> {
    /// A dispatcher over a default [`HyperClient`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(HyperClient::new())
    }

    /// A dispatcher over a [`HyperClient`] built from `config`.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_client(HyperClient::with_config(config))
    }
}

impl Default for Dispatcher<HyperClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Dispatcher<C> {
    /// A dispatcher over `client`.
    #[must_use]
    pub const fn with_client(client: C) -> Self {
        Self { client }
    }

    /// Get a reference to the inner HTTP client.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.client
    }

    /// Consume the dispatcher and return the inner HTTP client.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }
}

impl<C: HttpClient> Dispatcher<C> {
    /// Send a GET; `params` fill the `{name}` placeholders of `url`.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: impl Into<UrlTemplate>,
        params: Params,
        handling: &ResponseHandling,
    ) -> Result<Outcome<T>> {
        let spec = RequestSpec::get(url).params(params);
        self.dispatch(&spec, handling).await
    }

    /// Send a POST whose body carries `params` with `encoding`.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`].
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: impl Into<UrlTemplate>,
        params: Params,
        headers: Option<HashMap<String, String>>,
        encoding: BodyEncoding,
        handling: &ResponseHandling,
    ) -> Result<Outcome<T>> {
        let spec = RequestSpec::post(url, encoding)
            .params(params)
            .headers(headers.unwrap_or_default());
        self.dispatch(&spec, handling).await
    }

    /// Run the full pipeline for `spec`.
    ///
    /// # Errors
    ///
    /// - a [`Configuration`](crate::ErrorKind::Configuration) error if the
    ///   request cannot be built; nothing is sent
    /// - a [`Transport`](crate::ErrorKind::Transport) error if the call
    ///   fails or the status is not 2xx
    /// - [`Error::MalformedResponse`](crate::Error::MalformedResponse) if
    ///   the body does not parse
    /// - a [`FieldExtraction`](crate::ErrorKind::FieldExtraction) error if
    ///   the payload cannot be extracted or decoded
    ///
    /// Failing success criteria give [`Outcome::Failure`], not an error.
    pub async fn dispatch<T: DeserializeOwned>(
        &self,
        spec: &RequestSpec,
        handling: &ResponseHandling,
    ) -> Result<Outcome<T>> {
        let span = info_span!("jsongate.dispatch", method = %spec.method(), url = %spec.url());

        async move {
            let request = spec
                .build()
                .inspect_err(|err| error!(error = %err, "cannot build request"))?;
            debug!(
                url = %request.url(),
                header_names = ?request.headers().keys().collect::<Vec<_>>(),
                body_len = request.body().map_or(0, bytes::Bytes::len),
                "request built"
            );

            let response = self
                .client
                .execute(request)
                .await
                .and_then(crate::Response::error_for_status)
                .inspect_err(|err| warn!(error = %err, "request failed"))?;

            handling.apply(response.body())
        }
        .instrument(span)
        .await
    }
}
