//! Declarative description of one call.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::debug;

use crate::{BodyEncoding, Error, Form, Method, Params, Part, Request, Result, UrlTemplate};

/// Everything needed to build one request: method, URL template,
/// parameters, headers and body encoding.
///
/// # Example
///
/// ```
/// use jsongate_core::{BodyEncoding, Params, RequestSpec};
///
/// let request = RequestSpec::post("https://api.example.com/login", BodyEncoding::FormUrlEncoded)
///     .params(Params::new().with("user", "alice").with("password", "secret"))
///     .header("X-Trace", "1")
///     .build()
///     .expect("valid request");
///
/// assert_eq!(
///     request.header("Content-Type"),
///     Some("application/x-www-form-urlencoded")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    url: UrlTemplate,
    params: Params,
    headers: HashMap<String, String>,
    encoding: BodyEncoding,
    parts: Vec<Part>,
}

impl RequestSpec {
    /// A request with no parameters, headers or body.
    #[must_use]
    pub fn new(method: Method, url: impl Into<UrlTemplate>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Params::new(),
            headers: HashMap::new(),
            encoding: BodyEncoding::None,
            parts: Vec::new(),
        }
    }

    /// A GET request; parameters fill the URL placeholders.
    #[must_use]
    pub fn get(url: impl Into<UrlTemplate>) -> Self {
        Self::new(Method::Get, url)
    }

    /// A POST request whose parameters are sent with `encoding`.
    #[must_use]
    pub fn post(url: impl Into<UrlTemplate>, encoding: BodyEncoding) -> Self {
        Self::new(Method::Post, url).encoding(encoding)
    }

    /// Replace the parameters.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Add one parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Add a header, replacing any header with the same name in any case.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    /// Add several headers.
    #[must_use]
    pub fn headers(self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        headers
            .into_iter()
            .fold(self, |spec, (name, value)| spec.header(name, value))
    }

    /// Set the body encoding.
    #[must_use]
    pub fn encoding(mut self, encoding: BodyEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Attach an extra multipart part, e.g. a file upload.
    #[must_use]
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// URL template.
    #[must_use]
    pub fn url(&self) -> &UrlTemplate {
        &self.url
    }

    /// Parameters.
    #[must_use]
    pub fn parameters(&self) -> &Params {
        &self.params
    }

    /// Body encoding.
    #[must_use]
    pub const fn body_encoding(&self) -> BodyEncoding {
        self.encoding
    }

    /// Build the transport-ready request.
    ///
    /// Placeholders in the URL are always filled from the parameters. For
    /// POST the parameters also make up the body.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a GET with a body encoding, a POST
    /// without one, multipart parts on a non-multipart request, or an URL
    /// template that cannot be expanded.
    pub fn build(&self) -> Result<Request<Bytes>> {
        self.check_shape()?;

        let url = self.url.expand(&self.params)?;
        let builder = Request::builder(self.method, url).headers(self.headers.clone());

        let request = match self.encoding {
            BodyEncoding::None => {
                self.log_unused_params()?;
                builder.build()
            }
            BodyEncoding::FormUrlEncoded => builder.form(&self.params.to_form_pairs())?.build(),
            BodyEncoding::Multipart => {
                let form = self
                    .parts
                    .iter()
                    .cloned()
                    .fold(Form::from_params(&self.params), Form::part);
                builder.multipart(form).build()
            }
            BodyEncoding::Json => builder.json(&self.params.to_json_object())?.build(),
        };
        Ok(request)
    }

    fn check_shape(&self) -> Result<()> {
        if !self.parts.is_empty() && self.encoding != BodyEncoding::Multipart {
            return Err(Error::configuration(
                "multipart parts require the multipart encoding",
            ));
        }
        match (self.method, self.encoding) {
            (Method::Get, BodyEncoding::None) => Ok(()),
            (Method::Get, encoding) => Err(Error::configuration(format!(
                "GET requests carry no body, got encoding {encoding:?}"
            ))),
            (Method::Post, BodyEncoding::None) => {
                Err(Error::configuration("POST requests need a body encoding"))
            }
            (Method::Post, _) => Ok(()),
        }
    }

    fn log_unused_params(&self) -> Result<()> {
        let placeholders = self.url.placeholders()?;
        for (name, _) in self.params.iter() {
            if !placeholders.contains(&name.as_str()) {
                debug!(param = %name, url = %self.url, "parameter has no URL placeholder, ignored");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn get_interpolates_params() {
        let request = RequestSpec::get("http://127.0.0.1:8080/user?args={args}&n={n}")
            .param("args", "custom value")
            .param("n", 3)
            .header("Accept", "application/json")
            .build()
            .expect("build");

        check!(request.method() == Method::Get);
        check!(request.url().as_str() == "http://127.0.0.1:8080/user?args=custom%20value&n=3");
        check!(request.header("accept") == Some("application/json"));
        check!(request.body().is_none());
    }

    #[test]
    fn form_body_has_one_pair_per_param() {
        let params: Params = (0..7).map(|i| (format!("k{i}"), i)).collect();
        let request = RequestSpec::post("http://host/form", BodyEncoding::FormUrlEncoded)
            .params(params)
            .build()
            .expect("build");

        let_assert!(Some(body) = request.body());
        let text = String::from_utf8(body.to_vec()).expect("utf8");
        check!(text.split('&').count() == 7);
        for i in 0..7 {
            check!(text.split('&').any(|pair| pair == format!("k{i}={i}")));
        }
        check!(request.header("Content-Type") == Some("application/x-www-form-urlencoded"));
    }

    #[test]
    fn json_body_is_flat_object() {
        let request = RequestSpec::post("http://host/json", BodyEncoding::Json)
            .param("id", 1)
            .param("tags", json!(["a", "b"]))
            .header("content-type", "text/plain")
            .build()
            .expect("build");

        check!(request.header("Content-Type") == Some("application/json"));
        check!(request.headers().len() == 1);
        let_assert!(Some(body) = request.body());
        let value: Value = serde_json::from_slice(body).expect("json");
        check!(value == json!({"id": 1, "tags": ["a", "b"]}));
    }

    #[test]
    fn later_header_wins_regardless_of_case() {
        let request = RequestSpec::get("http://host/items")
            .header("X-Trace", "1")
            .headers([("x-trace".to_string(), "2".to_string())])
            .build()
            .expect("build");

        check!(request.header("X-Trace") == Some("2"));
        check!(request.headers().len() == 1);
    }

    #[test]
    fn multipart_body_includes_params_and_parts() {
        let request = RequestSpec::post("http://host/upload", BodyEncoding::Multipart)
            .param("title", "report")
            .part(Part::file("file", "report.csv", "a,b\n1,2"))
            .build()
            .expect("build");

        let_assert!(Some(content_type) = request.header("Content-Type"));
        check!(content_type.starts_with("multipart/form-data; boundary="));
        let body = String::from_utf8_lossy(request.body().expect("body")).into_owned();
        check!(body.contains("name=\"title\"\r\n\r\nreport\r\n"));
        check!(body.contains("name=\"file\"; filename=\"report.csv\""));
        check!(body.contains("Content-Type: text/csv"));
    }

    #[test]
    fn post_url_placeholders_are_filled() {
        let request = RequestSpec::post("http://host/users/{id}", BodyEncoding::Json)
            .param("id", 9)
            .build()
            .expect("build");
        check!(request.url().as_str() == "http://host/users/9");
    }

    #[test]
    fn invalid_combinations_are_configuration_errors() {
        let cases = [
            RequestSpec::get("http://host/").encoding(BodyEncoding::Json),
            RequestSpec::new(Method::Post, "http://host/"),
            RequestSpec::post("http://host/", BodyEncoding::Json).part(Part::text("a", "b")),
            RequestSpec::get("http://host/").part(Part::text("a", "b")),
            RequestSpec::get("http://host/{missing}"),
        ];
        for spec in cases {
            let_assert!(Err(err) = spec.build());
            check!(err.is_configuration(), "{spec:?}");
        }
    }
}
