//! HTTP method types.

use std::str::FromStr;

use derive_more::Display;

/// HTTP request method.
///
/// Only the two verbs the dispatcher issues are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET method, parameters travel in the URL.
    #[display("GET")]
    Get,
    /// POST method, parameters travel in the body.
    #[display("POST")]
    Post,
}

impl FromStr for Method {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("get") {
            Ok(Self::Get)
        } else if s.eq_ignore_ascii_case("post") {
            Ok(Self::Post)
        } else {
            Err(crate::Error::configuration(format!(
                "unsupported HTTP method: {s}"
            )))
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }

    #[test]
    fn method_parse() {
        assert_eq!("get".parse::<Method>().expect("get"), Method::Get);
        assert_eq!("POST".parse::<Method>().expect("post"), Method::Post);
        assert!("PATCH".parse::<Method>().is_err());
    }

    #[test]
    fn method_http_conversions() {
        assert_eq!(http::Method::from(Method::Get), http::Method::GET);
        assert_eq!(http::Method::from(Method::Post), http::Method::POST);
    }
}
