//! URL templates with `{name}` placeholders.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

use crate::params::form_text;
use crate::{Error, Params, Result};

/// Characters escaped in substituted values.
///
/// Values may land in a path segment or a query string, so both the path
/// delimiters and the query delimiters are escaped.
const TEMPLATE_VALUE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A URL containing `{name}` placeholders, e.g.
/// `http://127.0.0.1:8080/user?args={args}`.
///
/// # Example
///
/// ```
/// use jsongate_core::{Params, UrlTemplate};
///
/// let template = UrlTemplate::new("https://api.example.com/users/{id}?q={q}");
/// let url = template
///     .expand(&Params::new().with("id", 7).with("q", "a b"))
///     .expect("expand");
/// assert_eq!(url.as_str(), "https://api.example.com/users/7?q=a%20b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlTemplate(String);

/// One piece of a parsed template.
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

impl UrlTemplate {
    /// Create a new template.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Get the template string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Placeholder names in order of appearance.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a placeholder is unterminated or empty.
    pub fn placeholders(&self) -> Result<Vec<&str>> {
        Ok(self
            .segments()?
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) => Some(name),
                Segment::Literal(_) => None,
            })
            .collect())
    }

    /// Substitute every placeholder with its percent-encoded parameter value
    /// and parse the result.
    ///
    /// Parameters without a placeholder are ignored.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a placeholder has no parameter, and
    /// [`Error::InvalidUrl`] if the expanded text is not a valid URL.
    pub fn expand(&self, params: &Params) -> Result<Url> {
        let mut expanded = String::with_capacity(self.0.len());
        for segment in self.segments()? {
            match segment {
                Segment::Literal(text) => expanded.push_str(text),
                Segment::Placeholder(name) => {
                    let value = params.get(name).ok_or_else(|| {
                        Error::configuration(format!(
                            "no parameter for URL placeholder `{{{name}}}`"
                        ))
                    })?;
                    expanded.extend(utf8_percent_encode(
                        &form_text(value),
                        TEMPLATE_VALUE_ENCODE_SET,
                    ));
                }
            }
        }
        Ok(Url::parse(&expanded)?)
    }

    fn segments(&self) -> Result<Vec<Segment<'_>>> {
        let mut segments = Vec::new();
        let mut rest = self.0.as_str();
        while let Some(open) = rest.find('{') {
            let (literal, tail) = rest.split_at(open);
            if !literal.is_empty() {
                segments.push(Segment::Literal(literal));
            }
            let tail = tail.strip_prefix('{').unwrap_or(tail);
            let close = tail.find('}').ok_or_else(|| {
                Error::configuration(format!("unterminated placeholder in `{}`", self.0))
            })?;
            let (name, after) = tail.split_at(close);
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::configuration(format!(
                    "empty placeholder in `{}`",
                    self.0
                )));
            }
            segments.push(Segment::Placeholder(name));
            rest = after.strip_prefix('}').unwrap_or(after);
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }
        Ok(segments)
    }
}

impl std::fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UrlTemplate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UrlTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for UrlTemplate {
    fn from(template: String) -> Self {
        Self(template)
    }
}
