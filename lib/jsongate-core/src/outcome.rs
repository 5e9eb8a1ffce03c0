//! Result of a dispatched call.

use crate::Mismatches;

/// Decoded value, one item or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<T> {
    /// One decoded value.
    Single(T),
    /// Decoded array elements, in response order.
    List(Vec<T>),
}

impl<T> Payload<T> {
    /// Number of decoded items.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::List(items) => items.len(),
        }
    }

    /// Returns `true` for an empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The single value, `None` for a list.
    #[must_use]
    pub fn into_single(self) -> Option<T> {
        match self {
            Self::Single(value) => Some(value),
            Self::List(_) => None,
        }
    }

    /// All items; a single value becomes a one-element list.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Single(value) => vec![value],
            Self::List(items) => items,
        }
    }
}

/// Outcome of a call that reached the server and got a parseable answer.
///
/// Transport, configuration and decoding problems are reported as
/// [`Error`](crate::Error) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// Criteria held and the payload was decoded.
    Success(Payload<T>),
    /// Some criteria did not hold.
    Failure(Mismatches),
}

impl<T> Outcome<T> {
    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Borrow the payload.
    #[must_use]
    pub const fn payload(&self) -> Option<&Payload<T>> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure(_) => None,
        }
    }

    /// Take the payload.
    #[must_use]
    pub fn into_payload(self) -> Option<Payload<T>> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure(_) => None,
        }
    }

    /// Borrow the mismatches.
    #[must_use]
    pub const fn mismatches(&self) -> Option<&Mismatches> {
        match self {
            Self::Success(_) => None,
            Self::Failure(mismatches) => Some(mismatches),
        }
    }

    /// The single value of a successful call.
    #[must_use]
    pub fn into_single(self) -> Option<T> {
        self.into_payload().and_then(Payload::into_single)
    }

    /// The items of a successful call.
    #[must_use]
    pub fn into_vec(self) -> Option<Vec<T>> {
        self.into_payload().map(Payload::into_vec)
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;
    use crate::SuccessCriteria;

    #[test]
    fn payload_accessors() {
        check!(Payload::Single(1).len() == 1);
        check!(Payload::Single(1).into_vec() == vec![1]);
        check!(Payload::<i32>::List(vec![]).is_empty());
        check!(Payload::List(vec![1, 2]).into_single().is_none());
    }

    #[test]
    fn outcome_accessors() {
        let success = Outcome::Success(Payload::List(vec!["a", "b"]));
        check!(success.is_success());
        check!(success.mismatches().is_none());
        check!(success.into_vec() == Some(vec!["a", "b"]));

        let_assert!(
            Err(mismatches) = SuccessCriteria::new()
                .expect("code", "200")
                .validate(&json!({"code": "500"}))
        );
        let failure: Outcome<String> = Outcome::Failure(mismatches);
        check!(!failure.is_success());
        check!(failure.payload().is_none());
        check!(failure.mismatches().map(Mismatches::len) == Some(1));
    }
}
