use std::borrow::Cow;

use thiserror::Error;

/// Error produced when extracting the payload of an absent [`Maybe`](crate::Maybe).
///
/// [`expect`](crate::Maybe::expect) and [`unwrap`](crate::Maybe::unwrap) panic with this error as the payload, while
/// [`try_expect`](crate::Maybe::try_expect) and [`try_unwrap`](crate::Maybe::try_unwrap) return it.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Error)]
#[error("{message}")]
pub struct UnwrapError {
  message: Cow<'static, str>,
}

impl UnwrapError {
  /// Message used by [`unwrap`](crate::Maybe::unwrap) and [`try_unwrap`](crate::Maybe::try_unwrap).
  pub const DEFAULT_MESSAGE: &'static str = "called unwrap on an absent value";

  #[inline]
  pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
    Self { message: message.into() }
  }

  #[inline]
  pub fn message(&self) -> &str { &self.message }

  #[inline]
  pub fn into_message(self) -> Cow<'static, str> { self.message }
}

impl Default for UnwrapError {
  #[inline]
  fn default() -> Self { Self::new(Self::DEFAULT_MESSAGE) }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn displays_message_verbatim() {
    let error = UnwrapError::new("fruits are healthy");
    assert_eq!(error.to_string(), "fruits are healthy");
    assert_eq!(error.message(), "fruits are healthy");
  }

  #[test]
  fn default_uses_unwrap_message() {
    assert_eq!(UnwrapError::default().message(), "called unwrap on an absent value");
  }

  #[test]
  fn owned_messages_are_kept() {
    let name = "HOME";
    let error = UnwrapError::new(format!("{name} should be set"));
    assert_eq!(error.into_message(), "HOME should be set");
  }
}
