use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};

use crate::error::UnwrapError;
use crate::nullable::Nullable;

/// An optional value: either present, holding exactly one payload, or absent.
///
/// The variant is fixed at construction and never changes. Callers branch on it through the combinators below or by
/// iterating, never by inspecting a tag directly.
///
/// ```
/// use maybe_core::{absent, present, Maybe};
///
/// let port = Maybe::from_nullable("8080".parse::<u16>().ok())
///   .filter(|port| *port != 0)
///   .unwrap_or(80);
/// assert_eq!(port, 8080);
///
/// assert_eq!(present(2).and(absent::<&str>()), Maybe::ABSENT);
/// ```
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Maybe<T>(Inner<T>);

#[derive(Clone, Copy, Eq, PartialEq)]
enum Inner<T> {
  Present(T),
  Absent,
}

/// Wraps `value` into a present [`Maybe`].
#[inline]
pub fn present<T>(value: T) -> Maybe<T> { Maybe::present(value) }

/// Returns the absent [`Maybe`].
#[inline]
pub const fn absent<T>() -> Maybe<T> { Maybe::ABSENT }


// Construction

impl<T> Maybe<T> {
  /// The canonical absent value.
  pub const ABSENT: Self = Self(Inner::Absent);

  /// Wraps `value`, whatever it is. Falsy-looking values such as `0`, `""`, or `false` are payloads like any other.
  #[inline]
  pub const fn present(value: T) -> Self { Self(Inner::Present(value)) }

  #[inline]
  pub const fn absent() -> Self { Self::ABSENT }

  /// Bridges a [nullable](Nullable) value: its null sentinel becomes absent, anything else becomes present.
  ///
  /// ```
  /// use maybe_core::Maybe;
  ///
  /// let list = [1, 2, 3];
  /// assert_eq!(Maybe::from_nullable(list.get(1)), Maybe::present(&2));
  /// assert!(Maybe::from_nullable(list.get(5)).is_absent());
  /// assert!(Maybe::from_nullable(Some(0)).is_present());
  /// ```
  #[inline]
  pub fn from_nullable(value: impl Nullable<Payload=T>) -> Self {
    value.into_maybe()
  }

  /// Converts back into a nullable `Option`.
  #[inline]
  pub fn into_option(self) -> Option<T> {
    match self.0 {
      Inner::Present(value) => Some(value),
      Inner::Absent => None,
    }
  }
}

impl<T> From<Option<T>> for Maybe<T> {
  #[inline]
  fn from(value: Option<T>) -> Self {
    match value {
      Some(value) => Self::present(value),
      None => Self::ABSENT,
    }
  }
}

impl<T> From<Maybe<T>> for Option<T> {
  #[inline]
  fn from(maybe: Maybe<T>) -> Self { maybe.into_option() }
}

impl<T> Default for Maybe<T> {
  #[inline]
  fn default() -> Self { Self::ABSENT }
}

impl<T: Debug> Debug for Maybe<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.0 {
      Inner::Present(value) => f.debug_tuple("Present").field(value).finish(),
      Inner::Absent => f.write_str("Absent"),
    }
  }
}


// Queries

impl<T> Maybe<T> {
  #[inline]
  pub const fn is_present(&self) -> bool { matches!(self.0, Inner::Present(_)) }

  #[inline]
  pub const fn is_absent(&self) -> bool { !self.is_present() }

  /// Returns `true` if present and `predicate` holds for the payload. `predicate` is not called when absent.
  ///
  /// ```
  /// use maybe_core::{absent, present};
  ///
  /// assert!(present(2).is_present_and(|x| *x > 1));
  /// assert!(!present(0).is_present_and(|x| *x > 1));
  /// assert!(!absent::<i32>().is_present_and(|x| *x > 1));
  /// ```
  #[inline]
  pub fn is_present_and(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
    match &self.0 {
      Inner::Present(value) => predicate(value),
      Inner::Absent => false,
    }
  }

  /// Returns `true` if absent, or present and `predicate` holds for the payload.
  #[inline]
  pub fn is_absent_or(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
    match &self.0 {
      Inner::Present(value) => predicate(value),
      Inner::Absent => true,
    }
  }
}


// Extraction

impl<T> Maybe<T> {
  /// Returns the payload.
  ///
  /// # Panics
  ///
  /// Panics if absent. The panic payload is an [`UnwrapError`] carrying `message` verbatim.
  ///
  /// ```should_panic
  /// use maybe_core::absent;
  ///
  /// absent::<&str>().expect("fruits are healthy");
  /// ```
  #[inline]
  #[track_caller]
  pub fn expect(self, message: impl Into<Cow<'static, str>>) -> T {
    match self.0 {
      Inner::Present(value) => value,
      Inner::Absent => fail(UnwrapError::new(message)),
    }
  }

  /// Returns the payload.
  ///
  /// # Panics
  ///
  /// Panics if absent. The panic payload is an [`UnwrapError`] carrying [`UnwrapError::DEFAULT_MESSAGE`].
  #[inline]
  #[track_caller]
  pub fn unwrap(self) -> T {
    match self.0 {
      Inner::Present(value) => value,
      Inner::Absent => fail(UnwrapError::default()),
    }
  }

  /// Returns the payload, or an [`UnwrapError`] carrying `message` if absent.
  #[inline]
  pub fn try_expect(self, message: impl Into<Cow<'static, str>>) -> Result<T, UnwrapError> {
    match self.0 {
      Inner::Present(value) => Ok(value),
      Inner::Absent => Err(reject(UnwrapError::new(message))),
    }
  }

  /// Returns the payload, or an [`UnwrapError`] carrying [`UnwrapError::DEFAULT_MESSAGE`] if absent.
  #[inline]
  pub fn try_unwrap(self) -> Result<T, UnwrapError> {
    match self.0 {
      Inner::Present(value) => Ok(value),
      Inner::Absent => Err(reject(UnwrapError::default())),
    }
  }

  /// Returns the payload, or `default` if absent. `default` is evaluated by the caller before the call; use
  /// [`unwrap_or_else`](Self::unwrap_or_else) to defer it.
  #[inline]
  pub fn unwrap_or(self, default: T) -> T {
    match self.0 {
      Inner::Present(value) => value,
      Inner::Absent => default,
    }
  }

  /// Returns the payload, or calls `supplier` if absent. `supplier` is never called when present.
  ///
  /// ```
  /// use maybe_core::{absent, present};
  ///
  /// let k = 10;
  /// assert_eq!(present(4).unwrap_or_else(|| 2 * k), 4);
  /// assert_eq!(absent().unwrap_or_else(|| 2 * k), 20);
  /// ```
  #[inline]
  pub fn unwrap_or_else(self, supplier: impl FnOnce() -> T) -> T {
    match self.0 {
      Inner::Present(value) => value,
      Inner::Absent => supplier(),
    }
  }

  #[inline]
  pub fn unwrap_or_default(self) -> T where T: Default {
    self.unwrap_or_else(T::default)
  }
}

#[cold]
#[track_caller]
fn fail(error: UnwrapError) -> ! {
  #[cfg(feature = "tracing")]
  tracing::error!(%error, "extracted payload of an absent value");
  std::panic::panic_any(error)
}

#[cold]
fn reject(error: UnwrapError) -> UnwrapError {
  #[cfg(feature = "tracing")]
  tracing::debug!(%error, "extracting payload of an absent value failed");
  error
}


// Transformations

impl<T> Maybe<T> {
  #[inline]
  pub const fn as_ref(&self) -> Maybe<&T> {
    match &self.0 {
      Inner::Present(value) => Maybe::present(value),
      Inner::Absent => Maybe::ABSENT,
    }
  }

  /// Maps the payload with `f`, which is called once if present and never if absent.
  ///
  /// ```
  /// use maybe_core::{absent, present};
  ///
  /// assert_eq!(present("Hello, World!").map(str::len), present(13));
  /// assert_eq!(absent::<&str>().map(str::len), absent());
  /// ```
  #[inline]
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
    match self.0 {
      Inner::Present(value) => Maybe::present(f(value)),
      Inner::Absent => Maybe::ABSENT,
    }
  }

  /// Maps the payload with `f`, or returns `default` (evaluated by the caller) if absent.
  #[inline]
  pub fn map_or<U>(self, default: U, f: impl FnOnce(T) -> U) -> U {
    match self.0 {
      Inner::Present(value) => f(value),
      Inner::Absent => default,
    }
  }

  /// Maps the payload with `f`, or calls `default` if absent.
  ///
  /// ```
  /// use maybe_core::{absent, present};
  ///
  /// let k = 21;
  /// assert_eq!(present("foo").map_or_else(|| 2 * k, str::len), 3);
  /// assert_eq!(absent::<&str>().map_or_else(|| 2 * k, str::len), 42);
  /// ```
  #[inline]
  pub fn map_or_else<U>(self, default: impl FnOnce() -> U, f: impl FnOnce(T) -> U) -> U {
    match self.0 {
      Inner::Present(value) => f(value),
      Inner::Absent => default(),
    }
  }

  /// Calls `f` with a reference to the payload if present, then returns `self` unchanged.
  ///
  /// ```
  /// use maybe_core::Maybe;
  ///
  /// let list = [1, 2, 3];
  /// let mut seen = Vec::new();
  /// let x = Maybe::from_nullable(list.get(1))
  ///   .inspect(|x| seen.push(**x))
  ///   .expect("list should be long enough");
  /// assert_eq!((*x, seen), (2, vec![2]));
  /// ```
  #[inline]
  pub fn inspect(self, f: impl FnOnce(&T)) -> Self {
    if let Inner::Present(value) = &self.0 {
      f(value);
    }
    self
  }

  /// Keeps the payload if `predicate` holds for it, otherwise returns absent.
  ///
  /// ```
  /// use maybe_core::{absent, present};
  ///
  /// fn is_even(n: &i32) -> bool { n % 2 == 0 }
  ///
  /// assert_eq!(absent().filter(is_even), absent());
  /// assert_eq!(present(3).filter(is_even), absent());
  /// assert_eq!(present(4).filter(is_even), present(4));
  /// ```
  #[inline]
  pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
    match self.0 {
      Inner::Present(value) => if predicate(&value) { Self::present(value) } else { Self::ABSENT },
      Inner::Absent => Self::ABSENT,
    }
  }

  /// Pairs both payloads, or returns absent if either is absent.
  #[inline]
  pub fn zip<U>(self, other: Maybe<U>) -> Maybe<(T, U)> {
    match (self.0, other.0) {
      (Inner::Present(a), Inner::Present(b)) => Maybe::present((a, b)),
      _ => Maybe::ABSENT,
    }
  }
}

impl<T> Maybe<Maybe<T>> {
  #[inline]
  pub fn flatten(self) -> Maybe<T> {
    match self.0 {
      Inner::Present(inner) => inner,
      Inner::Absent => Maybe::ABSENT,
    }
  }
}

impl<T: Clone> Maybe<&T> {
  #[inline]
  pub fn cloned(self) -> Maybe<T> { self.map(T::clone) }
}

impl<T: Copy> Maybe<&T> {
  #[inline]
  pub fn copied(self) -> Maybe<T> { self.map(|value| *value) }
}


// Combinators

impl<T> Maybe<T> {
  /// Returns `other` if `self` is present, otherwise absent.
  #[inline]
  pub fn and<U>(self, other: Maybe<U>) -> Maybe<U> {
    match self.0 {
      Inner::Present(_) => other,
      Inner::Absent => Maybe::ABSENT,
    }
  }

  /// Returns `f(payload)` if present, otherwise absent without calling `f`.
  ///
  /// ```
  /// use maybe_core::{absent, present, Maybe};
  ///
  /// let arr_2d = [["A0", "A1"], ["B0", "B1"]];
  ///
  /// let item_0_1 = Maybe::from_nullable(arr_2d.get(0)).and_then(|row| Maybe::from_nullable(row.get(1)));
  /// assert_eq!(item_0_1, present(&"A1"));
  ///
  /// let item_2_0 = Maybe::from_nullable(arr_2d.get(2)).and_then(|row| Maybe::from_nullable(row.get(0)));
  /// assert_eq!(item_2_0, absent());
  /// ```
  #[inline]
  pub fn and_then<U>(self, f: impl FnOnce(T) -> Maybe<U>) -> Maybe<U> {
    match self.0 {
      Inner::Present(value) => f(value),
      Inner::Absent => Maybe::ABSENT,
    }
  }

  /// Returns `self` if present, otherwise `other`.
  #[inline]
  pub fn or(self, other: Self) -> Self {
    match self.0 {
      Inner::Present(value) => Self::present(value),
      Inner::Absent => other,
    }
  }

  /// Returns `self` if present, otherwise calls `supplier`. `supplier` is never called when present.
  ///
  /// ```
  /// use maybe_core::{absent, present};
  ///
  /// let nobody = || absent();
  /// let vikings = || present("vikings");
  ///
  /// assert_eq!(present("barbarians").or_else(vikings), present("barbarians"));
  /// assert_eq!(absent().or_else(vikings), present("vikings"));
  /// assert_eq!(absent::<&str>().or_else(nobody), absent());
  /// ```
  #[inline]
  pub fn or_else(self, supplier: impl FnOnce() -> Self) -> Self {
    match self.0 {
      Inner::Present(value) => Self::present(value),
      Inner::Absent => supplier(),
    }
  }

  /// Returns whichever of `self` and `other` is present if exactly one is, otherwise absent.
  #[inline]
  pub fn xor(self, other: Self) -> Self {
    match (self.0, other.0) {
      (Inner::Present(value), Inner::Absent) | (Inner::Absent, Inner::Present(value)) => Self::present(value),
      _ => Self::ABSENT,
    }
  }
}
