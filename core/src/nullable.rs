use std::ptr::NonNull;

use crate::maybe::Maybe;

/// A host value that is either a payload or a null sentinel.
///
/// Implemented for `Option<T>` (sentinel `None`) and raw pointers (sentinel: the null pointer). Only the sentinel
/// maps to absent; every other value, however "empty" it looks, maps to present.
pub trait Nullable {
  type Payload;

  fn into_maybe(self) -> Maybe<Self::Payload>;
}

impl<T> Nullable for Option<T> {
  type Payload = T;

  #[inline]
  fn into_maybe(self) -> Maybe<T> { Maybe::from(self) }
}

impl<T: ?Sized> Nullable for *const T {
  type Payload = NonNull<T>;

  #[inline]
  fn into_maybe(self) -> Maybe<NonNull<T>> { Maybe::from(NonNull::new(self.cast_mut())) }
}

impl<T: ?Sized> Nullable for *mut T {
  type Payload = NonNull<T>;

  #[inline]
  fn into_maybe(self) -> Maybe<NonNull<T>> { Maybe::from(NonNull::new(self)) }
}
