use std::iter::FusedIterator;

use crate::maybe::Maybe;

/// Iterator over a reference to the payload of a [`Maybe`]. Yields one element if present, none if absent.
#[derive(Debug)]
pub struct Iter<'a, T> {
  item: Option<&'a T>,
}
impl<T> Clone for Iter<'_, T> {
  #[inline]
  fn clone(&self) -> Self { Self { item: self.item } }
}

/// Iterator over the payload of a [`Maybe`]. Yields one element if present, none if absent.
#[derive(Clone, Debug)]
pub struct IntoIter<T> {
  item: Option<T>,
}

impl<T> Maybe<T> {
  /// Iterates over the payload by reference. Each call starts a new sequence.
  ///
  /// ```
  /// use maybe_core::{absent, present};
  ///
  /// let value = present("v");
  /// assert_eq!(value.iter().collect::<Vec<_>>(), vec![&"v"]);
  /// assert_eq!(value.iter().count(), 1);
  /// assert_eq!(absent::<&str>().iter().count(), 0);
  /// ```
  #[inline]
  pub fn iter(&self) -> Iter<'_, T> {
    Iter { item: self.as_ref().into_option() }
  }
}

impl<T> IntoIterator for Maybe<T> {
  type Item = T;
  type IntoIter = IntoIter<T>;

  #[inline]
  fn into_iter(self) -> IntoIter<T> {
    IntoIter { item: self.into_option() }
  }
}

impl<'a, T> IntoIterator for &'a Maybe<T> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T>;

  #[inline]
  fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

macro_rules! impl_single_item_iterator {
  (<$($generic:tt),*> $iter:ty, $item:ty) => {
    impl<$($generic),*> Iterator for $iter {
      type Item = $item;

      #[inline]
      fn next(&mut self) -> Option<$item> { self.item.take() }

      #[inline]
      fn size_hint(&self) -> (usize, Option<usize>) {
        let len = usize::from(self.item.is_some());
        (len, Some(len))
      }
    }

    impl<$($generic),*> DoubleEndedIterator for $iter {
      #[inline]
      fn next_back(&mut self) -> Option<$item> { self.item.take() }
    }

    impl<$($generic),*> ExactSizeIterator for $iter {}

    impl<$($generic),*> FusedIterator for $iter {}
  };
}

impl_single_item_iterator!(<'a, T> Iter<'a, T>, &'a T);
impl_single_item_iterator!(<T> IntoIter<T>, T);

/// Keeps the first element of the iterator, or absent if it is empty.
impl<T> FromIterator<T> for Maybe<T> {
  #[inline]
  fn from_iter<I: IntoIterator<Item=T>>(iter: I) -> Self {
    Maybe::from(iter.into_iter().next())
  }
}


#[cfg(test)]
mod tests {
  use crate::maybe::{absent, present};

  use super::*;

  #[test]
  fn present_yields_once_then_terminates() {
    let mut iter = present("v").into_iter();
    assert_eq!(iter.len(), 1);
    assert_eq!(iter.next(), Some("v"));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
  }

  #[test]
  fn absent_yields_nothing() {
    let mut called = false;
    for _ in absent::<&str>() {
      called = true;
    }
    assert!(!called);
  }

  #[test]
  fn for_loop_over_reference_is_restartable() {
    let value = present(3);
    let mut sum = 0;
    for x in &value {
      sum += x;
    }
    for x in &value {
      sum += x;
    }
    assert_eq!(sum, 6);
  }

  #[test]
  fn reference_iterator_clones_without_clone_payload() {
    struct Opaque(u8);

    let value = present(Opaque(9));
    let iter = value.iter();
    let copy = iter.clone();
    assert_eq!(iter.map(|o| o.0).sum::<u8>(), 9);
    assert_eq!(copy.map(|o| o.0).sum::<u8>(), 9);
  }

  #[test]
  fn next_back_matches_next() {
    assert_eq!(present(1).into_iter().rev().collect::<Vec<_>>(), vec![1]);
    assert_eq!(absent::<i32>().iter().next_back(), None);
  }

  #[test]
  fn collect_keeps_first_element() {
    assert_eq!([4, 5, 6].into_iter().collect::<Maybe<_>>(), present(4));
    assert_eq!(std::iter::empty::<i32>().collect::<Maybe<_>>(), absent());
  }

  #[test]
  fn flattens_in_iterator_chains() {
    let found: Vec<_> = [present(1), absent(), present(3)].into_iter().flatten().collect();
    assert_eq!(found, vec![1, 3]);
  }
}
