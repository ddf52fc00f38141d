use core::iter::FusedIterator;
use core::{fmt, mem, slice};

/// A front-to-back iterator over mutable references to the elements of a
/// [`Deque`](crate::Deque).
///
/// This `struct` is created by [`Deque::iter_mut`](crate::Deque::iter_mut).
pub struct IterMut<'a, T> {
  front: slice::IterMut<'a, T>,
  back: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
  pub(super) fn new(front: slice::IterMut<'a, T>, back: slice::IterMut<'a, T>) -> Self {
    Self { front, back }
  }

  /// Consumes the iterator, returning the elements not yet yielded as a pair
  /// of mutable slices, in order.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::new();
  /// deque.push_back(0);
  /// deque.push_back(1);
  /// deque.push_back(2);
  /// deque.push_front(10);
  /// deque.push_front(9);
  /// deque.push_front(8);
  ///
  /// let mut iter = deque.iter_mut();
  /// iter.next();
  /// iter.next_back();
  ///
  /// let slices = iter.into_slices();
  /// slices.0[0] = 42;
  /// slices.1[0] = 24;
  /// assert_eq!(deque.as_slices(), (&[8, 42, 10][..], &[24, 1, 2][..]));
  /// ```
  pub fn into_slices(self) -> (&'a mut [T], &'a mut [T]) {
    (self.front.into_slice(), self.back.into_slice())
  }

  /// Views the elements not yet yielded as a pair of slices, borrowed from
  /// the iterator.
  pub fn as_slices(&self) -> (&[T], &[T]) {
    (self.front.as_slice(), self.back.as_slice())
  }
}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("IterMut")
      .field(&self.front.as_slice())
      .field(&self.back.as_slice())
      .finish()
  }
}

impl<T> Default for IterMut<'_, T> {
  /// Creates an iterator that yields nothing.
  fn default() -> Self {
    Self::new(Default::default(), Default::default())
  }
}

impl<'a, T> Iterator for IterMut<'a, T> {
  type Item = &'a mut T;

  #[inline]
  fn next(&mut self) -> Option<&'a mut T> {
    if let Some(val) = self.front.next() {
      return Some(val);
    }
    mem::swap(&mut self.front, &mut self.back);
    self.front.next()
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.len();
    (len, Some(len))
  }

  fn fold<Acc, F>(self, accum: Acc, mut f: F) -> Acc
  where
    F: FnMut(Acc, Self::Item) -> Acc,
  {
    let accum = self.front.fold(accum, &mut f);
    self.back.fold(accum, &mut f)
  }

  #[inline]
  fn last(mut self) -> Option<&'a mut T> {
    self.next_back()
  }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
  #[inline]
  fn next_back(&mut self) -> Option<&'a mut T> {
    if let Some(val) = self.back.next_back() {
      return Some(val);
    }
    mem::swap(&mut self.front, &mut self.back);
    self.back.next_back()
  }

  fn rfold<Acc, F>(self, accum: Acc, mut f: F) -> Acc
  where
    F: FnMut(Acc, Self::Item) -> Acc,
  {
    let accum = self.back.rfold(accum, &mut f);
    self.front.rfold(accum, &mut f)
  }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
  fn len(&self) -> usize {
    self.front.len() + self.back.len()
  }
}

impl<T> FusedIterator for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
  use crate::Deque;

  #[test]
  fn reverse_walk_mutates_from_the_back() {
    let mut deque = Deque::new();
    for value in 0..5 {
      deque.push_front(value);
    }
    for (step, value) in deque.iter_mut().rev().enumerate() {
      *value += step as i32 * 100;
    }
    assert_eq!(deque, [404, 303, 202, 101, 0]);
  }

  #[test]
  fn as_slices_tracks_progress() {
    let mut deque: Deque<u8> = [1, 2, 3].into();
    let mut iter = deque.iter_mut();
    assert_eq!(iter.as_slices(), (&[1, 2, 3][..], &[][..]));
    iter.next();
    assert_eq!(iter.len(), 2);
    assert_eq!(iter.as_slices(), (&[2, 3][..], &[][..]));
  }
}
