use core::iter::FusedIterator;
use core::{fmt, mem, slice};

/// A front-to-back iterator over the elements of a [`Deque`](crate::Deque).
///
/// This `struct` is created by [`Deque::iter`](crate::Deque::iter). Call
/// [`rev`](Iterator::rev) on it for back-to-front iteration.
#[derive(Clone)]
pub struct Iter<'a, T> {
  front: slice::Iter<'a, T>,
  back: slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
  pub(super) const fn new(front: slice::Iter<'a, T>, back: slice::Iter<'a, T>) -> Self {
    Self { front, back }
  }

  /// Views the elements not yet yielded as a pair of slices, in order.
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
  /// let mut iter = deque.iter();
  /// iter.next();
  /// iter.next_back();
  ///
  /// assert_eq!(iter.as_slices(), (&[9, 10][..], &[0, 1][..]));
  /// ```
  pub fn as_slices(&self) -> (&'a [T], &'a [T]) {
    (self.front.as_slice(), self.back.as_slice())
  }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Iter")
      .field(&self.front.as_slice())
      .field(&self.back.as_slice())
      .finish()
  }
}

impl<T> Default for Iter<'_, T> {
  /// Creates an iterator that yields nothing.
  fn default() -> Self {
    Self::new(Default::default(), Default::default())
  }
}

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = &'a T;

  #[inline]
  fn next(&mut self) -> Option<&'a T> {
    if let Some(val) = self.front.next() {
      return Some(val);
    }
    // The front run is spent. Swapping keeps the hot path on `front` for the
    // rest of a forward walk.
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
  fn last(mut self) -> Option<&'a T> {
    self.next_back()
  }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
  #[inline]
  fn next_back(&mut self) -> Option<&'a T> {
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

impl<T> ExactSizeIterator for Iter<'_, T> {
  fn len(&self) -> usize {
    self.front.len() + self.back.len()
  }
}

impl<T> FusedIterator for Iter<'_, T> {}
