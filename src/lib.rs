#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

use core::{
  cmp::Ordering,
  fmt,
  hash::{Hash, Hasher},
  mem::MaybeUninit,
  ops::{Index, IndexMut, Range},
  ptr,
};
use macros::*;
use std::{boxed::Box, vec::Vec};

pub use cursor::{Backward, Cursor, CursorMut, Direction, Forward};
pub use error::Error;
pub use into_iter::IntoIter;
pub use iter::Iter;
pub use iter_mut::IterMut;

#[cfg(feature = "generic-array")]
#[cfg_attr(docsrs, doc(cfg(feature = "generic-array")))]
mod array;
mod cursor;
mod error;
mod into_iter;
#[cfg(feature = "std")]
mod io;
mod iter;
mod iter_mut;
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde;


#[cfg(all(test, feature = "std"))]
mod heap_tests;

mod macros;

/// The smallest capacity a [`Deque`] ever holds.
///
/// Fresh deques start here, [`Deque::clear`] returns here, and shrinking
/// never goes below it.
pub const BASE_CAPACITY: usize = 8;

/// A growable double-ended queue backed by a circular buffer.
///
/// `Deque` keeps its elements in a heap buffer whose length is always a power of
/// two and at least [`BASE_CAPACITY`]. The logical sequence starts at `head` and
/// ends one slot before `tail`, wrapping around the end of the buffer when
/// needed, so pushing and popping at either end is *O*(1) amortized.
///
/// # Capacity
///
/// The buffer doubles the moment a push fills its last free slot, and halves
/// when a pop leaves exactly a quarter of it occupied (never going below
/// [`BASE_CAPACITY`]). Both reallocations copy the elements to the start of the
/// new buffer in logical order. The geometric schedule keeps the amortized cost
/// of every push and pop constant.
///
/// ## Examples
///
/// Basic usage:
///
/// ```rust
/// use circular_deque::Deque;
///
/// let mut deque = Deque::new();
///
/// deque.push_back(1);
/// deque.push_back(2);
/// deque.push_front(0);
///
/// assert_eq!(deque.len(), 3);
/// assert_eq!(deque[0], 0);
/// assert_eq!(deque[1], 1);
/// assert_eq!(deque[2], 2);
///
/// assert_eq!(deque.pop_front(), Some(0));
/// assert_eq!(deque.pop_back(), Some(2));
/// assert_eq!(deque.len(), 1);
/// ```
///
/// Growing past the base capacity:
///
/// ```rust
/// use circular_deque::{Deque, BASE_CAPACITY};
///
/// let mut deque = Deque::new();
/// for i in 0..7 {
///     deque.push_back(i);
/// }
/// assert_eq!(deque.capacity(), BASE_CAPACITY);
///
/// // The eighth element fills the buffer, so it doubles.
/// deque.push_back(7);
/// assert_eq!(deque.capacity(), 16);
/// assert_eq!(deque, [0, 1, 2, 3, 4, 5, 6, 7]);
/// ```
///
/// Iterating over elements:
///
/// ```rust
/// use circular_deque::Deque;
///
/// let mut deque: Deque<i32> = [1, 2, 3].into();
///
/// let sum: i32 = deque.iter().sum();
/// assert_eq!(sum, 6);
///
/// for item in deque.iter_mut() {
///     *item *= 2;
/// }
/// assert_eq!(deque.iter().rev().copied().collect::<Vec<_>>(), vec![6, 4, 2]);
/// ```
pub struct Deque<T> {
  buf: Box<[MaybeUninit<T>]>,
  head: usize,
  tail: usize,
}

impl<T: Clone> Clone for Deque<T> {
  /// Deep-copies the deque at the source's capacity and layout.
  fn clone(&self) -> Self {
    let mut deq = Self {
      buf: alloc_buffer(self.capacity()),
      head: self.head,
      tail: self.head,
    };
    for value in self.iter() {
      // SAFETY: `deq` has the same capacity as `self`, so it never fills up here.
      unsafe { push_back_unchecked!(deq(value.clone())) };
    }
    debug_assert_eq!(deq.tail, self.tail);
    deq
  }
}

impl<T> Default for Deque<T> {
  #[cfg_attr(not(tarpaulin), inline(always))]
  fn default() -> Self {
    Self::new()
  }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<T: PartialEq> PartialEq for Deque<T> {
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().eq(other.iter())
  }
}

impl<T: Eq> Eq for Deque<T> {}

macro_rules! __impl_slice_eq1 {
  ([$($vars:tt)*] $rhs:ty) => {
    impl<T, U, $($vars)*> PartialEq<$rhs> for Deque<T>
    where
      T: PartialEq<U>,
    {
      fn eq(&self, other: &$rhs) -> bool {
        if self.len() != other.len() {
          return false;
        }
        let (sa, sb) = self.as_slices();
        let (oa, ob) = other[..].split_at(sa.len());
        sa == oa && sb == ob
      }
    }
  };
}

__impl_slice_eq1! { [] Vec<U> }
__impl_slice_eq1! { [] &[U] }
__impl_slice_eq1! { [] &mut [U] }
__impl_slice_eq1! { [const N: usize] [U; N] }
__impl_slice_eq1! { [const N: usize] &[U; N] }

impl<T: PartialOrd> PartialOrd for Deque<T> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    self.iter().partial_cmp(other.iter())
  }
}

impl<T: Ord> Ord for Deque<T> {
  #[inline]
  fn cmp(&self, other: &Self) -> Ordering {
    self.iter().cmp(other.iter())
  }
}

impl<T: Hash> Hash for Deque<T> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    // Hash element by element: the split reported by `as_slices` depends on
    // where `head` sits, which equal deques do not share.
    state.write_usize(self.len());
    self.iter().for_each(|elem| elem.hash(state));
  }
}

impl<T> Index<usize> for Deque<T> {
  type Output = T;

  #[inline]
  fn index(&self, index: usize) -> &T {
    self.get(index).expect("Out of bounds access")
  }
}

impl<T> IndexMut<usize> for Deque<T> {
  #[inline]
  fn index_mut(&mut self, index: usize) -> &mut T {
    self.get_mut(index).expect("Out of bounds access")
  }
}

impl<T> IntoIterator for Deque<T> {
  type Item = T;
  type IntoIter = IntoIter<T>;

  /// Consumes the deque into a front-to-back iterator yielding elements by
  /// value.
  fn into_iter(self) -> IntoIter<T> {
    IntoIter::new(self)
  }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T>;

  fn into_iter(self) -> Iter<'a, T> {
    self.iter()
  }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
  type Item = &'a mut T;
  type IntoIter = IterMut<'a, T>;

  fn into_iter(self) -> IterMut<'a, T> {
    self.iter_mut()
  }
}

impl<T> FromIterator<T> for Deque<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let iter = iter.into_iter();
    let mut deq = Self::with_capacity(iter.size_hint().0);
    deq.extend(iter);
    deq
  }
}

impl<T> Extend<T> for Deque<T> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    iter.into_iter().for_each(|value| self.push_back(value));
  }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Deque<T> {
  fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
    self.extend(iter.into_iter().copied());
  }
}

impl<T> From<Vec<T>> for Deque<T> {
  fn from(vec: Vec<T>) -> Self {
    vec.into_iter().collect()
  }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
  fn from(arr: [T; N]) -> Self {
    arr.into_iter().collect()
  }
}

impl<T> From<Deque<T>> for Vec<T> {
  fn from(mut deq: Deque<T>) -> Self {
    let (front, back) = deq.as_slices();
    let (front_len, len) = (front.len(), front.len() + back.len());
    let mut vec = Vec::with_capacity(len);
    // SAFETY: `vec` has room for `len` elements. The deque is emptied right
    // after the copy, so every element ends up owned by `vec` alone.
    unsafe {
      ptr::copy_nonoverlapping(front.as_ptr(), vec.as_mut_ptr(), front_len);
      ptr::copy_nonoverlapping(back.as_ptr(), vec.as_mut_ptr().add(front_len), len - front_len);
      vec.set_len(len);
    }
    deq.tail = deq.head;
    vec
  }
}

impl<T> Deque<T> {
  /// Creates an empty deque with [`BASE_CAPACITY`] slots.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::{Deque, BASE_CAPACITY};
  ///
  /// let deque: Deque<u32> = Deque::new();
  /// assert!(deque.is_empty());
  /// assert_eq!(deque.capacity(), BASE_CAPACITY);
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn new() -> Self {
    Self::with_capacity(BASE_CAPACITY)
  }

  /// Creates an empty deque whose capacity is the smallest power of two that
  /// is at least `capacity` and at least [`BASE_CAPACITY`].
  ///
  /// ## Panics
  ///
  /// Panics if the rounded capacity does not fit in a `usize`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// assert_eq!(Deque::<u8>::with_capacity(3).capacity(), 8);
  /// assert_eq!(Deque::<u8>::with_capacity(9).capacity(), 16);
  /// assert_eq!(Deque::<u8>::with_capacity(64).capacity(), 64);
  /// ```
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      buf: alloc_buffer(capacity_for(capacity)),
      head: 0,
      tail: 0,
    }
  }

  /// Returns the number of slots in the backing buffer.
  ///
  /// This is always a power of two and never less than [`BASE_CAPACITY`].
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn capacity(&self) -> usize {
    self.buf.len()
  }

  /// Returns the number of elements in the deque.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::new();
  /// assert_eq!(deque.len(), 0);
  /// deque.push_back(1);
  /// deque.push_front(0);
  /// assert_eq!(deque.len(), 2);
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn len(&self) -> usize {
    wrap_index(self.tail.wrapping_sub(self.head), self.capacity())
  }

  /// Returns `true` if the deque holds no elements.
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn is_empty(&self) -> bool {
    self.head == self.tail
  }

  /// Returns a front-to-back iterator.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut buf = Deque::new();
  /// buf.push_back(5);
  /// buf.push_back(3);
  /// buf.push_front(4);
  /// let collected: Vec<&i32> = buf.iter().collect();
  /// assert_eq!(collected, vec![&4, &5, &3]);
  /// ```
  pub fn iter(&self) -> Iter<'_, T> {
    let (a, b) = self.as_slices();
    Iter::new(a.iter(), b.iter())
  }

  /// Returns a front-to-back iterator that returns mutable references.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut buf: Deque<i32> = [5, 3, 4].into();
  /// for value in buf.iter_mut() {
  ///     *value -= 2;
  /// }
  /// assert_eq!(buf, [3, 1, 2]);
  /// ```
  pub fn iter_mut(&mut self) -> IterMut<'_, T> {
    let (a, b) = self.as_mut_slices();
    IterMut::new(a.iter_mut(), b.iter_mut())
  }

  /// Returns the contents as a pair of slices which, in order, hold the whole
  /// logical sequence.
  ///
  /// The second slice is empty unless the sequence wraps past the end of the
  /// buffer.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::new();
  /// deque.push_back(0);
  /// deque.push_back(1);
  /// deque.push_front(10);
  /// deque.push_front(9);
  ///
  /// assert_eq!(deque.as_slices(), (&[9, 10][..], &[0, 1][..]));
  /// ```
  pub fn as_slices(&self) -> (&[T], &[T]) {
    let (a, b) = self.slice_full_ranges();
    // SAFETY: both ranges lie inside the buffer and cover initialized slots only.
    unsafe { (&*self.buffer_range(a), &*self.buffer_range(b)) }
  }

  /// Mutable counterpart of [`as_slices`](Deque::as_slices).
  pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
    let (a, b) = self.slice_full_ranges();
    // SAFETY: the ranges are disjoint, lie inside the buffer and cover
    // initialized slots only.
    unsafe {
      let a = self.buffer_range_mut(a);
      let b = self.buffer_range_mut(b);
      (&mut *a, &mut *b)
    }
  }

  /// Moves the elements so that they occupy one contiguous run starting at
  /// slot `0`, and returns that run.
  ///
  /// The capacity is unchanged. Slice algorithms such as `sort` can then be
  /// applied to the whole deque.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::new();
  /// deque.push_back(2);
  /// deque.push_back(1);
  /// deque.push_front(3);
  ///
  /// deque.make_contiguous().sort();
  /// assert_eq!(deque.as_slices(), (&[1, 2, 3][..], &[][..]));
  /// ```
  pub fn make_contiguous(&mut self) -> &mut [T] {
    if !self.is_contiguous() {
      let (capacity, len) = (self.capacity(), self.len());
      // SAFETY: `len` is the number of initialized elements and fits in `capacity`.
      unsafe { self.relinearize(capacity, len) };
    }
    self.as_mut_slices().0
  }

  /// Provides a reference to the front element, or `None` if the deque is
  /// empty.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut d = Deque::new();
  /// assert_eq!(d.front(), None);
  ///
  /// d.push_back(1);
  /// d.push_back(2);
  /// assert_eq!(d.front(), Some(&1));
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn front(&self) -> Option<&T> {
    self.get(0)
  }

  /// Provides a mutable reference to the front element, or `None` if the
  /// deque is empty.
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn front_mut(&mut self) -> Option<&mut T> {
    self.get_mut(0)
  }

  /// Provides a reference to the back element, or `None` if the deque is
  /// empty.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut d = Deque::new();
  /// assert_eq!(d.back(), None);
  ///
  /// d.push_back(1);
  /// d.push_back(2);
  /// assert_eq!(d.back(), Some(&2));
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn back(&self) -> Option<&T> {
    self.get(self.len().wrapping_sub(1))
  }

  /// Provides a mutable reference to the back element, or `None` if the
  /// deque is empty.
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn back_mut(&mut self) -> Option<&mut T> {
    let last = self.len().wrapping_sub(1);
    self.get_mut(last)
  }

  /// Provides a reference to the element at the given logical index.
  ///
  /// Index `0` is the front of the deque.
  #[inline]
  pub fn get(&self, index: usize) -> Option<&T> {
    if index < self.len() {
      let idx = self.to_physical_idx(index);
      // SAFETY: index is checked to be in-bounds
      unsafe { Some(self.buf.get_unchecked(idx).assume_init_ref()) }
    } else {
      None
    }
  }

  /// Provides a mutable reference to the element at the given logical index.
  #[inline]
  pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
    if index < self.len() {
      let idx = self.to_physical_idx(index);
      // SAFETY: index is checked to be in-bounds
      unsafe { Some(self.buf.get_unchecked_mut(idx).assume_init_mut()) }
    } else {
      None
    }
  }

  /// Bounds-checked access to the element at the given logical index.
  ///
  /// Any index at or past [`len`](Deque::len) is reported as
  /// [`Error::OutOfRange`]; the deque is left untouched.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::{Deque, Error};
  ///
  /// let deque: Deque<i32> = [10, 20].into();
  /// assert_eq!(deque.at(1), Ok(&20));
  /// assert_eq!(deque.at(2), Err(Error::OutOfRange { index: 2, len: 2 }));
  /// ```
  pub fn at(&self, index: usize) -> Result<&T, Error> {
    let len = self.len();
    self.get(index).ok_or_else(|| Error::out_of_range(index, len))
  }

  /// Mutable counterpart of [`at`](Deque::at).
  pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
    let len = self.len();
    self.get_mut(index).ok_or_else(|| Error::out_of_range(index, len))
  }

  /// Swaps the elements at logical indices `i` and `j`.
  ///
  /// ## Panics
  ///
  /// Panics if either index is out of bounds.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut buf: Deque<i32> = [3, 4, 5].into();
  /// buf.swap(0, 2);
  /// assert_eq!(buf, [5, 4, 3]);
  /// ```
  pub fn swap(&mut self, i: usize, j: usize) {
    assert!(i < self.len());
    assert!(j < self.len());
    let ri = self.to_physical_idx(i);
    let rj = self.to_physical_idx(j);
    self.buf.swap(ri, rj);
  }

  /// Returns `true` if the deque contains an element equal to `x`.
  pub fn contains(&self, x: &T) -> bool
  where
    T: PartialEq<T>,
  {
    let (a, b) = self.as_slices();
    a.contains(x) || b.contains(x)
  }

  /// Appends an element to the back of the deque.
  ///
  /// If the write fills the last free slot, the buffer doubles and the
  /// elements are moved to its start.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut buf = Deque::new();
  /// buf.push_back(1);
  /// buf.push_back(3);
  /// assert_eq!(buf.back(), Some(&3));
  /// ```
  pub fn push_back(&mut self, value: T) {
    // SAFETY: `tail` is always a free slot between pushes.
    unsafe { push_back_unchecked!(self(value)) };
    if self.tail == self.head {
      self.grow();
    }
  }

  /// Prepends an element to the front of the deque.
  ///
  /// Growth follows the same rule as [`push_back`](Deque::push_back).
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut d = Deque::new();
  /// d.push_front(1);
  /// d.push_front(2);
  /// assert_eq!(d.front(), Some(&2));
  /// ```
  pub fn push_front(&mut self, value: T) {
    // SAFETY: the slot before `head` is free between pushes.
    unsafe { push_front_unchecked!(self(value)) };
    if self.head == self.tail {
      self.grow();
    }
  }

  /// Removes the first element and returns it, or `None` if the deque is
  /// empty.
  ///
  /// When the removal leaves the deque exactly a quarter full and the
  /// capacity is above [`BASE_CAPACITY`], the buffer halves.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut d = Deque::new();
  /// d.push_back(1);
  /// d.push_back(2);
  ///
  /// assert_eq!(d.pop_front(), Some(1));
  /// assert_eq!(d.pop_front(), Some(2));
  /// assert_eq!(d.pop_front(), None);
  /// ```
  pub fn pop_front(&mut self) -> Option<T> {
    let value = self.take_front()?;
    self.shrink_if_sparse();
    Some(value)
  }

  /// Removes the last element and returns it, or `None` if the deque is
  /// empty.
  ///
  /// Shrinks under the same rule as [`pop_front`](Deque::pop_front).
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut buf = Deque::new();
  /// assert_eq!(buf.pop_back(), None);
  /// buf.push_back(1);
  /// buf.push_back(3);
  /// assert_eq!(buf.pop_back(), Some(3));
  /// ```
  pub fn pop_back(&mut self) -> Option<T> {
    let value = self.take_back()?;
    self.shrink_if_sparse();
    Some(value)
  }

  /// Removes every element and releases any storage above
  /// [`BASE_CAPACITY`].
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::{Deque, BASE_CAPACITY};
  ///
  /// let mut deque: Deque<u32> = (0..100).collect();
  /// deque.clear();
  /// assert!(deque.is_empty());
  /// assert_eq!(deque.capacity(), BASE_CAPACITY);
  /// ```
  pub fn clear(&mut self) {
    let (head, len) = (self.head, self.len());
    let mut old = core::mem::replace(&mut self.buf, alloc_buffer(BASE_CAPACITY));
    self.head = 0;
    self.tail = 0;
    trace_event!(released_capacity = old.len(), len, "clear");
    // SAFETY: `old` held exactly `len` initialized elements starting at `head`,
    // and nothing else refers to them any more.
    unsafe { drop_logical(&mut old, head, len) };
  }
}

impl<T> Drop for Deque<T> {
  fn drop(&mut self) {
    let (head, len) = (self.head, self.len());
    // SAFETY: the deque owns exactly `len` initialized elements from `head`.
    unsafe { drop_logical(&mut self.buf, head, len) };
  }
}

impl<T> Deque<T> {
  /// Slot that the next `push_back` writes to after the current one.
  #[inline]
  fn next_tail(&self) -> usize {
    wrap_index(self.tail.wrapping_add(1), self.capacity())
  }

  /// Slot that `push_front` writes to.
  #[inline]
  fn next_head(&self) -> usize {
    wrap_index(self.head.wrapping_sub(1), self.capacity())
  }

  /// Slot of the last element, which `pop_back` vacates.
  #[inline]
  fn prev_tail(&self) -> usize {
    wrap_index(self.tail.wrapping_sub(1), self.capacity())
  }

  /// Slot of the second element, the new head after `pop_front`.
  #[inline]
  fn prev_head(&self) -> usize {
    wrap_index(self.head.wrapping_add(1), self.capacity())
  }

  #[inline]
  fn to_physical_idx(&self, idx: usize) -> usize {
    wrap_index(self.head.wrapping_add(idx), self.capacity())
  }

  /// Removes the front element without checking whether the buffer should
  /// shrink.
  pub(crate) fn take_front(&mut self) -> Option<T> {
    if self.is_empty() {
      return None;
    }
    let old_head = self.head;
    self.head = self.prev_head();
    // SAFETY: the deque was not empty, so `old_head` held an element that is
    // now outside the logical range.
    unsafe {
      assert_unchecked(old_head < self.capacity());
      Some(self.buffer_read(old_head))
    }
  }

  /// Removes the back element without checking whether the buffer should
  /// shrink.
  pub(crate) fn take_back(&mut self) -> Option<T> {
    if self.is_empty() {
      return None;
    }
    self.tail = self.prev_tail();
    // SAFETY: the deque was not empty, so the new `tail` held the last element.
    unsafe {
      assert_unchecked(self.tail < self.capacity());
      Some(self.buffer_read(self.tail))
    }
  }

  /// Doubles the buffer. Called right after a push made `head == tail`, when
  /// every slot holds an element.
  #[cold]
  #[inline(never)]
  fn grow(&mut self) {
    let old_capacity = self.capacity();
    let new_capacity = old_capacity.checked_mul(2).expect("capacity overflow");
    // SAFETY: all `old_capacity` slots are initialized, starting at `head`.
    unsafe { self.relinearize(new_capacity, old_capacity) };
    trace_event!(old_capacity, new_capacity, len = old_capacity, "grow");
  }

  /// Halves the buffer once a pop leaves it exactly a quarter full.
  fn shrink_if_sparse(&mut self) {
    let (capacity, len) = (self.capacity(), self.len());
    if capacity > BASE_CAPACITY && len == capacity / 4 {
      // SAFETY: `len` initialized elements fit in half the capacity.
      unsafe { self.relinearize(capacity / 2, len) };
      trace_event!(old_capacity = capacity, new_capacity = capacity / 2, len, "shrink");
    }
  }

  /// Moves the `len` elements starting at `head` into a fresh buffer of
  /// `new_capacity` slots, in logical order from slot `0`.
  ///
  /// ## Safety
  /// - exactly `len` consecutive slots starting at `head` (wrapping) are initialized
  /// - `len < new_capacity` and `new_capacity` is a power of two
  unsafe fn relinearize(&mut self, new_capacity: usize, len: usize) {
    debug_assert!(len < new_capacity && new_capacity.is_power_of_two());
    let mut buf = alloc_buffer::<T>(new_capacity);
    let (a, b) = split_runs(self.head, len, self.capacity());
    let (a_len, b_len) = (a.end - a.start, b.end - b.start);
    unsafe {
      let src = self.buf.as_ptr();
      let dst = buf.as_mut_ptr();
      ptr::copy_nonoverlapping(src.add(a.start), dst, a_len);
      ptr::copy_nonoverlapping(src.add(b.start), dst.add(a_len), b_len);
    }
    // The old buffer only holds `MaybeUninit`s, so dropping it moves nothing.
    self.buf = buf;
    self.head = 0;
    self.tail = len;
  }

  /// The two physical ranges holding the logical sequence, front run first.
  #[inline]
  fn slice_full_ranges(&self) -> (Range<usize>, Range<usize>) {
    split_runs(self.head, self.len(), self.capacity())
  }

  #[inline]
  fn is_contiguous(&self) -> bool {
    self.head <= self.capacity() - self.len()
  }

  /// Moves an element out of the buffer
  ///
  /// ## Safety
  /// - `off` must be a valid index into the buffer containing an initialized value
  #[inline]
  unsafe fn buffer_read(&self, off: usize) -> T {
    unsafe { self.buf.get_unchecked(off).assume_init_read() }
  }

  /// Writes an element into the buffer, moving it.
  ///
  /// ## Safety
  /// - `off` must be a valid index into the buffer whose slot is free
  #[inline]
  unsafe fn buffer_write(&mut self, off: usize, value: T) {
    unsafe {
      self.buf.get_unchecked_mut(off).write(value);
    }
  }

  /// Returns a slice pointer into the buffer.
  /// `range` must lie inside `0..self.capacity()`.
  #[inline]
  unsafe fn buffer_range(&self, range: Range<usize>) -> *const [T] {
    unsafe {
      ptr::slice_from_raw_parts(
        self.buf.as_ptr().add(range.start) as *const T,
        range.end - range.start,
      )
    }
  }

  /// Returns a slice pointer into the buffer.
  /// `range` must lie inside `0..self.capacity()`.
  #[inline]
  unsafe fn buffer_range_mut(&mut self, range: Range<usize>) -> *mut [T] {
    unsafe {
      ptr::slice_from_raw_parts_mut(
        self.buf.as_mut_ptr().add(range.start) as *mut T,
        range.end - range.start,
      )
    }
  }
}

/// Maps an index onto a buffer of `capacity` slots, `capacity` being a power
/// of two. Wrapped negative offsets land on the right slot as well.
#[inline]
const fn wrap_index(index: usize, capacity: usize) -> usize {
  debug_assert!(capacity.is_power_of_two());
  index & (capacity - 1)
}

/// Rounds a requested capacity up to the power of two the deque allocates.
fn capacity_for(requested: usize) -> usize {
  requested
    .max(BASE_CAPACITY)
    .checked_next_power_of_two()
    .expect("capacity overflow")
}

/// Splits `len` slots starting at physical index `head` into the run up to
/// the end of the buffer and the run continuing from slot `0`.
#[inline]
const fn split_runs(head: usize, len: usize, capacity: usize) -> (Range<usize>, Range<usize>) {
  if len == 0 {
    return (0..0, 0..0);
  }
  // `head < capacity`, so this never underflows.
  let head_len = capacity - head;
  if head_len >= len {
    (head..head + len, 0..0)
  } else {
    (head..capacity, 0..len - head_len)
  }
}

/// Drops the `len` elements that start at `head` in `buf`.
///
/// ## Safety
/// - exactly those slots must be initialized, and must not be used again
unsafe fn drop_logical<T>(buf: &mut [MaybeUninit<T>], head: usize, len: usize) {
  /// Runs the destructor for all items in the slice when it gets dropped (normally or
  /// during unwinding).
  struct Dropper<'a, T>(&'a mut [T]);

  impl<T> Drop for Dropper<'_, T> {
    fn drop(&mut self) {
      unsafe {
        ptr::drop_in_place(self.0);
      }
    }
  }

  let (a, b) = split_runs(head, len, buf.len());
  let base = buf.as_mut_ptr() as *mut T;
  unsafe {
    let front = ptr::slice_from_raw_parts_mut(base.add(a.start), a.end - a.start);
    let back = ptr::slice_from_raw_parts_mut(base.add(b.start), b.end - b.start);
    // Make sure the back run is dropped even when a destructor in the front
    // run panics.
    let _back_dropper = Dropper(&mut *back);
    ptr::drop_in_place(front);
  }
}

#[rustversion::since(1.82)]
#[inline]
fn alloc_buffer<T>(capacity: usize) -> Box<[MaybeUninit<T>]> {
  Box::new_uninit_slice(capacity)
}

#[rustversion::before(1.82)]
#[inline]
fn alloc_buffer<T>(capacity: usize) -> Box<[MaybeUninit<T>]> {
  core::iter::repeat_with(MaybeUninit::uninit)
    .take(capacity)
    .collect()
}

#[rustversion::before(1.85)]
#[cfg_attr(not(tarpaulin), inline(always))]
const unsafe fn assert_unchecked(_: bool) {}

#[rustversion::since(1.85)]
#[cfg_attr(not(tarpaulin), inline(always))]
const unsafe fn assert_unchecked(cond: bool) {
  unsafe { core::hint::assert_unchecked(cond) };
}
