use core::{
  cmp::Ordering,
  fmt,
  marker::PhantomData,
  ops::{Add, AddAssign, Sub, SubAssign},
  ptr,
};

use super::{Deque, Error};

mod sealed {
  pub trait Sealed {}

  impl Sealed for super::Forward {}
  impl Sealed for super::Backward {}
}

/// The direction a [`Cursor`] or [`CursorMut`] steps in.
///
/// Implemented by [`Forward`] and [`Backward`] only.
pub trait Direction: sealed::Sealed {
  /// Logical positions moved by one step: `1` front to back, `-1` back to
  /// front.
  const STEP: isize;
}

/// Marker for cursors walking from the front of the deque to the back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Forward {}

/// Marker for cursors walking from the back of the deque to the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backward {}

impl Direction for Forward {
  const STEP: isize = 1;
}

impl Direction for Backward {
  const STEP: isize = -1;
}

/// Addressing shared by every cursor: the physical slot `cur`, the signed
/// logical position `pos` (relative to the head) and the capacity the slot
/// wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawCursor {
  cur: usize,
  pos: isize,
  cap: usize,
}

impl RawCursor {
  fn at(head: usize, cap: usize, pos: isize) -> Self {
    let mut raw = Self { cur: head, pos: 0, cap };
    raw.advance(pos);
    raw
  }

  /// Moves by `by` logical positions, wrapping the slot upward past the end
  /// of the buffer and downward below slot `0`.
  fn advance(&mut self, by: isize) {
    // Buffers never hold more than `isize::MAX` bytes, so `cap` fits.
    let cap = self.cap as isize;
    let mut cur = self.cur as isize + by % cap;
    if cur >= cap {
      cur -= cap;
    } else if cur < 0 {
      cur += cap;
    }
    self.cur = cur as usize;
    self.pos = self.pos.wrapping_add(by);
  }
}

impl<T> Deque<T> {
  /// Returns a cursor on the front element.
  ///
  /// On an empty deque it equals [`cursor_end`](Deque::cursor_end).
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let deque: Deque<i32> = [1, 2, 3].into();
  /// let mut cursor = deque.cursor_begin();
  /// let mut seen = Vec::new();
  /// while cursor != deque.cursor_end() {
  ///     seen.push(*cursor.get().unwrap());
  ///     cursor.move_next();
  /// }
  /// assert_eq!(seen, [1, 2, 3]);
  /// ```
  pub fn cursor_begin(&self) -> Cursor<'_, T> {
    Cursor::new(self, 0)
  }

  /// Returns a cursor one past the back element.
  pub fn cursor_end(&self) -> Cursor<'_, T> {
    Cursor::new(self, self.len() as isize)
  }

  /// Returns a reverse cursor on the back element.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let deque: Deque<i32> = [1, 2, 3].into();
  /// let first = deque.cursor_rbegin();
  /// assert_eq!(first.get(), Some(&3));
  /// assert_eq!((first + 2).get(), Some(&1));
  /// assert_eq!(first + 3, deque.cursor_rend());
  /// ```
  pub fn cursor_rbegin(&self) -> Cursor<'_, T, Backward> {
    Cursor::new(self, self.len() as isize - 1)
  }

  /// Returns a reverse cursor one before the front element.
  pub fn cursor_rend(&self) -> Cursor<'_, T, Backward> {
    Cursor::new(self, -1)
  }

  /// Returns a mutable cursor on the front element.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque: Deque<i32> = [1, 2, 3].into();
  /// let mut cursor = deque.cursor_begin_mut();
  /// while let Some(value) = cursor.get_mut() {
  ///     *value *= 10;
  ///     cursor.move_next();
  /// }
  /// assert_eq!(deque, [10, 20, 30]);
  /// ```
  pub fn cursor_begin_mut(&mut self) -> CursorMut<'_, T> {
    CursorMut::new(self, 0)
  }

  /// Returns a mutable cursor one past the back element.
  pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
    let end = self.len() as isize;
    CursorMut::new(self, end)
  }

  /// Returns a mutable reverse cursor on the back element.
  pub fn cursor_rbegin_mut(&mut self) -> CursorMut<'_, T, Backward> {
    let last = self.len() as isize - 1;
    CursorMut::new(self, last)
  }

  /// Returns a mutable reverse cursor one before the front element.
  pub fn cursor_rend_mut(&mut self) -> CursorMut<'_, T, Backward> {
    CursorMut::new(self, -1)
  }

  fn raw_cursor(&self, pos: isize) -> RawCursor {
    RawCursor::at(self.head, self.capacity(), pos)
  }

  /// Resolves a cursor to its slot if it points at an element.
  fn cursor_slot(&self, raw: &RawCursor) -> Result<usize, Error> {
    debug_assert_eq!(raw.cap, self.capacity());
    let len = self.len();
    if raw.pos >= 0 && (raw.pos as usize) < len {
      debug_assert_eq!(raw.cur, self.to_physical_idx(raw.pos as usize));
      Ok(raw.cur)
    } else {
      Err(Error::OutOfRange {
        index: raw.pos,
        len,
      })
    }
  }

  fn cursor_ref(&self, raw: &RawCursor) -> Result<&T, Error> {
    let slot = self.cursor_slot(raw)?;
    // SAFETY: `cursor_slot` only returns slots holding an element.
    Ok(unsafe { self.buf.get_unchecked(slot).assume_init_ref() })
  }

  fn cursor_mut(&mut self, raw: &RawCursor) -> Result<&mut T, Error> {
    let slot = self.cursor_slot(raw)?;
    // SAFETY: `cursor_slot` only returns slots holding an element.
    Ok(unsafe { self.buf.get_unchecked_mut(slot).assume_init_mut() })
  }
}

/// A read-only random-access cursor over a [`Deque`].
///
/// A cursor sits on a logical position of the deque. It can move by any
/// number of positions in either direction, measure its distance to another
/// cursor and be ordered against it. Positions outside `0..len` are allowed;
/// reading there yields `None` (or [`Error::OutOfRange`] from
/// [`try_get`](Cursor::try_get)).
///
/// `D` picks the walking direction. [`Backward`] cursors come from
/// [`Deque::cursor_rbegin`] and [`Deque::cursor_rend`], and every step they
/// take moves toward the front.
///
/// The cursor borrows the deque, so the deque cannot grow or shrink while the
/// cursor is alive.
pub struct Cursor<'a, T, D: Direction = Forward> {
  deque: &'a Deque<T>,
  raw: RawCursor,
  _direction: PhantomData<D>,
}

impl<'a, T, D: Direction> Cursor<'a, T, D> {
  fn new(deque: &'a Deque<T>, pos: isize) -> Self {
    Self {
      raw: deque.raw_cursor(pos),
      deque,
      _direction: PhantomData,
    }
  }

  /// Returns the element under the cursor, or `None` past either end.
  #[inline]
  pub fn get(&self) -> Option<&'a T> {
    self.deque.cursor_ref(&self.raw).ok()
  }

  /// Returns the element under the cursor, or [`Error::OutOfRange`] past
  /// either end.
  #[inline]
  pub fn try_get(&self) -> Result<&'a T, Error> {
    self.deque.cursor_ref(&self.raw)
  }

  /// Returns the element `offset` steps away without moving the cursor.
  #[inline]
  pub fn peek(&self, offset: isize) -> Option<&'a T> {
    (*self + offset).get()
  }

  /// The logical index under the cursor. `-1` is one before the front, `len`
  /// one past the back.
  #[inline]
  pub const fn position(&self) -> isize {
    self.raw.pos
  }

  /// Moves the cursor `by` steps in its direction; negative values step back.
  #[inline]
  pub fn advance(&mut self, by: isize) {
    self.raw.advance(by.wrapping_mul(D::STEP));
  }

  /// Moves one step in the cursor's direction.
  #[inline]
  pub fn move_next(&mut self) {
    self.advance(1);
  }

  /// Moves one step against the cursor's direction.
  #[inline]
  pub fn move_prev(&mut self) {
    self.advance(-1);
  }

  /// Returns the number of steps from `origin` to `self`.
  ///
  /// Only meaningful for cursors over the same deque.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let deque: Deque<u8> = (0..20).collect();
  /// assert_eq!(deque.cursor_end().offset_from(&deque.cursor_begin()), 20);
  /// assert_eq!(deque.cursor_rend().offset_from(&deque.cursor_rbegin()), 20);
  /// ```
  #[inline]
  pub fn offset_from(&self, origin: &Self) -> isize {
    self.raw.pos.wrapping_sub(origin.raw.pos).wrapping_mul(D::STEP)
  }
}

impl<T, D: Direction> Clone for Cursor<'_, T, D> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T, D: Direction> Copy for Cursor<'_, T, D> {}

impl<T, D: Direction> fmt::Debug for Cursor<'_, T, D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Cursor")
      .field("position", &self.raw.pos)
      .field("slot", &self.raw.cur)
      .field("capacity", &self.raw.cap)
      .finish()
  }
}

/// Cursors are equal when they sit on the same slot of the same deque.
impl<T, D: Direction> PartialEq for Cursor<'_, T, D> {
  fn eq(&self, other: &Self) -> bool {
    ptr::eq(self.deque, other.deque) && self.raw.cur == other.raw.cur
  }
}

impl<T, D: Direction> Eq for Cursor<'_, T, D> {}

/// Orders cursors of the same deque by how far they have walked in their
/// direction. Cursors of different deques are unordered.
impl<T, D: Direction> PartialOrd for Cursor<'_, T, D> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    if !ptr::eq(self.deque, other.deque) {
      return None;
    }
    if self == other {
      return Some(Ordering::Equal);
    }
    let lhs = self.raw.pos.wrapping_mul(D::STEP);
    let rhs = other.raw.pos.wrapping_mul(D::STEP);
    Some(lhs.cmp(&rhs))
  }
}

impl<T, D: Direction> Add<isize> for Cursor<'_, T, D> {
  type Output = Self;

  #[inline]
  fn add(mut self, rhs: isize) -> Self {
    self.advance(rhs);
    self
  }
}

impl<T, D: Direction> Sub<isize> for Cursor<'_, T, D> {
  type Output = Self;

  #[inline]
  fn sub(mut self, rhs: isize) -> Self {
    self.advance(rhs.wrapping_neg());
    self
  }
}

impl<T, D: Direction> Sub for Cursor<'_, T, D> {
  type Output = isize;

  #[inline]
  fn sub(self, rhs: Self) -> isize {
    self.offset_from(&rhs)
  }
}

impl<T, D: Direction> AddAssign<isize> for Cursor<'_, T, D> {
  #[inline]
  fn add_assign(&mut self, rhs: isize) {
    self.advance(rhs);
  }
}

impl<T, D: Direction> SubAssign<isize> for Cursor<'_, T, D> {
  #[inline]
  fn sub_assign(&mut self, rhs: isize) {
    self.advance(rhs.wrapping_neg());
  }
}

/// A random-access cursor with mutable access to a [`Deque`].
///
/// Moves like [`Cursor`]. Holding it borrows the deque exclusively, so at most
/// one mutable cursor exists per deque at a time; use
/// [`as_cursor`](CursorMut::as_cursor) to compare or measure against
/// read-only cursors.
pub struct CursorMut<'a, T, D: Direction = Forward> {
  deque: &'a mut Deque<T>,
  raw: RawCursor,
  _direction: PhantomData<D>,
}

impl<'a, T, D: Direction> CursorMut<'a, T, D> {
  fn new(deque: &'a mut Deque<T>, pos: isize) -> Self {
    Self {
      raw: deque.raw_cursor(pos),
      deque,
      _direction: PhantomData,
    }
  }

  /// Returns the element under the cursor, or `None` past either end.
  #[inline]
  pub fn get(&self) -> Option<&T> {
    self.deque.cursor_ref(&self.raw).ok()
  }

  /// Returns the element under the cursor, or [`Error::OutOfRange`].
  #[inline]
  pub fn try_get(&self) -> Result<&T, Error> {
    self.deque.cursor_ref(&self.raw)
  }

  /// Returns the element under the cursor mutably, or `None` past either end.
  #[inline]
  pub fn get_mut(&mut self) -> Option<&mut T> {
    self.deque.cursor_mut(&self.raw).ok()
  }

  /// Returns the element under the cursor mutably, or
  /// [`Error::OutOfRange`].
  #[inline]
  pub fn try_get_mut(&mut self) -> Result<&mut T, Error> {
    self.deque.cursor_mut(&self.raw)
  }

  /// Consumes the cursor, returning the element under it for the whole
  /// borrow of the deque.
  pub fn into_mut(self) -> Option<&'a mut T> {
    let Self { deque, raw, .. } = self;
    deque.cursor_mut(&raw).ok()
  }

  /// Returns the element `offset` steps away without moving the cursor.
  pub fn peek(&self, offset: isize) -> Option<&T> {
    self.as_cursor().peek(offset)
  }

  /// Mutable counterpart of [`peek`](CursorMut::peek).
  pub fn peek_mut(&mut self, offset: isize) -> Option<&mut T> {
    let mut raw = self.raw;
    raw.advance(offset.wrapping_mul(D::STEP));
    self.deque.cursor_mut(&raw).ok()
  }

  /// Swaps the element under the cursor with the one `offset` steps away.
  ///
  /// Fails with [`Error::OutOfRange`] if either position is past an end; the
  /// deque is unchanged then.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque: Deque<i32> = [1, 2, 3, 4].into();
  /// let mut cursor = deque.cursor_begin_mut();
  /// cursor.swap_with(3).unwrap();
  /// cursor.move_next();
  /// cursor.swap_with(1).unwrap();
  /// assert!(cursor.swap_with(5).is_err());
  /// assert_eq!(deque, [4, 3, 2, 1]);
  /// ```
  pub fn swap_with(&mut self, offset: isize) -> Result<(), Error> {
    let mut other = self.raw;
    other.advance(offset.wrapping_mul(D::STEP));
    let a = self.deque.cursor_slot(&self.raw)?;
    let b = self.deque.cursor_slot(&other)?;
    self.deque.buf.swap(a, b);
    Ok(())
  }

  /// See [`Cursor::position`].
  #[inline]
  pub const fn position(&self) -> isize {
    self.raw.pos
  }

  /// Moves the cursor `by` steps in its direction; negative values step back.
  #[inline]
  pub fn advance(&mut self, by: isize) {
    self.raw.advance(by.wrapping_mul(D::STEP));
  }

  /// Moves one step in the cursor's direction.
  #[inline]
  pub fn move_next(&mut self) {
    self.advance(1);
  }

  /// Moves one step against the cursor's direction.
  #[inline]
  pub fn move_prev(&mut self) {
    self.advance(-1);
  }

  /// Reborrows as a read-only cursor at the same position.
  pub fn as_cursor(&self) -> Cursor<'_, T, D> {
    Cursor {
      deque: &*self.deque,
      raw: self.raw,
      _direction: PhantomData,
    }
  }
}

impl<T, D: Direction> fmt::Debug for CursorMut<'_, T, D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CursorMut")
      .field("position", &self.raw.pos)
      .field("slot", &self.raw.cur)
      .field("capacity", &self.raw.cap)
      .finish()
  }
}

impl<T, D: Direction> Add<isize> for CursorMut<'_, T, D> {
  type Output = Self;

  #[inline]
  fn add(mut self, rhs: isize) -> Self {
    self.advance(rhs);
    self
  }
}

impl<T, D: Direction> Sub<isize> for CursorMut<'_, T, D> {
  type Output = Self;

  #[inline]
  fn sub(mut self, rhs: isize) -> Self {
    self.advance(rhs.wrapping_neg());
    self
  }
}

impl<T, D: Direction> AddAssign<isize> for CursorMut<'_, T, D> {
  #[inline]
  fn add_assign(&mut self, rhs: isize) {
    self.advance(rhs);
  }
}

impl<T, D: Direction> SubAssign<isize> for CursorMut<'_, T, D> {
  #[inline]
  fn sub_assign(&mut self, rhs: isize) {
    self.advance(rhs.wrapping_neg());
  }
}

#[cfg(test)]
mod tests {
  use super::RawCursor;
  use crate::Deque;

  #[test]
  fn raw_cursor_wraps_both_ways() {
    let mut raw = RawCursor::at(6, 8, 0);
    raw.advance(3);
    assert_eq!((raw.cur, raw.pos), (1, 3));
    raw.advance(-5);
    assert_eq!((raw.cur, raw.pos), (4, -2));
    raw.advance(17);
    assert_eq!((raw.cur, raw.pos), (5, 15));
    raw.advance(-16);
    assert_eq!((raw.cur, raw.pos), (5, -1));
  }

  #[test]
  fn cursor_slots_follow_the_head() {
    let mut deque = Deque::new();
    for value in 0..4 {
      deque.push_back(value);
    }
    for value in (-3..0).rev() {
      deque.push_front(value);
    }
    // head has wrapped to slot 5 of 8
    let begin = deque.cursor_begin();
    assert_eq!(begin.raw.cur, 5);
    assert_eq!(begin.get(), Some(&-3));
    assert_eq!((begin + 3).raw.cur, 0);
    assert_eq!((begin + 3).get(), Some(&0));
    assert_eq!(deque.cursor_end().raw.cur, 4);
    assert_eq!(deque.cursor_rend().raw.cur, 4);
  }

  #[test]
  fn empty_deque_cursors_meet() {
    let deque = Deque::<u8>::new();
    assert_eq!(deque.cursor_begin(), deque.cursor_end());
    assert_eq!(deque.cursor_rbegin(), deque.cursor_rend());
    assert_eq!(deque.cursor_begin().get(), None);
    assert_eq!(deque.cursor_rbegin().get(), None);
  }

  #[test]
  fn cursors_of_different_deques_do_not_compare() {
    let a: Deque<u8> = [1, 2].into();
    let b: Deque<u8> = [1, 2].into();
    assert_ne!(a.cursor_begin(), b.cursor_begin());
    assert_eq!(a.cursor_begin().partial_cmp(&b.cursor_begin()), None);
  }
}
