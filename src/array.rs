use generic_array::{ArrayLength, GenericArray};

use super::Deque;

impl<T, N: ArrayLength> From<GenericArray<T, N>> for Deque<T> {
  /// Moves the array's elements into a deque, front to back.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  /// use generic_array::{typenum::U3, GenericArray};
  ///
  /// let arr: GenericArray<u32, U3> = GenericArray::from_array([1, 2, 3]);
  /// let deque = Deque::from(arr);
  /// assert_eq!(deque, [1, 2, 3]);
  /// ```
  fn from(arr: GenericArray<T, N>) -> Self {
    arr.into_iter().collect()
  }
}

#[cfg(test)]
mod tests {
  use generic_array::{typenum::U12, GenericArray};

  use crate::Deque;

  #[test]
  fn longer_than_base_capacity() {
    let arr: GenericArray<u16, U12> = GenericArray::from_array([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    let deque = Deque::from(arr);
    assert_eq!(deque.len(), 12);
    assert_eq!(deque.capacity(), 16);
    assert_eq!(deque, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
  }
}
