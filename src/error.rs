/// Errors reported by the checked accessors of [`Deque`](crate::Deque) and its
/// cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
  /// A logical index fell outside `0..len`.
  #[error("index {index} is out of range for a deque of length {len}")]
  OutOfRange {
    /// The requested logical index. Cursor positions can be negative.
    index: isize,
    /// The length of the deque at the time of the access.
    len: usize,
  },
}

impl Error {
  #[inline]
  pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
    Self::OutOfRange {
      index: isize::try_from(index).unwrap_or(isize::MAX),
      len,
    }
  }
}
