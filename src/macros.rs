/// Writes `value` at `tail` and advances `tail`, without checking for a
/// collision with `head`.
macro_rules! push_back_unchecked {
  ($this:ident($value:expr)) => {{
    let tail = $this.tail;
    // SAFETY: `tail` is in-bounds and uninitialized
    $this.buffer_write(tail, $value);
    $this.tail = $this.next_tail();
  }};
}

/// Moves `head` back one slot and writes `value` there, without checking for
/// a collision with `tail`.
macro_rules! push_front_unchecked {
  ($this:ident($value:expr)) => {{
    $this.head = $this.next_head();
    let head = $this.head;
    // SAFETY: head is guaranteed to be in-bounds and uninitialized
    $this.buffer_write(head, $value);
  }};
}

/// Emits a `TRACE` event when the `tracing` feature is on, and nothing
/// otherwise.
macro_rules! trace_event {
  ($($arg:tt)+) => {
    #[cfg(feature = "tracing")]
    ::tracing::trace!($($arg)+);
  };
}

pub(super) use push_back_unchecked;
pub(super) use push_front_unchecked;
pub(super) use trace_event;
