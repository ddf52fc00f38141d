use std::{
  io::{self, BufRead, IoSlice, Read, Write},
  string::String,
  vec::Vec,
};

use super::Deque;

impl Deque<u8> {
  /// Drops `n` bytes from the front, one pop at a time so the shrink rule
  /// keeps applying.
  fn consume_front(&mut self, n: usize) {
    for _ in 0..n {
      if self.pop_front().is_none() {
        break;
      }
    }
  }

  /// Copies the first `buf.len()` bytes into `buf`. The caller checks that
  /// the deque holds that many.
  fn copy_front(&self, buf: &mut [u8]) {
    let (front, back) = self.as_slices();
    if buf.len() <= front.len() {
      buf.copy_from_slice(&front[..buf.len()]);
    } else {
      let (buf_front, buf_back) = buf.split_at_mut(front.len());
      buf_front.copy_from_slice(front);
      buf_back.copy_from_slice(&back[..buf_back.len()]);
    }
  }
}

/// Read is implemented for `Deque<u8>` by consuming bytes from the front of
/// the deque.
impl Read for Deque<u8> {
  /// Fills `buf` with as many bytes as the deque holds, across both physical
  /// runs.
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    let n = buf.len().min(self.len());
    self.copy_front(&mut buf[..n]);
    self.consume_front(n);
    Ok(n)
  }

  #[inline]
  fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
    if buf.len() > self.len() {
      self.clear();
      return Err(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "failed to fill whole buffer",
      ));
    }
    self.copy_front(buf);
    self.consume_front(buf.len());
    Ok(())
  }

  #[inline]
  fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
    let len = self.len();
    buf
      .try_reserve(len)
      .map_err(|_| io::ErrorKind::OutOfMemory)?;

    let (front, back) = self.as_slices();
    buf.extend_from_slice(front);
    buf.extend_from_slice(back);
    self.clear();
    Ok(len)
  }

  #[inline]
  fn read_to_string(&mut self, buf: &mut String) -> io::Result<usize> {
    match String::from_utf8(Vec::from(core::mem::take(self))) {
      Ok(text) => {
        buf
          .try_reserve(text.len())
          .map_err(|_| io::ErrorKind::OutOfMemory)?;
        buf.push_str(&text);
        Ok(text.len())
      }
      Err(err) => {
        // Leave the bytes where they were.
        *self = Deque::from(err.into_bytes());
        Err(io::Error::new(
          io::ErrorKind::InvalidData,
          "stream did not contain valid UTF-8",
        ))
      }
    }
  }
}

/// BufRead is implemented for `Deque<u8>` by reading bytes from the front of
/// the deque.
impl BufRead for Deque<u8> {
  /// Returns the front run as reported by [`as_slices`][`Deque::as_slices`].
  /// If the bytes wrap around the end of the buffer, the rest shows up once
  /// the front run has been consumed.
  #[inline]
  fn fill_buf(&mut self) -> io::Result<&[u8]> {
    let (front, _) = self.as_slices();
    Ok(front)
  }

  #[inline]
  fn consume(&mut self, amt: usize) {
    self.consume_front(amt);
  }
}

/// Write is implemented for `Deque<u8>` by appending to the back, growing the
/// buffer as needed.
impl Write for Deque<u8> {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.extend(buf);
    Ok(buf.len())
  }

  #[inline]
  fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
    let mut written = 0;
    for buf in bufs {
      self.extend(buf.iter());
      written += buf.len();
    }
    Ok(written)
  }

  #[inline]
  fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
    self.extend(buf);
    Ok(())
  }

  #[inline]
  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use crate::Deque;
  use std::{
    io::{self, BufRead, IoSlice, Read, Write},
    string::String,
    vec::Vec,
  };

  #[test]
  fn read_consumes_from_the_front() {
    let mut deque = Deque::<u8>::new();
    deque.extend(b"hello");

    let mut buf = [0u8; 3];
    let read = Read::read(&mut deque, &mut buf).unwrap();
    assert_eq!(read, 3);
    assert_eq!(&buf[..read], b"hel");
    assert_eq!(Vec::from(deque), b"lo".to_vec());
  }

  #[test]
  fn read_exact_handles_wrapped_storage() {
    let mut deque = Deque::<u8>::new();
    deque.extend(b"cde");
    deque.push_front(b'b');
    deque.push_front(b'a');
    assert!(!deque.as_slices().1.is_empty());

    let mut buf = [0u8; 4];
    deque.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"abcd");
    assert_eq!(deque, [b'e']);
  }

  #[test]
  fn read_exact_reports_eof() {
    let mut deque = Deque::<u8>::new();
    deque.push_back(b'x');

    let mut buf = [0u8; 2];
    let err = Read::read_exact(&mut deque, &mut buf).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
  }

  #[test]
  fn read_to_end_and_string_drain_the_deque() {
    let mut deque = Deque::<u8>::new();
    deque.extend(b"abc");
    let mut buf = Vec::new();
    deque.read_to_end(&mut buf).unwrap();
    assert_eq!(buf, b"abc");
    assert!(deque.is_empty());

    deque.extend(b"de");
    let mut string = String::new();
    assert_eq!(deque.read_to_string(&mut string).unwrap(), 2);
    assert_eq!(string, "de");
    assert!(deque.is_empty());

    deque.push_back(b'o');
    deque.push_back(0xFF);
    let mut invalid = String::new();
    let err = deque.read_to_string(&mut invalid).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert!(invalid.is_empty());
    assert_eq!(deque, [b'o', 0xFF]);
  }

  #[test]
  fn bufread_fill_and_consume() {
    let mut deque = Deque::<u8>::new();
    deque.extend(b"abcd");

    let buf = BufRead::fill_buf(&mut deque).unwrap();
    assert_eq!(buf, b"abcd");
    BufRead::consume(&mut deque, 3);
    assert_eq!(deque, [b'd']);
  }

  #[test]
  fn writes_grow_the_buffer() {
    let mut deque = Deque::<u8>::new();
    let written = Write::write(&mut deque, b"abcdefghij").unwrap();
    assert_eq!(written, 10);
    assert_eq!(deque.len(), 10);
    assert_eq!(deque.capacity(), 16);

    let slices = [IoSlice::new(b"kl"), IoSlice::new(b"mn")];
    assert_eq!(Write::write_vectored(&mut deque, &slices).unwrap(), 4);
    Write::write_all(&mut deque, b"opqrst").unwrap();
    Write::flush(&mut deque).unwrap();
    assert_eq!(Vec::from(deque), b"abcdefghijklmnopqrst".to_vec());
  }

  #[test]
  fn reading_shrinks_the_buffer() {
    let mut deque = Deque::<u8>::new();
    deque.write_all(&[7u8; 40]).unwrap();
    assert_eq!(deque.capacity(), 64);

    let mut buf = [0u8; 24];
    deque.read_exact(&mut buf).unwrap();
    assert_eq!(deque.len(), 16);
    assert_eq!(deque.capacity(), 32);
  }
}
