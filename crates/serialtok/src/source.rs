//! The byte-source capability polled by [`TokenReader`](crate::TokenReader).
//!
//! A source is anything that can answer "is a byte ready?" without blocking and
//! hand that byte over. A UART receive register, a ring buffer filled from an
//! interrupt handler, or a test fixture all fit.

/// A non-blocking source of bytes.
pub trait ByteSource {
    /// Returns `true` when at least one unread byte can be read right now.
    ///
    /// Must not block.
    fn byte_available(&mut self) -> bool;

    /// Reads the next byte.
    ///
    /// The reader only calls this after [`byte_available`] returned `true`.
    /// Behaviour when called on an empty source is up to the implementation;
    /// the stock sources return `0`.
    ///
    /// [`byte_available`]: ByteSource::byte_available
    fn read_byte(&mut self) -> u8;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn byte_available(&mut self) -> bool {
        (**self).byte_available()
    }

    #[inline]
    fn read_byte(&mut self) -> u8 {
        (**self).read_byte()
    }
}

/// Every byte of a slice, available immediately.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
}

impl<'a> SliceSource<'a> {
    /// Wraps `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> &'a [u8] {
        self.bytes
    }
}

impl ByteSource for SliceSource<'_> {
    fn byte_available(&mut self) -> bool {
        !self.bytes.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        match self.bytes.split_first() {
            Some((&b, rest)) => {
                self.bytes = rest;
                b
            }
            None => 0,
        }
    }
}

/// A slice whose bytes "arrive" only when released.
///
/// Models a slow line: nothing is available until [`release`](Self::release)
/// lets more of the input through, which is how partial non-blocking arrival
/// is simulated when driving a reader step by step.
///
/// ```rust
/// use serialtok::{ByteSource, Trickle};
///
/// let mut line = Trickle::new(b"ab");
/// assert!(!line.byte_available());
/// line.release(1);
/// assert_eq!(line.read_byte(), b'a');
/// assert!(!line.byte_available());
/// ```
#[derive(Debug, Clone)]
pub struct Trickle<'a> {
    bytes: &'a [u8],
    read: usize,
    released: usize,
}

impl<'a> Trickle<'a> {
    /// Wraps `bytes` with nothing released yet.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            read: 0,
            released: 0,
        }
    }

    /// Makes up to `n` more bytes available. Returns how many were released.
    pub fn release(&mut self, n: usize) -> usize {
        let before = self.released;
        self.released = self.released.saturating_add(n).min(self.bytes.len());
        self.released - before
    }

    /// Releases everything that is left.
    pub fn release_all(&mut self) {
        self.released = self.bytes.len();
    }

    /// `true` once every byte has been released and read.
    pub fn is_drained(&self) -> bool {
        self.read == self.bytes.len()
    }

    /// Bytes released but not yet read.
    pub fn backlog(&self) -> usize {
        self.released - self.read
    }
}

impl ByteSource for Trickle<'_> {
    fn byte_available(&mut self) -> bool {
        self.read < self.released
    }

    fn read_byte(&mut self) -> u8 {
        if self.read < self.released {
            let b = self.bytes[self.read];
            self.read += 1;
            b
        } else {
            0
        }
    }
}

#[cfg(feature = "alloc")]
impl ByteSource for alloc::collections::VecDeque<u8> {
    fn byte_available(&mut self) -> bool {
        !self.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        self.pop_front().unwrap_or(0)
    }
}
