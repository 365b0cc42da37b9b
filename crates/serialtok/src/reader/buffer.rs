//! Fixed-capacity token accumulation buffer.
//!
//! One buffer serves every token kind. Bytes are appended at the write index;
//! [`TokenBuffer::finish`] terminates the content with a NUL, records its
//! length as the visible token and rewinds the write index. The visible token
//! survives until the next [`TokenBuffer::begin`].
//!
//! The last slot is reserved for the terminator, so at most `N - 1` content
//! bytes fit.

use core::ffi::CStr;

/// Returned by [`TokenBuffer::push`] when the buffer is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Overflow;

#[derive(Debug, Clone)]
pub(crate) struct TokenBuffer<const N: usize> {
    bytes: [u8; N],
    /// Next free slot, in `0..N`.
    write: usize,
    /// Length of the last finished token.
    visible: usize,
}

impl<const N: usize> TokenBuffer<N> {
    const CHECK_CAPACITY: () = assert!(
        N >= 2,
        "token buffer needs room for a byte and a terminator"
    );

    /// Content bytes that fit, excluding the terminator.
    pub(crate) const CONTENT: usize = N - 1;

    pub(crate) const fn new() -> Self {
        let () = Self::CHECK_CAPACITY;
        Self {
            bytes: [0; N],
            write: 0,
            visible: 0,
        }
    }

    /// Starts accumulating a new token. The previously finished token is no
    /// longer visible.
    pub(crate) fn begin(&mut self) {
        self.write = 0;
        self.visible = 0;
        self.bytes[0] = 0;
    }

    /// Appends `b` unless only the terminator slot is left.
    pub(crate) fn push(&mut self, b: u8) -> Result<(), Overflow> {
        if self.write >= Self::CONTENT {
            return Err(Overflow);
        }
        self.bytes[self.write] = b;
        self.write += 1;
        Ok(())
    }

    /// Bytes accumulated by the token in progress.
    pub(crate) fn pending(&self) -> &[u8] {
        &self.bytes[..self.write]
    }

    pub(crate) fn len(&self) -> usize {
        self.write
    }

    /// Terminates the accumulated bytes, makes them the visible token and
    /// rewinds the write index. Returns the token length.
    pub(crate) fn finish(&mut self) -> usize {
        self.bytes[self.write] = 0;
        self.visible = self.write;
        self.write = 0;
        self.visible
    }

    /// The last finished token.
    pub(crate) fn token(&self) -> &[u8] {
        &self.bytes[..self.visible]
    }

    /// The last finished token up to its terminator, or up to the first NUL
    /// byte it contains.
    pub(crate) fn token_c_str(&self) -> &CStr {
        match CStr::from_bytes_until_nul(&self.bytes[..=self.visible]) {
            Ok(s) => s,
            Err(_) => c"",
        }
    }
}
