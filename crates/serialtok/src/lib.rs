//! A non-blocking, resumable token reader over a polled byte stream.
//!
//! [`TokenReader`] pulls bytes one at a time from a [`ByteSource`] and
//! assembles them into command-line tokens: single bytes, whitespace-delimited
//! words, signed integers, literal commas and whole lines. Every operation is a
//! step function returning [`Poll`](core::task::Poll): `Pending` means no byte
//! is obtainable right now and the same operation must be called again later,
//! so a cooperative scheduler can interleave token reads with other work
//! without ever blocking.
//!
//! The reader owns a single fixed-capacity buffer (64 bytes unless chosen
//! otherwise) and a one-byte pushback slot. It never allocates.
//!
//! ```rust
//! use core::task::Poll;
//! use serialtok::{SliceSource, TokenReader};
//!
//! let mut reader: TokenReader<_> = TokenReader::new(SliceSource::new(b"led 13,on\n"));
//! assert_eq!(reader.read_word(), Poll::Ready(Ok(())));
//! assert_eq!(reader.token(), "led");
//! assert_eq!(reader.skip_whitespace(), Poll::Ready(()));
//! assert_eq!(reader.read_integer(), Poll::Ready(Ok(13)));
//! assert_eq!(reader.read_comma(), Poll::Ready(Ok(())));
//! assert_eq!(reader.read_line(), Poll::Ready(Ok(())));
//! assert_eq!(reader.token(), "on");
//! ```

#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(test)]
extern crate std;

/// Forwards to `tracing` when the `tracing` feature is enabled and compiles to
/// nothing otherwise.
macro_rules! log {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        tracing::$level!($($arg)+);
    }};
}

pub mod class;
mod error;
mod options;
mod reader;
mod source;

#[cfg(test)]
mod tests;

pub use error::TokenError;
pub use options::ReaderOptions;
pub use reader::{DEFAULT_CAPACITY, TokenReader};
pub use source::{ByteSource, SliceSource, Trickle};
