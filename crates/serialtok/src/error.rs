use thiserror::Error;

/// Why a completed token read failed.
///
/// "No byte available yet" is never an error: it is reported as
/// [`Poll::Pending`](core::task::Poll::Pending). Whatever was captured before
/// the failure stays readable through
/// [`TokenReader::token`](crate::TokenReader::token).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenError {
    /// The token did not fit the buffer; `captured` bytes were kept.
    #[error("token exceeds buffer capacity after {captured} bytes")]
    BufferOverflow {
        /// Bytes stored before the buffer filled.
        captured: usize,
    },
    /// A delimiter was expected but another byte was found. The byte is left
    /// pushed back.
    #[error("expected {:?}, found {:?}", as_char(.expected), as_char(.found))]
    MissingDelimiter {
        /// The delimiter that was expected.
        expected: u8,
        /// The byte that was read instead.
        found: u8,
    },
    /// An integer ended before any digit. The terminating byte is left pushed
    /// back.
    #[error("expected a digit, found {:?}", as_char(.found))]
    NoDigitsFound {
        /// The byte that ended the integer.
        found: u8,
    },
    /// The digits do not fit an `i32`.
    #[error("integer out of range")]
    IntegerOutOfRange,
}

fn as_char(b: &u8) -> char {
    char::from(*b)
}
