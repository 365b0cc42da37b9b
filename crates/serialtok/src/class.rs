//! Byte classification shared by the token operations.
//!
//! Everything here is plain ASCII: the reader has no notion of multi-byte
//! encodings, so any byte outside these classes is ordinary token content.

/// Line terminator for [`read_line`](crate::TokenReader::read_line).
pub const NEWLINE: u8 = b'\n';
/// Carriage return. Dropped from lines unless
/// [`keep_carriage_return`](crate::ReaderOptions::keep_carriage_return) is set.
pub const CARRIAGE_RETURN: u8 = b'\r';
/// The literal expected by [`read_comma`](crate::TokenReader::read_comma).
pub const COMMA: u8 = b',';

/// Space and horizontal tab. Line breaks are not whitespace: they only end
/// lines.
#[inline]
#[must_use]
pub const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t')
}

/// `0` through `9`.
#[inline]
#[must_use]
pub const fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// `+` or `-`, accepted only as the first byte of an integer.
#[inline]
#[must_use]
pub const fn is_sign(b: u8) -> bool {
    matches!(b, b'+' | b'-')
}
