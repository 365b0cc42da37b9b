use core::num::NonZeroUsize;

/// Configuration options for a [`TokenReader`](crate::TokenReader).
///
/// The buffer capacity is not an option: it is the reader's const parameter
/// and fixed at compile time.
///
/// # Examples
///
/// ```rust
/// use serialtok::{ReaderOptions, SliceSource, TokenReader};
///
/// let options = ReaderOptions {
///     skip_whitespace_before_comma: true,
///     ..Default::default()
/// };
/// let reader: TokenReader<_> = TokenReader::with_options(SliceSource::new(b""), options);
/// ```
///
/// # Default
///
/// All flags default to `false` and there is no poll budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderOptions {
    /// Whether `\r` bytes are kept as ordinary line content.
    ///
    /// By default every carriage return is dropped from lines read with
    /// [`read_line`](crate::TokenReader::read_line), so `"ok\r\n"` and `"ok\n"`
    /// both yield `ok`. Terminals that send a bare `\r` for Enter still need a
    /// `\n` to complete a line.
    ///
    /// # Default
    ///
    /// `false`
    pub keep_carriage_return: bool,

    /// Whether [`read_comma`](crate::TokenReader::read_comma) skips spaces and
    /// tabs before the comma.
    ///
    /// By default the comma must be the very next byte; callers that allow
    /// `1 , 2` call [`skip_whitespace`](crate::TokenReader::skip_whitespace)
    /// first or enable this.
    ///
    /// # Default
    ///
    /// `false`
    pub skip_whitespace_before_comma: bool,

    /// Maximum number of bytes a single call may take from the source.
    ///
    /// `None` keeps reading for as long as the source reports a byte ready. A
    /// budget bounds the time spent per call when the source can refill faster
    /// than the reader drains it. A pending pushback byte does not count.
    ///
    /// # Default
    ///
    /// `None`
    pub poll_budget: Option<NonZeroUsize>,
}
