//! Resumable token reads over a [`ByteSource`].
//!
//! Overview
//! - Each token operation is a step function. A call consumes bytes for as
//!   long as the source has them (or until the poll budget runs out) and then
//!   either completes with `Poll::Ready` or returns `Poll::Pending` with its
//!   progress kept in the reader. Calling the same operation again resumes
//!   where it left off.
//! - `Pending` only ever means "no byte right now". Malformed input completes
//!   with `Ready(Err(_))`.
//!
//! Lookahead
//! - A delimiter that ends a token but belongs to the next one (the space after
//!   a word, the comma after an integer) is pushed back into a one-byte slot.
//!   The next read takes that byte before asking the source for more, so input
//!   order is preserved across token boundaries.
//!
//! Buffer sharing
//! - Words, integers and lines accumulate into one fixed buffer. The finished
//!   token is exposed through [`TokenReader::token`] and stays readable until
//!   the next accumulating read starts. Completion values never borrow the
//!   reader, so a caller can poll in a loop and look at the token afterwards.
//! - Only one accumulating read may be in flight. Starting a different kind
//!   while one is incomplete abandons the incomplete one.

use core::task::Poll;

use bstr::BStr;

use crate::{
    ByteSource, ReaderOptions, TokenError,
    class::{self, CARRIAGE_RETURN, COMMA, NEWLINE},
};

mod buffer;


use buffer::TokenBuffer;

/// Buffer capacity used when none is given, terminator included.
pub const DEFAULT_CAPACITY: usize = 64;

/// Which accumulating read owns the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InFlight {
    Idle,
    Word,
    Integer,
    /// `discarding` is set once the line overflowed; the rest of it is dropped
    /// up to the newline.
    Line {
        discarding: bool,
    },
}

impl InFlight {
    fn same_kind(self, other: Self) -> bool {
        core::mem::discriminant(&self) == core::mem::discriminant(&other)
    }

    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    fn name(self) -> &'static str {
        match self {
            InFlight::Idle => "idle",
            InFlight::Word => "word",
            InFlight::Integer => "integer",
            InFlight::Line { .. } => "line",
        }
    }
}

/// Bytes a single call may still take from the source.
#[derive(Debug, Clone, Copy)]
struct Budget(Option<usize>);

impl Budget {
    fn is_spent(self) -> bool {
        self.0 == Some(0)
    }

    fn spend(&mut self) {
        if let Some(n) = &mut self.0 {
            *n = n.saturating_sub(1);
        }
    }
}

/// A non-blocking tokenizer bound to one byte source.
///
/// `N` is the buffer capacity including the terminator slot, so tokens of up
/// to `N - 1` bytes fit. It must be at least 2.
///
/// ```rust
/// use core::task::Poll;
/// use serialtok::{TokenReader, Trickle};
///
/// let mut reader: TokenReader<_> = TokenReader::new(Trickle::new(b"-40 "));
/// assert_eq!(reader.read_integer(), Poll::Pending);
///
/// reader.source_mut().release(2);
/// assert_eq!(reader.read_integer(), Poll::Pending);
///
/// reader.source_mut().release_all();
/// assert_eq!(reader.read_integer(), Poll::Ready(Ok(-40)));
/// assert_eq!(reader.pending_byte(), Some(b' '));
/// ```
#[derive(Debug)]
pub struct TokenReader<S, const N: usize = DEFAULT_CAPACITY> {
    source: S,
    buffer: TokenBuffer<N>,
    pushback: Option<u8>,
    in_flight: InFlight,
    options: ReaderOptions,
}

impl<S: ByteSource, const N: usize> TokenReader<S, N> {
    /// Creates a reader over `source` with default options.
    pub fn new(source: S) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    /// Creates a reader over `source`.
    pub fn with_options(source: S, options: ReaderOptions) -> Self {
        Self {
            source,
            buffer: TokenBuffer::new(),
            pushback: None,
            in_flight: InFlight::Idle,
            options,
        }
    }

    /// Largest token, in bytes, that fits the buffer.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        TokenBuffer::<N>::CONTENT
    }

    /// The options this reader was built with.
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The underlying source, mutably. Reading from it directly bypasses the
    /// pushback slot.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Returns the source. A byte still held in the pushback slot is lost.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// The byte held back for the next read, if any.
    pub fn pending_byte(&self) -> Option<u8> {
        self.pushback
    }

    /// `true` while a word, integer or line read has started but not finished.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight != InFlight::Idle
    }

    /// The last finished word, integer text or line.
    ///
    /// After a failed read this is whatever was captured before the failure.
    /// The view is replaced as soon as the next word, integer or line read
    /// starts.
    pub fn token(&self) -> &BStr {
        BStr::new(self.buffer.token())
    }

    /// [`token`](Self::token) as a NUL-terminated string, cut at the first NUL
    /// byte the token contains.
    pub fn token_c_str(&self) -> &core::ffi::CStr {
        self.buffer.token_c_str()
    }

    /// Drops a partially read word, integer or line.
    ///
    /// The pushback slot is left alone, so no byte that was already looked at
    /// but not claimed is lost.
    pub fn abandon(&mut self) {
        if self.in_flight != InFlight::Idle {
            log!(
                debug,
                kind = self.in_flight.name(),
                partial = ?BStr::new(self.buffer.pending()),
                "abandoning in-flight token"
            );
            self.buffer.begin();
            self.in_flight = InFlight::Idle;
        }
    }

    /// Reads one byte, preferring the pushback slot over the source.
    pub fn read_char(&mut self) -> Poll<u8> {
        let mut budget = self.budget();
        match self.next_byte(&mut budget) {
            Some(b) => Poll::Ready(b),
            None => Poll::Pending,
        }
    }

    /// Discards spaces and tabs.
    ///
    /// Completes on the first other byte, which is pushed back for the next
    /// read. Calling it again right away completes immediately without
    /// consuming anything.
    pub fn skip_whitespace(&mut self) -> Poll<()> {
        let mut budget = self.budget();
        loop {
            let Some(b) = self.next_byte(&mut budget) else {
                return Poll::Pending;
            };
            if !class::is_whitespace(b) {
                self.push_back(b);
                return Poll::Ready(());
            }
        }
    }

    /// Reads a word: bytes up to the next space or tab.
    ///
    /// The delimiter is pushed back and the word is available from
    /// [`token`](Self::token). Line breaks are ordinary word bytes. Leading
    /// whitespace is not skipped; an immediate delimiter yields an empty word.
    ///
    /// # Errors
    ///
    /// [`TokenError::BufferOverflow`] when the word is longer than the buffer.
    /// The bytes that fit are kept as the token and the first byte that did not
    /// fit is pushed back.
    pub fn read_word(&mut self) -> Poll<Result<(), TokenError>> {
        self.enter(InFlight::Word);
        let mut budget = self.budget();
        loop {
            let Some(b) = self.next_byte(&mut budget) else {
                return Poll::Pending;
            };
            if class::is_whitespace(b) {
                self.push_back(b);
                self.complete();
                return Poll::Ready(Ok(()));
            }
            if self.buffer.push(b).is_err() {
                self.push_back(b);
                return Poll::Ready(Err(self.overflowed()));
            }
        }
    }

    /// Reads a decimal integer with an optional leading `+` or `-`.
    ///
    /// The first byte that cannot continue the integer is pushed back. The
    /// integer text is available from [`token`](Self::token).
    ///
    /// # Errors
    ///
    /// - [`TokenError::NoDigitsFound`] when the integer ends before a digit.
    /// - [`TokenError::IntegerOutOfRange`] when the value does not fit `i32`.
    /// - [`TokenError::BufferOverflow`] when the digits do not fit the buffer;
    ///   the first byte that did not fit is pushed back.
    pub fn read_integer(&mut self) -> Poll<Result<i32, TokenError>> {
        self.enter(InFlight::Integer);
        let mut budget = self.budget();
        loop {
            let Some(b) = self.next_byte(&mut budget) else {
                return Poll::Pending;
            };
            let continues =
                class::is_digit(b) || (self.buffer.len() == 0 && class::is_sign(b));
            if !continues {
                self.push_back(b);
                let parsed = parse_integer(self.buffer.pending(), b);
                self.complete();
                #[cfg(feature = "tracing")]
                if let Err(err) = parsed {
                    log!(debug, error = %err, "integer rejected");
                }
                return Poll::Ready(parsed);
            }
            if self.buffer.push(b).is_err() {
                self.push_back(b);
                return Poll::Ready(Err(self.overflowed()));
            }
        }
    }

    /// Reads one literal `,`.
    ///
    /// Whitespace before the comma is only skipped when
    /// [`ReaderOptions::skip_whitespace_before_comma`] is set.
    ///
    /// # Errors
    ///
    /// [`TokenError::MissingDelimiter`] when another byte is found; that byte is
    /// pushed back.
    pub fn read_comma(&mut self) -> Poll<Result<(), TokenError>> {
        let mut budget = self.budget();
        loop {
            let Some(b) = self.next_byte(&mut budget) else {
                return Poll::Pending;
            };
            if b == COMMA {
                return Poll::Ready(Ok(()));
            }
            if self.options.skip_whitespace_before_comma && class::is_whitespace(b) {
                continue;
            }
            self.push_back(b);
            let err = TokenError::MissingDelimiter {
                expected: COMMA,
                found: b,
            };
            log!(debug, error = %err, "comma missing");
            return Poll::Ready(Err(err));
        }
    }

    /// Reads everything up to and including the next `\n`.
    ///
    /// The newline is consumed but not stored; the line is available from
    /// [`token`](Self::token). Carriage returns are dropped unless
    /// [`ReaderOptions::keep_carriage_return`] is set.
    ///
    /// # Errors
    ///
    /// [`TokenError::BufferOverflow`] when the line is longer than the buffer.
    /// The rest of the line is still consumed and discarded, so the next read
    /// starts at the beginning of the following line. The bytes that fit are
    /// kept as the token.
    pub fn read_line(&mut self) -> Poll<Result<(), TokenError>> {
        self.enter(InFlight::Line { discarding: false });
        let mut budget = self.budget();
        loop {
            let Some(b) = self.next_byte(&mut budget) else {
                return Poll::Pending;
            };
            match b {
                NEWLINE => {
                    if self.in_flight == (InFlight::Line { discarding: true }) {
                        return Poll::Ready(Err(self.overflowed()));
                    }
                    self.complete();
                    return Poll::Ready(Ok(()));
                }
                CARRIAGE_RETURN if !self.options.keep_carriage_return => {}
                _ => {
                    if self.buffer.push(b).is_err()
                        && self.in_flight == (InFlight::Line { discarding: false })
                    {
                        log!(
                            debug,
                            captured = self.buffer.len(),
                            "line overflow, discarding to newline"
                        );
                        self.in_flight = InFlight::Line { discarding: true };
                    }
                }
            }
        }
    }

    fn budget(&self) -> Budget {
        Budget(self.options.poll_budget.map(core::num::NonZeroUsize::get))
    }

    /// Next byte from the pushback slot or, budget permitting, the source.
    fn next_byte(&mut self, budget: &mut Budget) -> Option<u8> {
        if let Some(b) = self.pushback.take() {
            return Some(b);
        }
        if budget.is_spent() || !self.source.byte_available() {
            return None;
        }
        budget.spend();
        Some(self.source.read_byte())
    }

    fn push_back(&mut self, b: u8) {
        debug_assert!(
            self.pushback.is_none(),
            "pushback slot already holds {:?}",
            self.pushback
        );
        self.pushback = Some(b);
    }

    /// Claims the buffer for `kind`, abandoning a different in-flight read.
    fn enter(&mut self, kind: InFlight) {
        if self.in_flight.same_kind(kind) {
            return;
        }
        if self.in_flight != InFlight::Idle {
            log!(
                warn,
                abandoned = self.in_flight.name(),
                started = kind.name(),
                "token read switched kinds mid-token"
            );
        }
        self.buffer.begin();
        self.in_flight = kind;
    }

    fn complete(&mut self) {
        self.buffer.finish();
        log!(
            trace,
            kind = self.in_flight.name(),
            token = ?BStr::new(self.buffer.token()),
            "token complete"
        );
        self.in_flight = InFlight::Idle;
    }

    fn overflowed(&mut self) -> TokenError {
        let captured = self.buffer.finish();
        let err = TokenError::BufferOverflow { captured };
        log!(debug, kind = self.in_flight.name(), error = %err, "token overflow");
        self.in_flight = InFlight::Idle;
        err
    }
}

/// Converts accumulated integer text. `terminator` is the byte that ended it.
fn parse_integer(text: &[u8], terminator: u8) -> Result<i32, TokenError> {
    let (negative, digits) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, text),
    };
    if digits.is_empty() {
        return Err(TokenError::NoDigitsFound { found: terminator });
    }
    // Accumulate towards the sign so `i32::MIN` is representable.
    digits.iter().try_fold(0i32, |acc, &d| {
        let d = i32::from(d - b'0');
        acc.checked_mul(10)
            .and_then(|v| if negative { v.checked_sub(d) } else { v.checked_add(d) })
            .ok_or(TokenError::IntegerOutOfRange)
    })
}
