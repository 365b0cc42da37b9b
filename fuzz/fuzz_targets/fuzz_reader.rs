#![no_main]
use std::collections::VecDeque;
use std::task::Poll;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serialtok::{ReaderOptions, TokenError, TokenReader};

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Op {
    Char,
    Skip,
    Word,
    Integer,
    Comma,
    Line,
}

#[derive(Debug, Arbitrary)]
struct Case {
    keep_carriage_return: bool,
    skip_whitespace_before_comma: bool,
    budget: u8,
    /// Each chunk arrives before the next op is polled.
    chunks: Vec<Vec<u8>>,
    ops: Vec<Op>,
}

const CAPACITY: usize = 8;

fuzz_target!(|case: Case| {
    let options = ReaderOptions {
        keep_carriage_return: case.keep_carriage_return,
        skip_whitespace_before_comma: case.skip_whitespace_before_comma,
        poll_budget: std::num::NonZeroUsize::new(usize::from(case.budget)),
    };
    let mut reader: TokenReader<VecDeque<u8>, CAPACITY> =
        TokenReader::with_options(VecDeque::new(), options);
    let mut chunks = case.chunks.into_iter();
    let mut ops = case.ops.into_iter();
    let Some(mut op) = ops.next() else { return };

    loop {
        let done = match op {
            Op::Char => reader.read_char().map(|_| ()),
            Op::Skip => reader.skip_whitespace(),
            Op::Word => reader.read_word().map(check),
            Op::Integer => reader.read_integer().map(|r| check(r.map(|_| ()))),
            Op::Comma => reader.read_comma().map(check),
            Op::Line => reader.read_line().map(check),
        };
        assert!(reader.token().len() < CAPACITY);
        if done.is_ready() {
            if matches!(op, Op::Line) && !options.keep_carriage_return {
                assert!(!reader.token().contains(&b'\r'));
            }
            match ops.next() {
                Some(next) => op = next,
                None => return,
            }
        } else {
            match chunks.next() {
                Some(chunk) => reader.source_mut().extend(chunk),
                None => return,
            }
        }
    }
});

fn check(result: Result<(), TokenError>) {
    if let Err(TokenError::BufferOverflow { captured }) = result {
        assert_eq!(captured, CAPACITY - 1);
    }
}
