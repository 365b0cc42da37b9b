use core::task::Poll;
use std::{format, string::String, vec::Vec};

use crate::{ByteSource, TokenReader, Trickle};

/// Polls `op` until it completes, releasing one more byte of input after
/// every `Pending`.
pub fn drive<'a, T, const N: usize>(
    reader: &mut TokenReader<Trickle<'a>, N>,
    mut op: impl FnMut(&mut TokenReader<Trickle<'a>, N>) -> Poll<T>,
) -> T {
    loop {
        if let Poll::Ready(v) = op(reader) {
            return v;
        }
        assert_eq!(
            reader.source_mut().release(1),
            1,
            "input ran out before the read completed"
        );
    }
}

/// The read cycle a simple `name value,rest` command prompt would run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Skip,
    Word,
    Integer,
    Comma,
    Line,
}

pub const COMMAND_CYCLE: [Op; 6] = [
    Op::Skip,
    Op::Word,
    Op::Skip,
    Op::Integer,
    Op::Comma,
    Op::Line,
];

/// Runs `op` once and renders a completed result, token included.
pub fn step<S: ByteSource, const N: usize>(
    reader: &mut TokenReader<S, N>,
    op: Op,
) -> Poll<String> {
    match op {
        Op::Skip => reader.skip_whitespace().map(|()| String::from("skip")),
        Op::Word => reader
            .read_word()
            .map(|r| format!("word {r:?} {:?}", reader.token())),
        Op::Integer => reader
            .read_integer()
            .map(|r| format!("integer {r:?} {:?}", reader.token())),
        Op::Comma => reader.read_comma().map(|r| format!("comma {r:?}")),
        Op::Line => reader
            .read_line()
            .map(|r| format!("line {r:?} {:?}", reader.token())),
    }
}

/// Cycles through [`COMMAND_CYCLE`], calling `refill` whenever a read is
/// pending. Stops once a read is pending and `refill` returns `false`.
pub fn transcript<S: ByteSource, const N: usize>(
    reader: &mut TokenReader<S, N>,
    mut refill: impl FnMut(&mut S) -> bool,
    max_steps: usize,
) -> Vec<String> {
    let mut lines = Vec::new();
    for op in COMMAND_CYCLE.iter().copied().cycle().take(max_steps) {
        loop {
            match step(reader, op) {
                Poll::Ready(line) => {
                    lines.push(line);
                    break;
                }
                Poll::Pending if refill(reader.source_mut()) => {}
                Poll::Pending => return lines,
            }
        }
    }
    lines
}
