#![allow(missing_docs, dead_code)]

use core::task::Poll;

use serialtok::{TokenReader, Trickle};

/// Polls `op` until it completes, letting one more byte arrive after every
/// `Pending`. Returns the result and how many polls it took.
pub fn drive<'a, T, const N: usize>(
    reader: &mut TokenReader<Trickle<'a>, N>,
    mut op: impl FnMut(&mut TokenReader<Trickle<'a>, N>) -> Poll<T>,
) -> (T, usize) {
    let mut polls = 0;
    loop {
        polls += 1;
        if let Poll::Ready(v) = op(reader) {
            return (v, polls);
        }
        assert_eq!(
            reader.source_mut().release(1),
            1,
            "input ran out before the read completed"
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Skip,
    Word,
    Integer,
    Comma,
    Line,
}

/// Runs `ops` in order over `input` arriving one byte at a time and renders
/// one line per completed read.
pub fn render_session(input: &[u8], ops: &[Op]) -> String {
    let mut reader: TokenReader<_> = TokenReader::new(Trickle::new(input));
    let mut out = Vec::with_capacity(ops.len());
    for op in ops {
        let line = match op {
            Op::Skip => {
                drive(&mut reader, TokenReader::skip_whitespace);
                "skip".to_string()
            }
            Op::Word => {
                let (r, _) = drive(&mut reader, TokenReader::read_word);
                format!("word {r:?} {:?}", reader.token())
            }
            Op::Integer => {
                let (r, _) = drive(&mut reader, TokenReader::read_integer);
                format!("integer {r:?} {:?}", reader.token())
            }
            Op::Comma => {
                let (r, _) = drive(&mut reader, TokenReader::read_comma);
                format!("comma {r:?}")
            }
            Op::Line => {
                let (r, _) = drive(&mut reader, TokenReader::read_line);
                format!("line {r:?} {:?}", reader.token())
            }
        };
        out.push(line);
    }
    out.join("\n")
}
