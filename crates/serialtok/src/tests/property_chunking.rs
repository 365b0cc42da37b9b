use std::vec::Vec;

use quickcheck::QuickCheck;

use super::utils::transcript;
use crate::{SliceSource, TokenReader, Trickle};

/// Bytes the generated inputs are drawn from, weighted towards delimiters so
/// every token kind and error path shows up.
const ALPHABET: &[u8] = b"ab 1-,\n\r\t9+x ,\n0";

fn to_input(raw: &[u8]) -> Vec<u8> {
    raw.iter()
        .map(|b| ALPHABET[usize::from(*b) % ALPHABET.len()])
        .collect()
}

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: however the input is split into arrivals, the reader produces
/// the same sequence of tokens as when all of it is available up front.
#[test]
fn chunked_arrival_matches_whole_input() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(raw: Vec<u8>, splits: Vec<usize>) -> bool {
        let input = to_input(&raw);
        let max_steps = input.len() * 2 + 12;

        let mut whole: TokenReader<_, 8> = TokenReader::new(SliceSource::new(&input));
        let expected = transcript(&mut whole, |_| false, max_steps);

        let mut splits = splits.into_iter();
        let mut chunked: TokenReader<_, 8> = TokenReader::new(Trickle::new(&input));
        let actual = transcript(
            &mut chunked,
            |src| {
                let n = splits.next().map_or(1, |s| 1 + s % 5);
                src.release(n) > 0
            },
            max_steps,
        );

        if expected != actual {
            std::dbg!(&input, &expected, &actual);
        }
        expected == actual
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>, Vec<usize>) -> bool);
}

/// Property: no token is ever longer than the buffer allows, and the terminated
/// view always agrees with the byte view when the token has no NUL.
#[test]
fn tokens_respect_capacity() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(raw: Vec<u8>) -> bool {
        let input = to_input(&raw);
        let mut reader: TokenReader<_, 4> = TokenReader::new(SliceSource::new(&input));
        let mut ok = true;
        for _ in 0..input.len() + 1 {
            let _ = reader.read_line();
            let token = reader.token();
            ok &= token.len() <= reader.capacity();
            ok &= reader.token_c_str().to_bytes() == token;
        }
        ok
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}
