//! String metrics over character-code sequences.

use crate::codec::{fold_case, CodeSequence, Range, ASCII_DIGITS, ASCII_LOWERCASE, ASCII_UPPERCASE};

/// Length of the longest run where each code is one greater than the one
/// before it, ignoring case ("aBc" is a run of 3).
pub fn longest_consecutive_run(seq: &CodeSequence) -> usize {
    longest_run(seq, |prev, code| prev.checked_add(1) == Some(code))
}

/// Length of the longest run of equal codes, ignoring case.
pub fn longest_repeated_run(seq: &CodeSequence) -> usize {
    longest_run(seq, |prev, code| prev == code)
}

/// Lowercases the whole sequence at once so context-dependent mappings apply
/// (a word-final capital sigma becomes `ς`). When that changes the number of
/// codes, or the sequence holds codes that are not characters, every code is
/// folded on its own instead so positions still line up.
fn folded(seq: &CodeSequence) -> CodeSequence {
    let lowered = CodeSequence::encode(&seq.decode().to_lowercase());
    if lowered.len() == seq.len() {
        lowered
    } else {
        seq.iter().map(fold_case).collect()
    }
}

/// Single forward pass keeping the previous code and the longest run seen.
/// A transition that breaks the run restarts it at 1.
fn longest_run(seq: &CodeSequence, extends: impl Fn(u32, u32) -> bool) -> usize {
    let lowered = folded(seq);
    let mut codes = lowered.iter();
    let Some(mut prev) = codes.next() else {
        return 0;
    };

    let mut current = 1;
    let mut longest = 1;
    for code in codes {
        if extends(prev, code) {
            current += 1;
        } else {
            current = 1;
        }
        longest = longest.max(current);
        prev = code;
    }
    longest
}

fn count_in(seq: &CodeSequence, range: Range) -> usize {
    seq.iter().filter(|&code| range.contains(code)).count()
}

/// Number of ASCII uppercase letters.
pub fn count_uppercase(seq: &CodeSequence) -> usize {
    count_in(seq, ASCII_UPPERCASE)
}

/// Number of ASCII lowercase letters.
pub fn count_lowercase(seq: &CodeSequence) -> usize {
    count_in(seq, ASCII_LOWERCASE)
}

/// Number of ASCII digits.
pub fn count_digits(seq: &CodeSequence) -> usize {
    count_in(seq, ASCII_DIGITS)
}
