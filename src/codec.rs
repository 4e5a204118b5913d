//! Character-code sequences and code ranges.

/// Ordered character codes (Unicode scalar values) of a string.
///
/// The sequence has one code per `char`, so its length is the string's
/// character count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodeSequence(Vec<u32>);

impl CodeSequence {
    /// Encodes a string into its character codes.
    pub fn encode(s: &str) -> Self {
        Self(s.chars().map(u32::from).collect())
    }

    /// Decodes the sequence back into a string.
    ///
    /// Codes that are not valid Unicode scalar values are skipped.
    pub fn decode(&self) -> String {
        self.0.iter().filter_map(|&c| char::from_u32(c)).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl From<&str> for CodeSequence {
    fn from(s: &str) -> Self {
        Self::encode(s)
    }
}

impl From<Vec<u32>> for CodeSequence {
    fn from(codes: Vec<u32>) -> Self {
        Self(codes)
    }
}

impl FromIterator<u32> for CodeSequence {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Lowercases a single code.
///
/// The code is left untouched when it is not a valid `char` or when its
/// lowercase form is not exactly one character, so folding never changes the
/// length of a sequence.
pub fn fold_case(code: u32) -> u32 {
    let Some(c) = char::from_u32(code) else {
        return code;
    };
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => u32::from(l),
        _ => code,
    }
}

/// Integer interval, closed or half-open at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: u32,
    pub end: u32,
    pub end_inclusive: bool,
}

impl Range {
    pub const fn inclusive(start: u32, end: u32) -> Self {
        assert!(start <= end, "range start must not exceed end");
        Self { start, end, end_inclusive: true }
    }

    pub const fn exclusive(start: u32, end: u32) -> Self {
        assert!(start <= end, "range start must not exceed end");
        Self { start, end, end_inclusive: false }
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= self.start
            && if self.end_inclusive {
                value <= self.end
            } else {
                value < self.end
            }
    }
}

pub const ASCII_UPPERCASE: Range = Range::inclusive(65, 90);
pub const ASCII_LOWERCASE: Range = Range::inclusive(97, 122);
pub const ASCII_DIGITS: Range = Range::inclusive(48, 57);
