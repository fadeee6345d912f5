//! Locating the operator that splits a piece of text at one tier of the grammar.

use std::ops::Range;

/// The direction to scan the text in.
///
/// Left-associative tiers scan right to left, so the rightmost operator becomes the root and
/// everything before it is parsed again at the same tier. The right-associative tier scans left to
/// right for the mirrored effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Direction {
    /// Returns the index visited at step `step` of a scan over `range`.
    fn index(self, range: &Range<usize>, step: usize) -> usize {
        match self {
            Self::LeftToRight => range.start + step,
            Self::RightToLeft => range.end - 1 - step,
        }
    }

    /// The parenthesis that opens a group when met first in this direction, and the one that
    /// closes it.
    fn parens(self) -> (u8, u8) {
        match self {
            Self::LeftToRight => (b'(', b')'),
            Self::RightToLeft => (b')', b'('),
        }
    }
}

/// A parenthesis with no partner, found while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unbalanced {
    /// Index of the parenthesis.
    pub at: usize,

    /// Whether it is an opening parenthesis `(`.
    pub opening: bool,
}

/// Returns true if the byte before index `at` can end an operand. A `+` or `-` is only a binary
/// operator in that case; anywhere else it is the sign of a literal.
fn follows_operand(text: &[u8], start: usize, at: usize) -> bool {
    at > start && !matches!(text[at - 1], b'+' | b'-' | b'*' | b'/' | b'^' | b'(' | b'e' | b'E')
}

/// Scans `text[range]` in the given direction for the first of `ops` that is outside of all
/// parentheses, and returns its index.
///
/// Returns `Ok(None)` if there is no such operator and the parentheses in the range balance. A
/// parenthesis whose partner cannot be found in the scanned part of the range is an error.
pub fn find_split(
    text: &[u8],
    range: Range<usize>,
    ops: &[u8],
    direction: Direction,
) -> Result<Option<usize>, Unbalanced> {
    let (open, close) = direction.parens();
    let mut groups = Vec::new();

    for step in 0..range.len() {
        let i = direction.index(&range, step);
        let byte = text[i];
        if byte == open {
            groups.push(i);
        } else if byte == close {
            if groups.pop().is_none() {
                return Err(Unbalanced { at: i, opening: byte == b'(' });
            }
        } else if groups.is_empty() && ops.contains(&byte) {
            let is_sign = matches!(byte, b'+' | b'-');
            if !is_sign || follows_operand(text, range.start, i) {
                return Ok(Some(i));
            }
        }
    }

    match groups.first() {
        Some(&at) => Err(Unbalanced { at, opening: text[at] == b'(' }),
        None => Ok(None),
    }
}

/// Returns the index of the `)` matching the `(` at index `open`, searching up to `end`.
pub fn matching_close(text: &[u8], open: usize, end: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &byte) in text.iter().enumerate().take(end).skip(open) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            },
            _ => {},
        }
    }
    None
}
