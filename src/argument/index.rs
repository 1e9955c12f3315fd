//! # Index Resolution
//!
//! Turns a textual offset into a bounds-checked position. Negative offsets
//! count from the end. Two bounds policies exist because addressing an
//! element and addressing an insertion point differ by one:
//!
//! | Policy     | Valid range | Used by                       |
//! |------------|-------------|-------------------------------|
//! | `Element`  | `[0, N)`    | Erase, Item, Replace          |
//! | `Position` | `[0, N]`    | Insert, Splice boundaries     |

use std::fmt;

use crate::errors::{ErrorKind, SeqError};

/// Bounds rule applied when resolving an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexPolicy {
    /// The index must reference an existing element.
    Element,
    /// The index may also be one past the last element.
    Position,
}

impl IndexPolicy {
    /// Largest position accepted for a sequence of `length` elements, if any.
    fn upper_bound(self, length: usize) -> Option<usize> {
        match self {
            IndexPolicy::Element => length.checked_sub(1),
            IndexPolicy::Position => Some(length),
        }
    }
}

impl fmt::Display for IndexPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexPolicy::Element => write!(f, "element"),
            IndexPolicy::Position => write!(f, "position"),
        }
    }
}

/// Parses a trimmed base-10 signed integer. Anything else, including an empty
/// string or trailing characters, is `None`.
pub fn parse_integer(token: &str) -> Option<i64> {
    token.trim().parse::<i64>().ok()
}

/// Resolves `token` against a sequence of `length` elements.
///
/// An empty sequence resolves every well-formed integer to `0` under both
/// policies. Out-of-range input is an error; nothing is clamped here.
pub fn resolve_index(token: &str, length: usize, policy: IndexPolicy) -> Result<usize, SeqError> {
    let invalid = || {
        SeqError::in_argument(
            ErrorKind::InvalidIndex {
                token: token.trim().to_string(),
                length,
                policy,
            },
            token,
        )
    };

    let value = parse_integer(token).ok_or_else(invalid)?;
    if length == 0 {
        return Ok(0);
    }

    let position = offset_from(value, length).ok_or_else(invalid)?;
    match policy.upper_bound(length) {
        Some(max) if position <= max => Ok(position),
        _ => Err(invalid()),
    }
}

/// Maps a signed offset onto `0..`: negative values count back from `length`.
/// Returns `None` when the offset falls before the start.
pub(crate) fn offset_from(value: i64, length: usize) -> Option<usize> {
    if value >= 0 {
        usize::try_from(value).ok()
    } else {
        let back = usize::try_from(value.unsigned_abs()).ok()?;
        length.checked_sub(back)
    }
}
