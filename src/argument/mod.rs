//! # Argument Decoding
//!
//! Every container member receives one opaque string. This module turns that
//! string into the shape the member needs before the container is touched,
//! so a failed decode never leaves a half-applied mutation behind.
//!
//! ## Module Structure
//!
//! - **`tokenizer`**: quote- and escape-aware splitting
//! - **`index`**: textual offset to bounds-checked position
//! - **`slice`**: start/end/stride slicing
//!
//! The field separator of fixed-shape arguments (an insert position, the two
//! operands of a replace, slice fields) is always `,`. The element delimiter
//! used for value lists is configurable per instance.

pub mod index;
pub mod slice;
pub mod tokenizer;

pub use index::{resolve_index, IndexPolicy};
pub use slice::{slice, SliceSpec};
pub use tokenizer::{escape, is_reserved, split, split_nonempty};

use tracing::trace;

use crate::errors::{ErrorKind, SeqError};

/// Separator between the fixed fields of an argument.
pub const FIELD_SEPARATOR: char = ',';

/// Element delimiter a fresh instance starts with.
pub const DEFAULT_DELIMITER: char = ',';

/// Most fields a slice argument may carry: start, end, stride.
const MAX_SLICE_FIELDS: usize = 3;

/// The argument shapes a member can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// One index, the whole argument (Erase, Item).
    Index(IndexPolicy),
    /// A position followed by values to insert there.
    Insert,
    /// A list of values split on the element delimiter (Append, Push, Add).
    Values,
    /// Exactly two comma-separated operands (Replace, key/value Add).
    TwoValues,
    /// Up to three slice fields (Splice).
    Slice,
}

impl OperationKind {
    fn name(self) -> &'static str {
        match self {
            OperationKind::Index(_) => "index",
            OperationKind::Insert => "insert",
            OperationKind::Values => "values",
            OperationKind::TwoValues => "two values",
            OperationKind::Slice => "slice",
        }
    }
}

/// A decoded argument, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedArgs {
    Index(usize),
    IndexAndValues { position: usize, values: Vec<String> },
    Values(Vec<String>),
    TwoValues(String, String),
    /// Raw slice fields, zero to three of them. Resolution happens in
    /// [`slice`] because slicing degrades to empty instead of failing.
    SliceSpec(Vec<String>),
}

impl DecodedArgs {
    /// Slices `source` when this is a slice argument; `None` otherwise.
    pub fn apply_slice<T: Clone>(&self, source: &[T]) -> Option<Vec<T>> {
        match self {
            DecodedArgs::SliceSpec(tokens) => Some(slice(source, tokens, source.len())),
            _ => None,
        }
    }
}

/// Decodes `raw` for an operation of `kind` on a sequence of `length` elements,
/// splitting value lists on `delimiter`.
pub fn decode_arguments(
    raw: &str,
    kind: OperationKind,
    length: usize,
    delimiter: char,
) -> Result<DecodedArgs, SeqError> {
    let decoded = match kind {
        OperationKind::Index(policy) => DecodedArgs::Index(resolve_index(raw, length, policy)?),
        OperationKind::Insert => {
            let (index, rest) = raw.split_once(FIELD_SEPARATOR).unwrap_or((raw, ""));
            let position = resolve_index(index, length, IndexPolicy::Position)?;
            DecodedArgs::IndexAndValues {
                position,
                values: split_values(rest, delimiter),
            }
        }
        OperationKind::Values => DecodedArgs::Values(split_values(raw, delimiter)),
        OperationKind::TwoValues => {
            let mut tokens = split(raw, &[FIELD_SEPARATOR]);
            if tokens.len() != 2 {
                return Err(arity_error(kind, "exactly 2 values", tokens.len(), raw));
            }
            let second = tokens.pop().unwrap_or_default();
            let first = tokens.pop().unwrap_or_default();
            DecodedArgs::TwoValues(first, second)
        }
        OperationKind::Slice => {
            let trimmed = raw.trim();
            let tokens = if trimmed.is_empty() {
                Vec::new()
            } else {
                split(trimmed, &[FIELD_SEPARATOR])
            };
            if tokens.len() > MAX_SLICE_FIELDS {
                return Err(arity_error(kind, "at most 3 fields", tokens.len(), raw));
            }
            DecodedArgs::SliceSpec(tokens)
        }
    };
    trace!(raw, ?kind, length, ?decoded, "decoded arguments");
    Ok(decoded)
}

/// An empty value list is a valid "nothing" rather than one empty value.
fn split_values(raw: &str, delimiter: char) -> Vec<String> {
    if raw.is_empty() {
        Vec::new()
    } else {
        split(raw, &[delimiter])
    }
}

fn arity_error(kind: OperationKind, expected: &str, found: usize, raw: &str) -> SeqError {
    SeqError::in_argument(
        ErrorKind::Decode {
            operation: kind.name().into(),
            expected: expected.into(),
            found,
        },
        raw,
    )
}

/// Per-instance decoder: carries the instance's element delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentDecoder {
    delimiter: char,
}

impl Default for ArgumentDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl ArgumentDecoder {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Reconfigures the delimiter from a call argument holding one character.
    /// Quotes and the backslash are rejected.
    pub fn set_delimiter(&mut self, raw: &str) -> Result<(), SeqError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !is_reserved(c) => {
                self.delimiter = c;
                Ok(())
            }
            _ => Err(SeqError::in_argument(
                ErrorKind::InvalidDelimiter {
                    value: raw.to_string(),
                },
                raw,
            )),
        }
    }

    pub fn decode(
        &self,
        raw: &str,
        kind: OperationKind,
        length: usize,
    ) -> Result<DecodedArgs, SeqError> {
        decode_arguments(raw, kind, length, self.delimiter)
    }

    /// Joins values with this decoder's delimiter, for rendering results.
    ///
    /// Each value is escaped, so splitting the output on the same delimiter
    /// gives the values back.
    pub fn join<I, S>(&self, values: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                out.push(self.delimiter);
            }
            out.push_str(&escape(value.as_ref(), &[self.delimiter]));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_index_uses_whole_argument() {
        let decoded = decode_arguments(" -1 ", OperationKind::Index(IndexPolicy::Element), 5, ',');
        assert_eq!(decoded.unwrap(), DecodedArgs::Index(4));
        assert!(decode_arguments("1,2", OperationKind::Index(IndexPolicy::Element), 5, ',').is_err());
    }

    #[test]
    fn insert_splits_on_first_comma() {
        let decoded = decode_arguments("2,X,Y", OperationKind::Insert, 4, ',').unwrap();
        assert_eq!(
            decoded,
            DecodedArgs::IndexAndValues {
                position: 2,
                values: strings(&["X", "Y"]),
            }
        );
    }

    #[test]
    fn insert_with_nothing_after_index() {
        for raw in ["2,", "2"] {
            let decoded = decode_arguments(raw, OperationKind::Insert, 4, ',').unwrap();
            assert_eq!(
                decoded,
                DecodedArgs::IndexAndValues {
                    position: 2,
                    values: vec![],
                }
            );
        }
    }

    #[test]
    fn insert_uses_element_delimiter_for_values() {
        let decoded = decode_arguments("4,a;b,c", OperationKind::Insert, 4, ';').unwrap();
        assert_eq!(
            decoded,
            DecodedArgs::IndexAndValues {
                position: 4,
                values: strings(&["a", "b,c"]),
            }
        );
    }

    #[test]
    fn insert_rejects_bad_position() {
        assert!(decode_arguments("5,X", OperationKind::Insert, 4, ',').is_err());
        assert!(decode_arguments("x,X", OperationKind::Insert, 4, ',').is_err());
    }

    #[test]
    fn two_values_requires_exactly_two() {
        assert!(decode_arguments("A", OperationKind::TwoValues, 3, ',').is_err());
        assert!(decode_arguments("A,B,C", OperationKind::TwoValues, 3, ',').is_err());
        assert_eq!(
            decode_arguments("A,\"B,C\"", OperationKind::TwoValues, 3, ',').unwrap(),
            DecodedArgs::TwoValues("A".into(), "B,C".into())
        );
    }

    #[test]
    fn two_values_ignores_element_delimiter() {
        assert_eq!(
            decode_arguments("k,v;w", OperationKind::TwoValues, 0, ';').unwrap(),
            DecodedArgs::TwoValues("k".into(), "v;w".into())
        );
    }

    #[test]
    fn slice_fields() {
        assert_eq!(
            decode_arguments("  ", OperationKind::Slice, 6, ',').unwrap(),
            DecodedArgs::SliceSpec(vec![])
        );
        assert_eq!(
            decode_arguments(" 0,6,2 ", OperationKind::Slice, 6, ',').unwrap(),
            DecodedArgs::SliceSpec(strings(&["0", "6", "2"]))
        );
        let err = decode_arguments("0,1,2,3", OperationKind::Slice, 6, ',').unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Decode { found: 4, .. }));
    }

    #[test]
    fn decode_then_slice() {
        let s = strings(&["A", "B", "C", "D", "E", "F"]);
        let decoded = decode_arguments("0,6,2", OperationKind::Slice, 6, ',').unwrap();
        assert_eq!(decoded.apply_slice(&s).unwrap(), strings(&["A", "C", "E"]));
        let decoded = decode_arguments("0,6,-3", OperationKind::Slice, 6, ',').unwrap();
        assert_eq!(decoded.apply_slice(&s).unwrap(), strings(&["F", "C"]));
    }

    #[test]
    fn values_empty_argument_is_no_values() {
        assert_eq!(
            decode_arguments("", OperationKind::Values, 0, ',').unwrap(),
            DecodedArgs::Values(vec![])
        );
        assert_eq!(
            decode_arguments(",", OperationKind::Values, 0, ',').unwrap(),
            DecodedArgs::Values(strings(&["", ""]))
        );
    }

    #[test]
    fn decoder_delimiter() {
        let mut decoder = ArgumentDecoder::default();
        assert_eq!(decoder.delimiter(), ',');
        decoder.set_delimiter("|").unwrap();
        assert_eq!(decoder.join(["a", "b"]), "a|b");
        assert!(decoder.set_delimiter("").is_err());
        assert!(decoder.set_delimiter("ab").is_err());
        for reserved in ["\"", "'", "\\"] {
            let err = decoder.set_delimiter(reserved).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::InvalidDelimiter { .. }), "{reserved}");
        }
        assert_eq!(decoder.delimiter(), '|');
    }

    #[test]
    fn joined_values_split_back() {
        let mut decoder = ArgumentDecoder::default();
        let values = strings(&["a,b", "c", "it's"]);
        let joined = decoder.join(&values);
        assert_eq!(joined, "a\\,b,c,it\\'s");
        assert_eq!(split(&joined, &[',']), values);

        decoder.set_delimiter(";").unwrap();
        assert_eq!(decoder.join(["x,y", "z;w"]), "x,y;z\\;w");
    }
}
