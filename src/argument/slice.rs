//! # Slice Engine
//!
//! Python-style `start,end,stride` slicing over any ordered sequence. The
//! range is half-open, negative bounds count from the end, and a negative
//! stride walks the range backwards.
//!
//! Slicing is a best-effort view: bounds that cannot be resolved, `start >
//! end`, and a zero stride all produce an empty result rather than an error.
//! The single-bound form keeps one historical quirk: a negative start reaching
//! before the beginning clamps to `0`.
//!
//! ```rust
//! use seqcall::argument::slice::slice;
//! let s = ["A", "B", "C", "D", "E", "F"];
//! assert_eq!(slice(&s, &["0", "6", "2"], s.len()), vec!["A", "C", "E"]);
//! assert_eq!(slice(&s, &["0", "6", "-3"], s.len()), vec!["F", "C"]);
//! ```

use tracing::trace;

use super::index::{parse_integer, resolve_index, IndexPolicy};

/// Resolved slice parameters. Only constructed through [`SliceSpec::new`],
/// [`SliceSpec::full`] and [`SliceSpec::resolve`], so `start <= end` and a
/// non-zero `stride` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceSpec {
    start: usize,
    end: usize,
    stride: i64,
}

impl SliceSpec {
    /// Checked constructor: `None` for inverted bounds or a zero stride.
    pub fn new(start: usize, end: usize, stride: i64) -> Option<Self> {
        if start > end || stride == 0 {
            return None;
        }
        Some(Self { start, end, stride })
    }

    /// The whole sequence, front to back.
    pub fn full(length: usize) -> Self {
        Self {
            start: 0,
            end: length,
            stride: 1,
        }
    }

    /// Resolves up to three tokens against `length`.
    ///
    /// `None` means the slice is empty by construction: a bound failed to
    /// resolve, the bounds are inverted, the stride is zero or unparsable, or
    /// more than three tokens were given.
    pub fn resolve<S: AsRef<str>>(tokens: &[S], length: usize) -> Option<Self> {
        let spec = match tokens {
            [] => Self::full(length),
            [start] => Self::new(resolve_legacy_start(start.as_ref(), length)?, length, 1)?,
            [start, end] => Self::bounded(start.as_ref(), end.as_ref(), 1, length)?,
            [start, end, stride] => {
                let stride = parse_integer(stride.as_ref())?;
                Self::bounded(start.as_ref(), end.as_ref(), stride, length)?
            }
            _ => return None,
        };
        trace!(?spec, length, "resolved slice");
        Some(spec)
    }

    fn bounded(start: &str, end: &str, stride: i64, length: usize) -> Option<Self> {
        let start = resolve_index(start, length, IndexPolicy::Position).ok()?;
        let end = resolve_index(end, length, IndexPolicy::Position).ok()?;
        Self::new(start, end, stride)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn stride(&self) -> i64 {
        self.stride
    }

    fn step(&self) -> usize {
        usize::try_from(self.stride.unsigned_abs()).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Applies the slice to any ordered source, producing an owned result.
    pub fn select<I>(&self, source: I) -> Vec<I::Item>
    where
        I: IntoIterator,
    {
        let mut range: Vec<I::Item> = source
            .into_iter()
            .skip(self.start)
            .take(self.end - self.start)
            .collect();
        if self.stride < 0 {
            range.reverse();
        }
        range.into_iter().step_by(self.step()).collect()
    }

    pub fn apply<T: Clone>(&self, source: &[T]) -> Vec<T> {
        self.select(source.iter().cloned())
    }
}

/// Single-bound start: a negative offset past the beginning clamps to `0`.
fn resolve_legacy_start(token: &str, length: usize) -> Option<usize> {
    let value = parse_integer(token)?;
    if value < 0 && value.unsigned_abs() > length as u64 {
        return Some(0);
    }
    resolve_index(token, length, IndexPolicy::Position).ok()
}

/// Slices the first `length` elements of `source` by `tokens`.
///
/// Never fails and never aliases `source`: the result is freshly allocated.
pub fn slice<T: Clone, S: AsRef<str>>(source: &[T], tokens: &[S], length: usize) -> Vec<T> {
    let length = length.min(source.len());
    match SliceSpec::resolve(tokens, length) {
        Some(spec) => spec.apply(&source[..length]),
        None => Vec::new(),
    }
}
