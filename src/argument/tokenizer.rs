//! # Argument Tokenizer
//!
//! Splits one call argument into its logical values. Quoted spans and
//! backslash escapes let a value contain the delimiter itself:
//!
//! ```rust
//! use seqcall::argument::tokenizer::split;
//! assert_eq!(split(r#"A,"B,C",D"#, &[',']), vec!["A", "B,C", "D"]);
//! assert_eq!(split(r"A\,B,C", &[',']), vec!["A,B", "C"]);
//! ```
//!
//! The tokenizer never fails. An unterminated quote runs to the end of the
//! input and a trailing lone backslash is dropped.

const ESCAPE: char = '\\';

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Characters the scanner interprets before delimiters: quotes and the
/// escape. None of them can act as a delimiter.
pub fn is_reserved(c: char) -> bool {
    c == ESCAPE || is_quote(c)
}

/// Splits `input` on any of `delimiters`.
///
/// Empty tokens are kept, and the final token is always pushed, so the
/// result is never empty: `split("", &[','])` is `[""]`. With no delimiters
/// the input comes back untouched as a single token.
pub fn split(input: &str, delimiters: &[char]) -> Vec<String> {
    if delimiters.is_empty() {
        return vec![input.to_string()];
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut open_quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c == ESCAPE {
            if let Some(escaped) = chars.next() {
                current.push(escaped);
            }
            continue;
        }

        if let Some(quote) = open_quote {
            if c == quote {
                open_quote = None;
            } else {
                current.push(c);
            }
            continue;
        }

        if is_quote(c) {
            open_quote = Some(c);
        } else if delimiters.contains(&c) {
            tokens.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    tokens.push(current);
    tokens
}

/// Like [`split`], with empty tokens removed afterwards.
pub fn split_nonempty(input: &str, delimiters: &[char]) -> Vec<String> {
    split(input, delimiters)
        .into_iter()
        .filter(|token| !token.is_empty())
        .collect()
}

/// Escapes `value` so that [`split`] on `delimiters` returns it as one token.
pub fn escape(value: &str, delimiters: &[char]) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if is_reserved(c) || delimiters.contains(&c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}
