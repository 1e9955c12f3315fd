use std::str::FromStr;

use miette::SourceSpan;

use crate::containers::Kind;
use crate::errors::{ErrorReporting, ReportingContext, SeqError, SourceContext};
use crate::script::Expectation;

/// One meaningful line of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,
    /// Byte range of the line within the script.
    pub span: SourceSpan,
    pub text: String,
    pub statement: Statement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `let <name> = <kind>`
    Create { name: String, kind: Kind },
    /// `<target>.<member> [argument]`
    Call {
        target: String,
        member: String,
        arg: String,
    },
    /// `expect <text>` or `expect-error`
    Expect(Expectation),
}

/// Parses a whole script. `name` labels diagnostics.
pub fn parse(source: &str, name: &str) -> Result<Vec<Line>, SeqError> {
    let context = ReportingContext::new(SourceContext::new(name, source), "script");
    let mut lines = Vec::new();
    let mut offset = 0;

    for (index, raw) in source.split_inclusive('\n').enumerate() {
        let start = offset;
        offset += raw.len();
        let text = raw.trim_end_matches(['\n', '\r']);
        let trimmed = text.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let span = SourceSpan::from(start..start + text.len());
        let statement = parse_statement(trimmed)
            .map_err(|message| context.script_error(&message, span))?;
        lines.push(Line {
            number: index + 1,
            span,
            text: text.to_string(),
            statement,
        });
    }
    Ok(lines)
}

fn parse_statement(line: &str) -> Result<Statement, String> {
    if line == "expect-error" {
        return Ok(Statement::Expect(Expectation::Error));
    }
    if line == "expect" {
        return Ok(Statement::Expect(Expectation::Value(String::new())));
    }
    if let Some(text) = line.strip_prefix("expect ") {
        return Ok(Statement::Expect(Expectation::Value(text.to_string())));
    }
    if let Some(rest) = line.strip_prefix("let ") {
        return parse_create(rest);
    }
    parse_call(line)
}

fn parse_create(rest: &str) -> Result<Statement, String> {
    let (name, kind) = rest
        .split_once('=')
        .ok_or_else(|| "expected `let <name> = <kind>`".to_string())?;
    let name = name.trim();
    if !is_identifier(name) {
        return Err(format!("'{name}' is not a valid instance name"));
    }
    let kind = Kind::from_str(kind.trim()).map_err(|e| e.to_string())?;
    Ok(Statement::Create {
        name: name.to_string(),
        kind,
    })
}

fn parse_call(line: &str) -> Result<Statement, String> {
    let (head, arg) = line.split_once(' ').unwrap_or((line, ""));
    let (target, member) = head
        .split_once('.')
        .ok_or_else(|| format!("expected `<instance>.<member>`, found '{head}'"))?;
    if !is_identifier(target) || !is_identifier(member) {
        return Err(format!("'{head}' is not a valid call target"));
    }
    Ok(Statement::Call {
        target: target.to_string(),
        member: member.to_string(),
        arg: arg.to_string(),
    })
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statements(source: &str) -> Vec<Statement> {
        parse(source, "test.seq")
            .unwrap()
            .into_iter()
            .map(|line| line.statement)
            .collect()
    }

    #[test]
    fn parses_every_statement_kind() {
        let parsed = statements(
            "# header\nlet xs = List\n\nxs.Append a, b\nexpect true\nxs.Count\nexpect-error\nexpect\n",
        );
        assert_eq!(
            parsed,
            vec![
                Statement::Create {
                    name: "xs".into(),
                    kind: Kind::List
                },
                Statement::Call {
                    target: "xs".into(),
                    member: "Append".into(),
                    arg: "a, b".into()
                },
                Statement::Expect(Expectation::Value("true".into())),
                Statement::Call {
                    target: "xs".into(),
                    member: "Count".into(),
                    arg: String::new()
                },
                Statement::Expect(Expectation::Error),
                Statement::Expect(Expectation::Value(String::new())),
            ]
        );
    }

    #[test]
    fn argument_is_kept_verbatim_after_first_space() {
        let parsed = statements("xs.Append  padded ,\"q\"\r\n");
        assert_eq!(
            parsed[0],
            Statement::Call {
                target: "xs".into(),
                member: "Append".into(),
                arg: " padded ,\"q\"".into()
            }
        );
    }

    #[test]
    fn records_line_numbers_and_spans() {
        let lines = parse("\n\nxs.Count\n", "t").unwrap();
        assert_eq!(lines[0].number, 3);
        assert_eq!(lines[0].span, SourceSpan::from(2..10));
    }

    #[test]
    fn malformed_lines_are_errors() {
        for source in ["let = list", "let xs list", "let xs = tree", "justtext", ".Count"] {
            let err = parse(source, "bad.seq").unwrap_err();
            assert_eq!(err.diagnostic_info.error_code, "seqcall::script::script", "{source}");
        }
    }
}
