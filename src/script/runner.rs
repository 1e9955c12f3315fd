use std::path::Path;

use tracing::{debug, info};

use crate::errors::{ErrorReporting, ReportingContext, SeqError, SourceContext};
use crate::runtime::{Config, Session};
use crate::script::discovery::discover;
use crate::script::{parse, Expectation, Line, Statement, TestSummary};
use crate::value::Value;

/// The result of one call line.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub line: usize,
    pub statement: String,
    pub value: Value,
}

/// Executes scripts against a session.
pub struct ScriptRunner {
    session: Session,
    atomic: bool,
}

impl ScriptRunner {
    pub fn new(config: &Config) -> Self {
        Self {
            session: Session::new(config),
            atomic: false,
        }
    }

    /// In atomic mode the first failing call aborts the script and rolls the
    /// session back to its state before the script started.
    pub fn atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs `source`, returning one outcome per call line.
    ///
    /// Failing calls produce `false` and the script continues, unless the
    /// runner is atomic. A failed `expect` always stops the script.
    pub fn run(&mut self, source: &str, name: &str) -> Result<Vec<Outcome>, SeqError> {
        let lines = parse(source, name)?;
        let context = ReportingContext::new(SourceContext::new(name, source), "script");
        let saved = self.session.snapshot();

        let result = self.run_lines(&lines, &context);
        if result.is_err() && self.atomic {
            self.session.restore(saved);
        }
        result
    }

    fn run_lines(
        &mut self,
        lines: &[Line],
        context: &ReportingContext,
    ) -> Result<Vec<Outcome>, SeqError> {
        let mut outcomes = Vec::new();
        let mut last: Option<Result<Value, SeqError>> = None;

        for line in lines {
            match &line.statement {
                Statement::Create { name, kind } => {
                    self.session
                        .create(name, *kind)
                        .map_err(|e| context.script_error(&e.to_string(), line.span))?;
                }
                Statement::Call {
                    target,
                    member,
                    arg,
                } => {
                    let result = self.session.try_invoke(target, member, arg);
                    let value = match &result {
                        Ok(value) => value.clone(),
                        Err(error) if self.atomic => {
                            return Err(context.script_error(&error.to_string(), line.span));
                        }
                        Err(error) => {
                            debug!(line = line.number, %error, "call failed");
                            Value::Bool(false)
                        }
                    };
                    outcomes.push(Outcome {
                        line: line.number,
                        statement: line.text.clone(),
                        value,
                    });
                    last = Some(result);
                }
                Statement::Expect(expectation) => {
                    check_expectation(expectation, last.as_ref(), line, context)?;
                }
            }
        }
        Ok(outcomes)
    }
}

fn check_expectation(
    expectation: &Expectation,
    last: Option<&Result<Value, SeqError>>,
    line: &Line,
    context: &ReportingContext,
) -> Result<(), SeqError> {
    let Some(last) = last else {
        return Err(context.script_error("`expect` must follow a call", line.span));
    };
    match (expectation, last) {
        (Expectation::Value(expected), Ok(actual)) if actual.to_string() == *expected => Ok(()),
        (Expectation::Value(expected), Ok(actual)) => {
            Err(context.assertion_failure(&format!("'{expected}'"), &format!("'{actual}'"), line.span))
        }
        (Expectation::Value(expected), Err(error)) => Err(context
            .assertion_failure(&format!("'{expected}'"), "an error", line.span)
            .with_help(error.to_string())),
        (Expectation::Error, Err(_)) => Ok(()),
        (Expectation::Error, Ok(actual)) => {
            Err(context.assertion_failure("an error", &format!("'{actual}'"), line.span))
        }
    }
}

/// Runs one script file in a fresh session.
pub fn run_file(path: &Path, config: &Config) -> Result<Vec<Outcome>, SeqError> {
    let source = std::fs::read_to_string(path)?;
    ScriptRunner::new(config).run(&source, &path.display().to_string())
}

/// Discovers and runs every script under `root`.
pub fn run_tests(root: &Path, config: &Config) -> Result<TestSummary, SeqError> {
    let mut summary = TestSummary::default();
    for path in discover(root)? {
        match run_file(&path, config) {
            Ok(outcomes) => {
                info!(path = %path.display(), calls = outcomes.len(), "script passed");
                summary.passed.push(path);
            }
            Err(error) => {
                info!(path = %path.display(), %error, "script failed");
                summary.failed.push((path, error));
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn runs_calls_and_checks_expectations() {
        let mut runner = ScriptRunner::new(&Config::default());
        let outcomes = runner
            .run(
                "let s = list\ns.Append A,B,C,D,E,F\ns.Splice 0,6,2\nexpect A,C,E\ns.Erase 10\nexpect-error\n",
                "t.seq",
            )
            .unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[1].value, Value::Str("A,C,E".into()));
        assert_eq!(outcomes[2].value, Value::Bool(false));
    }

    #[test]
    fn failed_expectation_stops_the_script() {
        let mut runner = ScriptRunner::new(&Config::default());
        let err = runner
            .run("let s = set\ns.Add x\ns.Count\nexpect 2\n", "t.seq")
            .unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Assertion {
                expected: "'2'".into(),
                actual: "'1'".into()
            }
        );
    }

    #[test]
    fn run_tests_records_each_script_once() {
        let root = std::env::temp_dir().join(format!("seqcall-run-tests-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("a.seq"), "let l = list\nl.Count\nexpect 0\n").unwrap();
        std::fs::write(root.join("b.seq"), "let l = list\nl.Count\nexpect 1\n").unwrap();

        let summary = run_tests(&root, &Config::default()).unwrap();
        std::fs::remove_dir_all(&root).unwrap();

        assert_eq!(summary.passed, vec![root.join("a.seq")]);
        assert_eq!(summary.failed.len(), 1);
        assert!(summary.failed[0].0.ends_with("b.seq"));
        assert_eq!(summary.total(), 2);
    }

    #[test]
    fn expect_without_call_is_malformed() {
        let mut runner = ScriptRunner::new(&Config::default());
        let err = runner.run("expect 1\n", "t.seq").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Script { .. }));
    }

    #[test]
    fn atomic_mode_rolls_back() {
        let mut runner = ScriptRunner::new(&Config::default());
        runner.run("let q = queue\nq.Push a\n", "setup.seq").unwrap();
        let mut runner = runner.atomic(true);
        let err = runner.run("q.Push b\nq.Pop\nq.Pop\nq.Pop\n", "t.seq");
        assert!(err.is_err());
        let mut session = runner.session().clone();
        assert_eq!(session.invoke("q", "ToString", ""), Value::Str("a".into()));
    }
}
