//! Session configuration, loaded from YAML.
//!
//! ```yaml
//! delimiter: ";"
//! log_level: debug
//! json: true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::argument::{is_reserved, DEFAULT_DELIMITER};
use crate::errors::{ErrorKind, ErrorReporting, ReportingContext, SeqError, SourceContext};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Element delimiter new instances start with.
    pub delimiter: char,
    /// Filter directive for the log subscriber, e.g. `warn` or `seqcall=debug`.
    pub log_level: String,
    /// Render results as JSON lines instead of text.
    pub json: bool,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            log_level: "warn".into(),
            json: false,
            color: true,
        }
    }
}

impl Config {
    /// Parses YAML text. An empty document is the default configuration.
    pub fn from_yaml(name: &str, text: &str) -> Result<Self, SeqError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let context = ReportingContext::new(SourceContext::new(name, text), "config");
        let config: Self = serde_yaml::from_str(text).map_err(|e| {
            let span = match e.location() {
                Some(location) => {
                    let at = location.index().min(text.len());
                    (at..at).into()
                }
                None => context.source.full_span(),
            };
            context.report(
                ErrorKind::Config {
                    message: e.to_string(),
                },
                span,
            )
        })?;
        if is_reserved(config.delimiter) {
            return Err(context.report(
                ErrorKind::Config {
                    message: format!("'{}' cannot be used as a delimiter", config.delimiter),
                },
                context.source.full_span(),
            ));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, SeqError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&path.display().to_string(), &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.log_level, "warn");
        assert!(!config.json);
        assert_eq!(Config::from_yaml("empty", "").unwrap(), config);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = Config::from_yaml("c.yaml", "delimiter: \";\"\njson: true\n").unwrap();
        assert_eq!(config.delimiter, ';');
        assert!(config.json);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn rejects_unknown_fields_and_long_delimiters() {
        assert!(Config::from_yaml("c.yaml", "colour: false\n").is_err());
        let err = Config::from_yaml("c.yaml", "delimiter: ab\n").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config { .. }));
    }

    #[test]
    fn rejects_quote_and_escape_delimiters() {
        for text in ["delimiter: \"'\"\n", "delimiter: '\"'\n", "delimiter: '\\'\n"] {
            let err = Config::from_yaml("c.yaml", text).unwrap_err();
            assert!(err.to_string().contains("cannot be used as a delimiter"), "{text}");
        }
    }
}
