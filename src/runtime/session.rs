//! The host boundary: a table of named container instances and the call
//! convention that maps every failure to `false`.

use im::HashMap;
use tracing::debug;

use crate::containers::{Instance, Kind};
use crate::errors::{ErrorKind, SeqError};
use crate::runtime::Config;
use crate::value::Value;

/// Named instances created by one host.
///
/// The table is a persistent map, so [`Session::snapshot`] and
/// [`Session::restore`] are cheap.
#[derive(Debug, Clone)]
pub struct Session {
    instances: HashMap<String, Instance>,
    delimiter: char,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            instances: HashMap::new(),
            delimiter: config.delimiter,
        }
    }

    /// Creates an instance of `kind` under `name`.
    pub fn create(&mut self, name: &str, kind: Kind) -> Result<(), SeqError> {
        if self.instances.contains_key(name) {
            return Err(SeqError::unsourced(
                ErrorKind::DuplicateInstance { name: name.into() },
                "session",
            ));
        }
        debug!(name, %kind, "created instance");
        self.instances
            .insert(name.to_string(), Instance::new(kind, self.delimiter));
        Ok(())
    }

    pub fn drop_instance(&mut self, name: &str) -> bool {
        self.instances.remove(name).is_some()
    }

    /// Instance names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.instances.keys().cloned().collect();
        names.sort();
        names
    }

    /// Calls `member` on instance `name`, reporting failures as errors.
    pub fn try_invoke(&mut self, name: &str, member: &str, arg: &str) -> Result<Value, SeqError> {
        let instance = self.instances.get_mut(name).ok_or_else(|| {
            SeqError::unsourced(ErrorKind::UnknownInstance { name: name.into() }, "session")
        })?;
        instance.call(member, arg)
    }

    /// Calls `member` on instance `name` under the host convention: any
    /// failure becomes `false` and the instance is left as it was.
    pub fn invoke(&mut self, name: &str, member: &str, arg: &str) -> Value {
        match self.try_invoke(name, member, arg) {
            Ok(value) => {
                debug!(name, member, arg, %value, "call succeeded");
                value
            }
            Err(error) => {
                debug!(name, member, arg, %error, "call failed");
                Value::Bool(false)
            }
        }
    }

    pub fn snapshot(&self) -> Session {
        self.clone()
    }

    pub fn restore(&mut self, snapshot: Session) {
        *self = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoke_maps_errors_to_false() {
        let mut session = Session::new(&Config::default());
        session.create("l", Kind::List).unwrap();
        assert_eq!(session.invoke("l", "Append", "a,b"), Value::Bool(true));
        assert_eq!(session.invoke("l", "Erase", "7"), Value::Bool(false));
        assert_eq!(session.invoke("l", "Nope", ""), Value::Bool(false));
        assert_eq!(session.invoke("missing", "Count", ""), Value::Bool(false));
        assert_eq!(session.invoke("l", "Count", ""), Value::Int(2));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut session = Session::new(&Config::default());
        session.create("x", Kind::Map).unwrap();
        let err = session.create("x", Kind::Set).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DuplicateInstance { .. }));
        assert!(session.drop_instance("x"));
        assert!(session.create("x", Kind::Set).is_ok());
    }

    #[test]
    fn configured_delimiter_applies_to_new_instances() {
        let config = Config {
            delimiter: '|',
            ..Config::default()
        };
        let mut session = Session::new(&config);
        session.create("l", Kind::List).unwrap();
        session.invoke("l", "Append", "a|b,c");
        assert_eq!(session.invoke("l", "Count", ""), Value::Int(2));
        assert_eq!(session.invoke("l", "ToString", ""), Value::Str("a|b,c".into()));
    }

    #[test]
    fn restore_discards_later_changes() {
        let mut session = Session::new(&Config::default());
        session.create("q", Kind::Queue).unwrap();
        session.invoke("q", "Push", "1");
        let saved = session.snapshot();
        session.invoke("q", "Push", "2");
        session.create("other", Kind::Stack).unwrap();
        session.restore(saved);
        assert_eq!(session.invoke("q", "Count", ""), Value::Int(1));
        assert_eq!(session.names(), vec!["q".to_string()]);
    }
}
