//! Ordered string-to-string map. Positional members (`Key`, `Item`, `Erase`,
//! `Splice`) address entries in key order.

use std::collections::BTreeMap;

use crate::argument::ArgumentDecoder;
use crate::containers::{decode_pair, element_position, unknown_member, Container, Member};
use crate::errors::SeqError;
use crate::value::Value;

const MAP_MEMBERS: &[Member] = &[
    Member::Add,
    Member::Get,
    Member::Remove,
    Member::Contains,
    Member::Key,
    Member::Item,
    Member::Erase,
    Member::Keys,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    entries: BTreeMap<String, String>,
    decoder: ArgumentDecoder,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decoder(decoder: ArgumentDecoder) -> Self {
        Self {
            entries: BTreeMap::new(),
            decoder,
        }
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    fn nth(&self, position: usize) -> Option<(&String, &String)> {
        self.entries.iter().nth(position)
    }
}

impl Container for Map {
    fn type_name(&self) -> &'static str {
        "Map"
    }

    fn members(&self) -> &'static [Member] {
        MAP_MEMBERS
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn decoder(&self) -> &ArgumentDecoder {
        &self.decoder
    }

    fn decoder_mut(&mut self) -> &mut ArgumentDecoder {
        &mut self.decoder
    }

    /// Keys, in order.
    fn elements(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    /// `key=value` pairs joined with the delimiter.
    fn render(&self) -> String {
        self.decoder
            .join(self.entries.iter().map(|(k, v)| format!("{k}={v}")))
    }

    fn call_member(&mut self, member: Member, arg: &str) -> Result<Value, SeqError> {
        let length = self.entries.len();
        match member {
            Member::Add => {
                let (key, value) = decode_pair(&self.decoder, arg, length)?;
                self.entries.insert(key, value);
                Ok(Value::Bool(true))
            }
            Member::Get => Ok(Value::from(self.entries.get(arg).cloned())),
            Member::Remove => Ok(Value::Bool(self.entries.remove(arg).is_some())),
            Member::Contains => Ok(Value::Bool(self.entries.contains_key(arg))),
            Member::Key => {
                let position = element_position(&self.decoder, arg, length)?;
                Ok(Value::from(self.nth(position).map(|(k, _)| k.clone())))
            }
            Member::Item => {
                let position = element_position(&self.decoder, arg, length)?;
                Ok(Value::from(self.nth(position).map(|(_, v)| v.clone())))
            }
            Member::Erase => {
                let position = element_position(&self.decoder, arg, length)?;
                if let Some(key) = self.nth(position).map(|(k, _)| k.clone()) {
                    self.entries.remove(&key);
                }
                Ok(Value::Bool(true))
            }
            Member::Keys => Ok(Value::Str(self.decoder.join(self.elements()))),
            _ => Err(unknown_member(self.type_name(), member.name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn sample() -> Map {
        let mut map = Map::new();
        map.call(Member::Add, "b,2").unwrap();
        map.call(Member::Add, "a,1").unwrap();
        map.call(Member::Add, "c,\"3,4\"").unwrap();
        map
    }

    #[test]
    fn add_requires_key_and_value() {
        let mut map = sample();
        let err = map.call(Member::Add, "lonely").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Decode { found: 1, .. }));
        assert!(map.call(Member::Add, "x,y,z").is_err());
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn lookup() {
        let mut map = sample();
        assert_eq!(map.call(Member::Get, "c").unwrap(), Value::Str("3,4".into()));
        assert_eq!(map.call(Member::Get, "zz").unwrap(), Value::Nil);
        assert_eq!(map.call(Member::Contains, "a").unwrap(), Value::Bool(true));
    }

    #[test]
    fn positional_members_follow_key_order() {
        let mut map = sample();
        assert_eq!(map.call(Member::Key, "0").unwrap(), Value::Str("a".into()));
        assert_eq!(map.call(Member::Item, "-2").unwrap(), Value::Str("2".into()));
        map.call(Member::Erase, "0").unwrap();
        assert_eq!(map.call(Member::Keys, "").unwrap(), Value::Str("b,c".into()));
    }

    #[test]
    fn render_and_splice() {
        let mut map = sample();
        assert_eq!(
            map.call(Member::ToString, "").unwrap(),
            Value::Str("a=1,b=2,c=3\\,4".into())
        );
        assert_eq!(map.call(Member::Splice, "0,3,2").unwrap(), Value::Str("a,c".into()));
    }

    #[test]
    fn add_overwrites() {
        let mut map = sample();
        map.call(Member::Add, "a,9").unwrap();
        assert_eq!(map.entries().get("a").map(String::as_str), Some("9"));
    }
}
