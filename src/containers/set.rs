//! Ordered set of strings. Positions follow sort order, so `Item` and
//! `Erase` by position are stable between calls.

use std::collections::BTreeSet;

use crate::argument::ArgumentDecoder;
use crate::containers::{decode_values, element_position, unknown_member, Container, Member};
use crate::errors::SeqError;
use crate::value::Value;

const SET_MEMBERS: &[Member] = &[
    Member::Add,
    Member::Remove,
    Member::Contains,
    Member::Item,
    Member::Erase,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Set {
    items: BTreeSet<String>,
    decoder: ArgumentDecoder,
}

impl Set {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decoder(decoder: ArgumentDecoder) -> Self {
        Self {
            items: BTreeSet::new(),
            decoder,
        }
    }

    pub fn items(&self) -> &BTreeSet<String> {
        &self.items
    }

    fn nth(&self, position: usize) -> Option<&String> {
        self.items.iter().nth(position)
    }
}

impl Container for Set {
    fn type_name(&self) -> &'static str {
        "Set"
    }

    fn members(&self) -> &'static [Member] {
        SET_MEMBERS
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn decoder(&self) -> &ArgumentDecoder {
        &self.decoder
    }

    fn decoder_mut(&mut self) -> &mut ArgumentDecoder {
        &mut self.decoder
    }

    fn elements(&self) -> Vec<&str> {
        self.items.iter().map(String::as_str).collect()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn call_member(&mut self, member: Member, arg: &str) -> Result<Value, SeqError> {
        let length = self.items.len();
        match member {
            Member::Add => {
                let values = decode_values(&self.decoder, arg)?;
                self.items.extend(values);
                Ok(Value::Bool(true))
            }
            Member::Remove => Ok(Value::Bool(self.items.remove(arg))),
            Member::Contains => Ok(Value::Bool(self.items.contains(arg))),
            Member::Item => {
                let position = element_position(&self.decoder, arg, length)?;
                Ok(Value::from(self.nth(position).cloned()))
            }
            Member::Erase => {
                let position = element_position(&self.decoder, arg, length)?;
                if let Some(value) = self.nth(position).cloned() {
                    self.items.remove(&value);
                }
                Ok(Value::Bool(true))
            }
            _ => Err(unknown_member(self.type_name(), member.name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_deduplicates_and_orders() {
        let mut set = Set::new();
        set.call(Member::Add, "pear,apple,pear").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.call(Member::ToString, "").unwrap(), Value::Str("apple,pear".into()));
    }

    #[test]
    fn positional_access() {
        let mut set = Set::new();
        set.call(Member::Add, "c,a,b").unwrap();
        assert_eq!(set.call(Member::Item, "0").unwrap(), Value::Str("a".into()));
        assert_eq!(set.call(Member::Item, "-1").unwrap(), Value::Str("c".into()));
        set.call(Member::Erase, "1").unwrap();
        assert!(!set.items().contains("b"));
        assert!(set.call(Member::Erase, "2").is_err());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_and_contains() {
        let mut set = Set::new();
        set.call(Member::Add, "x").unwrap();
        assert_eq!(set.call(Member::Contains, "x").unwrap(), Value::Bool(true));
        assert_eq!(set.call(Member::Remove, "x").unwrap(), Value::Bool(true));
        assert_eq!(set.call(Member::Remove, "x").unwrap(), Value::Bool(false));
    }

    #[test]
    fn splice_over_sorted_order() {
        let mut set = Set::new();
        set.call(Member::Add, "e,d,c,b,a").unwrap();
        assert_eq!(set.call(Member::Splice, "1,4").unwrap(), Value::Str("b,c,d".into()));
    }
}
