//! Last-in first-out stack. Position `0` is the top.

use crate::argument::ArgumentDecoder;
use crate::containers::{
    decode_values, element_position, empty_container, unknown_member, Container, Member,
};
use crate::errors::SeqError;
use crate::value::Value;

const STACK_MEMBERS: &[Member] = &[Member::Push, Member::Pop, Member::Peek, Member::Item];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    // Bottom first; the top is the last element.
    items: Vec<String>,
    decoder: ArgumentDecoder,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decoder(decoder: ArgumentDecoder) -> Self {
        Self {
            items: Vec::new(),
            decoder,
        }
    }
}

impl Container for Stack {
    fn type_name(&self) -> &'static str {
        "Stack"
    }

    fn members(&self) -> &'static [Member] {
        STACK_MEMBERS
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

    /// Top first.
    fn elements(&self) -> Vec<&str> {
        self.items.iter().rev().map(String::as_str).collect()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn call_member(&mut self, member: Member, arg: &str) -> Result<Value, SeqError> {
        match member {
            Member::Push => {
                let values = decode_values(&self.decoder, arg)?;
                self.items.extend(values);
                Ok(Value::Bool(true))
            }
            Member::Pop => self.items.pop().map(Value::Str).ok_or_else(|| empty_container(member)),
            Member::Peek => self
                .items
                .last()
                .cloned()
                .map(Value::Str)
                .ok_or_else(|| empty_container(member)),
            Member::Item => {
                let position = element_position(&self.decoder, arg, self.items.len())?;
                Ok(Value::from(self.elements()[position].to_string()))
            }
            _ => Err(unknown_member(self.type_name(), member.name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn push_pop_order() {
        let mut stack = Stack::new();
        stack.call(Member::Push, "a,b,c").unwrap();
        assert_eq!(stack.call(Member::Peek, "").unwrap(), Value::Str("c".into()));
        assert_eq!(stack.call(Member::Pop, "").unwrap(), Value::Str("c".into()));
        assert_eq!(stack.call(Member::Item, "0").unwrap(), Value::Str("b".into()));
        assert_eq!(stack.call(Member::Item, "-1").unwrap(), Value::Str("a".into()));
        assert_eq!(stack.call(Member::ToString, "").unwrap(), Value::Str("b,a".into()));
    }

    #[test]
    fn pop_empty_is_an_error() {
        let mut stack = Stack::new();
        let err = stack.call(Member::Pop, "").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EmptyContainer { .. }));
        assert!(stack.call(Member::Peek, "").is_err());
    }
}
