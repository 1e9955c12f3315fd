//! First-in first-out queue. Position `0` is the front.

use std::collections::VecDeque;

use crate::argument::ArgumentDecoder;
use crate::containers::{
    decode_values, element_position, empty_container, unknown_member, Container, Member,
};
use crate::errors::SeqError;
use crate::value::Value;

const QUEUE_MEMBERS: &[Member] = &[Member::Push, Member::Pop, Member::Peek, Member::Item];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Queue {
    items: VecDeque<String>,
    decoder: ArgumentDecoder,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decoder(decoder: ArgumentDecoder) -> Self {
        Self {
            items: VecDeque::new(),
            decoder,
        }
    }
}

impl Container for Queue {
    fn type_name(&self) -> &'static str {
        "Queue"
    }

    fn members(&self) -> &'static [Member] {
        QUEUE_MEMBERS
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
        match member {
            Member::Push => {
                let values = decode_values(&self.decoder, arg)?;
                self.items.extend(values);
                Ok(Value::Bool(true))
            }
            Member::Pop => self
                .items
                .pop_front()
                .map(Value::Str)
                .ok_or_else(|| empty_container(member)),
            Member::Peek => self
                .items
                .front()
                .cloned()
                .map(Value::Str)
                .ok_or_else(|| empty_container(member)),
            Member::Item => {
                let position = element_position(&self.decoder, arg, self.items.len())?;
                Ok(Value::from(self.items.get(position).cloned()))
            }
            _ => Err(unknown_member(self.type_name(), member.name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut queue = Queue::new();
        queue.call(Member::Push, "1,2").unwrap();
        queue.call(Member::Push, "3").unwrap();
        assert_eq!(queue.call(Member::Pop, "").unwrap(), Value::Str("1".into()));
        assert_eq!(queue.call(Member::Peek, "").unwrap(), Value::Str("2".into()));
        assert_eq!(queue.call(Member::Item, "-1").unwrap(), Value::Str("3".into()));
        assert_eq!(queue.call(Member::Splice, "0,2,-1").unwrap(), Value::Str("3,2".into()));
    }

    #[test]
    fn pop_empty_is_an_error() {
        let mut queue = Queue::new();
        assert!(queue.call(Member::Pop, "").is_err());
        assert_eq!(queue.len(), 0);
    }
}
