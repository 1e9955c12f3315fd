//! Ordered, duplicate-permitting list of strings.

use crate::argument::{ArgumentDecoder, DecodedArgs, OperationKind};
use crate::containers::{decode_pair, decode_values, element_position, Container, Member};
use crate::errors::SeqError;
use crate::value::Value;

const LIST_MEMBERS: &[Member] = &[
    Member::Append,
    Member::Insert,
    Member::Erase,
    Member::Item,
    Member::Replace,
    Member::Find,
    Member::Contains,
    Member::Remove,
    Member::Sort,
    Member::Reverse,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    items: Vec<String>,
    decoder: ArgumentDecoder,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decoder(decoder: ArgumentDecoder) -> Self {
        Self {
            items: Vec::new(),
            decoder,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    fn position_of(&self, value: &str) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }
}

impl Container for List {
    fn type_name(&self) -> &'static str {
        "List"
    }

    fn members(&self) -> &'static [Member] {
        LIST_MEMBERS
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
            Member::Append => {
                let values = decode_values(&self.decoder, arg)?;
                self.items.extend(values);
                Ok(Value::Bool(true))
            }
            Member::Insert => {
                if let DecodedArgs::IndexAndValues { position, values } =
                    self.decoder.decode(arg, OperationKind::Insert, length)?
                {
                    self.items.splice(position..position, values);
                }
                Ok(Value::Bool(true))
            }
            Member::Erase => {
                let position = element_position(&self.decoder, arg, length)?;
                self.items.remove(position);
                Ok(Value::Bool(true))
            }
            Member::Item => {
                let position = element_position(&self.decoder, arg, length)?;
                Ok(Value::Str(self.items[position].clone()))
            }
            Member::Replace => {
                let (index, value) = decode_pair(&self.decoder, arg, length)?;
                let position = element_position(&self.decoder, &index, length)?;
                self.items[position] = value;
                Ok(Value::Bool(true))
            }
            Member::Find => Ok(self
                .position_of(arg)
                .map_or(Value::Int(-1), Value::from)),
            Member::Contains => Ok(Value::Bool(self.position_of(arg).is_some())),
            Member::Remove => match self.position_of(arg) {
                Some(position) => {
                    self.items.remove(position);
                    Ok(Value::Bool(true))
                }
                None => Ok(Value::Bool(false)),
            },
            Member::Sort => {
                self.items.sort();
                Ok(Value::Bool(true))
            }
            Member::Reverse => {
                self.items.reverse();
                Ok(Value::Bool(true))
            }
            _ => Err(super::unknown_member(self.type_name(), member.name())),
        }
    }
}
