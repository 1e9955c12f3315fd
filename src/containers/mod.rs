//! # Containers
//!
//! The host-facing collection types. Each one wraps a standard library
//! container and answers member calls of the form `member(argument) -> Value`.
//!
//! ## Module Structure
//!
//! - **`list`**: `Vec`-backed ordered list
//! - **`set`**: `BTreeSet`-backed ordered set
//! - **`map`**: `BTreeMap`-backed ordered string map
//! - **`stack`**: LIFO stack
//! - **`queue`**: FIFO queue
//!
//! Members shared by every container (`Count`, `Clear`, `IsEmpty`,
//! `ToString`, `Delimiter`, `Splice`) are answered by the [`Container`]
//! trait itself; each type only implements what is specific to it.

use std::fmt;
use std::str::FromStr;

use crate::argument::{ArgumentDecoder, DecodedArgs, IndexPolicy, OperationKind, SliceSpec};
use crate::errors::{ErrorKind, SeqError};
use crate::value::Value;

pub mod list;
pub mod map;
pub mod queue;
pub mod set;
pub mod stack;

pub use list::List;
pub use map::Map;
pub use queue::Queue;
pub use set::Set;
pub use stack::Stack;

// ============================================================================
// MEMBERS
// ============================================================================

/// Every member name a container can answer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Member {
    Add,
    Append,
    Clear,
    Contains,
    Count,
    Delimiter,
    Erase,
    Find,
    Get,
    Insert,
    IsEmpty,
    Item,
    Key,
    Keys,
    Peek,
    Pop,
    Push,
    Remove,
    Replace,
    Reverse,
    Sort,
    Splice,
    ToString,
}

/// Members every container answers.
pub const COMMON_MEMBERS: &[Member] = &[
    Member::Count,
    Member::Clear,
    Member::IsEmpty,
    Member::ToString,
    Member::Delimiter,
    Member::Splice,
];

impl Member {
    pub fn name(self) -> &'static str {
        match self {
            Member::Add => "Add",
            Member::Append => "Append",
            Member::Clear => "Clear",
            Member::Contains => "Contains",
            Member::Count => "Count",
            Member::Delimiter => "Delimiter",
            Member::Erase => "Erase",
            Member::Find => "Find",
            Member::Get => "Get",
            Member::Insert => "Insert",
            Member::IsEmpty => "IsEmpty",
            Member::Item => "Item",
            Member::Key => "Key",
            Member::Keys => "Keys",
            Member::Peek => "Peek",
            Member::Pop => "Pop",
            Member::Push => "Push",
            Member::Remove => "Remove",
            Member::Replace => "Replace",
            Member::Reverse => "Reverse",
            Member::Sort => "Sort",
            Member::Splice => "Splice",
            Member::ToString => "ToString",
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Member {
    type Err = ();

    /// Member names are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let member = match s.to_ascii_lowercase().as_str() {
            "add" => Member::Add,
            "append" => Member::Append,
            "clear" => Member::Clear,
            "contains" => Member::Contains,
            "count" => Member::Count,
            "delimiter" => Member::Delimiter,
            "erase" => Member::Erase,
            "find" => Member::Find,
            "get" => Member::Get,
            "insert" => Member::Insert,
            "isempty" => Member::IsEmpty,
            "item" => Member::Item,
            "key" => Member::Key,
            "keys" => Member::Keys,
            "peek" => Member::Peek,
            "pop" => Member::Pop,
            "push" => Member::Push,
            "remove" => Member::Remove,
            "replace" => Member::Replace,
            "reverse" => Member::Reverse,
            "sort" => Member::Sort,
            "splice" => Member::Splice,
            "tostring" => Member::ToString,
            _ => return Err(()),
        };
        Ok(member)
    }
}

// ============================================================================
// CONTAINER TRAIT
// ============================================================================

/// A collection reachable through the string call protocol.
pub trait Container {
    fn type_name(&self) -> &'static str;

    /// Members specific to this type, on top of [`COMMON_MEMBERS`].
    fn members(&self) -> &'static [Member];

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn decoder(&self) -> &ArgumentDecoder;

    fn decoder_mut(&mut self) -> &mut ArgumentDecoder;

    /// Elements in the order positions refer to them.
    fn elements(&self) -> Vec<&str>;

    fn clear(&mut self);

    /// Renders the whole container as one string.
    fn render(&self) -> String {
        self.decoder().join(self.elements())
    }

    /// Answers a member from [`Container::members`].
    fn call_member(&mut self, member: Member, arg: &str) -> Result<Value, SeqError>;

    fn supports(&self, member: Member) -> bool {
        COMMON_MEMBERS.contains(&member) || self.members().contains(&member)
    }

    /// Dispatches one call. On error the container is left unchanged.
    fn call(&mut self, member: Member, arg: &str) -> Result<Value, SeqError> {
        if !self.supports(member) {
            return Err(unknown_member(self.type_name(), member.name()));
        }
        match member {
            Member::Count => Ok(Value::from(self.len())),
            Member::Clear => {
                self.clear();
                Ok(Value::Bool(true))
            }
            Member::IsEmpty => Ok(Value::Bool(self.is_empty())),
            Member::ToString => Ok(Value::Str(self.render())),
            Member::Delimiter if arg.is_empty() => {
                Ok(Value::Str(self.decoder().delimiter().to_string()))
            }
            Member::Delimiter => {
                self.decoder_mut().set_delimiter(arg)?;
                Ok(Value::Bool(true))
            }
            Member::Splice => Ok(Value::Str(self.splice(arg)?)),
            _ => self.call_member(member, arg),
        }
    }

    /// Slices the elements by `arg` and joins the result.
    fn splice(&self, arg: &str) -> Result<String, SeqError> {
        let length = self.len();
        let DecodedArgs::SliceSpec(tokens) =
            self.decoder().decode(arg, OperationKind::Slice, length)?
        else {
            return Ok(String::new());
        };
        let selected = match SliceSpec::resolve(&tokens, length) {
            Some(spec) => spec.select(self.elements()),
            None => Vec::new(),
        };
        Ok(self.decoder().join(selected))
    }
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

pub(crate) fn unknown_member(type_name: &str, member: &str) -> SeqError {
    SeqError::unsourced(
        ErrorKind::UnknownMember {
            type_name: type_name.into(),
            member: member.into(),
        },
        "dispatch",
    )
}

pub(crate) fn empty_container(member: Member) -> SeqError {
    SeqError::unsourced(
        ErrorKind::EmptyContainer {
            operation: member.name().into(),
        },
        "dispatch",
    )
}

/// Decodes `arg` as the position of an existing element.
///
/// Index resolution maps anything on an empty sequence to `0`; that is a
/// valid insertion point but never an element, so it is rejected here.
pub(crate) fn element_position(
    decoder: &ArgumentDecoder,
    arg: &str,
    length: usize,
) -> Result<usize, SeqError> {
    match decoder.decode(arg, OperationKind::Index(IndexPolicy::Element), length)? {
        DecodedArgs::Index(position) if position < length => Ok(position),
        _ => Err(SeqError::in_argument(
            ErrorKind::InvalidIndex {
                token: arg.trim().to_string(),
                length,
                policy: IndexPolicy::Element,
            },
            arg,
        )),
    }
}

/// Decodes `arg` as a list of values split on the element delimiter.
pub(crate) fn decode_values(decoder: &ArgumentDecoder, arg: &str) -> Result<Vec<String>, SeqError> {
    match decoder.decode(arg, OperationKind::Values, 0)? {
        DecodedArgs::Values(values) => Ok(values),
        _ => Ok(Vec::new()),
    }
}

/// Decodes `arg` as exactly two comma-separated operands.
pub(crate) fn decode_pair(
    decoder: &ArgumentDecoder,
    arg: &str,
    length: usize,
) -> Result<(String, String), SeqError> {
    match decoder.decode(arg, OperationKind::TwoValues, length)? {
        DecodedArgs::TwoValues(first, second) => Ok((first, second)),
        _ => Ok((String::new(), String::new())),
    }
}

// ============================================================================
// KINDS AND INSTANCES
// ============================================================================

/// The container types a host can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    List,
    Set,
    Map,
    Stack,
    Queue,
}

impl Kind {
    pub const ALL: [Kind; 5] = [Kind::List, Kind::Set, Kind::Map, Kind::Stack, Kind::Queue];

    pub fn name(self) -> &'static str {
        match self {
            Kind::List => "list",
            Kind::Set => "set",
            Kind::Map => "map",
            Kind::Stack => "stack",
            Kind::Queue => "queue",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                SeqError::unsourced(
                    ErrorKind::UnknownKind {
                        kind: s.to_string(),
                    },
                    "session",
                )
            })
    }
}

/// One live container of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Instance {
    List(List),
    Set(Set),
    Map(Map),
    Stack(Stack),
    Queue(Queue),
}

impl Instance {
    pub fn new(kind: Kind, delimiter: char) -> Self {
        let decoder = ArgumentDecoder::new(delimiter);
        match kind {
            Kind::List => Instance::List(List::with_decoder(decoder)),
            Kind::Set => Instance::Set(Set::with_decoder(decoder)),
            Kind::Map => Instance::Map(Map::with_decoder(decoder)),
            Kind::Stack => Instance::Stack(Stack::with_decoder(decoder)),
            Kind::Queue => Instance::Queue(Queue::with_decoder(decoder)),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Instance::List(_) => Kind::List,
            Instance::Set(_) => Kind::Set,
            Instance::Map(_) => Kind::Map,
            Instance::Stack(_) => Kind::Stack,
            Instance::Queue(_) => Kind::Queue,
        }
    }

    pub fn as_container(&self) -> &dyn Container {
        match self {
            Instance::List(c) => c,
            Instance::Set(c) => c,
            Instance::Map(c) => c,
            Instance::Stack(c) => c,
            Instance::Queue(c) => c,
        }
    }

    pub fn as_container_mut(&mut self) -> &mut dyn Container {
        match self {
            Instance::List(c) => c,
            Instance::Set(c) => c,
            Instance::Map(c) => c,
            Instance::Stack(c) => c,
            Instance::Queue(c) => c,
        }
    }

    /// Parses `member` and dispatches it.
    pub fn call(&mut self, member: &str, arg: &str) -> Result<Value, SeqError> {
        let container = self.as_container_mut();
        let parsed: Member = member
            .parse()
            .map_err(|_| unknown_member(container.type_name(), member))?;
        container.call(parsed, arg)
    }
}
