//! The value tree the renderer works on.

use crate::Structured;
use std::fmt::Display;

/// A structured configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Named fields in declaration order.
    Record(Record),
    /// Key/value entries, rendered in the order held. Keys are `Text` or
    /// `Scalar` nodes so string keys can be told apart from numbers.
    Map(Vec<(Node, Node)>),
    /// Ordered elements.
    Seq(Vec<Node>),
    /// An absent optional value.
    Null,
    /// A string, rendered double-quoted.
    Text(String),
    /// Any other scalar, rendered in its display form.
    Scalar(String),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Scalar from any `Display` value; the usual way to render an enum.
    pub fn scalar(value: impl Display) -> Self {
        Self::Scalar(value.to_string())
    }

    pub fn seq<'a, T, I>(items: I) -> Self
    where
        T: Structured + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self::Seq(items.into_iter().map(Structured::to_node).collect())
    }

    /// Whether the value opens its own indented block (record, map or sequence).
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Record(_) | Self::Map(_) | Self::Seq(_))
    }
}

impl From<Record> for Node {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

/// A field descriptor: on-disk name, optional comment and value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub value: Node,
}

impl Field {
    /// Fields whose name starts with a lowercase letter are internal and
    /// never written.
    pub fn is_exported(&self) -> bool {
        !self.name.starts_with(char::is_lowercase)
    }
}

/// Builder for record nodes.
///
/// ```
/// use confsync_render::{Node, Record};
///
/// let node: Node = Record::new()
///     .described("Port", "Port the listener binds", &8080u16)
///     .field("Host", "localhost")
///     .into();
/// assert!(node.is_container());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<T: Structured + ?Sized>(self, name: &'static str, value: &T) -> Self {
        self.push(name, None, value)
    }

    pub fn described<T: Structured + ?Sized>(
        self,
        name: &'static str,
        description: &'static str,
        value: &T,
    ) -> Self {
        self.push(name, Some(description), value)
    }

    pub fn push<T: Structured + ?Sized>(
        mut self,
        name: &'static str,
        description: Option<&'static str>,
        value: &T,
    ) -> Self {
        self.fields.push(Field {
            name,
            description,
            value: value.to_node(),
        });
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
