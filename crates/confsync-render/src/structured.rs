//! Conversion of Rust values into [`Node`] trees.

use crate::node::{Node, Record};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::BuildHasher;

/// A value that can be written into a configuration document.
///
/// Records describe their fields with a static descriptor table, either by
/// hand through [`Record`](crate::Record) or with [`structured_record!`].
pub trait Structured {
    fn to_node(&self) -> Node;
}

/// Implements [`Structured`] for a record type from a field table.
///
/// Each entry maps a Rust field to its on-disk name, optionally followed by a
/// description that is written as a comment above the field.
///
/// ```
/// use confsync_render::{render, structured_record, Structured};
/// use std::collections::HashSet;
///
/// struct Network {
///     host: String,
///     port: u16,
/// }
///
/// structured_record!(Network {
///     host => "Host",
///     port => "Port": "Port the listener binds",
/// });
///
/// let network = Network { host: "0.0.0.0".into(), port: 8080 };
/// let text = render(&network.to_node(), 0, &HashSet::new());
/// assert_eq!(text, "Host: \"0.0.0.0\"\n# Port the listener binds\nPort: 8080");
/// ```
#[macro_export]
macro_rules! structured_record {
    (@doc) => {
        ::core::option::Option::None
    };
    (@doc $doc:literal) => {
        ::core::option::Option::Some($doc)
    };
    ($ty:ty { $($field:ident => $name:literal $(: $doc:literal)?),* $(,)? }) => {
        impl $crate::Structured for $ty {
            fn to_node(&self) -> $crate::Node {
                let record = $crate::Record::new();
                $(
                    let record = record.push(
                        $name,
                        $crate::structured_record!(@doc $($doc)?),
                        &self.$field,
                    );
                )*
                $crate::Node::Record(record)
            }
        }
    };
}

impl Structured for Node {
    fn to_node(&self) -> Node {
        self.clone()
    }
}

impl Structured for Record {
    fn to_node(&self) -> Node {
        Node::Record(self.clone())
    }
}

impl Structured for str {
    fn to_node(&self) -> Node {
        Node::Text(self.to_string())
    }
}

impl Structured for String {
    fn to_node(&self) -> Node {
        Node::Text(self.clone())
    }
}

impl Structured for char {
    fn to_node(&self) -> Node {
        Node::Text(self.to_string())
    }
}

macro_rules! display_scalar {
    ($($ty:ty),*) => {
        $(
            impl Structured for $ty {
                fn to_node(&self) -> Node {
                    Node::Scalar(self.to_string())
                }
            }
        )*
    };
}

display_scalar!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

macro_rules! float_scalar {
    ($($ty:ty),*) => {
        $(
            impl Structured for $ty {
                fn to_node(&self) -> Node {
                    let text = if self.is_nan() {
                        ".nan".to_string()
                    } else if self.is_infinite() {
                        (if self.is_sign_positive() { ".inf" } else { "-.inf" }).to_string()
                    } else {
                        self.to_string()
                    };
                    Node::Scalar(text)
                }
            }
        )*
    };
}

float_scalar!(f32, f64);

impl<T: Structured + ?Sized> Structured for &T {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl<T: Structured + ?Sized> Structured for Box<T> {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl<T: Structured> Structured for Option<T> {
    fn to_node(&self) -> Node {
        match self {
            Some(value) => value.to_node(),
            None => Node::Null,
        }
    }
}

impl<T: Structured> Structured for [T] {
    fn to_node(&self) -> Node {
        Node::seq(self)
    }
}

impl<T: Structured, const N: usize> Structured for [T; N] {
    fn to_node(&self) -> Node {
        Node::seq(self)
    }
}

impl<T: Structured> Structured for Vec<T> {
    fn to_node(&self) -> Node {
        Node::seq(self)
    }
}

impl<T: Structured> Structured for BTreeSet<T> {
    fn to_node(&self) -> Node {
        Node::seq(self)
    }
}

impl<K: Structured, V: Structured> Structured for BTreeMap<K, V> {
    fn to_node(&self) -> Node {
        Node::Map(self.iter().map(|(k, v)| (k.to_node(), v.to_node())).collect())
    }
}

/// Keys are sorted by their text so the rendered file does not change
/// between runs.
impl<K: Structured, V: Structured, S: BuildHasher> Structured for HashMap<K, V, S> {
    fn to_node(&self) -> Node {
        let mut entries: Vec<(Node, Node)> = self
            .iter()
            .map(|(k, v)| (k.to_node(), v.to_node()))
            .collect();
        entries.sort_by(|a, b| key_text(&a.0).cmp(key_text(&b.0)));
        Node::Map(entries)
    }
}

/// Entries keep insertion order.
impl<K: Structured, V: Structured, S: BuildHasher> Structured for IndexMap<K, V, S> {
    fn to_node(&self) -> Node {
        Node::Map(self.iter().map(|(k, v)| (k.to_node(), v.to_node())).collect())
    }
}

fn key_text(key: &Node) -> &str {
    match key {
        Node::Text(text) | Node::Scalar(text) => text,
        _ => "",
    }
}
