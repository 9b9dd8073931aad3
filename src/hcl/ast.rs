//! Labeled tree produced by the parser and consumed by the decoders.
//!
//! # Shape
//! ```text
//! policy "quota" "per-app" {     Item { keys: [policy, quota, per-app], value: Object }
//!   enabled = false              Item { keys: [enabled], value: Literal(Bool) }
//!   allow { count = 3 }          Item { keys: [allow], value: Object }
//! }
//! ```
//!
//! # Design Decisions
//! - `filter` strips the matched key, so a filtered `policy` item carries
//!   `[type, name]` and a filtered `header "X"` item carries `[X]`
//! - Every key and value remembers where it started in the source
//! - Items keep document order; nothing is sorted or merged

use std::fmt;

use serde::Serialize;

/// A position in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Pos {
    /// Byte offset from the start of the document.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

/// Byte offsets of every line start in a source, for repeated position
/// lookups without rescanning the text.
#[derive(Debug, Clone)]
pub struct LineIndex<'s> {
    source: &'s str,
    starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    pub fn new(source: &'s str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { source, starts }
    }

    /// Position of `offset`, clamped to the end of the source.
    pub fn pos(&self, offset: usize) -> Pos {
        let offset = offset.min(self.source.len());
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line - 1];
        let column = self.source[line_start..offset].chars().count() + 1;
        Pos {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One label token of an item.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub token: String,
    pub pos: Pos,
}

impl Key {
    pub fn new(token: impl Into<String>, pos: Pos) -> Self {
        Self {
            token: token.into(),
            pos,
        }
    }
}

/// Scalar values.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Literal {
    /// Human readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::String(_) => "string",
            Literal::Int(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => f.write_str(s),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(v) => write!(f, "{}", v),
            Literal::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// The value side of an item.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Literal { pos: Pos, literal: Literal },
    List { pos: Pos, values: Vec<Value> },
    Object { pos: Pos, list: ObjectList },
}

impl Value {
    /// Position where the value starts (the `{` for objects).
    pub fn pos(&self) -> Pos {
        match self {
            Value::Literal { pos, .. } | Value::List { pos, .. } | Value::Object { pos, .. } => {
                *pos
            }
        }
    }

    pub fn as_object(&self) -> Option<&ObjectList> {
        match self {
            Value::Object { list, .. } => Some(list),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Value::Literal { literal, .. } => Some(literal),
            _ => None,
        }
    }

    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Literal { literal, .. } => literal.type_name(),
            Value::List { .. } => "list",
            Value::Object { .. } => "object",
        }
    }
}

/// A single entry in an object: zero or more keys and a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub keys: Vec<Key>,
    pub value: Value,
}

impl Item {
    /// Position of the item's value, which is where errors are reported.
    pub fn pos(&self) -> Pos {
        self.value.pos()
    }

    /// The label at `index`, if present and non-empty.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.keys
            .get(index)
            .map(|k| k.token.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn as_object(&self) -> Option<&ObjectList> {
        self.value.as_object()
    }
}

/// An ordered list of items: the body of a document or of a block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectList {
    pub items: Vec<Item>,
}

impl ObjectList {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Items whose first key equals `key`, in document order, with that key
    /// removed.
    pub fn filter(&self, key: &str) -> ObjectList {
        self.filter_any(&[key])
    }

    /// Like [`ObjectList::filter`], matching any of `keys` while keeping the
    /// document order across them.
    pub fn filter_any(&self, keys: &[&str]) -> ObjectList {
        let items = self
            .items
            .iter()
            .filter(|item| {
                item.keys
                    .first()
                    .is_some_and(|k| keys.contains(&k.token.as_str()))
            })
            .map(|item| Item {
                keys: item.keys[1..].to_vec(),
                value: item.value.clone(),
            })
            .collect();
        ObjectList { items }
    }

    /// Whether a direct attribute named `key` exists, whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }

    /// The value of the direct attribute `key`. A key given more than once
    /// resolves to the last occurrence.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.items
            .iter()
            .rev()
            .find(|item| item.keys.len() == 1 && item.keys[0].token == key)
            .map(|item| &item.value)
    }
}

impl IntoIterator for ObjectList {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ObjectList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
