//! Labeled tree subsystem.
//!
//! # Data Flow
//! ```text
//! document text
//!     → parser.rs (tokens, nesting, positions)
//!     → ObjectList (ordered, filterable items)
//!     → dsl decoders
//! ```
//!
//! # Design Decisions
//! - The decoders depend only on `ast`; text never reaches them
//! - One error per parse; syntax errors are not collected

pub mod ast;
pub mod parser;

pub use ast::{Item, Key, LineIndex, Literal, ObjectList, Pos, Value};
pub use parser::{parse, ParseError};
