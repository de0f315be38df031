//! Core types for the abi-scuff toolkit.
//!
//! This crate defines the pieces shared by the offset calculator and the
//! directive generator: the word-addressed buffer primitive, the value-level
//! record schema (including the per-field corruption policy), the corruption
//! kind enumeration with its stable identifiers, field paths for addressing
//! directives, and the common error types.

pub mod buffer;
pub mod errors;
pub mod kind;
pub mod path;
pub mod schema;

pub use buffer::{Word, WordBuffer, WORD_SIZE};
pub use errors::{LayoutError, ScuffKindError};
pub use kind::ScuffKind;
pub use path::{FieldPath, PathSegment};
pub use schema::{FieldLayout, FieldSchema, RecordSchema, WordKind, LENGTH_BITS, OFFSET_BITS};
