//! Schema-driven offset calculator for length-prefixed array-of-struct
//! encodings.
//!
//! Pointers here are ephemeral coordinates: a byte offset paired with a
//! schema reference, recomputed on demand and never persisted. All address
//! arithmetic in [`pointer`] is unchecked and wrapping; validating an index
//! against the sequence's true length is the caller's contract. The
//! [`checked`] module provides bounds-validated counterparts for the
//! outermost harness entry points.

pub mod checked;
pub mod pointer;

pub use pointer::{FieldPointer, RecordPointer, SequencePointer};
