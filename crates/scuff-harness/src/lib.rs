//! Test harness for decode-rejection fuzzing.
//!
//! Ties the other crates together the way a fuzz driver uses them: build a
//! well-formed encoding from a value model, generate the scuff catalogue
//! for it, then apply each directive to a clone of the buffer and feed the
//! result to the strict reference decoder, expecting a rejection. Directives
//! the decoder accepts anyway are reported as survivors.

pub mod builder;
pub mod decode;
pub mod runner;

pub use builder::{BuildError, FieldValue, RecordValue, SequenceBuilder};
pub use decode::{decode_sequence, DecodeError};
pub use runner::{run_catalogue, RunReport, Survivor};
