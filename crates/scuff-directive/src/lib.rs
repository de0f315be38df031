//! Corruption directive model and generator.
//!
//! A directive names one reversible point-mutation against a well-formed
//! encoding: the symbolic path of the targeted word, the corruption kind,
//! the byte offset resolved for one concrete buffer, and the mutation to
//! apply there. [`generate`] walks a schema depth-first against a buffer
//! instance and returns the flattened catalogue in traversal order.
//!
//! Directive identity (the kind) is schema-static; the offset is
//! instance-dynamic. A catalogue is valid only against the exact buffer
//! snapshot it was generated from and must be regenerated for any buffer
//! with different lengths.

pub mod directive;
pub mod generator;

pub use directive::{Mutation, ScuffCatalogue, ScuffDirective};
pub use generator::generate;
