//! Error types shared across the abi-scuff crates.

use thiserror::Error;

/// Errors from the checked layout layer.
///
/// The unchecked pointer arithmetic never produces these; they are surfaced
/// only by the `checked` entry points and by directive generation, where the
/// caller cannot otherwise guarantee bounds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
	/// The length prefix claims an element region that cannot lie within
	/// the buffer.
	#[error(
		"sequence length {length} with stride {stride} exceeds the {buffer_len}-byte buffer"
	)]
	LengthOutOfRange {
		length: u64,
		stride: usize,
		buffer_len: usize,
	},
	/// The length prefix does not even fit in a machine word.
	#[error("sequence length prefix does not fit in 64 bits")]
	LengthOverflow,
	/// Element index past the sequence's true length.
	#[error("element index {index} out of range for sequence of length {length}")]
	IndexOutOfRange { index: usize, length: usize },
}

/// Error from decoding a recorded scuff-kind identifier.
///
/// This path exists to decode previously-recorded failing test-case ids
/// during triage, so an unknown identifier must fail loudly rather than map
/// to a default.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScuffKindError {
	#[error("unknown scuff kind identifier {0}")]
	UnknownId(u32),
}
