//! Bounds-validated counterparts to the unchecked pointer arithmetic.
//!
//! These exist for the outermost entry points, where the caller cannot
//! otherwise guarantee that an index or a length prefix is sane. Everything
//! below those entry points uses the raw [`pointer`](crate::pointer)
//! operations.

use crate::pointer::{RecordPointer, SequencePointer};
use scuff_types::{LayoutError, WordBuffer, WORD_SIZE};

/// Reads a sequence's length as a machine word, rejecting prefixes that do
/// not fit in 64 bits.
pub fn sequence_len(seq: SequencePointer<'_>, buf: &WordBuffer) -> Result<u64, LayoutError> {
	let word = seq.length(buf);
	u64::try_from(word).map_err(|_| LayoutError::LengthOverflow)
}

/// Reads a sequence's length and verifies its element region lies within
/// the buffer: `head + length * stride <= buffer length`. Returns the
/// element count.
pub fn bounded_len(seq: SequencePointer<'_>, buf: &WordBuffer) -> Result<usize, LayoutError> {
	let stride = seq.schema().stride();
	let length = sequence_len(seq, buf)?;
	let out_of_range = || LayoutError::LengthOutOfRange {
		length,
		stride,
		buffer_len: buf.len(),
	};

	let n = usize::try_from(length).map_err(|_| out_of_range())?;
	let region = n.checked_mul(stride).ok_or_else(out_of_range)?;
	let end = seq
		.length_offset()
		.checked_add(WORD_SIZE)
		.and_then(|head| head.checked_add(region))
		.ok_or_else(out_of_range)?;
	if end > buf.len() {
		return Err(out_of_range());
	}
	Ok(n)
}

/// Element lookup with the index validated against the true length.
pub fn element_data<'s>(
	seq: SequencePointer<'s>,
	buf: &WordBuffer,
	index: usize,
) -> Result<RecordPointer<'s>, LayoutError> {
	let length = bounded_len(seq, buf)?;
	if index >= length {
		return Err(LayoutError::IndexOutOfRange { index, length });
	}
	Ok(seq.element_data(buf, index))
}
