//! Strict reference decoder.
//!
//! Validates an encoded sequence the way a defensive consumer should:
//! length prefixes must fit 32 bits and describe an in-bounds element
//! region, enum and address words must have clean upper bits, flags must be
//! exactly zero or one, amounts must stay below the all-ones sentinel, and
//! every out-of-line offset must land inside the buffer. The first
//! violation is reported with the path of the offending word.

use scuff_layout::{RecordPointer, SequencePointer};
use scuff_types::{
	FieldLayout, FieldPath, PathSegment, Word, WordBuffer, WordKind, WORD_SIZE,
};
use thiserror::Error;

/// Rejection reasons, each carrying the path of the word that failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
	#[error("length at `{path}` has bits set above bit 32")]
	DirtyLength { path: FieldPath },
	#[error("length at `{path}` claims an element region outside the buffer")]
	LengthOutOfBounds { path: FieldPath },
	#[error("enum at `{path}` has a value outside its discriminant range")]
	EnumOutOfRange { path: FieldPath },
	#[error("address at `{path}` has dirty bits above bit 160")]
	DirtyAddress { path: FieldPath },
	#[error("flag at `{path}` is neither zero nor one")]
	InvalidFlag { path: FieldPath },
	#[error("amount at `{path}` is the all-ones sentinel")]
	AmountOverflow { path: FieldPath },
	#[error("offset at `{path}` points outside the buffer")]
	OffsetOutOfBounds { path: FieldPath },
}

/// Validates the sequence rooted at `seq` against the buffer.
pub fn decode_sequence(
	seq: SequencePointer<'_>,
	buf: &WordBuffer,
) -> Result<(), DecodeError> {
	walk_sequence(seq, buf, FieldPath::root())
}

fn walk_sequence(
	seq: SequencePointer<'_>,
	buf: &WordBuffer,
	path: FieldPath,
) -> Result<(), DecodeError> {
	let length_path = || path.join(PathSegment::Length);
	let length = seq.length(buf);
	if length > Word::from(u32::MAX) {
		return Err(DecodeError::DirtyLength { path: length_path() });
	}
	let n = length.as_limbs()[0] as usize;

	let stride = seq.schema().stride();
	let end = seq
		.length_offset()
		.checked_add(WORD_SIZE)
		.and_then(|head| n.checked_mul(stride).and_then(|region| head.checked_add(region)));
	match end {
		Some(end) if end <= buf.len() => {}
		_ => return Err(DecodeError::LengthOutOfBounds { path: length_path() }),
	}

	let fixed = seq.schema().is_fixed_stride();
	for i in 0..n {
		let element_path = path.join(PathSegment::Index(i));
		// For dynamic element schemas the record head is reached through
		// an offset word: validate the raw word before dereferencing, so
		// dirty bits above the machine word reject instead of truncating.
		if !fixed {
			let relative = offset_word(buf.read_word(seq.element(i)), &element_path)?;
			let in_bounds = seq
				.head()
				.checked_add(relative)
				.and_then(|base| base.checked_add(seq.schema().head_width()))
				.is_some_and(|end| end <= buf.len());
			if !in_bounds {
				return Err(DecodeError::OffsetOutOfBounds { path: element_path });
			}
		}
		walk_record(seq.element_data(buf, i), buf, element_path)?;
	}
	Ok(())
}

/// An out-of-line offset word must fit a machine address; anything wider is
/// rejected, never truncated.
fn offset_word(word: Word, path: &FieldPath) -> Result<usize, DecodeError> {
	usize::try_from(word).map_err(|_| DecodeError::OffsetOutOfBounds { path: path.clone() })
}

fn walk_record(
	record: RecordPointer<'_>,
	buf: &WordBuffer,
	path: FieldPath,
) -> Result<(), DecodeError> {
	for (index, field) in record.schema().fields().iter().enumerate() {
		let field_path = path.join(PathSegment::Field(field.name().to_string()));
		match field.layout() {
			FieldLayout::Word(kind) => {
				let word = buf.read_word(record.field(index));
				check_word(*kind, word, field_path)?;
			}
			FieldLayout::Sequence(_) => {
				let relative = offset_word(buf.read_word(record.field(index)), &field_path)?;
				let in_bounds = record
					.offset()
					.checked_add(relative)
					.and_then(|base| base.checked_add(WORD_SIZE))
					.is_some_and(|end| end <= buf.len());
				if !in_bounds {
					return Err(DecodeError::OffsetOutOfBounds { path: field_path });
				}
				// Guaranteed Some for this layout, and the truncating
				// dereference now matches the validated word.
				let Some(nested) = record.sequence_field(buf, index) else {
					continue;
				};
				walk_sequence(nested, buf, field_path)?;
			}
		}
	}
	Ok(())
}

fn check_word(kind: WordKind, word: Word, path: FieldPath) -> Result<(), DecodeError> {
	match kind {
		WordKind::Enum { bits } => {
			if !(word >> bits as usize).is_zero() {
				return Err(DecodeError::EnumOutOfRange { path });
			}
		}
		WordKind::Address => {
			if !(word >> 160usize).is_zero() {
				return Err(DecodeError::DirtyAddress { path });
			}
		}
		WordKind::Flag => {
			if word > Word::from(1u64) {
				return Err(DecodeError::InvalidFlag { path });
			}
		}
		// The all-ones amount is reserved as an overflow probe; real
		// amounts never reach it.
		WordKind::Amount => {
			if word == Word::MAX {
				return Err(DecodeError::AmountOverflow { path });
			}
		}
		WordKind::Bytes32 => {}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use scuff_types::{FieldSchema, RecordSchema};

	fn listing_schema() -> RecordSchema {
		RecordSchema::new(
			"Listing",
			vec![
				FieldSchema::word("itemType", WordKind::Enum { bits: 8 }),
				FieldSchema::word("token", WordKind::Address),
				FieldSchema::word("amount", WordKind::Amount),
			],
		)
	}

	fn well_formed(n: u64) -> WordBuffer {
		let mut buf = WordBuffer::new();
		buf.push_word(Word::from(n));
		for i in 0..n {
			buf.push_word(Word::from(2u64));
			buf.push_word(Word::from(0xbeefu64));
			buf.push_word(Word::from(100u64 + i));
		}
		buf
	}

	#[test]
	fn accepts_well_formed_sequences() {
		let schema = listing_schema();
		let seq = SequencePointer::new(0, &schema);
		assert_eq!(decode_sequence(seq, &well_formed(0)), Ok(()));
		assert_eq!(decode_sequence(seq, &well_formed(4)), Ok(()));
	}

	#[test]
	fn rejects_dirty_length_with_its_path() {
		let schema = listing_schema();
		let seq = SequencePointer::new(0, &schema);
		let mut buf = well_formed(2);
		seq.set_max_length(&mut buf);

		let err = decode_sequence(seq, &buf).unwrap_err();
		assert!(matches!(err, DecodeError::DirtyLength { .. }));
		assert_eq!(err.to_string(), "length at `length` has bits set above bit 32");
	}

	#[test]
	fn rejects_length_past_the_buffer() {
		let schema = listing_schema();
		let seq = SequencePointer::new(0, &schema);
		let mut buf = well_formed(2);
		seq.set_length(&mut buf, 3);

		assert!(matches!(
			decode_sequence(seq, &buf),
			Err(DecodeError::LengthOutOfBounds { .. })
		));
	}

	#[test]
	fn rejects_each_dirty_word_kind() {
		let schema = listing_schema();
		let seq = SequencePointer::new(0, &schema);

		let mut buf = well_formed(2);
		buf.write_word(seq.element(1), Word::from(0x100u64)); // itemType past 8 bits
		assert!(matches!(
			decode_sequence(seq, &buf),
			Err(DecodeError::EnumOutOfRange { .. })
		));

		let mut buf = well_formed(2);
		buf.write_word(seq.element(1) + WORD_SIZE, Word::MAX << 160usize);
		let err = decode_sequence(seq, &buf).unwrap_err();
		assert!(matches!(err, DecodeError::DirtyAddress { .. }));
		assert_eq!(
			err.to_string(),
			"address at `element[1].token` has dirty bits above bit 160"
		);

		let mut buf = well_formed(2);
		buf.write_word(seq.element(0) + 2 * WORD_SIZE, Word::MAX);
		assert!(matches!(
			decode_sequence(seq, &buf),
			Err(DecodeError::AmountOverflow { .. })
		));
	}

	fn order_schema() -> RecordSchema {
		let payment = std::sync::Arc::new(RecordSchema::new(
			"Payment",
			vec![FieldSchema::word("amount", WordKind::Amount)],
		));
		RecordSchema::new(
			"Order",
			vec![
				FieldSchema::word("open", WordKind::Flag),
				FieldSchema::sequence("payments", payment),
			],
		)
	}

	/// One order at rel 0x20, one payment at rel 0x40 from the record.
	fn one_order_one_payment() -> WordBuffer {
		let mut buf = WordBuffer::new();
		buf.push_word(Word::from(1u64)); // length
		buf.push_word(Word::from(0x20u64)); // element 0 offset word
		buf.push_word(Word::ZERO); // open
		buf.push_word(Word::from(0x40u64)); // payments offset word
		buf.push_word(Word::from(1u64)); // payments length
		buf.push_word(Word::from(777u64)); // payments[0].amount
		buf
	}

	#[test]
	fn rejects_offset_words_wider_than_a_machine_word() {
		let schema = order_schema();
		let seq = SequencePointer::new(0, &schema);
		assert_eq!(decode_sequence(seq, &one_order_one_payment()), Ok(()));

		// Bits above bit 64 in the nested-sequence offset word must reject,
		// not truncate back to the well-formed 0x40.
		let mut buf = one_order_one_payment();
		let field = 3 * WORD_SIZE;
		buf.write_word(field, buf.read_word(field) | (Word::from(1u64) << 200usize));
		let err = decode_sequence(seq, &buf).unwrap_err();
		assert!(matches!(err, DecodeError::OffsetOutOfBounds { .. }));
		assert_eq!(
			err.to_string(),
			"offset at `element[0].payments` points outside the buffer"
		);

		// Same for the per-element offset word of a dynamic sequence.
		let mut buf = one_order_one_payment();
		buf.write_word(
			WORD_SIZE,
			buf.read_word(WORD_SIZE) | (Word::from(1u64) << 200usize),
		);
		let err = decode_sequence(seq, &buf).unwrap_err();
		assert!(matches!(err, DecodeError::OffsetOutOfBounds { .. }));
		assert_eq!(err.to_string(), "offset at `element[0]` points outside the buffer");
	}

	#[test]
	fn rejects_offsets_past_the_buffer() {
		let schema = order_schema();
		let seq = SequencePointer::new(0, &schema);
		let mut buf = one_order_one_payment();
		buf.write_word(3 * WORD_SIZE, Word::from(0x4000u64));
		assert!(matches!(
			decode_sequence(seq, &buf),
			Err(DecodeError::OffsetOutOfBounds { .. })
		));
	}
}
