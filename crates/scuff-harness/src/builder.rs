//! Well-formed encoding construction.
//!
//! Builds the head/tail encoding the pointer layer expects from a plain
//! value model, so tests and fuzz corpora can start from a known-good
//! buffer: fixed-stride sequences as `length` + packed record heads,
//! dynamic sequences as `length` + per-element offset words + out-of-line
//! payloads, nested sequence fields as record-relative offsets into the
//! record's own tail.

use scuff_types::{FieldLayout, RecordSchema, Word, WordBuffer, WORD_SIZE};
use thiserror::Error;

/// Errors from encoding a value model that does not match its schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
	#[error("record for `{schema}` has {got} values, schema has {expected} fields")]
	FieldCountMismatch {
		schema: &'static str,
		expected: usize,
		got: usize,
	},
	#[error("value for field `{field}` of `{schema}` does not match the field's layout")]
	ValueKindMismatch {
		schema: &'static str,
		field: &'static str,
	},
}

/// A value for one field: a leaf word, or the records of a nested sequence.
#[derive(Debug, Clone)]
pub enum FieldValue {
	Word(Word),
	Sequence(Vec<RecordValue>),
}

impl FieldValue {
	/// Convenience for small scalar fields.
	pub fn word(value: u64) -> Self {
		FieldValue::Word(Word::from(value))
	}
}

/// Values for one record, parallel to the schema's field order.
#[derive(Debug, Clone)]
pub struct RecordValue {
	values: Vec<FieldValue>,
}

impl RecordValue {
	pub fn new(values: Vec<FieldValue>) -> Self {
		Self { values }
	}

	pub fn values(&self) -> &[FieldValue] {
		&self.values
	}
}

/// Builds the encoding of one sequence of records.
pub struct SequenceBuilder<'s> {
	schema: &'s RecordSchema,
	records: Vec<RecordValue>,
}

impl<'s> SequenceBuilder<'s> {
	pub fn new(schema: &'s RecordSchema) -> Self {
		Self {
			schema,
			records: Vec::new(),
		}
	}

	pub fn push(mut self, record: RecordValue) -> Self {
		self.records.push(record);
		self
	}

	/// Encodes the sequence into a fresh buffer, with the sequence based
	/// at offset 0.
	pub fn encode(&self) -> Result<WordBuffer, BuildError> {
		let bytes = encode_sequence(self.schema, &self.records)?;
		Ok(WordBuffer::from_bytes(bytes))
	}
}

fn encode_sequence(
	schema: &RecordSchema,
	records: &[RecordValue],
) -> Result<Vec<u8>, BuildError> {
	let mut out = Vec::new();
	out.extend_from_slice(&Word::from(records.len()).to_be_bytes::<WORD_SIZE>());

	if schema.is_fixed_stride() {
		for record in records {
			out.extend_from_slice(&encode_record(schema, record)?);
		}
		return Ok(out);
	}

	// Offset words first, each relative to the start of the element
	// region, then the payloads.
	let mut payloads: Vec<Vec<u8>> = Vec::with_capacity(records.len());
	let mut relative = records.len() * WORD_SIZE;
	for record in records {
		let payload = encode_record(schema, record)?;
		out.extend_from_slice(&Word::from(relative).to_be_bytes::<WORD_SIZE>());
		relative += payload.len();
		payloads.push(payload);
	}
	for payload in payloads {
		out.extend_from_slice(&payload);
	}
	Ok(out)
}

/// Encodes one record: its head words followed by its tail, with nested
/// sequence offsets relative to the record's own start.
fn encode_record(schema: &RecordSchema, record: &RecordValue) -> Result<Vec<u8>, BuildError> {
	let fields = schema.fields();
	if record.values().len() != fields.len() {
		return Err(BuildError::FieldCountMismatch {
			schema: schema.name(),
			expected: fields.len(),
			got: record.values().len(),
		});
	}

	let mut head = Vec::with_capacity(schema.head_width());
	let mut tail = Vec::new();
	for (field, value) in fields.iter().zip(record.values()) {
		match (field.layout(), value) {
			(FieldLayout::Word(_), FieldValue::Word(word)) => {
				head.extend_from_slice(&word.to_be_bytes::<WORD_SIZE>());
			}
			(FieldLayout::Sequence(element), FieldValue::Sequence(nested)) => {
				let offset = schema.head_width() + tail.len();
				head.extend_from_slice(&Word::from(offset).to_be_bytes::<WORD_SIZE>());
				tail.extend_from_slice(&encode_sequence(element, nested)?);
			}
			_ => {
				return Err(BuildError::ValueKindMismatch {
					schema: schema.name(),
					field: field.name(),
				});
			}
		}
	}
	head.extend_from_slice(&tail);
	Ok(head)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::decode::decode_sequence;
	use scuff_layout::SequencePointer;
	use scuff_types::{FieldSchema, WordKind};
	use std::sync::Arc;

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

	fn listing(item_type: u64, token: u64, amount: u64) -> RecordValue {
		RecordValue::new(vec![
			FieldValue::word(item_type),
			FieldValue::word(token),
			FieldValue::word(amount),
		])
	}

	#[test]
	fn fixed_stride_encoding_is_length_then_packed_heads() {
		let schema = listing_schema();
		let buf = SequenceBuilder::new(&schema)
			.push(listing(1, 0xaa, 500))
			.push(listing(2, 0xbb, 900))
			.encode()
			.unwrap();

		assert_eq!(buf.len(), WORD_SIZE + 2 * schema.stride());
		let seq = SequencePointer::new(0, &schema);
		assert_eq!(seq.length(&buf), Word::from(2u64));
		assert_eq!(
			seq.element_data(&buf, 1)
				.field_named("amount")
				.unwrap()
				.read(&buf),
			Word::from(900u64)
		);
		assert_eq!(decode_sequence(seq, &buf), Ok(()));
	}

	#[test]
	fn nested_sequences_encode_out_of_line() {
		let inner = Arc::new(RecordSchema::new(
			"Payment",
			vec![FieldSchema::word("amount", WordKind::Amount)],
		));
		let outer = RecordSchema::new(
			"Order",
			vec![
				FieldSchema::word("offerer", WordKind::Address),
				FieldSchema::sequence("payments", Arc::clone(&inner)),
			],
		);

		let buf = SequenceBuilder::new(&outer)
			.push(RecordValue::new(vec![
				FieldValue::word(0xaa),
				FieldValue::Sequence(vec![
					RecordValue::new(vec![FieldValue::word(500)]),
					RecordValue::new(vec![FieldValue::word(900)]),
				]),
			]))
			.encode()
			.unwrap();

		let seq = SequencePointer::new(0, &outer);
		assert_eq!(decode_sequence(seq, &buf), Ok(()));

		let record = seq.element_data(&buf, 0);
		let payments = record.sequence_field(&buf, 1).unwrap();
		assert_eq!(payments.length(&buf), Word::from(2u64));
		assert_eq!(
			payments
				.element_data(&buf, 1)
				.field_named("amount")
				.unwrap()
				.read(&buf),
			Word::from(900u64)
		);
	}

	#[test]
	fn shape_mismatches_are_rejected() {
		let schema = listing_schema();
		let short = SequenceBuilder::new(&schema)
			.push(RecordValue::new(vec![FieldValue::word(1)]))
			.encode();
		assert_eq!(
			short.unwrap_err(),
			BuildError::FieldCountMismatch {
				schema: "Listing",
				expected: 3,
				got: 1,
			}
		);

		let wrong_kind = SequenceBuilder::new(&schema)
			.push(RecordValue::new(vec![
				FieldValue::Sequence(vec![]),
				FieldValue::word(0),
				FieldValue::word(0),
			]))
			.encode();
		assert_eq!(
			wrong_kind.unwrap_err(),
			BuildError::ValueKindMismatch {
				schema: "Listing",
				field: "itemType",
			}
		);
	}
}
