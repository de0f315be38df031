//! Value-level record schemas.
//!
//! A schema is plain data describing one record type: an ordered list of
//! named fields, each occupying one head word. A field is either a leaf word
//! carrying a corruption policy, or a nested length-prefixed sequence stored
//! out-of-line (the head word holds the tail offset, head/tail convention).
//! Schemas are built once, never mutated, and shared read-only by the offset
//! calculator and the directive generator.

use crate::buffer::WORD_SIZE;
use crate::kind::ScuffKind;
use std::sync::Arc;

/// Meaningful bit width of a sequence length prefix. Consumers are expected
/// to reject lengths with bits set above this.
pub const LENGTH_BITS: u32 = 32;

/// Meaningful bit width of an out-of-line offset word: offsets must fit a
/// machine word, and consumers must reject (not truncate) anything wider.
pub const OFFSET_BITS: u32 = 64;

/// Interpretation of one leaf word, carrying its corruption policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
	/// Small discriminant occupying the low `bits` bits.
	Enum { bits: u32 },
	/// 160-bit account address, upper 96 bits must be zero.
	Address,
	/// Unsigned amount; the full word is meaningful.
	Amount,
	/// Boolean-like word, must be exactly zero or one.
	Flag,
	/// Opaque 32-byte value; every bit pattern is well-formed.
	Bytes32,
}

impl WordKind {
	/// The corruption this kind of word receives, if any.
	pub fn scuff(self) -> Option<ScuffKind> {
		match self {
			WordKind::Enum { .. } => Some(ScuffKind::DirtyUpperBits),
			WordKind::Address => Some(ScuffKind::DirtyUpperBits),
			WordKind::Amount => Some(ScuffKind::MaxValue),
			WordKind::Flag => Some(ScuffKind::BoolFlip),
			WordKind::Bytes32 => None,
		}
	}

	/// Number of low bits that carry meaning; bits above these are the
	/// dirty-bit target.
	pub fn meaningful_bits(self) -> u32 {
		match self {
			WordKind::Enum { bits } => bits,
			WordKind::Address => 160,
			WordKind::Flag => 1,
			WordKind::Amount | WordKind::Bytes32 => 256,
		}
	}
}

/// Layout of one field within a record's head region.
#[derive(Debug, Clone)]
pub enum FieldLayout {
	/// One fixed head word.
	Word(WordKind),
	/// Nested length-prefixed sequence; the head word holds the offset of
	/// the sequence relative to the record's own start.
	Sequence(Arc<RecordSchema>),
}

/// A named field of a record.
#[derive(Debug, Clone)]
pub struct FieldSchema {
	name: &'static str,
	layout: FieldLayout,
}

impl FieldSchema {
	/// A leaf word field.
	pub fn word(name: &'static str, kind: WordKind) -> Self {
		Self {
			name,
			layout: FieldLayout::Word(kind),
		}
	}

	/// A nested sequence field.
	pub fn sequence(name: &'static str, element: Arc<RecordSchema>) -> Self {
		Self {
			name,
			layout: FieldLayout::Sequence(element),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn layout(&self) -> &FieldLayout {
		&self.layout
	}
}

/// Immutable description of one record type.
#[derive(Debug, Clone)]
pub struct RecordSchema {
	name: &'static str,
	fields: Vec<FieldSchema>,
}

impl RecordSchema {
	pub fn new(name: &'static str, fields: Vec<FieldSchema>) -> Self {
		Self { name, fields }
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn fields(&self) -> &[FieldSchema] {
		&self.fields
	}

	pub fn field(&self, index: usize) -> Option<&FieldSchema> {
		self.fields.get(index)
	}

	pub fn field_named(&self, name: &str) -> Option<(usize, &FieldSchema)> {
		self.fields
			.iter()
			.enumerate()
			.find(|(_, field)| field.name == name)
	}

	/// Byte width of the fixed head region: one word per field.
	pub fn head_width(&self) -> usize {
		self.fields.len() * WORD_SIZE
	}

	/// A schema is fixed-stride iff it contains no out-of-line field.
	pub fn is_fixed_stride(&self) -> bool {
		self.fields
			.iter()
			.all(|field| matches!(field.layout, FieldLayout::Word(_)))
	}

	/// Per-element stride within a sequence of this record: the full head
	/// width for fixed-stride records, or one offset word for records with
	/// out-of-line payloads.
	pub fn stride(&self) -> usize {
		if self.is_fixed_stride() {
			self.head_width()
		} else {
			WORD_SIZE
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn consideration_item() -> RecordSchema {
		RecordSchema::new(
			"ConsiderationItem",
			vec![
				FieldSchema::word("itemType", WordKind::Enum { bits: 8 }),
				FieldSchema::word("token", WordKind::Address),
				FieldSchema::word("identifierOrCriteria", WordKind::Bytes32),
				FieldSchema::word("startAmount", WordKind::Amount),
				FieldSchema::word("endAmount", WordKind::Amount),
				FieldSchema::word("recipient", WordKind::Address),
			],
		)
	}

	#[test]
	fn six_word_record_has_0xc0_stride() {
		let schema = consideration_item();
		assert!(schema.is_fixed_stride());
		assert_eq!(schema.head_width(), 0xc0);
		assert_eq!(schema.stride(), 0xc0);
	}

	#[test]
	fn dynamic_record_strides_by_one_offset_word() {
		let schema = RecordSchema::new(
			"Order",
			vec![
				FieldSchema::word("offerer", WordKind::Address),
				FieldSchema::sequence("consideration", Arc::new(consideration_item())),
			],
		);
		assert!(!schema.is_fixed_stride());
		assert_eq!(schema.head_width(), 0x40);
		assert_eq!(schema.stride(), WORD_SIZE);
	}

	#[test]
	fn field_lookup_by_name() {
		let schema = consideration_item();
		let (index, field) = schema.field_named("startAmount").unwrap();
		assert_eq!(index, 3);
		assert_eq!(field.name(), "startAmount");
		assert!(schema.field_named("missing").is_none());
	}
}
