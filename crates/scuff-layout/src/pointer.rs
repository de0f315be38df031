//! Unchecked pointer arithmetic over packed sequences.
//!
//! A sequence is one length word followed by the element region: `length ×
//! stride` bytes of record heads for fixed-stride element schemas, or
//! `length` offset words (each relative to the start of the element region)
//! followed by out-of-line record payloads for dynamic element schemas.
//!
//! Every operation is pure O(1) arithmetic with wrapping overflow and no
//! bounds checks. An out-of-range index silently produces an out-of-range
//! address; validity is the caller's contract.

use scuff_types::{FieldLayout, FieldSchema, RecordSchema, Word, WordBuffer, WORD_SIZE};

/// Truncates a word to a machine address, keeping the low bits.
fn truncate_to_usize(word: Word) -> usize {
	word.as_limbs()[0] as usize
}

/// Handle to a length-prefixed sequence of same-schema records.
#[derive(Debug, Clone, Copy)]
pub struct SequencePointer<'s> {
	base: usize,
	schema: &'s RecordSchema,
}

impl<'s> SequencePointer<'s> {
	/// Points at the length word of a sequence whose elements follow
	/// `schema`.
	pub fn new(base: usize, schema: &'s RecordSchema) -> Self {
		Self { base, schema }
	}

	pub fn schema(self) -> &'s RecordSchema {
		self.schema
	}

	/// Offset of the length prefix: the base pointer itself.
	pub fn length_offset(self) -> usize {
		self.base
	}

	/// Offset of element 0's slot, one word past the length prefix.
	pub fn head(self) -> usize {
		self.base.wrapping_add(WORD_SIZE)
	}

	/// Offset of element `i`'s slot: `head + i * stride`. For dynamic
	/// element schemas the slot holds the element's offset word, not the
	/// element itself; see [`Self::element_data`].
	pub fn element(self, i: usize) -> usize {
		self.head()
			.wrapping_add(i.wrapping_mul(self.schema.stride()))
	}

	/// Reads the length prefix.
	pub fn length(self, buf: &WordBuffer) -> Word {
		buf.read_word(self.base)
	}

	/// Writes the length prefix. Test scaffolding only; does not move or
	/// resize the element region.
	pub fn set_length(self, buf: &mut WordBuffer, n: u64) {
		buf.write_word(self.base, Word::from(n));
	}

	/// Writes the maximum representable length, for probing integer
	/// overflow in downstream length-dependent loops.
	pub fn set_max_length(self, buf: &mut WordBuffer) {
		buf.write_word(self.base, Word::MAX);
	}

	/// Typed pointer to element `i`'s record. Same offset as
	/// [`Self::element`] for fixed-stride schemas; for dynamic schemas the
	/// slot's offset word is dereferenced relative to the element region.
	pub fn element_data(self, buf: &WordBuffer, i: usize) -> RecordPointer<'s> {
		let slot = self.element(i);
		if self.schema.is_fixed_stride() {
			RecordPointer::new(slot, self.schema)
		} else {
			let relative = truncate_to_usize(buf.read_word(slot));
			RecordPointer::new(self.head().wrapping_add(relative), self.schema)
		}
	}
}

/// Handle to one record's head region.
#[derive(Debug, Clone, Copy)]
pub struct RecordPointer<'s> {
	offset: usize,
	schema: &'s RecordSchema,
}

impl<'s> RecordPointer<'s> {
	pub fn new(offset: usize, schema: &'s RecordSchema) -> Self {
		Self { offset, schema }
	}

	pub fn schema(self) -> &'s RecordSchema {
		self.schema
	}

	/// Offset of the record's first head word.
	pub fn offset(self) -> usize {
		self.offset
	}

	/// Offset of the `index`-th head word. No bounds check against the
	/// schema's field count.
	pub fn field(self, index: usize) -> usize {
		self.offset.wrapping_add(index.wrapping_mul(WORD_SIZE))
	}

	/// Typed pointer to the `index`-th field, if the schema has one.
	pub fn field_pointer(self, index: usize) -> Option<FieldPointer<'s>> {
		self.schema.field(index).map(|field| FieldPointer {
			offset: self.field(index),
			field,
		})
	}

	/// Typed pointer to the field called `name`.
	pub fn field_named(self, name: &str) -> Option<FieldPointer<'s>> {
		self.schema
			.field_named(name)
			.map(|(index, field)| FieldPointer {
				offset: self.field(index),
				field,
			})
	}

	/// Resolves a `Sequence` field's head word (an offset relative to the
	/// record's own start) to a pointer at the nested sequence's length
	/// word. Returns `None` for leaf fields.
	pub fn sequence_field(self, buf: &WordBuffer, index: usize) -> Option<SequencePointer<'s>> {
		match self.schema.field(index).map(FieldSchema::layout) {
			Some(FieldLayout::Sequence(element)) => {
				let relative = truncate_to_usize(buf.read_word(self.field(index)));
				Some(SequencePointer::new(
					self.offset.wrapping_add(relative),
					element.as_ref(),
				))
			}
			_ => None,
		}
	}
}

/// Handle to one leaf head word, tagged with its field schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldPointer<'s> {
	offset: usize,
	field: &'s FieldSchema,
}

impl<'s> FieldPointer<'s> {
	pub fn offset(self) -> usize {
		self.offset
	}

	pub fn field(self) -> &'s FieldSchema {
		self.field
	}

	pub fn read(self, buf: &WordBuffer) -> Word {
		buf.read_word(self.offset)
	}

	pub fn write(self, buf: &mut WordBuffer, word: Word) {
		buf.write_word(self.offset, word);
	}
}
