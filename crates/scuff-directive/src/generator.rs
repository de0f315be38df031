//! Depth-first directive generation.
//!
//! The walk is schema-driven but instance-sized: which directives exist is
//! fixed by the schema's corruption policy, while element counts and every
//! offset come from the buffer being walked. Traversal order per sequence:
//! the length directive first, then elements 0..n in order, each element's
//! fields in schema order, recursing into nested sequences in place.

use crate::directive::{Mutation, ScuffCatalogue, ScuffDirective};
use scuff_layout::{checked, RecordPointer, SequencePointer};
use scuff_types::{
	FieldLayout, FieldPath, LayoutError, PathSegment, ScuffKind, Word, WordBuffer, LENGTH_BITS,
	OFFSET_BITS,
};
use tracing::debug;

/// Mask setting every bit at or above `bits`.
fn dirty_mask(bits: u32) -> Word {
	if bits >= 256 {
		Word::ZERO
	} else {
		Word::MAX << bits as usize
	}
}

/// Walks `seq` against `buf` and returns the flattened directive catalogue.
///
/// This is the outermost harness-facing entry point, so the length prefix
/// of every traversed sequence is bounds-validated before its elements are
/// addressed; the arithmetic below stays unchecked.
pub fn generate(
	seq: SequencePointer<'_>,
	buf: &WordBuffer,
) -> Result<ScuffCatalogue, LayoutError> {
	let mut directives = Vec::new();
	walk_sequence(seq, buf, FieldPath::root(), &mut directives)?;
	debug!(
		schema = seq.schema().name(),
		directives = directives.len(),
		"generated scuff catalogue"
	);
	Ok(ScuffCatalogue::new(directives))
}

fn walk_sequence(
	seq: SequencePointer<'_>,
	buf: &WordBuffer,
	path: FieldPath,
	out: &mut Vec<ScuffDirective>,
) -> Result<(), LayoutError> {
	out.push(ScuffDirective {
		path: path.join(PathSegment::Length),
		kind: ScuffKind::DirtyUpperBits,
		offset: seq.length_offset(),
		mutation: Mutation::SetBits(dirty_mask(LENGTH_BITS)),
	});

	let n = checked::bounded_len(seq, buf)?;
	let fixed = seq.schema().is_fixed_stride();
	for i in 0..n {
		let element_path = path.join(PathSegment::Index(i));
		// Dynamic element schemas are reached through an offset word in
		// the element region; dirty its upper bits before descending.
		if !fixed {
			out.push(ScuffDirective {
				path: element_path.clone(),
				kind: ScuffKind::DirtyOffset,
				offset: seq.element(i),
				mutation: Mutation::SetBits(dirty_mask(OFFSET_BITS)),
			});
		}
		let record = seq.element_data(buf, i);
		walk_record(record, buf, element_path, out)?;
	}
	Ok(())
}

fn walk_record(
	record: RecordPointer<'_>,
	buf: &WordBuffer,
	path: FieldPath,
	out: &mut Vec<ScuffDirective>,
) -> Result<(), LayoutError> {
	for (index, field) in record.schema().fields().iter().enumerate() {
		let field_path = path.join(PathSegment::Field(field.name().to_string()));
		match field.layout() {
			FieldLayout::Word(kind) => {
				let Some(scuff) = kind.scuff() else {
					continue;
				};
				let offset = record.field(index);
				let mutation = match scuff {
					ScuffKind::DirtyUpperBits => {
						Mutation::SetBits(dirty_mask(kind.meaningful_bits()))
					}
					ScuffKind::MaxValue => Mutation::Set(Word::MAX),
					// Offset words are never a leaf policy; the sequence
					// arm below covers them.
					ScuffKind::DirtyOffset => continue,
					// Zero-vs-nonzero flip, resolved against the word
					// currently in the buffer so the directive stays a
					// concrete reversible mutation.
					ScuffKind::BoolFlip => {
						let current = buf.read_word(offset);
						Mutation::Set(if current.is_zero() {
							Word::from(2u64)
						} else {
							Word::ZERO
						})
					}
				};
				out.push(ScuffDirective {
					path: field_path,
					kind: scuff,
					offset,
					mutation,
				});
			}
			FieldLayout::Sequence(_) => {
				out.push(ScuffDirective {
					path: field_path.clone(),
					kind: ScuffKind::DirtyOffset,
					offset: record.field(index),
					mutation: Mutation::SetBits(dirty_mask(OFFSET_BITS)),
				});
				// sequence_field is Some by construction for this layout
				if let Some(nested) = record.sequence_field(buf, index) {
					walk_sequence(nested, buf, field_path, out)?;
				}
			}
		}
	}
	Ok(())
}
