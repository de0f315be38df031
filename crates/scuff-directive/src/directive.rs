//! The directive and catalogue types.

use scuff_types::{FieldPath, ScuffKind, Word, WordBuffer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The concrete word mutation a directive applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
	/// OR the mask into the word.
	SetBits(Word),
	/// Overwrite the word.
	Set(Word),
}

impl Mutation {
	pub fn apply_to(self, word: Word) -> Word {
		match self {
			Mutation::SetBits(mask) => word | mask,
			Mutation::Set(value) => value,
		}
	}
}

/// One reversible point-mutation against a specific buffer instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScuffDirective {
	/// Symbolic path of the targeted word, e.g. `element[3].zoneHash`.
	pub path: FieldPath,
	/// Schema-static corruption kind.
	pub kind: ScuffKind,
	/// Byte offset resolved against the buffer this directive was
	/// generated from.
	pub offset: usize,
	/// The mutation to apply at `offset`.
	pub mutation: Mutation,
}

impl ScuffDirective {
	/// Applies the mutation in place, returning the displaced word so the
	/// mutation can be reverted.
	pub fn apply(&self, buf: &mut WordBuffer) -> Word {
		let displaced = buf.read_word(self.offset);
		buf.write_word(self.offset, self.mutation.apply_to(displaced));
		displaced
	}

	/// Restores the word displaced by [`Self::apply`].
	pub fn revert(&self, buf: &mut WordBuffer, displaced: Word) {
		buf.write_word(self.offset, displaced);
	}
}

impl fmt::Display for ScuffDirective {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({}) at 0x{:x}", self.path, self.kind, self.offset)
	}
}

/// Ordered directives for one buffer instance, in depth-first traversal
/// order. Deterministic: byte-identical buffers produce identical
/// catalogues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScuffCatalogue {
	directives: Vec<ScuffDirective>,
}

impl ScuffCatalogue {
	pub fn new(directives: Vec<ScuffDirective>) -> Self {
		Self { directives }
	}

	pub fn len(&self) -> usize {
		self.directives.len()
	}

	pub fn is_empty(&self) -> bool {
		self.directives.is_empty()
	}

	pub fn directives(&self) -> &[ScuffDirective] {
		&self.directives
	}

	pub fn iter(&self) -> std::slice::Iter<'_, ScuffDirective> {
		self.directives.iter()
	}
}

impl<'a> IntoIterator for &'a ScuffCatalogue {
	type Item = &'a ScuffDirective;
	type IntoIter = std::slice::Iter<'a, ScuffDirective>;

	fn into_iter(self) -> Self::IntoIter {
		self.directives.iter()
	}
}

impl IntoIterator for ScuffCatalogue {
	type Item = ScuffDirective;
	type IntoIter = std::vec::IntoIter<ScuffDirective>;

	fn into_iter(self) -> Self::IntoIter {
		self.directives.into_iter()
	}
}
