//! The corruption kind enumeration.
//!
//! Kinds are schema-static: which kind applies to a field is decided by the
//! field's [`WordKind`](crate::schema::WordKind) policy, while the concrete
//! offset and mask are resolved per buffer instance at generation time. Each
//! kind carries a stable numeric identifier used in compact test-case names;
//! the identifier/name mapping is total over the enumeration and rejects
//! out-of-range identifiers.

use crate::errors::ScuffKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One kind of deliberate corruption applied to a single word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScuffKind {
	/// Set junk bits above the field's semantically meaningful width.
	DirtyUpperBits,
	/// Overwrite the word with the maximum representable unsigned value.
	MaxValue,
	/// Flip a boolean-like word between zero and a nonzero junk value.
	BoolFlip,
	/// Set junk bits above the machine-word range of an out-of-line
	/// offset word, so a truncating consumer dereferences the wrong tail.
	DirtyOffset,
}

impl ScuffKind {
	/// Every kind, in identifier order.
	pub const ALL: [ScuffKind; 4] = [
		ScuffKind::DirtyUpperBits,
		ScuffKind::MaxValue,
		ScuffKind::BoolFlip,
		ScuffKind::DirtyOffset,
	];

	/// Stable numeric identifier for compact test-case naming.
	pub fn id(self) -> u32 {
		match self {
			ScuffKind::DirtyUpperBits => 0,
			ScuffKind::MaxValue => 1,
			ScuffKind::BoolFlip => 2,
			ScuffKind::DirtyOffset => 3,
		}
	}

	/// Decodes a recorded identifier back into a kind.
	pub fn from_id(id: u32) -> Result<Self, ScuffKindError> {
		match id {
			0 => Ok(ScuffKind::DirtyUpperBits),
			1 => Ok(ScuffKind::MaxValue),
			2 => Ok(ScuffKind::BoolFlip),
			3 => Ok(ScuffKind::DirtyOffset),
			other => Err(ScuffKindError::UnknownId(other)),
		}
	}

	/// Canonical name of the kind.
	pub fn name(self) -> &'static str {
		match self {
			ScuffKind::DirtyUpperBits => "DirtyUpperBits",
			ScuffKind::MaxValue => "MaxValue",
			ScuffKind::BoolFlip => "BoolFlip",
			ScuffKind::DirtyOffset => "DirtyOffset",
		}
	}

	/// Resolves a recorded identifier straight to its canonical name.
	pub fn kind_name(id: u32) -> Result<&'static str, ScuffKindError> {
		Self::from_id(id).map(Self::name)
	}
}

impl fmt::Display for ScuffKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
