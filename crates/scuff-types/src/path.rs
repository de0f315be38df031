//! Symbolic field paths.
//!
//! Every directive is tagged with the path of the word it mutates, so a
//! recorded failing case stays addressable during triage: `length`,
//! `element[3].zoneHash`, `element[1].payments.element[0].amount`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
	/// The length prefix of a sequence.
	Length,
	/// The i-th element of a sequence.
	Index(usize),
	/// A named sub-field of a record.
	Field(String),
}

/// Path from the root sequence down to one addressed word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
	/// The empty path, addressing the root sequence itself.
	pub fn root() -> Self {
		Self::default()
	}

	/// Returns this path extended by one segment.
	pub fn join(&self, segment: PathSegment) -> Self {
		let mut segments = self.0.clone();
		segments.push(segment);
		Self(segments)
	}

	pub fn segments(&self) -> &[PathSegment] {
		&self.0
	}
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			return f.write_str("(root)");
		}
		for (i, segment) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(".")?;
			}
			match segment {
				PathSegment::Length => f.write_str("length")?,
				PathSegment::Index(index) => write!(f, "element[{index}]")?,
				PathSegment::Field(name) => f.write_str(name)?,
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_matches_addressing_convention() {
		let path = FieldPath::root()
			.join(PathSegment::Index(3))
			.join(PathSegment::Field("zoneHash".to_string()));
		assert_eq!(path.to_string(), "element[3].zoneHash");

		let nested = FieldPath::root()
			.join(PathSegment::Index(1))
			.join(PathSegment::Field("payments".to_string()))
			.join(PathSegment::Length);
		assert_eq!(nested.to_string(), "element[1].payments.length");

		assert_eq!(FieldPath::root().join(PathSegment::Length).to_string(), "length");
	}

	#[test]
	fn join_does_not_mutate_the_parent() {
		let parent = FieldPath::root().join(PathSegment::Index(0));
		let child = parent.join(PathSegment::Length);
		assert_eq!(parent.segments().len(), 1);
		assert_eq!(child.segments().len(), 2);
	}
}
