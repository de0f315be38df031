//! Catalogue execution.
//!
//! Applies each directive to a clone of the pristine buffer and feeds the
//! result to the strict decoder. A directive whose mutation the decoder
//! still accepts is a survivor: either a decoder gap or a purely semantic
//! corruption (a flipped-to-false flag decodes fine), and the report keeps
//! enough identity to triage it.

use crate::decode::decode_sequence;
use scuff_directive::ScuffCatalogue;
use scuff_layout::SequencePointer;
use scuff_types::{FieldPath, ScuffKind, WordBuffer};
use tracing::debug;

/// One directive the decoder failed to reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survivor {
	pub path: FieldPath,
	pub kind: ScuffKind,
	pub offset: usize,
}

/// Outcome of running one catalogue against one pristine buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
	pub total: usize,
	pub rejected: usize,
	pub survivors: Vec<Survivor>,
}

impl RunReport {
	pub fn all_rejected(&self) -> bool {
		self.survivors.is_empty()
	}
}

/// Runs every directive of `catalogue` against clones of `buf`.
///
/// The buffer must be the exact snapshot the catalogue was generated from;
/// offsets in a catalogue are not portable across buffers with different
/// lengths.
pub fn run_catalogue(
	seq: SequencePointer<'_>,
	buf: &WordBuffer,
	catalogue: &ScuffCatalogue,
) -> RunReport {
	let mut report = RunReport {
		total: catalogue.len(),
		..RunReport::default()
	};

	for directive in catalogue {
		let mut mutated = buf.clone();
		directive.apply(&mut mutated);
		match decode_sequence(seq, &mutated) {
			Err(rejection) => {
				debug!(directive = %directive, %rejection, "directive rejected");
				report.rejected += 1;
			}
			Ok(()) => {
				debug!(directive = %directive, "directive survived decoding");
				report.survivors.push(Survivor {
					path: directive.path.clone(),
					kind: directive.kind,
					offset: directive.offset,
				});
			}
		}
	}
	report
}
