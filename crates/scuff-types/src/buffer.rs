//! Word-addressed byte buffer used as the memory primitive for all offset
//! arithmetic.
//!
//! Words are 32 bytes, big-endian, addressed by byte offset. Reads past the
//! end of the buffer zero-extend and writes past the end grow the buffer,
//! mirroring EVM memory semantics. This keeps the unchecked pointer layer
//! memory-safe: an out-of-range address produced by unvalidated arithmetic
//! yields a zero word rather than a fault.

use alloy_primitives::U256;
use std::fmt;

/// A 32-byte big-endian word.
pub type Word = U256;

/// Byte width of one word.
pub const WORD_SIZE: usize = 32;

/// Flat byte buffer with word-granularity access at arbitrary byte offsets.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct WordBuffer {
	bytes: Vec<u8>,
}

impl WordBuffer {
	/// Creates an empty buffer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Wraps an existing encoding.
	pub fn from_bytes(bytes: Vec<u8>) -> Self {
		Self { bytes }
	}

	/// Creates a zero-filled buffer of the given byte length.
	pub fn zeroed(len: usize) -> Self {
		Self {
			bytes: vec![0u8; len],
		}
	}

	/// Length of the buffer in bytes.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Raw view of the encoding.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Consumes the buffer, returning the encoding.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}

	/// Reads the word starting at `offset`. Bytes beyond the end of the
	/// buffer read as zero.
	pub fn read_word(&self, offset: usize) -> Word {
		let mut word = [0u8; WORD_SIZE];
		if offset < self.bytes.len() {
			let available = (self.bytes.len() - offset).min(WORD_SIZE);
			word[..available].copy_from_slice(&self.bytes[offset..offset + available]);
		}
		U256::from_be_bytes(word)
	}

	/// Writes the word starting at `offset`, growing the buffer with zeros
	/// if the word extends past the current end.
	pub fn write_word(&mut self, offset: usize, word: Word) {
		let end = offset.saturating_add(WORD_SIZE);
		if self.bytes.len() < end {
			self.bytes.resize(end, 0);
		}
		self.bytes[offset..end].copy_from_slice(&word.to_be_bytes::<WORD_SIZE>());
	}

	/// Appends one word at the end of the buffer.
	pub fn push_word(&mut self, word: Word) {
		self.bytes.extend_from_slice(&word.to_be_bytes::<WORD_SIZE>());
	}
}

impl fmt::Debug for WordBuffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "WordBuffer(0x{})", hex::encode(&self.bytes))
	}
}
