//! Format constants and decoder safety limits.
//!
//! The decoder reads untrusted bytes, so every length it allocates for is
//! bounded by one of these.

/// Magic bytes for an uncompressed undelimited document file.
pub const MAGIC_UNCOMPRESSED: &[u8; 4] = b"DOCW";

/// Magic bytes for a zstd-compressed undelimited document file.
pub const MAGIC_COMPRESSED: &[u8; 5] = b"DOCWZ";

/// Current undelimited file format version.
pub const FORMAT_VERSION: u8 = 1;

/// Oldest undelimited file format version this crate can read.
pub const MIN_FORMAT_VERSION: u8 = 1;

/// A 64-bit LEB128 varint never needs more than 10 bytes.
pub const MAX_VARINT_BYTES: usize = 10;

/// Maximum length of a single string field, in bytes.
pub const MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Maximum length of a nested record, in bytes.
pub const MAX_MESSAGE_LEN: usize = 512 * 1024 * 1024;

/// Maximum size of one delimited frame or one undelimited file body.
pub const MAX_DOCUMENT_SIZE: usize = 1024 * 1024 * 1024;

/// Number of natural-logic relations a polarity projects.
pub const POLARITY_PROJECTIONS: usize = 7;
