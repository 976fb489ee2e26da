//! Error types for document encoding, decoding, validation and stream I/O.

use thiserror::Error;

use crate::model::NodeKey;

/// Failure classes shared by every error in this crate.
///
/// Callers that only need to know *what kind* of failure happened (for
/// example to tell a cancelled read apart from a corrupt one) match on this
/// instead of on the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// E001: strict mode found annotation keys without a wire slot.
    LossySerialization,
    /// E002: a flattened tree marker stream is structurally broken.
    MalformedTree,
    /// E003: the document's cross-references do not hold together.
    ///
    /// This is the class of every [`ValidationError`]: a reference to a node,
    /// token, mention or sentence that does not exist, and also the related
    /// integrity failures found by the same checks (sentence token ranges that
    /// fall outside the document or overlap, a graph with nodes but no root,
    /// duplicate ids).
    DanglingReference,
    /// E004: a wire enum code has no in-memory counterpart.
    UnknownEnumCode,
    /// E005: decoding observed a cancellation request.
    Cancelled,
    /// E006: bytes are truncated or corrupt.
    MalformedStream,
    /// E007: the underlying reader or writer failed.
    Io,
}

impl ErrorClass {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorClass::LossySerialization => "E001",
            ErrorClass::MalformedTree => "E002",
            ErrorClass::DanglingReference => "E003",
            ErrorClass::UnknownEnumCode => "E004",
            ErrorClass::Cancelled => "E005",
            ErrorClass::MalformedStream => "E006",
            ErrorClass::Io => "E007",
        }
    }
}

/// A cross-reference inside a document that does not resolve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("source/target of a dependency was null: {from} -> {to}")]
    DanglingEdge { from: NodeKey, to: NodeKey },

    #[error("{what} refers to {target}, which does not exist")]
    DanglingReference { what: &'static str, target: String },

    #[error("sentence {sentence} covers tokens {begin}..{end}, which is outside the {len} document tokens or overlaps another sentence")]
    InvalidTokenRange {
        sentence: usize,
        begin: u32,
        end: u32,
        len: usize,
    },

    #[error("dependency graph has {nodes} nodes but no root")]
    MissingRoot { nodes: usize },

    #[error("duplicate {what} {id}")]
    Duplicate { what: &'static str, id: String },
}

impl ValidationError {
    /// Returns the failure class for this error, always
    /// [`ErrorClass::DanglingReference`].
    pub fn class(&self) -> ErrorClass {
        ErrorClass::DanglingReference
    }
}

/// Error during encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("[E001] lossy serialization of {entity}: no wire mapping for keys {keys:?}")]
    LossySerialization {
        entity: &'static str,
        keys: Vec<String>,
    },

    #[error("[E003] {0}")]
    Invalid(#[from] ValidationError),

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("zstd compression failed: {0}")]
    CompressionFailed(String),
}

impl EncodeError {
    /// Returns the failure class for this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            EncodeError::LossySerialization { .. } => ErrorClass::LossySerialization,
            EncodeError::Invalid(e) => e.class(),
            EncodeError::LengthExceedsLimit { .. } | EncodeError::CompressionFailed(_) => {
                ErrorClass::MalformedStream
            }
        }
    }
}

/// Error during decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === Structure ===
    #[error("[E002] malformed tree: {reason}")]
    MalformedTree { reason: &'static str },

    #[error("[E003] {0}")]
    Invalid(#[from] ValidationError),

    #[error("[E004] unknown {table} code {code}")]
    UnknownEnumCode { table: &'static str, code: u32 },

    #[error("[E005] decoding was interrupted")]
    Cancelled,

    // === Bytes ===
    #[error("[E006] unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("[E006] varint exceeds maximum length (10 bytes)")]
    VarintTooLong,

    #[error("[E006] varint overflow (value exceeds u64)")]
    VarintOverflow,

    #[error("[E006] {field} value {value} does not fit in {target}")]
    IntegerOutOfRange {
        field: &'static str,
        value: u64,
        target: &'static str,
    },

    #[error("[E006] invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("[E006] {field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("[E006] invalid field number 0")]
    InvalidTag,

    #[error("[E006] invalid wire kind {kind}")]
    InvalidWireKind { kind: u8 },

    #[error("[E006] {field} expected wire kind {expected}, found {found}")]
    WireKindMismatch {
        field: &'static str,
        expected: u8,
        found: u8,
    },

    #[error("[E006] invalid bool value {value} in {field}")]
    InvalidBool { field: &'static str, value: u64 },

    #[error("[E006] required field {field} is missing")]
    MissingField { field: &'static str },

    #[error("[E006] malformed encoding: {context}")]
    MalformedEncoding { context: &'static str },

    #[error("[E006] unrecognized layout: no DOCW or DOCWZ magic and not a bare or delimited record, starts with {found:?}")]
    InvalidMagic { found: Vec<u8> },

    #[error("[E006] unsupported version: {version}")]
    UnsupportedVersion { version: u8 },

    #[error("[E006] zstd decompression failed: {0}")]
    DecompressionFailed(String),

    #[error("[E006] decompressed size {actual} doesn't match declared {declared}")]
    UncompressedSizeMismatch { declared: usize, actual: usize },
}

impl DecodeError {
    /// Returns the failure class for this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            DecodeError::MalformedTree { .. } => ErrorClass::MalformedTree,
            DecodeError::Invalid(e) => e.class(),
            DecodeError::UnknownEnumCode { .. } => ErrorClass::UnknownEnumCode,
            DecodeError::Cancelled => ErrorClass::Cancelled,
            _ => ErrorClass::MalformedStream,
        }
    }
}

/// Error from the stream framing layer.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("[E007] I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("malformed stream: {0}")]
    MalformedStream(DecodeError),

    #[error("[E005] reading was interrupted")]
    Cancelled,
}

impl From<DecodeError> for StreamError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Cancelled => StreamError::Cancelled,
            other => StreamError::MalformedStream(other),
        }
    }
}

impl StreamError {
    /// Returns the failure class for this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            StreamError::Io(_) => ErrorClass::Io,
            StreamError::Encode(e) => e.class(),
            StreamError::MalformedStream(_) => ErrorClass::MalformedStream,
            StreamError::Cancelled => ErrorClass::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_decode_stays_distinguishable() {
        let err: StreamError = DecodeError::Cancelled.into();
        assert!(matches!(err, StreamError::Cancelled));
        assert_eq!(err.class(), ErrorClass::Cancelled);

        let err: StreamError = DecodeError::VarintTooLong.into();
        assert!(matches!(err, StreamError::MalformedStream(_)));
        assert_eq!(err.class().code(), "E006");
    }

    #[test]
    fn test_dangling_edge_message() {
        let err = ValidationError::DanglingEdge {
            from: NodeKey::new(1, 0),
            to: NodeKey::new(9, 0),
        };
        assert!(err.to_string().starts_with("source/target of a dependency was null"));
        assert_eq!(DecodeError::from(err).class(), ErrorClass::DanglingReference);
    }

    #[test]
    fn test_integrity_failures_share_reference_class() {
        let errors = [
            ValidationError::InvalidTokenRange { sentence: 1, begin: 2, end: 6, len: 4 },
            ValidationError::MissingRoot { nodes: 2 },
            ValidationError::Duplicate { what: "coref chain", id: "1".into() },
        ];
        for err in errors {
            assert_eq!(err.class(), ErrorClass::DanglingReference);
            assert_eq!(EncodeError::from(err.clone()).class().code(), "E003");
            assert_eq!(DecodeError::from(err).class().code(), "E003");
        }
    }
}
