//! docwire: lossless binary serialization for annotated natural-language
//! documents.
//!
//! A [`Document`] holds the flat token stream of a text, the sentences that
//! partition it, and the analyses layered on top: parse trees, dependency
//! graphs, coreference chains, entity mentions, quotes and relation triples.
//! This crate turns such a document into a compact binary record and back.
//!
//! # Quick Start
//!
//! ```rust
//! use docwire::{Document, Serializer, Token};
//!
//! let mut doc = Document::new("Apple is a company.");
//! doc.push_sentence(vec![
//!     Token::tagged("Apple", "NNP"),
//!     Token::tagged("is", "VBZ"),
//!     Token::tagged("a", "DT"),
//!     Token::tagged("company", "NN"),
//! ]);
//!
//! let serializer = Serializer::strict();
//! let bytes = serializer.write(&doc, Vec::new()).unwrap();
//! let (decoded, _) = serializer.read(bytes.as_slice()).unwrap();
//! assert_eq!(decoded.unwrap().tokens.len(), 4);
//! ```
//!
//! # Modules
//!
//! - [`model`]: in-memory types (Document, Sentence, Token, Tree, graphs, mentions)
//! - [`codec`]: the [`Serializer`] and the per-entity wire mappings
//! - [`wire`]: the wire records themselves
//! - [`validate`]: cross-reference checks run on every encode and decode
//! - [`io`]: delimited streams and the undelimited file layout
//! - [`error`]: error types
//! - [`limits`]: format constants and decoder limits
//!
//! # Lossless Mode
//!
//! Tokens, sentences and documents may carry open-ended annotations in their
//! `extensions` maps. Those have no wire slot. A strict serializer refuses to
//! encode them ([`EncodeError::LossySerialization`]); a relaxed one drops them
//! and logs the dropped keys at `debug` level.
//!
//! # Wire Format
//!
//! - Delimited stream: `varint(len) || record`, repeated
//! - Undelimited file: `DOCW` magic + version + record
//! - Compressed file: `DOCWZ` magic + uncompressed size + zstd data
//!
//! [`Serializer::read_undelimited`] detects the layout automatically.

pub mod cancel;
pub mod codec;
pub mod error;
pub mod io;
pub mod limits;
pub mod model;
pub mod validate;
pub mod wire;

pub use cancel::CancelToken;
pub use codec::{Serializer, recover_text};
pub use error::{DecodeError, EncodeError, ErrorClass, StreamError, ValidationError};
pub use model::{
    Annotated, AnnotationValue, CorefChain, CorefMention, DependencyGraph, Document, Edge,
    EntailedFragment, EntityMention, Extensions, Language, Mention, NaturalLogicRelation,
    NodeKey, OperatorSpec, Polarity, Quantifier, Quote, RelationTriple, Section, Sentence,
    SentimentClass, Span, SpeakerInfo, Timex, Token, TokenLocation, Tree,
};
pub use validate::{validate_document, validate_graph, validate_sentence};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
