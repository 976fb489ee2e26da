//! Binary encoding and decoding of annotated documents.
//!
//! Layering, bottom up: [`primitives`] reads and writes varints and strings,
//! [`message`] turns them into field-keyed records, and the entity modules
//! map records to the [`crate::model`] types. [`Serializer`] is the entry
//! point; stream framing lives in [`crate::io`].

pub mod assoc;
pub mod document;
pub mod entity;
pub mod enums;
pub mod graph;
pub mod guard;
pub mod message;
pub mod primitives;
pub mod sentence;
pub mod token;
pub mod tree;

use std::borrow::Cow;

use crate::cancel::CancelToken;
use crate::codec::message::Message;
use crate::error::{DecodeError, EncodeError, ValidationError};
use crate::limits::MAX_DOCUMENT_SIZE;
use crate::model::{DependencyGraph, Document, Sentence, Token, Tree};
use crate::validate::{validate_graph, validate_sentence};
use crate::wire;

pub use primitives::{Reader, Writer, zigzag_decode, zigzag_encode};
pub use sentence::recover_text;

/// Encodes a list whose presence matters: `(items, Some(true))` when set,
/// `(empty, None)` when absent.
pub(crate) fn flagged_to_wire<T, W>(
    items: Option<&Vec<T>>,
    f: impl FnMut(&T) -> W,
) -> (Vec<W>, Option<bool>) {
    match items {
        Some(items) => (items.iter().map(f).collect(), Some(true)),
        None => (Vec::new(), None),
    }
}

/// Inverse of [`flagged_to_wire`]. A list with elements but no flag counts
/// as present.
pub(crate) fn flagged<T>(items: Vec<T>, has: Option<bool>) -> Option<Vec<T>> {
    (has.unwrap_or(false) || !items.is_empty()).then_some(items)
}

/// Converts documents to and from their wire form.
///
/// A strict serializer (the default) refuses to encode anything carrying an
/// annotation it cannot write. A relaxed one drops such annotations. Every
/// decode observes the serializer's [`CancelToken`].
#[derive(Debug, Clone)]
pub struct Serializer {
    enforce_lossless: bool,
    cancel: CancelToken,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::strict()
    }
}

impl Serializer {
    pub fn new(enforce_lossless: bool) -> Self {
        Self {
            enforce_lossless,
            cancel: CancelToken::new(),
        }
    }

    pub fn strict() -> Self {
        Self::new(true)
    }

    pub fn relaxed() -> Self {
        Self::new(false)
    }

    /// Uses `cancel` for every decode made through this serializer.
    pub fn with_cancellation(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.enforce_lossless
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Encodes one token.
    ///
    /// Keys in `skip_keys` are left out of the wire form and exempt from the
    /// lossless check.
    pub fn token_to_wire(&self, token: &Token, skip_keys: &[&str]) -> Result<wire::Token, EncodeError> {
        let token = if skip_keys.is_empty() {
            Cow::Borrowed(token)
        } else {
            let mut trimmed = token.clone();
            for key in skip_keys {
                trimmed.clear_annotation(key);
            }
            Cow::Owned(trimmed)
        };
        guard::check_lossless(token.as_ref(), self.enforce_lossless)?;
        Ok(token::token_to_wire(&token))
    }

    pub fn wire_to_token(&self, wire: wire::Token) -> Result<Token, DecodeError> {
        token::token_from_wire(wire)
    }

    pub fn flatten_tree(&self, tree: &Tree) -> wire::FlattenedTree {
        tree::flatten(tree)
    }

    pub fn unflatten_tree(&self, flat: wire::FlattenedTree) -> Result<Tree, DecodeError> {
        tree::unflatten(flat, &self.cancel)
    }

    /// Encodes a graph after checking that its edges and roots resolve.
    pub fn graph_to_wire(&self, graph: &DependencyGraph) -> Result<wire::DependencyGraph, EncodeError> {
        validate_graph(graph, |_| true)?;
        Ok(graph::graph_to_wire(graph))
    }

    pub fn graph_from_wire(&self, wire: wire::DependencyGraph) -> Result<DependencyGraph, DecodeError> {
        let graph = graph::graph_from_wire(wire, &self.cancel)?;
        validate_graph(&graph, |_| true)?;
        Ok(graph)
    }

    /// Encodes a sentence together with the tokens it covers.
    pub fn sentence_to_wire(&self, sentence: &Sentence, tokens: &[Token]) -> Result<wire::Sentence, EncodeError> {
        if tokens.len() != sentence.token_count() {
            return Err(ValidationError::InvalidTokenRange {
                sentence: sentence.sentence_index.unwrap_or(0) as usize,
                begin: sentence.token_offset_begin,
                end: sentence.token_offset_end,
                len: tokens.len(),
            }
            .into());
        }
        validate_sentence(sentence, sentence.sentence_index, tokens.len())?;
        sentence::encode_sentence(sentence, tokens, self.enforce_lossless)
    }

    /// Decodes a sentence and the tokens it covers.
    pub fn sentence_from_wire(&self, wire: wire::Sentence) -> Result<(Sentence, Vec<Token>), DecodeError> {
        let (sentence, tokens) = sentence::decode_sentence(wire, &self.cancel)?;
        validate_sentence(&sentence, sentence.sentence_index, tokens.len())?;
        Ok((sentence, tokens))
    }

    pub fn to_wire(&self, doc: &Document) -> Result<wire::Document, EncodeError> {
        document::encode_document(doc, self.enforce_lossless)
    }

    pub fn from_wire(&self, wire: wire::Document) -> Result<Document, DecodeError> {
        document::decode_document(wire, &self.cancel)
    }

    /// Encodes `doc` as a bare record, with no magic or length prefix.
    pub fn to_bytes(&self, doc: &Document) -> Result<Vec<u8>, EncodeError> {
        let bytes = self.to_wire(doc)?.encode_to_vec();
        if bytes.len() > MAX_DOCUMENT_SIZE {
            return Err(EncodeError::LengthExceedsLimit {
                field: "document",
                len: bytes.len(),
                max: MAX_DOCUMENT_SIZE,
            });
        }
        Ok(bytes)
    }

    /// Decodes a bare record produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<Document, DecodeError> {
        if bytes.len() > MAX_DOCUMENT_SIZE {
            return Err(DecodeError::LengthExceedsLimit {
                field: "document",
                len: bytes.len(),
                max: MAX_DOCUMENT_SIZE,
            });
        }
        self.from_wire(wire::Document::decode(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationValue, Edge, NodeKey};

    fn apple_doc() -> Document {
        let mut doc = Document::new("Apple is a company.");
        let sentence = doc.push_sentence(vec![
            Token::tagged("Apple", "NNP"),
            Token::tagged("is", "VBZ"),
            Token::tagged("a", "DT"),
            Token::tagged("company", "NN"),
        ]);
        sentence.text = Some("Apple is a company.".into());
        doc
    }

    #[test]
    fn test_strict_is_default() {
        assert!(Serializer::default().is_strict());
        assert!(!Serializer::relaxed().is_strict());
    }

    #[test]
    fn test_bytes_roundtrip() {
        let serializer = Serializer::strict();
        let doc = apple_doc();
        let bytes = serializer.to_bytes(&doc).unwrap();
        assert_eq!(serializer.from_bytes(&bytes).unwrap(), doc);
    }

    #[test]
    fn test_lossy_document_key() {
        let mut doc = apple_doc();
        doc.extensions.insert("topic".into(), AnnotationValue::Text("tech".into()));

        let err = Serializer::strict().to_bytes(&doc).unwrap_err();
        assert_eq!(
            err,
            EncodeError::LossySerialization {
                entity: "document",
                keys: vec!["topic".into()],
            }
        );

        let relaxed = Serializer::relaxed();
        let back = relaxed.from_bytes(&relaxed.to_bytes(&doc).unwrap()).unwrap();
        assert!(back.extensions.is_empty());
        assert_eq!(back.tokens, doc.tokens);
    }

    #[test]
    fn test_skip_keys_exempt_and_omit() {
        let mut token = Token::tagged("Apple", "NNP");
        token.lemma = Some("apple".into());
        token.extensions.insert("embedding".into(), AnnotationValue::List(Vec::new()));

        let serializer = Serializer::strict();
        assert!(serializer.token_to_wire(&token, &[]).is_err());

        let wire = serializer.token_to_wire(&token, &["embedding", "lemma"]).unwrap();
        assert_eq!(wire.lemma, None);
        let back = serializer.wire_to_token(wire).unwrap();
        assert_eq!(back, Token::tagged("Apple", "NNP"));
    }

    #[test]
    fn test_graph_with_undeclared_node() {
        let serializer = Serializer::strict();
        let mut graph = DependencyGraph::new();
        graph.add_node(NodeKey::new(1, 0));
        graph.add_root(NodeKey::new(1, 0));
        graph.add_edge(Edge::new(NodeKey::new(1, 0), NodeKey::new(2, 0), "dep"));

        assert!(matches!(
            serializer.graph_to_wire(&graph),
            Err(EncodeError::Invalid(ValidationError::DanglingEdge { .. }))
        ));

        // Forge the wire form directly to check the decode side.
        let wire = graph::graph_to_wire(&graph);
        let err = serializer.graph_from_wire(wire).unwrap_err();
        assert!(err.to_string().contains("source/target of a dependency was null"));
    }

    #[test]
    fn test_sentence_needs_its_tokens() {
        let doc = apple_doc();
        let serializer = Serializer::strict();
        let sentence = &doc.sentences[0];
        assert!(matches!(
            serializer.sentence_to_wire(sentence, &doc.tokens[..2]),
            Err(EncodeError::Invalid(ValidationError::InvalidTokenRange { .. }))
        ));

        let wire = serializer.sentence_to_wire(sentence, &doc.tokens).unwrap();
        let (back, tokens) = serializer.sentence_from_wire(wire).unwrap();
        assert_eq!(&back, sentence);
        assert_eq!(tokens, doc.tokens);
    }

    #[test]
    fn test_cancelled_decode_recovers() {
        let cancel = CancelToken::new();
        let serializer = Serializer::strict().with_cancellation(cancel.clone());
        let bytes = serializer.to_bytes(&apple_doc()).unwrap();

        cancel.cancel();
        assert_eq!(serializer.from_bytes(&bytes), Err(DecodeError::Cancelled));
        assert!(serializer.from_bytes(&bytes).is_ok());
    }
}
