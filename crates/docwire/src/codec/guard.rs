//! Detection of annotations that would not survive encoding.
//!
//! Each entity kind has a registry: the annotation keys its codec writes.
//! Before an entity is encoded its populated keys are checked against that
//! registry once. Extension keys never have a wire slot, so they always
//! count as unmapped.

use lazy_static::lazy_static;
use rustc_hash::FxHashSet;

use crate::error::EncodeError;
use crate::model::{Annotated, Document, Sentence, Token};

lazy_static! {
    static ref TOKEN_REGISTRY: FxHashSet<&'static str> =
        Token::ANNOTATION_KEYS.iter().copied().collect();
    static ref SENTENCE_REGISTRY: FxHashSet<&'static str> =
        Sentence::ANNOTATION_KEYS.iter().copied().collect();
    static ref DOCUMENT_REGISTRY: FxHashSet<&'static str> =
        Document::ANNOTATION_KEYS.iter().copied().collect();
}

/// An annotated entity with a codec registry.
pub trait Registered: Annotated {
    fn registry() -> &'static FxHashSet<&'static str>;
}

impl Registered for Token {
    fn registry() -> &'static FxHashSet<&'static str> {
        &TOKEN_REGISTRY
    }
}

impl Registered for Sentence {
    fn registry() -> &'static FxHashSet<&'static str> {
        &SENTENCE_REGISTRY
    }
}

impl Registered for Document {
    fn registry() -> &'static FxHashSet<&'static str> {
        &DOCUMENT_REGISTRY
    }
}

/// Populated keys of `entity` that its codec cannot write, sorted.
pub fn unmapped_keys<A: Registered>(entity: &A) -> Vec<String> {
    let registry = A::registry();
    let mut keys: Vec<String> = entity
        .set_field_keys()
        .into_iter()
        .filter(|k| !registry.contains(k))
        .map(str::to_string)
        .chain(entity.extensions().keys().cloned())
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

/// Fails in strict mode if `entity` has unmapped keys. In relaxed mode the
/// keys are reported at debug level and left behind.
pub fn check_lossless<A: Registered>(entity: &A, strict: bool) -> Result<(), EncodeError> {
    let keys = unmapped_keys(entity);
    if keys.is_empty() {
        return Ok(());
    }
    if strict {
        return Err(EncodeError::LossySerialization {
            entity: A::ENTITY,
            keys,
        });
    }
    tracing::debug!(entity = A::ENTITY, ?keys, "dropping annotations with no wire mapping");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnnotationValue;

    #[test]
    fn test_word_and_tag_are_mapped() {
        let token = Token::tagged("Apple", "NNP");
        assert!(unmapped_keys(&token).is_empty());
        assert!(check_lossless(&token, true).is_ok());
    }

    #[test]
    fn test_extension_keys_are_unmapped() {
        let mut token = Token::tagged("Apple", "NNP");
        token.extensions.insert("zeta".into(), AnnotationValue::Int(1));
        token.extensions.insert("alpha".into(), "x".into());

        let err = check_lossless(&token, true).unwrap_err();
        assert_eq!(
            err,
            EncodeError::LossySerialization {
                entity: "token",
                keys: vec!["alpha".into(), "zeta".into()],
            }
        );
        assert!(err.to_string().contains("alpha"));

        assert!(check_lossless(&token, false).is_ok());
    }

    #[test]
    fn test_registries_cover_every_typed_key() {
        assert_eq!(TOKEN_REGISTRY.len(), Token::ANNOTATION_KEYS.len());
        assert_eq!(SENTENCE_REGISTRY.len(), Sentence::ANNOTATION_KEYS.len());
        assert_eq!(DOCUMENT_REGISTRY.len(), Document::ANNOTATION_KEYS.len());
    }
}
