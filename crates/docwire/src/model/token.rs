use std::collections::BTreeMap;

use super::annotation::{Extensions, Span, annotation_keys};
use super::enums::{NaturalLogicRelation, Quantifier};

/// A temporal expression attached to a token or entity mention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timex {
    pub value: Option<String>,
    pub alt_value: Option<String>,
    pub text: Option<String>,
    pub timex_type: Option<String>,
    pub tid: Option<String>,
    pub begin_point: Option<u32>,
    pub end_point: Option<u32>,
}

/// How a token's context projects each natural-logic relation.
///
/// `projections[i]` is the projection of `NaturalLogicRelation::ALL[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polarity {
    pub projections: [NaturalLogicRelation; 7],
}

impl Polarity {
    /// The identity projection (an upward-monotone context).
    pub fn upward() -> Self {
        Self {
            projections: NaturalLogicRelation::ALL,
        }
    }

    /// Projection of a single relation.
    pub fn project(&self, relation: NaturalLogicRelation) -> NaturalLogicRelation {
        let position = NaturalLogicRelation::ALL
            .iter()
            .position(|r| *r == relation)
            .unwrap_or(0);
        self.projections[position]
    }
}

impl Default for Polarity {
    fn default() -> Self {
        Self::upward()
    }
}

/// A natural-logic operator anchored at a token.
///
/// `quantifier` is `None` when the operator's name is not one this crate
/// knows; the spans are kept either way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorSpec {
    pub quantifier: Option<Quantifier>,
    pub quantifier_span: Span,
    pub subject_span: Span,
    pub object_span: Option<Span>,
}

/// The atomic unit of a document: a word plus every annotation attached to it.
///
/// All annotations are independently optional. `index`, `sentence_index`,
/// `copy_count` and `empty_index` together identify the token when a
/// dependency graph refers to it; the last two default to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Token {
    pub word: Option<String>,
    pub tag: Option<String>,
    pub value: Option<String>,
    pub category: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub original_text: Option<String>,
    pub ner: Option<String>,
    pub coarse_ner: Option<String>,
    pub fine_grained_ner: Option<String>,
    pub ner_label_probs: Option<BTreeMap<String, f64>>,
    pub normalized_ner: Option<String>,
    pub lemma: Option<String>,
    pub answer: Option<String>,
    pub begin_char: Option<u32>,
    pub end_char: Option<u32>,
    pub codepoint_offset_begin: Option<u32>,
    pub codepoint_offset_end: Option<u32>,
    pub utterance: Option<u32>,
    pub speaker: Option<String>,
    pub speaker_type: Option<String>,
    pub begin_index: Option<u32>,
    pub end_index: Option<u32>,
    pub token_begin_index: Option<u32>,
    pub token_end_index: Option<u32>,
    pub index: Option<u32>,
    pub sentence_index: Option<u32>,
    pub empty_index: Option<u32>,
    pub copy_count: Option<u32>,
    pub timex: Option<Timex>,
    pub xml_context: Option<Vec<String>>,
    pub coref_cluster_id: Option<i32>,
    pub wikipedia_entity: Option<String>,
    pub polarity: Option<Polarity>,
    pub polarity_dir: Option<String>,
    pub sentiment: Option<String>,
    pub gender: Option<String>,
    pub true_case: Option<String>,
    pub true_case_text: Option<String>,
    pub chinese_char: Option<String>,
    pub chinese_seg: Option<String>,
    pub section_name: Option<String>,
    pub section_author: Option<String>,
    pub section_date: Option<String>,
    pub section_end_label: Option<String>,
    pub parent: Option<String>,
    pub coref_mention_indices: Option<Vec<u32>>,
    pub entity_mention_index: Option<u32>,
    pub is_mwt: Option<bool>,
    pub is_first_mwt: Option<bool>,
    pub mwt_text: Option<String>,
    pub numeric_value: Option<f64>,
    pub numeric_type: Option<String>,
    pub numeric_composite_value: Option<f64>,
    pub numeric_composite_type: Option<String>,
    pub conllu_misc: Option<String>,
    pub conllu_features: Option<BTreeMap<String, String>>,
    pub conllu_secondary_deps: Option<BTreeMap<String, String>>,
    pub conllu_token_span: Option<Span>,
    pub operator: Option<OperatorSpec>,
    pub is_newline: Option<bool>,
    /// Annotations with no typed field. Never written to the wire.
    pub extensions: Extensions,
}

impl Token {
    /// A token with just its surface form.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: Some(word.into()),
            ..Default::default()
        }
    }

    /// A token with surface form and part-of-speech tag.
    pub fn tagged(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: Some(word.into()),
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    /// The text this token covered in the source, falling back to `word`.
    pub fn surface(&self) -> &str {
        self.original_text
            .as_deref()
            .or(self.word.as_deref())
            .unwrap_or("")
    }
}

annotation_keys!(Token, "token" {
    word => "word",
    tag => "tag",
    value => "value",
    category => "category",
    before => "before",
    after => "after",
    original_text => "original_text",
    ner => "ner",
    coarse_ner => "coarse_ner",
    fine_grained_ner => "fine_grained_ner",
    ner_label_probs => "ner_label_probs",
    normalized_ner => "normalized_ner",
    lemma => "lemma",
    answer => "answer",
    begin_char => "begin_char",
    end_char => "end_char",
    codepoint_offset_begin => "codepoint_offset_begin",
    codepoint_offset_end => "codepoint_offset_end",
    utterance => "utterance",
    speaker => "speaker",
    speaker_type => "speaker_type",
    begin_index => "begin_index",
    end_index => "end_index",
    token_begin_index => "token_begin_index",
    token_end_index => "token_end_index",
    index => "index",
    sentence_index => "sentence_index",
    empty_index => "empty_index",
    copy_count => "copy_count",
    timex => "timex",
    xml_context => "xml_context",
    coref_cluster_id => "coref_cluster_id",
    wikipedia_entity => "wikipedia_entity",
    polarity => "polarity",
    polarity_dir => "polarity_dir",
    sentiment => "sentiment",
    gender => "gender",
    true_case => "true_case",
    true_case_text => "true_case_text",
    chinese_char => "chinese_char",
    chinese_seg => "chinese_seg",
    section_name => "section_name",
    section_author => "section_author",
    section_date => "section_date",
    section_end_label => "section_end_label",
    parent => "parent",
    coref_mention_indices => "coref_mention_indices",
    entity_mention_index => "entity_mention_index",
    is_mwt => "is_mwt",
    is_first_mwt => "is_first_mwt",
    mwt_text => "mwt_text",
    numeric_value => "numeric_value",
    numeric_type => "numeric_type",
    numeric_composite_value => "numeric_composite_value",
    numeric_composite_type => "numeric_composite_type",
    conllu_misc => "conllu_misc",
    conllu_features => "conllu_features",
    conllu_secondary_deps => "conllu_secondary_deps",
    conllu_token_span => "conllu_token_span",
    operator => "operator",
    is_newline => "is_newline",
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnnotationValue;

    #[test]
    fn test_populated_keys_lists_typed_then_extensions() {
        let mut token = Token::tagged("Apple", "NNP");
        token
            .extensions
            .insert("sentiment_vector".into(), AnnotationValue::List(vec![0.5.into()]));
        assert_eq!(token.populated_keys(), vec!["word", "tag", "sentiment_vector"]);
    }

    #[test]
    fn test_clear_annotation() {
        let mut token = Token::tagged("Apple", "NNP");
        token.extensions.insert("tag".into(), "shadow".into());
        assert!(token.clear_annotation("tag"));
        assert!(token.tag.is_none());
        assert!(token.extensions.is_empty());
        assert!(!token.clear_annotation("lemma"));
    }

    #[test]
    fn test_surface_prefers_original_text() {
        let mut token = Token::new("(");
        assert_eq!(token.surface(), "(");
        token.original_text = Some("-LRB-".into());
        assert_eq!(token.surface(), "-LRB-");
        assert_eq!(Token::default().surface(), "");
    }

    #[test]
    fn test_annotation_keys_are_unique() {
        let mut keys = Token::ANNOTATION_KEYS.to_vec();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Token::ANNOTATION_KEYS.len());
    }
}
