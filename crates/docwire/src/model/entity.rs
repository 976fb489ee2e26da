use super::annotation::Span;
use super::token::Timex;
use super::tree::Tree;

/// A named-entity mention.
///
/// On a sentence, `token_begin..token_end` is relative to that sentence. In
/// the document-wide list, `sentence_index` names the sentence it is relative
/// to and must be set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityMention {
    pub sentence_index: Option<u32>,
    pub token_begin: u32,
    pub token_end: u32,
    pub ner: Option<String>,
    pub normalized_ner: Option<String>,
    pub entity_type: Option<String>,
    pub timex: Option<Timex>,
    pub wikipedia_entity: Option<String>,
    pub gender: Option<String>,
    pub entity_mention_index: Option<u32>,
    pub canonical_entity_mention_index: Option<u32>,
    pub entity_mention_text: Option<String>,
}

/// A quotation with its attribution.
///
/// `begin..end` are character offsets. `sentence_begin` and `sentence_end`
/// are inclusive sentence indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quote {
    pub text: Option<String>,
    pub begin: Option<u32>,
    pub end: Option<u32>,
    pub sentence_begin: Option<u32>,
    pub sentence_end: Option<u32>,
    pub token_begin: Option<u32>,
    pub token_end: Option<u32>,
    pub doc_id: Option<String>,
    pub index: Option<u32>,
    pub author: Option<String>,
    pub mention: Option<String>,
    pub mention_begin: Option<u32>,
    pub mention_end: Option<u32>,
    pub mention_type: Option<String>,
    pub mention_sieve: Option<String>,
    pub speaker: Option<String>,
    pub speaker_sieve: Option<String>,
    pub canonical_mention: Option<String>,
    pub canonical_mention_begin: Option<u32>,
    pub canonical_mention_end: Option<u32>,
}

/// A token addressed by sentence and 0-based position within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenLocation {
    pub sentence_index: u32,
    pub token_index: u32,
}

impl TokenLocation {
    pub fn new(sentence_index: u32, token_index: u32) -> Self {
        Self {
            sentence_index,
            token_index,
        }
    }
}

/// A (subject, relation, object) triple from open or slot-filling extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationTriple {
    pub subject: String,
    pub relation: String,
    pub object: String,
    pub confidence: Option<f64>,
    pub subject_tokens: Vec<TokenLocation>,
    pub relation_tokens: Vec<TokenLocation>,
    pub object_tokens: Vec<TokenLocation>,
    pub istmod: Option<bool>,
    pub prefix_be: Option<bool>,
    pub suffix_be: Option<bool>,
    pub suffix_of: Option<bool>,
}

impl RelationTriple {
    pub fn token_locations(&self) -> impl Iterator<Item = &TokenLocation> {
        self.subject_tokens
            .iter()
            .chain(&self.relation_tokens)
            .chain(&self.object_tokens)
    }
}

/// A section of a structured (e.g. XML) source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub char_begin: u32,
    pub char_end: u32,
    pub author: Option<String>,
    pub sentence_indexes: Vec<u32>,
    pub datetime: Option<String>,
    pub quotes: Vec<Quote>,
    pub author_char_begin: Option<u32>,
    pub author_char_end: Option<u32>,
    pub xml_tag: Option<String>,
}

/// A shorter sentence or clause entailed by its sentence.
///
/// `span` is a 0-based, end-exclusive token range within the sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct EntailedFragment {
    pub tree: Tree,
    pub span: Span,
    pub score: Option<f64>,
    pub assumed_truth: Option<bool>,
}
