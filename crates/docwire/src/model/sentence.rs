use super::annotation::{Extensions, annotation_keys};
use super::coref::Mention;
use super::entity::{EntailedFragment, EntityMention, RelationTriple};
use super::graph::DependencyGraph;
use super::tree::Tree;

/// A sentence: a token range of the document plus sentence-level annotations.
///
/// The tokens themselves live in [`Document::tokens`](super::Document);
/// this sentence covers `token_offset_begin..token_offset_end` of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sentence {
    pub token_offset_begin: u32,
    pub token_offset_end: u32,
    pub text: Option<String>,
    pub sentence_index: Option<u32>,
    pub line_number: Option<u32>,
    pub paragraph_index: Option<u32>,
    pub character_offset_begin: Option<u32>,
    pub character_offset_end: Option<u32>,
    pub sentence_id: Option<String>,
    pub doc_id: Option<String>,
    pub speaker: Option<String>,
    pub speaker_type: Option<String>,
    pub is_quoted: Option<bool>,
    pub section_name: Option<String>,
    pub section_author: Option<String>,
    pub section_date: Option<String>,
    pub section_index: Option<u32>,
    pub chapter_index: Option<u32>,
    pub sentiment: Option<String>,
    pub parse_tree: Option<Tree>,
    pub binarized_parse_tree: Option<Tree>,
    pub annotated_parse_tree: Option<Tree>,
    pub basic_dependencies: Option<DependencyGraph>,
    pub enhanced_dependencies: Option<DependencyGraph>,
    pub enhanced_plus_plus_dependencies: Option<DependencyGraph>,
    pub alternative_dependencies: Option<DependencyGraph>,
    pub entity_mentions: Option<Vec<EntityMention>>,
    pub mentions_for_coref: Option<Vec<Mention>>,
    pub openie_triples: Option<Vec<RelationTriple>>,
    pub kbp_triples: Option<Vec<RelationTriple>>,
    pub entailed_sentences: Option<Vec<EntailedFragment>>,
    pub entailed_clauses: Option<Vec<EntailedFragment>>,
    pub extensions: Extensions,
}

impl Sentence {
    /// A sentence covering `begin..end` of the document's tokens.
    pub fn covering(begin: u32, end: u32) -> Self {
        Self {
            token_offset_begin: begin,
            token_offset_end: end,
            ..Default::default()
        }
    }

    pub fn token_count(&self) -> usize {
        self.token_offset_end.saturating_sub(self.token_offset_begin) as usize
    }

    /// Every dependency graph variant that is present.
    pub fn graphs(&self) -> impl Iterator<Item = &DependencyGraph> {
        [
            &self.basic_dependencies,
            &self.enhanced_dependencies,
            &self.enhanced_plus_plus_dependencies,
            &self.alternative_dependencies,
        ]
        .into_iter()
        .flatten()
    }

    /// Every parse tree variant that is present.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        [
            &self.parse_tree,
            &self.binarized_parse_tree,
            &self.annotated_parse_tree,
        ]
        .into_iter()
        .flatten()
    }
}

annotation_keys!(Sentence, "sentence" {
    text => "text",
    sentence_index => "sentence_index",
    line_number => "line_number",
    paragraph_index => "paragraph_index",
    character_offset_begin => "character_offset_begin",
    character_offset_end => "character_offset_end",
    sentence_id => "sentence_id",
    doc_id => "doc_id",
    speaker => "speaker",
    speaker_type => "speaker_type",
    is_quoted => "is_quoted",
    section_name => "section_name",
    section_author => "section_author",
    section_date => "section_date",
    section_index => "section_index",
    chapter_index => "chapter_index",
    sentiment => "sentiment",
    parse_tree => "parse_tree",
    binarized_parse_tree => "binarized_parse_tree",
    annotated_parse_tree => "annotated_parse_tree",
    basic_dependencies => "basic_dependencies",
    enhanced_dependencies => "enhanced_dependencies",
    enhanced_plus_plus_dependencies => "enhanced_plus_plus_dependencies",
    alternative_dependencies => "alternative_dependencies",
    entity_mentions => "entity_mentions",
    mentions_for_coref => "mentions_for_coref",
    openie_triples => "openie_triples",
    kbp_triples => "kbp_triples",
    entailed_sentences => "entailed_sentences",
    entailed_clauses => "entailed_clauses",
});
