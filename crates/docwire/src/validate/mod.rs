//! Reference checks run on every encode and decode.
//!
//! The codec itself only checks that bytes are well formed. Everything that
//! points somewhere else (graph edges, mention relations, token locations,
//! sentence indexes, cross-reference maps) is resolved here, against the
//! owning sentence or document.

use std::fmt::Display;

use rustc_hash::FxHashSet;

use crate::error::ValidationError;
use crate::model::{
    DependencyGraph, Document, EntailedFragment, EntityMention, NodeKey, Quote, Sentence,
    TokenLocation,
};

fn dangling(what: &'static str, target: impl Display) -> ValidationError {
    ValidationError::DanglingReference {
        what,
        target: target.to_string(),
    }
}

fn duplicate(what: &'static str, id: impl Display) -> ValidationError {
    ValidationError::Duplicate {
        what,
        id: id.to_string(),
    }
}

fn check_span(what: &'static str, begin: u32, end: u32, len: usize) -> Result<(), ValidationError> {
    if begin > end || end as usize > len {
        return Err(dangling(what, format_args!("tokens {begin}..{end} of {len}")));
    }
    Ok(())
}

/// Checks a graph's internal references. `resolves` decides whether a
/// declared node stands for an existing token.
pub fn validate_graph(
    graph: &DependencyGraph,
    resolves: impl Fn(&NodeKey) -> bool,
) -> Result<(), ValidationError> {
    let mut declared = FxHashSet::default();
    for node in &graph.nodes {
        if !declared.insert(*node) {
            return Err(duplicate("graph node", node));
        }
        if !resolves(node) {
            return Err(dangling("graph node", node));
        }
    }

    for edge in &graph.edges {
        if !declared.contains(&edge.source) || !declared.contains(&edge.target) {
            return Err(ValidationError::DanglingEdge {
                from: edge.source,
                to: edge.target,
            });
        }
    }

    let mut roots = FxHashSet::default();
    for root in &graph.roots {
        if !declared.contains(root) {
            return Err(dangling("graph root", root));
        }
        if !roots.insert(*root) {
            return Err(duplicate("graph root", root));
        }
    }
    if !graph.nodes.is_empty() && graph.roots.is_empty() {
        return Err(ValidationError::MissingRoot {
            nodes: graph.nodes.len(),
        });
    }
    Ok(())
}

/// Whether `key` names a token of a sentence with `token_count` tokens.
///
/// Real and copy nodes use 1-based token indices. Empty nodes sit after
/// token `index`, so 0 (before the first token) is allowed for them.
fn node_resolves(key: &NodeKey, sentence_index: Option<u32>, token_count: usize) -> bool {
    if sentence_index.is_some_and(|s| s != key.sentence_index) {
        return false;
    }
    let index = key.index as usize;
    if key.empty_index != 0 {
        index <= token_count
    } else {
        index >= 1 && index <= token_count
    }
}

fn check_fragments(
    fragments: Option<&Vec<EntailedFragment>>,
    token_count: usize,
) -> Result<(), ValidationError> {
    for fragment in fragments.into_iter().flatten() {
        check_span("entailed fragment", fragment.span.begin, fragment.span.end, token_count)?;
    }
    Ok(())
}

/// Checks references that stay inside one sentence.
///
/// When `sentence_index` is known, graph nodes must carry it.
pub fn validate_sentence(
    sentence: &Sentence,
    sentence_index: Option<u32>,
    token_count: usize,
) -> Result<(), ValidationError> {
    for graph in sentence.graphs() {
        validate_graph(graph, |key| node_resolves(key, sentence_index, token_count))?;
    }

    for mention in sentence.mentions_for_coref.iter().flatten() {
        check_span("mention", mention.start_index, mention.end_index, token_count)?;
        if let Some(head) = mention.head_index {
            if head as usize >= token_count {
                return Err(dangling("mention head", format_args!("token {head} of {token_count}")));
            }
        }
    }

    for entity in sentence.entity_mentions.iter().flatten() {
        check_span("entity mention", entity.token_begin, entity.token_end, token_count)?;
    }

    check_fragments(sentence.entailed_sentences.as_ref(), token_count)?;
    check_fragments(sentence.entailed_clauses.as_ref(), token_count)?;
    Ok(())
}

/// Sentence ranges must lie inside the token stream and must not overlap.
fn check_sentence_ranges(doc: &Document) -> Result<(), ValidationError> {
    let len = doc.tokens.len();
    let mut ranges: Vec<(u32, u32, usize)> = Vec::with_capacity(doc.sentences.len());
    for (i, s) in doc.sentences.iter().enumerate() {
        let (begin, end) = (s.token_offset_begin, s.token_offset_end);
        if begin > end || end as usize > len {
            return Err(ValidationError::InvalidTokenRange {
                sentence: i,
                begin,
                end,
                len,
            });
        }
        ranges.push((begin, end, i));
    }
    ranges.sort_unstable();
    for pair in ranges.windows(2) {
        let (_, prev_end, _) = pair[0];
        let (begin, end, sentence) = pair[1];
        if begin < prev_end {
            return Err(ValidationError::InvalidTokenRange {
                sentence,
                begin,
                end,
                len,
            });
        }
    }
    Ok(())
}

fn check_location(doc: &Document, loc: &TokenLocation) -> Result<(), ValidationError> {
    if doc
        .token_at(loc.sentence_index as usize, loc.token_index as usize)
        .is_none()
    {
        return Err(dangling(
            "relation triple token",
            format_args!("sentence {} token {}", loc.sentence_index, loc.token_index),
        ));
    }
    Ok(())
}

fn check_sentence_index(doc: &Document, what: &'static str, index: u32) -> Result<(), ValidationError> {
    if index as usize >= doc.sentences.len() {
        return Err(dangling(what, format_args!("sentence {index}")));
    }
    Ok(())
}

fn check_quote(doc: &Document, quote: &Quote) -> Result<(), ValidationError> {
    for index in [quote.sentence_begin, quote.sentence_end].into_iter().flatten() {
        check_sentence_index(doc, "quote", index)?;
    }
    if let (Some(begin), Some(end)) = (quote.sentence_begin, quote.sentence_end) {
        if begin > end {
            return Err(dangling("quote", format_args!("sentences {begin}..={end}")));
        }
    }
    Ok(())
}

fn sentence_len(doc: &Document, index: u32) -> Option<usize> {
    doc.sentences.get(index as usize).map(Sentence::token_count)
}

fn check_document_entity(doc: &Document, entity: &EntityMention) -> Result<(), ValidationError> {
    let index = entity
        .sentence_index
        .ok_or_else(|| dangling("entity mention", "no sentence"))?;
    let len = sentence_len(doc, index).ok_or_else(|| dangling("entity mention", format_args!("sentence {index}")))?;
    check_span("entity mention", entity.token_begin, entity.token_end, len)
}

/// Checks every reference in `doc`.
pub fn validate_document(doc: &Document) -> Result<(), ValidationError> {
    check_sentence_ranges(doc)?;

    let mut mention_ids = FxHashSet::default();
    for (i, sentence) in doc.sentences.iter().enumerate() {
        let index = sentence.sentence_index.unwrap_or(i as u32);
        validate_sentence(sentence, Some(index), sentence.token_count())?;
        for mention in sentence.mentions_for_coref.iter().flatten() {
            if !mention_ids.insert(mention.mention_id) {
                return Err(duplicate("mention id", mention.mention_id));
            }
        }
    }

    for sentence in &doc.sentences {
        for mention in sentence.mentions_for_coref.iter().flatten() {
            for id in mention.related_ids() {
                if !mention_ids.contains(&id) {
                    return Err(dangling("mention relation", format_args!("mention {id}")));
                }
            }
        }
        for triple in sentence
            .openie_triples
            .iter()
            .chain(sentence.kbp_triples.iter())
            .flatten()
        {
            for loc in triple.token_locations() {
                check_location(doc, loc)?;
            }
        }
    }

    let mut chain_ids = FxHashSet::default();
    let mut chain_mention_ids = FxHashSet::default();
    for chain in doc.coref_chains.iter().flatten() {
        if !chain_ids.insert(chain.chain_id) {
            return Err(duplicate("coref chain", chain.chain_id));
        }
        if let Some(rep) = chain.representative {
            if rep as usize >= chain.mentions.len() {
                return Err(dangling(
                    "coref representative",
                    format_args!("mention {rep} of chain {}", chain.chain_id),
                ));
            }
        }
        for m in &chain.mentions {
            if !chain_mention_ids.insert(m.mention_id) {
                return Err(duplicate("coref mention id", m.mention_id));
            }
            let len = sentence_len(doc, m.sentence_index)
                .ok_or_else(|| dangling("coref mention", format_args!("sentence {}", m.sentence_index)))?;
            check_span("coref mention", m.begin_index, m.end_index, len)?;
        }
    }

    for quote in doc.quotes.iter().flatten() {
        check_quote(doc, quote)?;
    }

    for section in doc.sections.iter().flatten() {
        for index in &section.sentence_indexes {
            check_sentence_index(doc, "section", *index)?;
        }
        for quote in &section.quotes {
            check_quote(doc, quote)?;
        }
    }

    let entity_count = doc.entity_mentions.as_ref().map_or(0, Vec::len);
    for entity in doc.entity_mentions.iter().flatten() {
        check_document_entity(doc, entity)?;
    }

    let known_mention = |id: &u32| mention_ids.contains(id) || chain_mention_ids.contains(id);
    for (mention, entity) in doc.coref_mention_to_entity_mention.iter().flatten() {
        if !known_mention(mention) {
            return Err(dangling("coref-to-entity map key", format_args!("mention {mention}")));
        }
        if *entity as usize >= entity_count {
            return Err(dangling("coref-to-entity map value", format_args!("entity mention {entity}")));
        }
    }
    for (entity, mention) in doc.entity_mention_to_coref_mention.iter().flatten() {
        if *entity as usize >= entity_count {
            return Err(dangling("entity-to-coref map key", format_args!("entity mention {entity}")));
        }
        if !known_mention(mention) {
            return Err(dangling("entity-to-coref map value", format_args!("mention {mention}")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::model::{CorefChain, CorefMention, Edge, Mention, RelationTriple, Token};

    fn apple_doc() -> Document {
        let mut doc = Document::new("Apple is a company.");
        doc.push_sentence(vec![
            Token::tagged("Apple", "NNP"),
            Token::tagged("is", "VBZ"),
            Token::tagged("a", "DT"),
            Token::tagged("company", "NN"),
        ]);
        doc
    }

    fn two_node_graph() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        graph.add_node(NodeKey::new(1, 0));
        graph.add_node(NodeKey::new(4, 0));
        graph.add_root(NodeKey::new(4, 0));
        graph.add_edge(Edge::new(NodeKey::new(4, 0), NodeKey::new(1, 0), "nsubj"));
        graph
    }

    #[test]
    fn test_valid_document() {
        let mut doc = apple_doc();
        doc.sentences[0].basic_dependencies = Some(two_node_graph());
        assert_eq!(validate_document(&doc), Ok(()));
    }

    #[test]
    fn test_dangling_edge() {
        let mut graph = two_node_graph();
        graph.add_edge(Edge::new(NodeKey::new(4, 0), NodeKey::new(3, 0), "det"));
        let err = validate_graph(&graph, |_| true).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DanglingEdge {
                from: NodeKey::new(4, 0),
                to: NodeKey::new(3, 0),
            }
        );
    }

    #[test]
    fn test_graph_root_rules() {
        let mut graph = DependencyGraph::new();
        graph.add_node(NodeKey::new(1, 0));
        assert_eq!(
            validate_graph(&graph, |_| true),
            Err(ValidationError::MissingRoot { nodes: 1 })
        );

        graph.add_root(NodeKey::new(2, 0));
        assert!(matches!(
            validate_graph(&graph, |_| true),
            Err(ValidationError::DanglingReference { what: "graph root", .. })
        ));

        // A single node and no edges is a valid graph.
        graph.roots = vec![NodeKey::new(1, 0)];
        assert_eq!(validate_graph(&graph, |_| true), Ok(()));
    }

    #[test]
    fn test_graph_node_must_resolve_to_token() {
        let mut doc = apple_doc();
        let mut graph = two_node_graph();
        graph.add_node(NodeKey::new(5, 0));
        doc.sentences[0].basic_dependencies = Some(graph);
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::DanglingReference { what: "graph node", .. })
        ));

        // Empty nodes may sit after the last token, or before the first.
        let mut graph = two_node_graph();
        graph.add_node(NodeKey::new(0, 0).with_empty(1));
        graph.add_node(NodeKey::new(4, 0).with_empty(1));
        doc.sentences[0].basic_dependencies = Some(graph);
        assert_eq!(validate_document(&doc), Ok(()));
    }

    #[test]
    fn test_overlapping_sentences_rejected() {
        let mut doc = apple_doc();
        doc.sentences.push(Sentence::covering(3, 4));
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::InvalidTokenRange { sentence: 1, .. })
        ));

        let mut doc = apple_doc();
        doc.sentences[0].token_offset_end = 9;
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::InvalidTokenRange { sentence: 0, len: 4, .. })
        ));
    }

    #[test]
    fn test_mention_references() {
        let mut doc = apple_doc();
        let mut apple = Mention::new(1, 0, 1);
        apple.appositions = vec![2];
        doc.sentences[0].mentions_for_coref = Some(vec![apple.clone(), Mention::new(2, 2, 4)]);
        assert_eq!(validate_document(&doc), Ok(()));

        apple.appositions = vec![3];
        doc.sentences[0].mentions_for_coref = Some(vec![apple, Mention::new(2, 2, 4)]);
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::DanglingReference { what: "mention relation", .. })
        ));

        doc.sentences[0].mentions_for_coref = Some(vec![Mention::new(1, 0, 1), Mention::new(1, 2, 4)]);
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::Duplicate { what: "mention id", .. })
        ));
    }

    #[test]
    fn test_chain_representative_must_exist() {
        let mut doc = apple_doc();
        doc.coref_chains = Some(vec![CorefChain {
            chain_id: 1,
            mentions: vec![CorefMention {
                mention_id: 1,
                begin_index: 0,
                end_index: 1,
                ..Default::default()
            }],
            representative: Some(1),
        }]);
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::DanglingReference { what: "coref representative", .. })
        ));
    }

    #[test]
    fn test_triple_token_locations_resolve() {
        let mut doc = apple_doc();
        doc.sentences[0].openie_triples = Some(vec![RelationTriple {
            subject_tokens: vec![TokenLocation::new(0, 0)],
            object_tokens: vec![TokenLocation::new(1, 0)],
            ..Default::default()
        }]);
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::DanglingReference { what: "relation triple token", .. })
        ));
    }

    #[test]
    fn test_cross_reference_maps_resolve() {
        let mut doc = apple_doc();
        doc.sentences[0].mentions_for_coref = Some(vec![Mention::new(1, 0, 1)]);
        doc.entity_mentions = Some(vec![EntityMention {
            sentence_index: Some(0),
            token_begin: 0,
            token_end: 1,
            ..Default::default()
        }]);
        doc.coref_mention_to_entity_mention = Some(BTreeMap::from([(1, 0)]));
        doc.entity_mention_to_coref_mention = Some(BTreeMap::from([(0, 1)]));
        assert_eq!(validate_document(&doc), Ok(()));

        doc.coref_mention_to_entity_mention = Some(BTreeMap::from([(1, 1)]));
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::DanglingReference { what: "coref-to-entity map value", .. })
        ));
    }
}
