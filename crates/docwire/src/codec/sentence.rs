//! Sentence records and text recovery.

use crate::cancel::CancelToken;
use crate::codec::entity::{
    entity_mention_from_wire, entity_mention_to_wire, fragment_from_wire, fragment_to_wire,
    mention_from_wire, mention_to_wire, triple_from_wire, triple_to_wire,
};
use crate::codec::graph::{graph_from_wire, graph_to_wire};
use crate::codec::guard::check_lossless;
use crate::codec::token::{token_from_wire, token_to_wire};
use crate::codec::tree::{flatten, unflatten};
use crate::codec::{flagged, flagged_to_wire};
use crate::error::{DecodeError, EncodeError};
use crate::model::{Sentence, Token};
use crate::wire;

/// Rebuilds the text `tokens` were cut from.
///
/// Each token contributes its `before` whitespace (a single space when that
/// is unknown, except for the first token) followed by its original text.
pub fn recover_text(tokens: &[Token]) -> String {
    let mut text = String::new();
    for (i, token) in tokens.iter().enumerate() {
        match token.before.as_deref() {
            Some(before) => text.push_str(before),
            None if i > 0 => text.push(' '),
            None => {}
        }
        text.push_str(token.surface());
    }
    text
}

/// Encodes `sentence` with its `tokens`. References are not checked here.
pub(crate) fn encode_sentence(
    sentence: &Sentence,
    tokens: &[Token],
    strict: bool,
) -> Result<wire::Sentence, EncodeError> {
    check_lossless(sentence, strict)?;

    let mut wire_tokens = Vec::with_capacity(tokens.len());
    for token in tokens {
        check_lossless(token, strict)?;
        wire_tokens.push(token_to_wire(token));
    }

    let (entity_mentions, has_entity_mentions) =
        flagged_to_wire(sentence.entity_mentions.as_ref(), entity_mention_to_wire);
    let (mentions_for_coref, has_mentions_for_coref) =
        flagged_to_wire(sentence.mentions_for_coref.as_ref(), mention_to_wire);
    let (openie_triples, has_openie_triples) =
        flagged_to_wire(sentence.openie_triples.as_ref(), triple_to_wire);
    let (kbp_triples, has_kbp_triples) = flagged_to_wire(sentence.kbp_triples.as_ref(), triple_to_wire);
    let (entailed_sentences, has_entailed_sentences) =
        flagged_to_wire(sentence.entailed_sentences.as_ref(), fragment_to_wire);
    let (entailed_clauses, has_entailed_clauses) =
        flagged_to_wire(sentence.entailed_clauses.as_ref(), fragment_to_wire);

    Ok(wire::Sentence {
        tokens: wire_tokens,
        token_offset_begin: Some(sentence.token_offset_begin),
        token_offset_end: Some(sentence.token_offset_end),
        text: sentence.text.clone(),
        sentence_index: sentence.sentence_index,
        line_number: sentence.line_number,
        paragraph_index: sentence.paragraph_index,
        character_offset_begin: sentence.character_offset_begin,
        character_offset_end: sentence.character_offset_end,
        sentence_id: sentence.sentence_id.clone(),
        doc_id: sentence.doc_id.clone(),
        speaker: sentence.speaker.clone(),
        speaker_type: sentence.speaker_type.clone(),
        is_quoted: sentence.is_quoted,
        section_name: sentence.section_name.clone(),
        section_author: sentence.section_author.clone(),
        section_date: sentence.section_date.clone(),
        section_index: sentence.section_index,
        chapter_index: sentence.chapter_index,
        sentiment: sentence.sentiment.clone(),
        parse_tree: sentence.parse_tree.as_ref().map(flatten),
        binarized_parse_tree: sentence.binarized_parse_tree.as_ref().map(flatten),
        annotated_parse_tree: sentence.annotated_parse_tree.as_ref().map(flatten),
        basic_dependencies: sentence.basic_dependencies.as_ref().map(graph_to_wire),
        enhanced_dependencies: sentence.enhanced_dependencies.as_ref().map(graph_to_wire),
        enhanced_plus_plus_dependencies: sentence
            .enhanced_plus_plus_dependencies
            .as_ref()
            .map(graph_to_wire),
        alternative_dependencies: sentence.alternative_dependencies.as_ref().map(graph_to_wire),
        entity_mentions,
        has_entity_mentions,
        mentions_for_coref,
        has_mentions_for_coref,
        openie_triples,
        has_openie_triples,
        kbp_triples,
        has_kbp_triples,
        entailed_sentences,
        has_entailed_sentences,
        entailed_clauses,
        has_entailed_clauses,
    })
}

/// Decodes a `has_*`-flagged list, checking for cancellation per element.
pub(crate) fn decode_list<W, T>(
    items: Vec<W>,
    has: Option<bool>,
    cancel: &CancelToken,
    mut f: impl FnMut(W) -> Result<T, DecodeError>,
) -> Result<Option<Vec<T>>, DecodeError> {
    let Some(items) = flagged(items, has) else {
        return Ok(None);
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        cancel.checkpoint()?;
        out.push(f(item)?);
    }
    Ok(Some(out))
}

/// Decodes a sentence and its tokens. References are not checked here.
pub(crate) fn decode_sentence(
    w: wire::Sentence,
    cancel: &CancelToken,
) -> Result<(Sentence, Vec<Token>), DecodeError> {
    let mut tokens = Vec::with_capacity(w.tokens.len());
    for token in w.tokens {
        cancel.checkpoint()?;
        tokens.push(token_from_wire(token)?);
    }

    let begin = w.token_offset_begin.unwrap_or(0);
    let end = w
        .token_offset_end
        .unwrap_or_else(|| begin.saturating_add(tokens.len() as u32));
    if end < begin || (end - begin) as usize != tokens.len() {
        return Err(DecodeError::MalformedEncoding {
            context: "sentence token offsets disagree with its token count",
        });
    }

    let tree = |t: Option<wire::FlattenedTree>| t.map(|t| unflatten(t, cancel)).transpose();
    let graph = |g: Option<wire::DependencyGraph>| g.map(|g| graph_from_wire(g, cancel)).transpose();

    let sentence = Sentence {
        token_offset_begin: begin,
        token_offset_end: end,
        text: Some(w.text.unwrap_or_else(|| recover_text(&tokens))),
        sentence_index: w.sentence_index,
        line_number: w.line_number,
        paragraph_index: w.paragraph_index,
        character_offset_begin: w.character_offset_begin,
        character_offset_end: w.character_offset_end,
        sentence_id: w.sentence_id,
        doc_id: w.doc_id,
        speaker: w.speaker,
        speaker_type: w.speaker_type,
        is_quoted: w.is_quoted,
        section_name: w.section_name,
        section_author: w.section_author,
        section_date: w.section_date,
        section_index: w.section_index,
        chapter_index: w.chapter_index,
        sentiment: w.sentiment,
        parse_tree: tree(w.parse_tree)?,
        binarized_parse_tree: tree(w.binarized_parse_tree)?,
        annotated_parse_tree: tree(w.annotated_parse_tree)?,
        basic_dependencies: graph(w.basic_dependencies)?,
        enhanced_dependencies: graph(w.enhanced_dependencies)?,
        enhanced_plus_plus_dependencies: graph(w.enhanced_plus_plus_dependencies)?,
        alternative_dependencies: graph(w.alternative_dependencies)?,
        entity_mentions: decode_list(
            w.entity_mentions,
            w.has_entity_mentions,
            cancel,
            entity_mention_from_wire,
        )?,
        mentions_for_coref: decode_list(
            w.mentions_for_coref,
            w.has_mentions_for_coref,
            cancel,
            mention_from_wire,
        )?,
        openie_triples: decode_list(w.openie_triples, w.has_openie_triples, cancel, triple_from_wire)?,
        kbp_triples: decode_list(w.kbp_triples, w.has_kbp_triples, cancel, triple_from_wire)?,
        entailed_sentences: decode_list(
            w.entailed_sentences,
            w.has_entailed_sentences,
            cancel,
            |f| fragment_from_wire(f, cancel),
        )?,
        entailed_clauses: decode_list(
            w.entailed_clauses,
            w.has_entailed_clauses,
            cancel,
            |f| fragment_from_wire(f, cancel),
        )?,
        extensions: Default::default(),
    };
    Ok((sentence, tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::message::Message;
    use crate::model::{AnnotationValue, Tree};

    fn tokens() -> Vec<Token> {
        let mut apple = Token::tagged("Apple", "NNP");
        apple.before = Some(String::new());
        let mut dot = Token::tagged(".", ".");
        dot.before = Some(String::new());
        vec![apple, Token::tagged("is", "VBZ"), Token::tagged("good", "JJ"), dot]
    }

    #[test]
    fn test_recover_text() {
        assert_eq!(recover_text(&tokens()), "Apple is good.");
        assert_eq!(recover_text(&[]), "");

        let mut paren = Token::new("-LRB-");
        paren.original_text = Some("(".into());
        paren.before = Some("  ".into());
        assert_eq!(recover_text(&[Token::new("x"), paren]), "x  (");
    }

    #[test]
    fn test_sentence_roundtrip_recovers_missing_text() {
        let mut sentence = Sentence::covering(0, 4);
        sentence.sentence_index = Some(0);
        sentence.parse_tree = Some(Tree::node("ROOT", vec![Tree::leaf("Apple")]));
        sentence.openie_triples = Some(Vec::new());

        let bytes = encode_sentence(&sentence, &tokens(), true)
            .unwrap()
            .encode_to_vec();
        let (back, back_tokens) =
            decode_sentence(wire::Sentence::decode(&bytes).unwrap(), &CancelToken::new()).unwrap();

        assert_eq!(back_tokens, tokens());
        assert_eq!(back.text.as_deref(), Some("Apple is good."));
        assert_eq!(back.openie_triples, Some(Vec::new()));
        assert_eq!(back.kbp_triples, None);
        assert_eq!(back.parse_tree, sentence.parse_tree);
    }

    #[test]
    fn test_unmapped_token_key_fails_sentence_in_strict_mode() {
        let mut toks = tokens();
        toks[2].extensions.insert("gloss".into(), AnnotationValue::Text("nice".into()));
        let sentence = Sentence::covering(0, 4);

        assert!(matches!(
            encode_sentence(&sentence, &toks, true),
            Err(EncodeError::LossySerialization { entity: "token", .. })
        ));
        let wire = encode_sentence(&sentence, &toks, false).unwrap();
        assert_eq!(wire.tokens.len(), 4);
    }

    #[test]
    fn test_offsets_must_match_token_count() {
        let mut wire = encode_sentence(&Sentence::covering(0, 4), &tokens(), true).unwrap();
        wire.token_offset_end = Some(3);
        assert!(matches!(
            decode_sentence(wire, &CancelToken::new()),
            Err(DecodeError::MalformedEncoding { .. })
        ));
    }
}
