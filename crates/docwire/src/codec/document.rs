//! Document records.
//!
//! On the wire each sentence carries its own tokens and the tokens outside
//! every sentence travel separately. Decoding puts the flat token stream back
//! together: sentence tokens go to their offsets and sentenceless tokens fill
//! the remaining positions in order.

use crate::cancel::CancelToken;
use crate::codec::assoc::{int_map_from_wire, int_map_to_wire};
use crate::codec::entity::{
    chain_from_wire, chain_to_wire, entity_mention_from_wire, entity_mention_to_wire,
    quote_from_wire, quote_to_wire, section_from_wire, section_to_wire,
};
use crate::codec::flagged_to_wire;
use crate::codec::guard::check_lossless;
use crate::codec::sentence::{decode_list, decode_sentence, encode_sentence, recover_text};
use crate::codec::token::{token_from_wire, token_to_wire};
use crate::error::{DecodeError, EncodeError, ValidationError};
use crate::model::{Document, Token};
use crate::validate::validate_document;
use crate::wire;

pub(crate) fn encode_document(doc: &Document, strict: bool) -> Result<wire::Document, EncodeError> {
    check_lossless(doc, strict)?;
    validate_document(doc)?;

    let mut sentences = Vec::with_capacity(doc.sentences.len());
    for sentence in &doc.sentences {
        let tokens = doc.sentence_tokens(sentence).unwrap_or_default();
        sentences.push(encode_sentence(sentence, tokens, strict)?);
    }

    let mut sentenceless_tokens = Vec::new();
    for token in doc.sentenceless_tokens() {
        check_lossless(token, strict)?;
        sentenceless_tokens.push(token_to_wire(token));
    }

    let (coref_chains, has_coref_chains) = flagged_to_wire(doc.coref_chains.as_ref(), chain_to_wire);
    let (quotes, has_quotes) = flagged_to_wire(doc.quotes.as_ref(), quote_to_wire);
    let (entity_mentions, has_entity_mentions) =
        flagged_to_wire(doc.entity_mentions.as_ref(), entity_mention_to_wire);
    let (sections, has_sections) = flagged_to_wire(doc.sections.as_ref(), section_to_wire);

    Ok(wire::Document {
        text: doc.text.clone(),
        doc_id: doc.doc_id.clone(),
        doc_date: doc.doc_date.clone(),
        calendar: doc.calendar,
        sentences,
        sentenceless_tokens,
        coref_chains,
        has_coref_chains,
        quotes,
        has_quotes,
        entity_mentions,
        has_entity_mentions,
        sections,
        has_sections,
        xml_doc: doc.xml_doc,
        coref_mention_to_entity_mention: doc
            .coref_mention_to_entity_mention
            .as_ref()
            .map(int_map_to_wire),
        entity_mention_to_coref_mention: doc
            .entity_mention_to_coref_mention
            .as_ref()
            .map(int_map_to_wire),
    })
}

/// Places sentence tokens at their offsets and fills the gaps with the
/// sentenceless tokens, in order.
fn assemble_tokens(
    sentences: &[(u32, Vec<Token>)],
    sentenceless: Vec<Token>,
) -> Result<Vec<Token>, DecodeError> {
    let total = sentences.iter().map(|(_, t)| t.len()).sum::<usize>() + sentenceless.len();
    let mut slots: Vec<Option<Token>> = (0..total).map(|_| None).collect();

    for (i, (begin, tokens)) in sentences.iter().enumerate() {
        let begin_pos = *begin as usize;
        let end = begin_pos + tokens.len();
        let range = slots.get_mut(begin_pos..end).ok_or(ValidationError::InvalidTokenRange {
            sentence: i,
            begin: *begin,
            end: end as u32,
            len: total,
        })?;
        for (slot, token) in range.iter_mut().zip(tokens) {
            if slot.is_some() {
                return Err(ValidationError::InvalidTokenRange {
                    sentence: i,
                    begin: *begin,
                    end: end as u32,
                    len: total,
                }
                .into());
            }
            *slot = Some(token.clone());
        }
    }

    let mut rest = sentenceless.into_iter();
    slots
        .into_iter()
        .map(|slot| slot.or_else(|| rest.next()))
        .collect::<Option<Vec<_>>>()
        .ok_or(DecodeError::MalformedEncoding {
            context: "sentence token ranges do not tile the token stream",
        })
}

pub(crate) fn decode_document(w: wire::Document, cancel: &CancelToken) -> Result<Document, DecodeError> {
    let mut sentences = Vec::with_capacity(w.sentences.len());
    let mut sentence_tokens = Vec::with_capacity(w.sentences.len());
    for sentence in w.sentences {
        cancel.checkpoint()?;
        let (sentence, tokens) = decode_sentence(sentence, cancel)?;
        sentence_tokens.push((sentence.token_offset_begin, tokens));
        sentences.push(sentence);
    }

    let mut sentenceless = Vec::with_capacity(w.sentenceless_tokens.len());
    for token in w.sentenceless_tokens {
        cancel.checkpoint()?;
        sentenceless.push(token_from_wire(token)?);
    }
    let tokens = assemble_tokens(&sentence_tokens, sentenceless)?;

    let doc = Document {
        text: Some(w.text.unwrap_or_else(|| recover_text(&tokens))),
        doc_id: w.doc_id,
        doc_date: w.doc_date,
        calendar: w.calendar,
        tokens,
        sentences,
        coref_chains: decode_list(w.coref_chains, w.has_coref_chains, cancel, chain_from_wire)?,
        quotes: decode_list(w.quotes, w.has_quotes, cancel, |q| Ok(quote_from_wire(q)))?,
        entity_mentions: decode_list(
            w.entity_mentions,
            w.has_entity_mentions,
            cancel,
            entity_mention_from_wire,
        )?,
        sections: decode_list(w.sections, w.has_sections, cancel, section_from_wire)?,
        xml_doc: w.xml_doc,
        coref_mention_to_entity_mention: w.coref_mention_to_entity_mention.map(int_map_from_wire),
        entity_mention_to_coref_mention: w.entity_mention_to_coref_mention.map(int_map_from_wire),
        extensions: Default::default(),
    };

    validate_document(&doc)?;
    Ok(doc)
}
