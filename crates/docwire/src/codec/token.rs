//! Token field mapping.
//!
//! Every typed token field has exactly one wire field. Map fields go through
//! the association-list codec; list fields that must tell empty from absent
//! carry a `has_*` companion flag.

use crate::codec::assoc::{
    double_map_from_wire, double_map_to_wire, string_map_from_wire, string_map_to_wire,
};
use crate::codec::entity::{span_from_wire, span_to_wire, timex_from_wire, timex_to_wire};
use crate::codec::enums::{WireEnum, decode_enum, quantifier_from_name};
use crate::codec::flagged;
use crate::error::DecodeError;
use crate::limits::POLARITY_PROJECTIONS;
use crate::model::{NaturalLogicRelation, OperatorSpec, Polarity, Token};
use crate::wire;

fn polarity_to_wire(polarity: &Polarity) -> wire::Polarity {
    wire::Polarity {
        projections: polarity.projections.iter().map(|r| r.code()).collect(),
    }
}

fn polarity_from_wire(polarity: wire::Polarity) -> Result<Polarity, DecodeError> {
    if polarity.projections.len() != POLARITY_PROJECTIONS {
        return Err(DecodeError::MalformedEncoding {
            context: "polarity must project all seven natural logic relations",
        });
    }
    let mut projections = NaturalLogicRelation::ALL;
    for (slot, code) in projections.iter_mut().zip(polarity.projections) {
        *slot = decode_enum(code)?;
    }
    Ok(Polarity { projections })
}

fn operator_to_wire(op: &OperatorSpec) -> wire::Operator {
    wire::Operator {
        name: op.quantifier.map(|q| q.name().to_string()),
        quantifier_span: Some(span_to_wire(op.quantifier_span)),
        subject_span: Some(span_to_wire(op.subject_span)),
        object_span: op.object_span.map(span_to_wire),
    }
}

fn operator_from_wire(op: wire::Operator) -> Result<OperatorSpec, DecodeError> {
    Ok(OperatorSpec {
        quantifier: op.name.as_deref().and_then(quantifier_from_name),
        quantifier_span: op.quantifier_span.map(span_from_wire).transpose()?.unwrap_or_default(),
        subject_span: op.subject_span.map(span_from_wire).transpose()?.unwrap_or_default(),
        object_span: op.object_span.map(span_from_wire).transpose()?,
    })
}

/// Maps every typed field of `t`. Extensions are not looked at; the lossy
/// guard deals with those before this is called.
pub fn token_to_wire(t: &Token) -> wire::Token {
    wire::Token {
        word: t.word.clone(),
        tag: t.tag.clone(),
        value: t.value.clone(),
        category: t.category.clone(),
        before: t.before.clone(),
        after: t.after.clone(),
        original_text: t.original_text.clone(),
        ner: t.ner.clone(),
        coarse_ner: t.coarse_ner.clone(),
        fine_grained_ner: t.fine_grained_ner.clone(),
        ner_label_probs: t.ner_label_probs.as_ref().map(double_map_to_wire),
        normalized_ner: t.normalized_ner.clone(),
        lemma: t.lemma.clone(),
        answer: t.answer.clone(),
        begin_char: t.begin_char,
        end_char: t.end_char,
        codepoint_offset_begin: t.codepoint_offset_begin,
        codepoint_offset_end: t.codepoint_offset_end,
        utterance: t.utterance,
        speaker: t.speaker.clone(),
        speaker_type: t.speaker_type.clone(),
        begin_index: t.begin_index,
        end_index: t.end_index,
        token_begin_index: t.token_begin_index,
        token_end_index: t.token_end_index,
        index: t.index,
        sentence_index: t.sentence_index,
        empty_index: t.empty_index,
        copy_count: t.copy_count,
        timex: t.timex.as_ref().map(timex_to_wire),
        has_xml_context: t.xml_context.as_ref().map(|_| true),
        xml_context: t.xml_context.clone().unwrap_or_default(),
        coref_cluster_id: t.coref_cluster_id,
        wikipedia_entity: t.wikipedia_entity.clone(),
        polarity: t.polarity.as_ref().map(polarity_to_wire),
        polarity_dir: t.polarity_dir.clone(),
        sentiment: t.sentiment.clone(),
        gender: t.gender.clone(),
        true_case: t.true_case.clone(),
        true_case_text: t.true_case_text.clone(),
        chinese_char: t.chinese_char.clone(),
        chinese_seg: t.chinese_seg.clone(),
        section_name: t.section_name.clone(),
        section_author: t.section_author.clone(),
        section_date: t.section_date.clone(),
        section_end_label: t.section_end_label.clone(),
        parent: t.parent.clone(),
        coref_mention_indices: t.coref_mention_indices.clone().unwrap_or_default(),
        has_coref_mention_indices: t.coref_mention_indices.as_ref().map(|_| true),
        entity_mention_index: t.entity_mention_index,
        is_mwt: t.is_mwt,
        is_first_mwt: t.is_first_mwt,
        mwt_text: t.mwt_text.clone(),
        numeric_value: t.numeric_value,
        numeric_type: t.numeric_type.clone(),
        numeric_composite_value: t.numeric_composite_value,
        numeric_composite_type: t.numeric_composite_type.clone(),
        conllu_misc: t.conllu_misc.clone(),
        conllu_features: t.conllu_features.as_ref().map(string_map_to_wire),
        conllu_secondary_deps: t.conllu_secondary_deps.as_ref().map(string_map_to_wire),
        conllu_token_span: t.conllu_token_span.map(span_to_wire),
        operator: t.operator.as_ref().map(operator_to_wire),
        is_newline: t.is_newline,
    }
}

pub fn token_from_wire(w: wire::Token) -> Result<Token, DecodeError> {
    Ok(Token {
        word: w.word,
        tag: w.tag,
        value: w.value,
        category: w.category,
        before: w.before,
        after: w.after,
        original_text: w.original_text,
        ner: w.ner,
        coarse_ner: w.coarse_ner,
        fine_grained_ner: w.fine_grained_ner,
        ner_label_probs: w.ner_label_probs.map(double_map_from_wire),
        normalized_ner: w.normalized_ner,
        lemma: w.lemma,
        answer: w.answer,
        begin_char: w.begin_char,
        end_char: w.end_char,
        codepoint_offset_begin: w.codepoint_offset_begin,
        codepoint_offset_end: w.codepoint_offset_end,
        utterance: w.utterance,
        speaker: w.speaker,
        speaker_type: w.speaker_type,
        begin_index: w.begin_index,
        end_index: w.end_index,
        token_begin_index: w.token_begin_index,
        token_end_index: w.token_end_index,
        index: w.index,
        sentence_index: w.sentence_index,
        empty_index: w.empty_index,
        copy_count: w.copy_count,
        timex: w.timex.map(timex_from_wire),
        xml_context: flagged(w.xml_context, w.has_xml_context),
        coref_cluster_id: w.coref_cluster_id,
        wikipedia_entity: w.wikipedia_entity,
        polarity: w.polarity.map(polarity_from_wire).transpose()?,
        polarity_dir: w.polarity_dir,
        sentiment: w.sentiment,
        gender: w.gender,
        true_case: w.true_case,
        true_case_text: w.true_case_text,
        chinese_char: w.chinese_char,
        chinese_seg: w.chinese_seg,
        section_name: w.section_name,
        section_author: w.section_author,
        section_date: w.section_date,
        section_end_label: w.section_end_label,
        parent: w.parent,
        coref_mention_indices: flagged(w.coref_mention_indices, w.has_coref_mention_indices),
        entity_mention_index: w.entity_mention_index,
        is_mwt: w.is_mwt,
        is_first_mwt: w.is_first_mwt,
        mwt_text: w.mwt_text,
        numeric_value: w.numeric_value,
        numeric_type: w.numeric_type,
        numeric_composite_value: w.numeric_composite_value,
        numeric_composite_type: w.numeric_composite_type,
        conllu_misc: w.conllu_misc,
        conllu_features: w.conllu_features.map(string_map_from_wire),
        conllu_secondary_deps: w.conllu_secondary_deps.map(string_map_from_wire),
        conllu_token_span: w.conllu_token_span.map(span_from_wire).transpose()?,
        operator: w.operator.map(operator_from_wire).transpose()?,
        is_newline: w.is_newline,
        extensions: Default::default(),
    })
}
