//! Structural entities: spans, timexes, mentions, coref chains, entity
//! mentions, quotes, relation triples, sections and entailed fragments.

use crate::cancel::CancelToken;
use crate::codec::tree::{flatten, unflatten};
use crate::error::DecodeError;
use crate::model::{
    CorefChain, CorefMention, EntailedFragment, EntityMention, Mention, Quote, RelationTriple,
    Section, Span, SpeakerInfo, Timex, TokenLocation,
};
use crate::wire;

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, DecodeError> {
    value.ok_or(DecodeError::MissingField { field })
}

/// `Some(true)` for set flags, `None` otherwise.
fn flag(value: bool) -> Option<bool> {
    value.then_some(true)
}

pub fn span_to_wire(span: Span) -> wire::Span {
    wire::Span {
        begin: Some(span.begin),
        end: Some(span.end),
    }
}

pub fn span_from_wire(span: wire::Span) -> Result<Span, DecodeError> {
    Ok(Span {
        begin: required(span.begin, "Span.begin")?,
        end: required(span.end, "Span.end")?,
    })
}

pub fn timex_to_wire(timex: &Timex) -> wire::Timex {
    wire::Timex {
        value: timex.value.clone(),
        alt_value: timex.alt_value.clone(),
        text: timex.text.clone(),
        timex_type: timex.timex_type.clone(),
        tid: timex.tid.clone(),
        begin_point: timex.begin_point,
        end_point: timex.end_point,
    }
}

pub fn timex_from_wire(timex: wire::Timex) -> Timex {
    Timex {
        value: timex.value,
        alt_value: timex.alt_value,
        text: timex.text,
        timex_type: timex.timex_type,
        tid: timex.tid,
        begin_point: timex.begin_point,
        end_point: timex.end_point,
    }
}

pub fn mention_to_wire(m: &Mention) -> wire::Mention {
    wire::Mention {
        mention_id: Some(m.mention_id),
        sentence_index: m.sentence_index,
        start_index: Some(m.start_index),
        end_index: Some(m.end_index),
        head_index: m.head_index,
        mention_type: m.mention_type.clone(),
        number: m.number.clone(),
        gender: m.gender.clone(),
        animacy: m.animacy.clone(),
        person: m.person.clone(),
        ner: m.ner.clone(),
        head_string: m.head_string.clone(),
        mention_span: m.mention_span.clone(),
        coref_cluster_id: m.coref_cluster_id,
        golden_coref_id: m.golden_coref_id,
        mention_num: m.mention_num,
        paragraph: m.paragraph,
        utterance: m.utterance,
        is_subject: flag(m.is_subject),
        is_direct_object: flag(m.is_direct_object),
        is_indirect_object: flag(m.is_indirect_object),
        is_preposition_object: flag(m.is_preposition_object),
        has_twin: flag(m.has_twin),
        generic: flag(m.generic),
        is_singleton: flag(m.is_singleton),
        appositions: m.appositions.clone(),
        predicate_nominatives: m.predicate_nominatives.clone(),
        relative_pronouns: m.relative_pronouns.clone(),
        list_members: m.list_members.clone(),
        belongs_to_lists: m.belongs_to_lists.clone(),
        speaker_info: m.speaker_info.as_ref().map(|s| wire::SpeakerInfo {
            speaker_name: s.speaker_name.clone(),
            mentions: s.mentions.clone(),
        }),
    }
}

pub fn mention_from_wire(m: wire::Mention) -> Result<Mention, DecodeError> {
    Ok(Mention {
        mention_id: required(m.mention_id, "Mention.mention_id")?,
        sentence_index: m.sentence_index,
        start_index: required(m.start_index, "Mention.start_index")?,
        end_index: required(m.end_index, "Mention.end_index")?,
        head_index: m.head_index,
        mention_type: m.mention_type,
        number: m.number,
        gender: m.gender,
        animacy: m.animacy,
        person: m.person,
        ner: m.ner,
        head_string: m.head_string,
        mention_span: m.mention_span,
        coref_cluster_id: m.coref_cluster_id,
        golden_coref_id: m.golden_coref_id,
        mention_num: m.mention_num,
        paragraph: m.paragraph,
        utterance: m.utterance,
        is_subject: m.is_subject.unwrap_or(false),
        is_direct_object: m.is_direct_object.unwrap_or(false),
        is_indirect_object: m.is_indirect_object.unwrap_or(false),
        is_preposition_object: m.is_preposition_object.unwrap_or(false),
        has_twin: m.has_twin.unwrap_or(false),
        generic: m.generic.unwrap_or(false),
        is_singleton: m.is_singleton.unwrap_or(false),
        appositions: m.appositions,
        predicate_nominatives: m.predicate_nominatives,
        relative_pronouns: m.relative_pronouns,
        list_members: m.list_members,
        belongs_to_lists: m.belongs_to_lists,
        speaker_info: m.speaker_info.map(|s| SpeakerInfo {
            speaker_name: s.speaker_name,
            mentions: s.mentions,
        }),
    })
}

fn coref_mention_to_wire(m: &CorefMention) -> wire::CorefMention {
    wire::CorefMention {
        mention_id: Some(m.mention_id),
        mention_type: m.mention_type.clone(),
        number: m.number.clone(),
        gender: m.gender.clone(),
        animacy: m.animacy.clone(),
        begin_index: Some(m.begin_index),
        end_index: Some(m.end_index),
        head_index: m.head_index,
        sentence_index: Some(m.sentence_index),
        position: m.position,
    }
}

fn coref_mention_from_wire(m: wire::CorefMention) -> Result<CorefMention, DecodeError> {
    Ok(CorefMention {
        mention_id: required(m.mention_id, "CorefMention.mention_id")?,
        mention_type: m.mention_type,
        number: m.number,
        gender: m.gender,
        animacy: m.animacy,
        begin_index: required(m.begin_index, "CorefMention.begin_index")?,
        end_index: required(m.end_index, "CorefMention.end_index")?,
        head_index: m.head_index,
        sentence_index: required(m.sentence_index, "CorefMention.sentence_index")?,
        position: m.position,
    })
}

pub fn chain_to_wire(chain: &CorefChain) -> wire::CorefChain {
    wire::CorefChain {
        chain_id: Some(chain.chain_id),
        mentions: chain.mentions.iter().map(coref_mention_to_wire).collect(),
        representative: chain.representative,
    }
}

pub fn chain_from_wire(chain: wire::CorefChain) -> Result<CorefChain, DecodeError> {
    Ok(CorefChain {
        chain_id: required(chain.chain_id, "CorefChain.chain_id")?,
        mentions: chain
            .mentions
            .into_iter()
            .map(coref_mention_from_wire)
            .collect::<Result<_, _>>()?,
        representative: chain.representative,
    })
}

pub fn entity_mention_to_wire(m: &EntityMention) -> wire::EntityMention {
    wire::EntityMention {
        sentence_index: m.sentence_index,
        token_begin: Some(m.token_begin),
        token_end: Some(m.token_end),
        ner: m.ner.clone(),
        normalized_ner: m.normalized_ner.clone(),
        entity_type: m.entity_type.clone(),
        timex: m.timex.as_ref().map(timex_to_wire),
        wikipedia_entity: m.wikipedia_entity.clone(),
        gender: m.gender.clone(),
        entity_mention_index: m.entity_mention_index,
        canonical_entity_mention_index: m.canonical_entity_mention_index,
        entity_mention_text: m.entity_mention_text.clone(),
    }
}

pub fn entity_mention_from_wire(m: wire::EntityMention) -> Result<EntityMention, DecodeError> {
    Ok(EntityMention {
        sentence_index: m.sentence_index,
        token_begin: required(m.token_begin, "EntityMention.token_begin")?,
        token_end: required(m.token_end, "EntityMention.token_end")?,
        ner: m.ner,
        normalized_ner: m.normalized_ner,
        entity_type: m.entity_type,
        timex: m.timex.map(timex_from_wire),
        wikipedia_entity: m.wikipedia_entity,
        gender: m.gender,
        entity_mention_index: m.entity_mention_index,
        canonical_entity_mention_index: m.canonical_entity_mention_index,
        entity_mention_text: m.entity_mention_text,
    })
}

pub fn quote_to_wire(q: &Quote) -> wire::Quote {
    wire::Quote {
        text: q.text.clone(),
        begin: q.begin,
        end: q.end,
        sentence_begin: q.sentence_begin,
        sentence_end: q.sentence_end,
        token_begin: q.token_begin,
        token_end: q.token_end,
        doc_id: q.doc_id.clone(),
        index: q.index,
        author: q.author.clone(),
        mention: q.mention.clone(),
        mention_begin: q.mention_begin,
        mention_end: q.mention_end,
        mention_type: q.mention_type.clone(),
        mention_sieve: q.mention_sieve.clone(),
        speaker: q.speaker.clone(),
        speaker_sieve: q.speaker_sieve.clone(),
        canonical_mention: q.canonical_mention.clone(),
        canonical_mention_begin: q.canonical_mention_begin,
        canonical_mention_end: q.canonical_mention_end,
    }
}

pub fn quote_from_wire(q: wire::Quote) -> Quote {
    Quote {
        text: q.text,
        begin: q.begin,
        end: q.end,
        sentence_begin: q.sentence_begin,
        sentence_end: q.sentence_end,
        token_begin: q.token_begin,
        token_end: q.token_end,
        doc_id: q.doc_id,
        index: q.index,
        author: q.author,
        mention: q.mention,
        mention_begin: q.mention_begin,
        mention_end: q.mention_end,
        mention_type: q.mention_type,
        mention_sieve: q.mention_sieve,
        speaker: q.speaker,
        speaker_sieve: q.speaker_sieve,
        canonical_mention: q.canonical_mention,
        canonical_mention_begin: q.canonical_mention_begin,
        canonical_mention_end: q.canonical_mention_end,
    }
}

fn locations_to_wire(locations: &[TokenLocation]) -> Vec<wire::TokenLocation> {
    locations
        .iter()
        .map(|l| wire::TokenLocation {
            sentence_index: Some(l.sentence_index),
            token_index: Some(l.token_index),
        })
        .collect()
}

fn locations_from_wire(locations: Vec<wire::TokenLocation>) -> Result<Vec<TokenLocation>, DecodeError> {
    locations
        .into_iter()
        .map(|l| {
            Ok(TokenLocation {
                sentence_index: required(l.sentence_index, "TokenLocation.sentence_index")?,
                token_index: required(l.token_index, "TokenLocation.token_index")?,
            })
        })
        .collect()
}

pub fn triple_to_wire(t: &RelationTriple) -> wire::RelationTriple {
    wire::RelationTriple {
        subject: Some(t.subject.clone()),
        relation: Some(t.relation.clone()),
        object: Some(t.object.clone()),
        confidence: t.confidence,
        subject_tokens: locations_to_wire(&t.subject_tokens),
        relation_tokens: locations_to_wire(&t.relation_tokens),
        object_tokens: locations_to_wire(&t.object_tokens),
        istmod: t.istmod,
        prefix_be: t.prefix_be,
        suffix_be: t.suffix_be,
        suffix_of: t.suffix_of,
    }
}

pub fn triple_from_wire(t: wire::RelationTriple) -> Result<RelationTriple, DecodeError> {
    Ok(RelationTriple {
        subject: t.subject.unwrap_or_default(),
        relation: t.relation.unwrap_or_default(),
        object: t.object.unwrap_or_default(),
        confidence: t.confidence,
        subject_tokens: locations_from_wire(t.subject_tokens)?,
        relation_tokens: locations_from_wire(t.relation_tokens)?,
        object_tokens: locations_from_wire(t.object_tokens)?,
        istmod: t.istmod,
        prefix_be: t.prefix_be,
        suffix_be: t.suffix_be,
        suffix_of: t.suffix_of,
    })
}

pub fn section_to_wire(s: &Section) -> wire::Section {
    wire::Section {
        char_begin: Some(s.char_begin),
        char_end: Some(s.char_end),
        author: s.author.clone(),
        sentence_indexes: s.sentence_indexes.clone(),
        datetime: s.datetime.clone(),
        quotes: s.quotes.iter().map(quote_to_wire).collect(),
        author_char_begin: s.author_char_begin,
        author_char_end: s.author_char_end,
        xml_tag: s.xml_tag.clone(),
    }
}

pub fn section_from_wire(s: wire::Section) -> Result<Section, DecodeError> {
    Ok(Section {
        char_begin: required(s.char_begin, "Section.char_begin")?,
        char_end: required(s.char_end, "Section.char_end")?,
        author: s.author,
        sentence_indexes: s.sentence_indexes,
        datetime: s.datetime,
        quotes: s.quotes.into_iter().map(quote_from_wire).collect(),
        author_char_begin: s.author_char_begin,
        author_char_end: s.author_char_end,
        xml_tag: s.xml_tag,
    })
}

pub fn fragment_to_wire(f: &EntailedFragment) -> wire::EntailedFragment {
    wire::EntailedFragment {
        tree: Some(flatten(&f.tree)),
        span: Some(span_to_wire(f.span)),
        score: f.score,
        assumed_truth: f.assumed_truth,
    }
}

pub fn fragment_from_wire(
    f: wire::EntailedFragment,
    cancel: &CancelToken,
) -> Result<EntailedFragment, DecodeError> {
    Ok(EntailedFragment {
        tree: unflatten(required(f.tree, "EntailedFragment.tree")?, cancel)?,
        span: span_from_wire(required(f.span, "EntailedFragment.span")?)?,
        score: f.score,
        assumed_truth: f.assumed_truth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::message::Message;
    use crate::model::Tree;

    #[test]
    fn test_mention_roundtrip_keeps_relations() {
        let mut mention = Mention::new(7, 0, 2);
        mention.head_index = Some(1);
        mention.gender = Some("NEUTRAL".into());
        mention.is_subject = true;
        mention.appositions = vec![8];
        mention.speaker_info = Some(SpeakerInfo {
            speaker_name: None,
            mentions: vec![3, 4],
        });

        let bytes = mention_to_wire(&mention).encode_to_vec();
        let back = mention_from_wire(wire::Mention::decode(&bytes).unwrap()).unwrap();
        assert_eq!(back, mention);
    }

    #[test]
    fn test_false_flags_are_not_written() {
        let wire = mention_to_wire(&Mention::new(1, 0, 1));
        assert_eq!(wire.is_subject, None);
        assert_eq!(wire.generic, None);
    }

    #[test]
    fn test_missing_mention_id_rejected() {
        let wire = wire::Mention {
            start_index: Some(0),
            end_index: Some(1),
            ..Default::default()
        };
        assert_eq!(
            mention_from_wire(wire),
            Err(DecodeError::MissingField { field: "Mention.mention_id" })
        );
    }

    #[test]
    fn test_section_with_quotes_roundtrip() {
        let section = Section {
            char_begin: 0,
            char_end: 40,
            author: Some("Ada".into()),
            sentence_indexes: vec![0, 1],
            quotes: vec![Quote {
                text: Some("\"Hi\"".into()),
                sentence_begin: Some(1),
                sentence_end: Some(1),
                ..Default::default()
            }],
            ..Default::default()
        };
        let bytes = section_to_wire(&section).encode_to_vec();
        let back = section_from_wire(wire::Section::decode(&bytes).unwrap()).unwrap();
        assert_eq!(back, section);
    }

    #[test]
    fn test_triple_and_fragment_roundtrip() {
        let triple = RelationTriple {
            subject: "Apple".into(),
            relation: "is".into(),
            object: "company".into(),
            confidence: Some(1.0),
            subject_tokens: vec![TokenLocation::new(0, 0)],
            relation_tokens: vec![TokenLocation::new(0, 1)],
            object_tokens: vec![TokenLocation::new(0, 3)],
            ..Default::default()
        };
        let back = triple_from_wire(triple_to_wire(&triple)).unwrap();
        assert_eq!(back, triple);

        let fragment = EntailedFragment {
            tree: Tree::node("S", vec![Tree::leaf("Apple"), Tree::leaf("is")]),
            span: Span::new(0, 2),
            score: Some(0.9),
            assumed_truth: Some(true),
        };
        let back = fragment_from_wire(fragment_to_wire(&fragment), &CancelToken::new()).unwrap();
        assert_eq!(back, fragment);
    }
}
