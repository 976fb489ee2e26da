//! Wire records.
//!
//! These are the exact shapes that go on the wire. They carry no invariants of
//! their own; [`crate::codec`] converts between them and [`crate::model`] and
//! enforces everything else. Field numbers are part of the format and never
//! change meaning. Retired numbers are not reused.

use crate::codec::message::wire_messages;

wire_messages! {
    /// Half-open `[begin, end)` range.
    pub struct Span {
        begin: Option<u32> = 1,
        end: Option<u32> = 2,
    }

    /// String-keyed map as parallel key/value lists. `is_empty` is set only
    /// alongside the sentinel entry of an explicitly empty map.
    pub struct StringStringMap {
        keys: Vec<String> = 1,
        values: Vec<String> = 2,
        is_empty: Option<bool> = 3,
    }

    pub struct StringDoubleMap {
        keys: Vec<String> = 1,
        values: Vec<f64> = 2,
        is_empty: Option<bool> = 3,
    }

    pub struct IntIntMap {
        keys: Vec<u32> = 1,
        values: Vec<u32> = 2,
        is_empty: Option<bool> = 3,
    }

    pub struct Timex {
        value: Option<String> = 1,
        alt_value: Option<String> = 2,
        text: Option<String> = 3,
        timex_type: Option<String> = 4,
        tid: Option<String> = 5,
        begin_point: Option<u32> = 6,
        end_point: Option<u32> = 7,
    }

    /// One natural-logic relation code per relation, in canonical order.
    pub struct Polarity {
        projections: Vec<u32> = 1,
    }

    pub struct Operator {
        name: Option<String> = 1,
        quantifier_span: Option<Span> = 2,
        subject_span: Option<Span> = 3,
        object_span: Option<Span> = 4,
    }

    pub struct Token {
        word: Option<String> = 1,
        tag: Option<String> = 2,
        value: Option<String> = 3,
        category: Option<String> = 4,
        before: Option<String> = 5,
        after: Option<String> = 6,
        original_text: Option<String> = 7,
        ner: Option<String> = 8,
        coarse_ner: Option<String> = 9,
        fine_grained_ner: Option<String> = 10,
        ner_label_probs: Option<StringDoubleMap> = 11,
        normalized_ner: Option<String> = 12,
        lemma: Option<String> = 13,
        answer: Option<String> = 14,
        begin_char: Option<u32> = 15,
        end_char: Option<u32> = 16,
        codepoint_offset_begin: Option<u32> = 17,
        codepoint_offset_end: Option<u32> = 18,
        utterance: Option<u32> = 19,
        speaker: Option<String> = 20,
        speaker_type: Option<String> = 21,
        begin_index: Option<u32> = 22,
        end_index: Option<u32> = 23,
        token_begin_index: Option<u32> = 24,
        token_end_index: Option<u32> = 25,
        index: Option<u32> = 26,
        sentence_index: Option<u32> = 27,
        empty_index: Option<u32> = 28,
        copy_count: Option<u32> = 29,
        timex: Option<Timex> = 30,
        has_xml_context: Option<bool> = 31,
        xml_context: Vec<String> = 32,
        coref_cluster_id: Option<i32> = 33,
        wikipedia_entity: Option<String> = 34,
        polarity: Option<Polarity> = 35,
        polarity_dir: Option<String> = 36,
        sentiment: Option<String> = 37,
        gender: Option<String> = 38,
        true_case: Option<String> = 39,
        true_case_text: Option<String> = 40,
        chinese_char: Option<String> = 41,
        chinese_seg: Option<String> = 42,
        section_name: Option<String> = 43,
        section_author: Option<String> = 44,
        section_date: Option<String> = 45,
        section_end_label: Option<String> = 46,
        parent: Option<String> = 47,
        coref_mention_indices: Vec<u32> = 48,
        has_coref_mention_indices: Option<bool> = 49,
        entity_mention_index: Option<u32> = 50,
        is_mwt: Option<bool> = 51,
        is_first_mwt: Option<bool> = 52,
        mwt_text: Option<String> = 53,
        numeric_value: Option<f64> = 54,
        numeric_type: Option<String> = 55,
        numeric_composite_value: Option<f64> = 56,
        numeric_composite_type: Option<String> = 57,
        conllu_misc: Option<String> = 58,
        conllu_features: Option<StringStringMap> = 59,
        conllu_secondary_deps: Option<StringStringMap> = 60,
        conllu_token_span: Option<Span> = 61,
        operator: Option<Operator> = 62,
        is_newline: Option<bool> = 63,
    }

    /// One Open, Value or Close marker of a flattened tree. Only Value
    /// markers carry the label and sidecar fields.
    pub struct FlattenedNode {
        marker: Option<u32> = 1,
        label: Option<String> = 2,
        score: Option<f64> = 3,
        span: Option<Span> = 4,
        sentiment: Option<u32> = 5,
    }

    pub struct FlattenedTree {
        nodes: Vec<FlattenedNode> = 1,
    }

    /// Composite node key. `copy_count` and `empty_index` are written only
    /// when non-zero.
    pub struct GraphNode {
        sentence_index: Option<u32> = 1,
        index: Option<u32> = 2,
        copy_count: Option<u32> = 3,
        empty_index: Option<u32> = 4,
    }

    pub struct GraphEdge {
        source: Option<GraphNode> = 1,
        target: Option<GraphNode> = 2,
        relation: Option<String> = 3,
        language: Option<u32> = 4,
        is_extra: Option<bool> = 5,
        directed: Option<bool> = 6,
    }

    pub struct DependencyGraph {
        nodes: Vec<GraphNode> = 1,
        edges: Vec<GraphEdge> = 2,
        roots: Vec<GraphNode> = 3,
    }

    pub struct SpeakerInfo {
        speaker_name: Option<String> = 1,
        mentions: Vec<u32> = 2,
    }

    pub struct Mention {
        mention_id: Option<u32> = 1,
        sentence_index: Option<u32> = 2,
        start_index: Option<u32> = 3,
        end_index: Option<u32> = 4,
        head_index: Option<u32> = 5,
        mention_type: Option<String> = 6,
        number: Option<String> = 7,
        gender: Option<String> = 8,
        animacy: Option<String> = 9,
        person: Option<String> = 10,
        ner: Option<String> = 11,
        head_string: Option<String> = 12,
        mention_span: Option<String> = 13,
        coref_cluster_id: Option<i32> = 14,
        golden_coref_id: Option<i32> = 15,
        mention_num: Option<u32> = 16,
        paragraph: Option<u32> = 17,
        utterance: Option<u32> = 18,
        is_subject: Option<bool> = 19,
        is_direct_object: Option<bool> = 20,
        is_indirect_object: Option<bool> = 21,
        is_preposition_object: Option<bool> = 22,
        has_twin: Option<bool> = 23,
        generic: Option<bool> = 24,
        is_singleton: Option<bool> = 25,
        appositions: Vec<u32> = 26,
        predicate_nominatives: Vec<u32> = 27,
        relative_pronouns: Vec<u32> = 28,
        list_members: Vec<u32> = 29,
        belongs_to_lists: Vec<u32> = 30,
        speaker_info: Option<SpeakerInfo> = 31,
    }

    pub struct CorefMention {
        mention_id: Option<u32> = 1,
        mention_type: Option<String> = 2,
        number: Option<String> = 3,
        gender: Option<String> = 4,
        animacy: Option<String> = 5,
        begin_index: Option<u32> = 6,
        end_index: Option<u32> = 7,
        head_index: Option<u32> = 8,
        sentence_index: Option<u32> = 9,
        position: Option<u32> = 10,
    }

    pub struct CorefChain {
        chain_id: Option<u32> = 1,
        mentions: Vec<CorefMention> = 2,
        representative: Option<u32> = 3,
    }

    pub struct EntityMention {
        sentence_index: Option<u32> = 1,
        token_begin: Option<u32> = 2,
        token_end: Option<u32> = 3,
        ner: Option<String> = 4,
        normalized_ner: Option<String> = 5,
        entity_type: Option<String> = 6,
        timex: Option<Timex> = 7,
        wikipedia_entity: Option<String> = 8,
        gender: Option<String> = 9,
        entity_mention_index: Option<u32> = 10,
        canonical_entity_mention_index: Option<u32> = 11,
        entity_mention_text: Option<String> = 12,
    }

    pub struct Quote {
        text: Option<String> = 1,
        begin: Option<u32> = 2,
        end: Option<u32> = 3,
        sentence_begin: Option<u32> = 4,
        sentence_end: Option<u32> = 5,
        token_begin: Option<u32> = 6,
        token_end: Option<u32> = 7,
        doc_id: Option<String> = 8,
        index: Option<u32> = 9,
        author: Option<String> = 10,
        mention: Option<String> = 11,
        mention_begin: Option<u32> = 12,
        mention_end: Option<u32> = 13,
        mention_type: Option<String> = 14,
        mention_sieve: Option<String> = 15,
        speaker: Option<String> = 16,
        speaker_sieve: Option<String> = 17,
        canonical_mention: Option<String> = 18,
        canonical_mention_begin: Option<u32> = 19,
        canonical_mention_end: Option<u32> = 20,
    }

    pub struct TokenLocation {
        sentence_index: Option<u32> = 1,
        token_index: Option<u32> = 2,
    }

    pub struct RelationTriple {
        subject: Option<String> = 1,
        relation: Option<String> = 2,
        object: Option<String> = 3,
        confidence: Option<f64> = 4,
        subject_tokens: Vec<TokenLocation> = 5,
        relation_tokens: Vec<TokenLocation> = 6,
        object_tokens: Vec<TokenLocation> = 7,
        istmod: Option<bool> = 8,
        prefix_be: Option<bool> = 9,
        suffix_be: Option<bool> = 10,
        suffix_of: Option<bool> = 11,
    }

    pub struct Section {
        char_begin: Option<u32> = 1,
        char_end: Option<u32> = 2,
        author: Option<String> = 3,
        sentence_indexes: Vec<u32> = 4,
        datetime: Option<String> = 5,
        quotes: Vec<Quote> = 6,
        author_char_begin: Option<u32> = 7,
        author_char_end: Option<u32> = 8,
        xml_tag: Option<String> = 9,
    }

    pub struct EntailedFragment {
        tree: Option<FlattenedTree> = 1,
        span: Option<Span> = 2,
        score: Option<f64> = 3,
        assumed_truth: Option<bool> = 4,
    }

    pub struct Sentence {
        tokens: Vec<Token> = 1,
        token_offset_begin: Option<u32> = 2,
        token_offset_end: Option<u32> = 3,
        text: Option<String> = 4,
        sentence_index: Option<u32> = 5,
        line_number: Option<u32> = 6,
        paragraph_index: Option<u32> = 7,
        character_offset_begin: Option<u32> = 8,
        character_offset_end: Option<u32> = 9,
        sentence_id: Option<String> = 10,
        doc_id: Option<String> = 11,
        speaker: Option<String> = 12,
        speaker_type: Option<String> = 13,
        is_quoted: Option<bool> = 14,
        section_name: Option<String> = 15,
        section_author: Option<String> = 16,
        section_date: Option<String> = 17,
        section_index: Option<u32> = 18,
        chapter_index: Option<u32> = 19,
        sentiment: Option<String> = 20,
        parse_tree: Option<FlattenedTree> = 21,
        binarized_parse_tree: Option<FlattenedTree> = 22,
        annotated_parse_tree: Option<FlattenedTree> = 23,
        basic_dependencies: Option<DependencyGraph> = 24,
        enhanced_dependencies: Option<DependencyGraph> = 25,
        enhanced_plus_plus_dependencies: Option<DependencyGraph> = 26,
        alternative_dependencies: Option<DependencyGraph> = 27,
        entity_mentions: Vec<EntityMention> = 28,
        has_entity_mentions: Option<bool> = 29,
        mentions_for_coref: Vec<Mention> = 30,
        has_mentions_for_coref: Option<bool> = 31,
        openie_triples: Vec<RelationTriple> = 32,
        has_openie_triples: Option<bool> = 33,
        kbp_triples: Vec<RelationTriple> = 34,
        has_kbp_triples: Option<bool> = 35,
        entailed_sentences: Vec<EntailedFragment> = 36,
        has_entailed_sentences: Option<bool> = 37,
        entailed_clauses: Vec<EntailedFragment> = 38,
        has_entailed_clauses: Option<bool> = 39,
    }

    pub struct Document {
        text: Option<String> = 1,
        doc_id: Option<String> = 2,
        doc_date: Option<String> = 3,
        calendar: Option<i64> = 4,
        sentences: Vec<Sentence> = 5,
        sentenceless_tokens: Vec<Token> = 6,
        coref_chains: Vec<CorefChain> = 7,
        has_coref_chains: Option<bool> = 8,
        quotes: Vec<Quote> = 9,
        has_quotes: Option<bool> = 10,
        entity_mentions: Vec<EntityMention> = 11,
        has_entity_mentions: Option<bool> = 12,
        sections: Vec<Section> = 13,
        has_sections: Option<bool> = 14,
        xml_doc: Option<bool> = 15,
        coref_mention_to_entity_mention: Option<IntIntMap> = 16,
        entity_mention_to_coref_mention: Option<IntIntMap> = 17,
    }
}
