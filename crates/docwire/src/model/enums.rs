//! Closed vocabularies used by annotations.

/// Language tag carried by dependency edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Any,
    Arabic,
    Chinese,
    UniversalChinese,
    English,
    UniversalEnglish,
    French,
    German,
    Hungarian,
    Italian,
    Spanish,
    Unknown,
}

impl Language {
    pub const ALL: [Language; 12] = [
        Language::Any,
        Language::Arabic,
        Language::Chinese,
        Language::UniversalChinese,
        Language::English,
        Language::UniversalEnglish,
        Language::French,
        Language::German,
        Language::Hungarian,
        Language::Italian,
        Language::Spanish,
        Language::Unknown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Language::Any => "Any",
            Language::Arabic => "Arabic",
            Language::Chinese => "Chinese",
            Language::UniversalChinese => "UniversalChinese",
            Language::English => "English",
            Language::UniversalEnglish => "UniversalEnglish",
            Language::French => "French",
            Language::German => "German",
            Language::Hungarian => "Hungarian",
            Language::Italian => "Italian",
            Language::Spanish => "Spanish",
            Language::Unknown => "Unknown",
        }
    }
}

/// Five-way sentiment class predicted for a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SentimentClass {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentClass {
    pub const ALL: [SentimentClass; 5] = [
        SentimentClass::VeryNegative,
        SentimentClass::Negative,
        SentimentClass::Neutral,
        SentimentClass::Positive,
        SentimentClass::VeryPositive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SentimentClass::VeryNegative => "Very negative",
            SentimentClass::Negative => "Negative",
            SentimentClass::Neutral => "Neutral",
            SentimentClass::Positive => "Positive",
            SentimentClass::VeryPositive => "Very positive",
        }
    }
}

/// The seven basic relations of natural logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NaturalLogicRelation {
    Equivalence,
    ForwardEntailment,
    ReverseEntailment,
    Negation,
    Alternation,
    Cover,
    Independence,
}

impl NaturalLogicRelation {
    /// Canonical order; a [`Polarity`](crate::model::Polarity) stores one
    /// projection per entry, in this order.
    pub const ALL: [NaturalLogicRelation; 7] = [
        NaturalLogicRelation::Equivalence,
        NaturalLogicRelation::ForwardEntailment,
        NaturalLogicRelation::ReverseEntailment,
        NaturalLogicRelation::Negation,
        NaturalLogicRelation::Alternation,
        NaturalLogicRelation::Cover,
        NaturalLogicRelation::Independence,
    ];
}

/// Quantifiers and other natural-logic operators, identified by surface name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    All,
    Every,
    Any,
    Each,
    AllOf,
    EachOf,
    ForAll,
    ForEvery,
    ForEach,
    Everyone,
    Few,
    No,
    Neither,
    NoOne,
    Nobody,
    Not,
    Never,
    Some,
    Several,
    Either,
    A,
    The,
    SomeOf,
    OneOf,
    AFew,
    NotAll,
    NotEvery,
    Most,
    Many,
    Enough,
    Both,
    AtLeastNum,
    AtMostNum,
    MoreThanNum,
    LessThanNum,
}

impl Quantifier {
    pub const ALL: [Quantifier; 35] = [
        Quantifier::All,
        Quantifier::Every,
        Quantifier::Any,
        Quantifier::Each,
        Quantifier::AllOf,
        Quantifier::EachOf,
        Quantifier::ForAll,
        Quantifier::ForEvery,
        Quantifier::ForEach,
        Quantifier::Everyone,
        Quantifier::Few,
        Quantifier::No,
        Quantifier::Neither,
        Quantifier::NoOne,
        Quantifier::Nobody,
        Quantifier::Not,
        Quantifier::Never,
        Quantifier::Some,
        Quantifier::Several,
        Quantifier::Either,
        Quantifier::A,
        Quantifier::The,
        Quantifier::SomeOf,
        Quantifier::OneOf,
        Quantifier::AFew,
        Quantifier::NotAll,
        Quantifier::NotEvery,
        Quantifier::Most,
        Quantifier::Many,
        Quantifier::Enough,
        Quantifier::Both,
        Quantifier::AtLeastNum,
        Quantifier::AtMostNum,
        Quantifier::MoreThanNum,
        Quantifier::LessThanNum,
    ];

    /// Surface form used as the operator's wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Quantifier::All => "all",
            Quantifier::Every => "every",
            Quantifier::Any => "any",
            Quantifier::Each => "each",
            Quantifier::AllOf => "all of",
            Quantifier::EachOf => "each of",
            Quantifier::ForAll => "for all",
            Quantifier::ForEvery => "for every",
            Quantifier::ForEach => "for each",
            Quantifier::Everyone => "everyone",
            Quantifier::Few => "few",
            Quantifier::No => "no",
            Quantifier::Neither => "neither",
            Quantifier::NoOne => "no one",
            Quantifier::Nobody => "nobody",
            Quantifier::Not => "not",
            Quantifier::Never => "never",
            Quantifier::Some => "some",
            Quantifier::Several => "several",
            Quantifier::Either => "either",
            Quantifier::A => "a",
            Quantifier::The => "the",
            Quantifier::SomeOf => "some of",
            Quantifier::OneOf => "one of",
            Quantifier::AFew => "a few",
            Quantifier::NotAll => "not all",
            Quantifier::NotEvery => "not every",
            Quantifier::Most => "most",
            Quantifier::Many => "many",
            Quantifier::Enough => "enough",
            Quantifier::Both => "both",
            Quantifier::AtLeastNum => "at least --num--",
            Quantifier::AtMostNum => "at most --num--",
            Quantifier::MoreThanNum => "more than --num--",
            Quantifier::LessThanNum => "less than --num--",
        }
    }
}
