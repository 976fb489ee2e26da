//! In-memory document model.
//!
//! Every optional annotation is an `Option`. Cross-references are ids or
//! indices, never pointers: mentions by `mention_id`, tokens by
//! (sentence index, token index), graph vertices by [`NodeKey`].

mod annotation;
mod coref;
mod document;
mod entity;
mod enums;
mod graph;
mod sentence;
mod token;
mod tree;

pub use annotation::{Annotated, AnnotationValue, Extensions, Span};
pub use coref::{CorefChain, CorefMention, Mention, SpeakerInfo};
pub use document::Document;
pub use entity::{EntailedFragment, EntityMention, Quote, RelationTriple, Section, TokenLocation};
pub use enums::{Language, NaturalLogicRelation, Quantifier, SentimentClass};
pub use graph::{DependencyGraph, Edge, NodeKey};
pub use sentence::Sentence;
pub use token::{OperatorSpec, Polarity, Timex, Token};
pub use tree::Tree;
