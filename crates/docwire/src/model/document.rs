use std::collections::BTreeMap;

use super::annotation::{Extensions, annotation_keys};
use super::coref::CorefChain;
use super::entity::{EntityMention, Quote, Section};
use super::sentence::Sentence;
use super::token::Token;

/// A fully annotated document.
///
/// `tokens` is the flat token stream. Sentences refer to it by offset range;
/// tokens outside every range are "sentenceless" and are kept in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub text: Option<String>,
    pub doc_id: Option<String>,
    pub doc_date: Option<String>,
    pub calendar: Option<i64>,
    pub tokens: Vec<Token>,
    pub sentences: Vec<Sentence>,
    pub coref_chains: Option<Vec<CorefChain>>,
    pub quotes: Option<Vec<Quote>>,
    pub entity_mentions: Option<Vec<EntityMention>>,
    pub sections: Option<Vec<Section>>,
    pub xml_doc: Option<bool>,
    /// Coref mention id to index in `entity_mentions`.
    pub coref_mention_to_entity_mention: Option<BTreeMap<u32, u32>>,
    /// Index in `entity_mentions` to coref mention id.
    pub entity_mention_to_coref_mention: Option<BTreeMap<u32, u32>>,
    pub extensions: Extensions,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Appends `tokens` to the token stream as a new sentence and returns
    /// that sentence for further annotation.
    pub fn push_sentence(&mut self, tokens: Vec<Token>) -> &mut Sentence {
        let begin = self.tokens.len() as u32;
        let index = self.sentences.len() as u32;
        self.tokens.extend(tokens);
        let mut sentence = Sentence::covering(begin, self.tokens.len() as u32);
        sentence.sentence_index = Some(index);
        self.sentences.push(sentence);
        let last = self.sentences.len() - 1;
        &mut self.sentences[last]
    }

    /// The tokens of `sentence`, or `None` if its range is out of bounds.
    pub fn sentence_tokens(&self, sentence: &Sentence) -> Option<&[Token]> {
        let begin = sentence.token_offset_begin as usize;
        let end = sentence.token_offset_end as usize;
        if begin > end {
            return None;
        }
        self.tokens.get(begin..end)
    }

    /// Token `token_index` (0-based) of sentence `sentence_index`.
    pub fn token_at(&self, sentence_index: usize, token_index: usize) -> Option<&Token> {
        let sentence = self.sentences.get(sentence_index)?;
        self.sentence_tokens(sentence)?.get(token_index)
    }

    /// Positions in `tokens` that no sentence covers, in order.
    pub fn sentenceless_positions(&self) -> Vec<usize> {
        let mut covered = vec![false; self.tokens.len()];
        for sentence in &self.sentences {
            let begin = (sentence.token_offset_begin as usize).min(covered.len());
            let end = (sentence.token_offset_end as usize).min(covered.len());
            if begin < end {
                covered[begin..end].iter_mut().for_each(|c| *c = true);
            }
        }
        covered
            .iter()
            .enumerate()
            .filter_map(|(i, c)| (!c).then_some(i))
            .collect()
    }

    pub fn sentenceless_tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentenceless_positions()
            .into_iter()
            .filter_map(move |i| self.tokens.get(i))
    }
}

annotation_keys!(Document, "document" {
    text => "text",
    doc_id => "doc_id",
    doc_date => "doc_date",
    calendar => "calendar",
    coref_chains => "coref_chains",
    quotes => "quotes",
    entity_mentions => "entity_mentions",
    sections => "sections",
    xml_doc => "xml_doc",
    coref_mention_to_entity_mention => "coref_mention_to_entity_mention",
    entity_mention_to_coref_mention => "entity_mention_to_coref_mention",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_sentence_assigns_ranges() {
        let mut doc = Document::new("Hi. Bye.");
        doc.push_sentence(vec![Token::new("Hi"), Token::new(".")]);
        doc.push_sentence(vec![Token::new("Bye"), Token::new(".")]);

        assert_eq!(doc.sentences[1].token_offset_begin, 2);
        assert_eq!(doc.sentences[1].token_offset_end, 4);
        assert_eq!(doc.sentences[1].sentence_index, Some(1));
        assert_eq!(doc.token_at(1, 0).and_then(|t| t.word.as_deref()), Some("Bye"));
        assert!(doc.token_at(2, 0).is_none());
    }

    #[test]
    fn test_sentenceless_positions() {
        let mut doc = Document::default();
        doc.tokens = vec![Token::new("<p>"), Token::new("Hi"), Token::new("</p>")];
        doc.sentences.push(Sentence::covering(1, 2));

        assert_eq!(doc.sentenceless_positions(), vec![0, 2]);
        let words: Vec<_> = doc.sentenceless_tokens().filter_map(|t| t.word.as_deref()).collect();
        assert_eq!(words, vec!["<p>", "</p>"]);
    }
}
