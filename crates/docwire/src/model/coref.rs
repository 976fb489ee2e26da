/// Who said a mention, by reference to other mentions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeakerInfo {
    pub speaker_name: Option<String>,
    /// Ids of the mentions that name the speaker.
    pub mentions: Vec<u32>,
}

/// A candidate mention produced for coreference, stored on its sentence.
///
/// `start_index..end_index` is a 0-based, end-exclusive token range within
/// the sentence. Relations to other mentions are by `mention_id`, which is
/// unique across the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mention {
    pub mention_id: u32,
    pub sentence_index: Option<u32>,
    pub start_index: u32,
    pub end_index: u32,
    pub head_index: Option<u32>,
    pub mention_type: Option<String>,
    pub number: Option<String>,
    pub gender: Option<String>,
    pub animacy: Option<String>,
    pub person: Option<String>,
    pub ner: Option<String>,
    pub head_string: Option<String>,
    pub mention_span: Option<String>,
    pub coref_cluster_id: Option<i32>,
    pub golden_coref_id: Option<i32>,
    pub mention_num: Option<u32>,
    pub paragraph: Option<u32>,
    pub utterance: Option<u32>,
    pub is_subject: bool,
    pub is_direct_object: bool,
    pub is_indirect_object: bool,
    pub is_preposition_object: bool,
    pub has_twin: bool,
    pub generic: bool,
    pub is_singleton: bool,
    pub appositions: Vec<u32>,
    pub predicate_nominatives: Vec<u32>,
    pub relative_pronouns: Vec<u32>,
    pub list_members: Vec<u32>,
    pub belongs_to_lists: Vec<u32>,
    pub speaker_info: Option<SpeakerInfo>,
}

impl Mention {
    pub fn new(mention_id: u32, start_index: u32, end_index: u32) -> Self {
        Self {
            mention_id,
            start_index,
            end_index,
            ..Default::default()
        }
    }

    /// Every mention id this mention points at.
    pub fn related_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.appositions
            .iter()
            .chain(&self.predicate_nominatives)
            .chain(&self.relative_pronouns)
            .chain(&self.list_members)
            .chain(&self.belongs_to_lists)
            .chain(self.speaker_info.iter().flat_map(|s| s.mentions.iter()))
            .copied()
    }
}

/// A mention as it appears inside a coreference chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorefMention {
    pub mention_id: u32,
    pub mention_type: Option<String>,
    pub number: Option<String>,
    pub gender: Option<String>,
    pub animacy: Option<String>,
    pub begin_index: u32,
    pub end_index: u32,
    pub head_index: Option<u32>,
    pub sentence_index: u32,
    pub position: Option<u32>,
}

/// Mentions that refer to the same entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorefChain {
    pub chain_id: u32,
    pub mentions: Vec<CorefMention>,
    /// Index into `mentions` of the most representative mention.
    pub representative: Option<u32>,
}

impl CorefChain {
    pub fn representative_mention(&self) -> Option<&CorefMention> {
        self.representative
            .and_then(|i| self.mentions.get(i as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_ids_cover_speaker_info() {
        let mut mention = Mention::new(4, 0, 2);
        mention.appositions = vec![5];
        mention.list_members = vec![6, 7];
        mention.speaker_info = Some(SpeakerInfo {
            speaker_name: Some("Tim".into()),
            mentions: vec![1],
        });
        assert_eq!(mention.related_ids().collect::<Vec<_>>(), vec![5, 6, 7, 1]);
    }

    #[test]
    fn test_representative_lookup() {
        let chain = CorefChain {
            chain_id: 1,
            mentions: vec![CorefMention::default(), CorefMention { mention_id: 9, ..Default::default() }],
            representative: Some(1),
        };
        assert_eq!(chain.representative_mention().map(|m| m.mention_id), Some(9));
    }
}
