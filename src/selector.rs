use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::Result;
use crate::tokenizer::Word;
use crate::vocabulary::Vocabulary;

/// How a word was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The word belongs to a group; `word` is the member that was drawn
    Matched { word: Word, group_size: usize },
    /// No group contains the word; it passes through unchanged
    Unmatched(Word),
}

impl Resolution {
    pub fn into_word(self) -> Word {
        match self {
            Resolution::Matched { word, .. } => word,
            Resolution::Unmatched(word) => word,
        }
    }
}

/// Resolves words to random synonyms drawn from a vocabulary
pub struct SynonymSelector<V, G> {
    vocabulary: V,
    rng: G,
}

impl<V: Vocabulary, G: Rng> SynonymSelector<V, G> {
    pub fn new(vocabulary: V, rng: G) -> Self {
        Self { vocabulary, rng }
    }

    /// One uniform draw from the word's group, or the word itself when it has none
    pub fn resolve(&mut self, word: &Word) -> Result<Resolution> {
        match self.vocabulary.find_group(word)? {
            Some(group) => {
                let chosen = group.choose(&mut self.rng).clone();
                debug!(original = %word, replacement = %chosen, candidates = group.len(), "Resolved synonym");
                Ok(Resolution::Matched {
                    word: chosen,
                    group_size: group.len(),
                })
            }
            None => Ok(Resolution::Unmatched(word.clone())),
        }
    }
}

/// Process-wide random source: fixed seed when given, OS entropy otherwise
pub fn process_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::IndexedVocabulary;
    use std::collections::HashSet;
    use std::io::Cursor;

    fn word(s: &str) -> Word {
        Word::new(s.as_bytes()).unwrap()
    }

    fn selector(table: &str, seed: u64) -> SynonymSelector<IndexedVocabulary, StdRng> {
        let vocabulary = IndexedVocabulary::from_reader(Cursor::new(table.to_string())).unwrap();
        SynonymSelector::new(vocabulary, process_rng(Some(seed)))
    }

    #[test]
    fn test_unmatched_passthrough() {
        let mut s = selector("cat,feline\n", 1);
        let resolution = s.resolve(&word("bird")).unwrap();
        assert_eq!(resolution, Resolution::Unmatched(word("bird")));
    }

    #[test]
    fn test_replacement_is_group_member_including_original() {
        let mut s = selector("cat,feline,kitty\n", 42);
        let group: HashSet<Word> = ["cat", "feline", "kitty"].iter().map(|w| word(w)).collect();

        let mut seen = HashSet::new();
        for _ in 0..300 {
            let resolution = s.resolve(&word("cat")).unwrap();
            assert!(matches!(resolution, Resolution::Matched { group_size: 3, .. }));
            let chosen = resolution.into_word();
            assert!(group.contains(&chosen));
            seen.insert(chosen);
        }
        assert_eq!(seen, group, "every member, the original included, should be drawn");
    }

    #[test]
    fn test_same_seed_same_choices() {
        let mut a = selector("a,b,c,d,e\n", 99);
        let mut b = selector("a,b,c,d,e\n", 99);
        for _ in 0..20 {
            assert_eq!(a.resolve(&word("c")).unwrap(), b.resolve(&word("c")).unwrap());
        }
    }
}
