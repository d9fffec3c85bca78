use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use super::{read_line_words, SynonymGroup, Vocabulary};
use crate::error::{LimvocError, Result};
use crate::tokenizer::Word;

/// In-memory vocabulary built from one pass over the table.
///
/// Each word maps to the first line that contains it, so lookups agree with
/// [`super::SynonymTable`]. Over-long tokens anywhere in the table are rejected
/// while loading.
#[derive(Debug, Default)]
pub struct IndexedVocabulary {
    groups: Vec<SynonymGroup>,
    by_word: HashMap<Word, usize>,
}

impl IndexedVocabulary {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LimvocError::OpenVocabulary {
            path: path.to_path_buf(),
            source,
        })?;
        let vocabulary = Self::from_reader(BufReader::new(file))?;
        info!(
            "Indexed vocabulary {}: {} groups, {} words",
            path.display(),
            vocabulary.group_count(),
            vocabulary.word_count()
        );
        Ok(vocabulary)
    }

    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut vocabulary = Self::default();
        let mut words = Vec::new();

        while read_line_words(&mut reader, &mut words)? > 0 {
            let Some(group) = SynonymGroup::from_members(std::mem::take(&mut words)) else {
                continue;
            };
            let group_id = vocabulary.groups.len();
            for member in group.members() {
                vocabulary.by_word.entry(member.clone()).or_insert(group_id);
            }
            vocabulary.groups.push(group);
        }

        Ok(vocabulary)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn word_count(&self) -> usize {
        self.by_word.len()
    }
}

impl Vocabulary for IndexedVocabulary {
    fn find_group(&mut self, word: &Word) -> Result<Option<SynonymGroup>> {
        Ok(self
            .by_word
            .get(word)
            .map(|&group_id| self.groups[group_id].clone()))
    }
}
