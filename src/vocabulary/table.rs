use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use super::{read_line_words, SynonymGroup, Vocabulary};
use crate::error::{LimvocError, Result};
use crate::tokenizer::Word;

/// Vocabulary table read straight from its source on every lookup.
///
/// Each lookup rescans the table from the start and, on a hit, seeks back to the
/// first byte of the matching line to parse the whole group. There is no index:
/// the cost is linear in table size per word.
pub struct SynonymTable<R> {
    reader: BufReader<R>,
    words: Vec<Word>,
}

impl SynonymTable<File> {
    /// Open a vocabulary table on disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LimvocError::OpenVocabulary {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened vocabulary table: {}", path.display());
        Ok(Self::new(file))
    }
}

impl<R: Read + Seek> SynonymTable<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
            words: Vec::new(),
        }
    }

    /// Byte offset of the start of the first line containing `word`
    fn find_line_start(&mut self, word: &Word) -> Result<Option<u64>> {
        self.reader
            .seek(SeekFrom::Start(0))
            .map_err(|e| LimvocError::io("rewinding vocabulary table", e))?;

        let mut offset = 0u64;
        loop {
            let consumed = read_line_words(&mut self.reader, &mut self.words)?;
            if consumed == 0 {
                return Ok(None);
            }

            let line_start = offset;
            offset += consumed;

            if self.words.contains(word) {
                return Ok(Some(line_start));
            }
        }
    }

    /// Re-read the line starting at `line_start` and parse it into a group
    fn read_group_at(&mut self, line_start: u64) -> Result<Option<SynonymGroup>> {
        self.reader
            .seek(SeekFrom::Start(line_start))
            .map_err(|e| LimvocError::io("seeking vocabulary table", e))?;

        read_line_words(&mut self.reader, &mut self.words)?;
        Ok(SynonymGroup::from_members(std::mem::take(&mut self.words)))
    }
}

impl<R: Read + Seek> Vocabulary for SynonymTable<R> {
    fn find_group(&mut self, word: &Word) -> Result<Option<SynonymGroup>> {
        if word.is_empty() {
            return Ok(None);
        }
        match self.find_line_start(word)? {
            Some(line_start) => {
                debug!(word = %word, line_start, "Found synonym line");
                self.read_group_at(line_start)
            }
            None => Ok(None),
        }
    }
}
