// WHY: Lookup is a trait so the pipeline can run against either the on-disk
// scanning table or the in-memory index with identical semantics

pub mod index;
pub mod table;

use std::io::{BufRead, ErrorKind};

use rand::Rng;

use crate::error::{LimvocError, Result, WORD_MAX_LEN};
use crate::tokenizer::Word;

pub use index::IndexedVocabulary;
pub use table::SynonymTable;

/// Separator between words on one vocabulary line
pub const GROUP_SEPARATOR: u8 = b',';

/// One line of the vocabulary table: an ordered, non-empty set of mutual synonyms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymGroup {
    members: Vec<Word>,
}

impl SynonymGroup {
    /// Returns `None` for an empty member list; a group always has a candidate.
    pub fn from_members(members: Vec<Word>) -> Option<Self> {
        if members.is_empty() {
            None
        } else {
            Some(Self { members })
        }
    }

    pub fn members(&self) -> &[Word] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Pick one member uniformly at random
    pub fn choose<G: Rng + ?Sized>(&self, rng: &mut G) -> &Word {
        let index = rng.random_range(0..self.members.len());
        &self.members[index]
    }
}

/// Something that can find the synonym group containing a word
pub trait Vocabulary {
    /// First group (in table order) containing `word`, compared by exact token equality
    fn find_group(&mut self, word: &Word) -> Result<Option<SynonymGroup>>;
}

impl<V: Vocabulary + ?Sized> Vocabulary for Box<V> {
    fn find_group(&mut self, word: &Word) -> Result<Option<SynonymGroup>> {
        (**self).find_group(word)
    }
}

/// Read one table line into `words`, replacing their previous contents.
///
/// Tokens are length-checked byte by byte, so an over-long token fails after
/// `WORD_MAX_LEN + 1` bytes no matter how long the line runs. Empty tokens are
/// skipped. Returns the bytes consumed, newline included; 0 means end of table.
pub(crate) fn read_line_words<R: BufRead>(reader: &mut R, words: &mut Vec<Word>) -> Result<u64> {
    words.clear();
    let mut token = Vec::with_capacity(WORD_MAX_LEN);
    let mut consumed = 0u64;

    loop {
        let (used, line_done) = {
            let available = match reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(LimvocError::io("reading vocabulary table", e)),
            };

            if available.is_empty() {
                finish_token(&mut token, words)?;
                return Ok(consumed);
            }

            let mut used = 0;
            let mut line_done = false;
            for &byte in available {
                used += 1;
                match byte {
                    b'\n' => {
                        line_done = true;
                        break;
                    }
                    GROUP_SEPARATOR => finish_token(&mut token, words)?,
                    _ => {
                        token.push(byte);
                        if token.len() > WORD_MAX_LEN {
                            return Err(LimvocError::word_too_long(&token));
                        }
                    }
                }
            }
            (used, line_done)
        };

        reader.consume(used);
        consumed += used as u64;
        if line_done {
            finish_token(&mut token, words)?;
            return Ok(consumed);
        }
    }
}

fn finish_token(token: &mut Vec<u8>, words: &mut Vec<Word>) -> Result<()> {
    if !token.is_empty() {
        words.push(Word::new(std::mem::take(token))?);
    }
    Ok(())
}
