// WHY: Documents are scanned byte by byte; words are bounded so an over-long run
// is reported as a data error instead of being silently truncated

use std::fmt;
use std::io::{BufRead, ErrorKind};

use crate::error::{LimvocError, Result, WORD_MAX_LEN};

/// A bounded, case-sensitive run of non-delimiter bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Word(Vec<u8>);

impl Word {
    /// Build a word, rejecting anything longer than [`WORD_MAX_LEN`] bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.len() > WORD_MAX_LEN {
            return Err(LimvocError::word_too_long(&bytes));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Bytes that end a word in a document
pub fn is_delimiter(byte: u8) -> bool {
    byte == b' ' || byte == b'\n'
}

/// A finished word together with the delimiter that ended it.
/// `delimiter` is `None` only for a trailing word flushed at end of stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: Word,
    pub delimiter: Option<u8>,
}

/// Accumulates bytes into a pending word until a delimiter arrives
#[derive(Debug, Default)]
pub struct TokenBuffer {
    pending: Vec<u8>,
}

impl TokenBuffer {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(WORD_MAX_LEN),
        }
    }

    /// Feed one byte. Returns a token when `byte` is a delimiter.
    pub fn push(&mut self, byte: u8) -> Result<Option<Token>> {
        if is_delimiter(byte) {
            let word = Word(std::mem::take(&mut self.pending));
            return Ok(Some(Token {
                word,
                delimiter: Some(byte),
            }));
        }

        if self.pending.len() >= WORD_MAX_LEN {
            self.pending.push(byte);
            return Err(LimvocError::word_too_long(&self.pending));
        }

        self.pending.push(byte);
        Ok(None)
    }

    /// Take whatever is pending at end of stream, if anything
    pub fn finish(&mut self) -> Option<Word> {
        if self.pending.is_empty() {
            None
        } else {
            Some(Word(std::mem::take(&mut self.pending)))
        }
    }
}

/// Iterator over the tokens of a byte stream
pub struct Tokens<R> {
    reader: R,
    buffer: TokenBuffer,
    flush_trailing: bool,
    done: bool,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R, flush_trailing: bool) -> Self {
        Self {
            reader,
            buffer: TokenBuffer::new(),
            flush_trailing,
            done: false,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            let (token, consumed) = {
                let available = match self.reader.fill_buf() {
                    Ok(bytes) => bytes,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(LimvocError::io("reading input document", e)),
                };

                if available.is_empty() {
                    return Ok(self.finish_stream());
                }

                let mut token = None;
                let mut consumed = 0;
                for &byte in available {
                    consumed += 1;
                    if let Some(t) = self.buffer.push(byte)? {
                        token = Some(t);
                        break;
                    }
                }
                (token, consumed)
            };

            self.reader.consume(consumed);
            if token.is_some() {
                return Ok(token);
            }
        }
    }

    fn finish_stream(&mut self) -> Option<Token> {
        self.done = true;
        let word = self.buffer.finish()?;
        if self.flush_trailing {
            Some(Token {
                word,
                delimiter: None,
            })
        } else {
            tracing::debug!(word = %word, "Dropping trailing word without delimiter");
            None
        }
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &str, flush_trailing: bool) -> Result<Vec<Token>> {
        Tokens::new(Cursor::new(input.as_bytes()), flush_trailing).collect()
    }

    fn word(s: &str) -> Word {
        Word::new(s.as_bytes()).unwrap()
    }

    #[test]
    fn test_word_length_boundary() {
        assert!(Word::new("a".repeat(15)).is_ok());
        let err = Word::new("a".repeat(16)).unwrap_err();
        assert!(matches!(err, LimvocError::WordTooLong { .. }));
    }

    #[test]
    fn test_buffer_signals_on_delimiters() {
        let mut buffer = TokenBuffer::new();
        assert_eq!(buffer.push(b'h').unwrap(), None);
        assert_eq!(buffer.push(b'i').unwrap(), None);
        let token = buffer.push(b'\n').unwrap().unwrap();
        assert_eq!(token.word, word("hi"));
        assert_eq!(token.delimiter, Some(b'\n'));
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_buffer_rejects_sixteenth_byte() {
        let mut buffer = TokenBuffer::new();
        for _ in 0..15 {
            assert!(buffer.push(b'x').unwrap().is_none());
        }
        assert!(matches!(
            buffer.push(b'x'),
            Err(LimvocError::WordTooLong { .. })
        ));
    }

    #[test]
    fn test_tokens_preserve_delimiters() {
        let tokens = collect("cat dog\nbird ", true).unwrap();
        let delimiters: Vec<_> = tokens.iter().map(|t| t.delimiter).collect();
        assert_eq!(delimiters, vec![Some(b' '), Some(b'\n'), Some(b' ')]);
        assert_eq!(tokens[2].word, word("bird"));
    }

    #[test]
    fn test_consecutive_delimiters_yield_empty_words() {
        let tokens = collect("a  b\n", true).unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens[1].word.is_empty());
        assert_eq!(tokens[1].delimiter, Some(b' '));
    }

    #[test]
    fn test_trailing_word_flushed_or_dropped() {
        let flushed = collect("cat dog", true).unwrap();
        assert_eq!(flushed.len(), 2);
        assert_eq!(flushed[1].delimiter, None);

        let dropped = collect("cat dog", false).unwrap();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].word, word("cat"));
    }

    #[test]
    fn test_exactly_fifteen_bytes_accepted() {
        let input = format!("{} ok\n", "a".repeat(15));
        let tokens = collect(&input, true).unwrap();
        assert_eq!(tokens[0].word.len(), 15);
    }

    #[test]
    fn test_sixteen_bytes_stops_iteration() {
        let input = format!("ok {} more\n", "a".repeat(16));
        let mut tokens = Tokens::new(Cursor::new(input.into_bytes()), true);
        assert!(tokens.next().unwrap().is_ok());
        assert!(matches!(
            tokens.next(),
            Some(Err(LimvocError::WordTooLong { .. }))
        ));
        assert!(tokens.next().is_none());
    }

    #[test]
    fn test_small_buffer_reads_span_chunks() {
        let reader = std::io::BufReader::with_capacity(2, Cursor::new(b"alpha beta\n".to_vec()));
        let tokens: Vec<Token> = Tokens::new(reader, true).collect::<Result<_>>().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].word, word("alpha"));
        assert_eq!(tokens[1].word, word("beta"));
    }
}
