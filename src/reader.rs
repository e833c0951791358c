//! Cursor-based reader over a single line of command input.
//!
//! Tokens are maximal runs of non-whitespace. A backslash escapes whitespace
//! (or another backslash) so that it becomes part of the token; any other
//! escaped character keeps its backslash.
//!
//! All reads either move the offset to a token boundary or leave it where it
//! was. Callers that try something speculative take a [`Mark`] first and
//! [`reset`](CursorReader::reset) to it on failure.

use crate::CommandError;

/// The escape character recognised inside tokens.
pub const ESCAPE: char = '\\';

/// A saved reader position, only obtainable from [`CursorReader::mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mark(usize);

impl Mark {
    /// Byte offset this mark points at.
    pub fn offset(self) -> usize {
        self.0
    }
}

/// A read cursor over an immutable input string.
#[derive(Debug, Clone)]
pub struct CursorReader<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> CursorReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    /// The full input text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Current byte offset, always on a char boundary.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn mark(&self) -> Mark {
        Mark(self.offset)
    }

    pub fn reset(&mut self, mark: Mark) {
        self.offset = mark.0.min(self.text.len());
    }

    pub fn can_read(&self) -> bool {
        self.offset < self.text.len()
    }

    /// The character under the cursor, if any.
    pub fn current(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    /// Text already consumed.
    pub fn consumed(&self) -> &'a str {
        &self.text[..self.offset]
    }

    /// Text not yet consumed. Does not advance.
    pub fn remaining(&self) -> &'a str {
        &self.text[self.offset..]
    }

    /// Everything from the cursor to the end of the line, without advancing.
    ///
    /// Arguments that accept free-form text call this, validate, and then
    /// commit with [`skip_to_end`](Self::skip_to_end).
    pub fn read_rest_of_line(&self) -> &'a str {
        self.remaining()
    }

    /// Moves the cursor to the end of the input.
    pub fn skip_to_end(&mut self) {
        self.offset = self.text.len();
    }

    /// Skips any whitespace under the cursor. Returns true if something was skipped.
    pub fn skip_whitespace(&mut self) -> bool {
        let rest = self.remaining();
        let trimmed = rest.trim_start();
        self.offset += rest.len() - trimmed.len();
        rest.len() != trimmed.len()
    }

    /// True when the cursor sits right after whitespace, or at either end.
    pub fn at_boundary(&self) -> bool {
        if self.offset == 0 || !self.can_read() {
            return true;
        }
        self.consumed()
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace)
    }

    /// True when the input ends in unescaped whitespace, i.e. the user has
    /// finished the last token and is about to start a new one.
    pub fn ends_with_separator(&self) -> bool {
        let mut chars = self.text.chars().rev();
        match chars.next() {
            Some(last) if last.is_whitespace() => {
                let escapes = chars.take_while(|c| *c == ESCAPE).count();
                escapes % 2 == 0
            }
            _ => false,
        }
    }

    /// Reads the next token without committing.
    pub fn peek_token(&self) -> String {
        let mut copy = self.clone();
        copy.skip_whitespace();
        copy.scan_token()
    }

    /// Reads one token and the whitespace after it.
    ///
    /// Fails with [`CommandError::EndOfInput`] if nothing is left to read.
    pub fn read_token(&mut self) -> Result<String, CommandError> {
        if !self.can_read() {
            return Err(CommandError::EndOfInput {
                offset: self.offset,
            });
        }
        let token = self.scan_token();
        self.skip_whitespace();
        Ok(token)
    }

    fn scan_token(&mut self) -> String {
        let mut token = String::new();
        let mut escaping = false;
        let mut chars = self.text[self.offset..].char_indices();
        let start = self.offset;
        let mut end = self.text.len();

        for (index, current) in chars.by_ref() {
            if escaping {
                if current != ESCAPE && !current.is_whitespace() {
                    token.push(ESCAPE);
                }
                token.push(current);
                escaping = false;
                continue;
            }
            if current == ESCAPE {
                escaping = true;
                continue;
            }
            if current.is_whitespace() {
                end = start + index;
                break;
            }
            token.push(current);
        }

        if escaping {
            token.push(ESCAPE);
        }
        self.offset = end;
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_token(text: &str) -> String {
        CursorReader::new(text).read_token().unwrap()
    }

    #[test]
    fn reads_plain_tokens() {
        assert_eq!(first_token("hello"), "hello");
        assert_eq!(first_token("hello hello"), "hello");
    }

    #[test]
    fn honours_escapes() {
        assert_eq!(first_token("hello\\ hello"), "hello hello");
        assert_eq!(first_token("hello\\\\ hello"), "hello\\");
        assert_eq!(first_token("hello\\hello"), "hello\\hello");
        assert_eq!(first_token("hello\\"), "hello\\");
        assert_eq!(first_token("hello\\ hello hello"), "hello hello");
    }

    #[test]
    fn read_token_skips_trailing_whitespace() {
        let mut reader = CursorReader::new("123   456");
        assert_eq!(reader.read_token().unwrap(), "123");
        assert_eq!(reader.offset(), 6);
        assert_eq!(reader.read_token().unwrap(), "456");
        assert!(!reader.can_read());
    }

    #[test]
    fn read_token_at_end_fails() {
        let mut reader = CursorReader::new("");
        assert!(matches!(
            reader.read_token(),
            Err(CommandError::EndOfInput { offset: 0 })
        ));
    }

    #[test]
    fn peek_does_not_advance() {
        let reader = CursorReader::new("abc def");
        assert_eq!(reader.peek_token(), "abc");
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn mark_and_reset_roll_back() {
        let mut reader = CursorReader::new("123 456");
        let mark = reader.mark();
        reader.read_token().unwrap();
        assert_eq!(reader.remaining(), "456");
        reader.reset(mark);
        assert_eq!(reader.offset(), 0);
        assert_eq!(reader.read_rest_of_line(), "123 456");
        assert_eq!(reader.offset(), 0);
        reader.skip_to_end();
        assert!(!reader.can_read());
        assert_eq!(reader.consumed(), "123 456");
    }

    #[test]
    fn detects_trailing_separator() {
        assert!(CursorReader::new("hello ").ends_with_separator());
        assert!(!CursorReader::new("hello").ends_with_separator());
        assert!(!CursorReader::new("hello\\ ").ends_with_separator());
        assert!(CursorReader::new("hello\\\\ ").ends_with_separator());
        assert!(!CursorReader::new("").ends_with_separator());
    }

    #[test]
    fn handles_multibyte_text() {
        let mut reader = CursorReader::new("héllo wörld");
        assert_eq!(reader.read_token().unwrap(), "héllo");
        assert_eq!(reader.current(), Some('w'));
        assert_eq!(reader.read_token().unwrap(), "wörld");
    }

    #[test]
    fn boundary_tracking() {
        let mut reader = CursorReader::new("ab cd");
        assert!(reader.at_boundary());
        reader.read_token().unwrap();
        assert!(reader.at_boundary());
    }
}
