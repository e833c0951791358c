//! Literal matching.
//!
//! A literal owns one or more surface names. Each name may span several
//! whitespace-separated words ("allow separator literal"); such a name must
//! match that many tokens exactly, compared case-sensitively. Names with more
//! words are tried first so a short alias never shadows a longer one that
//! starts with it. Ties keep declaration order.

use std::sync::Arc;

use crate::context::{Payload, Value};
use crate::reader::CursorReader;

#[derive(Debug, Clone)]
struct LiteralName {
    text: String,
    words: Vec<String>,
    payload: Value,
}

#[derive(Debug, Clone)]
pub(crate) struct Literal {
    names: Vec<LiteralName>,
    match_order: Vec<usize>,
}

impl Literal {
    /// Every name records the same payload.
    pub(crate) fn simple<I>(names: I, payload: Value) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::build(names.into_iter().map(|name| (name, Arc::clone(&payload))))
    }

    /// Each name records its own payload.
    pub(crate) fn keyed<I, K, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
        A: Payload,
    {
        Self::build(
            pairs
                .into_iter()
                .map(|(name, payload)| (name.into(), Arc::new(payload) as Value)),
        )
    }

    fn build(pairs: impl Iterator<Item = (String, Value)>) -> Self {
        let mut names: Vec<LiteralName> = Vec::new();
        for (name, payload) in pairs {
            let words: Vec<String> = name.split_whitespace().map(str::to_string).collect();
            if words.is_empty() {
                continue;
            }
            let text = words.join(" ");
            if names.iter().any(|existing| existing.text == text) {
                continue;
            }
            names.push(LiteralName {
                text,
                words,
                payload,
            });
        }

        let mut match_order: Vec<usize> = (0..names.len()).collect();
        match_order.sort_by(|a, b| names[*b].words.len().cmp(&names[*a].words.len()));

        Self { names, match_order }
    }

    /// Surface names in declaration order, words joined by single spaces.
    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|name| name.text.as_str())
    }

    /// Consumes one of the names from `reader` and returns its payload.
    /// Leaves the reader untouched when nothing matches.
    pub(crate) fn try_match(&self, reader: &mut CursorReader<'_>) -> Option<Value> {
        for &index in &self.match_order {
            let name = &self.names[index];
            let mark = reader.mark();
            let matched = name
                .words
                .iter()
                .all(|expected| reader.read_token().is_ok_and(|token| &token == expected));
            if matched {
                return Some(Arc::clone(&name.payload));
            }
            reader.reset(mark);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_of(value: &Value) -> &str {
        (**value)
            .as_any()
            .downcast_ref::<String>()
            .map(String::as_str)
            .unwrap_or_default()
    }

    #[test]
    fn multi_word_names_match_as_a_unit() {
        let literal = Literal::simple(
            ["allow separator literal".to_string()],
            Arc::new("allow separator literal".to_string()),
        );
        let mut reader = CursorReader::new("allow separator literal world1");
        let matched = literal.try_match(&mut reader).unwrap();
        assert_eq!(payload_of(&matched), "allow separator literal");
        assert_eq!(reader.remaining(), "world1");

        let mut reader = CursorReader::new("allow separator");
        assert!(literal.try_match(&mut reader).is_none());
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn longer_names_win_over_prefixes() {
        let literal = Literal::keyed([("set", "short".to_string()), ("set home", "long".to_string())]);
        let mut reader = CursorReader::new("set home now");
        let matched = literal.try_match(&mut reader).unwrap();
        assert_eq!(payload_of(&matched), "long");

        let mut reader = CursorReader::new("set work");
        let matched = literal.try_match(&mut reader).unwrap();
        assert_eq!(payload_of(&matched), "short");
        assert_eq!(reader.remaining(), "work");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let literal = Literal::simple(["HELLO9".to_string()], Arc::new("HELLO9".to_string()));
        assert!(literal.try_match(&mut CursorReader::new("hello9")).is_none());
        assert!(literal.try_match(&mut CursorReader::new("HELLO9")).is_some());
    }

    #[test]
    fn blank_and_duplicate_names_are_dropped() {
        let literal = Literal::simple(
            ["a".to_string(), "  ".to_string(), "a".to_string(), "b  c".to_string()],
            Arc::new(()),
        );
        assert_eq!(literal.names().collect::<Vec<_>>(), vec!["a", "b c"]);
    }
}
