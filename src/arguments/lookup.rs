//! Arguments that resolve a token against a set of known names.

use std::collections::BTreeMap;
use std::fmt;

use crate::arguments::{filter_prefix, Argument, ParseResult};
use crate::context::{Context, Payload};
use crate::reader::CursorReader;

type Lookup<S, R, A> = Box<dyn Fn(&Context<S, R>) -> BTreeMap<String, A> + Send + Sync>;

/// Looks a token up in a map computed from the context so far.
///
/// The map is rebuilt on every parse and suggestion, so it may depend on the
/// source or on earlier slots.
pub struct MapArgument<S, R, A> {
    lookup: Lookup<S, R, A>,
}

impl<S, R, A: Payload + Clone> MapArgument<S, R, A> {
    pub fn new<F>(lookup: F) -> Self
    where
        F: Fn(&Context<S, R>) -> BTreeMap<String, A> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }

    /// A fixed map.
    pub fn from_map(map: BTreeMap<String, A>) -> Self {
        Self::new(move |_| map.clone())
    }
}

impl<S, R, A> fmt::Debug for MapArgument<S, R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapArgument").finish_non_exhaustive()
    }
}

impl<S, R, A: Payload + Clone> Argument<S, R> for MapArgument<S, R, A> {
    type Output = A;

    fn parse(&self, reader: &mut CursorReader<'_>, context: &Context<S, R>) -> ParseResult<A> {
        let mark = reader.mark();
        let Ok(key) = reader.read_token() else {
            return ParseResult::failure();
        };
        match (self.lookup)(context).get(&key) {
            Some(value) => ParseResult::success(value.clone()),
            None => {
                reader.reset(mark);
                ParseResult::failure()
            }
        }
    }

    fn suggest(&self, context: &Context<S, R>, remaining: &str) -> Vec<String> {
        filter_prefix((self.lookup)(context).keys(), remaining)
    }
}

/// An ordered list of names, each mapped to a payload.
///
/// With `ignore_case`, both matching and suggestion filtering compare
/// lowercased text; suggestions keep the declared spelling.
#[derive(Debug, Clone)]
pub struct ChoiceArgument<A> {
    choices: Vec<(String, A)>,
    ignore_case: bool,
}

impl<A: Payload + Clone> ChoiceArgument<A> {
    pub fn new<I, K>(choices: I) -> Self
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
    {
        Self {
            choices: choices
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
            ignore_case: false,
        }
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|(name, _)| name.as_str())
    }

    fn fold(&self, text: &str) -> String {
        if self.ignore_case {
            text.to_lowercase()
        } else {
            text.to_string()
        }
    }
}

impl ChoiceArgument<String> {
    /// Choices whose payload is their own name.
    pub fn from_names<I, K>(names: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::new(names.into_iter().map(|name| {
            let name = name.into();
            (name.clone(), name)
        }))
    }
}

impl<S, R, A: Payload + Clone> Argument<S, R> for ChoiceArgument<A> {
    type Output = A;

    fn parse(&self, reader: &mut CursorReader<'_>, _context: &Context<S, R>) -> ParseResult<A> {
        let mark = reader.mark();
        let Ok(token) = reader.read_token() else {
            return ParseResult::failure();
        };
        let token = self.fold(&token);
        match self.choices.iter().find(|(name, _)| self.fold(name) == token) {
            Some((_, value)) => ParseResult::success(value.clone()),
            None => {
                reader.reset(mark);
                ParseResult::failure()
            }
        }
    }

    fn suggest(&self, _context: &Context<S, R>, remaining: &str) -> Vec<String> {
        let remaining = self.fold(remaining);
        self.names()
            .filter(|name| self.fold(name).starts_with(&remaining))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> BTreeMap<String, i32> {
        BTreeMap::from([
            ("test1".to_string(), 1),
            ("test2".to_string(), 2),
            ("test3".to_string(), 3),
            ("test3test".to_string(), 3),
            ("boom".to_string(), 3),
        ])
    }

    #[test]
    fn map_lookup_hits_and_misses() {
        let argument: MapArgument<(), (), i32> = MapArgument::from_map(params());
        let context = Context::new((), "test2 boom");
        let mut reader = CursorReader::new("test2 boom");
        assert_eq!(argument.parse(&mut reader, &context).into_value(), Some(2));

        let mut reader = CursorReader::new("map1");
        assert!(!argument.parse(&mut reader, &context).is_success());
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn map_suggests_keys_by_prefix() {
        let argument: MapArgument<(), (), i32> = MapArgument::from_map(params());
        let context = Context::new((), "");
        assert_eq!(
            argument.suggest(&context, "te"),
            vec!["test1", "test2", "test3", "test3test"]
        );
        assert_eq!(argument.suggest(&context, "test3"), vec!["test3", "test3test"]);
        assert_eq!(argument.suggest(&context, "bo"), vec!["boom"]);
    }

    #[test]
    fn map_can_read_the_source() {
        let argument: MapArgument<String, (), usize> = MapArgument::new(|context: &Context<String, ()>| {
            BTreeMap::from([(context.source().clone(), context.source().len())])
        });
        let context = Context::new("alice".to_string(), "alice");
        let mut reader = CursorReader::new("alice");
        assert_eq!(argument.parse(&mut reader, &context).into_value(), Some(5));
    }

    #[test]
    fn choices_respect_case_mode() {
        let strict = ChoiceArgument::from_names(["Red", "Green"]);
        let context = Context::<(), ()>::new((), "");
        let mut reader = CursorReader::new("red");
        assert!(!Argument::parse(&strict, &mut reader, &context).is_success());

        let relaxed = strict.clone().ignore_case(true);
        let mut reader = CursorReader::new("red");
        assert_eq!(
            Argument::parse(&relaxed, &mut reader, &context).into_value().as_deref(),
            Some("Red")
        );
        assert_eq!(Argument::suggest(&relaxed, &context, "g"), vec!["Green"]);
        assert!(Argument::suggest(&strict, &context, "g").is_empty());
    }
}
