//! Text-shaped arguments.

use crate::arguments::{filter_prefix, Argument, ParseResult};
use crate::context::Context;
use crate::reader::CursorReader;

/// A single token, or the rest of the line when greedy.
///
/// Length bounds are measured in chars and are inclusive. A string outside
/// them is rejected and the reader rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringArgument {
    min_length: usize,
    max_length: usize,
    greedy: bool,
}

impl StringArgument {
    pub fn new() -> Self {
        Self {
            min_length: 1,
            max_length: usize::MAX,
            greedy: false,
        }
    }

    /// Reads everything up to the end of the line, whitespace included.
    pub fn greedy() -> Self {
        Self {
            greedy: true,
            ..Self::new()
        }
    }

    /// Minimum length; values below 1 are raised to 1.
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length.max(1);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn is_greedy(&self) -> bool {
        self.greedy
    }
}

impl Default for StringArgument {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, R> Argument<S, R> for StringArgument {
    type Output = String;

    fn parse(&self, reader: &mut CursorReader<'_>, _context: &Context<S, R>) -> ParseResult<String> {
        let mark = reader.mark();
        let value = if self.greedy {
            let rest = reader.read_rest_of_line().to_string();
            reader.skip_to_end();
            rest
        } else {
            match reader.read_token() {
                Ok(token) => token,
                Err(_) => return ParseResult::failure(),
            }
        };
        let length = value.chars().count();
        if length < self.min_length || length > self.max_length {
            reader.reset(mark);
            return ParseResult::rejected(value);
        }
        ParseResult::success(value)
    }
}

/// `true` or `false`, in any letter case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanArgument;

const BOOLEAN_SUGGESTIONS: [&str; 2] = ["true", "false"];

impl BooleanArgument {
    pub fn new() -> Self {
        Self
    }
}

impl<S, R> Argument<S, R> for BooleanArgument {
    type Output = bool;

    fn parse(&self, reader: &mut CursorReader<'_>, _context: &Context<S, R>) -> ParseResult<bool> {
        let mark = reader.mark();
        let Ok(token) = reader.read_token() else {
            return ParseResult::failure();
        };
        if token.eq_ignore_ascii_case("true") {
            ParseResult::success(true)
        } else if token.eq_ignore_ascii_case("false") {
            ParseResult::success(false)
        } else {
            reader.reset(mark);
            ParseResult::failure()
        }
    }

    fn suggest(&self, _context: &Context<S, R>, remaining: &str) -> Vec<String> {
        filter_prefix(BOOLEAN_SUGGESTIONS, &remaining.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<A: Argument<(), ()>>(argument: &A, text: &str) -> (ParseResult<A::Output>, usize) {
        let context = Context::new((), text);
        let mut reader = CursorReader::new(text);
        let result = argument.parse(&mut reader, &context);
        (result, reader.offset())
    }

    #[test]
    fn single_token_strings() {
        let (result, offset) = parse(&StringArgument::new(), "hello world");
        assert_eq!(result.into_value().as_deref(), Some("hello"));
        assert_eq!(offset, 6);
    }

    #[test]
    fn greedy_strings_take_the_line() {
        let (result, offset) = parse(&StringArgument::greedy(), "hello big world");
        assert_eq!(result.into_value().as_deref(), Some("hello big world"));
        assert_eq!(offset, 15);
    }

    #[test]
    fn length_bounds_reject_and_roll_back() {
        let argument = StringArgument::new().min_length(3).max_length(4);
        let (result, offset) = parse(&argument, "ab cd");
        assert!(!result.is_success());
        assert_eq!(result.value().map(String::as_str), Some("ab"));
        assert_eq!(offset, 0);
        assert!(parse(&argument, "abcd").0.is_success());
        assert!(!parse(&argument, "abcde").0.is_success());
    }

    #[test]
    fn min_length_never_drops_below_one() {
        let argument = StringArgument::greedy().min_length(0);
        assert!(!parse(&argument, "").0.is_success());
    }

    #[test]
    fn booleans_ignore_case() {
        assert_eq!(parse(&BooleanArgument, "TRUE").0.into_value(), Some(true));
        assert_eq!(parse(&BooleanArgument, "false").0.into_value(), Some(false));
        assert_eq!(parse(&BooleanArgument, "yes"), (ParseResult::failure(), 0));
    }

    #[test]
    fn booleans_suggest_by_prefix() {
        let context = Context::<(), ()>::new((), "");
        let argument = BooleanArgument;
        assert_eq!(Argument::suggest(&argument, &context, ""), vec!["true", "false"]);
        assert_eq!(Argument::suggest(&argument, &context, "F"), vec!["false"]);
    }
}
