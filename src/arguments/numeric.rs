//! Numeric arguments.
//!
//! Integers accept `[+-]digits`; a value beyond the type's range clamps to the
//! nearest bound instead of failing. Decimals accept `[+-]digits[.digits]` and
//! `[+-].digits`, with no exponent, `inf` or `nan`.
//!
//! A well-formed number outside the configured `[minimum, maximum]` is
//! rejected but kept as the slot's raw value.

use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::arguments::{Argument, ParseResult};
use crate::context::Context;
use crate::reader::CursorReader;

fn is_integer_syntax(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal_syntax(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let fraction_len = fraction.map_or(0, str::len);
    all_digits(whole) && fraction.map_or(true, all_digits) && whole.len() + fraction_len > 0
}

fn read_integer<T>(token: &str, lower: T, upper: T) -> Option<T>
where
    T: FromStr<Err = ParseIntError>,
{
    if !is_integer_syntax(token) {
        return None;
    }
    match token.parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(upper),
            IntErrorKind::NegOverflow => Some(lower),
            _ => None,
        },
    }
}

fn read_decimal<T: FromStr>(token: &str) -> Option<T> {
    if !is_decimal_syntax(token) {
        return None;
    }
    token.parse::<T>().ok()
}

macro_rules! bounded_argument {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $lower:expr, $upper:expr, $read:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            minimum: $ty,
            maximum: $ty,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    minimum: $lower,
                    maximum: $upper,
                }
            }

            /// Inclusive lower bound.
            pub fn min(mut self, minimum: $ty) -> Self {
                self.minimum = minimum;
                self
            }

            /// Inclusive upper bound.
            pub fn max(mut self, maximum: $ty) -> Self {
                self.maximum = maximum;
                self
            }

            pub fn range(minimum: $ty, maximum: $ty) -> Self {
                Self::new().min(minimum).max(maximum)
            }

            pub fn minimum(&self) -> $ty {
                self.minimum
            }

            pub fn maximum(&self) -> $ty {
                self.maximum
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<S, R> Argument<S, R> for $name {
            type Output = $ty;

            fn parse(
                &self,
                reader: &mut CursorReader<'_>,
                _context: &Context<S, R>,
            ) -> ParseResult<$ty> {
                let mark = reader.mark();
                let Ok(token) = reader.read_token() else {
                    return ParseResult::failure();
                };
                let read: fn(&str) -> Option<$ty> = $read;
                match read(&token) {
                    Some(value) if value < self.minimum || value > self.maximum => {
                        reader.reset(mark);
                        ParseResult::rejected(value)
                    }
                    Some(value) => ParseResult::success(value),
                    None => {
                        reader.reset(mark);
                        ParseResult::failure()
                    }
                }
            }
        }
    };
}

bounded_argument!(
    /// 32-bit signed integer argument.
    IntegerArgument,
    i32,
    i32::MIN,
    i32::MAX,
    |token| read_integer(token, i32::MIN, i32::MAX)
);

bounded_argument!(
    /// 64-bit signed integer argument.
    LongArgument,
    i64,
    i64::MIN,
    i64::MAX,
    |token| read_integer(token, i64::MIN, i64::MAX)
);

bounded_argument!(
    /// Single-precision decimal argument.
    FloatArgument,
    f32,
    f32::MIN,
    f32::MAX,
    read_decimal::<f32>
);

bounded_argument!(
    /// Double-precision decimal argument.
    DoubleArgument,
    f64,
    f64::MIN,
    f64::MAX,
    read_decimal::<f64>
);

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
    fn integers_parse_with_signs() {
        let argument = IntegerArgument::new();
        assert_eq!(parse(&argument, "123").0.into_value(), Some(123));
        assert_eq!(parse(&argument, "+123").0.into_value(), Some(123));
        assert_eq!(parse(&argument, "-123 rest"), (ParseResult::success(-123), 5));
    }

    #[test]
    fn malformed_integers_roll_back() {
        let argument = IntegerArgument::new();
        for text in ["", "+", "-", "12a", "a12", "1.5", "test"] {
            let (result, offset) = parse(&argument, text);
            assert!(!result.is_success(), "{text} should not parse");
            assert_eq!(offset, 0, "{text} should roll back");
        }
    }

    #[test]
    fn integer_overflow_clamps() {
        let argument = IntegerArgument::new();
        assert_eq!(parse(&argument, "2147483647").0.into_value(), Some(i32::MAX));
        assert_eq!(parse(&argument, "2147483646").0.into_value(), Some(i32::MAX - 1));
        assert_eq!(parse(&argument, "99999999999999").0.into_value(), Some(i32::MAX));
        assert_eq!(parse(&argument, "-2147483648").0.into_value(), Some(i32::MIN));
        assert_eq!(parse(&argument, "-99999999999999").0.into_value(), Some(i32::MIN));
    }

    #[test]
    fn out_of_range_is_rejected_with_value() {
        let argument = IntegerArgument::range(1, 10);
        let (result, offset) = parse(&argument, "11");
        assert!(!result.is_success());
        assert_eq!(result.value(), Some(&11));
        assert_eq!(offset, 0);
        assert!(parse(&argument, "10").0.is_success());
    }

    #[test]
    fn longs_use_the_wider_range() {
        let argument = LongArgument::new();
        assert_eq!(
            parse(&argument, "9999999999").0.into_value(),
            Some(9_999_999_999_i64)
        );
    }

    #[test]
    fn decimals_follow_the_plain_syntax() {
        let argument = DoubleArgument::new();
        assert_eq!(parse(&argument, "1.5").0.into_value(), Some(1.5));
        assert_eq!(parse(&argument, "-.5").0.into_value(), Some(-0.5));
        assert_eq!(parse(&argument, "2.").0.into_value(), Some(2.0));
        assert_eq!(parse(&argument, "7").0.into_value(), Some(7.0));
        for text in [".", "+.", "1e5", "nan", "inf", "1.2.3"] {
            assert!(!parse(&argument, text).0.is_success(), "{text} should not parse");
        }
    }

    #[test]
    fn float_bounds_apply() {
        let argument = FloatArgument::new().min(0.0).max(1.0);
        assert!(parse(&argument, "0.5").0.is_success());
        assert_eq!(parse(&argument, "1.5").0.value(), Some(&1.5));
        assert!(!parse(&argument, "1.5").0.is_success());
    }
}
