use log::{debug, warn};
use nom::{
    character::complete::{digit1, one_of, space0},
    combinator::opt,
    IResult,
};

/// Longest token handed to a callback; anything beyond is dropped.
pub const MAX_TOKEN_LEN: usize = 63;

// {{{ Token
/// One comma separated item of a response payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token<'a> {
    pub value: &'a str,
    pub index: usize,
}

impl<'a> Token<'a> {
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Leading integer of the token, 0 if there is none.
    pub fn int(&self) -> i32 {
        Self::clamp(parse_int(self.value))
    }

    pub fn long(&self) -> i64 {
        parse_int(self.value)
    }

    /// Status bits: set only when the device sends exactly 1.
    pub fn is_one(&self) -> bool {
        self.long() == 1
    }

    /// Warning and flag bits: set for any positive value.
    pub fn is_positive(&self) -> bool {
        self.long() > 0
    }

    /// At most `max` leading characters of the token.
    pub fn string(&self, max: usize) -> String {
        prefix(self.value, max).to_string()
    }

    /// Logs a width different from the documented one; never fails.
    pub fn expect_width(&self, message: &str, width: usize) {
        if self.len() != width {
            debug!(
                "{}: length of item {} is {} != {}",
                message,
                self.index,
                self.len(),
                width
            );
        }
    }

    fn clamp(n: i64) -> i32 {
        n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
} // }}}

/// Splits `text` on commas and hands every token to `callback`.
///
/// A trailing comma does not produce an empty final token and an empty
/// `text` produces no tokens at all. With `expected` set, tokens at or
/// beyond that index are reported and skipped; `None` accepts any number.
pub fn parse_list<F>(text: &str, expected: Option<usize>, mut callback: F)
where
    F: FnMut(Token<'_>),
{
    if text.is_empty() {
        return;
    }

    let body = text.strip_suffix(',').unwrap_or(text);
    for (index, value) in body.split(',').enumerate() {
        if expected.is_some_and(|count| index >= count) {
            warn!("item {} is not expected", index);
            continue;
        }

        callback(Token {
            value: prefix(value, MAX_TOKEN_LEN),
            index,
        });
    }
}

/// Leading decimal integer of `input` with an optional sign, 0 when
/// `input` doesn't start with one. Overlong numbers saturate.
pub fn parse_int(input: &str) -> i64 {
    leading_int(input).map(|(_, n)| n).unwrap_or(0)
}

fn leading_int(input: &str) -> IResult<&str, i64> {
    let (input, _) = space0(input)?;
    let (input, sign) = opt(one_of("+-"))(input)?;
    let (input, digits) = digit1(input)?;

    let magnitude = digits.bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });

    Ok((input, if sign == Some('-') { -magnitude } else { magnitude }))
}

/// Characters `start..start + len` of `data`, clamped to what is there.
pub fn slice(data: &str, start: usize, len: usize) -> &str {
    let start = start.min(data.len());
    let end = start.saturating_add(len).min(data.len());
    data.get(start..end).unwrap_or("")
}

fn prefix(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}
