//! Token-pattern date formatting and parsing.
//!
//! Formatted date strings are an external contract — they get persisted and
//! redisplayed — so the token set is fixed and documented here:
//!
//! | Token  | Meaning            | Formatted as |
//! |--------|--------------------|--------------|
//! | `yyyy` | year               | 4 digits     |
//! | `MM`   | month              | 2 digits     |
//! | `M`    | month              | 1–2 digits   |
//! | `dd`   | day of month       | 2 digits     |
//! | `d`    | day of month       | 1–2 digits   |
//! | `HH`   | hour (24h)         | 2 digits     |
//! | `H`    | hour (24h)         | 1–2 digits   |
//! | `mm`   | minute             | 2 digits     |
//! | `m`    | minute             | 1–2 digits   |
//! | `ss`   | second             | 2 digits     |
//! | `s`    | second             | 1–2 digits   |
//!
//! Any other character is a literal. Parsing is strict: padded tokens consume
//! exactly their width, literals must match, leftover input fails, and parsed
//! fields are range-checked rather than normalized ("2024-02-31" is a parse
//! failure, not March 2). Fields the pattern does not encode default to
//! 1970-01-01 00:00:00, so `parse(format(v, p), p)` returns `v` truncated to
//! the fields `p` encodes.

use crate::value::{days_in_month, DateValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// A date field and whether it is zero-padded (two-letter form).
    Field(Field, bool),
    Literal(char),
}

/// Lex a pattern into tokens. Runs of the same field letter collapse into a
/// single token: one letter is unpadded, two or more is the padded form
/// (`yyyy` is simply the conventional spelling of the padded year).
fn lex(pat: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = pat.chars().peekable();
    while let Some(c) = chars.next() {
        let field = match c {
            'y' => Some(Field::Year),
            'M' => Some(Field::Month),
            'd' => Some(Field::Day),
            'H' => Some(Field::Hour),
            'm' => Some(Field::Minute),
            's' => Some(Field::Second),
            _ => None,
        };
        match field {
            Some(f) => {
                let mut run = 1;
                while chars.peek() == Some(&c) {
                    chars.next();
                    run += 1;
                }
                tokens.push(Token::Field(f, run >= 2));
            }
            None => tokens.push(Token::Literal(c)),
        }
    }
    tokens
}

/// Render `value` through `pat`.
pub fn format(value: DateValue, pat: &str) -> String {
    let mut out = String::with_capacity(pat.len());
    for token in lex(pat) {
        match token {
            Token::Literal(c) => out.push(c),
            Token::Field(field, padded) => {
                let n = match field {
                    Field::Year => {
                        out.push_str(&format!("{:04}", value.year()));
                        continue;
                    }
                    Field::Month => value.month(),
                    Field::Day => value.day(),
                    Field::Hour => value.hour(),
                    Field::Minute => value.minute(),
                    Field::Second => value.second(),
                };
                if padded {
                    out.push_str(&format!("{n:02}"));
                } else {
                    out.push_str(&format!("{n}"));
                }
            }
        }
    }
    out
}

/// Parse `text` against `pat`. Returns `None` on any mismatch — never errors.
pub fn parse(text: &str, pat: &str) -> Option<DateValue> {
    let mut input = text.chars().peekable();
    let mut year: i32 = 1970;
    let mut month: u32 = 1;
    let mut day: u32 = 1;
    let mut hour: u32 = 0;
    let mut minute: u32 = 0;
    let mut second: u32 = 0;

    for token in lex(pat) {
        match token {
            Token::Literal(c) => {
                if input.next() != Some(c) {
                    return None;
                }
            }
            Token::Field(field, padded) => {
                let width = match (field, padded) {
                    (Field::Year, _) => 4,
                    (_, true) => 2,
                    (_, false) => 2, // unpadded: up to two digits
                };
                let exact = padded || field == Field::Year;
                let mut digits = String::new();
                while digits.len() < width {
                    match input.peek() {
                        Some(c) if c.is_ascii_digit() => {
                            digits.push(*c);
                            input.next();
                        }
                        _ => break,
                    }
                }
                if digits.is_empty() || (exact && digits.len() != width) {
                    return None;
                }
                let n: u32 = digits.parse().ok()?;
                match field {
                    Field::Year => year = i32::try_from(n).ok()?,
                    Field::Month => month = n,
                    Field::Day => day = n,
                    Field::Hour => hour = n,
                    Field::Minute => minute = n,
                    Field::Second => second = n,
                }
            }
        }
    }
    if input.next().is_some() {
        return None;
    }

    // Strict range checks: a parse never normalizes.
    if !(1..=12).contains(&month) || hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    if day < 1 || day > days_in_month(year, month)? {
        return None;
    }

    DateValue::from_fields(
        year,
        month as i32,
        day as i32,
        hour as i32,
        minute as i32,
        second as i32,
    )
    .ok()
}
