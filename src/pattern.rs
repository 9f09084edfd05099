//!
//! Date layouts.
//!
//! Layouts use the letter-run notation popularised by `SimpleDateFormat`:
//!
//! - a run of the same ASCII letter is a field, its length selects the width
//!   (or the textual form for month, weekday and zone names),
//! - text between single quotes is copied verbatim,
//! - `''` is a literal quote, inside or outside quoted text,
//! - any other character is copied verbatim.
//!
//! A layout is compiled once into a token list. Rendering only reads that
//! list, so a compiled [`Pattern`](Pattern) can be shared across threads.
//!
use crate::{date::DEFAULT_FORMAT, error::PatternError};
use chrono::{DateTime, Datelike, Timelike, Utc};
use log::debug;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Era,
    Year,
    Month,
    DayOfMonth,
    DayOfYear,
    Weekday,
    WeekdayNumber,
    AmPm,
    Hour0To23,
    Hour1To24,
    Hour0To11,
    Hour1To12,
    Minute,
    Second,
    Millisecond,
    ZoneName,
    Rfc822Zone,
    IsoZone,
}

impl Field {
    fn lookup(ch: char) -> Option<Self> {
        let field = match ch {
            'G' => Field::Era,
            'y' => Field::Year,
            'M' | 'L' => Field::Month,
            'd' => Field::DayOfMonth,
            'D' => Field::DayOfYear,
            'E' => Field::Weekday,
            'u' => Field::WeekdayNumber,
            'a' => Field::AmPm,
            'H' => Field::Hour0To23,
            'k' => Field::Hour1To24,
            'K' => Field::Hour0To11,
            'h' => Field::Hour1To12,
            'm' => Field::Minute,
            's' => Field::Second,
            'S' => Field::Millisecond,
            'z' => Field::ZoneName,
            'Z' => Field::Rfc822Zone,
            'X' => Field::IsoZone,
            _ => return None,
        };

        Some(field)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Literal(String),
    Field(Field, usize),
}

/// A compiled date layout, always rendered in UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    pub fn compile(raw: &str) -> Result<Self, PatternError> {
        let chars = raw.chars().collect::<Vec<_>>();
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut idx = 0;

        while idx < chars.len() {
            let ch = chars[idx];

            if ch == '\'' {
                if chars.get(idx + 1) == Some(&'\'') {
                    literal.push('\'');
                    idx += 2;
                    continue;
                }

                // quoted text runs until the next lone quote
                let start = idx;
                idx += 1;
                loop {
                    match chars.get(idx) {
                        None => return Err(PatternError::UnterminatedQuote(start)),
                        Some('\'') if chars.get(idx + 1) == Some(&'\'') => {
                            literal.push('\'');
                            idx += 2;
                        }
                        Some('\'') => {
                            idx += 1;
                            break;
                        }
                        Some(c) => {
                            literal.push(*c);
                            idx += 1;
                        }
                    }
                }
            } else if ch.is_ascii_alphabetic() {
                let field = Field::lookup(ch).ok_or(PatternError::IllegalCharacter(ch, idx))?;
                let width = chars[idx..].iter().take_while(|c| **c == ch).count();

                if field == Field::IsoZone && width > 3 {
                    return Err(PatternError::UnsupportedWidth(ch, width));
                }

                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Field(field, width));
                idx += width;
            } else {
                literal.push(ch);
                idx += 1;
            }
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        debug!("compiled date pattern {:?} into {} tokens", raw, tokens.len());

        Ok(Self {
            source: String::from(raw),
            tokens,
        })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Appends `value` laid out by this pattern to `out`.
    pub fn render(&self, value: &DateTime<Utc>, out: &mut String) {
        for token in &self.tokens {
            match token {
                Token::Literal(s) => out.push_str(s),
                Token::Field(field, width) => render_field(*field, *width, value, out),
            }
        }
    }
}

impl Default for Pattern {
    /// `yyyy-MM-dd'T'HH:mm:ss'Z'`
    fn default() -> Self {
        let literal = |s: &str| Token::Literal(String::from(s));
        Self {
            source: String::from(DEFAULT_FORMAT),
            tokens: vec![
                Token::Field(Field::Year, 4),
                literal("-"),
                Token::Field(Field::Month, 2),
                literal("-"),
                Token::Field(Field::DayOfMonth, 2),
                literal("T"),
                Token::Field(Field::Hour0To23, 2),
                literal(":"),
                Token::Field(Field::Minute, 2),
                literal(":"),
                Token::Field(Field::Second, 2),
                literal("Z"),
            ],
        }
    }
}

fn pad(out: &mut String, v: i64, width: usize) {
    // writing into a String never fails
    let _ = write!(out, "{:0width$}", v, width = width);
}

// month and weekday names come from chrono's English tables
fn text(out: &mut String, value: &DateTime<Utc>, spec: &str) {
    let _ = write!(out, "{}", value.format(spec));
}

fn render_field(field: Field, width: usize, value: &DateTime<Utc>, out: &mut String) {
    match field {
        Field::Era => out.push_str(if value.year_ce().0 { "AD" } else { "BC" }),
        // year of era, so 1 BC is year 1 and never signed
        Field::Year => {
            let year = i64::from(value.year_ce().1);
            if width == 2 {
                pad(out, year % 100, 2)
            } else {
                pad(out, year, width)
            }
        }
        Field::Month => match width {
            1 | 2 => pad(out, i64::from(value.month()), width),
            3 => text(out, value, "%b"),
            _ => text(out, value, "%B"),
        },
        Field::DayOfMonth => pad(out, i64::from(value.day()), width),
        Field::DayOfYear => pad(out, i64::from(value.ordinal()), width),
        Field::Weekday => {
            if width >= 4 {
                text(out, value, "%A")
            } else {
                text(out, value, "%a")
            }
        }
        Field::WeekdayNumber => pad(out, i64::from(value.weekday().number_from_monday()), width),
        Field::AmPm => out.push_str(if value.hour() < 12 { "AM" } else { "PM" }),
        Field::Hour0To23 => pad(out, i64::from(value.hour()), width),
        Field::Hour1To24 => {
            let hour = value.hour();
            pad(out, i64::from(if hour == 0 { 24 } else { hour }), width)
        }
        Field::Hour0To11 => pad(out, i64::from(value.hour() % 12), width),
        Field::Hour1To12 => pad(out, i64::from(value.hour12().1), width),
        Field::Minute => pad(out, i64::from(value.minute()), width),
        Field::Second => pad(out, i64::from(value.second()), width),
        // leap-second nanos go past 999
        Field::Millisecond => pad(out, i64::from(value.timestamp_subsec_millis().min(999)), width),
        Field::ZoneName => {
            if width >= 4 {
                out.push_str("Coordinated Universal Time")
            } else {
                out.push_str("UTC")
            }
        }
        Field::Rfc822Zone => out.push_str("+0000"),
        Field::IsoZone => out.push('Z'),
    }
}

#[cfg(test)]
mod test {
    use super::Pattern;
    use crate::{date::DEFAULT_FORMAT, error::PatternError};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn render(pattern: &str, value: &DateTime<Utc>) -> String {
        let mut out = String::new();
        Pattern::compile(pattern).unwrap().render(value, &mut out);
        out
    }

    #[test]
    fn test_iso_layout() {
        let t = at(2024, 1, 2, 3, 4, 5);
        assert_eq!(render("yyyy-MM-dd'T'HH:mm:ss'Z'", &t), "2024-01-02T03:04:05Z");
    }

    #[test]
    fn test_text_fields() {
        // 2024-06-01 is a Saturday
        let t = at(2024, 6, 1, 15, 0, 0);
        assert_eq!(render("EEE, d MMM yy", &t), "Sat, 1 Jun 24");
        assert_eq!(render("EEEE MMMM G", &t), "Saturday June AD");
        assert_eq!(render("h:mm a z Z X", &t), "3:00 PM UTC +0000 Z");
        assert_eq!(render("D u k K", &t), "153 6 15 3");
    }

    #[test]
    fn test_midnight_hours() {
        let t = at(2024, 6, 1, 0, 7, 0);
        assert_eq!(render("HH kk KK hh a", &t), "00 24 00 12 AM");
    }

    #[test]
    fn test_milliseconds() {
        let t = Utc.timestamp_millis_opt(1_717_243_200_042).unwrap();
        assert_eq!(render("ss.SSS", &t), "00.042");
    }

    #[test]
    fn test_quotes() {
        let t = at(2024, 6, 1, 12, 0, 0);
        assert_eq!(render("''yyyy''", &t), "'2024'");
        assert_eq!(render("'o''clock' HH", &t), "o'clock 12");
        assert_eq!(render("", &t), "");
    }

    #[test]
    fn test_years_before_common_era() {
        // proleptic year 0 is 1 BC, -5 is 6 BC
        let zero = at(0, 1, 1, 0, 0, 0);
        assert_eq!(render("G yyyy", &zero), "BC 0001");
        assert_eq!(render("yy", &zero), "01");

        let minus_five = at(-5, 1, 1, 0, 0, 0);
        assert_eq!(
            render("yyyy-MM-dd'T'HH:mm:ss'Z'", &minus_five),
            "0006-01-01T00:00:00Z"
        );
        assert_eq!(render("G y", &minus_five), "BC 6");
        assert_eq!(render("G yyyy", &at(1, 1, 1, 0, 0, 0)), "AD 0001");
    }

    #[test]
    fn test_all_month_and_weekday_names() {
        let months = (1..=12)
            .map(|m| render("MMM MMMM", &at(2024, m, 1, 0, 0, 0)))
            .collect::<Vec<_>>();
        assert_eq!(months[0], "Jan January");
        assert_eq!(months[8], "Sep September");
        assert_eq!(months[11], "Dec December");

        // 2024-01-01 is a Monday
        let days = (1..=7)
            .map(|d| render("EEE EEEE", &at(2024, 1, d, 0, 0, 0)))
            .collect::<Vec<_>>();
        assert_eq!(days[0], "Mon Monday");
        assert_eq!(days[2], "Wed Wednesday");
        assert_eq!(days[6], "Sun Sunday");
    }

    #[test]
    fn test_default_matches_compiled() {
        assert_eq!(Pattern::default(), Pattern::compile(DEFAULT_FORMAT).unwrap());
    }

    #[test]
    fn test_malformed_patterns() {
        assert_eq!(
            Pattern::compile("yyyy-MM-dd'T"),
            Err(PatternError::UnterminatedQuote(10))
        );
        assert_eq!(
            Pattern::compile("yyyy-qq"),
            Err(PatternError::IllegalCharacter('q', 5))
        );
        assert_eq!(
            Pattern::compile("HH:mmXXXX"),
            Err(PatternError::UnsupportedWidth('X', 4))
        );
    }
}
