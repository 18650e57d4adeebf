//! Keyword, count and date extraction from transcribed utterances.
//!
//! Every extractor is a pure function over the raw text; "no match" is `None`.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;

use crate::models::ServiceKind;

pub const DOMAIN_KEYWORDS: [&str; 4] = ["room", "hotel", "hall", "conference"];

const NUMBER_WORDS: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty",
];

const MONTHS: [(&str, u32); 24] = [
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{4})[-/]([0-9]{1,2})[-/]([0-9]{1,2})\b").unwrap());

static NUMERIC_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9]{1,2})[-/]([0-9]{1,2})(?:[-/]([0-9]{4}|[0-9]{2}))?\b").unwrap()
});

static IN_DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bin (\w+) days?\b").unwrap());

static DAYS_FROM_NOW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\w+) days? from (?:now|today)\b").unwrap());

pub fn is_in_domain(text: &str) -> bool {
    let text = text.to_lowercase();
    DOMAIN_KEYWORDS.iter().any(|k| text.contains(k))
}

/// Picks the service for an in-domain greeting. "room" wins over "hall"; the
/// generic words map to the service they usually mean.
pub fn classify_service(text: &str) -> Option<ServiceKind> {
    let text = text.to_lowercase();
    if text.contains("room") {
        Some(ServiceKind::Room)
    } else if text.contains("hall") || text.contains("conference") {
        Some(ServiceKind::Hall)
    } else if text.contains("hotel") {
        Some(ServiceKind::Room)
    } else {
        None
    }
}

/// First digit run, else the first number word between zero and twenty.
pub fn extract_count(text: &str) -> Option<u32> {
    if let Some(m) = DIGITS_RE.find(text) {
        return m.as_str().parse().ok();
    }

    let text = text.to_lowercase();
    text.split(|c: char| !c.is_alphanumeric())
        .find_map(number_word)
}

fn number_word(token: &str) -> Option<u32> {
    NUMBER_WORDS
        .iter()
        .position(|w| *w == token)
        .map(|n| n as u32)
}

/// Permissive date parsing with a literal "tomorrow" fallback.
pub fn extract_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let text = text.to_lowercase();
    parse_fuzzy_date(&text, today).or_else(|| {
        text.contains("tomorrow")
            .then(|| today + Duration::days(1))
    })
}

/// Finds a date phrase embedded anywhere in `text`, resolving relative and
/// yearless phrases against `today`.
pub fn parse_fuzzy_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Some(caps) = ISO_DATE_RE.captures(text) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = NUMERIC_DATE_RE.captures(text) {
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let year = match caps.get(3) {
            Some(y) if y.as_str().len() == 2 => 2000 + y.as_str().parse::<i32>().ok()?,
            Some(y) => y.as_str().parse().ok()?,
            None => today.year(),
        };
        // Month first unless the first field cannot be a month.
        let (month, day) = if first > 12 { (second, first) } else { (first, second) };
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let cleaned: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    month_phrase(&tokens, today)
        .or_else(|| relative_phrase(text, &tokens, today))
        .or_else(|| ordinal_day(&tokens, today))
        .or_else(|| weekday_phrase(&tokens, today))
}

fn month_number(token: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, n)| *n)
}

/// Parses "20", "20th", "1st"; the flag reports whether an ordinal suffix was present.
fn parse_day(token: &str) -> Option<(u32, bool)> {
    let digits = token.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &token[digits.len()..];
    if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !matches!(suffix, "" | "st" | "nd" | "rd" | "th") {
        return None;
    }
    let day: u32 = digits.parse().ok()?;
    (1..=31).contains(&day).then_some((day, !suffix.is_empty()))
}

fn parse_year(token: &str) -> Option<i32> {
    if token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

/// "october 20th 2026", "oct the 20th", "20 october", "the 5th of march 2027".
fn month_phrase(tokens: &[&str], today: NaiveDate) -> Option<NaiveDate> {
    for (i, token) in tokens.iter().enumerate() {
        let Some(month) = month_number(token) else {
            continue;
        };

        let mut j = i + 1;
        if tokens.get(j) == Some(&"the") {
            j += 1;
        }
        if let Some((day, _)) = tokens.get(j).and_then(|t| parse_day(t)) {
            let year = tokens
                .get(j + 1)
                .and_then(|t| parse_year(t))
                .unwrap_or(today.year());
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(date);
            }
        }

        let mut k = i;
        if k > 0 && tokens[k - 1] == "of" {
            k -= 1;
        }
        if k > 0 {
            if let Some((day, _)) = parse_day(tokens[k - 1]) {
                let year = tokens
                    .get(i + 1)
                    .and_then(|t| parse_year(t))
                    .unwrap_or(today.year());
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                    return Some(date);
                }
            }
        }
    }
    None
}

// Plain "tomorrow" is left to the fallback in `extract_date`.
fn relative_phrase(text: &str, tokens: &[&str], today: NaiveDate) -> Option<NaiveDate> {
    if text.contains("day after tomorrow") {
        return Some(today + Duration::days(2));
    }

    let offset_days = IN_DAYS_RE
        .captures(text)
        .or_else(|| DAYS_FROM_NOW_RE.captures(text))
        .and_then(|caps| {
            let amount = &caps[1];
            amount.parse::<u32>().ok().or_else(|| number_word(amount))
        });
    if let Some(days) = offset_days {
        // Offsets past the calendar clamp to its end; the range check rejects them.
        let date = Duration::try_days(i64::from(days))
            .and_then(|offset| today.checked_add_signed(offset))
            .unwrap_or(NaiveDate::MAX);
        return Some(date);
    }

    if text.contains("next week") || text.contains("in a week") {
        return Some(today + Duration::days(7));
    }

    tokens.iter().find_map(|token| match *token {
        "today" | "tonight" => Some(today),
        "yesterday" => Some(today - Duration::days(1)),
        _ => None,
    })
}

/// "the 20th" on its own means that day of the current month. An ordinal next to a
/// month name already failed as a calendar date and is not reused.
fn ordinal_day(tokens: &[&str], today: NaiveDate) -> Option<NaiveDate> {
    tokens.iter().enumerate().find_map(|(i, token)| {
        let near_month = tokens[i.saturating_sub(2)..tokens.len().min(i + 3)]
            .iter()
            .any(|t| month_number(t).is_some());
        match parse_day(token) {
            Some((day, true)) if !near_month => {
                NaiveDate::from_ymd_opt(today.year(), today.month(), day)
            }
            _ => None,
        }
    })
}

fn weekday_phrase(tokens: &[&str], today: NaiveDate) -> Option<NaiveDate> {
    for (i, token) in tokens.iter().enumerate() {
        if token.len() < 3 {
            continue;
        }
        let Ok(weekday) = token.parse::<Weekday>() else {
            continue;
        };
        let strictly_after = i > 0 && tokens[i - 1] == "next";
        return Some(next_weekday(today, weekday, strictly_after));
    }
    None
}

fn next_weekday(today: NaiveDate, weekday: Weekday, strictly_after: bool) -> NaiveDate {
    let current = today.weekday().num_days_from_monday();
    let target = weekday.num_days_from_monday();
    let mut ahead = (target + 7 - current) % 7;
    if ahead == 0 && strictly_after {
        ahead = 7;
    }
    today + Duration::days(i64::from(ahead))
}

#[cfg(test)]
mod tests {
    use super::*;

    // A Saturday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_domain_keywords() {
        assert!(is_in_domain("i want to book a room"));
        assert!(is_in_domain("Conference please"));
        assert!(!is_in_domain("i want a pizza"));
    }

    #[test]
    fn test_classify_service() {
        assert_eq!(classify_service("book a room"), Some(ServiceKind::Room));
        assert_eq!(classify_service("an event hall"), Some(ServiceKind::Hall));
        assert_eq!(classify_service("conference room"), Some(ServiceKind::Room));
        assert_eq!(classify_service("i need a conference"), Some(ServiceKind::Hall));
        assert_eq!(classify_service("a hotel please"), Some(ServiceKind::Room));
        assert_eq!(classify_service("pizza"), None);
    }

    #[test]
    fn test_count_prefers_digits() {
        assert_eq!(extract_count("we are 12 people"), Some(12));
        assert_eq!(extract_count("3 or four"), Some(3));
    }

    #[test]
    fn test_count_words() {
        assert_eq!(extract_count("two"), Some(2));
        assert_eq!(extract_count("maybe twenty guests"), Some(20));
        assert_eq!(extract_count("zero"), Some(0));
        assert_eq!(extract_count("someone"), None);
        assert_eq!(extract_count("a few"), None);
    }

    #[test]
    fn test_count_ignores_non_ascii_digits() {
        assert_eq!(extract_count("\u{663} rooms"), None);
        assert_eq!(extract_count("\u{663} or two"), Some(2));
    }

    #[test]
    fn test_huge_day_offsets_clamp() {
        assert_eq!(extract_date("in 99999999 days", today()), Some(NaiveDate::MAX));
        assert_eq!(
            extract_date("4000000000 days from now", today()),
            Some(NaiveDate::MAX)
        );
    }

    #[test]
    fn test_count_overflow_is_no_match() {
        assert_eq!(extract_count("99999999999999999999"), None);
    }

    #[test]
    fn test_tomorrow_fallback() {
        assert_eq!(extract_date("tomorrow", today()), Some(date(2026, 10, 18)));
        assert_eq!(extract_date("from tomorrow please", today()), Some(date(2026, 10, 18)));
    }

    #[test]
    fn test_relative_words() {
        assert_eq!(extract_date("yesterday", today()), Some(date(2026, 10, 16)));
        assert_eq!(extract_date("today", today()), Some(today()));
        assert_eq!(extract_date("the day after tomorrow", today()), Some(date(2026, 10, 19)));
        assert_eq!(extract_date("in 3 days", today()), Some(date(2026, 10, 20)));
        assert_eq!(extract_date("five days from now", today()), Some(date(2026, 10, 22)));
        assert_eq!(extract_date("next week", today()), Some(date(2026, 10, 24)));
    }

    #[test]
    fn test_iso_and_numeric_dates() {
        assert_eq!(extract_date("on 2026-11-02", today()), Some(date(2026, 11, 2)));
        assert_eq!(extract_date("2027/01/15", today()), Some(date(2027, 1, 15)));
        assert_eq!(extract_date("11/02/2026", today()), Some(date(2026, 11, 2)));
        assert_eq!(extract_date("25/12/26", today()), Some(date(2026, 12, 25)));
        assert_eq!(extract_date("12/5", today()), Some(date(2026, 12, 5)));
    }

    #[test]
    fn test_month_phrases() {
        assert_eq!(extract_date("october 20th 2026", today()), Some(date(2026, 10, 20)));
        assert_eq!(extract_date("october 20, 2026", today()), Some(date(2026, 10, 20)));
        assert_eq!(extract_date("check in on the 5th of march 2027", today()), Some(date(2027, 3, 5)));
        assert_eq!(extract_date("20 nov", today()), Some(date(2026, 11, 20)));
        assert_eq!(extract_date("dec the 1st", today()), Some(date(2026, 12, 1)));
    }

    #[test]
    fn test_may_as_verb_is_skipped() {
        assert_eq!(
            extract_date("may i come on the 2nd of november", today()),
            Some(date(2026, 11, 2))
        );
    }

    #[test]
    fn test_ordinal_day_uses_current_month() {
        assert_eq!(extract_date("the 25th", today()), Some(date(2026, 10, 25)));
    }

    #[test]
    fn test_weekdays() {
        assert_eq!(extract_date("monday", today()), Some(date(2026, 10, 19)));
        assert_eq!(extract_date("saturday", today()), Some(today()));
        assert_eq!(extract_date("next saturday", today()), Some(date(2026, 10, 24)));
    }

    #[test]
    fn test_impossible_dates_do_not_match() {
        assert_eq!(extract_date("february 30th", today()), None);
        assert_eq!(extract_date("2026-13-01", today()), None);
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_date("whenever you like", today()), None);
        assert_eq!(extract_date("john smith", today()), None);
    }
}
