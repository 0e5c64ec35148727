//! Pure slot extractors. Absence of a match is `None`, never an error;
//! guards in the dialogue controller inspect the result.

use chrono::{Datelike, Duration, Local};

use crate::models::{Lexicon, SlotValue};

/// Canonical weekday names, also the fuzzy-match vocabulary.
const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const AFFIRMATIVE: [&str; 9] = [
    "yes",
    "yeah",
    "yep",
    "yup",
    "sure",
    "ok",
    "okay",
    "absolutely",
    "correct",
];

const NEGATIVE: [&str; 5] = ["no", "nope", "nah", "negative", "wrong"];

/// Maximum edit distance accepted by the fuzzy day matcher.
const FUZZY_THRESHOLD: usize = 2;

fn tokens(utterance: &str) -> Vec<String> {
    utterance
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| ",.?!;".contains(c)).to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn extract_person(lexicon: &Lexicon, utterance: &str) -> Option<String> {
    for token in tokens(utterance) {
        if let Some(values) = lexicon.lookup(&token) {
            for value in values {
                if let SlotValue::Person(person) = value {
                    return Some(person.clone());
                }
            }
        }
    }
    None
}

/// Day extraction: relative days first, then exact lexicon lookup, then a
/// fuzzy pass over the weekday vocabulary.
pub fn extract_day(lexicon: &Lexicon, utterance: &str) -> Option<String> {
    let tokens = tokens(utterance);

    for token in &tokens {
        match token.as_str() {
            "today" => return Some(weekday_name(Local::now().date_naive())),
            "tomorrow" => {
                return Some(weekday_name(Local::now().date_naive() + Duration::days(1)))
            }
            _ => {}
        }
        if let Some(values) = lexicon.lookup(token) {
            for value in values {
                if let SlotValue::Day(day) = value {
                    return Some(day.clone());
                }
            }
        }
    }

    fuzzy_day_tokens(&tokens)
}

fn weekday_name(date: chrono::NaiveDate) -> String {
    WEEKDAYS[date.weekday().num_days_from_monday() as usize].to_string()
}

/// Fuzzy weekday match over a whole utterance, used directly by tests and
/// as the fallback inside `extract_day`.
pub fn fuzzy_day(utterance: &str) -> Option<String> {
    fuzzy_day_tokens(&tokens(utterance))
}

fn fuzzy_day_tokens(tokens: &[String]) -> Option<String> {
    let mut best: Option<(usize, &str)> = None;
    for token in tokens {
        if token.len() < 4 || !token.chars().all(|c| c.is_alphabetic()) {
            continue;
        }
        for candidate in WEEKDAYS {
            let distance = levenshtein(token, &candidate.to_lowercase());
            // Strict less-than keeps the first-encountered minimum on ties.
            if best.map(|(d, _)| distance < d).unwrap_or(true) {
                best = Some((distance, candidate));
            }
        }
    }
    match best {
        Some((distance, day)) if distance <= FUZZY_THRESHOLD => Some(day.to_string()),
        _ => None,
    }
}

/// Time extraction: lexicon lookup per token, then the numeric clock
/// parser. An `am`/`pm` marker may be its own token.
pub fn extract_time(lexicon: &Lexicon, utterance: &str) -> Option<String> {
    let tokens = tokens(utterance);

    for token in &tokens {
        if let Some(values) = lexicon.lookup(token) {
            for value in values {
                if let SlotValue::Time(time) = value {
                    return Some(time.clone());
                }
            }
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1).map(|t| t.as_str());
        if let Some(time) = parse_clock_time_with_next(token, next) {
            return Some(time);
        }
    }
    None
}

/// Parse a single clock token: `HH:MM`, a 3-4 digit clock string
/// (`930` -> 09:30), a bare 1-2 digit hour, or `H:MM am/pm`.
pub fn parse_clock_time(token: &str) -> Option<String> {
    parse_clock_time_with_next(token, None)
}

fn parse_clock_time_with_next(token: &str, next: Option<&str>) -> Option<String> {
    let token = token.to_lowercase();

    // Trailing am/pm may be glued to the token ("2:30pm") or follow it.
    let (token, meridiem) = if let Some(stripped) = token.strip_suffix("am") {
        (stripped.trim().to_string(), Some(Meridiem::Am))
    } else if let Some(stripped) = token.strip_suffix("pm") {
        (stripped.trim().to_string(), Some(Meridiem::Pm))
    } else {
        let meridiem = match next {
            Some("am") => Some(Meridiem::Am),
            Some("pm") => Some(Meridiem::Pm),
            _ => None,
        };
        (token, meridiem)
    };

    let (hour, minute) = if let Some((h, m)) = token.split_once(':') {
        (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?)
    } else if token.chars().all(|c| c.is_ascii_digit()) {
        match token.len() {
            1 | 2 => (token.parse::<u32>().ok()?, 0),
            3 | 4 => {
                let split = token.len() - 2;
                (token[..split].parse().ok()?, token[split..].parse().ok()?)
            }
            _ => return None,
        }
    } else {
        return None;
    };

    let hour = match meridiem {
        Some(Meridiem::Am) if hour == 12 => 0,
        Some(Meridiem::Am) if hour < 12 => hour,
        Some(Meridiem::Pm) if hour == 12 => 12,
        Some(Meridiem::Pm) if hour < 12 => hour + 12,
        Some(_) => return None,
        None => hour,
    };

    if hour > 23 || minute > 59 {
        return None;
    }
    Some(format!("{hour:02}:{minute:02}"))
}

#[derive(Clone, Copy)]
enum Meridiem {
    Am,
    Pm,
}

/// Yes/no membership test against two fixed, disjoint word sets.
pub fn extract_confirmation(utterance: &str) -> Option<bool> {
    for token in tokens(utterance) {
        if AFFIRMATIVE.contains(&token.as_str()) {
            return Some(true);
        }
        if NEGATIVE.contains(&token.as_str()) {
            return Some(false);
        }
    }
    None
}

/// Classic two-row Levenshtein edit distance.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lexicon;

    fn lexicon() -> Lexicon {
        Lexicon::default_table().unwrap()
    }

    #[test]
    fn test_extract_person_exact() {
        assert_eq!(
            extract_person(&lexicon(), "vlad"),
            Some("Vladislav Maraev".to_string())
        );
        assert_eq!(
            extract_person(&lexicon(), "I want to see VLAD please"),
            Some("Vladislav Maraev".to_string())
        );
        assert_eq!(extract_person(&lexicon(), "xyz"), None);
    }

    #[test]
    fn test_extract_day_case_insensitive() {
        assert_eq!(
            extract_day(&lexicon(), "MONDAY"),
            extract_day(&lexicon(), "monday")
        );
        assert_eq!(
            extract_day(&lexicon(), "maybe on friday?"),
            Some("Friday".to_string())
        );
    }

    #[test]
    fn test_today_tomorrow_resolve_to_adjacent_weekdays() {
        let lexicon = lexicon();
        let today = extract_day(&lexicon, "today").unwrap();
        let tomorrow = extract_day(&lexicon, "let's meet tomorrow").unwrap();
        let index = |day: &str| WEEKDAYS.iter().position(|w| *w == day).unwrap();
        assert_eq!((index(&today) + 1) % 7, index(&tomorrow));
    }

    #[test]
    fn test_fuzzy_day() {
        assert_eq!(fuzzy_day("mnday"), Some("Monday".to_string()));
        assert_eq!(fuzzy_day("xyzxyz"), None);
        // Tokens shorter than 4 alphabetic chars are skipped.
        assert_eq!(fuzzy_day("mon"), None);
    }

    #[test]
    fn test_extract_day_fuzzy_fallback() {
        assert_eq!(
            extract_day(&lexicon(), "on tusday maybe"),
            Some("Tuesday".to_string())
        );
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(parse_clock_time("14:30"), Some("14:30".to_string()));
        assert_eq!(parse_clock_time("1430"), Some("14:30".to_string()));
        assert_eq!(parse_clock_time("930"), Some("09:30".to_string()));
        assert_eq!(parse_clock_time("1345"), Some("13:45".to_string()));
        assert_eq!(parse_clock_time("9"), Some("09:00".to_string()));
        assert_eq!(parse_clock_time("25:00"), None);
        assert_eq!(parse_clock_time("2:75"), None);
        assert_eq!(parse_clock_time("noonish"), None);
    }

    #[test]
    fn test_parse_clock_time_meridiem() {
        assert_eq!(
            parse_clock_time_with_next("2:30", Some("pm")),
            Some("14:30".to_string())
        );
        assert_eq!(parse_clock_time("2:30pm"), Some("14:30".to_string()));
        assert_eq!(
            parse_clock_time_with_next("12", Some("am")),
            Some("00:00".to_string())
        );
        assert_eq!(
            parse_clock_time_with_next("12", Some("pm")),
            Some("12:00".to_string())
        );
        // A meridiem on an already 24-hour value is unparseable.
        assert_eq!(parse_clock_time_with_next("14:30", Some("pm")), None);
    }

    #[test]
    fn test_extract_time_from_sentence() {
        assert_eq!(
            extract_time(&lexicon(), "let's say 2:30 pm"),
            Some("14:30".to_string())
        );
        // Lexicon entry wins for bare in-table hours.
        assert_eq!(
            extract_time(&lexicon(), "at 14 maybe"),
            Some("14:00".to_string())
        );
        assert_eq!(extract_time(&lexicon(), "whenever"), None);
    }

    #[test]
    fn test_confirmation_words() {
        assert_eq!(extract_confirmation("yes"), Some(true));
        assert_eq!(extract_confirmation("Yeah, sure!"), Some(true));
        assert_eq!(extract_confirmation("nope"), Some(false));
        assert_eq!(extract_confirmation("perhaps"), None);
    }

    #[test]
    fn test_yes_no_sets_disjoint() {
        for word in AFFIRMATIVE {
            assert!(!NEGATIVE.contains(&word), "{word} appears in both sets");
        }
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("monday", "monday"), 0);
        assert_eq!(levenshtein("mnday", "monday"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }
}
