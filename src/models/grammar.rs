use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One semantic value a lexicon key can map to. Tagged per slot kind so
/// extraction results are exhaustively checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum SlotValue {
    Person(String),
    Day(String),
    Time(String),
    Confirmation(bool),
}

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("duplicate lexicon key: {0}")]
    DuplicateKey(String),
}

/// Static keyword-to-slot lookup table. Built once at startup, read-only
/// afterwards. Keys are lower-cased words or short phrases.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: HashMap<String, Vec<SlotValue>>,
}

impl Lexicon {
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder {
            entries: HashMap::new(),
            duplicate: None,
        }
    }

    /// Case-insensitive exact match.
    pub fn lookup(&self, word: &str) -> Option<&[SlotValue]> {
        self.entries.get(&word.to_lowercase()).map(|v| v.as_slice())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&word.to_lowercase())
    }

    /// All keys, sorted. Handed to the speech actor as recognition hints.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// The built-in booking grammar: known people, weekdays, bare hours
    /// and yes/no.
    pub fn default_table() -> Result<Self, LexiconError> {
        let mut builder = Self::builder()
            .entry("yes", vec![SlotValue::Confirmation(true)])
            .entry("no", vec![SlotValue::Confirmation(false)])
            .entry("vlad", vec![SlotValue::Person("Vladislav Maraev".into())])
            .entry("bora", vec![SlotValue::Person("Bora Kara".into())])
            .entry("tal", vec![SlotValue::Person("Talha Bedir".into())])
            .entry("tom", vec![SlotValue::Person("Tom Södahl Bladsjö".into())])
            .entry("charles", vec![SlotValue::Person("Charles".into())])
            .entry("doctor", vec![SlotValue::Person("the doctor".into())]);

        for day in [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ] {
            builder = builder.entry(&day.to_lowercase(), vec![SlotValue::Day(day.into())]);
        }

        for hour in 8..=15u32 {
            builder = builder.entry(
                &hour.to_string(),
                vec![SlotValue::Time(format!("{hour:02}:00"))],
            );
        }

        builder.build()
    }
}

pub struct LexiconBuilder {
    entries: HashMap<String, Vec<SlotValue>>,
    duplicate: Option<String>,
}

impl LexiconBuilder {
    /// Register a key with its slot values. A key may carry several values,
    /// but registering the same key twice is a configuration error reported
    /// at `build`.
    pub fn entry(mut self, key: &str, values: Vec<SlotValue>) -> Self {
        let key = key.to_lowercase();
        if self.entries.insert(key.clone(), values).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(key);
        }
        self
    }

    pub fn build(self) -> Result<Lexicon, LexiconError> {
        if let Some(key) = self.duplicate {
            return Err(LexiconError::DuplicateKey(key));
        }
        Ok(Lexicon {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let lexicon = Lexicon::default_table().unwrap();
        assert_eq!(lexicon.lookup("MONDAY"), lexicon.lookup("monday"));
        assert!(lexicon.lookup("monday").is_some());
    }

    #[test]
    fn test_lookup_miss() {
        let lexicon = Lexicon::default_table().unwrap();
        assert!(lexicon.lookup("xyzxyz").is_none());
        assert!(!lexicon.contains("xyzxyz"));
        assert!(lexicon.contains("Tuesday"));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = Lexicon::builder()
            .entry("ok", vec![SlotValue::Confirmation(true)])
            .entry("OK", vec![SlotValue::Person("Oscar Kilo".into())])
            .build();
        assert!(matches!(result, Err(LexiconError::DuplicateKey(k)) if k == "ok"));
    }

    #[test]
    fn test_default_table_builds() {
        let lexicon = Lexicon::default_table().unwrap();
        assert_eq!(
            lexicon.lookup("vlad"),
            Some(&[SlotValue::Person("Vladislav Maraev".into())][..])
        );
        assert_eq!(
            lexicon.lookup("14"),
            Some(&[SlotValue::Time("14:00".into())][..])
        );
    }
}
