//! Translator configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::translator::TranslatorError;

/// Tunable parts of the translation tables.
///
/// Missing fields in JSON fall back to their defaults, so a config file only
/// needs to mention what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Number of spaces a tab expands to
    pub spaces_per_tab: usize,

    /// Word fragments split out of unknown words, earliest match first
    pub fragments: Vec<String>,

    /// Whole words replaced by their abbreviation before translation
    pub abbreviations: BTreeMap<String, String>,

    /// Steps a run may take per input character
    pub step_budget_per_char: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        let abbreviations = [
            ("tomorrow", "tm"),
            ("friend", "fr"),
            ("little", "ll"),
            ("you", "y"),
            ("like", "l"),
            ("him", "hm"),
        ]
        .into_iter()
        .map(|(word, short)| (word.to_string(), short.to_string()))
        .collect();

        Self {
            spaces_per_tab: 2,
            fragments: vec!["ed".to_string(), "ing".to_string()],
            abbreviations,
            step_budget_per_char: 16,
        }
    }
}

impl TranslatorConfig {
    pub fn from_json(json: &str) -> Result<Self, TranslatorError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, TranslatorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Steps a run may take per input character.
    ///
    /// An abbreviation re-queues its whole expansion, so the base budget is
    /// scaled by the longest one.
    pub fn steps_per_char(&self) -> usize {
        let longest = self
            .abbreviations
            .values()
            .map(|short| short.chars().count())
            .max()
            .unwrap_or(1)
            .max(1);
        self.step_budget_per_char
            .saturating_add(self.spaces_per_tab)
            .saturating_mul(longest)
    }

    /// Reject entries that can never make progress.
    pub fn check(&self) -> Result<(), TranslatorError> {
        if let Some(fragment) = self.fragments.iter().find(|f| f.is_empty()) {
            return Err(TranslatorError::InvalidConfig(format!(
                "empty fragment {fragment:?}"
            )));
        }

        for (word, short) in &self.abbreviations {
            if word.is_empty() || short.is_empty() {
                return Err(TranslatorError::InvalidConfig(format!(
                    "abbreviation {word:?} -> {short:?} has an empty side"
                )));
            }
            if word == short {
                return Err(TranslatorError::InvalidConfig(format!(
                    "abbreviation {word:?} maps to itself"
                )));
            }
        }

        if self.step_budget_per_char == 0 {
            return Err(TranslatorError::InvalidConfig(
                "step_budget_per_char must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_standard_tables() {
        let config = TranslatorConfig::default();
        assert_eq!(config.spaces_per_tab, 2);
        assert_eq!(config.fragments, vec!["ed", "ing"]);
        assert_eq!(config.abbreviations.get("tomorrow").map(String::as_str), Some("tm"));
        assert_eq!(config.abbreviations.len(), 6);
        assert!(config.check().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = TranslatorConfig::from_json(r#"{ "spaces_per_tab": 4 }"#).unwrap();
        assert_eq!(config.spaces_per_tab, 4);
        assert_eq!(config.fragments, TranslatorConfig::default().fragments);
    }

    #[test]
    fn step_budget_scales_with_longest_abbreviation() {
        let mut config = TranslatorConfig::default();
        assert_eq!(config.steps_per_char(), (16 + 2) * 2);

        config.abbreviations.insert("ab".to_string(), "c".repeat(44));
        assert_eq!(config.steps_per_char(), (16 + 2) * 44);

        config.abbreviations.clear();
        assert_eq!(config.steps_per_char(), 16 + 2);
    }

    #[test]
    fn json_round_trip() {
        let config = TranslatorConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(TranslatorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = TranslatorConfig::from_json("{ spaces_per_tab: }").unwrap_err();
        assert!(matches!(err, TranslatorError::Config(_)));
    }

    #[test]
    fn self_abbreviation_is_rejected() {
        let err = TranslatorConfig::from_json(r#"{ "abbreviations": { "you": "you" } }"#)
            .unwrap_err();
        assert!(matches!(err, TranslatorError::InvalidConfig(_)));
    }

    #[test]
    fn empty_fragment_is_rejected() {
        let config = TranslatorConfig {
            fragments: vec![String::new()],
            ..TranslatorConfig::default()
        };
        assert!(config.check().is_err());
    }
}
