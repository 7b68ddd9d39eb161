//! Extraction patterns as data.
//!
//! Every regex the extractors use is named here. `PatternConfig` is the swappable, serde-loadable
//! form; `PatternSet` is the compiled form the extractors consume.

use std::path::Path;

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b";
pub const PHONE_PATTERN: &str = r"(?:\+\d{1,2}\s?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}";
pub const YEARS_OF_EXPERIENCE_PATTERN: &str = r"\b(\d+)\+?\s+years?\s+(?:of\s+)?experience\b";
pub const EXPERIENCED_FOR_YEARS_PATTERN: &str =
    r"\bexperienced\s+(?:for|with)?\s+(\d+)\+?\s+years\b";
pub const SENIOR_KEYWORDS_PATTERN: &str =
    r"\bsenior\b|\bsr\.?\b|\blead\b|\barchitect\b|\bhead\b|\bprincipal\b";
pub const JUNIOR_KEYWORDS_PATTERN: &str = r"\bjunior\b|\bjr\.?\b|\bentry\b|\bintern\b|\btrainee\b";

static BUILTIN: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::compile(&PatternConfig::default()).expect("built-in patterns are valid")
});

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Invalid pattern '{name}': {source}")]
    Invalid {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Pattern '{0}' needs a capture group for the year count")]
    MissingYearCapture(String),
}

/// Named extraction patterns. Missing fields fall back to the built-in pattern.
///
/// `email` and `phone` run against the original text; `experience_years` and the keyword
/// patterns run against the lower-cased text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub email: String,
    pub phone: String,
    /// Capture group 1 of each pattern must be the number of years.
    pub experience_years: Vec<String>,
    pub senior_keywords: String,
    pub junior_keywords: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            email: EMAIL_PATTERN.to_string(),
            phone: PHONE_PATTERN.to_string(),
            experience_years: vec![
                YEARS_OF_EXPERIENCE_PATTERN.to_string(),
                EXPERIENCED_FOR_YEARS_PATTERN.to_string(),
            ],
            senior_keywords: SENIOR_KEYWORDS_PATTERN.to_string(),
            junior_keywords: JUNIOR_KEYWORDS_PATTERN.to_string(),
        }
    }
}

/// Compiled extraction patterns.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub email: Regex,
    pub phone: Regex,
    pub experience_years: Vec<Regex>,
    pub senior_keywords: Regex,
    pub junior_keywords: Regex,
}

impl PatternSet {
    pub fn compile(config: &PatternConfig) -> Result<Self, PatternError> {
        let experience_years = config
            .experience_years
            .iter()
            .enumerate()
            .map(|(i, pattern)| {
                let name = format!("experience_years[{i}]");
                let re = compile_named(&name, pattern)?;
                if re.captures_len() < 2 {
                    return Err(PatternError::MissingYearCapture(name));
                }
                Ok(re)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            email: compile_named("email", &config.email)?,
            phone: compile_named("phone", &config.phone)?,
            experience_years,
            senior_keywords: compile_named("senior_keywords", &config.senior_keywords)?,
            junior_keywords: compile_named("junior_keywords", &config.junior_keywords)?,
        })
    }

    /// Loads a JSON `PatternConfig` from disk and compiles it.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read patterns file {}", path.display()))?;
        let config: PatternConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse patterns file {}", path.display()))?;
        Ok(Self::compile(&config)?)
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

fn compile_named(name: &str, pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|source| PatternError::Invalid {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_patterns_compile() {
        let set = PatternSet::default();
        assert_eq!(set.experience_years.len(), 2);
        assert!(set.email.is_match("jane@x.com"));
        assert!(set.phone.is_match("(555) 123-4567"));
    }

    #[test]
    fn test_invalid_pattern_names_the_culprit() {
        let config = PatternConfig {
            phone: "(unclosed".to_string(),
            ..PatternConfig::default()
        };
        let err = PatternSet::compile(&config).unwrap_err();
        assert!(err.to_string().contains("phone"), "got: {err}");
    }

    #[test]
    fn test_year_pattern_without_capture_is_rejected() {
        let config = PatternConfig {
            experience_years: vec![r"\d+ years".to_string()],
            ..PatternConfig::default()
        };
        assert!(matches!(
            PatternSet::compile(&config),
            Err(PatternError::MissingYearCapture(_))
        ));
    }

    #[test]
    fn test_partial_json_keeps_builtin_defaults() {
        let config: PatternConfig =
            serde_json::from_str(r#"{ "senior_keywords": "\\bstaff\\b" }"#).unwrap();
        assert_eq!(config.senior_keywords, r"\bstaff\b");
        assert_eq!(config.email, EMAIL_PATTERN);
        assert_eq!(config.experience_years.len(), 2);
    }

    #[test]
    fn test_from_file_round_trips_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "junior_keywords": "\\bapprentice\\b" }}"#).unwrap();
        let set = PatternSet::from_file(file.path()).unwrap();
        assert!(set.junior_keywords.is_match("apprentice welder"));
        assert!(!set.junior_keywords.is_match("junior welder"));
    }
}
