use serde::Serialize;

use crate::analysis::patterns::PatternSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ExperienceLevel {
    Junior,
    #[default]
    Intermediate,
    Senior,
}

impl ExperienceLevel {
    pub fn from_years(years: u32) -> Self {
        match years {
            0..=2 => ExperienceLevel::Junior,
            3..=6 => ExperienceLevel::Intermediate,
            _ => ExperienceLevel::Senior,
        }
    }

    /// Fixed score bonus awarded for this level.
    pub fn score_bonus(self) -> i32 {
        match self {
            ExperienceLevel::Junior => 0,
            ExperienceLevel::Intermediate => 8,
            ExperienceLevel::Senior => 15,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::Intermediate => "Intermediate",
            ExperienceLevel::Senior => "Senior",
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest explicit "N years of experience" count in the text, if any.
/// Counts too large for `u32` saturate rather than being dropped.
pub fn max_years_of_experience(text: &str, patterns: &PatternSet) -> Option<u32> {
    let text = text.to_lowercase();
    patterns
        .experience_years
        .iter()
        .flat_map(|re| re.captures_iter(&text))
        .filter_map(|caps| parse_year_count(caps.get(1)?.as_str()))
        .max()
}

fn parse_year_count(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

/// Classifies seniority. Explicit year counts take precedence over title keywords; with
/// neither, the level is Intermediate.
pub fn determine_experience_level(text: &str, patterns: &PatternSet) -> ExperienceLevel {
    if let Some(years) = max_years_of_experience(text, patterns) {
        return ExperienceLevel::from_years(years);
    }

    let text = text.to_lowercase();
    if patterns.senior_keywords.is_match(&text) {
        ExperienceLevel::Senior
    } else if patterns.junior_keywords.is_match(&text) {
        ExperienceLevel::Junior
    } else {
        ExperienceLevel::Intermediate
    }
}
