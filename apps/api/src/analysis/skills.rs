use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::analysis::catalog::SkillCatalog;

/// One compiled whole-word, case-insensitive matcher per canonical skill, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct SkillMatcher {
    entries: Vec<(String, Regex)>,
}

impl SkillMatcher {
    /// Regex metacharacters in skill names are escaped, so "C++" and "Node.js" match literally;
    /// word boundaries apply to the escaped literal as-is.
    pub fn new(all_skills: &[String]) -> Self {
        let entries = all_skills
            .iter()
            .filter(|skill| !skill.trim().is_empty())
            .filter_map(|skill| {
                let pattern = format!(r"\b{}\b", regex::escape(&skill.to_lowercase()));
                match Regex::new(&pattern) {
                    Ok(re) => Some((skill.clone(), re)),
                    Err(e) => {
                        warn!("Skipping skill '{skill}': {e}");
                        None
                    }
                }
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A category and the found skills that belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<String>,
}

/// Canonical skills mentioned in `text`, each at most once, in catalog order.
pub fn extract_skills(text: &str, matcher: &SkillMatcher) -> Vec<String> {
    let text = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    for (skill, re) in &matcher.entries {
        if !found.contains(skill) && re.is_match(&text) {
            found.push(skill.clone());
        }
    }
    found
}

/// Groups found skills by catalog category. Every category is present, possibly empty.
pub fn categorize_skills(found: &[String], catalog: &SkillCatalog) -> Vec<SkillCategory> {
    catalog
        .categories()
        .map(|(category, skills)| SkillCategory {
            category: category.to_string(),
            skills: skills
                .iter()
                .filter(|s| found.contains(s))
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback_matcher() -> SkillMatcher {
        SkillMatcher::new(&SkillCatalog::fallback().all_skills())
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_repeated_skill_is_reported_once() {
        let found = extract_skills("Python python PYTHON and more Python", &fallback_matcher());
        assert_eq!(found, skills(&["Python"]));
    }

    #[test]
    fn test_results_follow_catalog_order() {
        let found = extract_skills("SQL, React, Python", &fallback_matcher());
        assert_eq!(found, skills(&["Python", "React", "SQL"]));
    }

    #[test]
    fn test_whole_word_only() {
        let found = extract_skills("I write JavaScript and enjoy good food", &fallback_matcher());
        assert!(found.contains(&"JavaScript".to_string()));
        assert!(!found.contains(&"Java".to_string()));
        assert!(!found.contains(&"Go".to_string()));
    }

    #[test]
    fn test_punctuation_is_matched_literally() {
        let matcher = fallback_matcher();
        assert!(extract_skills("Built APIs in Node.js daily", &matcher)
            .contains(&"Node.js".to_string()));
        assert!(!extract_skills("Built APIs in nodexjs daily", &matcher)
            .contains(&"Node.js".to_string()));
    }

    #[test]
    fn test_symbol_suffixed_names_need_a_following_word_char() {
        let matcher = fallback_matcher();
        let found = extract_skills("Skills: C++, C#, Node.js, R", &matcher);
        assert_eq!(found, skills(&["Node.js", "R"]));
        assert!(extract_skills("Modern C++17 codebase", &matcher).contains(&"C++".to_string()));
    }

    #[test]
    fn test_multi_word_skills() {
        let found = extract_skills("Worked on machine learning and Google Cloud", &fallback_matcher());
        assert!(found.contains(&"Machine Learning".to_string()));
        assert!(found.contains(&"Google Cloud".to_string()));
    }

    #[test]
    fn test_empty_text_has_no_skills() {
        assert!(extract_skills("", &fallback_matcher()).is_empty());
    }

    #[test]
    fn test_duplicate_catalog_entries_collapse() {
        let matcher = SkillMatcher::new(&skills(&["Docker", "Git", "Docker"]));
        assert_eq!(matcher.len(), 3);
        assert_eq!(extract_skills("docker git", &matcher), skills(&["Docker", "Git"]));
    }

    #[test]
    fn test_blank_skill_names_are_ignored() {
        let matcher = SkillMatcher::new(&skills(&["", "  ", "Rust"]));
        assert_eq!(matcher.len(), 1);
    }

    #[test]
    fn test_categorize_keeps_empty_categories() {
        let catalog = SkillCatalog::fallback();
        let grouped = categorize_skills(&skills(&["Python", "React"]), &catalog);
        assert_eq!(grouped.len(), catalog.categories().count());
        assert_eq!(grouped[0].category, "programming_languages");
        assert_eq!(grouped[0].skills, skills(&["Python"]));
        assert_eq!(grouped[1].skills, skills(&["React"]));
        assert!(grouped[2].skills.is_empty());
    }
}
