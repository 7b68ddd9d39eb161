use tracing::{debug, warn};

use crate::analysis::catalog::{CatalogSource, SkillCatalog};
use crate::analysis::DEFAULT_TARGET_FIELD;

pub const RECOMMENDATION_LIMIT: usize = 7;

/// Target field -> catalog categories whose skills are relevant to it, most relevant first.
const FIELD_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Software Development",
        &["programming_languages", "web_technologies", "tools"],
    ),
    (
        "Data Science",
        &["data_science", "programming_languages", "databases"],
    ),
    (
        "Web Development",
        &["web_technologies", "programming_languages", "databases"],
    ),
    (
        "DevOps",
        &["cloud_platforms", "tools", "programming_languages"],
    ),
    ("Mobile Development", &["programming_languages", "tools"]),
];

/// Categories for `field`; unknown fields get the Software Development mapping.
pub fn categories_for_field(field: &str) -> &'static [&'static str] {
    FIELD_CATEGORIES
        .iter()
        .find(|(f, _)| *f == field)
        .or_else(|| FIELD_CATEGORIES.iter().find(|(f, _)| *f == DEFAULT_TARGET_FIELD))
        .map(|(_, categories)| *categories)
        .unwrap_or(&[])
}

/// Static recommendations: skills of the field's categories in catalog order, minus what was
/// found, first `RECOMMENDATION_LIMIT`.
pub fn recommend_skills_default(
    found: &[String],
    field: &str,
    catalog: &SkillCatalog,
) -> Vec<String> {
    let mut recommended: Vec<String> = Vec::new();
    for category in categories_for_field(field) {
        for skill in catalog.skills_in(category) {
            if recommended.len() == RECOMMENDATION_LIMIT {
                return recommended;
            }
            if !found.contains(skill) && !recommended.contains(skill) {
                recommended.push(skill.clone());
            }
        }
    }
    recommended
}

/// Provider recommendations when a provider is connected, static ones otherwise.
///
/// Never fails: provider errors and empty results are logged as "recommendations unavailable"
/// and answered from the fallback catalog.
pub async fn recommend_skills(found: &[String], field: &str, source: &CatalogSource) -> Vec<String> {
    let fallback = || recommend_skills_default(found, field, &SkillCatalog::fallback());

    let Some(provider) = source.provider() else {
        return fallback();
    };

    match provider.fetch_recommended_skills(field, found).await {
        Ok(skills) => {
            let skills: Vec<String> = skills
                .into_iter()
                .filter(|s| !found.contains(s))
                .take(RECOMMENDATION_LIMIT)
                .collect();
            if skills.is_empty() {
                warn!("Recommendations unavailable for '{field}': nothing left after filtering; using fallback");
                return fallback();
            }
            debug!("Using {} provider recommendations for '{field}'", skills.len());
            skills
        }
        Err(e) => {
            warn!("Recommendations unavailable for '{field}': {e}; using fallback");
            fallback()
        }
    }
}
