use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::analysis::catalog::CatalogSource;
use crate::analysis::contact::extract_contact_info;
use crate::analysis::experience::{determine_experience_level, ExperienceLevel};
use crate::analysis::loader::{load_document, PlainText, RawDocument};
use crate::analysis::patterns::PatternSet;
use crate::analysis::recommend::recommend_skills;
use crate::analysis::scoring::{calculate_score, match_confidence, ScoreJitter, ThreadRngJitter};
use crate::analysis::skills::{categorize_skills, extract_skills, SkillCategory};
use crate::analysis::DEFAULT_TARGET_FIELD;
use crate::errors::AnalysisError;

/// The structured profile produced for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub score: u8,
    #[serde(rename = "likelyField")]
    pub target_field: String,
    pub match_confidence: u8,
    pub recommended_skills: Vec<String>,
}

/// One pipeline instance. Read-only after construction and shared across requests via `Arc`.
pub struct ResumeAnalyzer {
    source: CatalogSource,
    patterns: PatternSet,
    jitter: Arc<dyn ScoreJitter>,
    default_field: String,
}

impl ResumeAnalyzer {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            patterns: PatternSet::default(),
            jitter: Arc::new(ThreadRngJitter),
            default_field: DEFAULT_TARGET_FIELD.to_string(),
        }
    }

    pub fn with_patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_jitter(mut self, jitter: Arc<dyn ScoreJitter>) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = field.into();
        self
    }

    pub fn catalog_source(&self) -> &CatalogSource {
        &self.source
    }

    /// A missing or blank target field becomes the default.
    pub fn resolve_field(&self, target_field: Option<&str>) -> String {
        target_field
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(self.default_field.as_str())
            .to_string()
    }

    /// Loads `document` and analyzes it. Only load failures surface as errors.
    pub async fn analyze(
        &self,
        document: RawDocument,
        target_field: Option<&str>,
    ) -> Result<AnalysisResult, AnalysisError> {
        // PDF parsing is CPU-bound.
        let text = tokio::task::spawn_blocking(move || load_document(document))
            .await
            .map_err(|e| AnalysisError::DocumentUnreadable(format!("Loader task failed: {e}")))??;
        Ok(self.analyze_text(&text, target_field).await)
    }

    pub async fn analyze_text(&self, text: &PlainText, target_field: Option<&str>) -> AnalysisResult {
        let text = text.as_str();
        let target_field = self.resolve_field(target_field);

        let contact = extract_contact_info(text, &self.patterns);
        let skills = extract_skills(text, self.source.matcher());
        let experience_level = determine_experience_level(text, &self.patterns);
        let score = calculate_score(skills.len(), experience_level, self.jitter.sample());
        let recommended_skills = recommend_skills(&skills, &target_field, &self.source).await;

        info!(
            "Analyzed résumé: {} skills, {experience_level}, score {score}, field '{target_field}'",
            skills.len()
        );

        AnalysisResult {
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            skills,
            experience_level,
            score,
            target_field,
            match_confidence: match_confidence(score),
            recommended_skills,
        }
    }

    /// Found skills grouped by the catalog this instance runs on.
    pub fn categorize(&self, skills: &[String]) -> Vec<SkillCategory> {
        categorize_skills(skills, self.source.catalog())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::catalog::SkillCatalog;
    use crate::analysis::provider::tests::StubProvider;
    use crate::analysis::scoring::{FixedJitter, MAX_JITTER};
    use crate::analysis::recommend::recommend_skills_default;

    const JANE: &str =
        "Jane Doe\nEmail: jane@x.com\nPhone: 555-123-4567\n5 years of experience\nPython, React, SQL";

    fn analyzer() -> ResumeAnalyzer {
        ResumeAnalyzer::new(CatalogSource::fallback())
    }

    #[tokio::test]
    async fn test_jane_doe_scenario() {
        let result = analyzer().analyze_text(&PlainText::from(JANE), None).await;
        assert_eq!(result.name, "Jane Doe");
        assert_eq!(result.email, "jane@x.com");
        assert_eq!(result.phone, "555-123-4567");
        for skill in ["Python", "React", "SQL"] {
            assert!(result.skills.contains(&skill.to_string()), "missing {skill}");
        }
        assert_eq!(result.experience_level, ExperienceLevel::Intermediate);
        assert_eq!(result.target_field, DEFAULT_TARGET_FIELD);
        assert!(result
            .recommended_skills
            .iter()
            .all(|s| !result.skills.contains(s)));
    }

    #[tokio::test]
    async fn test_empty_text_scenario() {
        let result = analyzer().analyze_text(&PlainText::default(), None).await;
        assert_eq!(result.name, "");
        assert_eq!(result.email, "");
        assert_eq!(result.phone, "");
        assert!(result.skills.is_empty());
        assert_eq!(result.experience_level, ExperienceLevel::Intermediate);
        // 30 base + 8 intermediate bonus, then ±5 jitter.
        let expected = 38;
        assert!(
            (expected - MAX_JITTER..=expected + MAX_JITTER).contains(&(result.score as i32)),
            "score {}",
            result.score
        );
        assert_eq!(
            result.recommended_skills,
            recommend_skills_default(&[], DEFAULT_TARGET_FIELD, &SkillCatalog::fallback())
        );
    }

    #[tokio::test]
    async fn test_pinned_jitter_gives_exact_score() {
        let analyzer = analyzer().with_jitter(Arc::new(FixedJitter(-2)));
        let result = analyzer.analyze_text(&PlainText::from(JANE), None).await;
        // 3 skills -> 39, intermediate +8, jitter -2.
        assert_eq!(result.skills.len(), 3);
        assert_eq!(result.score, 45);
        assert_eq!(result.match_confidence, 50);
    }

    #[tokio::test]
    async fn test_score_and_confidence_bounds() {
        let analyzer = analyzer();
        for _ in 0..50 {
            let r = analyzer.analyze_text(&PlainText::from(JANE), None).await;
            assert!(r.score <= 100);
            assert!(r.match_confidence >= r.score);
            assert!(r.match_confidence <= 95);
        }
    }

    #[tokio::test]
    async fn test_extraction_is_deterministic() {
        let analyzer = analyzer();
        let text = PlainText::from(JANE);
        let a = analyzer.analyze_text(&text, Some("DevOps")).await;
        let b = analyzer.analyze_text(&text, Some("DevOps")).await;
        assert_eq!((a.name, a.email, a.phone), (b.name, b.email, b.phone));
        assert_eq!(a.skills, b.skills);
        assert_eq!(a.experience_level, b.experience_level);
        assert_eq!(a.recommended_skills, b.recommended_skills);
    }

    #[tokio::test]
    async fn test_blank_field_uses_configured_default() {
        let analyzer = analyzer().with_default_field("Data Science");
        let result = analyzer.analyze_text(&PlainText::from(""), Some("  ")).await;
        assert_eq!(result.target_field, "Data Science");
        assert_eq!(result.recommended_skills[0], "Machine Learning");
    }

    #[tokio::test]
    async fn test_unknown_field_is_echoed_but_recommends_defaults() {
        let result = analyzer()
            .analyze_text(&PlainText::from(""), Some("Astronomy"))
            .await;
        assert_eq!(result.target_field, "Astronomy");
        assert_eq!(result.recommended_skills[0], "Python");
    }

    #[tokio::test]
    async fn test_missing_file_propagates() {
        let err = analyzer()
            .analyze(RawDocument::from_path("/no/such/resume.pdf"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_analyze_text_upload() {
        let doc = RawDocument::from_bytes(JANE.as_bytes().to_vec(), "jane.txt");
        let result = analyzer().analyze(doc, Some("Web Development")).await.unwrap();
        assert_eq!(result.name, "Jane Doe");
        assert_eq!(result.target_field, "Web Development");
    }

    #[tokio::test]
    async fn test_provider_catalog_drives_extraction() {
        let catalog = SkillCatalog::new(vec![(
            "languages".to_string(),
            vec!["Elixir".to_string()],
        )]);
        let source = CatalogSource::resolve(Some(Arc::new(StubProvider::with_catalog(catalog)))).await;
        let result = ResumeAnalyzer::new(source)
            .analyze_text(&PlainText::from("Elixir and Python"), None)
            .await;
        assert_eq!(result.skills, vec!["Elixir".to_string()]);
        // Stub has no recommendations table, so the static list is used.
        assert_eq!(result.recommended_skills[0], "Python");
    }

    #[tokio::test]
    async fn test_serialized_field_names() {
        let result = analyzer().analyze_text(&PlainText::from(JANE), None).await;
        let json = serde_json::to_value(&result).unwrap();
        for key in [
            "name",
            "email",
            "phone",
            "skills",
            "experienceLevel",
            "score",
            "likelyField",
            "matchConfidence",
            "recommendedSkills",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["experienceLevel"], "Intermediate");
    }

    #[test]
    fn test_categorize_uses_instance_catalog() {
        let grouped = analyzer().categorize(&["Git".to_string()]);
        let tools = grouped.iter().find(|c| c.category == "tools").unwrap();
        assert_eq!(tools.skills, vec!["Git".to_string()]);
    }
}
