//! Skill catalog: the categorized list of canonical skill names, plus the once-per-process
//! decision of where it came from.

use std::sync::Arc;

use tracing::{info, warn};

use crate::analysis::provider::SkillCatalogProvider;
use crate::analysis::skills::SkillMatcher;

/// Fallback catalog. No skill appears in more than one category.
const FALLBACK_SKILLS: &[(&str, &[&str])] = &[
    (
        "programming_languages",
        &[
            "Python",
            "JavaScript",
            "TypeScript",
            "Java",
            "C++",
            "C#",
            "Ruby",
            "PHP",
            "Swift",
            "Kotlin",
            "Go",
            "Rust",
        ],
    ),
    (
        "web_technologies",
        &[
            "HTML",
            "CSS",
            "React",
            "Angular",
            "Vue",
            "Next.js",
            "Node.js",
            "Express",
            "Django",
            "Flask",
            "Spring Boot",
            "REST API",
            "GraphQL",
            "WordPress",
            "WebSockets",
        ],
    ),
    (
        "databases",
        &[
            "SQL",
            "MySQL",
            "PostgreSQL",
            "MongoDB",
            "SQLite",
            "Oracle",
            "Firebase",
            "Redis",
            "Elasticsearch",
            "DynamoDB",
            "Cassandra",
            "MariaDB",
            "Neo4j",
        ],
    ),
    (
        "cloud_platforms",
        &[
            "AWS",
            "Azure",
            "Google Cloud",
            "Heroku",
            "DigitalOcean",
            "Vercel",
            "Netlify",
            "Docker",
            "Kubernetes",
        ],
    ),
    (
        "data_science",
        &[
            "Machine Learning",
            "Data Analysis",
            "NumPy",
            "Pandas",
            "Matplotlib",
            "Scikit-learn",
            "TensorFlow",
            "PyTorch",
            "R",
            "Data Visualization",
            "Statistics",
            "NLP",
            "Computer Vision",
        ],
    ),
    (
        "tools",
        &[
            "Git",
            "GitHub",
            "GitLab",
            "Jira",
            "Confluence",
            "Jenkins",
            "CircleCI",
            "Travis CI",
            "Ansible",
            "Terraform",
            "Figma",
            "Sketch",
            "Adobe XD",
            "Postman",
            "Swagger",
        ],
    ),
];

/// Ordered mapping from category to canonical skill names.
///
/// Category order and skill order are both preserved; they define the order of extracted skills
/// and of fallback recommendations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillCatalog {
    categories: Vec<(String, Vec<String>)>,
}

impl SkillCatalog {
    pub fn new(categories: Vec<(String, Vec<String>)>) -> Self {
        Self { categories }
    }

    /// The static catalog used whenever the provider is unreachable or empty.
    pub fn fallback() -> Self {
        Self::new(
            FALLBACK_SKILLS
                .iter()
                .map(|(category, skills)| {
                    (
                        category.to_string(),
                        skills.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(category, skills)| (category.as_str(), skills.as_slice()))
    }

    pub fn skills_in(&self, category: &str) -> &[String] {
        self.categories
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, skills)| skills.as_slice())
            .unwrap_or(&[])
    }

    /// Flat `AllSkills` list in catalog order. Category information is discarded.
    pub fn all_skills(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|(_, skills)| skills.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    Provider,
    Fallback,
}

/// The catalog a pipeline instance runs on, resolved exactly once at construction.
///
/// Holds the provider only if one was reachable at startup; request-time code never tries to
/// connect again.
#[derive(Clone)]
pub struct CatalogSource {
    catalog: SkillCatalog,
    matcher: SkillMatcher,
    origin: CatalogOrigin,
    provider: Option<Arc<dyn SkillCatalogProvider>>,
}

impl CatalogSource {
    /// Fetches the catalog from `provider`, falling back to the static catalog on any error or
    /// on a catalog with no usable skill names. The provider is kept for recommendations even
    /// when the catalog fetch fails.
    pub async fn resolve(provider: Option<Arc<dyn SkillCatalogProvider>>) -> Self {
        let Some(provider) = provider else {
            info!("No skill catalog provider configured; using fallback catalog");
            return Self::fallback();
        };

        match provider.fetch_skills_by_category().await {
            Ok(catalog) => {
                let matcher = SkillMatcher::new(&catalog.all_skills());
                if matcher.is_empty() {
                    warn!("Catalog unavailable: provider returned an empty catalog; using fallback");
                    return Self::build(
                        SkillCatalog::fallback(),
                        CatalogOrigin::Fallback,
                        Some(provider),
                    );
                }
                info!("Loaded skill catalog from provider ({} skills)", matcher.len());
                Self {
                    catalog,
                    matcher,
                    origin: CatalogOrigin::Provider,
                    provider: Some(provider),
                }
            }
            Err(e) => {
                warn!("Catalog unavailable: {e}; using fallback");
                Self::build(SkillCatalog::fallback(), CatalogOrigin::Fallback, Some(provider))
            }
        }
    }

    /// Static catalog, no provider.
    pub fn fallback() -> Self {
        Self::build(SkillCatalog::fallback(), CatalogOrigin::Fallback, None)
    }

    fn build(
        catalog: SkillCatalog,
        origin: CatalogOrigin,
        provider: Option<Arc<dyn SkillCatalogProvider>>,
    ) -> Self {
        let matcher = SkillMatcher::new(&catalog.all_skills());
        Self {
            catalog,
            matcher,
            origin,
            provider,
        }
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn matcher(&self) -> &SkillMatcher {
        &self.matcher
    }

    pub fn origin(&self) -> CatalogOrigin {
        self.origin
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == CatalogOrigin::Fallback
    }

    pub fn provider(&self) -> Option<&Arc<dyn SkillCatalogProvider>> {
        self.provider.as_ref()
    }
}
