// Résumé analysis pipeline.
// Loader -> contact / skill / experience extractors -> scorer -> recommender, orchestrated by
// `ResumeAnalyzer`. Extractors are pure; only the catalog provider touches the network.

pub mod catalog;
pub mod contact;
pub mod experience;
pub mod handlers;
pub mod loader;
pub mod patterns;
pub mod pipeline;
pub mod provider;
pub mod recommend;
pub mod scoring;
pub mod skills;

/// Target field used when the caller supplies none.
pub const DEFAULT_TARGET_FIELD: &str = "Software Development";

pub use catalog::{CatalogSource, SkillCatalog};
pub use loader::RawDocument;
pub use patterns::PatternSet;
pub use pipeline::ResumeAnalyzer;
pub use provider::{PgSkillProvider, SkillCatalogProvider};
