//! Skill Catalog Provider — pluggable, trait-based source of skills and recommendations.
//!
//! Default: `PgSkillProvider` over the shared `sqlx` pool. Every method returns an explicit
//! `ProviderError`; the fallback decision is made by the caller (`CatalogSource`, `recommend`).

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::analysis::catalog::SkillCatalog;
use crate::analysis::recommend::RECOMMENDATION_LIMIT;
use crate::errors::ProviderError;
use crate::models::skill::{RecommendedSkillRow, SkillCategoryRow};

/// Implement this to swap catalog backends without touching the pipeline.
///
/// Carried by `CatalogSource` as `Arc<dyn SkillCatalogProvider>`.
#[async_trait]
pub trait SkillCatalogProvider: Send + Sync {
    async fn fetch_skills_by_category(&self) -> Result<SkillCatalog, ProviderError>;

    /// Up to `RECOMMENDATION_LIMIT` skills for `field` not in `exclude`, priority descending
    /// with missing priorities last.
    async fn fetch_recommended_skills(
        &self,
        field: &str,
        exclude: &[String],
    ) -> Result<Vec<String>, ProviderError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL provider
// ────────────────────────────────────────────────────────────────────────────

/// Reads the `skills` and `recommended_skills` tables. The pool is shared across requests.
#[derive(Clone)]
pub struct PgSkillProvider {
    pool: PgPool,
}

impl PgSkillProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn require_table(&self, table: &'static str) -> Result<(), ProviderError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;

        if exists {
            Ok(())
        } else {
            Err(ProviderError::MissingTable(table))
        }
    }
}

#[async_trait]
impl SkillCatalogProvider for PgSkillProvider {
    async fn fetch_skills_by_category(&self) -> Result<SkillCatalog, ProviderError> {
        self.require_table("skills").await?;

        let rows: Vec<SkillCategoryRow> = sqlx::query_as(
            r#"
            SELECT category::text AS category,
                   array_agg(name::text ORDER BY id) AS skills
            FROM skills
            GROUP BY category
            ORDER BY MIN(id)
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Err(ProviderError::Empty);
        }

        Ok(SkillCatalog::new(
            rows.into_iter().map(|r| (r.category, r.skills)).collect(),
        ))
    }

    async fn fetch_recommended_skills(
        &self,
        field: &str,
        exclude: &[String],
    ) -> Result<Vec<String>, ProviderError> {
        self.require_table("recommended_skills").await?;

        let rows: Vec<RecommendedSkillRow> = sqlx::query_as(
            r#"
            SELECT name::text AS name, priority
            FROM recommended_skills
            WHERE field = $1 AND name::text <> ALL($2)
            ORDER BY priority DESC NULLS LAST
            LIMIT $3
            "#,
        )
        .bind(field)
        .bind(exclude)
        .bind(RECOMMENDATION_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Err(ProviderError::Empty);
        }

        for row in &rows {
            debug!("Recommended skill '{}' (priority {:?})", row.name, row.priority);
        }
        Ok(rows.into_iter().map(|r| r.name).collect())
    }
}
