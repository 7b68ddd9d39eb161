use sqlx::FromRow;

/// One category of the `skills` table, aggregated into canonical skill names.
#[derive(Debug, Clone, FromRow)]
pub struct SkillCategoryRow {
    pub category: String,
    pub skills: Vec<String>,
}

/// A single row of the `recommended_skills` table.
#[derive(Debug, Clone, FromRow)]
pub struct RecommendedSkillRow {
    pub name: String,
    pub priority: Option<i32>,
}
