use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::analysis::SkillCatalog;
use crate::config::Config;

const RETRY_PAUSE: Duration = Duration::from_secs(1);

/// Starter rows for `recommended_skills`: (name, field, priority).
const RECOMMENDED_SEED: &[(&str, &str, i32)] = &[
    ("Docker", "Software Development", 10),
    ("TypeScript", "Web Development", 9),
    ("TensorFlow", "Data Science", 8),
];

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, config: &Config) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_connect_timeout)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Startup-only connection attempt: at most `db_connect_retries` tries, one second apart.
/// `None` means the process runs on static fallbacks for its whole lifetime.
pub async fn connect_with_retry(config: &Config) -> Option<PgPool> {
    let Some(database_url) = config.database_url.as_deref() else {
        info!("DATABASE_URL not set; skill catalog provider disabled");
        return None;
    };

    let attempts = config.db_connect_retries.max(1);
    for attempt in 1..=attempts {
        info!("Attempting database connection ({attempt}/{attempts})");
        match create_pool(database_url, config).await {
            Ok(pool) => return Some(pool),
            Err(e) => {
                warn!("Database connection failed: {e}");
                if attempt < attempts {
                    tokio::time::sleep(RETRY_PAUSE).await;
                }
            }
        }
    }

    warn!("All connection attempts failed; using fallback data");
    None
}

/// Setup-time schema provisioning and seeding. Never called while serving requests.
pub async fn provision_schema(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS skills (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL UNIQUE,
            category VARCHAR(50) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&mut *tx)
    .await
    .context("Failed to create skills table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recommended_skills (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            field VARCHAR(50) NOT NULL,
            priority INTEGER DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (name, field)
        )
        "#,
    )
    .execute(&mut *tx)
    .await
    .context("Failed to create recommended_skills table")?;

    let catalog = SkillCatalog::fallback();
    for (category, skills) in catalog.categories() {
        for skill in skills {
            sqlx::query(
                "INSERT INTO skills (name, category) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING",
            )
            .bind(skill)
            .bind(category)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert skill '{skill}'"))?;
        }
    }

    for &(name, field, priority) in RECOMMENDED_SEED {
        sqlx::query(
            r#"
            INSERT INTO recommended_skills (name, field, priority)
            VALUES ($1, $2, $3)
            ON CONFLICT (name, field) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(field)
        .bind(priority)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to insert recommended skill '{name}'"))?;
    }

    tx.commit().await?;

    let skill_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM skills")
        .fetch_one(pool)
        .await?;
    let recommended_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recommended_skills")
        .fetch_one(pool)
        .await?;
    info!("Schema ready: {skill_count} skills, {recommended_count} recommended skills");
    Ok(())
}
