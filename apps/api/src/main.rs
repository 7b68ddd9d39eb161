mod analysis;
mod config;
mod db;
mod errors;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::handlers::ParseResumeResponse;
use crate::analysis::scoring::SeededJitter;
use crate::analysis::{
    CatalogSource, PatternSet, PgSkillProvider, RawDocument, ResumeAnalyzer, SkillCatalogProvider,
};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(
    name = "resume-parser",
    version,
    about = "Extract contact details, skills, seniority and skill recommendations from résumés"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Analyze one PDF or .txt résumé and print the result as JSON
    Analyze {
        /// Path to the résumé
        file: PathBuf,

        /// Target career field used for recommendations
        #[arg(long)]
        field: Option<String>,
    },
    /// Create and seed the skills tables
    SetupDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr so `analyze` keeps stdout for JSON.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_parser={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Analyze { file, field } => analyze_file(config, file, field).await,
        Command::SetupDb => setup_db(config).await,
    }
}

/// Connects to the provider once, resolves the catalog once, and builds the pipeline.
async fn build_analyzer(config: &Config) -> Result<ResumeAnalyzer> {
    let provider = db::connect_with_retry(config)
        .await
        .map(|pool| Arc::new(PgSkillProvider::new(pool)) as Arc<dyn SkillCatalogProvider>);
    let source = CatalogSource::resolve(provider).await;

    let patterns = match &config.patterns_file {
        Some(path) => {
            info!("Loading extraction patterns from {}", path.display());
            PatternSet::from_file(path)?
        }
        None => PatternSet::default(),
    };

    let mut analyzer = ResumeAnalyzer::new(source)
        .with_patterns(patterns)
        .with_default_field(config.default_target_field.clone());
    if let Some(seed) = config.score_seed {
        info!("Score jitter seeded with {seed}");
        analyzer = analyzer.with_jitter(Arc::new(SeededJitter::new(seed)));
    }
    Ok(analyzer)
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting resume-parser v{}", env!("CARGO_PKG_VERSION"));

    let analyzer = build_analyzer(&config).await?;
    info!(
        "Skill catalog: {:?} ({} skills)",
        analyzer.catalog_source().origin(),
        analyzer.catalog_source().matcher().len()
    );

    let state = AppState {
        analyzer: Arc::new(analyzer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Prints the response JSON, or `{"error": ...}` and exits 1 on any failure.
async fn analyze_file(config: Config, file: PathBuf, field: Option<String>) -> Result<()> {
    match run_analysis(&config, &file, field.as_deref()).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            println!("{}", json!({ "error": format!("{e:#}") }));
            std::process::exit(1);
        }
    }
}

async fn run_analysis(config: &Config, file: &Path, field: Option<&str>) -> Result<String> {
    let analyzer = build_analyzer(config).await?;
    let result = analyzer.analyze(RawDocument::from_path(file), field).await?;
    let response = ParseResumeResponse::new(&analyzer, result);
    Ok(serde_json::to_string(&response)?)
}

async fn setup_db(config: Config) -> Result<()> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set for setup-db")?;
    let pool = db::create_pool(database_url, &config).await?;
    db::provision_schema(&pool).await?;
    pool.close().await;
    Ok(())
}
