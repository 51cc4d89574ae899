mod capability;
mod classifier;
mod config;
mod documents;
mod errors;
mod routes;
mod skills;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::capability::Capability;
use crate::classifier::{ProfileClassifier, RoleClassifier};
use crate::config::Config;
use crate::routes::build_router;
use crate::skills::aliases::AliasTable;
use crate::skills::entities::{EntityExtractor, NerBackend};
use crate::skills::exclusion::ExclusionRules;
use crate::skills::extractor::SkillExtractor;
use crate::skills::fit_scoring::{FitScorer, SkillSetScorer};
use crate::skills::gazetteer::GazetteerNer;
use crate::skills::policy::CategoryPolicy;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillFit API v{}", env!("CARGO_PKG_VERSION"));

    // Alias table (built-in dictionary; collisions are logged during construction)
    let aliases = Arc::new(AliasTable::builtin());
    info!(
        "Alias table: {} canonical skills, {} collisions",
        aliases.len(),
        aliases.collisions().len()
    );

    // Category policy (file overrides the built-in defaults)
    let policy = match config.category_policy_path.as_deref() {
        Some(path) => CategoryPolicy::from_file(path).unwrap_or_else(|e| {
            warn!("Category policy failed to load, using defaults: {e}");
            CategoryPolicy::default()
        }),
        None => CategoryPolicy::default(),
    };

    // Optional backends: a missing or broken artifact leaves the capability unavailable
    let ner = Capability::load("NER backend", config.ner_patterns_path.as_deref(), |path| {
        GazetteerNer::from_file(path).map(|ner| {
            info!("Gazetteer NER: {} patterns", ner.pattern_count());
            Arc::new(ner) as Arc<dyn NerBackend>
        })
    });
    let role_classifier = Capability::load(
        "Role classifier",
        config.role_profiles_path.as_deref(),
        |path| {
            ProfileClassifier::from_file(path).map(|c| {
                info!("Role profiles: {}", c.roles().collect::<Vec<_>>().join(", "));
                Arc::new(c) as Arc<dyn RoleClassifier>
            })
        },
    );

    let exclusions = ExclusionRules::default().with_stopwords(&config.extra_stopwords);
    if !config.extra_stopwords.is_empty() {
        info!("Added {} stopwords from EXTRA_STOPWORDS", config.extra_stopwords.len());
    }

    let extractor = SkillExtractor::new(Arc::clone(&aliases), EntityExtractor::new(ner), policy)
        .context("failed to build the skill matcher")?
        .with_exclusions(exclusions);
    info!("Skill extractor ready (NER backend: {})", extractor.ner_status());

    // Initialize fit scorer (SkillSetScorer by default)
    let fit_scorer: Arc<dyn FitScorer> = Arc::new(SkillSetScorer::new(aliases));
    info!("Fit scorer initialized ({})", fit_scorer.backend());

    // Build app state
    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(extractor),
        fit_scorer,
        role_classifier,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once a frontend domain exists

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped; backends released");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
