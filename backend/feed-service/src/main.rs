use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

use feed_service::config::Config;
use feed_service::db::{create_pool, PgFeedRepo};
use feed_service::handlers::{self, FeedHandlerState};
use feed_service::metrics;
use feed_service::openapi::ApiDoc;
use feed_service::services::FeedRanker;

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},actix_web=info", default_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true),
        )
        .init();
}

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(&config.app.log_level);

    info!("Starting feed-service v{}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.env);

    let db_pool = create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    let ranker = FeedRanker::new(
        Arc::new(PgFeedRepo::new(db_pool)),
        config.ranking.weights(),
    )
    .with_max_page_size(config.feed.max_page_size)
    .with_scoring_concurrency(config.feed.scoring_concurrency);

    info!(
        weights = ?config.ranking.weights(),
        max_page_size = config.feed.max_page_size,
        scoring_concurrency = config.feed.scoring_concurrency,
        "Feed ranker initialized"
    );

    let feed_state = web::Data::new(FeedHandlerState::new(
        ranker,
        config.feed.default_page_size,
    ));

    HttpServer::new(move || {
        App::new()
            .app_data(feed_state.clone())
            .route(
                ApiDoc::openapi_json_path(),
                web::get().to(|| async { HttpResponse::Ok().json(ApiDoc::openapi()) }),
            )
            .route("/health", web::get().to(|| async { "OK" }))
            // Health endpoints for K8s probes
            .route("/api/v1/health", web::get().to(|| async { "OK" }))
            .route("/api/v1/health/live", web::get().to(|| async { "OK" }))
            .route("/api/v1/health/ready", web::get().to(|| async { "OK" }))
            .route("/metrics", web::get().to(metrics::serve_metrics))
            .configure(handlers::configure)
    })
    .bind(("0.0.0.0", config.app.port))
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")
}
