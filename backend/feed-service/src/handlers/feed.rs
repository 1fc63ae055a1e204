use actix_web::{get, web, HttpResponse};
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, warn};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::{AppError, ErrorResponse, Result};
use crate::metrics::feed::record_feed_request;
use crate::models::FeedResponse;
use crate::services::FeedRanker;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQueryParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page. Values above the configured maximum are clamped.
    #[param(minimum = 1)]
    pub page_size: Option<i64>,
}

fn default_page() -> i64 {
    1
}

pub struct FeedHandlerState {
    pub ranker: FeedRanker,
    pub default_page_size: u32,
}

impl FeedHandlerState {
    pub fn new(ranker: FeedRanker, default_page_size: u32) -> Self {
        Self {
            ranker,
            default_page_size,
        }
    }
}

/// Personalized feed for `user_id`, ranked by engagement, interest overlap and freshness.
#[utoipa::path(
    get,
    path = "/api/v1/feeds/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User whose feed is built"),
        FeedQueryParams
    ),
    responses(
        (status = 200, description = "Ranked feed page", body = FeedResponse),
        (status = 400, description = "Malformed user id or invalid pagination", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 503, description = "Feed store unavailable", body = ErrorResponse)
    ),
    tag = "feeds"
)]
#[get("/{user_id}")]
pub async fn get_feed(
    path: web::Path<String>,
    query: web::Query<FeedQueryParams>,
    state: web::Data<FeedHandlerState>,
) -> Result<HttpResponse> {
    let started = Instant::now();
    let result = build_feed(&path, &query, &state).await;
    record_feed_request(outcome_label(&result), started.elapsed());

    let response = result?;
    Ok(HttpResponse::Ok().json(response))
}

async fn build_feed(
    raw_user_id: &str,
    query: &FeedQueryParams,
    state: &FeedHandlerState,
) -> Result<FeedResponse> {
    let user_id = Uuid::parse_str(raw_user_id)
        .map_err(|_| AppError::ValidationError(format!("Invalid user id: {}", raw_user_id)))?;
    let page_size = query
        .page_size
        .unwrap_or_else(|| i64::from(state.default_page_size));

    debug!(
        "Getting personalized feed: user={} page={} page_size={}",
        user_id, query.page, page_size
    );

    let page = state
        .ranker
        .get_feed(user_id, query.page, page_size)
        .await
        .map_err(|e| {
            if let AppError::Dependency(msg) = &e {
                warn!(user_id = %user_id, "Feed store unavailable: {}", msg);
            }
            e
        })?;

    Ok(FeedResponse::from_page(user_id, page))
}

fn outcome_label<T>(result: &Result<T>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(AppError::NotFound(_)) => "not_found",
        Err(AppError::ValidationError(_)) => "invalid",
        Err(AppError::Dependency(_)) => "dependency_error",
        Err(AppError::Internal(_)) => "error",
    }
}
