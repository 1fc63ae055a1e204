use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::models::{FeedItem, FeedResponse, Pagination, Post};

/// OpenAPI documentation for Feed Service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feed Service API",
        description = "Personalized feeds. Posts by other users are ranked by likes, comments, \
                       tag overlap with the requesting user's own posts and time decay.",
        license(name = "MIT")
    ),
    paths(crate::handlers::feed::get_feed),
    components(schemas(FeedResponse, FeedItem, Post, Pagination, ErrorResponse)),
    tags((name = "feeds", description = "Ranked personalized feeds"))
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }
}
