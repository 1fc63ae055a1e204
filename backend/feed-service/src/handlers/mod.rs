pub mod feed;

pub use feed::{get_feed, FeedHandlerState, FeedQueryParams};

use actix_web::web;

/// Mount the feed routes under `/api/v1/feeds`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/feeds").service(get_feed));
}
