//! HTTP tests for `GET /api/v1/feeds/{user_id}` against an in-memory store.

mod common;

use actix_web::{test, web, App, HttpResponse};
use serde_json::Value;
use uuid::Uuid;

use common::Fixture;
use feed_service::handlers::{self, FeedHandlerState};
use feed_service::openapi::ApiDoc;
use utoipa::OpenApi;

macro_rules! feed_app {
    ($ranker:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(FeedHandlerState::new($ranker, 20)))
                .configure(handlers::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_feed_envelope() {
    let mut fx = Fixture::new();
    let me = fx.user();
    let author = fx.user();
    let post = fx.post(author, 1, &[]);
    fx.likes(post, 2);

    let app = feed_app!(fx.ranker());
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/feeds/{}", me))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains(&me.to_string()));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["post"]["id"], post.to_string());
    assert_eq!(body["data"][0]["like_count"], 2);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["page_size"], 20);
    assert_eq!(body["pagination"]["total_items"], 1);
    assert_eq!(body["pagination"]["has_next"], false);
}

#[actix_web::test]
async fn test_unknown_user_returns_404() {
    let fx = Fixture::new();
    let app = feed_app!(fx.ranker());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/feeds/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 404);
}

#[actix_web::test]
async fn test_invalid_page_returns_400() {
    let mut fx = Fixture::new();
    let me = fx.user();
    let app = feed_app!(fx.ranker());

    for query in ["page=0", "page=-2", "page_size=0"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/feeds/{}?{}", me, query))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "query {}", query);
    }
}

#[actix_web::test]
async fn test_malformed_user_id_returns_400() {
    let fx = Fixture::new();
    let app = feed_app!(fx.ranker());

    let req = test::TestRequest::get()
        .uri("/api/v1/feeds/not-a-uuid")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_page_size_is_clamped() {
    let mut fx = Fixture::new();
    let me = fx.user();
    let author = fx.user();
    for hours in 0..3 {
        fx.post(author, hours, &[]);
    }
    let app = feed_app!(fx.ranker());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/feeds/{}?page=1&page_size=1000", me))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["pagination"]["page_size"], 100);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_page_past_end_is_empty() {
    let mut fx = Fixture::new();
    let me = fx.user();
    let author = fx.user();
    fx.post(author, 1, &[]);
    let app = feed_app!(fx.ranker());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/feeds/{}?page=5&page_size=10", me))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total_items"], 1);
    assert_eq!(body["pagination"]["has_previous"], true);
    assert_eq!(body["pagination"]["has_next"], false);
}

#[actix_web::test]
async fn test_openapi_document_describes_feed_endpoint() {
    let app = test::init_service(App::new().route(
        ApiDoc::openapi_json_path(),
        web::get().to(|| async { HttpResponse::Ok().json(ApiDoc::openapi()) }),
    ))
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/openapi.json")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["info"]["title"], "Feed Service API");
    let get = &body["paths"]["/api/v1/feeds/{user_id}"]["get"];
    assert!(get["responses"]["200"].is_object());
    assert!(get["responses"]["404"].is_object());
}
