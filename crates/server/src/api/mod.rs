//! # HTTP Surface
//!
//! ```text
//! GET  /                     page HTML (?q= applies the search filter)
//! POST /activate             trigger=<node id>, page HTML with the overlay
//! POST /overlay/close        page HTML with the overlay hidden
//! GET  /api/v1/entities      JSON entity views (?q= looks names up in the store)
//! GET  /api/v1/status        JSON session status
//! GET  /static/*path         embedded assets
//! ```

pub mod catalog;
pub mod page;

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::RustEmbed;

use crate::SharedState;

/// Embedded stylesheet and other static files
#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .merge(page::page_routes())
        .nest("/api/v1", catalog::catalog_routes())
        .route("/static/*path", get(serve_static))
        .with_state(state)
}

async fn serve_static(Path(path): Path<String>) -> Response {
    match Assets::get(&path) {
        Some(file) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                file.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppState;
    use async_trait::async_trait;
    use catalog_core::error::{CatalogError, NetworkOperation};
    use catalog_core::gateway::{DetailRecord, RemoteGateway, SummaryStub};
    use catalog_core::{CatalogSession, Result};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::net::TcpListener;

    struct FakeGateway;

    #[async_trait]
    impl RemoteGateway for FakeGateway {
        async fn fetch_summary_page(&self) -> Result<Vec<SummaryStub>> {
            Ok(["bulbasaur", "ivysaur", "charmander"]
                .iter()
                .map(|name| SummaryStub {
                    name: name.to_string(),
                    url: format!("https://pokeapi.test/{}", name),
                })
                .collect())
        }

        async fn fetch_detail(&self, detail_reference: &str) -> Result<DetailRecord> {
            if detail_reference.ends_with("charmander") {
                return Err(CatalogError::network(NetworkOperation::Detail, "timed out"));
            }
            serde_json::from_value(json!({
                "sprites": { "front_default": "f.png", "other": { "dream_world": { "front_default": "art.svg" } } },
                "height": 7,
                "weight": 69,
                "types": [{ "type": { "name": "grass" } }],
                "abilities": [{ "ability": { "name": "overgrow" } }]
            }))
            .map_err(|e| CatalogError::network(NetworkOperation::Detail, e))
        }
    }

    /// Start a loaded session behind the router on an ephemeral port
    async fn spawn_app() -> (String, SharedState) {
        let session = CatalogSession::new(Arc::new(FakeGateway));
        session.start().await;
        let state: SharedState = Arc::new(AppState { session });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), state)
    }

    fn trigger_of(state: &SharedState, index: usize) -> String {
        state.session.renderer().triggers()[index].to_string()
    }

    #[tokio::test]
    async fn test_index_renders_list() {
        let (base, _) = spawn_app().await;
        let body = reqwest::get(format!("{}/", base)).await.unwrap().text().await.unwrap();

        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains(">Bulbasaur</button>"));
        assert!(body.contains("data-search-term=\"charmander\""));
        assert!(body.contains("class=\"modal is-not-visible\""));
    }

    #[tokio::test]
    async fn test_search_query_hides_items() {
        let (base, _) = spawn_app().await;
        let body = reqwest::get(format!("{}/?q=char", base)).await.unwrap().text().await.unwrap();
        assert!(body.contains("data-search-term=\"bulbasaur\" style=\"display: none\""));
        assert!(!body.contains("data-search-term=\"charmander\" style=\"display: none\""));

        let body = reqwest::get(format!("{}/?q=%20", base)).await.unwrap().text().await.unwrap();
        assert!(body.contains("data-search-term=\"charmander\" style=\"display: none\""));
    }

    #[tokio::test]
    async fn test_entities_query_looks_up_store() {
        let (base, _) = spawn_app().await;
        let entities: Vec<Value> = reqwest::get(format!("{}/api/v1/entities?q=saur", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let names: Vec<&str> = entities.iter().map(|e| e["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["Bulbasaur", "Ivysaur"]);
        assert!(entities.iter().all(|e| e["visible"] == json!(true)));

        let all: Vec<Value> = reqwest::get(format!("{}/api/v1/entities", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_activate_and_close_overlay() {
        let (base, state) = spawn_app().await;
        let client = reqwest::Client::new();

        let body = client
            .post(format!("{}/activate", base))
            .form(&[("trigger", trigger_of(&state, 0))])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("class=\"modal is-visible\""));
        assert!(body.contains("src=\"art.svg\""));
        assert!(body.contains("<dd class=\"pokemon-height\">0.7</dd>"));

        let status: Value = reqwest::get(format!("{}/api/v1/status", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(status, json!({ "entities": 3, "loading": false, "overlay_open": true }));

        let body = client
            .post(format!("{}/overlay/close", base))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("class=\"modal is-not-visible\""));
    }

    #[tokio::test]
    async fn test_failed_detail_still_opens_overlay() {
        let (base, state) = spawn_app().await;
        let response = reqwest::Client::new()
            .post(format!("{}/activate", base))
            .form(&[("trigger", trigger_of(&state, 2))])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body = response.text().await.unwrap();
        assert!(body.contains("<h2 class=\"modal-title\" id=\"pokemon-title\">Charmander</h2>"));
        assert!(body.contains("<ul class=\"type-list\"></ul>"));
        assert!(!state.session.entity_views()[2].detailed);
    }

    #[tokio::test]
    async fn test_unknown_trigger_is_not_found() {
        let (base, _) = spawn_app().await;
        let response = reqwest::Client::new()
            .post(format!("{}/activate", base))
            .form(&[("trigger", "1")])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_stylesheet() {
        let (base, _) = spawn_app().await;
        let response = reqwest::get(format!("{}/static/style.css", base)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "text/css"
        );

        let missing = reqwest::get(format!("{}/static/nope.js", base)).await.unwrap();
        assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
