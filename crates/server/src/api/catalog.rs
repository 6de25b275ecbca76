//! # Catalog API
//!
//! JSON view of the session: entities with their visibility on the page,
//! name lookup against the store, and status.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use catalog_core::EntityView;
use serde::{Deserialize, Serialize};

use crate::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct EntityQuery {
    /// Name fragment to look up; omitted lists every entity
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub entities: usize,
    pub loading: bool,
    pub overlay_open: bool,
}

pub fn catalog_routes() -> Router<SharedState> {
    Router::new()
        .route("/entities", get(list_entities))
        .route("/status", get(get_status))
}

async fn list_entities(
    State(state): State<SharedState>,
    Query(query): Query<EntityQuery>,
) -> Json<Vec<EntityView>> {
    let views = match query.q.as_deref() {
        Some(q) => state.session.find_entities(q),
        None => state.session.entity_views(),
    };
    Json(views)
}

async fn get_status(State(state): State<SharedState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        entities: state.session.store().len(),
        loading: state.session.is_loading(),
        overlay_open: state.session.is_overlay_open(),
    })
}
