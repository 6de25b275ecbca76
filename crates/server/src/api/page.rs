//! # Page Routes
//!
//! The browser-facing surface: the rendered page, trigger activation and
//! overlay close. Every route answers with the full page HTML.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use catalog_core::dom::NodeId;
use catalog_core::page::{ACTIVATE_ACTION, CLOSE_OVERLAY_ACTION};
use serde::Deserialize;

use crate::SharedState;

/// Search query from the page's search form
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Posted by a list trigger button
#[derive(Debug, Deserialize)]
pub struct ActivateForm {
    pub trigger: usize,
}

pub fn page_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(index))
        .route(ACTIVATE_ACTION, post(activate))
        .route(CLOSE_OVERLAY_ACTION, post(close_overlay))
}

/// Render the page with the search filter applied
async fn index(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    state.session.search(&params.q);
    Html(state.session.html())
}

/// Load the activated entity's details and show the overlay
async fn activate(
    State(state): State<SharedState>,
    Form(form): Form<ActivateForm>,
) -> Result<Html<String>, StatusCode> {
    let trigger = NodeId::from_raw(form.trigger);
    match state.session.activate(trigger).await {
        Some(_) => Ok(Html(state.session.html())),
        None => {
            tracing::warn!(trigger = form.trigger, "Activation for unknown trigger");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

async fn close_overlay(State(state): State<SharedState>) -> Html<String> {
    state.session.close_overlay();
    Html(state.session.html())
}
