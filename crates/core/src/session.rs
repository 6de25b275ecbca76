//! # Catalog Session
//!
//! One page's worth of catalog state: the document, the entity store, the
//! loader and the renderer, constructed together and owned by whoever hosts
//! the page.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_core::config::CatalogConfig;
//! use catalog_core::session::CatalogSession;
//!
//! let session = CatalogSession::with_http(CatalogConfig::from_env())?;
//! session.start().await;
//! session.search("saur");
//! let html = session.html();
//! ```

use crate::config::CatalogConfig;
use crate::dom::{self, Document, NodeId, SharedDocument};
use crate::entity::{self, EntityHandle};
use crate::error::Result;
use crate::gateway::{HttpGateway, RemoteGateway};
use crate::indicator::LoadingIndicator;
use crate::loader::Loader;
use crate::page::PageLayout;
use crate::renderer::Renderer;
use crate::search;
use crate::store::EntityStore;
use serde::Serialize;
use std::sync::Arc;

pub const PAGE_HEADING: &str = "Pokédex";

/// Read-only view of one entity, for JSON surfaces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub name: String,
    pub detail_reference: String,
    pub detailed: bool,
    pub visible: bool,
}

pub struct CatalogSession {
    document: SharedDocument,
    layout: PageLayout,
    store: EntityStore,
    loader: Loader,
    renderer: Renderer,
}

impl CatalogSession {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        let mut doc = Document::new("html");
        let layout = PageLayout::build(&mut doc, PAGE_HEADING);
        let document = doc.into_shared();

        let store = EntityStore::new();
        let indicator =
            LoadingIndicator::new(document.clone(), layout.loading_area, layout.loading_wrapper);
        let loader = Loader::new(gateway, store.clone(), indicator);
        let renderer = Renderer::new(document.clone(), layout, loader.clone());

        Self {
            document,
            layout,
            store,
            loader,
            renderer,
        }
    }

    /// Session backed by the HTTP gateway
    pub fn with_http(config: CatalogConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpGateway::new(config)?)))
    }

    /// Load the list, then render it
    pub async fn start(&self) {
        self.loader.load_summaries().await;
        self.renderer.render_summary_list(&self.store.get_all());
    }

    /// Activate a trigger node. `None` if the node is not a trigger.
    pub async fn activate(&self, trigger: NodeId) -> Option<EntityHandle> {
        self.renderer.activate(trigger).await
    }

    /// Apply a search query; the query is echoed into the search input
    pub fn search(&self, query: &str) -> usize {
        let mut doc = dom::lock(&self.document);
        doc.set_attribute(self.layout.search_input, "value", query);
        search::apply_filter(&mut doc, self.layout.list, query)
    }

    pub fn close_overlay(&self) {
        self.renderer.close_overlay();
    }

    pub fn is_overlay_open(&self) -> bool {
        self.renderer.is_overlay_open()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.indicator().is_visible()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    /// Entities in list order with their current visibility
    pub fn entity_views(&self) -> Vec<EntityView> {
        self.views_of(&self.store.get_all())
    }

    /// Entities whose display name contains `fragment`, looked up in the
    /// store. The page's search filter is left alone.
    pub fn find_entities(&self, fragment: &str) -> Vec<EntityView> {
        self.views_of(&self.store.search(fragment))
    }

    fn views_of(&self, handles: &[EntityHandle]) -> Vec<EntityView> {
        let all = self.store.get_all();
        let doc = dom::lock(&self.document);
        let items = doc.children(self.layout.list);

        handles
            .iter()
            .map(|handle| {
                // list items are rendered in store order
                let visible = all
                    .iter()
                    .position(|h| Arc::ptr_eq(h, handle))
                    .and_then(|i| items.get(i))
                    .is_some_and(|item| !doc.is_hidden(*item));
                let entity = entity::read(handle);
                EntityView {
                    name: entity.name().to_string(),
                    detail_reference: entity.detail_reference().to_string(),
                    detailed: entity.is_detailed(),
                    visible,
                }
            })
            .collect()
    }

    /// Serialize the whole page
    pub fn html(&self) -> String {
        dom::lock(&self.document).to_html()
    }
}
