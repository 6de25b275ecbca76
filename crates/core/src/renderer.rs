//! # Renderer
//!
//! Materializes one list node per entity and populates the detail overlay.
//! Triggers are bound to their entity in a table owned by the renderer;
//! activating a trigger loads the entity's details and then renders the
//! overlay, whether or not the load succeeded.

use crate::dom::{self, Document, NodeId, SharedDocument};
use crate::entity::{self, Entity, EntityHandle};
use crate::loader::Loader;
use crate::page::PageLayout;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

pub const SEARCH_TERM_ATTRIBUTE: &str = "data-search-term";

const VISIBLE_CLASS: &str = "is-visible";
const NOT_VISIBLE_CLASS: &str = "is-not-visible";

pub struct Renderer {
    document: SharedDocument,
    layout: PageLayout,
    loader: Loader,
    bindings: Mutex<HashMap<NodeId, EntityHandle>>,
}

impl Renderer {
    pub fn new(document: SharedDocument, layout: PageLayout, loader: Loader) -> Self {
        Self {
            document,
            layout,
            loader,
            bindings: Mutex::new(HashMap::new()),
        }
    }

    /// Append one list node per entity, in the given order
    ///
    /// Existing list content is kept; calling this twice renders twice.
    pub fn render_summary_list(&self, entities: &[EntityHandle]) {
        let mut doc = dom::lock(&self.document);
        let mut bindings = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);

        for handle in entities {
            let entity = entity::read(handle);
            let trigger = append_list_item(&mut doc, self.layout.list, &entity);
            bindings.insert(trigger, handle.clone());
        }
        tracing::debug!(count = entities.len(), "Rendered summary list");
    }

    /// Entity bound to a trigger node, if any
    pub fn bound_entity(&self, trigger: NodeId) -> Option<EntityHandle> {
        self.bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&trigger)
            .cloned()
    }

    /// Trigger nodes in list order
    pub fn triggers(&self) -> Vec<NodeId> {
        let doc = dom::lock(&self.document);
        doc.children(self.layout.list)
            .iter()
            .filter_map(|item| doc.children(*item).first().copied())
            .collect()
    }

    /// Dispatch a trigger activation. `None` if the node is not a trigger.
    pub async fn activate(&self, trigger: NodeId) -> Option<EntityHandle> {
        let handle = self.bound_entity(trigger)?;
        self.on_activate(&handle).await;
        Some(handle)
    }

    /// Load details, then render the overlay with whatever the entity holds
    pub async fn on_activate(&self, entity: &EntityHandle) {
        self.loader.load_detail(entity).await;
        self.render_detail_overlay(entity);
    }

    /// Clear and refill each overlay region, then show the overlay
    pub fn render_detail_overlay(&self, handle: &EntityHandle) {
        // document before entity, same order as the list render
        let mut doc = dom::lock(&self.document);
        let entity = entity::read(handle);
        let layout = &self.layout;

        doc.set_text(layout.title, entity.name());

        fill_list(&mut doc, layout.type_list, entity.types().unwrap_or_default());

        match entity.artwork_url() {
            Some(url) => doc.set_attribute(layout.image, "src", url),
            None => doc.remove_attribute(layout.image, "src"),
        }
        doc.set_attribute(
            layout.image,
            "alt",
            format!("Official artwork representing {}", entity.name()),
        );

        doc.set_text(layout.height, format_measure(entity.height()));
        doc.set_text(layout.weight, format_measure(entity.weight()));

        fill_list(
            &mut doc,
            layout.ability_list,
            entity.abilities().unwrap_or_default(),
        );

        doc.remove_class(layout.overlay, NOT_VISIBLE_CLASS);
        doc.add_class(layout.overlay, VISIBLE_CLASS);
        tracing::debug!(entity = %entity.name(), detailed = entity.is_detailed(), "Rendered detail overlay");
    }

    pub fn close_overlay(&self) {
        let mut doc = dom::lock(&self.document);
        doc.remove_class(self.layout.overlay, VISIBLE_CLASS);
        doc.add_class(self.layout.overlay, NOT_VISIBLE_CLASS);
    }

    pub fn is_overlay_open(&self) -> bool {
        dom::lock(&self.document).has_class(self.layout.overlay, VISIBLE_CLASS)
    }
}

/// `li` with the search key and a trigger button; returns the button
fn append_list_item(doc: &mut Document, list: NodeId, entity: &Entity) -> NodeId {
    let item = doc.append_new(list, "li", &["list-group-item"]);
    doc.set_attribute(item, SEARCH_TERM_ATTRIBUTE, entity.name().to_lowercase());

    let button = doc.append_new(item, "button", &["pokemon-button", "btn", "glow-on-hover"]);
    doc.set_attribute(button, "type", "submit");
    doc.set_attribute(button, "name", "trigger");
    doc.set_attribute(button, "value", button.to_string());
    doc.set_text(button, entity.name());
    button
}

fn fill_list(doc: &mut Document, list: NodeId, labels: &[String]) {
    doc.clear(list);
    for label in labels {
        let item = doc.append_new(list, "li", &[]);
        doc.set_text(item, label.as_str());
    }
}

fn format_measure(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityDetails;
    use crate::error::{CatalogError, NetworkOperation, Result};
    use crate::gateway::{DetailRecord, RemoteGateway, SummaryStub};
    use crate::indicator::LoadingIndicator;
    use crate::store::EntityStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    /// Detail fetches succeed only for references listed here
    struct DetailGateway {
        known: HashMap<String, serde_json::Value>,
    }

    #[async_trait]
    impl RemoteGateway for DetailGateway {
        async fn fetch_summary_page(&self) -> Result<Vec<SummaryStub>> {
            Ok(Vec::new())
        }

        async fn fetch_detail(&self, detail_reference: &str) -> Result<DetailRecord> {
            let value = self.known.get(detail_reference).cloned().ok_or_else(|| {
                CatalogError::network(NetworkOperation::Detail, "404 Not Found")
            })?;
            serde_json::from_value(value).map_err(|e| CatalogError::network(NetworkOperation::Detail, e))
        }
    }

    struct Fixture {
        document: SharedDocument,
        layout: PageLayout,
        store: EntityStore,
        renderer: Renderer,
    }

    fn fixture() -> Fixture {
        let mut known = HashMap::new();
        known.insert(
            "U1".to_string(),
            json!({
                "sprites": { "front_default": "f1.png", "other": { "dream_world": { "front_default": "d1.svg" } } },
                "height": 7,
                "weight": 69,
                "types": [{ "type": { "name": "grass" } }, { "type": { "name": "poison" } }],
                "abilities": [{ "ability": { "name": "overgrow" } }]
            }),
        );

        let mut doc = Document::new("html");
        let layout = PageLayout::build(&mut doc, "Test");
        let document = doc.into_shared();
        let store = EntityStore::new();
        let indicator =
            LoadingIndicator::new(document.clone(), layout.loading_area, layout.loading_wrapper);
        let loader = Loader::new(Arc::new(DetailGateway { known }), store.clone(), indicator);
        let renderer = Renderer::new(document.clone(), layout, loader);

        Fixture {
            document,
            layout,
            store,
            renderer,
        }
    }

    fn seed(store: &EntityStore) {
        store.add(json!({ "name": "Bulbasaur", "detail_reference": "U1" }));
        store.add(json!({ "name": "Ivysaur", "detail_reference": "U2" }));
    }

    fn list_texts(doc: &Document, list: NodeId) -> Vec<String> {
        doc.children(list)
            .iter()
            .map(|n| doc.text(*n).unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_render_summary_list() {
        let fx = fixture();
        seed(&fx.store);

        fx.renderer.render_summary_list(&fx.store.get_all());

        let doc = dom::lock(&fx.document);
        let items = doc.children(fx.layout.list).to_vec();
        assert_eq!(items.len(), 2);
        assert_eq!(doc.attribute(items[0], SEARCH_TERM_ATTRIBUTE), Some("bulbasaur"));
        assert_eq!(doc.attribute(items[1], SEARCH_TERM_ATTRIBUTE), Some("ivysaur"));

        let button = doc.children(items[0])[0];
        assert_eq!(doc.element(button).tag(), "button");
        assert_eq!(doc.text(button), Some("Bulbasaur"));
        assert_eq!(doc.attribute(button, "value"), Some(button.to_string().as_str()));
    }

    #[test]
    fn test_render_summary_list_accumulates() {
        let fx = fixture();
        seed(&fx.store);

        fx.renderer.render_summary_list(&fx.store.get_all());
        fx.renderer.render_summary_list(&fx.store.get_all());

        assert_eq!(dom::lock(&fx.document).children(fx.layout.list).len(), 4);
        assert_eq!(fx.renderer.triggers().len(), 4);
    }

    #[test]
    fn test_triggers_are_bound_to_entities() {
        let fx = fixture();
        seed(&fx.store);
        fx.renderer.render_summary_list(&fx.store.get_all());

        let triggers = fx.renderer.triggers();
        let bound = fx.renderer.bound_entity(triggers[1]).unwrap();
        assert!(Arc::ptr_eq(&bound, &fx.store.get_all()[1]));
        assert!(fx.renderer.bound_entity(fx.layout.title).is_none());
    }

    #[tokio::test]
    async fn test_activate_loads_and_renders_overlay() {
        let fx = fixture();
        seed(&fx.store);
        fx.renderer.render_summary_list(&fx.store.get_all());
        assert!(!fx.renderer.is_overlay_open());

        let trigger = fx.renderer.triggers()[0];
        let handle = fx.renderer.activate(trigger).await.unwrap();
        assert!(entity::read(&handle).is_detailed());

        let doc = dom::lock(&fx.document);
        let l = fx.layout;
        assert_eq!(doc.text(l.title), Some("Bulbasaur"));
        assert_eq!(list_texts(&doc, l.type_list), ["grass", "poison"]);
        assert_eq!(list_texts(&doc, l.ability_list), ["overgrow"]);
        assert_eq!(doc.attribute(l.image, "src"), Some("d1.svg"));
        assert_eq!(
            doc.attribute(l.image, "alt"),
            Some("Official artwork representing Bulbasaur")
        );
        assert_eq!(doc.text(l.height), Some("0.7"));
        assert_eq!(doc.text(l.weight), Some("6.9"));
        assert!(doc.has_class(l.overlay, "is-visible"));
        assert!(!doc.has_class(l.overlay, "is-not-visible"));
    }

    #[tokio::test]
    async fn test_failed_detail_still_renders_overlay() {
        let fx = fixture();
        seed(&fx.store);
        fx.renderer.render_summary_list(&fx.store.get_all());

        // Ivysaur's reference is unknown to the gateway
        let trigger = fx.renderer.triggers()[1];
        let handle = fx.renderer.activate(trigger).await.unwrap();

        let ivysaur = entity::read(&handle);
        assert!(ivysaur.types().is_none());
        assert!(ivysaur.abilities().is_none());
        assert!(ivysaur.height().is_none());
        assert!(ivysaur.weight().is_none());

        let doc = dom::lock(&fx.document);
        let l = fx.layout;
        assert!(doc.has_class(l.overlay, "is-visible"));
        assert_eq!(doc.text(l.title), Some("Ivysaur"));
        assert!(doc.children(l.type_list).is_empty());
        assert!(doc.children(l.ability_list).is_empty());
        assert_eq!(doc.attribute(l.image, "src"), None);
        assert_eq!(doc.text(l.height), Some(""));
    }

    #[tokio::test]
    async fn test_overlay_regions_are_replaced_not_appended() {
        let fx = fixture();
        seed(&fx.store);
        fx.renderer.render_summary_list(&fx.store.get_all());
        let triggers = fx.renderer.triggers();

        fx.renderer.activate(triggers[0]).await;
        fx.renderer.activate(triggers[0]).await;
        {
            let doc = dom::lock(&fx.document);
            assert_eq!(doc.children(fx.layout.type_list).len(), 2);
        }

        // stale details from Bulbasaur must not leak into Ivysaur's overlay
        fx.renderer.activate(triggers[1]).await;
        let doc = dom::lock(&fx.document);
        assert!(doc.children(fx.layout.type_list).is_empty());
        assert_eq!(doc.attribute(fx.layout.image, "src"), None);
    }

    #[tokio::test]
    async fn test_activate_unknown_node() {
        let fx = fixture();
        assert!(fx.renderer.activate(NodeId::from_raw(9999)).await.is_none());
        assert!(!fx.renderer.is_overlay_open());
    }

    #[test]
    fn test_close_overlay() {
        let fx = fixture();
        let handle = Entity::new("Eevee", "U133").into_handle();
        entity::write(&handle).apply_details(EntityDetails {
            image_url: None,
            artwork_url: None,
            height: 0.3,
            weight: 6.5,
            types: vec!["normal".to_string()],
            abilities: vec![],
        });

        fx.renderer.render_detail_overlay(&handle);
        assert!(fx.renderer.is_overlay_open());

        fx.renderer.close_overlay();
        assert!(!fx.renderer.is_overlay_open());
        let doc = dom::lock(&fx.document);
        assert!(doc.has_class(fx.layout.overlay, "is-not-visible"));
    }
}
