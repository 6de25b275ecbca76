//! # Loader
//!
//! Fetch → parse → normalize → store, for the list page and for one
//! entity's details. Owns the loading indicator around each fetch.
//!
//! Failures are logged and swallowed by `load_summaries` / `load_detail`.
//! The `*_checked` variants return them instead; both hide the indicator
//! before the error surfaces.

use crate::entity::{self, capitalize, EntityDetails, EntityHandle};
use crate::error::Result;
use crate::gateway::{DetailRecord, RemoteGateway};
use crate::indicator::LoadingIndicator;
use crate::store::EntityStore;
use serde_json::json;
use std::sync::Arc;

/// Source units are tenths (decimetres, hectograms)
const UNIT_DIVISOR: f64 = 10.0;

#[derive(Clone)]
pub struct Loader {
    gateway: Arc<dyn RemoteGateway>,
    store: EntityStore,
    indicator: LoadingIndicator,
}

impl Loader {
    pub fn new(
        gateway: Arc<dyn RemoteGateway>,
        store: EntityStore,
        indicator: LoadingIndicator,
    ) -> Self {
        Self {
            gateway,
            store,
            indicator,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn indicator(&self) -> &LoadingIndicator {
        &self.indicator
    }

    /// Load the list page into the store, logging any failure
    pub async fn load_summaries(&self) {
        if let Err(e) = self.load_summaries_checked().await {
            tracing::error!(error = %e, "Failed to load catalog list");
        }
    }

    /// Load the list page, returning the number of entities added
    pub async fn load_summaries_checked(&self) -> Result<usize> {
        self.indicator.show();
        let result = self.gateway.fetch_summary_page().await;
        self.indicator.hide();

        let stubs = result?;
        let before = self.store.len();
        for stub in stubs {
            self.store.add(json!({
                "name": capitalize(&stub.name),
                "detail_reference": stub.url,
            }));
        }

        let added = self.store.len() - before;
        tracing::info!(added, total = self.store.len(), "Catalog list loaded");
        Ok(added)
    }

    /// Load one entity's details in place, logging any failure
    pub async fn load_detail(&self, entity: &EntityHandle) {
        if let Err(e) = self.load_detail_checked(entity).await {
            let name = entity::read(entity).name().to_string();
            tracing::error!(error = %e, entity = %name, "Failed to load entity details");
        }
    }

    /// Load one entity's details in place
    ///
    /// On failure the entity is left exactly as it was.
    pub async fn load_detail_checked(&self, entity: &EntityHandle) -> Result<()> {
        let reference = entity::read(entity).detail_reference().to_string();

        self.indicator.show();
        let result = self.gateway.fetch_detail(&reference).await;
        self.indicator.hide();

        let details = to_details(result?);
        let mut guard = entity::write(entity);
        guard.apply_details(details);
        tracing::debug!(entity = %guard.name(), "Entity details loaded");
        Ok(())
    }
}

fn to_details(record: DetailRecord) -> EntityDetails {
    EntityDetails {
        types: record.type_names(),
        abilities: record.ability_names(),
        height: f64::from(record.height) / UNIT_DIVISOR,
        weight: f64::from(record.weight) / UNIT_DIVISOR,
        image_url: record.sprites.front_default,
        artwork_url: record.sprites.other.dream_world.front_default,
    }
}
