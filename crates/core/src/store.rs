//! # Entity Store
//!
//! Ordered, append-only sequence of entities. Insertion order is the order
//! the API returned them in; nothing is ever removed or reordered.

use crate::entity::{self, Entity, EntityHandle};
use crate::error::{CatalogError, Result};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared, append-only entity store. Clones share the same sequence.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Arc<RwLock<Vec<EntityHandle>>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate record, or log and drop it if it has no `name`.
    pub fn add(&self, candidate: Value) {
        if let Err(e) = self.try_add(candidate) {
            tracing::error!(error = %e, "Rejected catalog entity");
        }
    }

    /// Checked form of [`EntityStore::add`]
    ///
    /// The candidate must be a JSON object with a `name` key. Only presence
    /// is checked: a string is taken as is, `null` becomes an empty name and
    /// any other value its JSON text. The detail reference is taken from
    /// `detail_reference`, falling back to the wire name `url`.
    pub fn try_add(&self, candidate: Value) -> Result<EntityHandle> {
        let record = candidate.as_object().ok_or_else(|| {
            CatalogError::validation(format!("expected an object, got {}", candidate))
        })?;

        let name = match record.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
            None => {
                return Err(CatalogError::validation(format!(
                    "missing `name` in {}",
                    candidate
                )))
            }
        };

        let detail_reference = record
            .get("detail_reference")
            .or_else(|| record.get("url"))
            .and_then(Value::as_str)
            .unwrap_or_default();

        let handle = Entity::new(name, detail_reference).into_handle();
        self.entities
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle.clone());
        Ok(handle)
    }

    /// Entities whose name contains `fragment`, in insertion order
    ///
    /// Plain substring match on the stored (display) name, so it is case
    /// sensitive. An empty fragment matches everything.
    pub fn search(&self, fragment: &str) -> Vec<EntityHandle> {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|handle| entity::read(handle).name().contains(fragment))
            .cloned()
            .collect()
    }

    /// All entities in insertion order. Handles are shared with the store.
    pub fn get_all(&self) -> Vec<EntityHandle> {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
