//! # Catalog Entities
//!
//! One catalog item. An entity starts in summary state (name and detail
//! reference only) and moves to detailed state exactly once, when its
//! detail record is fetched. Details are written as a whole, so a reader
//! never observes a half-populated entity.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle to an entity owned by the store
pub type EntityHandle = Arc<RwLock<Entity>>;

/// Attributes that only exist after a successful detail fetch
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDetails {
    /// Front sprite
    pub image_url: Option<String>,
    /// Official artwork shown in the overlay
    pub artwork_url: Option<String>,
    /// Height in decimal units (source decimetres / 10)
    pub height: f64,
    /// Weight in decimal units (source hectograms / 10)
    pub weight: f64,
    /// Category labels, in source order
    pub types: Vec<String>,
    /// Capability labels, in source order
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    detail_reference: String,
    details: Option<EntityDetails>,
}

impl Entity {
    /// Create an entity in summary state
    pub fn new(name: impl Into<String>, detail_reference: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail_reference: detail_reference.into(),
            details: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn detail_reference(&self) -> &str {
        &self.detail_reference
    }

    pub fn details(&self) -> Option<&EntityDetails> {
        self.details.as_ref()
    }

    pub fn is_detailed(&self) -> bool {
        self.details.is_some()
    }

    /// Move the entity to detailed state. Name and reference are untouched.
    pub fn apply_details(&mut self, details: EntityDetails) {
        self.details = Some(details);
    }

    pub fn image_url(&self) -> Option<&str> {
        self.details.as_ref().and_then(|d| d.image_url.as_deref())
    }

    pub fn artwork_url(&self) -> Option<&str> {
        self.details.as_ref().and_then(|d| d.artwork_url.as_deref())
    }

    pub fn height(&self) -> Option<f64> {
        self.details.as_ref().map(|d| d.height)
    }

    pub fn weight(&self) -> Option<f64> {
        self.details.as_ref().map(|d| d.weight)
    }

    pub fn types(&self) -> Option<&[String]> {
        self.details.as_ref().map(|d| d.types.as_slice())
    }

    pub fn abilities(&self) -> Option<&[String]> {
        self.details.as_ref().map(|d| d.abilities.as_slice())
    }

    /// Wrap into a shared handle
    pub fn into_handle(self) -> EntityHandle {
        Arc::new(RwLock::new(self))
    }
}

/// Read an entity, ignoring lock poisoning (entities hold plain data)
pub fn read(handle: &EntityHandle) -> RwLockReadGuard<'_, Entity> {
    handle.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write(handle: &EntityHandle) -> RwLockWriteGuard<'_, Entity> {
    handle.write().unwrap_or_else(PoisonError::into_inner)
}

/// Capitalize the first character, leave the rest unchanged
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
