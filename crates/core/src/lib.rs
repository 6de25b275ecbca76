//! # Catalog Core
//!
//! Everything a catalog page does, minus the HTTP server hosting it:
//! fetch a fixed-size list from a remote JSON API, render it as a searchable
//! list, and load one entity's details into a modal overlay on activation.
//!
//! ## Architecture
//!
//! - `store` - Append-only entity store
//! - `gateway` - `RemoteGateway` trait and the reqwest-backed `HttpGateway`
//! - `loader` - Fetch/normalize/store orchestration and the loading indicator
//! - `renderer` - List nodes, trigger bindings and the detail overlay
//! - `search` - Substring filter over rendered list nodes
//! - `dom` / `page` - The document the above mutate, and its fixed regions
//! - `session` - Wires the pieces into one constructed page session
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_core::{CatalogConfig, CatalogSession};
//!
//! let session = CatalogSession::with_http(CatalogConfig::default())?;
//! session.start().await;
//! println!("{}", session.html());
//! ```

pub mod config;
pub mod dom;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod indicator;
pub mod loader;
pub mod page;
pub mod renderer;
pub mod search;
pub mod session;
pub mod store;

pub use config::CatalogConfig;
pub use entity::{Entity, EntityDetails, EntityHandle};
pub use error::{CatalogError, Result};
pub use gateway::{HttpGateway, RemoteGateway};
pub use session::{CatalogSession, EntityView};
pub use store::EntityStore;
