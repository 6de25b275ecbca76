//! # Remote Gateway
//!
//! The two read-only GETs a catalog session makes: one fixed-size list page
//! and one detail record per activated entity. Single attempt, no retry.
//!
//! ## Wire Shapes
//!
//! ```text
//! GET {api_url}?limit=N  → { results: [ { name, url }, ... ] }
//! GET {url}              → { sprites: { front_default, other: { dream_world: { front_default } } },
//!                            height, weight,
//!                            types: [ { type: { name } } ],
//!                            abilities: [ { ability: { name } } ] }
//! ```

use crate::config::CatalogConfig;
use crate::error::{CatalogError, NetworkOperation, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One entry of the list page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStub {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SummaryPage {
    results: Vec<SummaryStub>,
}

/// Raw detail record, in source units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub sprites: Sprites,
    /// Decimetres
    pub height: u32,
    /// Hectograms
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(default)]
    pub dream_world: DreamWorld,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DreamWorld {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

impl DetailRecord {
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.kind.name.clone()).collect()
    }

    pub fn ability_names(&self) -> Vec<String> {
        self.abilities.iter().map(|a| a.ability.name.clone()).collect()
    }
}

/// Source of catalog data
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Fetch the fixed-size list page
    async fn fetch_summary_page(&self) -> Result<Vec<SummaryStub>>;

    /// Fetch one entity's detail record
    async fn fetch_detail(&self, detail_reference: &str) -> Result<DetailRecord>;
}

/// reqwest-backed gateway
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl HttpGateway {
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                CatalogError::network(
                    NetworkOperation::ClientSetup,
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: NetworkOperation,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CatalogError::network(operation, e))?;

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::network(operation, format!("unparseable body: {}", e)))
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn fetch_summary_page(&self) -> Result<Vec<SummaryStub>> {
        let request = self
            .client
            .get(&self.config.api_url)
            .query(&[("limit", self.config.page_limit)]);

        let page: SummaryPage = self
            .get_json(request, NetworkOperation::SummaryPage)
            .await?;
        tracing::debug!(count = page.results.len(), "Fetched summary page");
        Ok(page.results)
    }

    async fn fetch_detail(&self, detail_reference: &str) -> Result<DetailRecord> {
        let request = self.client.get(detail_reference);
        self.get_json(request, NetworkOperation::Detail).await
    }
}
