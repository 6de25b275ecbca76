//! # Catalog Errors
//!
//! The two failure kinds of a catalog session. Both are logged and swallowed
//! by the log-and-continue entry points; the `*_checked` variants hand them
//! back to the caller.

use thiserror::Error;

/// Result alias used across the core crate
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Which remote call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkOperation {
    /// The fixed-size list page
    SummaryPage,
    /// A single entity's detail record
    Detail,
    /// Building the HTTP client, before any request is sent
    ClientSetup,
}

impl std::fmt::Display for NetworkOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SummaryPage => write!(f, "summary page fetch"),
            Self::Detail => write!(f, "detail fetch"),
            Self::ClientSetup => write!(f, "HTTP client setup"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A candidate entity was rejected at the store boundary
    #[error("not a valid catalog entity: {reason}")]
    Validation { reason: String },

    /// Transport error, non-success status, timeout or unparseable body
    #[error("{operation} failed: {reason}")]
    Network {
        operation: NetworkOperation,
        reason: String,
    },
}

impl CatalogError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn network(operation: NetworkOperation, reason: impl std::fmt::Display) -> Self {
        Self::Network {
            operation,
            reason: reason.to_string(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
