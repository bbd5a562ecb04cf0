use thiserror::Error;

use crate::catalog_objects::{Channel, Package, Product};

/// Read-only access to the storefront catalog.
///
/// The catalog is owned by an external backend and may be empty or unreachable. Callers should go
/// through [`crate::CatalogApi`], which degrades to compiled-in fixture data instead of surfacing
/// read failures to shoppers.
#[allow(async_fn_in_trait)]
pub trait CatalogStore: Clone {
    /// Every listed channel, largest audience first.
    async fn fetch_channels(&self) -> Result<Vec<Channel>, CatalogStoreError>;

    /// Every placement product across all channels.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogStoreError>;

    /// The fixed promotion bundles, cheapest first.
    async fn fetch_packages(&self) -> Result<Vec<Package>, CatalogStoreError>;
}

#[derive(Debug, Clone, Error)]
pub enum CatalogStoreError {
    #[error("There is an internal database engine issue (configuration/uptime etc.): {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for CatalogStoreError {
    fn from(e: sqlx::Error) -> Self {
        CatalogStoreError::DatabaseError(e.to_string())
    }
}
