use std::fmt::Debug;

use log::*;

use crate::{
    catalog_objects::{Channel, Package, Product},
    fixtures::{fixture_channels, fixture_packages, fixture_products},
    traits::CatalogStore,
};

/// Catalog reads for the storefront.
///
/// These calls are infallible by construction. A broken or empty store is demoted to a warning
/// and the compiled-in fixture set is served instead, so a storefront page never renders blank
/// because the database is away.
pub struct CatalogApi<B> {
    db: B,
}

impl<B> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi")
    }
}

impl<B> CatalogApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> CatalogApi<B>
where B: CatalogStore
{
    pub async fn channels(&self) -> Vec<Channel> {
        match self.db.fetch_channels().await {
            Ok(rows) if !rows.is_empty() => rows,
            Ok(_) => {
                info!("🛒️ The channel catalog is empty. Serving the fixture channels.");
                fixture_channels()
            },
            Err(e) => {
                warn!("🛒️ Could not read channels from the store ({e}). Serving the fixture channels.");
                fixture_channels()
            },
        }
    }

    pub async fn products(&self) -> Vec<Product> {
        match self.db.fetch_products().await {
            Ok(rows) if !rows.is_empty() => rows,
            Ok(_) => {
                info!("🛒️ The product catalog is empty. Serving the fixture products.");
                fixture_products()
            },
            Err(e) => {
                warn!("🛒️ Could not read products from the store ({e}). Serving the fixture products.");
                fixture_products()
            },
        }
    }

    pub async fn packages(&self) -> Vec<Package> {
        match self.db.fetch_packages().await {
            Ok(rows) if !rows.is_empty() => rows,
            Ok(_) => {
                info!("🛒️ The package catalog is empty. Serving the fixture packages.");
                fixture_packages()
            },
            Err(e) => {
                warn!("🛒️ Could not read packages from the store ({e}). Serving the fixture packages.");
                fixture_packages()
            },
        }
    }
}
