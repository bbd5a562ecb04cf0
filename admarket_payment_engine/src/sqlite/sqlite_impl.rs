//! `SqliteDatabase` is a concrete implementation of an Admarket Payment engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`traits`] module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{catalog, db_url, new_pool, payments};
use crate::{
    catalog_objects::{Channel, Package, Product},
    db_types::{NewPaymentRecord, OrderId, PaymentId, PaymentRecord},
    traits::{CatalogStore, CatalogStoreError, PaymentStore, PaymentStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl PaymentStore for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn create_payment(&self, payment: NewPaymentRecord) -> Result<PaymentRecord, PaymentStoreError> {
        let mut conn = self.pool.acquire().await?;
        let record = payments::insert_payment(payment, &mut conn).await?;
        debug!("🗃️ Payment [{}] for order {} has been saved in the DB", record.id, record.order_id);
        Ok(record)
    }

    async fn fetch_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::fetch_payment(id, &mut conn).await
    }

    async fn fetch_payments_for_order(&self, order_id: &OrderId) -> Result<Vec<PaymentRecord>, PaymentStoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::fetch_payments_for_order(order_id, &mut conn).await
    }

    async fn claim_tx_hash(&self, id: &PaymentId, tx_hash: &str) -> Result<Option<PaymentRecord>, PaymentStoreError> {
        let mut conn = self.pool.acquire().await?;
        let record = payments::claim_tx_hash(id, tx_hash, &mut conn).await?;
        if let Some(r) = &record {
            debug!("🗃️ Payment [{}] is now {} with a claimed hash on file", r.id, r.status);
        }
        Ok(record)
    }

    async fn complete_payment(&self, id: &PaymentId, tx_hash: &str) -> Result<Option<PaymentRecord>, PaymentStoreError> {
        let mut conn = self.pool.acquire().await?;
        let record = payments::complete_payment(id, tx_hash, &mut conn).await?;
        if let Some(r) = &record {
            debug!("🗃️ Payment [{}] is now {}. The record is terminal.", r.id, r.status);
        }
        Ok(record)
    }

    async fn expire_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError> {
        let mut conn = self.pool.acquire().await?;
        let record = payments::expire_payment(id, &mut conn).await?;
        if let Some(r) = &record {
            debug!("🗃️ Payment [{}] is now {}. The record is terminal.", r.id, r.status);
        }
        Ok(record)
    }

    async fn close(&mut self) -> Result<(), PaymentStoreError> {
        self.pool.close().await;
        Ok(())
    }
}

impl CatalogStore for SqliteDatabase {
    async fn fetch_channels(&self) -> Result<Vec<Channel>, CatalogStoreError> {
        let mut conn = self.pool.acquire().await?;
        catalog::fetch_channels(&mut conn).await
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogStoreError> {
        let mut conn = self.pool.acquire().await?;
        catalog::fetch_products(&mut conn).await
    }

    async fn fetch_packages(&self) -> Result<Vec<Package>, CatalogStoreError> {
        let mut conn = self.pool.acquire().await?;
        catalog::fetch_packages(&mut conn).await
    }
}

impl SqliteDatabase {
    /// Creates a new database API object
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
