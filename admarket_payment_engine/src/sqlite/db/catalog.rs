use sqlx::SqliteConnection;

use crate::{
    catalog_objects::{Channel, Package, Product},
    traits::CatalogStoreError,
};

pub async fn fetch_channels(conn: &mut SqliteConnection) -> Result<Vec<Channel>, CatalogStoreError> {
    let channels =
        sqlx::query_as(r#"SELECT * FROM channels WHERE is_active = TRUE ORDER BY subscribers DESC"#)
            .fetch_all(conn)
            .await?;
    Ok(channels)
}

pub async fn fetch_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, CatalogStoreError> {
    let products = sqlx::query_as(r#"SELECT * FROM products WHERE is_active = TRUE"#).fetch_all(conn).await?;
    Ok(products)
}

pub async fn fetch_packages(conn: &mut SqliteConnection) -> Result<Vec<Package>, CatalogStoreError> {
    let packages = sqlx::query_as(r#"SELECT * FROM packages WHERE is_active = TRUE ORDER BY price"#)
        .fetch_all(conn)
        .await?;
    Ok(packages)
}
