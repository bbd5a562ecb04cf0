use admarket_payment_engine::{
    catalog_objects::{Channel, Package, Product},
    db_types::{NewPaymentRecord, OrderId, PaymentId, PaymentRecord},
    traits::{CatalogStore, CatalogStoreError, PaymentStore, PaymentStoreError},
};
use mockall::mock;

mock! {
    pub PaymentDb {}

    impl Clone for PaymentDb {
        fn clone(&self) -> Self;
    }

    impl PaymentStore for PaymentDb {
        fn url(&self) -> &str;
        async fn create_payment(&self, payment: NewPaymentRecord) -> Result<PaymentRecord, PaymentStoreError>;
        async fn fetch_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError>;
        async fn fetch_payments_for_order(&self, order_id: &OrderId) -> Result<Vec<PaymentRecord>, PaymentStoreError>;
        async fn claim_tx_hash(&self, id: &PaymentId, tx_hash: &str) -> Result<Option<PaymentRecord>, PaymentStoreError>;
        async fn complete_payment(&self, id: &PaymentId, tx_hash: &str) -> Result<Option<PaymentRecord>, PaymentStoreError>;
        async fn expire_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError>;
    }
}

mock! {
    pub CatalogDb {}

    impl Clone for CatalogDb {
        fn clone(&self) -> Self;
    }

    impl CatalogStore for CatalogDb {
        async fn fetch_channels(&self) -> Result<Vec<Channel>, CatalogStoreError>;
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogStoreError>;
        async fn fetch_packages(&self) -> Result<Vec<Package>, CatalogStoreError>;
    }
}
