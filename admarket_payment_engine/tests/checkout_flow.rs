use crate::support::prepare_env::{prepare_test_env, random_db_path};
use apg_common::UsdAmount;
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};
use admarket_payment_engine::{
    currencies::{CryptoCurrency, CURRENCY_OPTIONS},
    db_types::{NewPaymentRecord, OrderId, PaymentId, PaymentRecord, PaymentStatus},
    events::EventProducers,
    traits::{PaymentStore, PaymentStoreError},
    CheckoutFlow,
    CheckoutState,
    SqliteDatabase,
};
use tokio::runtime::Runtime;

mod support;

const VALID_HASH: &str = "deadbeefdeadbeefdeadbeefdeadbeef";

async fn setup() -> CheckoutFlow<SqliteDatabase> {
    let url = random_db_path();
    prepare_test_env(&url).await;
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database");
    CheckoutFlow::new(db, EventProducers::default(), OrderId::generate(), UsdAmount::from_dollars(650))
}

async fn tear_down(mut flow: CheckoutFlow<SqliteDatabase>) {
    if let Err(e) = flow.api_mut().db_mut().close().await {
        error!("🚀️ Failed to close database: {e}");
    }
    Sqlite::drop_database(flow.api().db().url()).await.unwrap();
}

#[test]
fn happy_path_reaches_success() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let mut flow = setup().await;
        assert!(matches!(flow.state(), CheckoutState::Select));
        assert_eq!(flow.currency_menu().len(), 2);
        assert!(flow.qr_code_url().is_none());

        let state = flow.choose_currency(CryptoCurrency::Btc).await.expect("Error choosing currency");
        let payment = state.payment().expect("Payment record missing").clone();
        assert!(payment.id.as_str().starts_with("cp_"));
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.wallet_address, "34maYP8LaEYLL4axS8mheRavMLisjtJC7J");
        assert_eq!(
            flow.qr_code_url().as_deref(),
            Some("https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=34maYP8LaEYLL4axS8mheRavMLisjtJC7J")
        );

        flow.confirm_paid().expect("Error confirming payment");
        assert_eq!(flow.state().name(), "verify");

        let state = flow.submit_hash(VALID_HASH).await.expect("Error submitting hash");
        assert_eq!(state.name(), "success");
        let completed = state.payment().expect("Payment record missing").clone();
        assert_eq!(completed.status, PaymentStatus::Completed);
        assert_eq!(completed.tx_hash_verified.as_deref(), Some(VALID_HASH));
        assert!(flow.last_error().is_none());

        // The store carries the same terminal record.
        let stored =
            flow.api().fetch_payment(&completed.id).await.expect("Error fetching payment").expect("Record vanished");
        assert_eq!(stored.status, PaymentStatus::Completed);
        tear_down(flow).await;
    });
}

#[test]
fn bad_hashes_keep_the_shopper_on_the_verify_step() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let mut flow = setup().await;
        flow.choose_currency(CryptoCurrency::UsdtTrc20).await.expect("Error choosing currency");
        flow.confirm_paid().expect("Error confirming payment");

        let state = flow.submit_hash("not-a-hash").await.expect("Error submitting hash");
        assert_eq!(state.name(), "verify");
        assert_eq!(flow.last_error(), Some("Невірний формат TX Hash"));

        // An empty claim is caught locally, without a round trip.
        let state = flow.submit_hash("   ").await.expect("Error submitting hash");
        assert_eq!(state.name(), "verify");
        assert_eq!(flow.last_error(), Some("Введіть TX Hash"));

        // The shopper corrects the hash and the same session completes.
        let state = flow.submit_hash(VALID_HASH).await.expect("Error submitting hash");
        assert_eq!(state.name(), "success");
        assert!(flow.last_error().is_none());
        tear_down(flow).await;
    });
}

#[test]
fn out_of_order_actions_are_rejected() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let mut flow = setup().await;
        assert!(flow.confirm_paid().is_err());
        assert!(flow.submit_hash(VALID_HASH).await.is_err());
        assert!(flow.back_to_payment().is_err());

        flow.choose_currency(CryptoCurrency::Btc).await.expect("Error choosing currency");
        let err = flow.choose_currency(CryptoCurrency::Btc).await.expect_err("Expected a rejected transition");
        assert_eq!(err.to_string(), "The 'choose_currency' action is not available in the 'payment' step");
        // The failed action leaves the session where it was.
        assert_eq!(flow.state().name(), "payment");
        tear_down(flow).await;
    });
}

#[test]
fn changing_the_method_opens_a_fresh_record() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let mut flow = setup().await;
        flow.choose_currency(CryptoCurrency::Btc).await.expect("Error choosing currency");
        let first = flow.state().payment().expect("Payment record missing").id.clone();

        flow.choose_other_method().expect("Error returning to the menu");
        assert!(matches!(flow.state(), CheckoutState::Select));

        flow.choose_currency(CryptoCurrency::UsdtTrc20).await.expect("Error choosing currency");
        let second = flow.state().payment().expect("Payment record missing").clone();
        assert_ne!(second.id, first);
        assert_eq!(second.wallet_address, "TA6cwUPYLBg76bUVFwBmHdmU7J8PCLBmpK");

        // Both attempts are on the order's history; the abandoned one stays pending.
        let records = flow.api().payments_for_order(flow.order_id()).await.expect("Error fetching payments");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.order_id == *flow.order_id()));
        tear_down(flow).await;
    });
}

#[test]
fn stepping_back_from_verify_keeps_the_same_record() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let mut flow = setup().await;
        flow.choose_currency(CryptoCurrency::Btc).await.expect("Error choosing currency");
        let id = flow.state().payment().expect("Payment record missing").id.clone();
        flow.confirm_paid().expect("Error confirming payment");
        flow.back_to_payment().expect("Error stepping back");
        assert_eq!(flow.state().name(), "payment");
        assert_eq!(flow.state().payment().expect("Payment record missing").id, id);
        tear_down(flow).await;
    });
}

// A store that fails every call, standing in for a dead or missing database.
#[derive(Debug, Clone)]
struct BrokenDb;

impl PaymentStore for BrokenDb {
    async fn create_payment(&self, _payment: NewPaymentRecord) -> Result<PaymentRecord, PaymentStoreError> {
        Err(PaymentStoreError::DatabaseError("no such table: crypto_payments".to_string()))
    }

    async fn fetch_payment(&self, _id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError> {
        Ok(None)
    }

    async fn fetch_payments_for_order(&self, _order_id: &OrderId) -> Result<Vec<PaymentRecord>, PaymentStoreError> {
        Err(PaymentStoreError::DatabaseError("no such table: crypto_payments".to_string()))
    }

    async fn claim_tx_hash(&self, _id: &PaymentId, _tx_hash: &str) -> Result<Option<PaymentRecord>, PaymentStoreError> {
        Err(PaymentStoreError::DatabaseError("no such table: crypto_payments".to_string()))
    }

    async fn complete_payment(
        &self,
        _id: &PaymentId,
        _tx_hash: &str,
    ) -> Result<Option<PaymentRecord>, PaymentStoreError> {
        Err(PaymentStoreError::DatabaseError("no such table: crypto_payments".to_string()))
    }

    async fn expire_payment(&self, _id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError> {
        Err(PaymentStoreError::DatabaseError("no such table: crypto_payments".to_string()))
    }

    fn url(&self) -> &str {
        "broken://"
    }
}

#[test]
fn a_dead_store_never_blocks_the_shopper() {
    let _ = env_logger::try_init();
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let mut flow =
            CheckoutFlow::new(BrokenDb, EventProducers::default(), OrderId::generate(), UsdAmount::from_dollars(299));

        let state = flow.choose_currency(CryptoCurrency::Btc).await.expect("Error choosing currency");
        let payment = state.payment().expect("Payment record missing");
        assert!(payment.id.is_temporary());
        assert_eq!(payment.wallet_address, "34maYP8LaEYLL4axS8mheRavMLisjtJC7J");

        flow.confirm_paid().expect("Error confirming payment");
        let state = flow.submit_hash(VALID_HASH).await.expect("Error submitting hash");
        assert_eq!(state.name(), "success");
        let completed = state.payment().expect("Payment record missing");
        assert_eq!(completed.status, PaymentStatus::Completed);
        assert_eq!(completed.tx_hash_provided.as_deref(), Some(VALID_HASH));
        assert_eq!(completed.tx_hash_verified.as_deref(), Some(VALID_HASH));

        // The missing-record short-circuit comes ahead of the format check, so a temporary id
        // accepts any non-empty claim. Only the local empty check still applies.
        let mut flow =
            CheckoutFlow::new(BrokenDb, EventProducers::default(), OrderId::generate(), UsdAmount::from_dollars(299));
        flow.choose_currency(CryptoCurrency::Btc).await.expect("Error choosing currency");
        flow.confirm_paid().expect("Error confirming payment");
        let state = flow.submit_hash("").await.expect("Error submitting hash");
        assert_eq!(state.name(), "verify");
        assert_eq!(flow.last_error(), Some("Введіть TX Hash"));
        let state = flow.submit_hash("xyz").await.expect("Error submitting hash");
        assert_eq!(state.name(), "success");

        // Every currency option degrades the same way.
        for option in CURRENCY_OPTIONS {
            let mut flow = CheckoutFlow::new(
                BrokenDb,
                EventProducers::default(),
                OrderId::generate(),
                UsdAmount::from_dollars(100),
            );
            let state = flow.choose_currency(option.id).await.expect("Error choosing currency");
            let payment = state.payment().expect("Payment record missing");
            assert!(payment.id.is_temporary());
            assert!(!payment.id.as_str().is_empty());
            assert_eq!(payment.wallet_address, option.address);
        }
    });
}
