use log::*;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewPaymentRecord, OrderId, PaymentId, PaymentRecord},
    traits::PaymentStoreError,
};

/// Inserts a new payment record with a fresh id and `pending` status. The id is generated here
/// so that callers never invent their own persisted ids.
pub async fn insert_payment(
    payment: NewPaymentRecord,
    conn: &mut SqliteConnection,
) -> Result<PaymentRecord, PaymentStoreError> {
    let id = PaymentId::fresh();
    let record: PaymentRecord = sqlx::query_as(
        r#"
            INSERT INTO crypto_payments (id, order_id, amount_usd, crypto_currency, wallet_address, status, expires_at)
            VALUES ($1, $2, $3, $4, $5, 'pending', $6)
            RETURNING *;
        "#,
    )
    .bind(id.clone())
    .bind(payment.order_id)
    .bind(payment.amount_usd)
    .bind(payment.crypto_currency)
    .bind(payment.wallet_address)
    .bind(payment.expires_at)
    .fetch_one(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(err) if err.is_unique_violation() => PaymentStoreError::PaymentAlreadyExists(id),
        _ => PaymentStoreError::from(e),
    })?;
    debug!("📝️ Payment [{}] inserted for order {}", record.id, record.order_id);
    Ok(record)
}

pub async fn fetch_payment(
    id: &PaymentId,
    conn: &mut SqliteConnection,
) -> Result<Option<PaymentRecord>, PaymentStoreError> {
    let record = sqlx::query_as(r#"SELECT * FROM crypto_payments WHERE id = ?"#)
        .bind(id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(record)
}

pub async fn fetch_payments_for_order(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Vec<PaymentRecord>, PaymentStoreError> {
    // created_at has second resolution, so rowid breaks ties between back-to-back inserts.
    let records = sqlx::query_as(r#"SELECT * FROM crypto_payments WHERE order_id = ? ORDER BY created_at, rowid"#)
        .bind(order_id.as_str())
        .fetch_all(conn)
        .await?;
    Ok(records)
}

/// Records the transaction hash the shopper claims to have sent and moves the record to
/// `verifying`. Only live records are touched; `None` means the record is missing or already
/// terminal.
pub async fn claim_tx_hash(
    id: &PaymentId,
    tx_hash: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<PaymentRecord>, PaymentStoreError> {
    let record: Option<PaymentRecord> = sqlx::query_as(
        r#"
            UPDATE crypto_payments
            SET tx_hash_provided = $2, status = 'verifying', updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND status IN ('pending', 'verifying')
            RETURNING *;
        "#,
    )
    .bind(id.as_str())
    .bind(tx_hash)
    .fetch_optional(conn)
    .await?;
    trace!("📝️ Result of claim_tx_hash for [{id}]: updated={}", record.is_some());
    Ok(record)
}

/// The conditional completion update. The status filter makes concurrent completions settle on a
/// single winner: exactly one caller sees the updated row, the rest get `None`.
pub async fn complete_payment(
    id: &PaymentId,
    tx_hash: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<PaymentRecord>, PaymentStoreError> {
    let record: Option<PaymentRecord> = sqlx::query_as(
        r#"
            UPDATE crypto_payments
            SET status = 'completed',
                tx_hash_verified = $2,
                verified_at = CURRENT_TIMESTAMP,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND status IN ('pending', 'verifying')
            RETURNING *;
        "#,
    )
    .bind(id.as_str())
    .bind(tx_hash)
    .fetch_optional(conn)
    .await?;
    match &record {
        Some(r) => debug!("📝️ Payment [{id}] completed with hash {}", r.tx_hash_verified.as_deref().unwrap_or("")),
        None => debug!("📝️ Payment [{id}] was not completed. It is missing or already terminal."),
    }
    Ok(record)
}

/// Marks a lapsed record `expired`. Same precondition as completion, so an expiry racing a
/// verification cannot clobber a completed payment.
pub async fn expire_payment(
    id: &PaymentId,
    conn: &mut SqliteConnection,
) -> Result<Option<PaymentRecord>, PaymentStoreError> {
    let record: Option<PaymentRecord> = sqlx::query_as(
        r#"
            UPDATE crypto_payments
            SET status = 'expired', updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND status IN ('pending', 'verifying')
            RETURNING *;
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(conn)
    .await?;
    trace!("📝️ Result of expire_payment for [{id}]: updated={}", record.is_some());
    Ok(record)
}
