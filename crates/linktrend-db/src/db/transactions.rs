//! Payment-request repository
//!
//! Owns the payment-request workflow: submission with duplicate-reference
//! protection, pending review listings, and the approve/reject transitions.
//! Approval is the one cross-entity write in the system - the status flip and
//! the user's unlock append commit in a single database transaction.

use super::users::is_unique_violation;
use chrono::Utc;
use linktrend_core::models::{NewTransaction, Transaction, TransactionStatus};
use linktrend_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a payment claim as `pending`.
    ///
    /// A reused `trx_ref` fails with `DuplicateReference`. The pre-check
    /// serves the common case; the unique index on `trx_ref` closes the race,
    /// so a second record can never exist.
    pub async fn create(&self, new: NewTransaction) -> Result<Transaction, AppError> {
        let existing =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM transactions WHERE trx_ref = $1")
                .bind(&new.trx_ref)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateReference(new.trx_ref));
        }

        let result = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (
                id, video_id, user_id, amount, method,
                mobile_number, trx_ref, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.video_id)
        .bind(new.user_id)
        .bind(new.amount)
        .bind(new.method)
        .bind(&new.mobile_number)
        .bind(&new.trx_ref)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(transaction) => Ok(transaction),
            Err(e) if is_unique_violation(&e) => Err(AppError::DuplicateReference(new.trx_ref)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Transaction>, AppError> {
        let transactions =
            sqlx::query_as::<_, Transaction>("SELECT * FROM transactions ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(transactions)
    }

    pub async fn list_pending(&self) -> Result<Vec<Transaction>, AppError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE status = 'pending' ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// Approve a pending payment request and unlock the video for its user.
    ///
    /// Both writes run in one transaction. A missing transaction and an
    /// already-resolved one are deliberately indistinguishable: the
    /// `status = 'pending'` guard reports `NotFound` for both, which also
    /// makes concurrent approvals race-safe. The unlock append is idempotent,
    /// and a missing user row is tolerated as a no-op.
    pub async fn approve(&self, id: Uuid) -> Result<Transaction, AppError> {
        let mut tx = self.pool.begin().await?;

        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions SET status = 'approved'
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

        sqlx::query(
            r#"
            UPDATE users
            SET unlocked_videos = array_append(unlocked_videos, $1)
            WHERE id = $2 AND NOT ($1 = ANY(unlocked_videos))
            "#,
        )
        .bind(transaction.video_id)
        .bind(transaction.user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug_assert_eq!(transaction.status, TransactionStatus::Approved);
        tracing::info!(
            transaction_id = %transaction.id,
            user_id = %transaction.user_id,
            video_id = %transaction.video_id,
            "Payment request approved"
        );

        Ok(transaction)
    }

    /// Reject a pending payment request. No other side effect.
    pub async fn reject(&self, id: Uuid) -> Result<Transaction, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions SET status = 'rejected'
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

        tracing::info!(transaction_id = %transaction.id, "Payment request rejected");

        Ok(transaction)
    }
}
