use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;
use uuid::Uuid;

/// The fixed set of mobile-money providers payment proof can name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "payment_method", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Bkash,
    Nagad,
    Rocket,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PaymentMethod::Bkash => write!(f, "bkash"),
            PaymentMethod::Nagad => write!(f, "nagad"),
            PaymentMethod::Rocket => write!(f, "rocket"),
        }
    }
}

/// Payment-request state. `Approved` and `Rejected` are terminal; the only
/// permitted transitions are out of `Pending`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "transaction_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Rejected,
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Approved => write!(f, "approved"),
            TransactionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A payment request: a user's claim that a real-world mobile-money payment
/// was made for a video. `trx_ref` is the anti-duplicate key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub method: PaymentMethod,
    pub mobile_number: String,
    pub trx_ref: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

/// A payment claim as submitted by a user.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub method: PaymentMethod,
    pub mobile_number: String,
    pub trx_ref: String,
}
