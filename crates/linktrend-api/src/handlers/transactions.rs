//! Payment-request endpoints: submission and the admin review workflow.

use axum::{
    extract::{Path, State},
    Json,
};
use linktrend_core::models::{NewTransaction, Transaction};
use linktrend_core::{validation, AppError};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionEnvelope {
    pub success: bool,
    pub transaction: Transaction,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionsEnvelope {
    pub success: bool,
    pub transactions: Vec<Transaction>,
}

fn parse_transaction_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound("Transaction not found".to_string()))
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "transactions",
    request_body = NewTransaction,
    responses(
        (status = 200, description = "Payment request recorded as pending", body = TransactionEnvelope),
        (status = 400, description = "Invalid submission or duplicate reference", body = ErrorResponse)
    )
)]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    ValidatedJson(new): ValidatedJson<NewTransaction>,
) -> Result<Json<TransactionEnvelope>, HttpAppError> {
    validation::validate_transaction(&new)?;

    let transaction = state.transactions.create(new).await?;
    tracing::info!(
        transaction_id = %transaction.id,
        video_id = %transaction.video_id,
        "Payment request submitted"
    );

    Ok(Json(TransactionEnvelope {
        success: true,
        transaction,
    }))
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "transactions",
    responses(
        (status = 200, description = "All payment requests, newest first", body = TransactionsEnvelope),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse)
    )
)]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TransactionsEnvelope>, HttpAppError> {
    let transactions = state.transactions.list_all().await?;
    Ok(Json(TransactionsEnvelope {
        success: true,
        transactions,
    }))
}

#[utoipa::path(
    get,
    path = "/api/transactions/pending",
    tag = "transactions",
    responses(
        (status = 200, description = "Pending payment requests, newest first", body = TransactionsEnvelope),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse)
    )
)]
pub async fn list_pending_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TransactionsEnvelope>, HttpAppError> {
    let transactions = state.transactions.list_pending().await?;
    Ok(Json(TransactionsEnvelope {
        success: true,
        transactions,
    }))
}

#[utoipa::path(
    post,
    path = "/api/transactions/{id}/approve",
    tag = "transactions",
    params(("id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Approved; video unlocked for the user", body = TransactionEnvelope),
        (status = 404, description = "Transaction missing or already resolved", body = ErrorResponse)
    )
)]
pub async fn approve_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TransactionEnvelope>, HttpAppError> {
    let id = parse_transaction_id(&id)?;
    let transaction = state.transactions.approve(id).await?;

    Ok(Json(TransactionEnvelope {
        success: true,
        transaction,
    }))
}

#[utoipa::path(
    post,
    path = "/api/transactions/{id}/reject",
    tag = "transactions",
    params(("id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Rejected", body = TransactionEnvelope),
        (status = 404, description = "Transaction missing or already resolved", body = ErrorResponse)
    )
)]
pub async fn reject_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TransactionEnvelope>, HttpAppError> {
    let id = parse_transaction_id(&id)?;
    let transaction = state.transactions.reject(id).await?;

    Ok(Json(TransactionEnvelope {
        success: true,
        transaction,
    }))
}
