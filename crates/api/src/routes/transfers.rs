//! Transfer routes.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use banklink_db::{LedgerRepository, repositories::ledger::LedgerStoreError};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser};

use super::responses::{TransactionResponse, internal_error_response, ledger_error_response};

/// Creates the transfer routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/transfers", post(create_transfer))
}

/// Request body for a transfer between two accounts.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Source account id.
    pub from_account_id: String,
    /// Destination account id.
    pub to_account_id: String,
    /// Amount to move. Must be strictly positive.
    pub amount: Decimal,
}

/// POST /transfers - Move funds between two accounts atomically.
async fn create_transfer(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<TransferRequest>,
) -> impl IntoResponse {
    let repo = LedgerRepository::new((*state.db).clone());

    match repo
        .transfer(
            &payload.from_account_id,
            &payload.to_account_id,
            payload.amount,
        )
        .await
    {
        Ok((debit, credit)) => {
            info!(
                from = %debit.account_id,
                to = %credit.account_id,
                reference = %debit.reference,
                "Transfer accepted"
            );
            (
                StatusCode::OK,
                Json(json!({
                    "debit": TransactionResponse::from(debit),
                    "credit": TransactionResponse::from(credit),
                })),
            )
                .into_response()
        }
        Err(LedgerStoreError::Ledger(e)) => ledger_error_response(&e),
        Err(LedgerStoreError::Database(e)) => {
            error!(error = %e, "Transfer store error");
            internal_error_response()
        }
    }
}
