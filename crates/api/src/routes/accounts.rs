//! Bank account routes: CRUD, balance, deposits, withdrawals, history.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use banklink_core::ledger::types::NewAccount;
use banklink_db::{
    AccountRepository, LedgerRepository,
    repositories::{account::AccountError, ledger::LedgerStoreError},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser};

use super::responses::{
    AccountResponse, TransactionResponse, internal_error_response, ledger_error_response,
};

/// Creates the account routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts", post(create_account))
        .route("/accounts/{account_id}", get(get_account))
        .route("/accounts/{account_id}", delete(delete_account))
        .route("/accounts/{account_id}/balance", get(get_balance))
        .route("/accounts/{account_id}/deposit", post(deposit))
        .route("/accounts/{account_id}/withdraw", post(withdraw))
        .route("/accounts/{account_id}/transactions", get(list_transactions))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account identifier (must be unique).
    pub id: String,
    /// Account type label, e.g. "Cheque" or "Savings".
    #[serde(rename = "type")]
    pub account_type: String,
    /// Opening balance (default: 0).
    pub initial_balance: Option<Decimal>,
    /// Permitted overdraft (default: 0).
    pub overdraft_limit: Option<Decimal>,
    /// ISO 4217 currency code (default: ZAR).
    pub currency: Option<String>,
}

/// Request body for a deposit or withdrawal.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    /// Amount to move. Must be strictly positive.
    pub amount: Decimal,
    /// Optional override for the generated description.
    pub description: Option<String>,
}

fn account_error_response(err: &AccountError) -> axum::response::Response {
    match err {
        AccountError::Ledger(e) => ledger_error_response(e),
        AccountError::Database(e) => {
            error!(error = %e, "Account store error");
            internal_error_response()
        }
    }
}

fn ledger_store_error_response(err: &LedgerStoreError) -> axum::response::Response {
    match err {
        LedgerStoreError::Ledger(e) => ledger_error_response(e),
        LedgerStoreError::Database(e) => {
            error!(error = %e, "Ledger store error");
            internal_error_response()
        }
    }
}

/// GET /accounts - List all accounts.
async fn list_accounts(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_accounts().await {
        Ok(accounts) => {
            let accounts: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();
            (StatusCode::OK, Json(json!({ "accounts": accounts }))).into_response()
        }
        Err(e) => account_error_response(&e),
    }
}

/// POST /accounts - Create a new account.
async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    let input = NewAccount {
        id: payload.id,
        account_type: payload.account_type,
        initial_balance: payload.initial_balance.unwrap_or_default(),
        overdraft_limit: payload.overdraft_limit.unwrap_or_default(),
        currency: payload.currency.unwrap_or_else(|| "ZAR".to_string()),
    };

    match repo.create_account(input, Some(auth.user_id())).await {
        Ok(account) => {
            info!(account_id = %account.id, user_id = %auth.user_id(), "Account created");
            (StatusCode::CREATED, Json(AccountResponse::from(account))).into_response()
        }
        Err(e) => account_error_response(&e),
    }
}

/// GET /accounts/{account_id} - Fetch a single account.
async fn get_account(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(account_id): Path<String>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.find_account(&account_id).await {
        Ok(Some(account)) => (StatusCode::OK, Json(AccountResponse::from(account))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "account_not_found",
                "message": format!("account not found: {account_id}")
            })),
        )
            .into_response(),
        Err(e) => account_error_response(&e),
    }
}

/// DELETE /accounts/{account_id} - Delete an account at zero balance.
async fn delete_account(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(account_id): Path<String>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.delete_account(&account_id).await {
        Ok(()) => {
            info!(account_id = %account_id, "Account deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => account_error_response(&e),
    }
}

/// GET /accounts/{account_id}/balance - Current balance only.
async fn get_balance(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(account_id): Path<String>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.find_account(&account_id).await {
        Ok(Some(account)) => (
            StatusCode::OK,
            Json(json!({
                "account_id": account.id,
                "balance": account.balance.to_string(),
                "currency": account.currency,
            })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "account_not_found",
                "message": format!("account not found: {account_id}")
            })),
        )
            .into_response(),
        Err(e) => account_error_response(&e),
    }
}

/// POST /accounts/{account_id}/deposit - Deposit funds.
async fn deposit(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(account_id): Path<String>,
    Json(payload): Json<AmountRequest>,
) -> impl IntoResponse {
    let repo = LedgerRepository::new((*state.db).clone());

    match repo
        .deposit(&account_id, payload.amount, payload.description)
        .await
    {
        Ok((account, record)) => {
            info!(account_id = %account.id, reference = %record.reference, "Deposit accepted");
            (
                StatusCode::OK,
                Json(json!({
                    "account": AccountResponse::from(account),
                    "transaction": TransactionResponse::from(record),
                })),
            )
                .into_response()
        }
        Err(e) => ledger_store_error_response(&e),
    }
}

/// POST /accounts/{account_id}/withdraw - Withdraw funds.
async fn withdraw(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(account_id): Path<String>,
    Json(payload): Json<AmountRequest>,
) -> impl IntoResponse {
    let repo = LedgerRepository::new((*state.db).clone());

    match repo
        .withdraw(&account_id, payload.amount, payload.description)
        .await
    {
        Ok((account, record)) => {
            info!(account_id = %account.id, reference = %record.reference, "Withdrawal accepted");
            (
                StatusCode::OK,
                Json(json!({
                    "account": AccountResponse::from(account),
                    "transaction": TransactionResponse::from(record),
                })),
            )
                .into_response()
        }
        Err(e) => ledger_store_error_response(&e),
    }
}

/// GET /accounts/{account_id}/transactions - History, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(account_id): Path<String>,
) -> impl IntoResponse {
    let repo = LedgerRepository::new((*state.db).clone());

    match repo.history(&account_id).await {
        Ok(records) => {
            let transactions: Vec<TransactionResponse> =
                records.into_iter().map(TransactionResponse::from).collect();
            (
                StatusCode::OK,
                Json(json!({ "transactions": transactions })),
            )
                .into_response()
        }
        Err(e) => ledger_store_error_response(&e),
    }
}
