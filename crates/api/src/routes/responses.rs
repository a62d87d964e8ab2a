//! Shared response types and error mapping for the banking routes.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use banklink_core::ledger::LedgerError;
use banklink_db::entities::{bank_accounts, transactions};
use sea_orm::ActiveEnum;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

/// Response body for a bank account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account identifier.
    pub id: String,
    /// Account type label, e.g. "Cheque".
    #[serde(rename = "type")]
    pub account_type: String,
    /// Current balance as a decimal string.
    pub balance: String,
    /// Permitted overdraft as a decimal string.
    pub overdraft_limit: String,
    /// Lifecycle status: active, frozen or closed.
    pub status: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl From<bank_accounts::Model> for AccountResponse {
    fn from(row: bank_accounts::Model) -> Self {
        Self {
            id: row.id,
            account_type: row.account_type,
            balance: row.balance.to_string(),
            overdraft_limit: row.overdraft_limit.to_string(),
            status: row.status.to_value(),
            currency: row.currency,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// Response body for a recorded transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction identifier.
    pub id: Uuid,
    /// Human-facing transaction reference.
    pub reference: String,
    /// Account the posting belongs to.
    pub account_id: String,
    /// Posting direction.
    pub kind: String,
    /// Amount as a decimal string, always positive.
    pub amount: String,
    /// Account balance after this posting.
    pub balance_after: String,
    /// Posting description.
    pub description: String,
    /// Correlates the two legs of a transfer.
    pub transfer_id: Option<Uuid>,
    /// Posting timestamp (RFC 3339).
    pub created_at: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(row: transactions::Model) -> Self {
        Self {
            id: row.id,
            reference: row.reference,
            account_id: row.account_id,
            kind: row.kind.to_value(),
            amount: row.amount.to_string(),
            balance_after: row.balance_after.to_string(),
            description: row.description,
            transfer_id: row.transfer_id,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// Maps a ledger rule violation to its HTTP response.
pub fn ledger_error_response(err: &LedgerError) -> Response {
    let (status, error) = match err {
        LedgerError::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "invalid_amount"),
        LedgerError::InvalidTransfer => (StatusCode::BAD_REQUEST, "invalid_transfer"),
        LedgerError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found"),
        LedgerError::DuplicateAccount(_) => (StatusCode::CONFLICT, "duplicate_account"),
        LedgerError::InsufficientFunds { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_funds")
        }
        LedgerError::AccountNotActive { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "account_not_active")
        }
        LedgerError::NonZeroBalance { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "non_zero_balance")
        }
    };

    (
        status,
        Json(json!({ "error": error, "message": err.to_string() })),
    )
        .into_response()
}

/// Standard response for unexpected storage failures.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An unexpected error occurred"
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(LedgerError::InvalidAmount(dec!(-1)), StatusCode::BAD_REQUEST)]
    #[case(LedgerError::InvalidTransfer, StatusCode::BAD_REQUEST)]
    #[case(LedgerError::AccountNotFound("ACC001".into()), StatusCode::NOT_FOUND)]
    #[case(LedgerError::DuplicateAccount("ACC001".into()), StatusCode::CONFLICT)]
    #[case(
        LedgerError::InsufficientFunds { requested: dec!(100), available: dec!(50) },
        StatusCode::UNPROCESSABLE_ENTITY
    )]
    #[case(
        LedgerError::NonZeroBalance { id: "ACC001".into(), balance: dec!(10) },
        StatusCode::UNPROCESSABLE_ENTITY
    )]
    fn test_ledger_error_status_codes(#[case] err: LedgerError, #[case] expected: StatusCode) {
        assert_eq!(ledger_error_response(&err).status(), expected);
    }

    #[test]
    fn test_internal_error_response_is_500() {
        assert_eq!(
            internal_error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
