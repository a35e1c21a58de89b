//! Defines the endpoint for recording a new transaction.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;

use crate::{
    Error,
    alert::Alert,
    transaction::{TransactionForm, TransactionState, create_transaction},
    user::UserId,
};

/// A route handler for recording a transaction.
///
/// Responds with a success alert so the form can be reused for the next
/// transaction.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_transaction(&user_id, transaction, &connection) {
        Ok(transaction) => Alert::Success {
            message: "Transaction created".to_owned(),
            details: format!(
                "Recorded {} of {} under {} on {}.",
                transaction.transaction_type,
                transaction.amount,
                transaction.category,
                transaction.date
            ),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_alert_response()
        }
    }
}
