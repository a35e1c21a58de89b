//! Transactions record money spent or earned, and feed the history totals.

mod core;
mod create_endpoint;
mod transactions_page;

pub use self::core::{
    NewTransaction, Transaction, TransactionForm, TransactionId, create_transaction,
    create_transaction_table, get_transactions_in_range,
};
pub use create_endpoint::create_transaction_endpoint;
pub use transactions_page::{TransactionsQuery, get_transactions_page};

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

/// The state needed for the transaction pages and endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
