//! Defines the transaction models and database queries.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, MAX_DATE_RANGE_DAYS,
    category::{TransactionType, get_category},
    history::add_to_history,
    user::UserId,
};

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned, always greater than zero.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// Whether money was spent or earned.
    pub transaction_type: TransactionType,
    /// The name of the category the transaction was recorded under.
    ///
    /// Kept as text so that deleting a category leaves its transactions intact.
    pub category: String,
}

/// A validated transaction that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub description: String,
    pub date: Date,
    pub transaction_type: TransactionType,
    pub category: String,
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction.
    pub amount: f64,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Whether money was spent or earned.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The name of one of the user's categories of the same type.
    pub category: String,
}

impl TransactionForm {
    /// Check the form fields and convert them into a [NewTransaction].
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidAmount] if the amount is not a positive number.
    pub fn validate(self) -> Result<NewTransaction, Error> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        Ok(NewTransaction {
            amount: self.amount,
            description: self.description.trim().to_owned(),
            date: self.date,
            transaction_type: self.transaction_type,
            category: self.category.trim().to_owned(),
        })
    }
}

/// Record a transaction for `user_id` and add it to their history totals.
///
/// The transaction and the totals are written in one SQL transaction.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the user has no category with the
///   transaction's name and type,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    user_id: &UserId,
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    match get_category(
        user_id,
        &transaction.category,
        transaction.transaction_type,
        connection,
    ) {
        Ok(_) => {}
        Err(Error::NotFound) => return Err(Error::InvalidCategory(transaction.category)),
        Err(error) => return Err(error),
    }

    let tx = connection.unchecked_transaction()?;

    let created = tx
        .prepare(
            "INSERT INTO \"transaction\" (user_id, amount, description, date, type, category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, amount, description, date, type, category",
        )?
        .query_row(
            (
                user_id.as_str(),
                transaction.amount,
                &transaction.description,
                transaction.date,
                transaction.transaction_type,
                &transaction.category,
            ),
            map_transaction_row,
        )?;

    add_to_history(
        user_id,
        created.date,
        created.transaction_type,
        created.amount,
        &tx,
    )?;

    tx.commit()?;

    Ok(created)
}

/// Retrieve the user's transactions dated from `from` to `to` inclusive,
/// newest first.
///
/// # Errors
///
/// Returns an [Error::InvalidDateRange] if `to` is before `from` or the range
/// spans more than [MAX_DATE_RANGE_DAYS] days.
pub fn get_transactions_in_range(
    user_id: &UserId,
    from: Date,
    to: Date,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let span = (to - from).whole_days();
    if !(0..=MAX_DATE_RANGE_DAYS).contains(&span) {
        return Err(Error::InvalidDateRange(from, to));
    }

    connection
        .prepare(
            "SELECT id, amount, description, date, type, category FROM \"transaction\"
             WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3
             ORDER BY date DESC, id DESC",
        )?
        .query_map((user_id.as_str(), from, to), map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Create the transaction table.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            amount REAL NOT NULL CHECK (amount > 0),
            description TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('expense', 'income')),
            category TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
    )?;

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        description: row.get(2)?,
        date: row.get(3)?,
        transaction_type: row.get(4)?,
        category: row.get(5)?,
    })
}
