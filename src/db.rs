//! Database initialization for the application's tables.

use rusqlite::Connection;

use crate::{
    Error, category::create_category_table, history::create_history_tables,
    transaction::create_transaction_table, user::create_user_table,
};

/// Create the tables for all of the domain models if they do not exist yet.
///
/// The tables are created inside a single SQL transaction so that a failure
/// leaves the database untouched.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute_batch("BEGIN;")?;

    let result = create_user_table(connection)
        .and_then(|_| create_category_table(connection))
        .and_then(|_| create_transaction_table(connection))
        .and_then(|_| create_history_tables(connection));

    match result {
        Ok(_) => {
            connection.execute_batch("COMMIT;")?;
            Ok(())
        }
        Err(error) => {
            tracing::error!("could not initialize the database: {error}");
            connection.execute_batch("ROLLBACK;")?;
            Err(error.into())
        }
    }
}
