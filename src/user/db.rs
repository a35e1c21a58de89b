//! Database operations for users.

use rusqlite::{Connection, Row};

use crate::{
    Error, find_currency,
    user::{User, UserId},
};

/// Get the user with `user_id`, creating them with no currency if they do
/// not exist yet.
///
/// Calling this function more than once for the same user is safe, the
/// existing user is returned unchanged.
pub fn get_or_create_user(user_id: &UserId, connection: &Connection) -> Result<User, Error> {
    match get_user(user_id, connection) {
        Ok(user) => return Ok(user),
        Err(Error::NotFound) => {}
        Err(error) => return Err(error),
    }

    tracing::info!("Creating user {user_id}");
    connection.execute(
        "INSERT INTO user (id, currency) VALUES (?1, '') ON CONFLICT (id) DO NOTHING;",
        (user_id.as_str(),),
    )?;

    get_user(user_id, connection)
}

/// Retrieve the user with `user_id`.
///
/// # Errors
///
/// Returns an [Error::NotFound] if the user does not exist.
pub fn get_user(user_id: &UserId, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, currency FROM user WHERE id = :id;")?
        .query_row(&[(":id", user_id.as_str())], map_row)
        .map_err(|error| error.into())
}

/// Set the currency that `user_id`'s amounts are shown in.
///
/// # Errors
///
/// Returns an [Error::InvalidCurrency] if `currency` is not a supported
/// currency code, or an [Error::UpdateMissingUser] if the user does not exist.
pub fn update_user_currency(
    user_id: &UserId,
    currency: &str,
    connection: &Connection,
) -> Result<User, Error> {
    if find_currency(currency).is_none() {
        return Err(Error::InvalidCurrency(currency.to_owned()));
    }

    let rows_affected = connection.execute(
        "UPDATE user SET currency = ?1 WHERE id = ?2",
        (currency, user_id.as_str()),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingUser);
    }

    Ok(User {
        id: user_id.clone(),
        currency: currency.to_owned(),
    })
}

/// Initialize the user table.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
            id TEXT PRIMARY KEY,
            currency TEXT NOT NULL DEFAULT ''
        );",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_id: String = row.get(0)?;
    let currency = row.get(1)?;

    Ok(User {
        id: UserId(raw_id),
        currency,
    })
}
