//! Storage of the pre-aggregated income and expense totals.
//!
//! Every transaction adds its amount to the totals of its month in
//! `year_history` and of its day in `month_history`. Months are
//! zero-indexed in both tables.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{Error, category::TransactionType, history::RawBucket, user::UserId};

/// Reads the summed income and expenses of a user.
///
/// Implementations return buckets in ascending order of their subperiod and
/// omit subperiods without any data.
pub trait SummaryStore {
    /// Get the totals of each month in `year` that has data.
    fn group_by_month(&self, user_id: &UserId, year: i32) -> Result<Vec<RawBucket>, Error>;

    /// Get the totals of each day in the zero-indexed `month` of `year` that
    /// has data.
    fn group_by_day(
        &self,
        user_id: &UserId,
        year: i32,
        month: u8,
    ) -> Result<Vec<RawBucket>, Error>;
}

impl SummaryStore for Connection {
    fn group_by_month(&self, user_id: &UserId, year: i32) -> Result<Vec<RawBucket>, Error> {
        self.prepare(
            "SELECT month, SUM(expense), SUM(income) FROM year_history \
            WHERE user_id = ?1 AND year = ?2 \
            GROUP BY month \
            ORDER BY month ASC;",
        )?
        .query_map((user_id.as_str(), year), map_row)?
        .map(|maybe_bucket| maybe_bucket.map_err(Error::from))
        .collect()
    }

    fn group_by_day(
        &self,
        user_id: &UserId,
        year: i32,
        month: u8,
    ) -> Result<Vec<RawBucket>, Error> {
        self.prepare(
            "SELECT day, SUM(expense), SUM(income) FROM month_history \
            WHERE user_id = ?1 AND year = ?2 AND month = ?3 \
            GROUP BY day \
            ORDER BY day ASC;",
        )?
        .query_map((user_id.as_str(), year, month), map_row)?
        .map(|maybe_bucket| maybe_bucket.map_err(Error::from))
        .collect()
    }
}

fn map_row(row: &Row) -> Result<RawBucket, rusqlite::Error> {
    Ok(RawBucket {
        subperiod: row.get(0)?,
        sum_expense: row.get(1)?,
        sum_income: row.get(2)?,
    })
}

/// Add `amount` to the user's totals for the month and the day of `date`.
///
/// Callers should run this in the same SQL transaction that records the
/// transaction itself so the totals cannot drift.
pub fn add_to_history(
    user_id: &UserId,
    date: Date,
    transaction_type: TransactionType,
    amount: f64,
    connection: &Connection,
) -> Result<(), rusqlite::Error> {
    let (expense, income) = match transaction_type {
        TransactionType::Expense => (amount, 0.0),
        TransactionType::Income => (0.0, amount),
    };
    let year = date.year();
    let month = u8::from(date.month()) - 1;
    let day = date.day();

    connection.execute(
        "INSERT INTO year_history (user_id, month, year, expense, income) \
        VALUES (?1, ?2, ?3, ?4, ?5) \
        ON CONFLICT (user_id, month, year) DO UPDATE SET \
            expense = expense + excluded.expense, \
            income = income + excluded.income;",
        (user_id.as_str(), month, year, expense, income),
    )?;

    connection.execute(
        "INSERT INTO month_history (user_id, day, month, year, expense, income) \
        VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
        ON CONFLICT (user_id, day, month, year) DO UPDATE SET \
            expense = expense + excluded.expense, \
            income = income + excluded.income;",
        (user_id.as_str(), day, month, year, expense, income),
    )?;

    Ok(())
}

/// Initialize the `year_history` and `month_history` tables.
pub fn create_history_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS year_history (
            user_id TEXT NOT NULL,
            month INTEGER NOT NULL CHECK (month BETWEEN 0 AND 11),
            year INTEGER NOT NULL,
            income REAL NOT NULL DEFAULT 0,
            expense REAL NOT NULL DEFAULT 0,
            PRIMARY KEY (user_id, month, year)
        );

        CREATE TABLE IF NOT EXISTS month_history (
            user_id TEXT NOT NULL,
            day INTEGER NOT NULL CHECK (day BETWEEN 1 AND 31),
            month INTEGER NOT NULL CHECK (month BETWEEN 0 AND 11),
            year INTEGER NOT NULL,
            income REAL NOT NULL DEFAULT 0,
            expense REAL NOT NULL DEFAULT 0,
            PRIMARY KEY (user_id, day, month, year)
        );",
    )?;

    Ok(())
}

#[cfg(test)]
mod summary_store_tests {
    use rusqlite::Connection;
    use time::{Date, macros::date};

    use crate::{
        category::TransactionType,
        history::{RawBucket, SummaryStore},
        user::UserId,
    };

    use super::{add_to_history, create_history_tables};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_history_tables(&connection).expect("Could not create history tables");
        connection
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn record(
        connection: &Connection,
        user_id: &UserId,
        date: Date,
        transaction_type: TransactionType,
        amount: f64,
    ) {
        add_to_history(user_id, date, transaction_type, amount, connection)
            .expect("Could not add to history");
    }

    #[test]
    fn empty_tables_have_no_buckets() {
        let connection = get_test_db_connection();

        assert_eq!(connection.group_by_month(&user("foo"), 2024), Ok(vec![]));
        assert_eq!(connection.group_by_day(&user("foo"), 2024, 0), Ok(vec![]));
    }

    #[test]
    fn group_by_month_sums_each_month_in_order() {
        let connection = get_test_db_connection();
        let user_id = user("foo");
        record(&connection, &user_id, date!(2024 - 12 - 01), TransactionType::Expense, 5.0);
        record(&connection, &user_id, date!(2024 - 03 - 10), TransactionType::Expense, 20.0);
        record(&connection, &user_id, date!(2024 - 03 - 22), TransactionType::Expense, 30.0);
        record(&connection, &user_id, date!(2024 - 03 - 22), TransactionType::Income, 200.0);

        let got = connection.group_by_month(&user_id, 2024);

        assert_eq!(
            got,
            Ok(vec![
                RawBucket {
                    subperiod: 2,
                    sum_expense: Some(50.0),
                    sum_income: Some(200.0),
                },
                RawBucket {
                    subperiod: 11,
                    sum_expense: Some(5.0),
                    sum_income: Some(0.0),
                },
            ])
        );
    }

    #[test]
    fn group_by_day_sums_each_day_of_the_month() {
        let connection = get_test_db_connection();
        let user_id = user("foo");
        record(&connection, &user_id, date!(2024 - 02 - 29), TransactionType::Income, 10.0);
        record(&connection, &user_id, date!(2024 - 02 - 01), TransactionType::Expense, 4.5);
        record(&connection, &user_id, date!(2024 - 03 - 01), TransactionType::Expense, 99.0);

        let got = connection.group_by_day(&user_id, 2024, 1);

        assert_eq!(
            got,
            Ok(vec![
                RawBucket {
                    subperiod: 1,
                    sum_expense: Some(4.5),
                    sum_income: Some(0.0),
                },
                RawBucket {
                    subperiod: 29,
                    sum_expense: Some(0.0),
                    sum_income: Some(10.0),
                },
            ])
        );
    }

    #[test]
    fn buckets_are_scoped_to_user_and_year() {
        let connection = get_test_db_connection();
        record(&connection, &user("foo"), date!(2024 - 05 - 05), TransactionType::Expense, 1.0);
        record(&connection, &user("bar"), date!(2024 - 05 - 05), TransactionType::Expense, 2.0);
        record(&connection, &user("foo"), date!(2023 - 05 - 05), TransactionType::Expense, 3.0);

        let got = connection.group_by_month(&user("foo"), 2024).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].sum_expense, Some(1.0));
    }
}
