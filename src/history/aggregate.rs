//! Turns the sparse sums from a [SummaryStore] into a dense history with one
//! point per month or day.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    history::{SummaryStore, days_in_month},
    user::UserId,
};

/// Whether history is shown per month of a year or per day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// One point for each day of [Period::month].
    Month,
    /// One point for each month of [Period::year].
    Year,
}

/// The year and month that history is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// The calendar year, e.g. 2024.
    pub year: i32,
    /// The zero-indexed month, 0 is January and 11 is December.
    ///
    /// Ignored for [Timeframe::Year].
    pub month: u8,
}

/// The summed income and expenses for one month or day, as stored.
///
/// Months or days without any transactions have no bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawBucket {
    /// The zero-indexed month for yearly sums, or the day of the month for
    /// monthly sums.
    pub subperiod: u8,
    /// The summed expenses, `None` if the store had no value.
    pub sum_expense: Option<f64>,
    /// The summed income, `None` if the store had no value.
    pub sum_income: Option<f64>,
}

/// The income and expenses for one month or day in a history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// The calendar year.
    pub year: i32,
    /// The zero-indexed month.
    pub month: u8,
    /// The day of the month, only set for [Timeframe::Month].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
    /// The total expenses.
    pub expense: f64,
    /// The total income.
    pub income: f64,
}

/// Get the history of `user_id` for `period`.
///
/// For [Timeframe::Year] there are 12 points, one per month in order. For
/// [Timeframe::Month] there is one point for each day of the month in order.
/// Months or days without any transactions are filled with zeros. If the
/// user has no history at all for the period, the result is empty instead.
///
/// # Errors
///
/// Returns any error from `store` unchanged.
pub fn get_history(
    store: &impl SummaryStore,
    user_id: &UserId,
    timeframe: Timeframe,
    period: Period,
) -> Result<Vec<HistoryPoint>, Error> {
    match timeframe {
        Timeframe::Year => {
            let buckets = store.group_by_month(user_id, period.year)?;
            if buckets.is_empty() {
                return Ok(Vec::new());
            }

            let buckets = index_by_subperiod(&buckets);

            Ok((0..12)
                .map(|month| {
                    let (expense, income) = sums(buckets.get(&month));

                    HistoryPoint {
                        year: period.year,
                        month,
                        day: None,
                        expense,
                        income,
                    }
                })
                .collect())
        }
        Timeframe::Month => {
            let buckets = store.group_by_day(user_id, period.year, period.month)?;
            if buckets.is_empty() {
                return Ok(Vec::new());
            }

            let buckets = index_by_subperiod(&buckets);

            Ok((1..=days_in_month(period.year, period.month))
                .map(|day| {
                    let (expense, income) = sums(buckets.get(&day));

                    HistoryPoint {
                        year: period.year,
                        month: period.month,
                        day: Some(day),
                        expense,
                        income,
                    }
                })
                .collect())
        }
    }
}

fn index_by_subperiod(buckets: &[RawBucket]) -> HashMap<u8, &RawBucket> {
    buckets
        .iter()
        .map(|bucket| (bucket.subperiod, bucket))
        .collect()
}

fn sums(bucket: Option<&&RawBucket>) -> (f64, f64) {
    match bucket {
        Some(bucket) => (
            bucket.sum_expense.unwrap_or(0.0),
            bucket.sum_income.unwrap_or(0.0),
        ),
        None => (0.0, 0.0),
    }
}
