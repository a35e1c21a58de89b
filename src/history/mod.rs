//! Income and expense history, aggregated per month of a year or per day of
//! a month.

mod aggregate;
mod calendar;
mod endpoint;
mod store;

pub use aggregate::{HistoryPoint, Period, RawBucket, Timeframe, get_history};
pub use calendar::days_in_month;
pub use endpoint::{HistoryQuery, HistoryState, get_history_data};
pub use store::{SummaryStore, add_to_history, create_history_tables};
