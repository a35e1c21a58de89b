//! The dashboard shows the user's income and expenses per month of a year or
//! per day of a month.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Month, OffsetDateTime};

use crate::{
    AppState, Error, endpoints,
    history::{HistoryPoint, HistoryQuery, Period, Timeframe, get_history},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency, link,
    },
    navigation::NavBar,
    user::{UserId, get_or_create_user},
};

const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection the history is read from.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The history shown on the dashboard. Missing fields default to the yearly
/// view of the current year.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(rename = "timeFrame")]
    pub timeframe: Option<Timeframe>,
    pub year: Option<i32>,
    /// Zero-indexed, like [HistoryQuery::month].
    pub month: Option<u8>,
}

impl DashboardQuery {
    fn with_defaults(&self, today: time::Date) -> HistoryQuery {
        HistoryQuery {
            timeframe: self.timeframe.unwrap_or(Timeframe::Year),
            year: self.year.unwrap_or(today.year()),
            month: self.month.unwrap_or(u8::from(today.month()) - 1),
        }
    }
}

/// Route handler for the dashboard page.
///
/// Users that have not chosen a currency yet are sent to the currency
/// selection page first.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserId>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let query = query.with_defaults(OffsetDateTime::now_utc().date());
    let period = query.period()?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let user = get_or_create_user(&user_id, &connection)?;
    let Some(currency) = user.currency() else {
        return Ok(Redirect::to(endpoints::SELECT_CURRENCY_VIEW).into_response());
    };

    let history = get_history(&*connection, &user_id, query.timeframe, period)
        .inspect_err(|error| tracing::error!("Could not get history for {user_id}: {error}"))?;

    Ok(dashboard_view(&history, query.timeframe, period, currency.symbol).into_response())
}

fn dashboard_view(
    history: &[HistoryPoint],
    timeframe: Timeframe,
    period: Period,
    currency_symbol: &str,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let title = match timeframe {
        Timeframe::Year => period.year.to_string(),
        Timeframe::Month => format!("{} {}", month_name(period.month), period.year),
    };
    let (previous, next) = neighbours(timeframe, period);
    let other_view = match timeframe {
        Timeframe::Year => ("View by day", dashboard_url(Timeframe::Month, period)),
        Timeframe::Month => ("View by month", dashboard_url(Timeframe::Year, period)),
    };
    let total_income: f64 = history.iter().map(|point| point.income).sum();
    let total_expense: f64 = history.iter().map(|point| point.expense).sum();

    let table_row = |point: &HistoryPoint| {
        let label = match point.day {
            Some(day) => day.to_string(),
            None => month_name(point.month).to_string(),
        };
        let balance = point.income - point.expense;

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                th scope="row" class=(TABLE_CELL_STYLE) { (label) }
                td class=(TABLE_CELL_STYLE) { (format_currency(point.income, currency_symbol)) }
                td class=(TABLE_CELL_STYLE) { (format_currency(point.expense, currency_symbol)) }
                td class={ (TABLE_CELL_STYLE) " " (amount_color_class(balance)) }
                {
                    (format_currency(balance, currency_symbol))
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-4"
            {
                div class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "History for " (title) }

                    div class="flex gap-4"
                    {
                        @if let Some(previous) = previous {
                            a href=(previous) class=(LINK_STYLE) rel="prev" { "Previous" }
                        }
                        @if let Some(next) = next {
                            a href=(next) class=(LINK_STYLE) rel="next" { "Next" }
                        }
                        a href=(other_view.1) class=(LINK_STYLE) { (other_view.0) }
                    }
                }

                div
                    id="history-chart"
                    data-url=(history_data_url(timeframe, period))
                    data-currency=(currency_symbol)
                {}

                @if history.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "No transactions recorded for " (title) ". "
                        (link(endpoints::TRANSACTIONS_VIEW, "Record a transaction"))
                    }
                } @else {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    @match timeframe {
                                        Timeframe::Year => "Month",
                                        Timeframe::Month => "Day",
                                    }
                                }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Income" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Expense" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Balance" }
                            }
                        }

                        tbody
                        {
                            @for point in history {
                                (table_row(point))
                            }
                        }

                        tfoot class="font-semibold"
                        {
                            tr
                            {
                                th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                                td class=(TABLE_CELL_STYLE) { (format_currency(total_income, currency_symbol)) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(total_expense, currency_symbol)) }
                                td class={ (TABLE_CELL_STYLE) " " (amount_color_class(total_income - total_expense)) }
                                {
                                    (format_currency(total_income - total_expense, currency_symbol))
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Dashboard", &content)
}

fn amount_color_class(amount: f64) -> &'static str {
    if amount >= 0.0 {
        TABLE_CELL_GREEN_STYLE
    } else {
        TABLE_CELL_RED_STYLE
    }
}

fn month_name(month: u8) -> Month {
    Month::January.nth_next(month)
}

/// The periods before and after `period` as dashboard URLs, or `None` where
/// that period is out of range.
fn neighbours(timeframe: Timeframe, period: Period) -> (Option<String>, Option<String>) {
    let (previous, next) = match timeframe {
        Timeframe::Year => (
            Period {
                year: period.year - 1,
                ..period
            },
            Period {
                year: period.year + 1,
                ..period
            },
        ),
        Timeframe::Month if period.month == 0 => (
            Period {
                year: period.year - 1,
                month: 11,
            },
            Period {
                year: period.year,
                month: 1,
            },
        ),
        Timeframe::Month if period.month == 11 => (
            Period {
                year: period.year,
                month: 10,
            },
            Period {
                year: period.year + 1,
                month: 0,
            },
        ),
        Timeframe::Month => (
            Period {
                month: period.month - 1,
                ..period
            },
            Period {
                month: period.month + 1,
                ..period
            },
        ),
    };

    let url_if_valid = |period: Period| {
        history_query(timeframe, period)
            .period()
            .is_ok()
            .then(|| dashboard_url(timeframe, period))
    };

    (url_if_valid(previous), url_if_valid(next))
}

fn history_query(timeframe: Timeframe, period: Period) -> HistoryQuery {
    HistoryQuery {
        timeframe,
        year: period.year,
        month: period.month,
    }
}

fn period_url(path: &str, timeframe: Timeframe, period: Period) -> String {
    match serde_urlencoded::to_string(history_query(timeframe, period)) {
        Ok(query) => format!("{path}?{query}"),
        Err(error) => {
            tracing::error!("Could not encode the query for {period:?}: {error}");
            path.to_owned()
        }
    }
}

fn dashboard_url(timeframe: Timeframe, period: Period) -> String {
    period_url(endpoints::DASHBOARD_VIEW, timeframe, period)
}

fn history_data_url(timeframe: Timeframe, period: Period) -> String {
    period_url(endpoints::HISTORY_DATA, timeframe, period)
}

#[cfg(test)]
mod dashboard_query_tests {
    use time::macros::date;

    use crate::history::Timeframe;

    use super::DashboardQuery;

    #[test]
    fn defaults_to_current_year() {
        let query = DashboardQuery::default().with_defaults(date!(2025 - 06 - 15));

        assert_eq!(query.timeframe, Timeframe::Year);
        assert_eq!(query.year, 2025);
        assert_eq!(query.month, 5);
    }

    #[test]
    fn keeps_given_values() {
        let query = DashboardQuery {
            timeframe: Some(Timeframe::Month),
            year: Some(2024),
            month: Some(1),
        }
        .with_defaults(date!(2025 - 06 - 15));

        assert_eq!(query.timeframe, Timeframe::Month);
        assert_eq!(query.year, 2024);
        assert_eq!(query.month, 1);
    }
}
