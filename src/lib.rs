//! Budget Tracker is a web app for recording income and expenses under
//! categories and reviewing them as monthly or yearly history.
//!
//! This library provides a REST API that directly serves HTML pages, plus a
//! JSON endpoint with the aggregated history used for charts.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
mod category;
mod constants;
mod dashboard;
mod db;
mod endpoints;
mod error;
mod history;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, create_cookie_key};
pub use auth::{COOKIE_SESSION, DEFAULT_COOKIE_DURATION, set_session_cookie};
pub use constants::{CURRENCIES, Currency, MAX_DATE_RANGE_DAYS, NAV_ITEMS, NavItem, find_currency};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use history::{
    HistoryPoint, Period, RawBucket, SummaryStore, Timeframe, days_in_month, get_history,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use user::{User, UserId, get_or_create_user, update_user_currency};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
