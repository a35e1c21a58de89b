//! Defines the app level error type and conversions to rendered HTML pages, alerts and API responses.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use time::Date;

use crate::{
    MAX_DATE_RANGE_DAYS, alert::Alert, html::error_view,
    internal_server_error::InternalServerError, not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The session cookie is missing from the cookie jar in the request or
    /// its value is not a usable user ID.
    #[error("no valid session cookie in the cookie jar")]
    InvalidSession,

    /// A category name was shorter than 3 or longer than 20 characters.
    #[error("\"{0}\" is not a valid category name, it must be between 3 and 20 characters long")]
    InvalidCategoryName(String),

    /// A category icon was longer than 20 characters.
    #[error("\"{0}\" is not a valid category icon, it must be at most 20 characters long")]
    InvalidCategoryIcon(String),

    /// The user already has a category with the same name and type.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategory(String),

    /// A transaction referred to a category the user does not have.
    #[error("the category \"{0}\" does not exist")]
    InvalidCategory(String),

    /// The currency code is not one of the supported currencies.
    #[error("\"{0}\" is not a supported currency")]
    InvalidCurrency(String),

    /// A transaction amount was zero, negative or not a number.
    ///
    /// Whether a transaction is income or an expense is given by its type,
    /// so amounts are always positive.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    InvalidAmount(f64),

    /// The end of a date range was before its start or the range spans more
    /// than [MAX_DATE_RANGE_DAYS] days.
    #[error("the date range {0} to {1} is invalid")]
    InvalidDateRange(Date, Date),

    /// The query parameters for the history data were out of range.
    #[error("invalid history query: {0}")]
    InvalidHistoryQuery(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a user that does not exist
    #[error("tried to update a user that is not in the database")]
    UpdateMissingUser,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            Error::InvalidDateRange(from, to) => InternalServerError {
                description: "Invalid Date Range",
                fix: &format!(
                    "Could not show transactions from {from} to {to}. Choose an end date on or \
                    after the start date and at most {MAX_DATE_RANGE_DAYS} days later."
                ),
            }
            .into_response(),
            Error::InvalidHistoryQuery(message) => (
                StatusCode::BAD_REQUEST,
                Html(
                    error_view("Bad Request", "400", "Invalid History Period", &message)
                        .into_string(),
                ),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into a plain text response for the JSON API.
    pub fn into_api_response(self) -> Response {
        match self {
            Error::InvalidHistoryQuery(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            Error::NotFound => StatusCode::NOT_FOUND.into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details.",
                )
                    .into_response()
            }
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidCategoryName(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid category name".to_owned(),
                    details: format!(
                        "\"{name}\" is not a valid name. \
                        Category names must be between 3 and 20 characters long."
                    ),
                },
            ),
            Error::InvalidCategoryIcon(icon) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid category icon".to_owned(),
                    details: format!(
                        "\"{icon}\" is not a valid icon. \
                        Category icons must be at most 20 characters long."
                    ),
                },
            ),
            Error::DuplicateCategory(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Duplicate category".to_owned(),
                    details: format!(
                        "The category {name} already exists. \
                        Choose a different name or delete the existing category."
                    ),
                },
            ),
            Error::InvalidCategory(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid category".to_owned(),
                    details: format!("Could not find a category called {name}."),
                },
            ),
            Error::InvalidCurrency(currency) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid currency".to_owned(),
                    details: format!("{currency} is not one of the supported currencies."),
                },
            ),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!(
                        "{amount} is not a valid amount. Enter an amount greater than zero."
                    ),
                },
            ),
            Error::UpdateMissingUser => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update currency".to_owned(),
                    details: "Your account could not be found. \
                    Try reloading the page to set up your account."
                        .to_owned(),
                },
            ),
            Error::DeleteMissingCategory => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete category".to_owned(),
                    details: "The category could not be found. \
                    Try refreshing the page to see if the category has already been deleted."
                        .to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
