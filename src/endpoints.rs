//! The API endpoints URIs.

/// The landing page for users, shows their income and expense history.
pub const DASHBOARD_VIEW: &str = "/";
/// The page for displaying a user's transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for managing categories and the user's currency.
pub const MANAGE_VIEW: &str = "/manage";
/// The page for choosing the user's currency after signing up.
pub const SELECT_CURRENCY_VIEW: &str = "/select-currency";
/// The sign in page served by the authentication provider.
pub const SIGN_IN_VIEW: &str = "/sign-in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for the aggregated income and expense history.
pub const HISTORY_DATA: &str = "/api/history-data";
/// The route to update the user's currency.
pub const USER_CURRENCY: &str = "/api/user/currency";
/// The route to create and delete categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::MANAGE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::SELECT_CURRENCY_VIEW);
        assert_endpoint_is_valid_uri(endpoints::SIGN_IN_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::HISTORY_DATA);
        assert_endpoint_is_valid_uri(endpoints::USER_CURRENCY);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::LOG_OUT);
    }
}
