//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{auth_guard, auth_guard_hx, get_log_out},
    category::{create_category_endpoint, delete_category_endpoint, get_manage_page},
    dashboard::get_dashboard_page,
    endpoints,
    history::get_history_data,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{create_transaction_endpoint, get_transactions_page},
    user::{get_select_currency_page, update_currency_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::MANAGE_VIEW, get(get_manage_page))
        .route(
            endpoints::SELECT_CURRENCY_VIEW,
            get(get_select_currency_page),
        )
        .route(endpoints::HISTORY_DATA, get(get_history_data))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These routes are called by HTMX, so they need the HX-REDIRECT header for auth redirects to work.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::USER_CURRENCY, post(update_currency_endpoint))
            .route(
                endpoints::CATEGORIES,
                post(create_category_endpoint).delete(delete_category_endpoint),
            )
            .route(
                endpoints::TRANSACTIONS_API,
                post(create_transaction_endpoint),
            )
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{
        build_router, endpoints,
        test_utils::{get_test_app_state, session_cookie_for},
        user::{UserId, get_or_create_user, update_user_currency},
    };

    fn get_test_server() -> (TestServer, axum_extra::extract::cookie::Cookie<'static>) {
        let state = get_test_app_state();
        let cookie = session_cookie_for(&state, "user_123");
        let server =
            TestServer::try_new(build_router(state)).expect("Could not create test server.");

        (server, cookie)
    }

    #[tokio::test]
    async fn pages_redirect_to_sign_in_without_session() {
        let (server, _) = get_test_server();

        for page in [
            endpoints::DASHBOARD_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::MANAGE_VIEW,
            endpoints::SELECT_CURRENCY_VIEW,
        ] {
            let response = server.get(page).await;

            response.assert_status_see_other();
            assert!(
                response
                    .header("location")
                    .to_str()
                    .unwrap()
                    .starts_with(endpoints::SIGN_IN_VIEW),
                "{page} did not redirect to sign in"
            );
        }
    }

    #[tokio::test]
    async fn htmx_endpoints_use_hx_redirect_without_session() {
        let (server, _) = get_test_server();

        let response = server
            .post(endpoints::CATEGORIES)
            .add_header("HX-Request", "true")
            .form(&[("name", "Rent"), ("type", "expense")])
            .await;

        response.assert_status_ok();
        assert!(
            response
                .header("hx-redirect")
                .to_str()
                .unwrap()
                .starts_with(endpoints::SIGN_IN_VIEW)
        );
    }

    #[tokio::test]
    async fn new_user_is_sent_to_currency_selection() {
        let (server, cookie) = get_test_server();

        let response = server
            .get(endpoints::DASHBOARD_VIEW)
            .add_cookie(cookie)
            .await;

        response.assert_status_see_other();
        assert_eq!(
            response.header("location"),
            endpoints::SELECT_CURRENCY_VIEW
        );
    }

    #[tokio::test]
    async fn dashboard_renders_for_user_with_currency() {
        let state = get_test_app_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let user_id = UserId::new("user_123").unwrap();
            get_or_create_user(&user_id, &connection).unwrap();
            update_user_currency(&user_id, "JPY", &connection).unwrap();
        }
        let cookie = session_cookie_for(&state, "user_123");
        let server = TestServer::try_new(build_router(state)).unwrap();

        let response = server
            .get(endpoints::DASHBOARD_VIEW)
            .add_cookie(cookie)
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (server, cookie) = get_test_server();

        let response = server.get("/nope").add_cookie(cookie).await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
