//! The JSON endpoint that serves history data for charts.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    history::{Period, Timeframe, get_history},
    user::UserId,
};

/// The oldest year that history can be requested for.
const MIN_YEAR: i32 = 2000;
/// The latest year that history can be requested for.
const MAX_YEAR: i32 = 3000;

/// The state needed for serving history data.
#[derive(Debug, Clone)]
pub struct HistoryState {
    /// The database connection the history is read from.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for HistoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for [get_history_data].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Whether to get one point per month or per day.
    #[serde(rename = "timeFrame")]
    pub timeframe: Timeframe,
    /// The calendar year.
    pub year: i32,
    /// The zero-indexed month, only used for [Timeframe::Month].
    #[serde(default)]
    pub month: u8,
}

impl HistoryQuery {
    /// Check that the year and month are in range.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidHistoryQuery] describing the first field
    /// that is out of range.
    pub fn period(&self) -> Result<Period, Error> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(Error::InvalidHistoryQuery(format!(
                "year must be between {MIN_YEAR} and {MAX_YEAR}, got {}",
                self.year
            )));
        }

        if self.month > 11 {
            return Err(Error::InvalidHistoryQuery(format!(
                "month must be between 0 and 11, got {}",
                self.month
            )));
        }

        Ok(Period {
            year: self.year,
            month: self.month,
        })
    }
}

/// Route handler for the history data of the signed in user.
///
/// Responds with a JSON array of history points. Query strings that cannot be
/// parsed are rejected with a 400 by the [Query] extractor.
pub async fn get_history_data(
    State(state): State<HistoryState>,
    Extension(user_id): Extension<UserId>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let period = match query.period() {
        Ok(period) => period,
        Err(error) => return error.into_api_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match get_history(&*connection, &user_id, query.timeframe, period) {
        Ok(history) => Json(history).into_response(),
        Err(error) => {
            tracing::error!("Could not get {:?} history for {user_id}: {error}", query.timeframe);
            error.into_api_response()
        }
    }
}


#[cfg(test)]
mod get_history_data_tests {
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;
    use time::macros::date;

    use crate::{
        AppState,
        auth::auth_guard,
        category::TransactionType,
        endpoints,
        history::{HistoryPoint, add_to_history, get_history_data},
        test_utils::{get_test_app_state, session_cookie_for},
        user::UserId,
    };

    const USER: &str = "user_123";

    fn get_test_server(state: &AppState) -> TestServer {
        let app = Router::new()
            .route(endpoints::HISTORY_DATA, get(get_history_data))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state.clone());

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn get_state_with_history() -> AppState {
        let state = get_test_app_state();
        let user_id = UserId::new(USER).unwrap();
        {
            let connection = state.db_connection.lock().unwrap();
            add_to_history(
                &user_id,
                date!(2024 - 03 - 15),
                TransactionType::Expense,
                50.0,
                &connection,
            )
            .unwrap();
            add_to_history(
                &user_id,
                date!(2024 - 03 - 20),
                TransactionType::Income,
                200.0,
                &connection,
            )
            .unwrap();
        }
        state
    }

    #[tokio::test]
    async fn returns_dense_yearly_history() {
        let state = get_state_with_history();
        let server = get_test_server(&state);

        let response = server
            .get(endpoints::HISTORY_DATA)
            .add_query_params([("timeFrame", "year"), ("year", "2024")])
            .add_cookie(session_cookie_for(&state, USER))
            .await;

        response.assert_status_ok();
        let history: Vec<HistoryPoint> = response.json();
        assert_eq!(history.len(), 12);
        assert_eq!(
            history[2],
            HistoryPoint {
                year: 2024,
                month: 2,
                day: None,
                expense: 50.0,
                income: 200.0,
            }
        );
    }

    #[tokio::test]
    async fn returns_dense_monthly_history_with_days() {
        let state = get_state_with_history();
        let server = get_test_server(&state);

        let response = server
            .get(endpoints::HISTORY_DATA)
            .add_query_params([("timeFrame", "month"), ("year", "2024"), ("month", "2")])
            .add_cookie(session_cookie_for(&state, USER))
            .await;

        response.assert_status_ok();
        let json: serde_json::Value = response.json();
        let points = json.as_array().expect("Expected a JSON array");
        assert_eq!(points.len(), 31);
        assert_eq!(
            points[14],
            serde_json::json!({
                "year": 2024, "month": 2, "day": 15, "expense": 50.0, "income": 0.0
            })
        );
    }

    #[tokio::test]
    async fn year_without_history_is_empty_array() {
        let state = get_state_with_history();
        let server = get_test_server(&state);

        let response = server
            .get(endpoints::HISTORY_DATA)
            .add_query_params([("timeFrame", "year"), ("year", "2025")])
            .add_cookie(session_cookie_for(&state, USER))
            .await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!([]));
    }

    #[tokio::test]
    async fn history_of_other_users_is_not_shown() {
        let state = get_state_with_history();
        let server = get_test_server(&state);

        let response = server
            .get(endpoints::HISTORY_DATA)
            .add_query_params([("timeFrame", "year"), ("year", "2024")])
            .add_cookie(session_cookie_for(&state, "someone_else"))
            .await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!([]));
    }

    #[tokio::test]
    async fn invalid_timeframe_is_bad_request() {
        let state = get_state_with_history();
        let server = get_test_server(&state);

        let response = server
            .get(endpoints::HISTORY_DATA)
            .add_query_params([("timeFrame", "week"), ("year", "2024")])
            .add_cookie(session_cookie_for(&state, USER))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_numeric_year_is_bad_request() {
        let state = get_state_with_history();
        let server = get_test_server(&state);

        let response = server
            .get(endpoints::HISTORY_DATA)
            .add_query_params([("timeFrame", "year"), ("year", "soon")])
            .add_cookie(session_cookie_for(&state, USER))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn year_out_of_range_is_bad_request() {
        let state = get_state_with_history();
        let server = get_test_server(&state);

        let response = server
            .get(endpoints::HISTORY_DATA)
            .add_query_params([("timeFrame", "year"), ("year", "1999")])
            .add_cookie(session_cookie_for(&state, USER))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("year must be between 2000 and 3000"));
    }

    #[tokio::test]
    async fn missing_session_redirects_to_sign_in() {
        let state = get_state_with_history();
        let server = get_test_server(&state);

        let response = server
            .get(endpoints::HISTORY_DATA)
            .add_query_params([("timeFrame", "year"), ("year", "2024")])
            .await;

        response.assert_status_see_other();
        assert!(
            response
                .header("location")
                .to_str()
                .unwrap()
                .starts_with(endpoints::SIGN_IN_VIEW)
        );
    }
}
