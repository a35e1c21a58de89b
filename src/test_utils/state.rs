use axum::{http::header::SET_COOKIE, response::IntoResponse};
use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
use rusqlite::Connection;

use crate::{AppState, set_session_cookie, user::UserId};

/// An [AppState] backed by a fresh in-memory database with all tables created.
pub(crate) fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection, "42").expect("Could not create app state")
}

/// The encrypted session cookie a browser would hold after `user_id` signs in.
pub(crate) fn session_cookie_for(state: &AppState, user_id: &str) -> Cookie<'static> {
    let user_id = UserId::new(user_id).expect("Invalid test user ID");
    let jar = PrivateCookieJar::new(state.cookie_key.clone());
    let jar = set_session_cookie(jar, &user_id, state.cookie_duration);

    let response = jar.into_response();
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("Set-Cookie header missing")
        .to_str()
        .expect("Could not convert Set-Cookie header to str")
        .to_owned();

    Cookie::parse(header).expect("Could not parse session cookie")
}
