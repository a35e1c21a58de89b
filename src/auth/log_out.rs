//! Route handler for signing out.

use axum::response::Redirect;
use axum_extra::extract::PrivateCookieJar;

use crate::{auth::cookie::invalidate_session_cookie, endpoints};

/// Remove the session cookie and redirect the client to the sign in page.
pub async fn get_log_out(jar: PrivateCookieJar) -> (PrivateCookieJar, Redirect) {
    (
        invalidate_session_cookie(jar),
        Redirect::to(endpoints::SIGN_IN_VIEW),
    )
}
