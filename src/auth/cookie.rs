//! Defines functions for reading and writing the session cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{Error, user::UserId};

/// The name of the cookie holding the signed in user's ID.
pub const COOKIE_SESSION: &str = "__session_auth";
/// The default duration for which session cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(30);

/// Add a session cookie for `user_id` to the cookie jar, indicating that the
/// user is signed in.
///
/// The cookie expires `duration` from the current time. The authentication
/// provider calls this after a successful sign in and the auth guard calls it
/// again on every authenticated request to keep the session alive.
pub fn set_session_cookie(
    jar: PrivateCookieJar,
    user_id: &UserId,
    duration: Duration,
) -> PrivateCookieJar {
    let expiry = OffsetDateTime::now_utc() + duration;

    jar.add(
        Cookie::build((COOKIE_SESSION, user_id.as_str().to_owned()))
            .path("/")
            .expires(expiry)
            .max_age(duration)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(true),
    )
}

/// Remove the session cookie, which signs the user out.
pub(crate) fn invalidate_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(COOKIE_SESSION).path("/"))
}

/// Get the signed in user's ID from the session cookie.
///
/// # Errors
///
/// Returns an [Error::InvalidSession] if the cookie is missing, could not be
/// decrypted or holds an empty ID.
pub(crate) fn get_user_id_from_session_cookie(jar: &PrivateCookieJar) -> Result<UserId, Error> {
    let cookie = jar.get(COOKIE_SESSION).ok_or(Error::InvalidSession)?;

    UserId::new(cookie.value_trimmed())
}
