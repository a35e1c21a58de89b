//! Session handling for users signed in through the external authentication provider.

mod cookie;
mod log_out;
mod middleware;
mod redirect;

pub use cookie::{COOKIE_SESSION, DEFAULT_COOKIE_DURATION, set_session_cookie};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};

#[cfg(test)]
pub use middleware::AuthState;
