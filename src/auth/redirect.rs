//! Helpers for building the sign in redirect URL for unauthenticated requests.

use axum::{extract::Request, http::Uri};
use tracing::{error, warn};

use crate::endpoints;

fn is_safe_redirect_url(redirect_url: &str) -> bool {
    if !redirect_url.starts_with('/') || redirect_url.starts_with("//") {
        return false;
    }

    let path = redirect_url
        .split_once('?')
        .map(|(path, _)| path)
        .unwrap_or(redirect_url);

    path != endpoints::SIGN_IN_VIEW
}

fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_redirect_url(path_and_query).then(|| path_and_query.to_owned())
}

/// Build the URL of the sign in page with a `redirect_url` query parameter
/// pointing back to the page the user was trying to reach.
///
/// Requests to the API are not pages, so the redirect target is taken from
/// the `HX-Current-URL` header, falling back to the dashboard.
pub(super) fn build_sign_in_redirect_url(request: &Request) -> String {
    let redirect_target = if request.uri().path().starts_with("/api") {
        redirect_target_from_hx_request(request)
    } else {
        request
            .uri()
            .path_and_query()
            .and_then(|path_and_query| normalize_redirect_url(path_and_query.as_str()))
    };

    let redirect_target = redirect_target.unwrap_or_else(|| {
        warn!(
            "Invalid redirect target for {}. Falling back to dashboard.",
            request.uri()
        );
        endpoints::DASHBOARD_VIEW.to_owned()
    });

    match serde_urlencoded::to_string([("redirect_url", redirect_target.as_str())]) {
        Ok(param) => format!("{}?{}", endpoints::SIGN_IN_VIEW, param),
        Err(error) => {
            error!("Could not encode redirect URL {redirect_target}: {error}");
            endpoints::SIGN_IN_VIEW.to_owned()
        }
    }
}

fn redirect_target_from_hx_request(request: &Request) -> Option<String> {
    let headers = request.headers();
    let is_hx_request = headers
        .get("hx-request")
        .and_then(|header| header.to_str().ok())
        .map(|header| header.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if !is_hx_request {
        return None;
    }

    headers
        .get("hx-current-url")
        .and_then(|header| header.to_str().ok())
        .and_then(normalize_redirect_url)
}
