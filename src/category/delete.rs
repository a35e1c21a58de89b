//! Category deletion endpoint.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;

use crate::{
    Error,
    alert::Alert,
    category::{CategoryState, DeleteCategoryForm, delete_category},
    user::UserId,
};

/// Handle category deletion.
///
/// HTMX sends the parameters of DELETE requests in the query string. The
/// response body is empty so that the category's list item is removed, and
/// the success alert is swapped into the alert container out of band.
/// Failures respond with a non-2xx status so that the list item is kept and
/// the error alert is swapped into the alert container instead.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user_id): Extension<UserId>,
    Query(form): Query<DeleteCategoryForm>,
) -> Response {
    let key = match form.validate() {
        Ok(key) => key,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_category(&user_id, &key, &connection) {
        Ok(_) => Alert::SuccessSimple {
            message: "Category deleted successfully".to_owned(),
        }
        .into_oob_html()
        .into_response(),
        Err(Error::DeleteMissingCategory) => Error::DeleteMissingCategory.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting category {}-{}: {error}",
                key.name,
                key.category_type
            );
            error.into_alert_response()
        }
    }
}
