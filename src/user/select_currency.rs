//! The currency selection page shown to new users, and the endpoint that
//! saves their choice.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, CURRENCIES, Error, endpoints,
    html::{ALERT_CONTAINER_ID, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    user::{User, UserId, get_or_create_user, update_user_currency},
};

/// The state needed for reading and updating a user's currency.
#[derive(Debug, Clone)]
pub struct UserState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Form data for choosing a currency.
#[derive(Debug, Deserialize)]
pub struct CurrencyForm {
    /// The currency code, e.g. "USD".
    pub currency: String,
}

/// Route handler for the currency selection page.
///
/// This is the first page new users land on, so the user record is created
/// here if it does not exist yet.
pub async fn get_select_currency_page(
    State(state): State<UserState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let user = get_or_create_user(&user_id, &connection)
        .inspect_err(|error| tracing::error!("Could not get user {user_id}: {error}"))?;

    Ok(select_currency_view(&user).into_response())
}

/// Save the user's currency and send them to the dashboard.
pub async fn update_currency_endpoint(
    State(state): State<UserState>,
    Extension(user_id): Extension<UserId>,
    Form(form): Form<CurrencyForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_user_currency(&user_id, &form.currency, &connection) {
        Ok(user) => {
            tracing::info!("Set currency of {} to {}", user.id, user.currency);
            (
                HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

fn select_currency_view(user: &User) -> Markup {
    let nav_bar = NavBar::new(endpoints::SELECT_CURRENCY_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Select your currency" }

            form
                hx-post=(endpoints::USER_CURRENCY)
                hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                class="w-full space-y-4"
            {
                fieldset class="grid grid-cols-2 gap-2"
                {
                    @for currency in &CURRENCIES {
                        label class="flex items-center gap-2"
                        {
                            input
                                type="radio"
                                name="currency"
                                value=(currency.value)
                                required
                                checked[currency.value == user.currency];
                            (currency.label)
                        }
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
            }
        }
    );

    base("Select Currency", &content)
}
