//! Users, their preferred currency, and the currency selection page.

mod db;
mod domain;
mod select_currency;

pub use db::{create_user_table, get_or_create_user, get_user, update_user_currency};
pub use domain::{User, UserId};
pub use select_currency::{
    CurrencyForm, UserState, get_select_currency_page, update_currency_endpoint,
};
