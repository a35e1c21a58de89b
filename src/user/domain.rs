//! Core user domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{CURRENCIES, Currency, Error, find_currency};

/// The opaque identifier the authentication provider assigns to a user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub(super) String);

impl UserId {
    /// Create a user ID.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidSession] if `id` is empty
    /// or just whitespace.
    pub fn new(id: &str) -> Result<Self, Error> {
        let id = id.trim();

        if id.is_empty() {
            Err(Error::InvalidSession)
        } else {
            Ok(Self(id.to_owned()))
        }
    }

    /// The user ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user of the app and their settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// The ID from the authentication provider.
    pub id: UserId,
    /// The currency code the user's amounts are shown in.
    ///
    /// This is empty until the user has chosen a currency.
    pub currency: String,
}

impl User {
    /// The user's chosen currency, or `None` if they have not chosen one yet.
    pub fn currency(&self) -> Option<&'static Currency> {
        find_currency(&self.currency)
    }

    /// The symbol to show in front of amounts, defaulting to the first
    /// supported currency if the user has not chosen one.
    pub fn currency_symbol(&self) -> &'static str {
        self.currency()
            .map(|currency| currency.symbol)
            .unwrap_or(CURRENCIES[0].symbol)
    }
}
