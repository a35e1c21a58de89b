//! App wide constants: navigation items, supported currencies and limits.

use serde::Serialize;

use crate::endpoints;

/// A link in the app's navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// The text shown for the link.
    pub label: &'static str,
    /// The name of the icon shown next to the label.
    pub icon: &'static str,
    /// The path the link points to.
    pub link: &'static str,
}

/// The links shown in the navigation bar, in display order.
pub const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        label: "Dashboard",
        icon: "layout",
        link: endpoints::DASHBOARD_VIEW,
    },
    NavItem {
        label: "Transactions",
        icon: "arrow-right-left",
        link: endpoints::TRANSACTIONS_VIEW,
    },
    NavItem {
        label: "Manage",
        icon: "settings",
        link: endpoints::MANAGE_VIEW,
    },
];

/// A currency that users can choose to display their amounts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    /// The name shown to the user, e.g. "$ Dollar".
    pub label: &'static str,
    /// The ISO 4217 currency code, e.g. "USD".
    pub value: &'static str,
    /// The locale used for formatting amounts, e.g. "en-US".
    pub locale: &'static str,
    /// The symbol placed before amounts, e.g. "$".
    pub symbol: &'static str,
}

/// The currencies users can choose from.
pub const CURRENCIES: [Currency; 7] = [
    Currency {
        label: "$ Dollar",
        value: "USD",
        locale: "en-US",
        symbol: "$",
    },
    Currency {
        label: "₦ Naira",
        value: "NGN",
        locale: "en-NG",
        symbol: "₦",
    },
    Currency {
        label: "€ Euro",
        value: "EUR",
        locale: "de-DE",
        symbol: "€",
    },
    Currency {
        label: "£ Pound",
        value: "GBP",
        locale: "en-GB",
        symbol: "£",
    },
    Currency {
        label: "¥ Yen",
        value: "JPY",
        locale: "ja-JP",
        symbol: "¥",
    },
    Currency {
        label: "₩ Won",
        value: "KRW",
        locale: "ko-KR",
        symbol: "₩",
    },
    Currency {
        label: "₹ Rupee",
        value: "INR",
        locale: "hi-IN",
        symbol: "₹",
    },
];

/// The longest date range, in days, that transactions can be listed for.
pub const MAX_DATE_RANGE_DAYS: i64 = 90;

/// Find the supported currency with the currency code `value`, e.g. "EUR".
pub fn find_currency(value: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|currency| currency.value == value)
}

#[cfg(test)]
mod constants_tests {
    use std::collections::HashSet;

    use super::{CURRENCIES, NAV_ITEMS, find_currency};

    #[test]
    fn finds_supported_currency() {
        let currency = find_currency("NGN").expect("NGN should be supported");

        assert_eq!(currency.symbol, "₦");
        assert_eq!(currency.locale, "en-NG");
    }

    #[test]
    fn unsupported_currency_is_none() {
        assert_eq!(find_currency("AUD"), None);
        assert_eq!(find_currency("usd"), None);
        assert_eq!(find_currency(""), None);
    }

    #[test]
    fn currency_codes_are_unique() {
        let codes: HashSet<_> = CURRENCIES.iter().map(|currency| currency.value).collect();

        assert_eq!(codes.len(), CURRENCIES.len());
    }

    #[test]
    fn labels_start_with_symbol() {
        for currency in CURRENCIES {
            assert!(
                currency.label.starts_with(currency.symbol),
                "{} does not start with {}",
                currency.label,
                currency.symbol
            );
        }
    }

    #[test]
    fn nav_items_link_to_distinct_pages() {
        let links: HashSet<_> = NAV_ITEMS.iter().map(|item| item.link).collect();

        assert_eq!(links.len(), NAV_ITEMS.len());
    }
}
