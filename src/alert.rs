//! Alert system for displaying success and error messages to users.
//!
//! Alerts are HTML fragments that HTMX swaps into the page's alert container.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::html::ALERT_CONTAINER_ID;

/// An alert message to show the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message with extra details.
    Success { message: String, details: String },
    /// A success message without details.
    SuccessSimple { message: String },
    /// An error message with details on how to fix the problem.
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, Some(details)),
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, None),
            Alert::Error { message, details } => (ERROR_STYLE, message, Some(details)),
        };

        html!(
            div role="alert" class=(container_style)
            {
                div class="flex justify-between items-start gap-4"
                {
                    div
                    {
                        p class="font-medium" { (message) }

                        @if let Some(details) = details.filter(|details| !details.is_empty())
                        {
                            p class="mt-1 text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="text-lg leading-none"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        )
    }

    /// Render the alert so that HTMX swaps it into the alert container
    /// regardless of the request's target.
    pub fn into_oob_html(self) -> Markup {
        html!(
            div id=(ALERT_CONTAINER_ID) hx-swap-oob="true"
            {
                (self.into_html())
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

const SUCCESS_STYLE: &str = "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
    dark:bg-gray-800 dark:text-green-400 border border-green-300 dark:border-green-800";

const ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 border border-red-300 dark:border-red-800";

#[cfg(test)]
mod alert_tests {
    use scraper::{Html, Selector};

    use super::Alert;

    fn paragraphs(alert: Alert) -> Vec<String> {
        let html = Html::parse_fragment(&alert.into_html().into_string());
        let p = Selector::parse("p").unwrap();

        html.select(&p)
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[test]
    fn simple_success_has_only_message() {
        let got = paragraphs(Alert::SuccessSimple {
            message: "Category deleted successfully".to_owned(),
        });

        assert_eq!(got, vec!["Category deleted successfully".to_owned()]);
    }

    #[test]
    fn error_has_message_and_details() {
        let got = paragraphs(Alert::Error {
            message: "Something went wrong".to_owned(),
            details: "Try again".to_owned(),
        });

        assert_eq!(
            got,
            vec!["Something went wrong".to_owned(), "Try again".to_owned()]
        );
    }

    #[test]
    fn oob_alert_targets_alert_container() {
        let html = Alert::SuccessSimple {
            message: "Done".to_owned(),
        }
        .into_oob_html()
        .into_string();

        assert!(html.contains(r#"id="alert-container""#));
        assert!(html.contains(r#"hx-swap-oob="true""#));
    }
}
