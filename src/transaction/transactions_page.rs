//! The page listing the user's transactions within a date range, with a form
//! for recording new ones.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, Duration, OffsetDateTime};

use crate::{
    Error, endpoints,
    category::{Category, TransactionType, get_categories},
    html::{
        ALERT_CONTAINER_ID, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency,
    },
    navigation::NavBar,
    transaction::{Transaction, TransactionState, get_transactions_in_range},
    user::{UserId, get_or_create_user},
};

/// How many days back the page shows when no range is given.
const DEFAULT_RANGE_DAYS: i64 = 30;

/// The date range to show transactions for.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    /// The first day to include, defaults to [DEFAULT_RANGE_DAYS] before `to`.
    pub from: Option<Date>,
    /// The last day to include, defaults to today.
    pub to: Option<Date>,
}

impl TransactionsQuery {
    fn range(&self, today: Date) -> (Date, Date) {
        let to = self.to.unwrap_or(today);
        let from = self
            .from
            .unwrap_or_else(|| to - Duration::days(DEFAULT_RANGE_DAYS));

        (from, to)
    }
}

/// Route handler for the transactions page.
pub async fn get_transactions_page(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserId>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let (from, to) = query.range(OffsetDateTime::now_utc().date());

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let user = get_or_create_user(&user_id, &connection)?;
    let transactions = get_transactions_in_range(&user_id, from, to, &connection)
        .inspect_err(|error| tracing::error!("Could not get transactions: {error}"))?;
    let categories = get_categories(&user_id, None, &connection)?;

    Ok(transactions_view(
        &transactions,
        &categories,
        (from, to),
        user.currency_symbol(),
    )
    .into_response())
}

fn transactions_view(
    transactions: &[Transaction],
    categories: &[Category],
    (from, to): (Date, Date),
    currency_symbol: &str,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let table_row = |transaction: &Transaction| {
        let amount = match transaction.transaction_type {
            TransactionType::Expense => -transaction.amount,
            TransactionType::Income => transaction.amount,
        };

        html!(
            tr class=(TABLE_ROW_STYLE) data-type=(transaction.transaction_type)
            {
                td class=(TABLE_CELL_STYLE) { (transaction.date) }
                td class=(TABLE_CELL_STYLE) { (transaction.description) }
                td class=(TABLE_CELL_STYLE) { (transaction.category) }
                td class={ (TABLE_CELL_STYLE) " text-right" }
                {
                    (format_currency(amount, currency_symbol))
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-8"
            {
                h1 class="text-xl font-bold" { "Transactions" }

                form method="get" action=(endpoints::TRANSACTIONS_VIEW) class="flex gap-4 items-end"
                {
                    div
                    {
                        label for="from" class=(FORM_LABEL_STYLE) { "From" }
                        input id="from" type="date" name="from" value=(from) class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="to" class=(FORM_LABEL_STYLE) { "To" }
                        input id="to" type="date" name="to" value=(to) class=(FORM_TEXT_INPUT_STYLE);
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Show" }
                }

                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            (table_row(transaction))
                        }

                        @if transactions.is_empty() {
                            tr
                            {
                                td colspan="4" class="px-6 py-4 text-center"
                                {
                                    "No transactions between " (from) " and " (to) "."
                                }
                            }
                        }
                    }
                }

                (new_transaction_form(categories, to))
            }
        }
    );

    base("Transactions", &content)
}

fn new_transaction_form(categories: &[Category], default_date: Date) -> Markup {
    html!(
        section id="new-transaction"
        {
            h2 class="text-lg font-semibold" { "Record a transaction" }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target={ "#" (ALERT_CONTAINER_ID) }
                hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                class="w-full space-y-4"
            {
                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                    input
                        id="amount"
                        type="number"
                        name="amount"
                        min="0.01"
                        step="0.01"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }
                    input
                        id="description"
                        type="text"
                        name="description"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                    input
                        id="date"
                        type="date"
                        name="date"
                        value=(default_date)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                    select id="category" name="category" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in categories {
                            option value=(category.name) data-type=(category.category_type)
                            {
                                (category.icon) " " (category.name) " (" (category.category_type) ")"
                            }
                        }
                    }
                }

                fieldset class="flex gap-4"
                {
                    legend class=(FORM_LABEL_STYLE) { "Type" }

                    label
                    {
                        input type="radio" name="type" value=(TransactionType::Expense) checked;
                        " Expense"
                    }

                    label
                    {
                        input type="radio" name="type" value=(TransactionType::Income);
                        " Income"
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Record" }
            }
        }
    )
}


#[cfg(test)]
mod transactions_page_tests {
    use axum::{Extension, extract::State, http::StatusCode};
    use axum_extra::extract::Query;
    use scraper::Selector;
    use time::{Duration, OffsetDateTime, macros::date};

    use crate::{
        Error,
        category::{CategoryIcon, CategoryName, NewCategory, TransactionType, create_category},
        test_utils::{assert_valid_html, get_test_app_state, parse_html_document},
        transaction::{
            NewTransaction, TransactionState, TransactionsQuery, create_transaction,
            get_transactions_page,
        },
        user::{UserId, get_or_create_user, update_user_currency},
    };

    fn get_state(user_id: &UserId) -> TransactionState {
        let state = get_test_app_state();
        {
            let connection = state.db_connection.lock().unwrap();
            get_or_create_user(user_id, &connection).unwrap();
            update_user_currency(user_id, "EUR", &connection).unwrap();
            create_category(
                user_id,
                NewCategory {
                    name: CategoryName::new_unchecked("Groceries"),
                    icon: CategoryIcon::default(),
                    category_type: TransactionType::Expense,
                },
                &connection,
            )
            .unwrap();
            create_transaction(
                user_id,
                NewTransaction {
                    amount: 12.5,
                    description: "Weekly shop".to_owned(),
                    date: date!(2024 - 03 - 15),
                    transaction_type: TransactionType::Expense,
                    category: "Groceries".to_owned(),
                },
                &connection,
            )
            .unwrap();
        }

        TransactionState {
            db_connection: state.db_connection,
        }
    }

    #[tokio::test]
    async fn lists_transactions_in_user_currency() {
        let user_id = UserId::new("user_123").unwrap();
        let state = get_state(&user_id);

        let response = get_transactions_page(
            State(state),
            Extension(user_id),
            Query(TransactionsQuery {
                from: Some(date!(2024 - 03 - 01)),
                to: Some(date!(2024 - 03 - 31)),
            }),
        )
        .await
        .expect("Could not render transactions page");

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let cells: Vec<String> = html
            .select(&Selector::parse("tbody tr td").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(cells[0], "2024-03-15");
        assert_eq!(cells[1], "Weekly shop");
        assert_eq!(cells[2], "Groceries");
        assert!(cells[3].starts_with("-€"), "got {}", cells[3]);
        assert!(cells[3].ends_with("12.50"), "got {}", cells[3]);
    }

    #[tokio::test]
    async fn form_lists_categories() {
        let user_id = UserId::new("user_123").unwrap();
        let state = get_state(&user_id);

        let response = get_transactions_page(
            State(state),
            Extension(user_id),
            Query(TransactionsQuery::default()),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        let options: Vec<_> = html
            .select(&Selector::parse("select[name=category] option").unwrap())
            .filter_map(|option| option.attr("value"))
            .collect();
        assert_eq!(options, vec!["Groceries"]);
    }

    #[tokio::test]
    async fn range_that_is_too_long_is_an_error() {
        let user_id = UserId::new("user_123").unwrap();
        let state = get_state(&user_id);
        let to = OffsetDateTime::now_utc().date();
        let from = to - Duration::days(365);

        let result = get_transactions_page(
            State(state),
            Extension(user_id),
            Query(TransactionsQuery {
                from: Some(from),
                to: Some(to),
            }),
        )
        .await;

        assert!(matches!(result, Err(Error::InvalidDateRange(_, _))));
    }
}
