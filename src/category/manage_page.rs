//! The manage page lists the user's categories and their currency.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error, endpoints,
    category::{
        Category, CategoryState, TransactionType, dialog::delete_category_dialog, get_categories,
    },
    html::{
        ALERT_CONTAINER_ID, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    navigation::NavBar,
    user::{User, UserId, get_or_create_user},
};

/// Route handler for the manage page.
pub async fn get_manage_page(
    State(state): State<CategoryState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let user = get_or_create_user(&user_id, &connection)
        .inspect_err(|error| tracing::error!("Could not get user {user_id}: {error}"))?;

    let categories = get_categories(&user_id, None, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(manage_view(&user, &categories).into_response())
}

fn manage_view(user: &User, categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::MANAGE_VIEW).into_html();
    let (income, expense): (Vec<&Category>, Vec<&Category>) = categories
        .iter()
        .partition(|category| category.category_type == TransactionType::Income);

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-2xl space-y-8"
            {
                h1 class="text-xl font-bold" { "Manage" }

                section id="currency"
                {
                    h2 class="text-lg font-semibold" { "Currency" }

                    p
                    {
                        @match user.currency() {
                            Some(currency) => { (currency.label) },
                            None => { "No currency selected" },
                        }
                        " "
                        a href=(endpoints::SELECT_CURRENCY_VIEW) class=(LINK_STYLE) { "Change" }
                    }
                }

                (category_list("Income categories", "income-categories", &income))
                (category_list("Expense categories", "expense-categories", &expense))
                (new_category_form())
            }
        }
    );

    base("Manage", &content)
}

fn category_list(title: &str, id: &str, categories: &[&Category]) -> Markup {
    html!(
        section id=(id)
        {
            h2 class="text-lg font-semibold" { (title) }

            @if categories.is_empty() {
                p class="text-gray-500 dark:text-gray-400" { "No categories yet." }
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for category in categories {
                        li class="flex justify-between items-center py-2"
                        {
                            span { (category.icon) " " (category.name) }
                            (delete_category_dialog(category))
                        }
                    }
                }
            }
        }
    )
}

fn new_category_form() -> Markup {
    html!(
        section id="new-category"
        {
            h2 class="text-lg font-semibold" { "Create category" }

            form
                hx-post=(endpoints::CATEGORIES)
                hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                class="w-full space-y-4 md:space-y-6"
            {
                div
                {
                    label for="name" class=(FORM_LABEL_STYLE) { "Name" }
                    input
                        id="name"
                        type="text"
                        name="name"
                        placeholder="Category name"
                        required
                        minlength="3"
                        maxlength="20"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="icon" class=(FORM_LABEL_STYLE) { "Icon" }
                    input
                        id="icon"
                        type="text"
                        name="icon"
                        placeholder="e.g. 🛒"
                        maxlength="20"
                        class=(FORM_TEXT_INPUT_STYLE);
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

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Category" }
            }
        }
    )
}
