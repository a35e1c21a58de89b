//! The confirmation dialog shown before deleting a category.

use maud::{Markup, html};

use crate::{
    category::Category,
    endpoints,
    html::{ALERT_CONTAINER_ID, BUTTON_DANGER_STYLE, BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE},
};

/// A delete button for `category` that opens a dialog asking the user to
/// confirm the deletion.
///
/// Continuing sends the delete request and removes the category's list item
/// on success. Errors are shown in the alert container.
pub(super) fn delete_category_dialog(category: &Category) -> Markup {
    let dialog_id = format!("delete-category-{}", category.id);
    let open_dialog = format!("document.getElementById('{dialog_id}').showModal()");
    let delete_params = serde_json::json!({
        "name": category.name.as_ref(),
        "type": category.category_type.as_str(),
    })
    .to_string();

    html!(
        button
            type="button"
            class=(BUTTON_DELETE_STYLE)
            onclick=(open_dialog)
        {
            "Delete"
        }

        dialog
            id=(dialog_id)
            data-category=(category.identifier())
            aria-labelledby={ (dialog_id) "-title" }
            class="max-w-md p-6 rounded-lg shadow bg-white dark:bg-gray-800
                text-gray-900 dark:text-white backdrop:bg-black/50"
        {
            h2 id={ (dialog_id) "-title" } class="text-lg font-semibold"
            {
                "Are you absolutely sure?"
            }

            p class="mt-2 text-sm text-gray-500 dark:text-gray-400"
            {
                "This action cannot be undone. This will permanently delete the '"
                (category.icon) " " (category.name)
                "' category"
            }

            div class="flex justify-end gap-2 mt-6"
            {
                form method="dialog"
                {
                    button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
                }

                button
                    type="button"
                    class=(BUTTON_DANGER_STYLE)
                    hx-delete=(endpoints::CATEGORIES)
                    hx-vals=(delete_params)
                    hx-target="closest li"
                    hx-swap="delete"
                    hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                    onclick="this.closest('dialog').close()"
                {
                    "Continue"
                }
            }
        }
    )
}
