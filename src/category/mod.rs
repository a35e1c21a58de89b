//! Categories that group transactions, and the pages for managing them.

mod create;
mod db;
mod delete;
mod dialog;
mod domain;
mod manage_page;

pub use create::create_category_endpoint;
pub use db::{
    create_category, create_category_table, delete_category, get_categories, get_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{
    Category, CategoryIcon, CategoryKey, CategoryName, CreateCategoryForm, DeleteCategoryForm,
    NewCategory, TransactionType,
};
pub use manage_page::get_manage_page;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

/// The state needed for the category pages and endpoints.
#[derive(Debug, Clone)]
pub struct CategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
