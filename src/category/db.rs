//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryIcon, CategoryKey, CategoryName, NewCategory, TransactionType},
    user::UserId,
};

/// Create a category for `user_id` and return it with its generated ID.
///
/// # Errors
///
/// Returns an [Error::DuplicateCategory] if the user already has a category
/// with the same name and type.
pub fn create_category(
    user_id: &UserId,
    category: NewCategory,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .execute(
            "INSERT INTO category (user_id, name, icon, type) VALUES (?1, ?2, ?3, ?4);",
            (
                user_id.as_str(),
                category.name.as_ref(),
                category.icon.as_ref(),
                category.category_type,
            ),
        )
        .map_err(|error| match error {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 2067 => {
                Error::DuplicateCategory(category.name.to_string())
            }
            error => error.into(),
        })?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name: category.name,
        icon: category.icon,
        category_type: category.category_type,
    })
}

/// Retrieve the user's category called `name` with the type `category_type`.
///
/// # Errors
///
/// Returns an [Error::NotFound] if the user has no such category.
pub fn get_category(
    user_id: &UserId,
    name: &str,
    category_type: TransactionType,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "SELECT id, name, icon, type FROM category \
            WHERE user_id = ?1 AND name = ?2 AND type = ?3;",
        )?
        .query_row((user_id.as_str(), name, category_type), map_row)
        .map_err(|error| error.into())
}

/// Retrieve the user's categories ordered alphabetically by name.
///
/// Only categories of `category_type` are returned if it is given.
pub fn get_categories(
    user_id: &UserId,
    category_type: Option<TransactionType>,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, icon, type FROM category \
            WHERE user_id = ?1 AND (?2 IS NULL OR type = ?2) \
            ORDER BY name ASC;",
        )?
        .query_map((user_id.as_str(), category_type), map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Delete the user's category identified by `key`.
///
/// Transactions keep the category name they were recorded with.
///
/// # Errors
///
/// Returns an [Error::DeleteMissingCategory] if the user has no such category.
pub fn delete_category(
    user_id: &UserId,
    key: &CategoryKey,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM category WHERE user_id = ?1 AND name = ?2 AND type = ?3",
        (user_id.as_str(), key.name.as_ref(), key.category_type),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            icon TEXT NOT NULL DEFAULT '',
            type TEXT NOT NULL CHECK (type IN ('expense', 'income')),
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (user_id, name, type)
        );

        CREATE INDEX IF NOT EXISTS idx_category_user_id ON category(user_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let raw_icon: String = row.get(2)?;
    let category_type = row.get(3)?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        icon: CategoryIcon::new_unchecked(&raw_icon),
        category_type,
    })
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{
            CategoryIcon, CategoryKey, CategoryName, NewCategory, TransactionType,
            create_category, get_categories, get_category,
        },
        user::UserId,
    };

    use super::{create_category_table, delete_category};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");
        connection
    }

    fn new_category(name: &str, category_type: TransactionType) -> NewCategory {
        NewCategory {
            name: CategoryName::new_unchecked(name),
            icon: CategoryIcon::new_unchecked("🏷️"),
            category_type,
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();

        let category = create_category(
            &user("foo"),
            new_category("Groceries", TransactionType::Expense),
            &connection,
        )
        .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.name.as_ref(), "Groceries");
        assert_eq!(category.category_type, TransactionType::Expense);
    }

    #[test]
    fn duplicate_category_is_rejected() {
        let connection = get_test_db_connection();
        let user_id = user("foo");
        create_category(
            &user_id,
            new_category("Groceries", TransactionType::Expense),
            &connection,
        )
        .unwrap();

        let result = create_category(
            &user_id,
            new_category("Groceries", TransactionType::Expense),
            &connection,
        );

        assert_eq!(result, Err(Error::DuplicateCategory("Groceries".to_owned())));
    }

    #[test]
    fn same_name_is_allowed_for_other_type_and_other_user() {
        let connection = get_test_db_connection();
        create_category(
            &user("foo"),
            new_category("Side hustle", TransactionType::Expense),
            &connection,
        )
        .unwrap();

        create_category(
            &user("foo"),
            new_category("Side hustle", TransactionType::Income),
            &connection,
        )
        .expect("Same name with another type should be allowed");
        create_category(
            &user("bar"),
            new_category("Side hustle", TransactionType::Expense),
            &connection,
        )
        .expect("Same name for another user should be allowed");
    }

    #[test]
    fn get_categories_filters_by_user_and_type() {
        let connection = get_test_db_connection();
        let user_id = user("foo");
        let rent = create_category(
            &user_id,
            new_category("Rent", TransactionType::Expense),
            &connection,
        )
        .unwrap();
        let food = create_category(
            &user_id,
            new_category("Food", TransactionType::Expense),
            &connection,
        )
        .unwrap();
        let salary = create_category(
            &user_id,
            new_category("Salary", TransactionType::Income),
            &connection,
        )
        .unwrap();
        create_category(
            &user("bar"),
            new_category("Bills", TransactionType::Expense),
            &connection,
        )
        .unwrap();

        let expenses = get_categories(&user_id, Some(TransactionType::Expense), &connection);
        let all = get_categories(&user_id, None, &connection);

        assert_eq!(expenses, Ok(vec![food.clone(), rent.clone()]));
        assert_eq!(all, Ok(vec![food, rent, salary]));
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_db_connection();
        let user_id = user("foo");
        let inserted = create_category(
            &user_id,
            new_category("Salary", TransactionType::Income),
            &connection,
        )
        .unwrap();

        let got = get_category(&user_id, "Salary", TransactionType::Income, &connection);

        assert_eq!(got, Ok(inserted));
    }

    #[test]
    fn get_category_with_wrong_type_returns_not_found() {
        let connection = get_test_db_connection();
        let user_id = user("foo");
        create_category(
            &user_id,
            new_category("Salary", TransactionType::Income),
            &connection,
        )
        .unwrap();

        let got = get_category(&user_id, "Salary", TransactionType::Expense, &connection);

        assert_eq!(got, Err(Error::NotFound));
    }

    #[test]
    fn delete_category_succeeds() {
        let connection = get_test_db_connection();
        let user_id = user("foo");
        create_category(
            &user_id,
            new_category("Rent", TransactionType::Expense),
            &connection,
        )
        .unwrap();
        let key = CategoryKey {
            name: CategoryName::new_unchecked("Rent"),
            category_type: TransactionType::Expense,
        };

        let result = delete_category(&user_id, &key, &connection);

        assert_eq!(result, Ok(()));
        assert_eq!(get_categories(&user_id, None, &connection), Ok(vec![]));
    }

    #[test]
    fn delete_category_of_other_user_fails() {
        let connection = get_test_db_connection();
        create_category(
            &user("foo"),
            new_category("Rent", TransactionType::Expense),
            &connection,
        )
        .unwrap();
        let key = CategoryKey {
            name: CategoryName::new_unchecked("Rent"),
            category_type: TransactionType::Expense,
        };

        let result = delete_category(&user("bar"), &key, &connection);

        assert_eq!(result, Err(Error::DeleteMissingCategory));
        assert_eq!(
            get_categories(&user("foo"), None, &connection).map(|categories| categories.len()),
            Ok(1)
        );
    }
}
