//! Core category domain types and the validation of category forms.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

/// Whether money is coming in or going out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
}

impl TransactionType {
    /// The lowercase name used in forms, URLs and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            other => Err(format!("\"{other}\" is not a transaction type")),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: String| FromSqlError::Other(error.into()))
    }
}

const MIN_NAME_LENGTH: usize = 3;
const MAX_NAME_LENGTH: usize = 20;
const MAX_ICON_LENGTH: usize = 20;

/// A category name between 3 and 20 characters long.
///
/// Length is counted in user perceived characters so that names with
/// accents or emoji are not penalised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidCategoryName] if `name`,
    /// after trimming whitespace, is shorter than 3 or longer than 20
    /// characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        let length = name.graphemes(true).count();

        if (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
            Ok(Self(name.to_owned()))
        } else {
            Err(Error::InvalidCategoryName(name.to_owned()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the name is between 3 and 20 characters long.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An optional icon, usually an emoji, shown next to a category name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryIcon(String);

impl CategoryIcon {
    /// Create a category icon.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidCategoryIcon] if `icon` is
    /// longer than 20 characters.
    pub fn new(icon: &str) -> Result<Self, Error> {
        let icon = icon.trim();

        if icon.graphemes(true).count() <= MAX_ICON_LENGTH {
            Ok(Self(icon.to_owned()))
        } else {
            Err(Error::InvalidCategoryIcon(icon.to_owned()))
        }
    }

    /// Create a category icon without validation.
    pub fn new_unchecked(icon: &str) -> Self {
        Self(icon.to_owned())
    }
}

impl AsRef<str> for CategoryIcon {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a category.
pub type CategoryId = i64;

/// A category that a user's transactions are grouped under, e.g. 'Groceries' or 'Salary'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub icon: CategoryIcon,
    pub category_type: TransactionType,
}

impl Category {
    /// The string that identifies the category among the user's categories,
    /// e.g. "Groceries-expense".
    pub fn identifier(&self) -> String {
        format!("{}-{}", self.name, self.category_type)
    }
}

/// A validated category that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub icon: CategoryIcon,
    pub category_type: TransactionType,
}

/// Identifies one of a user's categories: names are unique per type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryKey {
    pub name: CategoryName,
    pub category_type: TransactionType,
}

/// Form data for creating a category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCategoryForm {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

impl CreateCategoryForm {
    /// Check the form fields and convert them into a [NewCategory].
    pub fn validate(self) -> Result<NewCategory, Error> {
        Ok(NewCategory {
            name: CategoryName::new(&self.name)?,
            icon: CategoryIcon::new(&self.icon)?,
            category_type: self.category_type,
        })
    }
}

/// Form data, or query parameters, for deleting a category.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteCategoryForm {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

impl DeleteCategoryForm {
    /// Check the form fields and convert them into a [CategoryKey].
    pub fn validate(self) -> Result<CategoryKey, Error> {
        Ok(CategoryKey {
            name: CategoryName::new(&self.name)?,
            category_type: self.category_type,
        })
    }
}


#[cfg(test)]
mod category_icon_tests {
    use crate::{Error, category::CategoryIcon};

    #[test]
    fn empty_icon_is_allowed() {
        assert_eq!(CategoryIcon::new(""), Ok(CategoryIcon::default()));
    }

    #[test]
    fn emoji_counts_as_one_character() {
        // A family emoji is several code points joined into one grapheme.
        let icon = "👨‍👩‍👧".repeat(20);

        assert!(CategoryIcon::new(&icon).is_ok());
    }

    #[test]
    fn long_icon_is_rejected() {
        let icon = "x".repeat(21);

        assert_eq!(
            CategoryIcon::new(&icon),
            Err(Error::InvalidCategoryIcon(icon))
        );
    }
}
