use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder};

/// A SQL parameter value covering every column type the schema uses.
///
/// Repositories assemble statements with [`QueryBuilder`] and bind these
/// values positionally, so user input never ends up inside the SQL text
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// 32-bit integer (ids, prices, quantities).
    Int(i32),
    /// Non-null text.
    Text(String),
    /// Nullable text (e.g. a room description).
    OptText(Option<String>),
    /// Calendar date without a time zone.
    Date(NaiveDate),
}

impl SqlValue {
    /// Appends this value to the builder as the next bound placeholder.
    pub(crate) fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            SqlValue::Int(value) => builder.push_bind(*value),
            SqlValue::Text(value) => builder.push_bind(value.clone()),
            SqlValue::OptText(value) => builder.push_bind(value.clone()),
            SqlValue::Date(value) => builder.push_bind(*value),
        };
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        SqlValue::OptText(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}
