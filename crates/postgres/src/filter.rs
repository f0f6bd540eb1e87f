use sqlx::{Postgres, QueryBuilder};

use crate::value::SqlValue;

/// A single filter predicate on one column.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Exact equality against a bound value.
    Eq(&'static str, SqlValue),
    /// Case-insensitive substring containment: both the stored value and the
    /// query substring are lower-cased before the comparison, so matching is
    /// locale-naive but consistent.
    ContainsLower(&'static str, String),
}

/// An AND-combined set of predicates compiled into a WHERE clause.
///
/// Composing predicates is how entity-specific search is expressed; there is
/// no per-entity repository type to extend. Pagination is never part of a
/// filter.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// An empty filter matching every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality predicate.
    pub fn eq(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.predicates.push(Predicate::Eq(column, value.into()));
        self
    }

    /// Adds a case-insensitive substring predicate. The needle is trimmed
    /// before matching, mirroring how search input arrives from query strings.
    pub fn contains_lower(mut self, column: &'static str, needle: &str) -> Self {
        self.predicates
            .push(Predicate::ContainsLower(column, needle.to_string()));
        self
    }

    /// True when no predicate has been added.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Appends the WHERE clause to the builder, binding one placeholder per
    /// predicate. Appends nothing for an empty filter.
    pub(crate) fn apply(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            match predicate {
                Predicate::Eq(column, value) => {
                    builder.push(format!("{column} = "));
                    value.push_to(builder);
                }
                Predicate::ContainsLower(column, needle) => {
                    builder.push(format!("lower({column}) LIKE "));
                    SqlValue::Text(like_pattern(needle)).push_to(builder);
                }
            }
        }
    }
}

fn like_pattern(needle: &str) -> String {
    format!("%{}%", needle.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(filter: &Filter) -> String {
        let mut builder = QueryBuilder::new("SELECT id FROM hotels");
        filter.apply(&mut builder);
        builder.sql().to_string()
    }

    #[test]
    fn empty_filter_appends_nothing() {
        assert_eq!(compile(&Filter::new()), "SELECT id FROM hotels");
    }

    #[test]
    fn eq_predicates_are_and_combined() {
        let filter = Filter::new().eq("id", 7).eq("hotel_id", 3);
        assert_eq!(
            compile(&filter),
            "SELECT id FROM hotels WHERE id = $1 AND hotel_id = $2"
        );
    }

    #[test]
    fn contains_compiles_to_a_lowered_like() {
        let filter = Filter::new().contains_lower("location", "Soc");
        assert_eq!(
            compile(&filter),
            "SELECT id FROM hotels WHERE lower(location) LIKE $1"
        );
    }

    #[test]
    fn contains_lowercases_and_trims_the_needle() {
        assert_eq!(like_pattern(" Soc "), "%soc%");
        assert_eq!(like_pattern("Beach St"), "%beach st%");
    }
}
