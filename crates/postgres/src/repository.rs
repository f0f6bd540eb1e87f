use std::marker::PhantomData;

use sqlx::postgres::PgRow;
use sqlx::{Postgres, QueryBuilder, Transaction};

use crate::error::StoreError;
use crate::filter::Filter;
use crate::value::SqlValue;

/// Entity descriptor: table name, column set, and row decoding.
///
/// Implementing this trait is all an entity needs to get the full CRUD
/// surface; there is no per-entity repository type to write.
pub trait Table: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin {
    /// Table name in the database.
    const TABLE: &'static str;
    /// Every column of the table, id first, in declaration order.
    const COLUMNS: &'static [&'static str];
}

/// One column/value pair of a payload. A `None` value marks a field the
/// caller did not provide, which a sparse patch leaves untouched.
#[derive(Debug, Clone)]
pub struct Field {
    /// Column the value is written to.
    pub column: &'static str,
    /// The value, or `None` when the field was not provided.
    pub value: Option<SqlValue>,
}

impl Field {
    /// A provided field.
    pub fn set(column: &'static str, value: impl Into<SqlValue>) -> Self {
        Self {
            column,
            value: Some(value.into()),
        }
    }

    /// A field that is provided only when `value` is `Some`.
    pub fn opt(column: &'static str, value: Option<impl Into<SqlValue>>) -> Self {
        Self {
            column,
            value: value.map(Into::into),
        }
    }
}

/// Insert/update payload: the column/value pairs to write, in declaration
/// order. Generated columns (the id) are never part of a payload.
pub trait Payload {
    /// All fields of the payload, provided or not.
    fn fields(&self) -> Vec<Field>;
}

/// Generic CRUD repository over one entity, bound to the transaction of the
/// enclosing unit of work.
pub struct Repository<'t, E: Table> {
    tx: &'t mut Transaction<'static, Postgres>,
    _entity: PhantomData<E>,
}

impl<'t, E: Table> Repository<'t, E> {
    pub(crate) fn new(tx: &'t mut Transaction<'static, Postgres>) -> Self {
        Self {
            tx,
            _entity: PhantomData,
        }
    }

    /// All rows matching the filter, ordered by id. No implicit bounds —
    /// callers that paginate use [`get_page`](Self::get_page).
    pub async fn get_all(&mut self, filter: &Filter) -> Result<Vec<E>, StoreError> {
        self.fetch(filter, None).await
    }

    /// Matching rows with caller-supplied bounds, ordered by id.
    pub async fn get_page(
        &mut self,
        filter: &Filter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<E>, StoreError> {
        self.fetch(filter, Some((limit, offset))).await
    }

    async fn fetch(
        &mut self,
        filter: &Filter,
        bounds: Option<(i64, i64)>,
    ) -> Result<Vec<E>, StoreError> {
        let mut builder = QueryBuilder::new("");
        push_select(&mut builder, E::TABLE, E::COLUMNS, filter, bounds);
        Ok(builder
            .build_query_as::<E>()
            .fetch_all(&mut **self.tx)
            .await?)
    }

    /// Exactly one matching row, or `None` when nothing matched. A filter
    /// that matches several rows is ambiguous and fails with
    /// [`StoreError::MultipleRows`].
    pub async fn get_one_or_none(&mut self, filter: &Filter) -> Result<Option<E>, StoreError> {
        let mut rows = self.get_page(filter, 2, 0).await?;
        if rows.len() > 1 {
            return Err(StoreError::MultipleRows);
        }
        Ok(rows.pop())
    }

    /// Inserts one row and returns it as persisted, including the id the
    /// storage engine assigned. A breached unique constraint surfaces as
    /// [`StoreError::UniqueViolation`] for the caller to translate.
    pub async fn add(&mut self, data: &impl Payload) -> Result<E, StoreError> {
        let fields = provided_fields(data.fields());

        let mut builder = QueryBuilder::new("");
        push_insert(&mut builder, E::TABLE, &fields, E::COLUMNS);
        builder
            .build_query_as::<E>()
            .fetch_one(&mut **self.tx)
            .await
            .map_err(StoreError::from_write)
    }

    /// Updates rows matching the filter and returns the affected count.
    ///
    /// With `exclude_unset` the update is a sparse patch: only fields the
    /// payload provides are written, all others keep their stored values.
    /// Without it the payload must be full, so every column is rewritten.
    pub async fn edit(
        &mut self,
        data: &impl Payload,
        exclude_unset: bool,
        filter: &Filter,
    ) -> Result<u64, StoreError> {
        let all = data.fields();
        let total = all.len();
        let fields = provided_fields(all);
        debug_assert!(
            exclude_unset || fields.len() == total,
            "full update requires a fully-provided payload"
        );
        if fields.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::new("");
        push_update(&mut builder, E::TABLE, &fields, filter);
        let result = builder
            .build()
            .execute(&mut **self.tx)
            .await
            .map_err(StoreError::from_write)?;
        Ok(result.rows_affected())
    }

    /// Deletes rows matching the filter. Zero matches is a no-op, not an
    /// error; returns the number of rows removed.
    pub async fn delete(&mut self, filter: &Filter) -> Result<u64, StoreError> {
        let mut builder = QueryBuilder::new("");
        push_delete(&mut builder, E::TABLE, filter);
        let result = builder.build().execute(&mut **self.tx).await?;
        Ok(result.rows_affected())
    }
}

fn provided_fields(fields: Vec<Field>) -> Vec<(&'static str, SqlValue)> {
    fields
        .into_iter()
        .filter_map(|field| field.value.map(|value| (field.column, value)))
        .collect()
}

fn push_select(
    builder: &mut QueryBuilder<'_, Postgres>,
    table: &str,
    columns: &[&str],
    filter: &Filter,
    bounds: Option<(i64, i64)>,
) {
    builder.push(format!("SELECT {} FROM {}", columns.join(", "), table));
    filter.apply(builder);
    builder.push(" ORDER BY id");
    if let Some((limit, offset)) = bounds {
        builder.push(format!(" LIMIT {limit} OFFSET {offset}"));
    }
}

fn push_insert(
    builder: &mut QueryBuilder<'_, Postgres>,
    table: &str,
    fields: &[(&'static str, SqlValue)],
    returning: &[&str],
) {
    let columns: Vec<&str> = fields.iter().map(|(column, _)| *column).collect();
    builder.push(format!("INSERT INTO {} ({}) VALUES (", table, columns.join(", ")));
    for (i, (_, value)) in fields.iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        value.push_to(builder);
    }
    builder.push(format!(") RETURNING {}", returning.join(", ")));
}

fn push_update(
    builder: &mut QueryBuilder<'_, Postgres>,
    table: &str,
    fields: &[(&'static str, SqlValue)],
    filter: &Filter,
) {
    builder.push(format!("UPDATE {table} SET "));
    for (i, (column, value)) in fields.iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        builder.push(format!("{column} = "));
        value.push_to(builder);
    }
    filter.apply(builder);
}

fn push_delete(builder: &mut QueryBuilder<'_, Postgres>, table: &str, filter: &Filter) {
    builder.push(format!("DELETE FROM {table}"));
    filter.apply(builder);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_orders_by_id_and_appends_bounds() {
        let mut builder = QueryBuilder::new("");
        push_select(
            &mut builder,
            "hotels",
            &["id", "title"],
            &Filter::new(),
            Some((5, 10)),
        );
        assert_eq!(
            builder.sql(),
            "SELECT id, title FROM hotels ORDER BY id LIMIT 5 OFFSET 10"
        );
    }

    #[test]
    fn select_binds_filter_placeholders() {
        let mut builder = QueryBuilder::new("");
        push_select(
            &mut builder,
            "rooms",
            &["id", "hotel_id"],
            &Filter::new().eq("hotel_id", 1),
            None,
        );
        assert_eq!(
            builder.sql(),
            "SELECT id, hotel_id FROM rooms WHERE hotel_id = $1 ORDER BY id"
        );
    }

    #[test]
    fn insert_returns_the_full_column_set() {
        let fields = vec![
            ("title", SqlValue::Text("A".to_string())),
            ("location", SqlValue::Text("Sochi".to_string())),
        ];
        let mut builder = QueryBuilder::new("");
        push_insert(&mut builder, "hotels", &fields, &["id", "title", "location"]);
        assert_eq!(
            builder.sql(),
            "INSERT INTO hotels (title, location) VALUES ($1, $2) RETURNING id, title, location"
        );
    }

    #[test]
    fn update_numbers_set_columns_before_filter_placeholders() {
        let fields = vec![
            ("price", SqlValue::Int(150)),
            ("quantity", SqlValue::Int(3)),
        ];
        let mut builder = QueryBuilder::new("");
        push_update(&mut builder, "rooms", &fields, &Filter::new().eq("id", 1));
        assert_eq!(
            builder.sql(),
            "UPDATE rooms SET price = $1, quantity = $2 WHERE id = $3"
        );
    }

    #[test]
    fn delete_compiles_the_filter() {
        let mut builder = QueryBuilder::new("");
        push_delete(
            &mut builder,
            "rooms",
            &Filter::new().eq("id", 2).eq("hotel_id", 1),
        );
        assert_eq!(
            builder.sql(),
            "DELETE FROM rooms WHERE id = $1 AND hotel_id = $2"
        );
    }

    #[test]
    fn provided_fields_skips_unset_entries() {
        let fields = vec![
            Field::set("title", "Suite"),
            Field::opt("price", None::<i32>),
            Field::opt("quantity", Some(2)),
        ];
        let provided = provided_fields(fields);
        let columns: Vec<&str> = provided.iter().map(|(column, _)| *column).collect();
        assert_eq!(columns, vec!["title", "quantity"]);
    }
}
