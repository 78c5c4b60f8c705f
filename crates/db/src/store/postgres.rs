//! PostgreSQL-backed record store.

use async_trait::async_trait;
use explorer_core::listing::{RecordFilter, RecordSort, SortColumn};
use explorer_core::types::Timestamp;

use super::{RecordStore, StoreError};
use crate::models::record::{NewRecord, Record};
use crate::DbPool;

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for `records` SELECT queries.
const COLUMNS: &str = "id, name, category, status, price, created_at";

/// Column list for INSERT (excludes auto-generated `id`).
const INSERT_COLUMNS: &str = "name, category, status, price, created_at";

/// Number of bind parameters per inserted row.
const INSERT_ARITY: usize = 5;

// ---------------------------------------------------------------------------
// PgRecordStore
// ---------------------------------------------------------------------------

/// Record store backed by a sqlx connection pool.
///
/// Each call checks a connection out of the pool for the duration of one
/// statement; the connection returns to the pool when the call completes,
/// including on error.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert records in a single multi-row statement inside one transaction.
    pub async fn insert_batch(&self, records: &[NewRecord]) -> Result<u64, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        let query = build_insert(records.len());
        let mut q = sqlx::query(&query);
        for record in records {
            q = q
                .bind(&record.name)
                .bind(&record.category)
                .bind(&record.status)
                .bind(record.price)
                .bind(record.created_at);
        }

        let mut tx = self.pool.begin().await?;
        let inserted = q.execute(&mut *tx).await?.rows_affected();
        tx.commit().await?;
        Ok(inserted)
    }

    /// Delete every record. Used by the seed tool before re-seeding.
    pub async fn clear(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM records")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn count(&self, filter: &RecordFilter) -> Result<i64, StoreError> {
        let (where_clause, bind_values, _) = build_record_filter(filter);

        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM records {where_clause}");

        let q = bind_record_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        Ok(q.fetch_one(&self.pool).await?)
    }

    async fn query(
        &self,
        filter: &RecordFilter,
        sort: RecordSort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Record>, StoreError> {
        let (where_clause, bind_values, bind_idx) = build_record_filter(filter);

        let query = format!(
            "SELECT {COLUMNS} FROM records {where_clause} \
             ORDER BY {} \
             LIMIT ${bind_idx} OFFSET ${}",
            order_by_clause(sort),
            bind_idx + 1
        );

        let q = bind_record_values(sqlx::query_as::<_, Record>(&query), &bind_values);
        Ok(q.bind(limit).bind(offset).fetch_all(&self.pool).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built record queries.
#[derive(Debug, PartialEq)]
enum BindValue {
    Text(String),
    Float(f64),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from a [`RecordFilter`].
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
/// The `where_clause` is empty if no filters are active, or starts with `WHERE `.
fn build_record_filter(filter: &RecordFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(ref search) = filter.search {
        conditions.push(format!("name ILIKE ${bind_idx} ESCAPE '\\'"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{}%", escape_like(search))));
    }

    if let Some(ref category) = filter.category {
        conditions.push(format!("LOWER(category) = LOWER(${bind_idx})"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(category.clone()));
    }

    if let Some(ref status) = filter.status {
        conditions.push(format!("LOWER(status) = LOWER(${bind_idx})"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.clone()));
    }

    if let Some(price) = filter.price {
        conditions.push(format!("price >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Float(price.min));

        conditions.push(format!("price <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Float(price.max));
    }

    if let Some(created) = filter.created {
        if let Some(from) = created.from {
            conditions.push(format!("created_at >= ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::Timestamp(from));
        }
        if let Some(to) = created.to {
            conditions.push(format!("created_at < ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::Timestamp(to));
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// ORDER BY body for `sort`, with `id` as a deterministic tie-breaker.
///
/// Column names come from the closed [`SortColumn`] mapping, never from
/// request input.
fn order_by_clause(sort: RecordSort) -> String {
    let direction = sort.order.as_sql();
    match sort.column {
        SortColumn::Id => format!("id {direction}"),
        column => format!("{} {direction}, id {direction}", column.column_name()),
    }
}

/// Escape LIKE metacharacters so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Multi-row INSERT statement for `rows` records.
fn build_insert(rows: usize) -> String {
    let values: Vec<String> = (0..rows)
        .map(|row| {
            let placeholders: Vec<String> = (1..=INSERT_ARITY)
                .map(|col| format!("${}", row * INSERT_ARITY + col))
                .collect();
            format!("({})", placeholders.join(", "))
        })
        .collect();

    format!(
        "INSERT INTO records ({INSERT_COLUMNS}) VALUES {}",
        values.join(", ")
    )
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_record_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Float(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_record_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Float(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use explorer_core::date_range::DateInterval;
    use explorer_core::listing::{PriceRange, SortOrder};

    use super::*;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let (where_clause, binds, next) = build_record_filter(&RecordFilter::default());
        assert_eq!(where_clause, "");
        assert!(binds.is_empty());
        assert_eq!(next, 1);
    }

    #[test]
    fn filters_are_anded_in_pipeline_order() {
        let filter = RecordFilter {
            search: Some("lamp".into()),
            category: Some("electronics".into()),
            status: Some("in stock".into()),
            price: Some(PriceRange {
                min: 20.0,
                max: 40.0,
            }),
            created: None,
        };

        let (where_clause, binds, next) = build_record_filter(&filter);

        assert_eq!(
            where_clause,
            "WHERE name ILIKE $1 ESCAPE '\\' \
             AND LOWER(category) = LOWER($2) \
             AND LOWER(status) = LOWER($3) \
             AND price >= $4 AND price <= $5"
        );
        assert_eq!(
            binds,
            vec![
                BindValue::Text("%lamp%".into()),
                BindValue::Text("electronics".into()),
                BindValue::Text("in stock".into()),
                BindValue::Float(20.0),
                BindValue::Float(40.0),
            ]
        );
        assert_eq!(next, 6);
    }

    #[test]
    fn open_ended_intervals_bind_one_side_only() {
        let cutoff = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let filter = RecordFilter {
            created: Some(DateInterval {
                from: None,
                to: Some(cutoff),
            }),
            ..Default::default()
        };

        let (where_clause, binds, next) = build_record_filter(&filter);

        assert_eq!(where_clause, "WHERE created_at < $1");
        assert_eq!(binds, vec![BindValue::Timestamp(cutoff)]);
        assert_eq!(next, 2);
    }

    #[test]
    fn search_term_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn order_by_adds_id_tie_breaker() {
        let sort = RecordSort {
            column: SortColumn::Price,
            order: SortOrder::Asc,
        };
        assert_eq!(order_by_clause(sort), "price ASC, id ASC");

        let by_id = RecordSort {
            column: SortColumn::Id,
            order: SortOrder::Desc,
        };
        assert_eq!(order_by_clause(by_id), "id DESC");
    }

    #[test]
    fn insert_numbers_placeholders_across_rows() {
        assert_eq!(
            build_insert(2),
            "INSERT INTO records (name, category, status, price, created_at) \
             VALUES ($1, $2, $3, $4, $5), ($6, $7, $8, $9, $10)"
        );
    }
}
