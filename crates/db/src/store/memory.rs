//! In-memory record store.
//!
//! Mirrors the SQL semantics of [`super::PgRecordStore`] over a `Vec`, so the
//! listing pipeline can run without a database (tests, local demos).

use std::cmp::Ordering;

use async_trait::async_trait;
use explorer_core::listing::{RecordFilter, RecordSort, SortColumn, SortOrder};

use super::{RecordStore, StoreError};
use crate::models::record::{NewRecord, Record};

/// Immutable snapshot of records held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Vec<Record>,
}

impl MemoryRecordStore {
    /// Assign sequential ids starting at 1, in input order.
    pub fn from_new(records: Vec<NewRecord>) -> Self {
        let records = records
            .into_iter()
            .zip(1..)
            .map(|(record, id)| record.with_id(id))
            .collect();
        Self { records }
    }

    fn matching<'a>(&'a self, filter: &'a RecordFilter) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| matches(filter, r))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn count(&self, filter: &RecordFilter) -> Result<i64, StoreError> {
        Ok(self.matching(filter).count() as i64)
    }

    async fn query(
        &self,
        filter: &RecordFilter,
        sort: RecordSort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Record>, StoreError> {
        let mut rows: Vec<&Record> = self.matching(filter).collect();
        rows.sort_by(|a, b| compare(sort, a, b));

        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(rows.into_iter().skip(offset).take(limit).cloned().collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Whether `record` passes every active predicate of `filter`.
fn matches(filter: &RecordFilter, record: &Record) -> bool {
    if let Some(ref search) = filter.search {
        if !record.name.to_lowercase().contains(&search.to_lowercase()) {
            return false;
        }
    }
    if let Some(ref category) = filter.category {
        if record.category.to_lowercase() != category.to_lowercase() {
            return false;
        }
    }
    if let Some(ref status) = filter.status {
        if record.status.to_lowercase() != status.to_lowercase() {
            return false;
        }
    }
    if let Some(price) = filter.price {
        if !price.contains(record.price) {
            return false;
        }
    }
    if let Some(created) = filter.created {
        if !created.contains(record.created_at) {
            return false;
        }
    }
    true
}

/// Compare by the sort column, then by id, both in the requested direction.
///
/// Text columns compare by their lowercase characters, so `"apple"` sorts
/// before `"Banana"`. Postgres orders the same columns by the database
/// collation, which agrees with this for ASCII names under the usual
/// `en_US.UTF-8` collation but is not guaranteed to in general.
fn compare(sort: RecordSort, a: &Record, b: &Record) -> Ordering {
    let by_column = match sort.column {
        SortColumn::Id => Ordering::Equal,
        SortColumn::Name => cmp_ignore_case(&a.name, &b.name),
        SortColumn::Category => cmp_ignore_case(&a.category, &b.category),
        SortColumn::Status => cmp_ignore_case(&a.status, &b.status),
        SortColumn::Price => a.price.total_cmp(&b.price),
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
    };
    let ordering = by_column.then_with(|| a.id.cmp(&b.id));
    match sort.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use explorer_core::date_range;
    use explorer_core::listing::PriceRange;
    use explorer_core::types::Timestamp;

    use super::*;

    fn record(name: &str, category: &str, price: f64, created_at: Timestamp) -> NewRecord {
        NewRecord {
            name: name.to_string(),
            category: category.to_string(),
            status: "In Stock".to_string(),
            price,
            created_at,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn store() -> MemoryRecordStore {
        MemoryRecordStore::from_new(vec![
            record("Desk Lamp", "Electronics", 30.0, day(2024, 3, 14)),
            record("Wool Scarf", "Clothing", 10.0, day(2024, 1, 20)),
            record("Table Lamp", "Home Goods", 20.0, day(2024, 2, 10)),
        ])
    }

    fn by_price_asc() -> RecordSort {
        RecordSort {
            column: SortColumn::Price,
            order: SortOrder::Asc,
        }
    }

    #[tokio::test]
    async fn sorts_by_price_ascending() {
        let rows = store()
            .query(&RecordFilter::default(), by_price_asc(), 0, 10)
            .await
            .unwrap();
        let prices: Vec<f64> = rows.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![10.0, 20.0, 30.0]);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let filter = RecordFilter {
            search: Some("LAMP".into()),
            ..Default::default()
        };
        let store = store();
        assert_eq!(store.count(&filter).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn category_match_is_exact_but_case_insensitive() {
        let store = store();
        for value in ["electronics", "ELECTRONICS", "Electronics"] {
            let filter = RecordFilter {
                category: Some(value.into()),
                ..Default::default()
            };
            assert_eq!(store.count(&filter).await.unwrap(), 1, "value: {value}");
        }

        let partial = RecordFilter {
            category: Some("Electro".into()),
            ..Default::default()
        };
        assert_eq!(store.count(&partial).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn date_interval_limits_created_at() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();
        let filter = RecordFilter {
            created: date_range::resolve("long time ago", now),
            ..Default::default()
        };
        let rows = store()
            .query(&filter, RecordSort::default(), 0, 10)
            .await
            .unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Wool Scarf"]);
    }

    #[tokio::test]
    async fn count_ignores_pagination() {
        let filter = RecordFilter {
            price: Some(PriceRange {
                min: 10.0,
                max: 30.0,
            }),
            ..Default::default()
        };
        let store = store();
        let page = store.query(&filter, by_price_asc(), 2, 2).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].price, 30.0);
        assert_eq!(store.count(&filter).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn text_columns_sort_ignoring_case() {
        let when = day(2024, 3, 1);
        let store = MemoryRecordStore::from_new(vec![
            record("cherry", "Books", 1.0, when),
            record("Banana", "Books", 1.0, when),
            record("apple", "Books", 1.0, when),
        ]);
        let sort = RecordSort {
            column: SortColumn::Name,
            order: SortOrder::Asc,
        };
        let rows = store
            .query(&RecordFilter::default(), sort, 0, 10)
            .await
            .unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "Banana", "cherry"]);
    }

    #[tokio::test]
    async fn ties_break_on_id_in_sort_direction() {
        let when = day(2024, 3, 1);
        let store = MemoryRecordStore::from_new(vec![
            record("A", "Books", 5.0, when),
            record("B", "Books", 5.0, when),
            record("C", "Books", 5.0, when),
        ]);
        let sort = RecordSort {
            column: SortColumn::Price,
            order: SortOrder::Desc,
        };
        let ids: Vec<i64> = store
            .query(&RecordFilter::default(), sort, 0, 10)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
