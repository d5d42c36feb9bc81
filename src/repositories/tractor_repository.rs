use serde_json::json;
use std::sync::Arc;

use crate::clients::record_store::{FetchQuery, RecordStore, SortType};
use crate::models::record::{normalize_records, TractorRecord, TRACTOR_TABLE};
use crate::models::tractor::Tractor;
use crate::repositories::{from_store_value, to_store_value};
use crate::utils::errors::AppResult;

const TRACTOR_FIELDS: [&str; 6] = ["Id", "Name", "number_c", "status_c", "hourly_rate_c", "daily_rate_c"];

#[derive(Clone)]
pub struct TractorRepository {
    store: Arc<dyn RecordStore>,
}

impl TractorRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Tractor>> {
        let query = FetchQuery::with_fields(&TRACTOR_FIELDS).order_by("Name", SortType::Asc);
        let values = self.store.fetch_records(TRACTOR_TABLE, &query).await?;
        Ok(normalize_records::<TractorRecord, Tractor>(TRACTOR_TABLE, values))
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Tractor>> {
        let query = FetchQuery::with_fields(&TRACTOR_FIELDS).where_equals("Id", json!(id));
        let values = self.store.fetch_records(TRACTOR_TABLE, &query).await?;
        Ok(normalize_records::<TractorRecord, Tractor>(TRACTOR_TABLE, values)
            .into_iter()
            .next())
    }

    pub async fn create(&self, record: TractorRecord) -> AppResult<Tractor> {
        let created = self
            .store
            .create_record(TRACTOR_TABLE, to_store_value(&record)?)
            .await?;
        from_store_value::<TractorRecord, Tractor>(TRACTOR_TABLE, created)
    }

    pub async fn update(&self, id: i64, changes: TractorRecord) -> AppResult<Tractor> {
        let updated = self
            .store
            .update_record(TRACTOR_TABLE, id, to_store_value(&changes)?)
            .await?;
        from_store_value::<TractorRecord, Tractor>(TRACTOR_TABLE, updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.store.delete_record(TRACTOR_TABLE, id).await
    }
}
