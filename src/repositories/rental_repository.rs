use serde_json::json;
use std::sync::Arc;

use crate::clients::record_store::{FetchQuery, RecordStore, SortType};
use crate::models::record::{normalize_records, RentalRecord, RENTAL_TABLE};
use crate::models::rental::Rental;
use crate::repositories::{from_store_value, to_store_value};
use crate::utils::errors::AppResult;

const RENTAL_FIELDS: [&str; 11] = [
    "Id",
    "Name",
    "tractor_id_c",
    "customer_name_c",
    "farm_location_c",
    "start_date_c",
    "end_date_c",
    "rental_type_c",
    "total_amount_c",
    "payment_status_c",
    "CreatedOn",
];

#[derive(Clone)]
pub struct RentalRepository {
    store: Arc<dyn RecordStore>,
}

impl RentalRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Rental>> {
        let query = FetchQuery::with_fields(&RENTAL_FIELDS).order_by("start_date_c", SortType::Desc);
        let values = self.store.fetch_records(RENTAL_TABLE, &query).await?;
        Ok(normalize_records::<RentalRecord, Rental>(RENTAL_TABLE, values))
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Rental>> {
        let query = FetchQuery::with_fields(&RENTAL_FIELDS).where_equals("Id", json!(id));
        let values = self.store.fetch_records(RENTAL_TABLE, &query).await?;
        Ok(normalize_records::<RentalRecord, Rental>(RENTAL_TABLE, values)
            .into_iter()
            .next())
    }

    /// Alquileres de un cliente (nombre exacto), más recientes primero
    pub async fn find_by_customer(&self, customer_name: &str) -> AppResult<Vec<Rental>> {
        let query = FetchQuery::with_fields(&RENTAL_FIELDS)
            .where_equals("customer_name_c", customer_name)
            .order_by("start_date_c", SortType::Desc);
        let values = self.store.fetch_records(RENTAL_TABLE, &query).await?;
        Ok(normalize_records::<RentalRecord, Rental>(RENTAL_TABLE, values))
    }

    pub async fn create(&self, record: RentalRecord) -> AppResult<Rental> {
        let created = self
            .store
            .create_record(RENTAL_TABLE, to_store_value(&record)?)
            .await?;
        from_store_value::<RentalRecord, Rental>(RENTAL_TABLE, created)
    }

    pub async fn update(&self, id: i64, changes: RentalRecord) -> AppResult<Rental> {
        let updated = self
            .store
            .update_record(RENTAL_TABLE, id, to_store_value(&changes)?)
            .await?;
        from_store_value::<RentalRecord, Rental>(RENTAL_TABLE, updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.store.delete_record(RENTAL_TABLE, id).await
    }
}
