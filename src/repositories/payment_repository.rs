use serde_json::json;
use std::sync::Arc;

use crate::clients::record_store::{FetchQuery, RecordStore, SortType};
use crate::models::payment::Payment;
use crate::models::record::{normalize_records, PaymentRecord, PAYMENT_TABLE};
use crate::repositories::{from_store_value, to_store_value};
use crate::utils::errors::AppResult;

const PAYMENT_FIELDS: [&str; 7] = ["Id", "Name", "rental_id_c", "amount_c", "paid_date_c", "method_c", "status_c"];

#[derive(Clone)]
pub struct PaymentRepository {
    store: Arc<dyn RecordStore>,
}

impl PaymentRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Payment>> {
        let query = FetchQuery::with_fields(&PAYMENT_FIELDS).order_by("paid_date_c", SortType::Desc);
        let values = self.store.fetch_records(PAYMENT_TABLE, &query).await?;
        Ok(normalize_records::<PaymentRecord, Payment>(PAYMENT_TABLE, values))
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Payment>> {
        let query = FetchQuery::with_fields(&PAYMENT_FIELDS).where_equals("Id", json!(id));
        let values = self.store.fetch_records(PAYMENT_TABLE, &query).await?;
        Ok(normalize_records::<PaymentRecord, Payment>(PAYMENT_TABLE, values)
            .into_iter()
            .next())
    }

    pub async fn create(&self, record: PaymentRecord) -> AppResult<Payment> {
        let created = self
            .store
            .create_record(PAYMENT_TABLE, to_store_value(&record)?)
            .await?;
        from_store_value::<PaymentRecord, Payment>(PAYMENT_TABLE, created)
    }

    pub async fn update(&self, id: i64, changes: PaymentRecord) -> AppResult<Payment> {
        let updated = self
            .store
            .update_record(PAYMENT_TABLE, id, to_store_value(&changes)?)
            .await?;
        from_store_value::<PaymentRecord, Payment>(PAYMENT_TABLE, updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.store.delete_record(PAYMENT_TABLE, id).await
    }
}
