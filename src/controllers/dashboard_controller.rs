use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::clients::record_store::RecordStore;
use crate::repositories::{RentalRepository, TractorRepository};
use crate::services::dashboard_service::{build_dashboard, DashboardOverview};
use crate::utils::errors::AppResult;

pub struct DashboardController {
    tractors: TractorRepository,
    rentals: RentalRepository,
}

impl DashboardController {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            tractors: TractorRepository::new(store.clone()),
            rentals: RentalRepository::new(store),
        }
    }

    pub async fn overview(&self, reference_now: DateTime<Utc>) -> AppResult<DashboardOverview> {
        let (tractors, rentals) = futures::try_join!(self.tractors.find_all(), self.rentals.find_all())?;
        Ok(build_dashboard(tractors, rentals, reference_now))
    }
}
