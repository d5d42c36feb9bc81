use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::clients::record_store::RecordStore;
use crate::repositories::{PaymentRepository, RentalRepository, TractorRepository};
use crate::services::report_service::{build_report, Report, ReportRange};
use crate::utils::errors::AppResult;

pub struct ReportController {
    tractors: TractorRepository,
    rentals: RentalRepository,
    payments: PaymentRepository,
}

impl ReportController {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            tractors: TractorRepository::new(store.clone()),
            rentals: RentalRepository::new(store.clone()),
            payments: PaymentRepository::new(store),
        }
    }

    pub async fn report(&self, range: ReportRange, reference_now: DateTime<Utc>) -> AppResult<Report> {
        let (tractors, rentals, payments) = futures::try_join!(
            self.tractors.find_all(),
            self.rentals.find_all(),
            self.payments.find_all()
        )?;

        log::debug!(
            "📊 Reporte {:?}: {} tractores, {} alquileres, {} pagos",
            range,
            tractors.len(),
            rentals.len(),
            payments.len()
        );
        Ok(build_report(range, &tractors, &rentals, &payments, reference_now))
    }
}
