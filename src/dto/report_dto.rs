use serde::Deserialize;

use crate::services::report_service::ReportRange;

/// Query string de `/api/reports`
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub range: ReportRange,
}
