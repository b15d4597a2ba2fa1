//! Persisted report models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::report::ReportPayload;

/// A finalized session as stored by the report database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: ReportPayload,
}
