//! Report endpoints: listing, detail, assignment, rejection, map data.

use anyhow::{Context, Result};
use serde_json::json;

use super::ApiClient;
use super::query::QueryParams;
use super::types::{Listing, MapPoint, Report};

impl ApiClient {
    /// Filtered, paginated report listing. Recognized parameters: `status`,
    /// `waste_type`, `collector`, `search`, `date_from`, `date_to`, `page`.
    pub fn reports(&self, params: &QueryParams) -> Result<Listing<Report>> {
        let body = self.get("/reports/admin/reports/", params)?;
        serde_json::from_value(body).context("unexpected report list response shape")
    }

    /// Single report with its status history.
    pub fn report(&self, id: i64) -> Result<Report> {
        let body = self.get(&format!("/reports/admin/reports/{id}/"), &QueryParams::new())?;
        serde_json::from_value(body).context("unexpected report response shape")
    }

    /// Assign a collector to a pending report. Returns the updated report.
    pub fn assign_collector(&self, report_id: i64, collector_id: i64) -> Result<Report> {
        let body = self.post(
            &format!("/reports/admin/reports/{report_id}/assign/"),
            json!({ "collector_id": collector_id }),
        )?;
        serde_json::from_value(body).context("unexpected assign response shape")
    }

    /// Reject a report with a note. Returns the updated report.
    pub fn reject_report(&self, report_id: i64, note: &str) -> Result<Report> {
        let body = self.post(
            &format!("/reports/admin/reports/{report_id}/reject/"),
            json!({ "note": note }),
        )?;
        serde_json::from_value(body).context("unexpected reject response shape")
    }

    /// All non-rejected reports as lightweight map markers.
    pub fn map_data(&self) -> Result<Vec<MapPoint>> {
        let body = self.get("/reports/admin/map/", &QueryParams::new())?;
        serde_json::from_value(body).context("unexpected map data response shape")
    }
}
