//! Dashboard endpoints: overview stats and analytics aggregates.

use anyhow::{Context, Result};

use super::ApiClient;
use super::query::QueryParams;
use super::types::{Analytics, DashboardStats};

impl ApiClient {
    /// Report counts by status plus user counts.
    pub fn dashboard_stats(&self) -> Result<DashboardStats> {
        let body = self.get("/reports/admin/dashboard/", &QueryParams::new())?;
        serde_json::from_value(body).context("unexpected dashboard response shape")
    }

    /// Full analytics payload: breakdowns, distributions, trends.
    pub fn analytics(&self) -> Result<Analytics> {
        let body = self.get("/reports/admin/analytics/", &QueryParams::new())?;
        serde_json::from_value(body).context("unexpected analytics response shape")
    }
}
