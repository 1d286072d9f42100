//! Collector endpoints: listing, detail, enable/disable toggle.

use anyhow::{Context, Result};
use serde_json::json;

use super::ApiClient;
use super::query::QueryParams;
use super::types::{Collector, Listing, ToggleOutcome};

impl ApiClient {
    /// Collector listing with task counters. Recognized parameters:
    /// `search`, `page`.
    pub fn collectors(&self, params: &QueryParams) -> Result<Listing<Collector>> {
        let body = self.get("/auth/collectors/", params)?;
        serde_json::from_value(body).context("unexpected collector list response shape")
    }

    /// Single collector with task counters.
    pub fn collector(&self, id: i64) -> Result<Collector> {
        let body = self.get(&format!("/auth/collectors/{id}/"), &QueryParams::new())?;
        serde_json::from_value(body).context("unexpected collector response shape")
    }

    /// Flip a collector's active flag. Returns the new state.
    pub fn toggle_collector(&self, id: i64) -> Result<ToggleOutcome> {
        let body = self.post(&format!("/auth/collectors/{id}/toggle-status/"), json!({}))?;
        serde_json::from_value(body).context("unexpected toggle response shape")
    }
}
