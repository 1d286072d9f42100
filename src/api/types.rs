//! Wire types for the waste-reporting backend.
//!
//! Everything here is a read-only projection of backend state: reports,
//! collectors, dashboard aggregates, map markers. Fields mirror the JSON
//! the REST API emits; the client never persists any of it beyond the
//! current command invocation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Users and sessions
// ---------------------------------------------------------------------------

/// Account role. The console only accepts `admin` sign-ins; the other two
/// roles appear in report/collector projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Collector,
    Citizen,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Collector => write!(f, "collector"),
            Role::Citizen => write!(f, "citizen"),
        }
    }
}

/// Full user record as returned by the login and profile endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl User {
    /// Preferred display name: first name if present, else username.
    pub fn display_name(&self) -> &str {
        if self.first_name.is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }
}

fn default_true() -> bool {
    true
}

/// Access/refresh token pair issued at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tokens {
    pub access: String,
    pub refresh: String,
}

/// Response body of `POST /auth/login/`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub tokens: Tokens,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Report lifecycle status. Owned entirely by the backend; the console only
/// triggers transitions via the assign and reject endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Rejected,
}

impl ReportStatus {
    /// Human label for tables ("in_progress" → "In Progress").
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::Assigned => "Assigned",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Completed => "Completed",
            ReportStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteType {
    Organic,
    Recyclable,
    Hazardous,
    Electronic,
    Mixed,
}

impl WasteType {
    pub fn label(&self) -> &'static str {
        match self {
            WasteType::Organic => "Organic",
            WasteType::Recyclable => "Recyclable",
            WasteType::Hazardous => "Hazardous",
            WasteType::Electronic => "Electronic",
            WasteType::Mixed => "Mixed",
        }
    }
}

impl std::fmt::Display for WasteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimal user projection embedded in report responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// One entry in a report's status history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportUpdate {
    pub id: i64,
    pub status: ReportStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub updated_by: Option<ReportUser>,
    pub created_at: String,
}

/// A citizen-submitted waste report.
///
/// Coordinates arrive as decimal strings; use [`Report::coords`] for a
/// lenient numeric parse (markers with unparseable coordinates are skipped
/// by the map view rather than failing the whole fetch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub waste_type: WasteType,
    pub status: ReportStatus,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub reported_by: Option<ReportUser>,
    #[serde(default)]
    pub assigned_to: Option<ReportUser>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub updates: Vec<ReportUpdate>,
}

impl Report {
    pub fn coords(&self) -> Option<(f64, f64)> {
        parse_coords(&self.latitude, &self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Collectors
// ---------------------------------------------------------------------------

/// Collector account with task counters annotated by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collector {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub total_tasks: u64,
    #[serde(default)]
    pub completed_tasks: u64,
    #[serde(default)]
    pub pending_tasks: u64,
}

impl Collector {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }
}

/// Response body of the collector toggle-status endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleOutcome {
    #[serde(default)]
    pub message: String,
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Dashboard aggregates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportCounts {
    pub total: u64,
    pub pending: u64,
    pub assigned: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCounts {
    pub collectors: u64,
    pub citizens: u64,
    pub active_collectors: u64,
}

/// Response body of `GET /reports/admin/dashboard/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub reports: ReportCounts,
    pub users: UserCounts,
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteTypeCount {
    pub waste_type: WasteType,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: ReportStatus,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopCollector {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub completed: u64,
}

impl TopCollector {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: u32,
    pub count: u64,
}

/// Weekday bucket; the backend numbers days 1 = Sunday through 7 = Saturday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekdayCount {
    pub weekday: u32,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorPerformance {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub pending_tasks: u64,
}

impl CollectorPerformance {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendWindow {
    pub current: i64,
    pub previous: i64,
    pub percent_change: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trends {
    #[serde(default)]
    pub reports: TrendWindow,
    #[serde(default)]
    pub completions: TrendWindow,
}

/// Response body of `GET /reports/admin/analytics/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analytics {
    #[serde(default)]
    pub by_waste_type: Vec<WasteTypeCount>,
    #[serde(default)]
    pub by_status: Vec<StatusCount>,
    #[serde(default)]
    pub daily_reports: Vec<DailyCount>,
    #[serde(default)]
    pub top_collectors: Vec<TopCollector>,
    #[serde(default)]
    pub avg_resolution_hours: Option<f64>,
    #[serde(default)]
    pub hourly_distribution: Vec<HourCount>,
    #[serde(default)]
    pub weekly_distribution: Vec<WeekdayCount>,
    #[serde(default)]
    pub completion_trend: Vec<TrendPoint>,
    #[serde(default)]
    pub collector_performance: Vec<CollectorPerformance>,
    #[serde(default)]
    pub trends: Trends,
}

// ---------------------------------------------------------------------------
// Map markers
// ---------------------------------------------------------------------------

/// Lightweight report projection used by the map view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapPoint {
    pub id: i64,
    pub title: String,
    pub waste_type: WasteType,
    pub status: ReportStatus,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub reported_by_name: Option<String>,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    pub created_at: String,
}

impl MapPoint {
    pub fn coords(&self) -> Option<(f64, f64)> {
        parse_coords(&self.latitude, &self.longitude)
    }
}

fn parse_coords(lat: &str, lng: &str) -> Option<(f64, f64)> {
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    if lat.is_nan() || lng.is_nan() {
        return None;
    }
    Some((lat, lng))
}

// ---------------------------------------------------------------------------
// List envelopes
// ---------------------------------------------------------------------------

/// A list response from the backend.
///
/// Admin list endpoints are DRF-paginated (`count`/`next`/`previous`/
/// `results`) but some return a bare array; both shapes deserialize here.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paginated {
        count: u64,
        next: Option<String>,
        previous: Option<String>,
        results: Vec<T>,
    },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    /// Total item count across all pages (length of the array for the
    /// unpaginated shape).
    pub fn count(&self) -> u64 {
        match self {
            Listing::Paginated { count, .. } => *count,
            Listing::Plain(items) => items.len() as u64,
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(self, Listing::Paginated { next: Some(_), .. })
    }

    pub fn has_previous(&self) -> bool {
        matches!(self, Listing::Paginated { previous: Some(_), .. })
    }

    /// Consume the envelope and return the current page's items.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Paginated { results, .. } => results,
            Listing::Plain(items) => items,
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Listing::Paginated { results, .. } => results,
            Listing::Plain(items) => items,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_snake_case_wire_names() {
        let s: ReportStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(s, ReportStatus::InProgress);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"in_progress\"");
        assert_eq!(s.label(), "In Progress");
    }

    #[test]
    fn report_deserializes_with_nested_users_and_updates() {
        let json = serde_json::json!({
            "id": 7,
            "title": "Overflowing bin",
            "description": "Bin at the corner has been full for days",
            "waste_type": "mixed",
            "status": "assigned",
            "latitude": "12.9715987000",
            "longitude": "77.5945627000",
            "address": "MG Road",
            "image": null,
            "reported_by": {"id": 3, "username": "asha", "first_name": "Asha", "last_name": "K"},
            "assigned_to": {"id": 9, "username": "ravi", "first_name": "", "last_name": ""},
            "created_at": "2026-08-01T09:30:00Z",
            "updated_at": "2026-08-02T10:00:00Z",
            "completed_at": null,
            "updates": [
                {"id": 1, "status": "assigned", "note": "Assigned to ravi",
                 "updated_by": {"id": 1, "username": "admin", "first_name": "A", "last_name": "B"},
                 "created_at": "2026-08-02T10:00:00Z"}
            ]
        });

        let report: Report = serde_json::from_value(json).unwrap();
        assert_eq!(report.status, ReportStatus::Assigned);
        assert_eq!(report.assigned_to.as_ref().unwrap().username, "ravi");
        assert_eq!(report.updates.len(), 1);
        let (lat, lng) = report.coords().unwrap();
        assert!((lat - 12.9715987).abs() < 1e-6);
        assert!((lng - 77.5945627).abs() < 1e-6);
    }

    #[test]
    fn coords_are_none_for_unparseable_values() {
        let point = MapPoint {
            id: 1,
            title: "x".into(),
            waste_type: WasteType::Mixed,
            status: ReportStatus::Pending,
            latitude: "not-a-number".into(),
            longitude: "77.0".into(),
            address: String::new(),
            reported_by_name: None,
            assigned_to_name: None,
            created_at: String::new(),
        };
        assert!(point.coords().is_none());
    }

    #[test]
    fn listing_accepts_paginated_shape() {
        let json = serde_json::json!({
            "count": 42,
            "next": "http://example.org/api/reports/admin/reports/?page=2",
            "previous": null,
            "results": [{"id": 1, "username": "c1", "is_active": true}]
        });
        let listing: Listing<Collector> = serde_json::from_value(json).unwrap();
        assert_eq!(listing.count(), 42);
        assert!(listing.has_next());
        assert!(!listing.has_previous());
        assert_eq!(listing.items().len(), 1);
    }

    #[test]
    fn listing_accepts_bare_array_shape() {
        let json = serde_json::json!([
            {"id": 1, "username": "c1", "is_active": true},
            {"id": 2, "username": "c2", "is_active": false}
        ]);
        let listing: Listing<Collector> = serde_json::from_value(json).unwrap();
        assert_eq!(listing.count(), 2);
        assert!(!listing.has_next());
        assert_eq!(listing.into_items().len(), 2);
    }

    #[test]
    fn user_display_name_falls_back_to_username() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1, "username": "admin", "role": "admin"
        }))
        .unwrap();
        assert_eq!(user.display_name(), "admin");
        assert!(user.is_active);
    }

    #[test]
    fn analytics_tolerates_missing_sections() {
        let analytics: Analytics = serde_json::from_value(serde_json::json!({
            "by_status": [{"status": "pending", "count": 3}]
        }))
        .unwrap();
        assert_eq!(analytics.by_status[0].count, 3);
        assert!(analytics.completion_trend.is_empty());
        assert_eq!(analytics.trends.reports.current, 0);
    }

    #[test]
    fn collector_full_name_prefers_real_name() {
        let c: Collector = serde_json::from_value(serde_json::json!({
            "id": 5, "username": "ravi", "first_name": "Ravi", "last_name": "S"
        }))
        .unwrap();
        assert_eq!(c.full_name(), "Ravi S");
        assert_eq!(c.total_tasks, 0);
    }
}
