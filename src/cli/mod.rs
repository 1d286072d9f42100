//! CLI command implementations for the binwatch admin console.
//!
//! Each `run_*` function is one subcommand: it calls a domain client on
//! [`ApiClient`], renders the success value as a table (or JSON with
//! `--format json`), and lets the error message bubble up to `main`.
//! Analytics render as terminal bar charts; report locations as a
//! coordinate table with a bounds summary.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};

use crate::api::ApiClient;
use crate::api::query::QueryParams;
use crate::api::types::{Listing, MapPoint, Report, ReportStatus, Role, User};
use crate::config;

/// Output format for data commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Backend page size for DRF-paginated listings.
const PAGE_SIZE: u64 = 20;

// ---------------------------------------------------------------------------
// binwatch login / logout / whoami
// ---------------------------------------------------------------------------

/// Sign in. Missing credentials are prompted for on stderr so stdout stays
/// clean for scripting.
pub fn run_login(client: &ApiClient, username: Option<String>, password: Option<String>) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt("Username")?,
    };
    let password = match password {
        Some(p) => p,
        None => prompt("Password")?,
    };

    if username.is_empty() || password.is_empty() {
        anyhow::bail!("username and password are required");
    }

    let login = client.login(&username, &password)?;
    println!(
        "{} Signed in as {} ({})",
        "✓".green().bold(),
        login.user.display_name().bold(),
        login.user.role,
    );
    Ok(())
}

pub fn run_logout(client: &ApiClient) -> Result<()> {
    let had_session = client.store().get().is_some();
    client.logout()?;
    if had_session {
        println!("{} Signed out.", "✓".green().bold());
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

pub fn run_whoami(client: &ApiClient, format: OutputFormat) -> Result<()> {
    require_admin(client)?;
    let user = client.profile()?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    println!("{}", "Profile".bold().cyan());
    println!("{}", "=".repeat(40));
    println!("  {} {}", "Username:".bold(), user.username);
    println!("  {} {} {}", "Name:    ".bold(), user.first_name, user.last_name);
    println!("  {} {}", "Role:    ".bold(), user.role);
    if let Some(ref email) = user.email {
        println!("  {} {}", "Email:   ".bold(), email);
    }
    if let Some(ref phone) = user.phone {
        println!("  {} {}", "Phone:   ".bold(), phone);
    }
    Ok(())
}

/// Guard for data commands: a session must exist and the cached user must
/// be an admin. The backend checks too; this just fails fast with a
/// friendlier message.
fn require_admin(client: &ApiClient) -> Result<User> {
    let user = client
        .store()
        .user()
        .context("not signed in — run `binwatch login` first")?;
    if user.role != Role::Admin {
        anyhow::bail!("the stored session is not an admin account — run `binwatch login`");
    }
    Ok(user)
}

// ---------------------------------------------------------------------------
// binwatch overview
// ---------------------------------------------------------------------------

/// Dashboard stat cards plus the five most recent reports.
pub fn run_overview(client: &ApiClient) -> Result<()> {
    let user = require_admin(client)?;
    let stats = client.dashboard_stats()?;

    println!("{}", format!("Dashboard — {}", user.display_name()).bold().cyan());
    println!("{}", "=".repeat(60));
    println!();
    println!("  {} {}", "Total reports:    ".bold(), stats.reports.total);
    println!(
        "  {} {}",
        "Pending:          ".bold(),
        stats.reports.pending.to_string().yellow()
    );
    println!(
        "  {} {}",
        "In progress:      ".bold(),
        stats.reports.assigned + stats.reports.in_progress
    );
    println!(
        "  {} {}",
        "Completed:        ".bold(),
        stats.reports.completed.to_string().green()
    );
    println!(
        "  {} {}",
        "Rejected:         ".bold(),
        stats.reports.rejected.to_string().red()
    );
    println!(
        "  {} {} of {}",
        "Active collectors:".bold(),
        stats.users.active_collectors,
        stats.users.collectors
    );
    println!("  {} {}", "Citizens:         ".bold(), stats.users.citizens);
    println!();

    let recent = client.reports(&QueryParams::new().set("page", 1))?;
    let recent = recent.into_items();
    if recent.is_empty() {
        println!("{}", "No reports yet.".yellow());
        return Ok(());
    }

    println!("{}", "Recent Reports".bold().cyan());
    print_report_rows(recent.iter().take(5));
    Ok(())
}

// ---------------------------------------------------------------------------
// binwatch reports / report / assign / reject
// ---------------------------------------------------------------------------

/// Filters accepted by `binwatch reports`, mapped 1:1 onto query
/// parameters the backend understands.
#[derive(Debug, Default)]
pub struct ReportFilters {
    pub status: Option<String>,
    pub waste_type: Option<String>,
    pub search: Option<String>,
    pub collector: Option<i64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: Option<u32>,
}

impl ReportFilters {
    fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .set_opt("status", self.status.as_deref())
            .set_opt("waste_type", self.waste_type.as_deref())
            .set_opt("search", self.search.as_deref())
            .set_opt("collector", self.collector)
            .set_opt("date_from", self.date_from.as_deref())
            .set_opt("date_to", self.date_to.as_deref())
            .set_opt("page", self.page)
    }
}

pub fn run_reports(client: &ApiClient, filters: &ReportFilters, format: OutputFormat) -> Result<()> {
    require_admin(client)?;
    let listing = client.reports(&filters.to_params())?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.items().is_empty() {
        println!("{}", "No reports found.".yellow());
        return Ok(());
    }

    println!("{}", "Reports".bold().cyan());
    print_report_rows(listing.items().iter());
    print_page_footer(&listing, filters.page.unwrap_or(1));
    Ok(())
}

fn print_report_rows<'a>(reports: impl Iterator<Item = &'a Report>) {
    println!(
        "  {:<6} {:<28} {:<11} {:<12} {:<14} {:<14} {}",
        "ID", "Title", "Type", "Status", "Reporter", "Collector", "Date"
    );
    println!("  {}", "-".repeat(100));

    for report in reports {
        println!(
            "  {:<6} {:<28} {:<11} {:<21} {:<14} {:<14} {}",
            format!("#{}", report.id),
            truncate(&report.title, 28),
            report.waste_type,
            status_badge(report.status),
            report
                .reported_by
                .as_ref()
                .map(|u| truncate(&u.username, 14))
                .unwrap_or_else(|| "N/A".to_string()),
            report
                .assigned_to
                .as_ref()
                .map(|u| truncate(&u.username, 14))
                .unwrap_or_else(|| "-".to_string()),
            format_date(&report.created_at),
        );
    }
}

pub fn run_report(client: &ApiClient, id: i64, format: OutputFormat) -> Result<()> {
    require_admin(client)?;
    let report = client.report(id)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", format!("Report #{}", report.id).bold().cyan());
    println!("{}", "=".repeat(60));
    println!("  {} {}", "Title:      ".bold(), report.title);
    println!("  {} {}", "Status:     ".bold(), status_badge(report.status));
    println!("  {} {}", "Waste type: ".bold(), report.waste_type);
    println!(
        "  {} {}",
        "Reported by:".bold(),
        report
            .reported_by
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or("N/A")
    );
    println!(
        "  {} {}",
        "Assigned to:".bold(),
        report
            .assigned_to
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or("not assigned")
    );
    println!("  {} {}", "Reported:   ".bold(), format_date(&report.created_at));
    if let Some(ref completed) = report.completed_at {
        println!("  {} {}", "Completed:  ".bold(), format_date(completed));
    }
    println!("  {} {}", "Address:    ".bold(), report.address);
    if let Some((lat, lng)) = report.coords() {
        println!("  {} {:.6}, {:.6}", "Location:   ".bold(), lat, lng);
    }
    if let Some(ref image) = report.image {
        println!("  {} {}", "Image:      ".bold(), image);
    }
    println!();
    println!("  {}", report.description);

    if !report.updates.is_empty() {
        println!();
        println!("{}", "Status History".bold().cyan());
        for update in &report.updates {
            let by = update
                .updated_by
                .as_ref()
                .map(|u| u.username.as_str())
                .unwrap_or("unknown");
            println!(
                "  {} {} — by {} at {}",
                "·".dimmed(),
                status_badge(update.status),
                by,
                format_date(&update.created_at)
            );
            if let Some(ref note) = update.note
                && !note.is_empty()
            {
                println!("    {}", note.dimmed());
            }
        }
    }
    Ok(())
}

pub fn run_assign(client: &ApiClient, report_id: i64, collector_id: i64) -> Result<()> {
    require_admin(client)?;
    let report = client.assign_collector(report_id, collector_id)?;
    println!(
        "{} Report #{} assigned to {}",
        "✓".green().bold(),
        report.id,
        report
            .assigned_to
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or("collector")
            .bold(),
    );
    Ok(())
}

pub fn run_reject(client: &ApiClient, report_id: i64, note: Option<String>) -> Result<()> {
    require_admin(client)?;
    let note = match note {
        Some(n) => n,
        None => prompt("Rejection reason")?,
    };
    let report = client.reject_report(report_id, &note)?;
    println!(
        "{} Report #{} rejected ({})",
        "✓".green().bold(),
        report.id,
        status_badge(report.status),
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// binwatch collectors / collector / toggle-collector
// ---------------------------------------------------------------------------

pub fn run_collectors(
    client: &ApiClient,
    search: Option<String>,
    page: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    require_admin(client)?;
    let params = QueryParams::new()
        .set_opt("search", search.as_deref())
        .set_opt("page", page);
    let listing = client.collectors(&params)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.items().is_empty() {
        println!("{}", "No collectors found.".yellow());
        return Ok(());
    }

    println!("{}", "Collectors".bold().cyan());
    println!(
        "  {:<6} {:<22} {:<16} {:<9} {:>6} {:>10} {:>8}",
        "ID", "Name", "Username", "Status", "Tasks", "Completed", "Pending"
    );
    println!("  {}", "-".repeat(84));

    for collector in listing.items() {
        let status = if collector.is_active {
            "active".green()
        } else {
            "inactive".red()
        };
        println!(
            "  {:<6} {:<22} {:<16} {:<18} {:>6} {:>10} {:>8}",
            format!("#{}", collector.id),
            truncate(&collector.full_name(), 22),
            truncate(&collector.username, 16),
            status,
            collector.total_tasks,
            collector.completed_tasks,
            collector.pending_tasks,
        );
    }
    print_page_footer(&listing, page.unwrap_or(1));
    Ok(())
}

pub fn run_collector(client: &ApiClient, id: i64, format: OutputFormat) -> Result<()> {
    require_admin(client)?;
    let collector = client.collector(id)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&collector)?);
        return Ok(());
    }

    println!("{}", format!("Collector #{}", collector.id).bold().cyan());
    println!("{}", "=".repeat(40));
    println!("  {} {}", "Name:     ".bold(), collector.full_name());
    println!("  {} @{}", "Username: ".bold(), collector.username);
    if let Some(ref email) = collector.email {
        println!("  {} {}", "Email:    ".bold(), email);
    }
    if let Some(ref phone) = collector.phone {
        println!("  {} {}", "Phone:    ".bold(), phone);
    }
    println!(
        "  {} {}",
        "Status:   ".bold(),
        if collector.is_active {
            "active".green()
        } else {
            "inactive".red()
        }
    );
    println!(
        "  {} {} total / {} completed / {} pending",
        "Tasks:    ".bold(),
        collector.total_tasks,
        collector.completed_tasks,
        collector.pending_tasks,
    );
    Ok(())
}

pub fn run_toggle_collector(client: &ApiClient, id: i64) -> Result<()> {
    require_admin(client)?;
    let outcome = client.toggle_collector(id)?;
    let state = if outcome.is_active {
        "enabled".green()
    } else {
        "disabled".red()
    };
    println!("{} Collector #{} {}", "✓".green().bold(), id, state);
    Ok(())
}

// ---------------------------------------------------------------------------
// binwatch map
// ---------------------------------------------------------------------------

/// Map markers as a coordinate table with a bounds summary. Markers whose
/// coordinates do not parse are skipped rather than failing the command.
pub fn run_map(client: &ApiClient, format: OutputFormat) -> Result<()> {
    require_admin(client)?;
    let points = client.map_data()?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    let plotted: Vec<(&MapPoint, (f64, f64))> = points
        .iter()
        .filter_map(|p| p.coords().map(|c| (p, c)))
        .collect();

    if plotted.is_empty() {
        println!("{}", "No mappable reports.".yellow());
        return Ok(());
    }

    println!("{}", "Report Map".bold().cyan());
    println!(
        "  {:<6} {:<26} {:<11} {:<12} {:>11} {:>11}",
        "ID", "Title", "Type", "Status", "Latitude", "Longitude"
    );
    println!("  {}", "-".repeat(84));

    for (point, (lat, lng)) in &plotted {
        println!(
            "  {:<6} {:<26} {:<11} {:<21} {:>11.6} {:>11.6}",
            format!("#{}", point.id),
            truncate(&point.title, 26),
            point.waste_type,
            status_badge(point.status),
            lat,
            lng,
        );
    }

    let (min, max) = bounds(plotted.iter().map(|(_, c)| *c));
    println!();
    println!(
        "  {} {} markers, bounds {:.4},{:.4} → {:.4},{:.4}",
        "Σ".dimmed(),
        plotted.len(),
        min.0,
        min.1,
        max.0,
        max.1,
    );
    let skipped = points.len() - plotted.len();
    if skipped > 0 {
        println!("  {}", format!("{skipped} markers without usable coordinates skipped").dimmed());
    }
    Ok(())
}

/// South-west and north-east corners of the marker set.
fn bounds(coords: impl Iterator<Item = (f64, f64)>) -> ((f64, f64), (f64, f64)) {
    let mut min = (f64::INFINITY, f64::INFINITY);
    let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (lat, lng) in coords {
        min.0 = min.0.min(lat);
        min.1 = min.1.min(lng);
        max.0 = max.0.max(lat);
        max.1 = max.1.max(lng);
    }
    (min, max)
}

// ---------------------------------------------------------------------------
// binwatch analytics
// ---------------------------------------------------------------------------

pub fn run_analytics(client: &ApiClient, format: OutputFormat) -> Result<()> {
    require_admin(client)?;
    let analytics = client.analytics()?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&analytics)?);
        return Ok(());
    }

    println!("{}", "Analytics".bold().cyan());
    println!("{}", "=".repeat(60));

    // 7-day trend windows
    let t = &analytics.trends;
    println!(
        "  {} {} this week ({} last week, {})",
        "Reports:    ".bold(),
        t.reports.current,
        t.reports.previous,
        signed_pct(t.reports.percent_change),
    );
    println!(
        "  {} {} this week ({} last week, {})",
        "Completions:".bold(),
        t.completions.current,
        t.completions.previous,
        signed_pct(t.completions.percent_change),
    );
    if let Some(hours) = analytics.avg_resolution_hours {
        println!("  {} {:.1} h", "Avg resolution:".bold(), hours);
    }

    if !analytics.by_status.is_empty() {
        println!();
        println!("{}", "Reports by Status".bold().cyan());
        let max = analytics.by_status.iter().map(|s| s.count).max().unwrap_or(1);
        for entry in &analytics.by_status {
            println!(
                "  {:<21} {} {}",
                status_badge(entry.status),
                bar(entry.count, max, 30),
                entry.count
            );
        }
    }

    if !analytics.by_waste_type.is_empty() {
        println!();
        println!("{}", "Reports by Waste Type".bold().cyan());
        let max = analytics.by_waste_type.iter().map(|w| w.count).max().unwrap_or(1);
        for entry in &analytics.by_waste_type {
            println!(
                "  {:<12} {} {}",
                entry.waste_type.label(),
                bar(entry.count, max, 30),
                entry.count
            );
        }
    }

    if !analytics.daily_reports.is_empty() {
        println!();
        println!("{}", "Daily Volume (last 30 days)".bold().cyan());
        let max = analytics.daily_reports.iter().map(|d| d.count).max().unwrap_or(1);
        for entry in &analytics.daily_reports {
            println!(
                "  {:<8} {} {}",
                format_date_short(&entry.date),
                bar(entry.count, max, 40),
                entry.count
            );
        }
    }

    if !analytics.hourly_distribution.is_empty() {
        println!();
        println!("{}", "Reports by Hour of Day".bold().cyan());
        let max = analytics
            .hourly_distribution
            .iter()
            .map(|h| h.count)
            .max()
            .unwrap_or(1);
        for entry in &analytics.hourly_distribution {
            println!(
                "  {:>2}:00 {} {}",
                entry.hour,
                bar(entry.count, max, 40),
                entry.count
            );
        }
    }

    if !analytics.weekly_distribution.is_empty() {
        println!();
        println!("{}", "Reports by Weekday".bold().cyan());
        let max = analytics
            .weekly_distribution
            .iter()
            .map(|w| w.count)
            .max()
            .unwrap_or(1);
        for entry in &analytics.weekly_distribution {
            println!(
                "  {:<10} {} {}",
                weekday_name(entry.weekday),
                bar(entry.count, max, 40),
                entry.count
            );
        }
    }

    if !analytics.completion_trend.is_empty() {
        println!();
        println!("{}", "Completion Rate (last 30 days)".bold().cyan());
        for entry in &analytics.completion_trend {
            println!(
                "  {:<8} {} {:.1}%",
                format_date_short(&entry.date),
                bar(entry.rate.round() as u64, 100, 40),
                entry.rate
            );
        }
    }

    if !analytics.collector_performance.is_empty() {
        println!();
        println!("{}", "Collector Performance".bold().cyan());
        println!(
            "  {:<22} {:>6} {:>10} {:>8}",
            "Collector", "Tasks", "Completed", "Pending"
        );
        println!("  {}", "-".repeat(50));
        for perf in &analytics.collector_performance {
            println!(
                "  {:<22} {:>6} {:>10} {:>8}",
                truncate(&perf.full_name(), 22),
                perf.total_tasks,
                perf.completed_tasks,
                perf.pending_tasks,
            );
        }
    }

    if !analytics.top_collectors.is_empty() {
        println!();
        println!("{}", "Top Collectors".bold().cyan());
        for (i, collector) in analytics.top_collectors.iter().enumerate() {
            println!(
                "  {} {:<22} {} completed",
                format!("{}.", i + 1).dimmed(),
                truncate(&collector.full_name(), 22),
                collector.completed,
            );
        }
    }

    Ok(())
}

/// Weekday label for the backend's 1 = Sunday .. 7 = Saturday numbering.
fn weekday_name(weekday: u32) -> &'static str {
    match weekday {
        1 => "Sunday",
        2 => "Monday",
        3 => "Tuesday",
        4 => "Wednesday",
        5 => "Thursday",
        6 => "Friday",
        7 => "Saturday",
        _ => "?",
    }
}

// ---------------------------------------------------------------------------
// binwatch health
// ---------------------------------------------------------------------------

/// Check config, session, and backend reachability.
pub fn run_health(client: &ApiClient) -> Result<()> {
    println!("{}", "binwatch Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let config_exists = config::config_file().map(|p| p.exists()).unwrap_or(false);
    print_health_item(
        "Config file",
        config_exists,
        if config_exists {
            "~/.binwatch/config.toml found"
        } else {
            "not found (run `binwatch config init` to create)"
        },
    );
    print_health_item("Backend URL", true, client.base_url());

    match client.store().user() {
        Some(user) => {
            let is_admin = user.role == Role::Admin;
            print_health_item(
                "Session",
                is_admin,
                &format!("signed in as {} ({})", user.username, user.role),
            );
        }
        None => print_health_item("Session", false, "not signed in"),
    }

    let reachable = client.ping();
    print_health_item(
        "Backend",
        reachable,
        if reachable {
            "reachable"
        } else {
            "not reachable — is the backend running?"
        },
    );

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<14} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// binwatch config show | init | set
// ---------------------------------------------------------------------------

pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective Configuration".bold().cyan());
    println!("{}", "=".repeat(40));
    println!();
    println!("{toml_str}");

    let file_exists = config::config_file().map(|p| p.exists()).unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    if file_exists {
        println!("  {} {}", "✓".green(), "~/.binwatch/config.toml".dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), "~/.binwatch/config.toml (not found)".dimmed());
    }
    println!("  {} {}", "·".dimmed(), "BINWATCH_* environment variables".dimmed());
    Ok(())
}

pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} Config written to {}", "✓".green().bold(), path.display());
    Ok(())
}

pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Prompt on stderr and read one trimmed line from stdin.
fn prompt(label: &str) -> Result<String> {
    eprint!("{label}: ");
    io::stderr().flush().ok();
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read input")?;
    Ok(line.trim().to_string())
}

/// Colorized status label, padded before coloring so ANSI codes don't
/// break column alignment (hence the wider format width at call sites).
fn status_badge(status: ReportStatus) -> ColoredString {
    let label = format!("{:<12}", status.label());
    match status {
        ReportStatus::Pending => label.yellow(),
        ReportStatus::Assigned => label.blue(),
        ReportStatus::InProgress => label.magenta(),
        ReportStatus::Completed => label.green(),
        ReportStatus::Rejected => label.red(),
    }
}

/// Proportional bar for terminal charts.
fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a backend RFC 3339 timestamp as "Aug 26, 2026 14:05". Falls back
/// to the raw string when it does not parse.
fn format_date(timestamp: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%b %d, %Y %H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Short date ("Aug 26") for dense chart rows; accepts either a full
/// timestamp or a bare `YYYY-MM-DD` date.
fn format_date_short(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        return dt.format("%b %d").to_string();
    }
    if let Ok(d) = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return d.format("%b %d").to_string();
    }
    date.to_string()
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn signed_pct(pct: f64) -> ColoredString {
    let text = format!("{}{:.1}%", if pct >= 0.0 { "+" } else { "" }, pct);
    if pct >= 0.0 { text.green() } else { text.red() }
}

/// Pagination footer for DRF-paginated listings.
fn print_page_footer<T>(listing: &Listing<T>, page: u32) {
    let Listing::Paginated { count, .. } = listing else {
        return;
    };
    let pages = count.div_ceil(PAGE_SIZE).max(1);
    if pages <= 1 {
        return;
    }

    println!();
    let mut hints = Vec::new();
    if listing.has_previous() {
        hints.push(format!("--page {}", page.saturating_sub(1).max(1)));
    }
    if listing.has_next() {
        hints.push(format!("--page {}", page + 1));
    }
    println!(
        "  {}",
        format!("Page {page} of {pages} ({count} total){}{}",
            if hints.is_empty() { "" } else { " — " },
            hints.join(" / ")
        )
        .dimmed()
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
