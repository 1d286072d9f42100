use anyhow::Result;
use clap::{Parser, Subcommand};

use binwatch::api::ApiClient;
use binwatch::cli::{self, OutputFormat, ReportFilters};
use binwatch::config;
use binwatch::session::SessionStore;

#[derive(Debug, Parser)]
#[command(name = "binwatch")]
#[command(about = "Admin console for the binwatch waste-reporting backend")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in with an admin account (prompts for missing credentials)
    Login {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user's profile
    Whoami {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Dashboard overview: report counts, user counts, recent reports
    Overview,
    /// List reports with optional filters
    Reports {
        /// Filter by status: pending, assigned, in_progress, completed, rejected
        #[arg(long)]
        status: Option<String>,
        /// Filter by waste type: organic, recyclable, hazardous, electronic, mixed
        #[arg(long)]
        waste_type: Option<String>,
        /// Search in title, description, and address
        #[arg(long)]
        search: Option<String>,
        /// Filter by assigned collector ID
        #[arg(long)]
        collector: Option<i64>,
        /// Reports created on or after this date (YYYY-MM-DD)
        #[arg(long)]
        date_from: Option<String>,
        /// Reports created on or before this date (YYYY-MM-DD)
        #[arg(long)]
        date_to: Option<String>,
        /// Page number
        #[arg(long)]
        page: Option<u32>,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show one report with its status history
    Report {
        id: i64,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Assign a collector to a report
    Assign { report_id: i64, collector_id: i64 },
    /// Reject a report with a note (prompts if not given)
    Reject {
        report_id: i64,
        #[arg(long)]
        note: Option<String>,
    },
    /// Show report locations as a coordinate table
    Map {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List collectors with task counters
    Collectors {
        /// Search by name, username, email, or phone
        #[arg(long)]
        search: Option<String>,
        /// Page number
        #[arg(long)]
        page: Option<u32>,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show one collector
    Collector {
        id: i64,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Enable or disable a collector account
    ToggleCollector { id: i64 },
    /// Analytics: breakdowns, distributions, and trends
    Analytics {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Check config, session, and backend reachability
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration and its sources
    Show,
    /// Write a config file with the current defaults
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set one config value (dotted key, e.g. api.base_url)
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let app = App::parse();

    let config = config::load();
    let store = SessionStore::open();
    let client = ApiClient::new(&config, store);

    match app.command {
        Commands::Login { username, password } => cli::run_login(&client, username, password),
        Commands::Logout => cli::run_logout(&client),
        Commands::Whoami { format } => {
            cli::run_whoami(&client, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Overview => cli::run_overview(&client),
        Commands::Reports {
            status,
            waste_type,
            search,
            collector,
            date_from,
            date_to,
            page,
            format,
        } => {
            let filters = ReportFilters {
                status,
                waste_type,
                search,
                collector,
                date_from,
                date_to,
                page,
            };
            cli::run_reports(&client, &filters, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Report { id, format } => {
            cli::run_report(&client, id, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Assign {
            report_id,
            collector_id,
        } => cli::run_assign(&client, report_id, collector_id),
        Commands::Reject { report_id, note } => cli::run_reject(&client, report_id, note),
        Commands::Map { format } => {
            cli::run_map(&client, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Collectors {
            search,
            page,
            format,
        } => cli::run_collectors(&client, search, page, OutputFormat::from_str_opt(Some(&format))),
        Commands::Collector { id, format } => {
            cli::run_collector(&client, id, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::ToggleCollector { id } => cli::run_toggle_collector(&client, id),
        Commands::Analytics { format } => {
            cli::run_analytics(&client, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Health => cli::run_health(&client),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::run_config_show(),
            ConfigCommands::Init { force } => cli::run_config_init(force),
            ConfigCommands::Set { key, value } => cli::run_config_set(&key, &value),
        },
    }
}
