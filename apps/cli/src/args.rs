use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use roll_core::ReportTab;

#[derive(Parser, Debug)]
#[command(name = "roll-usage", version, about = "Roll usage monitor")]
pub struct Cli {
    /// Directory holding the local database
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Record a new roll usage
    Add(AddArgs),
    /// Change an existing record
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete one record
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete every record
    Reset {
        #[arg(short, long)]
        yes: bool,
    },
    /// End the session; records are kept
    Logout {
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the history table
    List {
        /// Filter by lot, supplier or machine
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show usage totals
    Report {
        /// supplier, daily, weekly, monthly or all
        #[arg(value_parser = parse_report_view)]
        view: Option<ReportView>,
    },
    /// Write every record to a CSV file
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the welcome screen and start the session
    Welcome,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[arg(long)]
    pub lot: String,
    #[arg(long)]
    pub supplier: String,
    #[arg(long)]
    pub machine: String,
    #[arg(long, allow_negative_numbers = true)]
    pub counter: i64,
    /// Start time, e.g. 2024-01-01T08:00 (defaults to now)
    #[arg(long)]
    pub start: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub lot: Option<String>,
    #[arg(long)]
    pub supplier: Option<String>,
    #[arg(long)]
    pub machine: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub counter: Option<i64>,
    #[arg(long)]
    pub start: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    Tab(ReportTab),
    All,
}

fn parse_report_view(value: &str) -> Result<ReportView, String> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(ReportView::All);
    }
    value
        .parse::<ReportTab>()
        .map(ReportView::Tab)
        .map_err(|err| err.to_string())
}
