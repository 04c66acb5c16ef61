use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vocabulary learning portal backed by SQLite
#[derive(Parser, Debug, Clone)]
#[command(name = "Lang Portal")]
#[command(about = "Inspect words, groups, study sessions and dashboard statistics", long_about = None)]
#[command(version)]
pub struct Args {
    /// Use in-memory database for testing
    #[arg(long, help = "Use in-memory database for testing")]
    pub test: bool,

    /// Custom database file path
    #[arg(long, value_name = "PATH", help = "Use custom database file path")]
    pub db_path: Option<PathBuf>,

    /// Override current date for testing (YYYY-MM-DD format)
    #[arg(
        long,
        value_name = "DATE",
        help = "Override current date (YYYY-MM-DD format)"
    )]
    pub override_date: Option<String>,

    #[command(subcommand)]
    pub command: Option<Report>,
}

/// Paging flags are kept as raw strings so bad input falls back to defaults instead of failing
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageArgs {
    #[arg(long)]
    pub page: Option<String>,
    #[arg(long, alias = "per-page")]
    pub page_size: Option<String>,
}

/// Read model to print as JSON
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Last session, progress and quick stats
    Dashboard,
    Words(PageArgs),
    Word {
        id: i64,
    },
    Groups(PageArgs),
    Group {
        id: i64,
    },
    GroupWords {
        id: i64,
        #[command(flatten)]
        page: PageArgs,
    },
    GroupSessions {
        id: i64,
        #[command(flatten)]
        page: PageArgs,
    },
    Activities,
    ActivitySessions {
        id: i64,
        #[command(flatten)]
        page: PageArgs,
    },
    Sessions(PageArgs),
    Session {
        id: i64,
    },
    SessionWords {
        id: i64,
        #[command(flatten)]
        page: PageArgs,
    },
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the override_date argument if provided
    pub fn validate_override_date(&self) -> Result<Option<NaiveDate>, String> {
        match &self.override_date {
            Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| {
                    format!(
                        "Invalid date format for --override-date: '{}'. Expected YYYY-MM-DD",
                        date_str
                    )
                }),
            None => Ok(None),
        }
    }
}
