//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use types::{LeagueId, PerformanceId, PlayerId, TeamId};

use crate::swc::bulk::{BulkDataset, BulkFileFormat};
use crate::swc::query::{Page, DEFAULT_PAGE_SIZE};

/// Connection settings shared by every command
#[derive(Debug, Args)]
pub struct ClientArgs {
    /// API base URL (or set `SWC_API_BASE_URL` env var).
    #[clap(long, global = true)]
    pub base_url: Option<String>,

    /// Fail on the first error instead of retrying with backoff.
    #[clap(long, global = true)]
    pub no_backoff: bool,

    /// Retries after the first attempt when backoff is on (or set `SWC_MAX_RETRIES`).
    #[clap(long, global = true)]
    pub max_retries: Option<u32>,

    /// Per-request timeout in seconds (or set `SWC_TIMEOUT_SECONDS`).
    #[clap(long, global = true)]
    pub timeout: Option<f64>,
}

/// Paging arguments for list commands
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Records to skip before the first one returned.
    #[clap(long, default_value_t = 0)]
    pub skip: u32,

    /// Records per request.
    #[clap(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: u32,

    /// Fetch only the first page instead of following pages.
    #[clap(long)]
    pub single_page: bool,
}

impl PageArgs {
    pub fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that the API is up.
    Health,

    /// List leagues, or fetch one by id.
    Leagues {
        /// Fetch a single league.
        #[clap(long)]
        id: Option<LeagueId>,

        /// Filter by league name.
        #[clap(long)]
        name: Option<String>,

        /// Only records changed on or after this date (YYYY-MM-DD).
        #[clap(long)]
        changed_since: Option<NaiveDate>,

        #[clap(flatten)]
        page: PageArgs,
    },

    /// List teams, or fetch one by id.
    Teams {
        /// Fetch a single team.
        #[clap(long)]
        id: Option<TeamId>,

        /// Filter by team name.
        #[clap(long)]
        name: Option<String>,

        /// Filter by owning league.
        #[clap(long)]
        league_id: Option<LeagueId>,

        /// Only records changed on or after this date (YYYY-MM-DD).
        #[clap(long)]
        changed_since: Option<NaiveDate>,

        #[clap(flatten)]
        page: PageArgs,
    },

    /// List players, or fetch one by id.
    Players {
        /// Fetch a single player.
        #[clap(long)]
        id: Option<PlayerId>,

        #[clap(long)]
        first_name: Option<String>,

        #[clap(long)]
        last_name: Option<String>,

        /// Only records changed on or after this date (YYYY-MM-DD).
        #[clap(long)]
        changed_since: Option<NaiveDate>,

        #[clap(flatten)]
        page: PageArgs,
    },

    /// List weekly performances, or fetch one by id.
    Performances {
        /// Fetch a single performance.
        #[clap(long)]
        id: Option<PerformanceId>,

        #[clap(long)]
        player_id: Option<PlayerId>,

        #[clap(long)]
        team_id: Option<TeamId>,

        /// Season year (e.g. 2023).
        #[clap(long)]
        season: Option<u16>,

        #[clap(long)]
        week: Option<u16>,

        /// Only records changed on or after this date (YYYY-MM-DD).
        #[clap(long)]
        changed_since: Option<NaiveDate>,

        #[clap(flatten)]
        page: PageArgs,
    },

    /// Show league, team and player counts.
    Counts,

    /// Download a whole dataset as a bulk file.
    Bulk {
        #[clap(value_enum)]
        dataset: BulkDataset,

        /// File format (or set `SWC_BULK_FILE_FORMAT` env var).
        #[clap(long, value_enum)]
        format: Option<BulkFileFormat>,

        /// Destination path. Defaults to the user cache directory.
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "swc", about = "SportsWorldCentral fantasy football API client", version)]
pub struct Swc {
    #[clap(flatten)]
    pub client: ClientArgs,

    #[clap(subcommand)]
    pub command: Commands,
}
