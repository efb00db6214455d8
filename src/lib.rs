//! SportsWorldCentral Fantasy Football Client Library
//!
//! An async client for the SportsWorldCentral (SWC) fantasy football API:
//! leagues, teams, players, weekly performances, row counts and the bulk
//! dataset files.
//!
//! ## Features
//!
//! - **Typed Records**: every response is checked field by field before it becomes a record
//! - **Pagination**: list calls follow `skip`/`limit` pages until a short page
//! - **Retry with Backoff**: transient failures (timeouts, connection errors, 5xx) are
//!   retried with capped exponential delays
//! - **Bulk Files**: whole datasets downloaded as CSV or Parquet
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use swc_client::{LeagueId, LeagueQuery, SwcClient, SwcConfig};
//!
//! # async fn example() -> swc_client::Result<()> {
//! let client = SwcClient::new(SwcConfig::from_env()?)?;
//!
//! let leagues = client.list_leagues(&LeagueQuery::default()).await?;
//! println!("{} leagues", leagues.len());
//!
//! let league = client.get_league(LeagueId::new(5001)).await?;
//! println!("{} has {} teams", league.league_name, league.teams.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export SWC_API_BASE_URL=http://localhost:8000
//! export SWC_BACKOFF=true
//! export SWC_BULK_FILE_FORMAT=parquet
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod swc;

// Re-export commonly used types
pub use cli::types::{LeagueId, PerformanceId, PlayerId, TeamId};
pub use crate::core::{RetryPolicy, ReqwestTransport, SwcConfig, SwcConfigBuilder, Transport};
pub use error::{Result, SwcError};
pub use swc::bulk::{BulkDataset, BulkFileFormat};
pub use swc::client::{HealthCheck, SwcClient};
pub use swc::query::{LeagueQuery, Page, PerformanceQuery, PlayerQuery, TeamQuery};
pub use swc::types::{
    Counts, League, Performance, Player, PlayerBase, ScoringType, Team, TeamBase,
};

pub const BASE_URL_ENV_VAR: &str = crate::core::config::BASE_URL_ENV_VAR;
