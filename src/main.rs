//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use swc_client::{
    cli::{Commands, Swc},
    commands::{
        bulk::handle_bulk,
        common::build_client,
        resources::{
            handle_counts, handle_health, handle_leagues, handle_performances, handle_players,
            handle_teams,
        },
    },
    LeagueQuery, PerformanceQuery, PlayerQuery, TeamQuery,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = Swc::parse();

    let format = match &app.command {
        Commands::Bulk { format, .. } => *format,
        _ => None,
    };
    let client = build_client(&app.client, format)?;

    match app.command {
        Commands::Health => handle_health(&client).await?,

        Commands::Leagues {
            id,
            name,
            changed_since,
            page,
        } => {
            let query = LeagueQuery {
                page: page.page(),
                minimum_last_changed_date: changed_since,
                league_name: name,
            };
            handle_leagues(&client, id, &query, page.single_page).await?
        }

        Commands::Teams {
            id,
            name,
            league_id,
            changed_since,
            page,
        } => {
            let query = TeamQuery {
                page: page.page(),
                minimum_last_changed_date: changed_since,
                team_name: name,
                league_id,
            };
            handle_teams(&client, id, &query, page.single_page).await?
        }

        Commands::Players {
            id,
            first_name,
            last_name,
            changed_since,
            page,
        } => {
            let query = PlayerQuery {
                page: page.page(),
                minimum_last_changed_date: changed_since,
                first_name,
                last_name,
            };
            handle_players(&client, id, &query, page.single_page).await?
        }

        Commands::Performances {
            id,
            player_id,
            team_id,
            season,
            week,
            changed_since,
            page,
        } => {
            let query = PerformanceQuery {
                page: page.page(),
                minimum_last_changed_date: changed_since,
                player_id,
                team_id,
                season,
                week,
            };
            handle_performances(&client, id, &query, page.single_page).await?
        }

        Commands::Counts => handle_counts(&client).await?,

        Commands::Bulk {
            dataset, output, ..
        } => handle_bulk(&client, dataset, output).await?,
    }

    Ok(())
}
