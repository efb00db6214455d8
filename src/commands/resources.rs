//! Handlers for the health, resource and counts commands
//!
//! Each `*_json` function does the fetching and returns the value that the
//! matching `handle_*` function prints. With an id the command fetches that one
//! record; otherwise it lists, following pages unless `single_page` is set.

use serde_json::{json, Value};

use crate::{
    LeagueId, LeagueQuery, PerformanceId, PerformanceQuery, PlayerId, PlayerQuery, Result,
    SwcClient, TeamId, TeamQuery,
};

use super::common::print_json;

pub async fn health_json(client: &SwcClient) -> Result<Value> {
    let health = client.get_health_check().await?;
    let body = health
        .json::<Value>()
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&health.body).into_owned()));
    Ok(json!({ "status": health.status, "body": body }))
}

pub async fn handle_health(client: &SwcClient) -> Result<()> {
    print_json(&health_json(client).await?)
}

pub async fn leagues_json(
    client: &SwcClient,
    id: Option<LeagueId>,
    query: &LeagueQuery,
    single_page: bool,
) -> Result<Value> {
    let value = match id {
        Some(id) => serde_json::to_value(client.get_league(id).await?)?,
        None if single_page => serde_json::to_value(client.list_leagues_page(query).await?)?,
        None => serde_json::to_value(client.list_leagues(query).await?)?,
    };
    Ok(value)
}

pub async fn handle_leagues(
    client: &SwcClient,
    id: Option<LeagueId>,
    query: &LeagueQuery,
    single_page: bool,
) -> Result<()> {
    print_json(&leagues_json(client, id, query, single_page).await?)
}

pub async fn teams_json(
    client: &SwcClient,
    id: Option<TeamId>,
    query: &TeamQuery,
    single_page: bool,
) -> Result<Value> {
    let value = match id {
        Some(id) => serde_json::to_value(client.get_team(id).await?)?,
        None if single_page => serde_json::to_value(client.list_teams_page(query).await?)?,
        None => serde_json::to_value(client.list_teams(query).await?)?,
    };
    Ok(value)
}

pub async fn handle_teams(
    client: &SwcClient,
    id: Option<TeamId>,
    query: &TeamQuery,
    single_page: bool,
) -> Result<()> {
    print_json(&teams_json(client, id, query, single_page).await?)
}

pub async fn players_json(
    client: &SwcClient,
    id: Option<PlayerId>,
    query: &PlayerQuery,
    single_page: bool,
) -> Result<Value> {
    let value = match id {
        Some(id) => serde_json::to_value(client.get_player(id).await?)?,
        None if single_page => serde_json::to_value(client.list_players_page(query).await?)?,
        None => serde_json::to_value(client.list_players(query).await?)?,
    };
    Ok(value)
}

pub async fn handle_players(
    client: &SwcClient,
    id: Option<PlayerId>,
    query: &PlayerQuery,
    single_page: bool,
) -> Result<()> {
    print_json(&players_json(client, id, query, single_page).await?)
}

pub async fn performances_json(
    client: &SwcClient,
    id: Option<PerformanceId>,
    query: &PerformanceQuery,
    single_page: bool,
) -> Result<Value> {
    let value = match id {
        Some(id) => serde_json::to_value(client.get_performance(id).await?)?,
        None if single_page => serde_json::to_value(client.list_performances_page(query).await?)?,
        None => serde_json::to_value(client.list_performances(query).await?)?,
    };
    Ok(value)
}

pub async fn handle_performances(
    client: &SwcClient,
    id: Option<PerformanceId>,
    query: &PerformanceQuery,
    single_page: bool,
) -> Result<()> {
    print_json(&performances_json(client, id, query, single_page).await?)
}

pub async fn handle_counts(client: &SwcClient) -> Result<()> {
    print_json(&client.get_counts().await?)
}
