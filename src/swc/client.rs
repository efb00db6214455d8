//! SportsWorldCentral API client
//!
//! Every operation follows the same path: build the URL and query, run one
//! transport call under the retry policy, and decode the body inside that same
//! attempt so a 5xx response is retried but a bad payload is not.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cli::types::{LeagueId, PerformanceId, PlayerId, TeamId};
use crate::core::config::SwcConfig;
use crate::core::decode::{check_status, decode_many, decode_one, Record};
use crate::core::http::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
use crate::core::retry::RetryPolicy;
use crate::error::Result;
use crate::swc::query::{
    LeagueQuery, ListQuery, Page, PerformanceQuery, PlayerQuery, TeamQuery,
};
use crate::swc::types::{Counts, League, Performance, Player, Team};


pub const HEALTH_CHECK_ENDPOINT: &str = "/";
pub const LIST_LEAGUES_ENDPOINT: &str = "/v0/leagues/";
pub const LIST_TEAMS_ENDPOINT: &str = "/v0/teams/";
pub const LIST_PLAYERS_ENDPOINT: &str = "/v0/players/";
pub const LIST_PERFORMANCES_ENDPOINT: &str = "/v0/performances/";
pub const GET_COUNTS_ENDPOINT: &str = "/v0/counts/";

/// Raw result of the liveness probe.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HealthCheck {
    /// Parse the body as JSON (`{"status": "ok"}` from a healthy API).
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Client for the SportsWorldCentral fantasy football API.
///
/// Cheap to clone; clones share the config and the transport. Calls on one
/// client may run concurrently.
///
/// ```rust,no_run
/// use swc_client::{LeagueQuery, SwcClient, SwcConfig};
///
/// # async fn example() -> swc_client::Result<()> {
/// let client = SwcClient::new(SwcConfig::new("http://localhost:8000")?)?;
/// for league in client.list_leagues(&LeagueQuery::default()).await? {
///     println!("{} ({})", league.league_name, league.scoring_type);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SwcClient {
    pub(crate) config: Arc<SwcConfig>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) retry: RetryPolicy,
}

impl std::fmt::Debug for SwcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwcClient")
            .field("config", &self.config)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl SwcClient {
    pub fn new(config: SwcConfig) -> Result<Self> {
        Ok(Self::with_transport(config, Arc::new(ReqwestTransport::new()?)))
    }

    /// Build a client over a caller-supplied transport.
    pub fn with_transport(config: SwcConfig, transport: Arc<dyn Transport>) -> Self {
        let retry = RetryPolicy::from_config(&config);
        Self {
            config: Arc::new(config),
            transport,
            retry,
        }
    }

    pub fn config(&self) -> &SwcConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    /// Run `request` under the retry policy, handing each response to `decode`.
    pub(crate) async fn execute<T, F>(
        &self,
        label: &str,
        request: TransportRequest,
        decode: F,
    ) -> Result<T>
    where
        F: Fn(TransportResponse) -> Result<T>,
    {
        let transport = &self.transport;
        let request = &request;
        let decode = &decode;
        self.retry
            .run(label, move || async move {
                let response = transport.send(request).await?;
                decode(response)
            })
            .await
    }

    async fn get_one<T: Record>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        let request = TransportRequest::get(url, self.config.timeout());
        self.execute(path, request, |response| {
            decode_one::<T>(response.status, &response.body)
        })
        .await
    }

    async fn get_page<T: Record, Q: ListQuery>(
        &self,
        path: &str,
        query: &Q,
        page: Page,
    ) -> Result<Vec<T>> {
        let url = self.url(path);
        let params = query.params_for(page);
        debug!("GET {} skip={} limit={}", url, page.skip, page.limit);
        let request = TransportRequest::get(url, self.config.timeout()).with_query(params);
        self.execute(path, request, |response| {
            decode_many::<T>(response.status, &response.body)
        })
        .await
    }

    /// Fetch every page starting at `query.page()`, in arrival order.
    async fn get_all<T: Record, Q: ListQuery>(&self, path: &str, query: &Q) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut next = Some(query.page());

        while let Some(page) = next {
            let batch: Vec<T> = self.get_page(path, query, page).await?;
            next = page.next(batch.len());
            debug!(
                "{}: page at skip={} returned {} records (more: {})",
                path,
                page.skip,
                batch.len(),
                next.is_some()
            );
            records.extend(batch);
        }

        Ok(records)
    }

    /// Liveness probe. Returns the raw response rather than a decoded record.
    pub async fn get_health_check(&self) -> Result<HealthCheck> {
        let request = TransportRequest::get(self.url(HEALTH_CHECK_ENDPOINT), self.config.timeout());
        self.execute("health check", request, |response| {
            check_status(response.status, &response.body)?;
            Ok(HealthCheck {
                status: response.status,
                headers: response.headers,
                body: response.body,
            })
        })
        .await
    }

    /// All leagues matching `query`, following pages until a short page.
    pub async fn list_leagues(&self, query: &LeagueQuery) -> Result<Vec<League>> {
        self.get_all(LIST_LEAGUES_ENDPOINT, query).await
    }

    /// Only the page `query.page` names.
    pub async fn list_leagues_page(&self, query: &LeagueQuery) -> Result<Vec<League>> {
        self.get_page(LIST_LEAGUES_ENDPOINT, query, query.page).await
    }

    pub async fn get_league(&self, league_id: LeagueId) -> Result<League> {
        self.get_one(&format!("{LIST_LEAGUES_ENDPOINT}{league_id}"))
            .await
    }

    pub async fn list_teams(&self, query: &TeamQuery) -> Result<Vec<Team>> {
        self.get_all(LIST_TEAMS_ENDPOINT, query).await
    }

    pub async fn list_teams_page(&self, query: &TeamQuery) -> Result<Vec<Team>> {
        self.get_page(LIST_TEAMS_ENDPOINT, query, query.page).await
    }

    pub async fn get_team(&self, team_id: TeamId) -> Result<Team> {
        self.get_one(&format!("{LIST_TEAMS_ENDPOINT}{team_id}")).await
    }

    pub async fn list_players(&self, query: &PlayerQuery) -> Result<Vec<Player>> {
        self.get_all(LIST_PLAYERS_ENDPOINT, query).await
    }

    pub async fn list_players_page(&self, query: &PlayerQuery) -> Result<Vec<Player>> {
        self.get_page(LIST_PLAYERS_ENDPOINT, query, query.page).await
    }

    pub async fn get_player(&self, player_id: PlayerId) -> Result<Player> {
        self.get_one(&format!("{LIST_PLAYERS_ENDPOINT}{player_id}"))
            .await
    }

    pub async fn list_performances(&self, query: &PerformanceQuery) -> Result<Vec<Performance>> {
        self.get_all(LIST_PERFORMANCES_ENDPOINT, query).await
    }

    pub async fn list_performances_page(
        &self,
        query: &PerformanceQuery,
    ) -> Result<Vec<Performance>> {
        self.get_page(LIST_PERFORMANCES_ENDPOINT, query, query.page)
            .await
    }

    pub async fn get_performance(&self, performance_id: PerformanceId) -> Result<Performance> {
        self.get_one(&format!("{LIST_PERFORMANCES_ENDPOINT}{performance_id}"))
            .await
    }

    /// Row counts for leagues, teams and players.
    pub async fn get_counts(&self) -> Result<Counts> {
        self.get_one(GET_COUNTS_ENDPOINT).await
    }
}
