//! Query parameters for the list endpoints.
//!
//! Every list call is paged with `skip`/`limit`. A page that comes back full is
//! the API's signal that more records may follow.

use chrono::NaiveDate;

use crate::cli::types::{LeagueId, PlayerId, TeamId};

pub const DEFAULT_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// The page after this one, if a page of `received` records means more remain.
    pub fn next(self, received: usize) -> Option<Page> {
        let received = u32::try_from(received).ok()?;
        if self.limit == 0 || received < self.limit {
            return None;
        }
        Some(Page {
            skip: self.skip.checked_add(received)?,
            limit: self.limit,
        })
    }

    fn params(&self) -> Vec<(String, String)> {
        vec![
            ("skip".to_string(), self.skip.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}

/// Query for one of the list endpoints.
pub trait ListQuery {
    /// Where listing starts.
    fn page(&self) -> Page;

    /// Filter parameters, excluding paging.
    fn filters(&self) -> Vec<(String, String)>;

    /// Full query string for `page`.
    fn params_for(&self, page: Page) -> Vec<(String, String)> {
        let mut params = page.params();
        params.extend(self.filters());
        params
    }
}

fn push<T: ToString>(params: &mut Vec<(String, String)>, key: &str, value: Option<T>) {
    if let Some(v) = value {
        params.push((key.to_string(), v.to_string()));
    }
}

fn date(value: Option<NaiveDate>) -> Option<String> {
    value.map(|d| d.format("%Y-%m-%d").to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueQuery {
    pub page: Page,
    pub minimum_last_changed_date: Option<NaiveDate>,
    pub league_name: Option<String>,
}

impl ListQuery for LeagueQuery {
    fn page(&self) -> Page {
        self.page
    }

    fn filters(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push(
            &mut params,
            "minimum_last_changed_date",
            date(self.minimum_last_changed_date),
        );
        push(&mut params, "league_name", self.league_name.as_ref());
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamQuery {
    pub page: Page,
    pub minimum_last_changed_date: Option<NaiveDate>,
    pub team_name: Option<String>,
    pub league_id: Option<LeagueId>,
}

impl ListQuery for TeamQuery {
    fn page(&self) -> Page {
        self.page
    }

    fn filters(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push(
            &mut params,
            "minimum_last_changed_date",
            date(self.minimum_last_changed_date),
        );
        push(&mut params, "team_name", self.team_name.as_ref());
        push(&mut params, "league_id", self.league_id);
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerQuery {
    pub page: Page,
    pub minimum_last_changed_date: Option<NaiveDate>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ListQuery for PlayerQuery {
    fn page(&self) -> Page {
        self.page
    }

    fn filters(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push(
            &mut params,
            "minimum_last_changed_date",
            date(self.minimum_last_changed_date),
        );
        push(&mut params, "first_name", self.first_name.as_ref());
        push(&mut params, "last_name", self.last_name.as_ref());
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceQuery {
    pub page: Page,
    pub minimum_last_changed_date: Option<NaiveDate>,
    pub player_id: Option<PlayerId>,
    pub team_id: Option<TeamId>,
    pub season: Option<u16>,
    pub week: Option<u16>,
}

impl ListQuery for PerformanceQuery {
    fn page(&self) -> Page {
        self.page
    }

    fn filters(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push(
            &mut params,
            "minimum_last_changed_date",
            date(self.minimum_last_changed_date),
        );
        push(&mut params, "player_id", self.player_id);
        push(&mut params, "team_id", self.team_id);
        push(&mut params, "season", self.season);
        push(&mut params, "week", self.week);
        params
    }
}
