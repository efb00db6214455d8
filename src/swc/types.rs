use chrono::NaiveDateTime;
use serde::{de::Error, Deserialize, Deserializer, Serialize};

use crate::cli::types::{LeagueId, PerformanceId, PlayerId, TeamId};
use crate::core::decode::{parse_timestamp, Field, FieldKind, Record, Shape};

#[cfg(test)]
mod tests;

fn de_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp {raw:?}")))
}

/// `null` and a missing field both mean no nested records.
fn de_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// League scoring rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ScoringType {
    #[serde(rename = "PPR")]
    Ppr,
    #[serde(rename = "Half-PPR")]
    HalfPpr,
    #[serde(rename = "Standard")]
    Standard,
}

impl ScoringType {
    pub const NAMES: &'static [&'static str] = &["PPR", "Half-PPR", "Standard"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringType::Ppr => "PPR",
            ScoringType::HalfPpr => "Half-PPR",
            ScoringType::Standard => "Standard",
        }
    }
}

impl std::fmt::Display for ScoringType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub static PERFORMANCE_SHAPE: Shape = Shape {
    record: "Performance",
    fields: &[
        Field::required("performance_id", FieldKind::Unsigned),
        Field::optional("player_id", FieldKind::Unsigned),
        Field::required("week_number", FieldKind::Text),
        Field::required("fantasy_points", FieldKind::Float),
        Field::required("last_changed_date", FieldKind::Timestamp),
    ],
};

pub static PLAYER_BASE_SHAPE: Shape = Shape {
    record: "PlayerBase",
    fields: &[
        Field::required("player_id", FieldKind::Unsigned),
        Field::required("gsis_id", FieldKind::Text),
        Field::required("first_name", FieldKind::Text),
        Field::required("last_name", FieldKind::Text),
        Field::required("position", FieldKind::Text),
        Field::required("last_changed_date", FieldKind::Timestamp),
    ],
};

pub static PLAYER_SHAPE: Shape = Shape {
    record: "Player",
    fields: &[
        Field::required("player_id", FieldKind::Unsigned),
        Field::required("gsis_id", FieldKind::Text),
        Field::required("first_name", FieldKind::Text),
        Field::required("last_name", FieldKind::Text),
        Field::required("position", FieldKind::Text),
        Field::required("last_changed_date", FieldKind::Timestamp),
        Field::optional("performances", FieldKind::Records(&PERFORMANCE_SHAPE)),
    ],
};

pub static TEAM_BASE_SHAPE: Shape = Shape {
    record: "TeamBase",
    fields: &[
        Field::required("league_id", FieldKind::Unsigned32),
        Field::required("team_id", FieldKind::Unsigned32),
        Field::required("team_name", FieldKind::Text),
        Field::required("last_changed_date", FieldKind::Timestamp),
    ],
};

pub static TEAM_SHAPE: Shape = Shape {
    record: "Team",
    fields: &[
        Field::required("league_id", FieldKind::Unsigned32),
        Field::required("team_id", FieldKind::Unsigned32),
        Field::required("team_name", FieldKind::Text),
        Field::required("last_changed_date", FieldKind::Timestamp),
        Field::optional("players", FieldKind::Records(&PLAYER_BASE_SHAPE)),
    ],
};

pub static LEAGUE_SHAPE: Shape = Shape {
    record: "League",
    fields: &[
        Field::required("league_id", FieldKind::Unsigned32),
        Field::required("league_name", FieldKind::Text),
        Field::required("scoring_type", FieldKind::OneOf(ScoringType::NAMES)),
        Field::required("last_changed_date", FieldKind::Timestamp),
        Field::optional("teams", FieldKind::Records(&TEAM_BASE_SHAPE)),
    ],
};

pub static COUNTS_SHAPE: Shape = Shape {
    record: "Counts",
    fields: &[
        Field::required("league_count", FieldKind::Unsigned),
        Field::required("team_count", FieldKind::Unsigned),
        Field::required("player_count", FieldKind::Unsigned),
    ],
};

/// One player's fantasy output for one week
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Performance {
    pub performance_id: PerformanceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    /// Season-qualified week label as the API sends it (e.g. `"202301"`)
    pub week_number: String,
    pub fantasy_points: f64,
    #[serde(deserialize_with = "de_timestamp")]
    pub last_changed_date: NaiveDateTime,
}

/// Player without nested performances, as embedded in a [`Team`]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerBase {
    pub player_id: PlayerId,
    pub gsis_id: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub last_changed_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub gsis_id: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub last_changed_date: NaiveDateTime,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub performances: Vec<Performance>,
}

/// Team without its roster, as embedded in a [`League`]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TeamBase {
    pub league_id: LeagueId,
    pub team_id: TeamId,
    pub team_name: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub last_changed_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Team {
    pub league_id: LeagueId,
    pub team_id: TeamId,
    pub team_name: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub last_changed_date: NaiveDateTime,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub players: Vec<PlayerBase>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct League {
    pub league_id: LeagueId,
    pub league_name: String,
    pub scoring_type: ScoringType,
    #[serde(deserialize_with = "de_timestamp")]
    pub last_changed_date: NaiveDateTime,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub teams: Vec<TeamBase>,
}

/// Row counts reported by `/v0/counts/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Counts {
    pub league_count: u64,
    pub team_count: u64,
    pub player_count: u64,
}

impl Record for Performance {
    fn shape() -> &'static Shape {
        &PERFORMANCE_SHAPE
    }
}

impl Record for PlayerBase {
    fn shape() -> &'static Shape {
        &PLAYER_BASE_SHAPE
    }
}

impl Record for Player {
    fn shape() -> &'static Shape {
        &PLAYER_SHAPE
    }
}

impl Record for TeamBase {
    fn shape() -> &'static Shape {
        &TEAM_BASE_SHAPE
    }
}

impl Record for Team {
    fn shape() -> &'static Shape {
        &TEAM_SHAPE
    }
}

impl Record for League {
    fn shape() -> &'static Shape {
        &LEAGUE_SHAPE
    }
}

impl Record for Counts {
    fn shape() -> &'static Shape {
        &COUNTS_SHAPE
    }
}
