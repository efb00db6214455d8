//! Unit tests for SportsWorldCentral record types

use super::*;
use chrono::NaiveDate;
use serde_json::json;

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[cfg(test)]
mod types_tests {
    use super::*;

    #[test]
    fn test_league_deserialization_without_teams() {
        let json = json!({
            "league_id": 1,
            "league_name": "Test League",
            "scoring_type": "PPR",
            "last_changed_date": "2025-10-02T00:00:00"
        });

        let league: League = serde_json::from_value(json).unwrap();
        assert_eq!(league.league_id, LeagueId::new(1));
        assert_eq!(league.league_name, "Test League");
        assert_eq!(league.scoring_type, ScoringType::Ppr);
        assert_eq!(league.last_changed_date, midnight(2025, 10, 2));
        assert!(league.teams.is_empty());
    }

    #[test]
    fn test_league_with_nested_teams() {
        let json = json!({
            "league_id": 5001,
            "league_name": "Pigskin Prognosticators",
            "scoring_type": "Half-PPR",
            "last_changed_date": "2024-04-18",
            "teams": [
                {
                    "league_id": 5001,
                    "team_id": 1001,
                    "team_name": "Butchers",
                    "last_changed_date": "2024-04-18"
                }
            ]
        });

        let league: League = serde_json::from_value(json).unwrap();
        assert_eq!(league.scoring_type, ScoringType::HalfPpr);
        assert_eq!(league.teams.len(), 1);
        assert_eq!(league.teams[0].team_id, TeamId::new(1001));
        assert_eq!(league.teams[0].team_name, "Butchers");
    }

    #[test]
    fn test_unknown_scoring_type_is_rejected() {
        let json = json!({
            "league_id": 1,
            "league_name": "Odd League",
            "scoring_type": "Dynasty",
            "last_changed_date": "2024-04-18"
        });

        assert!(serde_json::from_value::<League>(json).is_err());
    }

    #[test]
    fn test_scoring_type_names_match_serde() {
        for name in ScoringType::NAMES {
            let scoring: ScoringType = serde_json::from_value(json!(name)).unwrap();
            assert_eq!(scoring.as_str(), *name);
            assert_eq!(scoring.to_string(), *name);
        }
    }

    #[test]
    fn test_player_with_performances() {
        let json = json!({
            "player_id": 1491,
            "gsis_id": "00-0035704",
            "first_name": "DK",
            "last_name": "Metcalf",
            "position": "WR",
            "last_changed_date": "2024-04-18",
            "performances": [
                {
                    "performance_id": 17,
                    "week_number": "202301",
                    "fantasy_points": 20.5,
                    "last_changed_date": "2024-04-18"
                }
            ]
        });

        let player: Player = serde_json::from_value(json).unwrap();
        assert_eq!(player.player_id, PlayerId::new(1491));
        assert_eq!(player.position, "WR");
        assert_eq!(player.performances.len(), 1);
        assert_eq!(player.performances[0].fantasy_points, 20.5);
        assert_eq!(player.performances[0].player_id, None);
    }

    #[test]
    fn test_performance_accepts_integer_points() {
        let json = json!({
            "performance_id": 3,
            "player_id": 1001,
            "week_number": "202302",
            "fantasy_points": 12,
            "last_changed_date": "2024-04-18T10:15:30.250"
        });

        let performance: Performance = serde_json::from_value(json).unwrap();
        assert_eq!(performance.fantasy_points, 12.0);
        assert_eq!(performance.player_id, Some(PlayerId::new(1001)));
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let json = json!({
            "league_id": 1,
            "team_id": 2,
            "team_name": "x",
            "last_changed_date": "last tuesday"
        });

        let err = serde_json::from_value::<TeamBase>(json).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }

    #[test]
    fn test_league_serialization_round_trips_fields() {
        let league = League {
            league_id: LeagueId::new(7),
            league_name: "Serialized".to_string(),
            scoring_type: ScoringType::Standard,
            last_changed_date: midnight(2024, 1, 5),
            teams: vec![],
        };

        let json = serde_json::to_value(&league).unwrap();
        assert_eq!(json["league_id"], 7);
        assert_eq!(json["scoring_type"], "Standard");
        assert_eq!(json["last_changed_date"], "2024-01-05T00:00:00");
    }

    #[test]
    fn test_shapes_list_every_required_struct_field() {
        // Required fields in each shape must be exactly the non-defaulted struct fields.
        let required = |shape: &'static Shape| -> Vec<&'static str> {
            shape
                .fields
                .iter()
                .filter(|f| f.required)
                .map(|f| f.name)
                .collect()
        };

        assert_eq!(
            required(League::shape()),
            ["league_id", "league_name", "scoring_type", "last_changed_date"]
        );
        assert_eq!(
            required(Team::shape()),
            required(TeamBase::shape()),
            "Team and TeamBase share required fields"
        );
        assert_eq!(required(Player::shape()), required(PlayerBase::shape()));
        assert_eq!(
            required(Counts::shape()),
            ["league_count", "team_count", "player_count"]
        );
    }
}
