//! Unit tests for response decoding

use super::*;
use crate::swc::types::{Counts, League, Player, Team};
use serde_json::json;

fn body(value: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
}

fn league_json() -> serde_json::Value {
    json!({
        "league_id": 1,
        "league_name": "Test League",
        "scoring_type": "PPR",
        "last_changed_date": "2025-10-02T00:00:00"
    })
}

fn expect_mismatch(err: SwcError) -> (&'static str, String, String) {
    match err {
        SwcError::SchemaMismatch {
            record,
            field,
            reason,
        } => (record, field, reason),
        other => panic!("Expected SchemaMismatch, got {other:?}"),
    }
}

#[cfg(test)]
mod decode_tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2025-10-02").is_some());
        assert!(parse_timestamp("2025-10-02T00:00:00").is_some());
        assert!(parse_timestamp("2025-10-02T13:45:10.123456").is_some());
        assert!(parse_timestamp("2025-10-02 13:45:10").is_some());
        assert!(parse_timestamp("02/10/2025").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_body_snippet_is_capped_on_char_boundary() {
        let long = "é".repeat(500);
        let snippet = body_snippet(long.as_bytes());
        assert_eq!(snippet.chars().count(), 200);

        assert_eq!(body_snippet(b"short"), "short");
    }

    #[test]
    fn test_check_status_accepts_2xx_only() {
        assert!(check_status(200, b"").is_ok());
        assert!(check_status(204, b"").is_ok());
        assert!(check_status(299, b"").is_ok());

        match check_status(404, b"{\"detail\":\"Not Found\"}").unwrap_err() {
            SwcError::ApiStatus {
                status,
                body_snippet,
            } => {
                assert_eq!(status, 404);
                assert!(body_snippet.contains("Not Found"));
            }
            other => panic!("Expected ApiStatus, got {other:?}"),
        }
        assert!(check_status(199, b"").is_err());
        assert!(check_status(300, b"").is_err());
    }

    #[test]
    fn test_unavailable_status_is_retryable_and_not_parsed() {
        // The body is not even JSON; the status check must win.
        let err = decode_one::<League>(503, b"<html>busy</html>").unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_decode_many_preserves_order_and_values() {
        let mut second = league_json();
        second["league_id"] = json!(2);
        second["league_name"] = json!("Second League");
        second["scoring_type"] = json!("Standard");

        let leagues: Vec<League> = decode_many(200, &body(json!([league_json(), second]))).unwrap();

        assert_eq!(leagues.len(), 2);
        assert_eq!(leagues[0].league_name, "Test League");
        assert_eq!(leagues[1].league_name, "Second League");
        assert_eq!(leagues[1].league_id.as_u32(), 2);
    }

    #[test]
    fn test_decode_many_empty_list() {
        let leagues: Vec<League> = decode_many(200, b"[]").unwrap();
        assert!(leagues.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = decode_many::<League>(200, b"[{\"league_id\": 1,").unwrap_err();
        assert!(matches!(err, SwcError::MalformedResponse(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let mut league = league_json();
        league.as_object_mut().unwrap().remove("league_name");

        let (record, field, reason) =
            expect_mismatch(decode_one::<League>(200, &body(league)).unwrap_err());
        assert_eq!(record, "League");
        assert_eq!(field, "league_name");
        assert!(reason.contains("missing"));
    }

    #[test]
    fn test_missing_field_in_list_carries_index() {
        let mut broken = league_json();
        broken.as_object_mut().unwrap().remove("league_name");

        let err = decode_many::<League>(200, &body(json!([league_json(), broken]))).unwrap_err();
        let (_, field, _) = expect_mismatch(err);
        assert_eq!(field, "[1].league_name");
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let mut league = league_json();
        league["league_name"] = serde_json::Value::Null;

        let (_, field, reason) =
            expect_mismatch(decode_one::<League>(200, &body(league)).unwrap_err());
        assert_eq!(field, "league_name");
        assert!(reason.contains("missing"));
    }

    #[test]
    fn test_type_mismatch_is_named() {
        let mut league = league_json();
        league["league_id"] = json!("one");

        let (_, field, reason) =
            expect_mismatch(decode_one::<League>(200, &body(league)).unwrap_err());
        assert_eq!(field, "league_id");
        assert!(reason.contains("non-negative integer"));
    }

    #[test]
    fn test_negative_id_is_rejected() {
        let mut league = league_json();
        league["league_id"] = json!(-4);

        let (_, field, _) = expect_mismatch(decode_one::<League>(200, &body(league)).unwrap_err());
        assert_eq!(field, "league_id");
    }

    #[test]
    fn test_enum_domain_is_checked() {
        let mut league = league_json();
        league["scoring_type"] = json!("Dynasty");

        let (_, field, reason) =
            expect_mismatch(decode_one::<League>(200, &body(league)).unwrap_err());
        assert_eq!(field, "scoring_type");
        assert!(reason.contains("PPR"));
    }

    #[test]
    fn test_bad_timestamp_is_named() {
        let mut league = league_json();
        league["last_changed_date"] = json!("yesterday");

        let (_, field, _) = expect_mismatch(decode_one::<League>(200, &body(league)).unwrap_err());
        assert_eq!(field, "last_changed_date");
    }

    #[test]
    fn test_nested_record_path() {
        let team = json!({
            "league_id": 5001,
            "team_id": 1001,
            "team_name": "Butchers",
            "last_changed_date": "2024-04-18",
            "players": [
                {
                    "player_id": 1,
                    "gsis_id": "00-1",
                    "first_name": "A",
                    "last_name": "B",
                    "position": "QB",
                    "last_changed_date": "2024-04-18"
                },
                {
                    "player_id": 2,
                    "gsis_id": "00-2",
                    "first_name": "C",
                    "position": "RB",
                    "last_changed_date": "2024-04-18"
                }
            ]
        });

        let (record, field, _) = expect_mismatch(decode_one::<Team>(200, &body(team)).unwrap_err());
        assert_eq!(record, "PlayerBase");
        assert_eq!(field, "players[1].last_name");
    }

    #[test]
    fn test_nested_records_must_be_an_array() {
        let player = json!({
            "player_id": 1,
            "gsis_id": "00-1",
            "first_name": "A",
            "last_name": "B",
            "position": "QB",
            "last_changed_date": "2024-04-18",
            "performances": {"performance_id": 1}
        });

        let (_, field, reason) =
            expect_mismatch(decode_one::<Player>(200, &body(player)).unwrap_err());
        assert_eq!(field, "performances");
        assert!(reason.contains("array"));
    }

    #[test]
    fn test_list_endpoint_requires_array() {
        let (record, field, _) =
            expect_mismatch(decode_many::<League>(200, &body(league_json())).unwrap_err());
        assert_eq!(record, "League");
        assert_eq!(field, "<root>");
    }

    #[test]
    fn test_single_endpoint_requires_object() {
        let (_, field, reason) =
            expect_mismatch(decode_one::<Counts>(200, b"[1, 2, 3]").unwrap_err());
        assert_eq!(field, "<root>");
        assert!(reason.contains("object"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut league = league_json();
        league["commissioner"] = json!("someone");

        let league: League = decode_one(200, &body(league)).unwrap();
        assert_eq!(league.league_name, "Test League");
    }

    #[test]
    fn test_out_of_range_id_is_named() {
        let mut league = league_json();
        league["league_id"] = json!(u64::from(u32::MAX) + 1);

        let (record, field, reason) =
            expect_mismatch(decode_one::<League>(200, &body(league)).unwrap_err());
        assert_eq!(record, "League");
        assert_eq!(field, "league_id");
        assert!(reason.contains("32 bits"));
    }

    #[test]
    fn test_largest_32_bit_id_is_accepted() {
        let mut league = league_json();
        league["league_id"] = json!(u32::MAX);

        let decoded: League = decode_one(200, &body(league)).unwrap();
        assert_eq!(decoded.league_id.as_u32(), u32::MAX);
    }

    #[test]
    fn test_out_of_range_nested_team_id_is_named() {
        let mut league = league_json();
        league["teams"] = json!([{
            "league_id": 1,
            "team_id": u64::from(u32::MAX) + 1,
            "team_name": "Ninety-Nine",
            "last_changed_date": "2024-04-18"
        }]);

        let (_, field, _) = expect_mismatch(decode_one::<League>(200, &body(league)).unwrap_err());
        assert_eq!(field, "teams[0].team_id");
    }

    #[test]
    fn test_null_nested_records_decode_as_empty() {
        let mut league = league_json();
        league["teams"] = json!(null);
        let decoded: League = decode_one(200, &body(league)).unwrap();
        assert!(decoded.teams.is_empty());

        let team = json!({
            "league_id": 1,
            "team_id": 7,
            "team_name": "Ninety-Nine",
            "last_changed_date": "2024-04-18",
            "players": null
        });
        let decoded: Team = decode_one(200, &body(team)).unwrap();
        assert!(decoded.players.is_empty());

        let player = json!({
            "player_id": 1491,
            "gsis_id": "00-0035704",
            "first_name": "DK",
            "last_name": "Metcalf",
            "position": "WR",
            "last_changed_date": "2024-04-18",
            "performances": null
        });
        let decoded: Player = decode_one(200, &body(player)).unwrap();
        assert!(decoded.performances.is_empty());
    }

    #[test]
    fn test_non_array_nested_records_are_named() {
        let mut league = league_json();
        league["teams"] = json!("none");

        let (_, field, _) = expect_mismatch(decode_one::<League>(200, &body(league)).unwrap_err());
        assert_eq!(field, "teams");
    }

    #[test]
    fn test_mismatch_on_non_200_success_status() {
        let mut league = league_json();
        league.as_object_mut().unwrap().remove("league_name");

        let (_, field, _) = expect_mismatch(decode_one::<League>(203, &body(league)).unwrap_err());
        assert_eq!(field, "league_name");
    }
}
