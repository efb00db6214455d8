//! Integration tests for the public client API

use serde_json::json;
use std::time::Duration;
use swc_client::{
    BulkFileFormat, LeagueQuery, PlayerId, ScoringType, SwcClient, SwcConfig, SwcError,
};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn parquet_file() -> Vec<u8> {
    let mut bytes = b"PAR1".to_vec();
    bytes.extend_from_slice(b"\x15\x00\x15\x1c\x15\x1c\x2c\x15\x02\x15\x00");
    bytes.extend_from_slice(&11u32.to_le_bytes());
    bytes.extend_from_slice(b"PAR1");
    bytes
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = SwcConfig::builder()
        .base_url(mock_server.uri())
        .backoff(false)
        .build()
        .unwrap();
    let client = SwcClient::new(config).unwrap();

    let response = client.get_health_check().await.unwrap();
    assert_eq!(response.status, 200);
    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_leagues() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/leagues/"))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "league_id": 1,
                "league_name": "Test League",
                "scoring_type": "PPR",
                "last_changed_date": "2025-10-02T00:00:00"
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = SwcConfig::builder()
        .base_url(mock_server.uri())
        .backoff(false)
        .build()
        .unwrap();
    let client = SwcClient::new(config).unwrap();

    let leagues = client.list_leagues(&LeagueQuery::default()).await.unwrap();
    assert!(!leagues.is_empty());
    assert_eq!(leagues[0].league_name, "Test League");
    assert_eq!(leagues[0].scoring_type, ScoringType::Ppr);
    assert!(leagues[0].teams.is_empty());
}

#[tokio::test]
async fn test_bulk_player_file_parquet() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bulk/player_data.parquet"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(parquet_file()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = SwcConfig::builder()
        .base_url("http://testurl")
        .bulk_file_format("parquet")
        .bulk_file_base_url(format!("{}/bulk", mock_server.uri()))
        .build()
        .unwrap();
    assert_eq!(config.bulk_file_format(), BulkFileFormat::Parquet);
    let client = SwcClient::new(config).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output_file = dir.path().join("player_data.parquet");

    client.get_bulk_player_file(&output_file).await.unwrap();
    assert!(output_file.exists());
    assert_eq!(std::fs::read(&output_file).unwrap(), parquet_file());
}

#[tokio::test]
async fn test_get_player_with_performances() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/players/1491"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "player_id": 1491,
            "gsis_id": "00-0035704",
            "first_name": "DK",
            "last_name": "Metcalf",
            "position": "WR",
            "last_changed_date": "2024-04-18",
            "performances": [
                {
                    "performance_id": 2501,
                    "week_number": "202301",
                    "fantasy_points": 20.0,
                    "last_changed_date": "2024-04-18"
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = SwcClient::new(SwcConfig::new(mock_server.uri()).unwrap()).unwrap();
    let player = client.get_player(PlayerId::new(1491)).await.unwrap();

    assert_eq!(player.last_name, "Metcalf");
    assert_eq!(player.performances.len(), 1);
    assert_eq!(player.performances[0].fantasy_points, 20.0);
}

#[tokio::test]
async fn test_transient_failures_are_retried_then_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = SwcConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(2)
        .backoff_base_delay(Duration::from_millis(5))
        .backoff_max_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    let client = SwcClient::new(config).unwrap();

    match client.get_counts().await.unwrap_err() {
        SwcError::RetryExhausted { attempts, last } => {
            assert_eq!(attempts, 3);
            assert_eq!(last.status(), Some(503));
        }
        other => panic!("Expected RetryExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_schema_mismatch_names_the_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/counts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "league_count": 5,
            "team_count": "twenty",
            "player_count": 1018
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SwcClient::new(SwcConfig::new(mock_server.uri()).unwrap()).unwrap();

    match client.get_counts().await.unwrap_err() {
        SwcError::SchemaMismatch { field, .. } => assert_eq!(field, "team_count"),
        other => panic!("Expected SchemaMismatch, got {other:?}"),
    }
}
