use chrono::{DateTime, Utc};
use meetcost_core::participant::Participant;
use meetcost_core::session::{Session, SessionAction, SnapshotRepository};
use meetcost_infrastructure::{JsonSnapshotRepository, MeetcostPaths};
use tempfile::TempDir;

fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
}

fn running_session() -> Session {
    let mut session = Session::new();
    let _ = session
        .apply(
            SessionAction::Import {
                participants: vec![Participant::new("Ana", "Dev", 89_100.0)],
                topic_titles: vec!["Intro".to_string(), "Budget".to_string()],
            },
            at(0),
        )
        .unwrap();
    let topic_id = session.topics[0].id.clone();
    let _ = session
        .apply(SessionAction::StartTopic { topic_id }, at(0))
        .unwrap();
    let _ = session.apply(SessionAction::Tick, at(20)).unwrap();
    session
}

#[tokio::test]
async fn test_save_then_load_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let paths = MeetcostPaths::new(Some(temp_dir.path().to_path_buf()));
    let repo = JsonSnapshotRepository::for_key(&paths, "le-chrono-cheque-ugo-v1").unwrap();

    let session = running_session();
    repo.save(&session).await.unwrap();
    assert!(temp_dir.path().join("le-chrono-cheque-ugo-v1.json").exists());

    let loaded = repo.load().await.unwrap().unwrap();
    assert_eq!(loaded, session);
    assert_eq!(loaded.last_tick, Some(at(20)));
    // 89 100 / 1 782 000 = 0.05 per second
    assert!((loaded.total_meeting_cost - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_snapshot_file_is_camel_case_json() {
    let temp_dir = TempDir::new().unwrap();
    let repo = JsonSnapshotRepository::new(temp_dir.path().join("snap.json"));
    repo.save(&running_session()).await.unwrap();

    let text = std::fs::read_to_string(repo.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["version"], "1.0.0");
    assert_eq!(value["lastTick"], serde_json::json!(at(20).timestamp_millis()));
    assert!(value["activeTopicId"].is_string());
    assert!(value.get("totalMeetingCost").is_some());
}

#[tokio::test]
async fn test_missing_file_loads_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let repo = JsonSnapshotRepository::new(temp_dir.path().join("absent.json"));
    assert!(repo.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_clear_removes_file() {
    let temp_dir = TempDir::new().unwrap();
    let repo = JsonSnapshotRepository::new(temp_dir.path().join("snap.json"));
    repo.save(&running_session()).await.unwrap();

    repo.clear().await.unwrap();
    assert!(!repo.path().exists());
    assert!(repo.load().await.unwrap().is_none());
    repo.clear().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_and_incompatible_files_are_errors() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("snap.json");
    let repo = JsonSnapshotRepository::new(path.clone());

    std::fs::write(&path, "{\"topics\": [").unwrap();
    assert!(repo.load().await.unwrap_err().is_serialization());

    std::fs::write(&path, r#"{"version": "9.0.0"}"#).unwrap();
    assert!(repo.load().await.unwrap_err().is_serialization());
}

#[tokio::test]
async fn test_unversioned_file_is_migrated() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("snap.json");
    std::fs::write(
        &path,
        r#"{"participants": [{"id": "p1", "name": "Ana", "annualSalary": 89100}], "totalMeetingCost": 2.5}"#,
    )
    .unwrap();

    let repo = JsonSnapshotRepository::new(path);
    let session = repo.load().await.unwrap().unwrap();
    assert_eq!(session.participants[0].rate_per_second, 0.05);
    assert_eq!(session.total_meeting_cost, 2.5);

    repo.save(&session).await.unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(repo.path()).unwrap()).unwrap();
    assert_eq!(value["version"], "1.0.0");
}
