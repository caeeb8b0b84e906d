use arena_domain::ModelError;
use arena_domain::models::{Generation, GenerationId, GenerationKind, Vote, VoteId};
use chrono::{DateTime, Utc};
use serde_json::json;

fn ts(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("valid RFC 3339 timestamp")
}

fn gid(raw: &str) -> GenerationId {
    GenerationId::new(raw).expect("non-empty id")
}

#[test]
fn generation_deserializes_from_original_field_names() {
    let raw = json!({
        "id": "gen-1",
        "content": "https://cdn.example.com/cat.png",
        "type": "image",
        "elo_rating": 1012.5,
        "created_at": "2025-08-01T10:00:00Z"
    });

    let generation: Generation = serde_json::from_value(raw).expect("generation deserialize");
    assert_eq!(generation.id().as_str(), "gen-1");
    assert_eq!(generation.kind(), GenerationKind::Image);
    assert!((generation.elo_rating() - 1012.5).abs() < f64::EPSILON);
    assert_eq!(generation.created_at(), ts("2025-08-01T10:00:00Z"));
}

#[test]
fn generation_serializes_type_field() {
    let generation =
        Generation::new(gid("gen-2"), GenerationKind::Text, "a haiku", 1000.0, ts("2025-08-01T10:00:00Z"))
            .expect("valid generation");

    let value = serde_json::to_value(&generation).expect("serialize");
    assert_eq!(value["type"], "text");
    assert_eq!(value["elo_rating"], 1000.0);
    assert!(value.get("kind").is_none());
}

#[test]
fn unknown_generation_type_is_rejected() {
    let raw = json!({
        "id": "gen-3",
        "content": "clip.mp4",
        "type": "video",
        "elo_rating": 1000.0,
        "created_at": "2025-08-01T10:00:00Z"
    });

    assert!(serde_json::from_value::<Generation>(raw).is_err());

    let err = "video".parse::<GenerationKind>().expect_err("only image and text are valid");
    assert!(matches!(err, ModelError::InvalidKind { .. }));
}

#[test]
fn generation_payload_is_checked_against_type() {
    let raw = json!({
        "id": "gen-4",
        "content": "not a url",
        "type": "image",
        "elo_rating": 1000.0,
        "created_at": "2025-08-01T10:00:00Z"
    });

    assert!(serde_json::from_value::<Generation>(raw).is_err());
}

#[test]
fn applying_a_rating_never_touches_created_at() {
    let created = ts("2025-08-01T10:00:00Z");
    let mut generation =
        Generation::new(gid("gen-5"), GenerationKind::Text, "prose", 1000.0, created)
            .expect("valid generation");

    let previous = generation.apply_rating(1016.0).expect("finite rating");
    assert!((previous - 1000.0).abs() < f64::EPSILON);
    assert!((generation.elo_rating() - 1016.0).abs() < f64::EPSILON);
    assert_eq!(generation.created_at(), created);

    assert!(generation.apply_rating(f64::NAN).is_err());
    assert!((generation.elo_rating() - 1016.0).abs() < f64::EPSILON);
}

#[test]
fn vote_requires_distinct_generations() {
    let vote_id = VoteId::new("vote-1").expect("non-empty id");
    let err = Vote::new(vote_id, gid("gen-1"), gid("gen-1"), Utc::now())
        .expect_err("self votes are not well-formed");
    assert!(matches!(err, ModelError::SelfVote { .. }));
}

#[test]
fn vote_deserialization_enforces_invariants() {
    let ok = json!({
        "id": "vote-1",
        "winner_id": "gen-1",
        "loser_id": "gen-2",
        "created_at": "2025-08-01T10:05:00Z"
    });
    let vote: Vote = serde_json::from_value(ok).expect("vote deserialize");
    assert_eq!(vote.winner_id().as_str(), "gen-1");
    assert_eq!(vote.loser_id().as_str(), "gen-2");
    assert!(vote.involves(&gid("gen-2")));
    assert!(!vote.involves(&gid("gen-3")));

    let same = json!({
        "id": "vote-2",
        "winner_id": "gen-1",
        "loser_id": "gen-1",
        "created_at": "2025-08-01T10:05:00Z"
    });
    assert!(serde_json::from_value::<Vote>(same).is_err());

    let blank = json!({
        "id": "vote-3",
        "winner_id": "",
        "loser_id": "gen-1",
        "created_at": "2025-08-01T10:05:00Z"
    });
    assert!(serde_json::from_value::<Vote>(blank).is_err());
}
