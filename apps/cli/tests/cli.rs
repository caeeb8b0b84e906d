use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn arena() -> Command {
    Command::cargo_bin("arena").unwrap()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn config_prints_defaults_as_camel_case_json() {
    let json = stdout_json(arena().arg("config"));

    assert_eq!(json["compatibilityDate"], "2025-07-15");
    assert_eq!(json["modules"].as_array().unwrap().len(), 5);
    assert_eq!(json["modules"][0], "@nuxtjs/supabase");
    assert_eq!(json["colorMode"]["preference"], "dark");
    assert_eq!(json["supabase"]["redirect"], false);
}

#[test]
fn config_reads_a_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arena.toml");
    fs::write(&path, "modules = [\"@nuxt/icon\"]\n\n[supabase]\nredirect = true\n").unwrap();

    let json = stdout_json(arena().args(["config", "--config"]).arg(&path));
    assert_eq!(json["modules"], serde_json::json!(["@nuxt/icon"]));
    assert_eq!(json["supabase"]["redirect"], true);
}

#[test]
fn config_env_overrides_apply_to_defaults() {
    let json = stdout_json(arena().arg("config").env("ARENA__SUPABASE__REDIRECT", "true"));

    assert_eq!(json["supabase"]["redirect"], true);
    assert_eq!(json["colorMode"]["preference"], "dark");
}

#[test]
fn config_env_overrides_win_over_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arena.toml");
    fs::write(&path, "[colorMode]\npreference = \"dark\"\nclassSuffix = \"\"\n").unwrap();

    let json = stdout_json(
        arena()
            .args(["config", "--config"])
            .arg(&path)
            .env("ARENA__COLOR_MODE__PREFERENCE", "light")
            .env("ARENA__SUPABASE__REDIRECT", "true"),
    );
    assert_eq!(json["colorMode"]["preference"], "light");
    assert_eq!(json["colorMode"]["classSuffix"], "");
    assert_eq!(json["supabase"]["redirect"], true);
}

#[test]
fn config_rejects_unknown_modules() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arena.toml");
    fs::write(&path, "modules = [\"@nuxtjs/i18n\"]\n").unwrap();

    arena()
        .args(["config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to bootstrap"));
}

#[test]
fn leaderboard_ranks_the_snapshot() {
    let json = stdout_json(arena().args(["leaderboard", "--data"]).arg(fixture("snapshot.json")));

    let ids: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["generation"]["id"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(ids, ["fox-haiku", "fox-render", "fox-limerick", "fox-sketch"]);
    assert_eq!(json[0]["rank"], 1);
    assert_eq!(json[0]["wins"], 2);
    assert_eq!(json[0]["generation"]["type"], "text");
}

#[test]
fn leaderboard_filters_by_kind_and_limit() {
    let json = stdout_json(
        arena()
            .args(["leaderboard", "--kind", "image", "--limit", "1", "--data"])
            .arg(fixture("snapshot.json")),
    );

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["generation"]["id"], "fox-render");
}

#[test]
fn leaderboard_rejects_unknown_kinds() {
    arena()
        .args(["leaderboard", "--kind", "video", "--data"])
        .arg(fixture("snapshot.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("video"));
}

#[test]
fn leaderboard_reports_dangling_votes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(
        &path,
        r#"{ "votes": [ { "id": "v", "winner_id": "a", "loser_id": "b", "created_at": "2025-07-15T10:00:00Z" } ] }"#,
    )
    .unwrap();

    arena()
        .args(["leaderboard", "--data"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown generation"));
}
