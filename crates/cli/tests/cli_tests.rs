//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("ordsky").unwrap()
}

fn get_fixture_path(name: &str) -> String {
    format!("{}/../../tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Working directory with a stopword list, since the CLI reads its
/// configuration from fixed paths relative to where it runs.
fn workdir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("boring_words.txt"), "og i på fra det en er").unwrap();
    dir
}

#[test]
fn test_cli_no_args() {
    cmd().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_missing_stopword_list() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .arg(get_fixture_path("article.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("stopword list"));
}

#[test]
fn test_cli_file_input_writes_artifact() {
    let dir = workdir();

    cmd()
        .current_dir(dir.path())
        .arg(get_fixture_path("article.html"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote"));

    let images: Vec<_> = std::fs::read_dir(dir.path().join("images")).unwrap().collect();
    assert_eq!(images.len(), 1);
}

#[test]
fn test_cli_combine_writes_single_cloud() {
    let dir = workdir();

    cmd()
        .current_dir(dir.path())
        .arg(get_fixture_path("article.html"))
        .arg(get_fixture_path("second_article.html"))
        .arg("--combine")
        .assert()
        .success();

    assert!(dir.path().join("images").join("cloud.png").exists());

    let images: Vec<_> = std::fs::read_dir(dir.path().join("images")).unwrap().collect();
    assert_eq!(images.len(), 1);
}

#[test]
fn test_cli_empty_page_fails_with_invalid_format() {
    let dir = workdir();

    cmd()
        .current_dir(dir.path())
        .arg(get_fixture_path("empty_content.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid page format"));
}

#[test]
fn test_cli_failing_input_does_not_stop_others() {
    let dir = workdir();

    cmd()
        .current_dir(dir.path())
        .arg(get_fixture_path("empty_content.html"))
        .arg(get_fixture_path("article.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrote"));

    let images: Vec<_> = std::fs::read_dir(dir.path().join("images")).unwrap().collect();
    assert_eq!(images.len(), 1);
}

#[test]
fn test_cli_combine_aborts_on_failing_input() {
    let dir = workdir();

    cmd()
        .current_dir(dir.path())
        .arg(get_fixture_path("article.html"))
        .arg(get_fixture_path("empty_content.html"))
        .arg("--combine")
        .assert()
        .failure();

    assert!(!dir.path().join("images").join("cloud.png").exists());
}

#[test]
fn test_cli_post_without_credentials() {
    let dir = workdir();

    cmd()
        .current_dir(dir.path())
        .arg(get_fixture_path("article.html"))
        .arg("--post")
        .assert()
        .failure()
        .stderr(predicate::str::contains("credentials"));
}

#[test]
fn test_cli_post_with_malformed_credentials() {
    let dir = workdir();
    let secrets = serde_json::json!({ "consumer_key": "ck" });
    std::fs::write(dir.path().join("SECRETS.json"), secrets.to_string()).unwrap();

    cmd()
        .current_dir(dir.path())
        .arg(get_fixture_path("article.html"))
        .arg("--post")
        .assert()
        .failure()
        .stderr(predicate::str::contains("credentials"));
}

#[test]
fn test_cli_verbose() {
    let dir = workdir();

    cmd()
        .current_dir(dir.path())
        .args(["-v", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Ordsky"));
}

#[test]
fn test_cli_rerun_is_idempotent() {
    let dir = workdir();

    for _ in 0..2 {
        cmd()
            .current_dir(dir.path())
            .arg(get_fixture_path("article.html"))
            .assert()
            .success();
    }

    let images: Vec<_> = std::fs::read_dir(dir.path().join("images")).unwrap().collect();
    assert_eq!(images.len(), 1);
}
