//! Integration tests for `plate profile`, `plate login` and `plate logout`
//! against a mock account service.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROJECT: &str = "food-app";

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Writes a stored session credential into the plate home.
fn store_session(home: &Path, secret: &str) -> PathBuf {
    let session_path = home.join("session.json");
    let session = json!({
        "session_id": "sess-1",
        "user_id": "user-1",
        "secret": secret,
        "created_at": "2024-01-01T00:00:00Z"
    });
    fs::write(&session_path, serde_json::to_string(&session).unwrap()).unwrap();
    session_path
}

fn plate(home: &TempDir, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("plate");
    cmd.env("PLATE_HOME", home.path())
        .env("PLATE_PROJECT", PROJECT)
        .env("PLATE_ENDPOINT", format!("{}/v1", server.uri()))
        .env_remove("PLATE_LOG")
        .env_remove("PLATE_PASSWORD");
    cmd
}

async fn mount_account(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .and(header("X-Appwrite-Project", PROJECT))
        .and(header("X-Appwrite-Session", "secret-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "$id": "user-1",
            "name": "Ana",
            "email": "ana@x.com",
            "phone": "",
            "prefs": { "addressWork": "1 Office Park" }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_profile_prints_rows_with_placeholders() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    store_session(home.path(), "secret-abc");
    mount_account(&server).await;

    plate(&home, &server)
        .arg("profile")
        .assert()
        .success()
        .stdout(predicate::str::contains("Full Name"))
        .stdout(predicate::str::contains("Ana"))
        .stdout(predicate::str::contains("ana@x.com"))
        .stdout(predicate::str::contains("+1 555 123 4567"))
        .stdout(predicate::str::contains("123 Main Street, Springfield, IL 62704"))
        .stdout(predicate::str::contains("1 Office Park"))
        .stdout(predicate::str::contains("assets/images/avatar.png"));
}

#[tokio::test]
async fn test_profile_json_output() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    store_session(home.path(), "secret-abc");
    mount_account(&server).await;

    let output = plate(&home, &server)
        .args(["profile", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["name"], "Ana");
    assert_eq!(value["email"], "ana@x.com");
    assert_eq!(value["address_work"], "1 Office Park");
    assert!(value.get("phone").is_none());
}

#[tokio::test]
async fn test_profile_requires_sign_in() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    plate(&home, &server)
        .arg("profile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[tokio::test]
async fn test_profile_failure_points_to_log() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    store_session(home.path(), "secret-abc");
    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Server Error",
            "code": 500
        })))
        .mount(&server)
        .await;

    plate(&home, &server)
        .arg("profile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("plate.log"));

    let log = fs::read_to_string(home.path().join("logs").join("plate.log")).unwrap();
    assert!(log.contains("failed to load user profile"), "log: {log}");
    assert!(log.contains("HTTP 500"), "log: {log}");
}

#[tokio::test]
async fn test_logout_deletes_session_and_redirects() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let session_path = store_session(home.path(), "secret-abc");
    Mock::given(method("DELETE"))
        .and(path("/v1/account/sessions/current"))
        .and(header("X-Appwrite-Session", "secret-abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    plate(&home, &server)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out."))
        .stdout(predicate::str::contains("Next: sign-in"));

    assert!(!session_path.exists());
}

#[tokio::test]
async fn test_logout_is_fail_open_when_service_rejects() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let session_path = store_session(home.path(), "stale-secret");
    Mock::given(method("DELETE"))
        .and(path("/v1/account/sessions/current"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Session not found",
            "code": 401
        })))
        .mount(&server)
        .await;

    plate(&home, &server)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out."))
        .stdout(predicate::str::contains("Next: sign-in"));

    assert!(!session_path.exists());
    let log = fs::read_to_string(home.path().join("logs").join("plate.log")).unwrap();
    assert!(log.contains("logout issue"), "log: {log}");
}

#[tokio::test]
async fn test_logout_without_session_makes_no_request() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    plate(&home, &server)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out."));

    let log = fs::read_to_string(home.path().join("logs").join("plate.log")).unwrap();
    assert!(log.contains("No session"), "log: {log}");
}

#[tokio::test]
async fn test_logout_with_unreadable_session_still_signs_out() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let session_path = home.path().join("session.json");
    fs::write(&session_path, "{not json").unwrap();
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    plate(&home, &server)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out."))
        .stdout(predicate::str::contains("Next: sign-in"));

    assert!(!session_path.exists());
    let log = fs::read_to_string(home.path().join("logs").join("plate.log")).unwrap();
    assert!(log.contains("ignoring unreadable stored session"), "log: {log}");
    assert!(log.contains("logout issue"), "log: {log}");
}

#[tokio::test]
async fn test_profile_with_unreadable_session_reports_signed_out() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    fs::write(home.path().join("session.json"), "{not json").unwrap();

    plate(&home, &server)
        .arg("profile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[tokio::test]
async fn test_login_stores_session_and_prints_user() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/account/sessions/email"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "$id": "sess-9",
            "userId": "user-1",
            "secret": "secret-abc"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_account(&server).await;

    plate(&home, &server)
        .args(["login", "--email", "ana@x.com"])
        .env("PLATE_PASSWORD", "hunter22")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as Ana <ana@x.com>"));

    let stored = fs::read_to_string(home.path().join("session.json")).unwrap();
    assert!(stored.contains("sess-9"));
}
