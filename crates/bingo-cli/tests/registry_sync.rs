//! Integration tests for the registration run.
//!
//! A fake registry is served with axum on a loopback port and the run
//! pipeline is pointed at it through the config's API base.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::put,
    Router,
};
use bingo_cli::config::{Config, APP_ID_VAR, TOKEN_VAR};
use bingo_cli::runner::{run, RunOptions};
use bingo_types::Command;
use std::sync::{Arc, Mutex};

/// A PUT the fake registry received.
#[derive(Debug, Clone)]
struct SeenRequest {
    application_id: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: String,
}

#[derive(Clone)]
struct FakeRegistry {
    status: StatusCode,
    reply: &'static str,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

async fn replace_commands(
    State(registry): State<FakeRegistry>,
    Path(application_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, &'static str) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    registry.seen.lock().unwrap().push(SeenRequest {
        application_id,
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    });
    (registry.status, registry.reply)
}

/// Start a fake registry; returns its API base and the request log.
async fn start_registry(
    status: StatusCode,
    reply: &'static str,
) -> (String, Arc<Mutex<Vec<SeenRequest>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let registry = FakeRegistry {
        status,
        reply,
        seen: seen.clone(),
    };
    let app = Router::new()
        .route(
            "/api/v10/applications/{application_id}/commands",
            put(replace_commands),
        )
        .with_state(registry);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/v10", addr), seen)
}

fn config_for(api_base: String) -> Config {
    Config {
        api_base,
        timeout_secs: 5,
        ..Config::default()
    }
}

fn credentials(key: &str) -> Option<String> {
    match key {
        TOKEN_VAR => Some("test-token".to_string()),
        APP_ID_VAR => Some("987654321".to_string()),
        _ => None,
    }
}

#[tokio::test]
async fn test_successful_replace_echoes_catalog() {
    let (api_base, seen) = start_registry(StatusCode::OK, "[]").await;

    let report = run(&config_for(api_base), credentials, RunOptions::default()).await;

    assert!(report.success);
    assert_eq!(report.exit_code(), 0);
    let status = report.commands_status.as_ref().unwrap();
    assert_eq!(status.status, Some(200));
    assert_eq!(status.message.as_deref(), Some("Successfully registered commands!"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let request = &seen[0];
    assert_eq!(request.application_id, "987654321");
    assert_eq!(request.authorization.as_deref(), Some("Bot test-token"));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));

    let submitted: Vec<Command> = serde_json::from_str(&request.body).unwrap();
    assert_eq!(status.commands.as_ref(), Some(&submitted));
    assert_eq!(submitted.len(), 11);
    assert!(
        report
            .invite_url
            .as_deref()
            .unwrap()
            .contains("client_id=987654321&scope=bot%20applications.commands")
    );
}

#[tokio::test]
async fn test_unauthorized_preserves_raw_body() {
    let body = "{\"message\": \"401: Unauthorized\", \"code\": 0}";
    let (api_base, seen) = start_registry(StatusCode::UNAUTHORIZED, body).await;

    let report = run(&config_for(api_base), credentials, RunOptions::default()).await;

    assert!(!report.success);
    assert_eq!(report.exit_code(), 1);
    let status = report.commands_status.as_ref().unwrap();
    assert!(!status.success);
    assert_eq!(status.status, Some(401));
    assert_eq!(status.response.as_deref(), Some(body));
    assert_eq!(status.error.as_deref(), Some("Failed to register commands: 401"));
    assert!(status.commands.is_none());
    assert_eq!(seen.lock().unwrap().len(), 1);
    // The link does not depend on the sync result.
    assert!(report.invite_url.is_some());
}

#[tokio::test]
async fn test_missing_credentials_make_no_requests() {
    let (api_base, seen) = start_registry(StatusCode::OK, "[]").await;

    for lookup in [
        (|_: &str| None) as fn(&str) -> Option<String>,
        |key: &str| (key == TOKEN_VAR).then(|| "test-token".to_string()),
        |key: &str| (key == APP_ID_VAR).then(|| "987654321".to_string()),
    ] {
        let report = run(&config_for(api_base.clone()), lookup, RunOptions::default()).await;
        assert!(!report.success);
        assert_eq!(report.exit_code(), 1);
        assert!(report.error.unwrap().starts_with("Configuration error"));
        assert!(report.commands_status.is_none());
        assert!(report.invite_url.is_none());
    }

    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dry_run_makes_no_requests() {
    let (api_base, seen) = start_registry(StatusCode::OK, "[]").await;

    let report = run(&config_for(api_base), credentials, RunOptions { dry_run: true }).await;

    assert!(report.success);
    assert!(report.commands_status.unwrap().dry_run);
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_registry_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let report = run(
        &config_for(format!("http://{}/api/v10", addr)),
        credentials,
        RunOptions::default(),
    )
    .await;

    assert!(!report.success);
    let status = report.commands_status.unwrap();
    assert!(status.error.unwrap().starts_with("Transport error"));
    assert_eq!(status.status, None);
    assert_eq!(status.response, None);
}
