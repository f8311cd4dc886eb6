use std::path::Path;

use clap::Parser;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::*;

/// Serve one canned HTTP response and return a context pointing at it.
async fn serve_once(status: &'static str, body: &'static str) -> CliContext {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        socket.read(&mut buf).await.unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
    });
    CliContext { base_url: format!("http://{addr}"), client: reqwest::Client::new() }
}

#[test]
fn endpoint_joins_without_double_slash() {
    assert_eq!(endpoint("http://localhost:3000/", "/spaces"), "http://localhost:3000/spaces");
    assert_eq!(endpoint("http://localhost:3000", "/route"), "http://localhost:3000/route");
}

#[test]
fn error_message_prefers_message_field() {
    let body = json!({ "status": "error", "message": "No schedule loaded yet." });
    assert_eq!(error_message(&body), "No schedule loaded yet.");
    assert_eq!(error_message(&Value::Null), "null");
}

#[test]
fn upload_name_is_final_component() {
    assert_eq!(upload_name(Path::new("/tmp/plans/level1.png")), "level1.png");
    assert_eq!(upload_name(Path::new("/")), "upload");
}

#[test]
fn parses_space_add() {
    let cli = Cli::try_parse_from(["hallplan-cli", "spaces", "add", "Room 101", "--type", "Office", "--x", "0.2", "--y", "0.4"])
        .unwrap();
    let Command::Spaces(SpacesCommand { command: SpacesSubcommand::Add { name, kind, x, y } }) = cli.command else {
        panic!("expected spaces add");
    };
    assert_eq!(name, "Room 101");
    assert_eq!(kind, "Office");
    assert!((x - 0.2).abs() < f64::EPSILON);
    assert!((y - 0.4).abs() < f64::EPSILON);
}

#[test]
fn parses_route_and_base_url() {
    let cli = Cli::try_parse_from(["hallplan-cli", "--base-url", "http://plans:8080", "route", "1", "3"]).unwrap();
    assert_eq!(cli.base_url, "http://plans:8080");
    assert!(matches!(cli.command, Command::Route { from_space_id: 1, to_space_id: 3 }));
}

#[tokio::test]
async fn success_with_undecodable_body_is_an_error() {
    let ctx = serve_once("200 OK", "not json").await;
    let result = api_request(&ctx, reqwest::Method::GET, "/spaces", None).await;
    assert!(matches!(result, Err(CliError::Http(_))));
}

#[tokio::test]
async fn error_status_reports_server_message() {
    let ctx = serve_once("404 Not Found", r#"{"status":"error","message":"space not found: 9"}"#).await;
    let result = api_request(&ctx, reqwest::Method::DELETE, "/spaces/9", None).await;
    let Err(CliError::ServerError { status, message }) = result else {
        panic!("expected server error, got {result:?}");
    };
    assert_eq!(status, "HTTP 404");
    assert_eq!(message, "space not found: 9");
}

#[tokio::test]
async fn success_returns_body() {
    let ctx = serve_once("200 OK", r#"{"status":"ok","spaces":[]}"#).await;
    let value = api_request(&ctx, reqwest::Method::GET, "/spaces", None).await.unwrap();
    assert_eq!(value, json!({ "status": "ok", "spaces": [] }));
}
