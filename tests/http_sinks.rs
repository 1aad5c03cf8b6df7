use eternotes::core::{ContactPayload, FieldName, FormFields};
use eternotes::sink::{RelaySink, RestSink, SinkError, SubmissionSink};
use eternotes::task::CancelToken;
use serde_json::Value;
use std::io::Read;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

struct Captured {
    method: String,
    path: String,
    body: Value,
}

/// Serves exactly one request with the given status and body, and hands the
/// request it saw back to the test.
fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<Captured>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind test server");
    let addr = server.server_addr().to_ip().expect("ip listener");
    let (ready_tx, ready_rx) = mpsc::channel();

    let handle = std::thread::spawn(move || {
        ready_tx.send(()).expect("signal ready");
        let mut request = server.recv().expect("receive request");
        let mut raw = String::new();
        request
            .as_reader()
            .read_to_string(&mut raw)
            .expect("read body");
        let captured = Captured {
            method: request.method().to_string(),
            path: request.url().to_string(),
            body: serde_json::from_str(&raw).expect("json body"),
        };
        let header = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
            .expect("header");
        let response = tiny_http::Response::from_string(body)
            .with_status_code(status)
            .with_header(header);
        request.respond(response).expect("respond");
        captured
    });

    ready_rx.recv().expect("server thread started");
    (format!("http://{addr}"), handle)
}

fn payload() -> ContactPayload {
    let mut fields = FormFields::default();
    fields.set(FieldName::Name, "Jo");
    fields.set(FieldName::Email, "jo@example.com");
    fields.set(FieldName::StudentYear, "junior");
    fields.set(FieldName::Instrument, "Drums");
    fields.set(FieldName::InterestSubject, "workshop");
    fields.set(FieldName::Message, "Hello there friend");
    ContactPayload::from_fields(&fields)
}

#[test]
fn rest_sink_accepts_200_and_posts_contact_body() {
    let (base, server) = serve_once(200, r#"{"ok":true}"#);
    let sink = RestSink::new(format!("{base}/api/contact"), TIMEOUT);

    let result = sink.deliver(&payload(), &CancelToken::new());
    let seen = server.join().expect("server thread");

    assert_eq!(result, Ok(()));
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/api/contact");
    assert_eq!(seen.body["name"], "Jo");
    assert_eq!(seen.body["year"], "junior");
    assert_eq!(seen.body["subject"], "workshop");
    assert!(seen.body.get("timestamp").is_none());
}

#[test]
fn rest_sink_surfaces_server_error_message() {
    let (base, server) = serve_once(500, r#"{"error":"Server unavailable"}"#);
    let sink = RestSink::new(format!("{base}/api/contact"), TIMEOUT);

    let result = sink.deliver(&payload(), &CancelToken::new());
    server.join().expect("server thread");

    let err = result.expect_err("500 must fail");
    assert_eq!(
        err,
        SinkError::Remote {
            status: 500,
            message: Some("Server unavailable".to_string()),
        }
    );
    assert_eq!(err.user_message(), "Server unavailable");
}

#[test]
fn rest_sink_treats_non_200_success_as_failure() {
    let (base, server) = serve_once(202, r#"{"queued":true}"#);
    let sink = RestSink::new(format!("{base}/api/contact"), TIMEOUT);

    let result = sink.deliver(&payload(), &CancelToken::new());
    server.join().expect("server thread");

    assert_eq!(
        result,
        Err(SinkError::Remote {
            status: 202,
            message: None,
        })
    );
}

#[test]
fn rest_sink_reports_unreachable_endpoint_as_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr")
    };
    let sink = RestSink::new(format!("http://{addr}/api/contact"), TIMEOUT);

    let result = sink.deliver(&payload(), &CancelToken::new());
    assert!(matches!(result, Err(SinkError::Transport(_))));
}

#[test]
fn relay_sink_ignores_response_status_and_stamps_time() {
    let (base, server) = serve_once(500, "not even json");
    let sink = RelaySink::new(format!("{base}/exec"), TIMEOUT);

    let result = sink.deliver(&payload(), &CancelToken::new());
    let seen = server.join().expect("server thread");

    assert_eq!(result, Ok(()));
    assert_eq!(seen.body["email"], "jo@example.com");
    let stamp = seen.body["timestamp"].as_str().expect("timestamp string");
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
}

#[test]
fn cancelled_token_short_circuits_http_sinks() {
    let token = CancelToken::new();
    token.cancel();

    let rest = RestSink::new("http://127.0.0.1:9/api/contact", TIMEOUT);
    let relay = RelaySink::new("http://127.0.0.1:9/exec", TIMEOUT);

    assert_eq!(rest.deliver(&payload(), &token), Err(SinkError::Cancelled));
    assert_eq!(relay.deliver(&payload(), &token), Err(SinkError::Cancelled));
}
