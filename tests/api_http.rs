use country_stats::config::Config;
use country_stats::error::FailureKind;
use country_stats::{Client, models};
use std::io::Read;
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

fn client_for(base_url: String, timeout: Duration) -> Client {
    let cfg = Config {
        base_url,
        timeout,
        ..Config::default()
    };
    Client::new(&cfg).unwrap()
}

#[test]
fn valid_array_yields_first_country() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/name/France")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"name":{"common":"France","official":"French Republic"},
                "population":67000000,"region":"Europe","borders":["BEL"]}]"#,
        )
        .create();

    let client = client_for(format!("{}/name", server.url()), Duration::from_secs(5));
    let raw = client.fetch("France").unwrap();
    let c = models::parse(Some(&raw)).unwrap();
    assert_eq!(c.name, "France");
    assert_eq!(c.population, 67_000_000);
    mock.assert();
}

#[test]
fn empty_array_is_not_found() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/name/Atlantis")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let client = client_for(format!("{}/name", server.url()), Duration::from_secs(5));
    let err = client.fetch("Atlantis").unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);
    assert_eq!(err.to_string(), "no country matched 'Atlantis'");
}

#[test]
fn error_status_is_request_error_with_api_message() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/name/Atlantis")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":404,"message":"Not Found"}"#)
        .create();

    let client = client_for(format!("{}/name", server.url()), Duration::from_secs(5));
    let err = client.fetch("Atlantis").unwrap_err();
    assert_eq!(err.kind(), FailureKind::RequestError);
    let msg = err.to_string();
    assert!(msg.contains("HTTP 404"), "{msg}");
    assert!(msg.ends_with(": Not Found"), "{msg}");
}

#[test]
fn error_status_without_json_body_is_request_error() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/name/France")
        .with_status(503)
        .with_body("upstream unavailable")
        .create();

    let client = client_for(format!("{}/name", server.url()), Duration::from_secs(5));
    let err = client.fetch("France").unwrap_err();
    assert_eq!(err.kind(), FailureKind::RequestError);
    assert!(err.to_string().contains("HTTP 503"));
}

#[test]
fn non_json_body_is_request_error() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/name/France")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create();

    let client = client_for(format!("{}/name", server.url()), Duration::from_secs(5));
    let err = client.fetch("France").unwrap_err();
    assert_eq!(err.kind(), FailureKind::RequestError);
    assert!(err.to_string().contains("decode json"));
}

#[test]
fn names_with_spaces_reach_the_server_encoded() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/name/United%20States")
        .with_status(200)
        .with_body(r#"[{"name":{"common":"United States"},"population":329484123,"region":"Americas"}]"#)
        .create();

    let client = client_for(format!("{}/name", server.url()), Duration::from_secs(5));
    assert!(client.fetch(" United States ").is_ok());
    mock.assert();
}

#[test]
fn slow_server_is_a_timeout() {
    // accepts the connection, then never answers within the client timeout
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            thread::sleep(Duration::from_secs(3));
        }
    });

    let client = client_for(format!("http://{addr}/name"), Duration::from_secs(1));
    let err = client.fetch("France").unwrap_err();
    assert_eq!(err.kind(), FailureKind::RequestError);
    assert!(err.to_string().contains("timed out"), "{err}");
    handle.join().unwrap();
}
