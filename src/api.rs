//! Synchronous client for the **REST Countries API (v3.1)** `name/{name}` endpoint.
//!
//! One GET per lookup, no retries. The response is a JSON array of country objects;
//! only the first one is kept and handed to [`crate::models::parse`].
//!
//! Typical usage:
//! ```no_run
//! # use country_stats::{Client, models};
//! let client = Client::default();
//! let raw = client.fetch("France")?;
//! let country = models::parse(Some(&raw))?;
//! # Ok::<(), country_stats::Failure>(())
//! ```
use crate::config::Config;
use crate::error::Failure;
use crate::models::RawRecord;
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

/// Anything that can turn a country name into a raw record.
///
/// [`Client`] talks to the network; tests plug in canned sources.
pub trait CountrySource {
    fn fetch(&self, country_name: &str) -> Result<RawRecord, Failure>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Client {
    /// Build a client from explicit settings.
    ///
    /// `config.timeout` caps the whole request; connecting is capped at the same value
    /// or 10s, whichever is smaller.
    pub fn new(config: &Config) -> Result<Self, Failure> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(Duration::from_secs(10)))
            .redirect(Policy::limited(5))
            .user_agent(concat!("country-stats/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Failure::Request(format!("could not build http client: {e}")))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// URL for one lookup: `{base_url}/{encoded name}`.
    pub fn url_for(&self, country_name: &str) -> String {
        format!("{}/{}", self.base_url, encode(country_name))
    }

    /// Look up one country by name.
    ///
    /// ### Errors
    /// - [`Failure::MissingInput`] for a blank name (no request is sent)
    /// - [`Failure::Request`] on network errors, timeouts, non-2xx statuses, a body
    ///   that is not JSON, or an error object from the API (its message is kept)
    /// - [`Failure::NotFound`] when the API returns an empty array
    /// - [`Failure::SchemaMismatch`] when the body is JSON but neither an array nor an
    ///   error object
    pub fn fetch(&self, country_name: &str) -> Result<RawRecord, Failure> {
        let name = country_name.trim();
        if name.is_empty() {
            return Err(Failure::MissingInput);
        }
        let url = self.url_for(name);
        debug!("GET {url}");

        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            // the API explains most failures in a small JSON object
            let detail = resp
                .text()
                .ok()
                .and_then(|t| serde_json::from_str::<Value>(&t).ok())
                .and_then(|v| api_message(&v));
            return Err(Failure::Request(match detail {
                Some(msg) => format!("GET {url} returned HTTP {status}: {msg}"),
                None => format!("GET {url} returned HTTP {status}"),
            }));
        }
        let body: Value = resp
            .json()
            .map_err(|e| Failure::Request(format!("decode json from {url}: {e}")))?;
        decode_body(name, body)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(&Config::default()).expect("reqwest client build")
    }
}

impl CountrySource for Client {
    fn fetch(&self, country_name: &str) -> Result<RawRecord, Failure> {
        Client::fetch(self, country_name)
    }
}

// Encode everything except unreserved characters; names like "Côte d'Ivoire" and
// "United States" must survive as a single path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn encode(segment: &str) -> String {
    percent_encoding::utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Keys an error payload may carry its human-readable message under.
const MESSAGE_KEYS: [&str; 3] = ["message", "Error Message", "Note"];

/// The message of an API error payload such as `{"status":404,"message":"Not Found"}`.
pub fn api_message(v: &Value) -> Option<String> {
    MESSAGE_KEYS
        .iter()
        .find_map(|k| v.get(*k)?.as_str())
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Pick the first country out of a decoded response body.
pub fn decode_body(country_name: &str, body: Value) -> Result<RawRecord, Failure> {
    if let Some(msg) = body.as_object().and_then(|_| api_message(&body)) {
        return Err(Failure::Request(format!("api error: {msg}")));
    }
    match body {
        Value::Array(items) => items
            .into_iter()
            .next()
            .map(RawRecord)
            .ok_or_else(|| Failure::NotFound(country_name.to_string())),
        other => Err(Failure::SchemaMismatch(format!(
            "expected a JSON array of countries, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use serde_json::json;

    #[test]
    fn empty_array_is_not_found() {
        let err = decode_body("Atlantis", json!([])).unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn first_element_is_kept() {
        let body = json!([{"name": {"common": "Niger"}}, {"name": {"common": "Nigeria"}}]);
        let raw = decode_body("niger", body).unwrap();
        assert_eq!(raw.0["name"]["common"], "Niger");
    }

    #[test]
    fn error_object_keeps_api_message() {
        let err = decode_body("x", json!({"status": 404, "message": "Not Found"})).unwrap_err();
        assert_eq!(err.kind(), FailureKind::RequestError);
        assert_eq!(err.to_string(), "request failed: api error: Not Found");

        let err = decode_body("x", json!({"Note": "rate limit reached"})).unwrap_err();
        assert!(err.to_string().contains("rate limit reached"));
    }

    #[test]
    fn other_object_body_is_schema_mismatch() {
        let err = decode_body("x", json!({"status": 200})).unwrap_err();
        assert_eq!(err.kind(), FailureKind::SchemaMismatch);
        assert!(err.to_string().contains("an object"));

        let err = decode_body("x", json!({"message": ""})).unwrap_err();
        assert_eq!(err.kind(), FailureKind::SchemaMismatch);
    }

    #[test]
    fn names_are_encoded_as_one_segment() {
        let cfg = Config {
            base_url: "https://example.test/v3.1/name/".into(),
            ..Config::default()
        };
        let client = Client::new(&cfg).unwrap();
        assert_eq!(
            client.url_for("United States"),
            "https://example.test/v3.1/name/United%20States"
        );
        assert_eq!(client.url_for("a/b"), "https://example.test/v3.1/name/a%2Fb");
    }

    #[test]
    fn blank_name_never_hits_the_network() {
        let cfg = Config {
            base_url: "http://127.0.0.1:9".into(),
            ..Config::default()
        };
        let client = Client::new(&cfg).unwrap();
        let err = client.fetch("   ").unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingInput);
    }
}
