//! Synchronous client for the school's **GraphQL endpoint**.
//!
//! One query fetches everything the dashboard shows: identity, audit totals, skills, XP per
//! project and the matching progress timestamps. The result is the first element of
//! `data.user`, decoded into [`UserProfile`].
//!
//! ### Notes
//! - Requests carry the JWT as a `Bearer` token.
//! - The exclusion pattern travels as a GraphQL variable (`$exclude`), so it never needs
//!   escaping inside the query text.
//! - A `200 OK` can still carry an `errors` array; it is surfaced as an error.
//!
//! Typical usage:
//! ```no_run
//! # use xp_dashboard::{Client, config::DEFAULT_ENDPOINT};
//! let client = Client::new(DEFAULT_ENDPOINT)?;
//! let profile = client.fetch_profile("header.payload.signature", "piscine-(go|js)")?;
//! println!("{}", profile.login);
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::models::UserProfile;
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info, warn};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::{Value, json};
use std::time::Duration;

pub const PROFILE_QUERY: &str = r#"
query ($exclude: String!) {
  user {
    login
    auditRatio
    totalUp
    totalDown
    audits_aggregate(where: { grade: { _neq: 0 } }) {
      aggregate {
        count
      }
    }
    attrs
    transactions(
      order_by: [{ type: asc }, { amount: desc }]
      distinct_on: [type]
      where: { type: { _like: "skill_%" } }
    ) {
      type
      amount
    }
    xps(
      where: { path: { _nregex: $exclude } }
      order_by: { amount: asc }
    ) {
      amount
      path
    }
    progresses(
      order_by: { createdAt: asc }
      where: { path: { _nregex: $exclude } }
    ) {
      createdAt
      path
    }
  }
}
"#;

/// Pause before each retry; the first attempt goes out immediately.
const RETRY_BACKOFF_MS: [u64; 3] = [0, 100, 300];

#[derive(Debug, Clone)]
pub struct Client {
    pub endpoint: String,
    http: HttpClient,
}

impl Client {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("xp-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    /// Fetch the signed-in user's profile.
    ///
    /// `exclude` is a POSIX regex; XP and progress rows whose path matches it are skipped by
    /// the server.
    ///
    /// ### Errors
    /// - Network/HTTP error (5xx and transport failures get three attempts)
    /// - GraphQL `errors` payload (first message is surfaced)
    /// - Missing `data.user[0]`
    pub fn fetch_profile(&self, token: &str, exclude: &str) -> Result<UserProfile> {
        let body = json!({
            "query": PROFILE_QUERY,
            "variables": { "exclude": exclude },
        });
        let v = self
            .post_json(token, &body)
            .with_context(|| format!("POST {}", self.endpoint))?;
        let profile = parse_profile_response(&v)?;
        info!(
            "fetched profile for {} ({} xp rows, {} progress rows)",
            profile.login,
            profile.xps.len(),
            profile.progresses.len()
        );
        Ok(profile)
    }

    /// Small retry for transient failures (5xx / network errors).
    fn post_json(&self, token: &str, body: &Value) -> Result<Value> {
        let mut last_err: Option<anyhow::Error> = None;
        for (attempt, backoff_ms) in RETRY_BACKOFF_MS.into_iter().enumerate() {
            if attempt > 0 {
                std::thread::sleep(Duration::from_millis(backoff_ms));
            }
            match self.http.post(&self.endpoint).bearer_auth(token).json(body).send() {
                Ok(r) if r.status().is_success() => {
                    return r.json().context("decode json");
                }
                Ok(r) if r.status().is_server_error() => {
                    warn!("server error {} on attempt {}", r.status(), attempt + 1);
                    last_err = Some(anyhow!("HTTP {}", r.status()));
                }
                Ok(r) => {
                    let status = r.status();
                    let body: Option<Value> = r.json().ok();
                    let msg = body
                        .as_ref()
                        .and_then(first_error_message)
                        .unwrap_or("Network response was not ok")
                        .to_string();
                    bail!("request failed with HTTP {status}: {msg}");
                }
                Err(e) => {
                    debug!("transport error: {e}");
                    last_err = Some(e.into());
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| anyhow!("no attempt made"))
            .context("network error"))
    }
}

fn first_error_message(v: &Value) -> Option<&str> {
    v.get("errors")?.get(0)?.get("message")?.as_str()
}

/// Decode a GraphQL response body into the first user.
pub fn parse_profile_response(v: &Value) -> Result<UserProfile> {
    if let Some(msg) = first_error_message(v) {
        bail!("graphql error: {msg}");
    }
    let user = extract_user(v)?;
    serde_json::from_value(user.clone()).context("parse user profile")
}

/// `data.user[0]` of a response.
pub fn extract_user(v: &Value) -> Result<&Value> {
    v.get("data")
        .and_then(|d| d.get("user"))
        .and_then(|u| u.get(0))
        .ok_or_else(|| anyhow!("user data not found in response"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_endpoint_reports_the_transport_error() {
        // Nothing listens on the discard port.
        let client = Client::new("http://127.0.0.1:9/graphql").unwrap();
        let started = std::time::Instant::now();
        let err = client.post_json("a.b.c", &json!({})).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.starts_with("network error: "), "{msg}");
        assert!(!msg.contains("Some("), "{msg}");
        // Two pauses between three attempts, none after the last.
        assert!(started.elapsed() < Duration::from_millis(1000));
    }

    #[test]
    fn missing_user_is_an_error() {
        let v = json!({ "data": { "user": [] } });
        let err = parse_profile_response(&v).unwrap_err();
        assert!(err.to_string().contains("user data not found"));
    }

    #[test]
    fn graphql_errors_are_surfaced() {
        let v = json!({ "errors": [{ "message": "Could not verify JWT: JWTExpired" }] });
        let err = parse_profile_response(&v).unwrap_err();
        assert!(err.to_string().contains("JWTExpired"));
    }
}
