// src/core/net.rs
//
// Blocking HTTP with a cookie jar. One `Session` carries the login cookies
// from the login form to the export request.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::redirect;

use crate::config::consts::USER_AGENT;
use crate::error::{ExportError, Result};

const MAX_REDIRECTS: usize = 10;

/// A successful (2xx) response, fully read.
#[derive(Debug)]
pub struct Fetched {
    pub status: u16,
    /// URL after redirects were followed.
    pub final_url: String,
    pub body: Vec<u8>,
}

impl Fetched {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Authenticated (or about to be) browser-like session.
pub struct Session {
    client: Client,
}

impl Session {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| ExportError::transport("<client>", e))?;
        Ok(Self { client })
    }

    pub fn get(&self, url: &str) -> Result<Fetched> {
        logd!("GET {}", url);
        let resp = self.client.get(url).send().map_err(|e| send_error(url, e))?;
        read_success(url, resp)
    }

    /// POST an urlencoded form. Field values are not logged.
    pub fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Fetched> {
        logd!("POST {} ({} fields)", url, fields.len());
        let resp = self.client.post(url).form(fields).send().map_err(|e| send_error(url, e))?;
        read_success(url, resp)
    }
}

fn send_error(url: &str, e: reqwest::Error) -> ExportError {
    let reason = if e.is_timeout() { format!("timed out ({e})") } else { e.to_string() };
    loge!("{} failed: {}", url, reason);
    ExportError::transport(url, reason)
}

fn read_success(url: &str, resp: Response) -> Result<Fetched> {
    let status = resp.status();
    if !status.is_success() {
        loge!("{} answered {}", url, status);
        return Err(ExportError::transport(url, format!("status {status}")));
    }
    let final_url = resp.url().to_string();
    let body = resp.bytes().map_err(|e| send_error(url, e))?.to_vec();
    logd!("{} -> {} ({} bytes, final url {})", url, status, body.len(), final_url);
    Ok(Fetched { status: status.as_u16(), final_url, body })
}
