// src/portal/login.rs
use std::time::Duration;

use crate::config::consts::{LOGIN_MARKER, TOKEN_FIELD};
use crate::config::options::Credentials;
use crate::core::html::extract_token;
use crate::core::net::Session;
use crate::error::{ExportError, Result};

/// Log in through the portal's form and hand back the cookie-carrying session.
///
/// 1. GET the login page and scrape its anti-forgery token.
/// 2. POST `username`, `password` and `_token` to the submit URL.
/// 3. Landing back on a URL that still says "login" means rejected credentials.
pub fn authenticate(
    login_page_url: &str,
    login_submit_url: &str,
    credentials: &Credentials,
    timeout: Duration,
) -> Result<Session> {
    let session = Session::new(timeout)?;

    let page = session.get(login_page_url)?;
    let token = extract_token(&page.text())
        .ok_or_else(|| ExportError::AuthTokenMissing(TOKEN_FIELD.to_string()))?;
    logf!("login: token captured from {}", login_page_url);

    let form = [
        ("username", credentials.username.as_str()),
        ("password", credentials.password.as_str()),
        (TOKEN_FIELD, token.as_str()),
    ];
    let landed = session.post_form(login_submit_url, &form)?;

    if is_login_url(&landed.final_url) {
        loge!("login: rejected for user {}, landed on {}", credentials.username, landed.final_url);
        return Err(ExportError::AuthenticationFailed(landed.final_url));
    }

    logf!("login: ok as {}, landed on {}", credentials.username, landed.final_url);
    Ok(session)
}

pub fn is_login_url(url: &str) -> bool {
    url.to_ascii_lowercase().contains(LOGIN_MARKER)
}
