//! JSON request helper with the Django CSRF header attached.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Header/method/status rules are plain functions so they are testable
//! without a browser.
//!
//! ERROR HANDLING
//! ==============
//! A non-2xx status, a transport failure, or an undecodable body is logged,
//! shown to the user as an `error` notification, and then returned to the
//! caller. Nothing is retried.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::AdminError;
use crate::state::notification::{NotificationCoordinator, NotificationKind};

pub const CSRF_HEADER: &str = "X-CSRFToken";
/// `name` of the hidden input Django renders inside every form.
pub const CSRF_FIELD_NAME: &str = "csrfmiddlewaretoken";
pub const REQUEST_FAILED_MESSAGE: &str = "Erro na requisição. Tente novamente.";

/// Caller options, mirroring the subset of `fetch` init the admin pages use.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    pub method: Option<String>,
    pub headers: BTreeMap<String, String>,
    /// A string is sent verbatim; any other JSON value is serialized.
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    /// Parse options passed from page script. An empty string means defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Decode`] when `raw` is not an options object.
    pub fn from_json(raw: &str) -> Result<Self, AdminError> {
        if raw.trim().is_empty() || raw.trim() == "null" {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Upper-cased method, `GET` by default.
    pub fn method(&self) -> String {
        self.method
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map_or_else(|| "GET".to_owned(), str::to_ascii_uppercase)
    }

    /// Default JSON + CSRF headers, overridden per name (case-insensitive)
    /// by caller headers.
    pub fn resolved_headers(&self, csrf_token: &str) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Content-Type".to_owned(), "application/json".to_owned()),
            (CSRF_HEADER.to_owned(), csrf_token.to_owned()),
        ];
        for (name, value) in &self.headers {
            match headers.iter_mut().find(|(existing, _)| existing.eq_ignore_ascii_case(name)) {
                Some(slot) => slot.1.clone_from(value),
                None => headers.push((name.clone(), value.clone())),
            }
        }
        headers
    }

    pub fn body_text(&self) -> Option<String> {
        match &self.body {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// Treat anything outside 2xx as a failure.
///
/// # Errors
///
/// Returns [`AdminError::Http`] for non-2xx statuses.
pub fn check_status(status: u16) -> Result<(), AdminError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(AdminError::Http { status })
    }
}

/// Log a failed request and tell the user about it.
pub fn report_failure(notifications: &NotificationCoordinator, err: &AdminError) {
    log::error!("Ajax request failed: {err}");
    notifications.show(NotificationKind::Error, REQUEST_FAILED_MESSAGE);
}

/// Send one request and decode the JSON response.
///
/// # Errors
///
/// Returns [`AdminError::Http`] for non-2xx responses, [`AdminError::Transport`]
/// when no response arrives, and [`AdminError::Decode`] for a non-JSON body.
pub async fn send_json(url: &str, options: &RequestOptions, csrf_token: &str) -> Result<serde_json::Value, AdminError> {
    #[cfg(feature = "hydrate")]
    {
        use gloo_net::http::Request;

        let transport = |e: gloo_net::Error| AdminError::Transport(e.to_string());
        let method = options.method();
        let mut builder = match method.as_str() {
            "GET" => Request::get(url),
            "POST" => Request::post(url),
            "PUT" => Request::put(url),
            "PATCH" => Request::patch(url),
            "DELETE" => Request::delete(url),
            other => return Err(AdminError::Transport(format!("unsupported method: {other}"))),
        };
        for (name, value) in options.resolved_headers(csrf_token) {
            builder = builder.header(&name, &value);
        }
        let response = match options.body_text() {
            Some(body) => builder.body(body).map_err(transport)?.send().await,
            None => builder.send().await,
        }
        .map_err(transport)?;

        check_status(response.status())?;
        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| AdminError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, options, csrf_token);
        Err(AdminError::Transport("not available outside the browser".to_owned()))
    }
}

/// [`send_json`], surfacing any failure through the notification coordinator
/// before handing it back.
///
/// # Errors
///
/// Propagates every error from [`send_json`].
pub async fn request(
    notifications: &NotificationCoordinator,
    url: &str,
    options: &RequestOptions,
    csrf_token: &str,
) -> Result<serde_json::Value, AdminError> {
    let result = send_json(url, options, csrf_token).await;
    if let Err(err) = &result {
        report_failure(notifications, err);
    }
    result
}
