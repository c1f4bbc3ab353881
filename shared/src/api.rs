//! Gateway request descriptors and reply classification
//!
//! Every backend call goes to one path with an `action` query discriminator.
//! The browser implementation of [`PanelApi`] lives in the frontend crate;
//! everything here is transport-agnostic so it can be tested natively.

use serde::Deserialize;
use serde_json::Value;

use crate::de;

/// Backend actions the panel issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Session,
    GetAdmins,
    GetLogs,
    GetReputation,
    GetNames,
    GetOnlineStats,
    Logout,
    SwitchServer,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Session => "session",
            Action::GetAdmins => "get-admins",
            Action::GetLogs => "get-logs",
            Action::GetReputation => "get-reputation",
            Action::GetNames => "get-names",
            Action::GetOnlineStats => "get-online-stats",
            Action::Logout => "logout",
            Action::SwitchServer => "switch-server",
        }
    }

    pub fn default_method(&self) -> Method {
        match self {
            Action::Logout | Action::SwitchServer => Method::Post,
            _ => Method::Get,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A single call against the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub action: Action,
    pub params: Vec<(String, String)>,
    pub method: Method,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            params: Vec::new(),
            method: action.default_method(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// `action=<action>&k=v...`, values percent-encoded.
    pub fn query_string(&self) -> String {
        let mut query = format!("action={}", self.action.as_str());
        for (key, value) in &self.params {
            query.push('&');
            query.push_str(&urlencoding::encode(key));
            query.push('=');
            query.push_str(&urlencoding::encode(value));
        }
        query
    }

    /// Relative URL against the configured gateway path (e.g. `api.php`).
    pub fn url(&self, api_path: &str) -> String {
        format!("{}?{}", api_path, self.query_string())
    }

    /// Headers to send: JSON content type unless the caller overrode it.
    pub fn effective_headers(&self) -> Vec<(String, String)> {
        let overrides_content_type = self
            .headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE));
        let mut headers = Vec::with_capacity(self.headers.len() + 1);
        if !overrides_content_type {
            headers.push((CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string()));
        }
        headers.extend(self.headers.iter().cloned());
        headers
    }
}

/// Gateway failures, one per error class the panel distinguishes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),
    /// The response body was not JSON or not the expected shape
    #[error("parse error: {0}")]
    Parse(String),
    /// Session expired or not at the admin step; a login redirect has been issued
    #[error("session is not authorized")]
    Unauthorized,
    /// The request was cancelled before completion
    #[error("request aborted")]
    Aborted,
    /// `success: false` with a normal status
    #[error("{}", .message.as_deref().unwrap_or("request failed"))]
    Application { message: Option<String> },
}

impl GatewayError {
    /// Server-supplied message, if the backend sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Application { message } => message.as_deref(),
            _ => None,
        }
    }
}

/// Truthy `success` field of a reply body.
pub fn is_success(body: &Value) -> bool {
    body.get("success").map(de::is_truthy).unwrap_or(false)
}

/// `error` field of a reply body, if it is a non-empty string.
pub fn error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Decide what a raw `(status, body)` pair means.
///
/// Only a failed body together with a 401 is a session expiry; every other
/// reply is handed back for the caller to inspect `success`.
pub fn classify_reply(status: u16, body: Value) -> Result<Value, GatewayError> {
    if !is_success(&body) && status == 401 {
        return Err(GatewayError::Unauthorized);
    }
    Ok(body)
}

/// Turn a reply with falsy `success` into [`GatewayError::Application`].
pub fn expect_success(body: Value) -> Result<Value, GatewayError> {
    if is_success(&body) {
        Ok(body)
    } else {
        Err(GatewayError::Application {
            message: error_message(&body),
        })
    }
}

/// Deserialize a reply body into a typed payload.
pub fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, GatewayError> {
    serde_json::from_value(body).map_err(|e| GatewayError::Parse(e.to_string()))
}

/// Envelope of a paged record listing (`get-admins`, `get-logs`, ...).
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct PageReply<T> {
    #[serde(default, alias = "admins", alias = "logs")]
    pub records: Vec<T>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub count: Option<i64>,
    #[serde(rename = "hasMore", default, deserialize_with = "de::truthy")]
    pub has_more: bool,
}

/// The moderation backend, as seen by the panel.
#[allow(async_fn_in_trait)]
pub trait PanelApi {
    /// Issue one call. The implementation owns the side effects of failure:
    /// connectivity notices, the login redirect and the busy cursor.
    async fn call(&self, request: ApiRequest) -> Result<Value, GatewayError>;
}
