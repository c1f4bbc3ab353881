//! Browser implementation of the panel gateway
//!
//! All backend traffic goes through [`BrowserGateway::call`], which owns the
//! side effects the rest of the app relies on: the busy cursor, the
//! connectivity notice and the login redirect on session expiry.

use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::Request;
use serde_json::Value;
use shared::api::{classify_reply, Method};
use shared::session::CONNECTION_ERROR;
use shared::{ApiRequest, GatewayError, PanelApi, PanelConfig, Severity};
use web_sys::AbortSignal;
use yew::Callback;

use crate::utils;

/// Notification sink: `(message, severity)`.
pub type Notifier = Callback<(String, Severity)>;

thread_local! {
    static BUSY_CALLS: Cell<u32> = const { Cell::new(0) };
}

/// Shows the wait cursor while at least one call is alive.
struct BusyCursor;

impl BusyCursor {
    fn show() -> Self {
        BUSY_CALLS.with(|busy| {
            busy.set(busy.get() + 1);
        });
        utils::set_body_cursor("wait");
        Self
    }
}

impl Drop for BusyCursor {
    fn drop(&mut self) {
        let remaining = BUSY_CALLS.with(|busy| {
            let left = busy.get().saturating_sub(1);
            busy.set(left);
            left
        });
        if remaining == 0 {
            utils::set_body_cursor("");
        }
    }
}

#[derive(Clone)]
pub struct BrowserGateway {
    config: Rc<PanelConfig>,
    notify: Notifier,
    signal: Option<AbortSignal>,
}

impl PartialEq for BrowserGateway {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
            && self.notify == other.notify
            && self.signal == other.signal
    }
}

impl BrowserGateway {
    pub fn new(config: Rc<PanelConfig>, notify: Notifier) -> Self {
        Self {
            config,
            notify,
            signal: None,
        }
    }

    /// A copy whose requests are cancelled when `signal` aborts.
    pub fn with_signal(&self, signal: AbortSignal) -> Self {
        Self {
            signal: Some(signal),
            ..self.clone()
        }
    }

    fn aborted(&self) -> bool {
        self.signal.as_ref().is_some_and(AbortSignal::aborted)
    }

    fn transport_error(&self, e: gloo_net::Error) -> GatewayError {
        if self.aborted() {
            GatewayError::Aborted
        } else {
            GatewayError::Network(e.to_string())
        }
    }

    async fn send(&self, request: &ApiRequest) -> Result<(u16, Value), GatewayError> {
        let url = utils::page_url(&request.url(&self.config.api_path));
        let mut builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };
        for (name, value) in request.effective_headers() {
            builder = builder.header(&name, &value);
        }
        builder = builder.abort_signal(self.signal.as_ref());

        let prepared = match &request.body {
            Some(body) => builder.body(body.clone()),
            None => builder.build(),
        }
        .map_err(|e| GatewayError::Network(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.json::<Value>().await.map_err(|e| {
            if self.aborted() {
                GatewayError::Aborted
            } else {
                GatewayError::Parse(e.to_string())
            }
        })?;
        Ok((status, body))
    }
}

impl PanelApi for BrowserGateway {
    async fn call(&self, request: ApiRequest) -> Result<Value, GatewayError> {
        let _busy = BusyCursor::show();

        let result = match self.send(&request).await {
            Ok((status, body)) => classify_reply(status, body),
            Err(e) => Err(e),
        };

        match &result {
            Err(GatewayError::Unauthorized) => {
                log::info!("Session expired during {}", request.action.as_str());
                utils::redirect(&self.config.login_page);
            }
            Err(e @ (GatewayError::Network(_) | GatewayError::Parse(_))) => {
                log::error!("API error ({}): {}", request.action.as_str(), e);
                self.notify
                    .emit((CONNECTION_ERROR.to_string(), Severity::Error));
            }
            _ => {}
        }
        result
    }
}
