//! Session-level calls: auth check, logout, server switch, online counter

use serde::Deserialize;

use crate::api::{decode, expect_success, Action, ApiRequest, GatewayError, PanelApi};
use crate::de;
use crate::models::SessionUser;

/// `step` value of a fully authenticated admin session.
pub const ADMIN_STEP: &str = "admin";

pub const CONNECTION_ERROR: &str = "Ошибка соединения с сервером";
pub const LOGOUT_PROMPT: &str = "Вы действительно хотите выйти из системы?";
pub const SWITCH_FAILED: &str = "Ошибка переключения сервера";

pub fn switched_notice(server: &str) -> String {
    format!("Переключено на сервер {}", server)
}

#[derive(Debug, Deserialize)]
struct SessionReply {
    #[serde(default, deserialize_with = "de::opt_string")]
    step: Option<String>,
    #[serde(default)]
    admin: Option<SessionUser>,
}

#[derive(Debug, Deserialize)]
struct OnlineReply {
    #[serde(default, deserialize_with = "de::opt_i64")]
    online: Option<i64>,
}

/// Verify the session; anything short of the admin step is unauthorized.
pub async fn check_session<A: PanelApi>(api: &A) -> Result<SessionUser, GatewayError> {
    let body = api.call(ApiRequest::new(Action::Session)).await?;
    let reply: SessionReply = decode(body)?;
    match (reply.step.as_deref(), reply.admin) {
        (Some(ADMIN_STEP), Some(user)) => Ok(user),
        (step, _) => {
            log::info!("Session is not at the admin step (step: {:?})", step);
            Err(GatewayError::Unauthorized)
        }
    }
}

pub async fn logout<A: PanelApi>(api: &A) -> Result<(), GatewayError> {
    expect_success(api.call(ApiRequest::new(Action::Logout)).await?)?;
    Ok(())
}

pub async fn switch_server<A: PanelApi>(api: &A, server: &str) -> Result<(), GatewayError> {
    let request = ApiRequest::new(Action::SwitchServer).param("server", server);
    expect_success(api.call(request).await?)?;
    Ok(())
}

/// Players online on `server`; a reply without a count reads as zero.
pub async fn online_count<A: PanelApi>(api: &A, server: &str) -> Result<i64, GatewayError> {
    let request = ApiRequest::new(Action::GetOnlineStats).param("server", server);
    let body = expect_success(api.call(request).await?)?;
    let reply: OnlineReply = decode(body)?;
    Ok(reply.online.unwrap_or(0))
}
