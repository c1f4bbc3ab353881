//! Panel configuration
//!
//! Defaults match the stock deployment (`api.php` next to `login.html`).
//! A build can override them through `MODPANEL_*` environment variables,
//! which are baked in at compile time since the panel runs in the browser.

use crate::guard::GuardScope;

pub const DEFAULT_API_PATH: &str = "api.php";
pub const DEFAULT_LOGIN_PAGE: &str = "login.html";
pub const DEFAULT_DETAIL_PAGE: &str = "admin-detail.html";
pub const DEFAULT_SERVER: &str = "One";
pub const DEFAULT_SERVERS: &str = "One,Two";

/// Online counter refresh period.
pub const ONLINE_POLL_INTERVAL_MS: u32 = 60_000;

/// How long a notification stays up unless closed.
pub const NOTICE_LIFETIME_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Gateway path, relative to the page
    pub api_path: String,
    pub login_page: String,
    pub detail_page: String,
    /// Servers offered by the switcher
    pub servers: Vec<String>,
    /// Used for online polling before a session is known
    pub default_server: String,
    pub online_poll_ms: u32,
    pub notice_lifetime_ms: u32,
    pub guard_scope: GuardScope,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            api_path: DEFAULT_API_PATH.to_string(),
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
            detail_page: DEFAULT_DETAIL_PAGE.to_string(),
            servers: parse_servers(DEFAULT_SERVERS),
            default_server: DEFAULT_SERVER.to_string(),
            online_poll_ms: ONLINE_POLL_INTERVAL_MS,
            notice_lifetime_ms: NOTICE_LIFETIME_MS,
            guard_scope: GuardScope::default(),
        }
    }
}

impl PanelConfig {
    /// Configuration baked in by the build environment.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            "MODPANEL_API_PATH" => option_env!("MODPANEL_API_PATH"),
            "MODPANEL_LOGIN_PAGE" => option_env!("MODPANEL_LOGIN_PAGE"),
            "MODPANEL_DETAIL_PAGE" => option_env!("MODPANEL_DETAIL_PAGE"),
            "MODPANEL_SERVERS" => option_env!("MODPANEL_SERVERS"),
            "MODPANEL_GUARD_SCOPE" => option_env!("MODPANEL_GUARD_SCOPE"),
            _ => None,
        })
    }

    /// Build from an arbitrary key lookup; unset or blank keys keep defaults.
    pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).map(str::trim).filter(|v| !v.is_empty());

        if let Some(path) = get("MODPANEL_API_PATH") {
            config.api_path = path.to_string();
        }
        if let Some(page) = get("MODPANEL_LOGIN_PAGE") {
            config.login_page = page.to_string();
        }
        if let Some(page) = get("MODPANEL_DETAIL_PAGE") {
            config.detail_page = page.to_string();
        }
        if let Some(servers) = get("MODPANEL_SERVERS") {
            let servers = parse_servers(servers);
            if let Some(first) = servers.first() {
                config.default_server = first.clone();
                config.servers = servers;
            }
        }
        if let Some(scope) = get("MODPANEL_GUARD_SCOPE") {
            match scope.parse() {
                Ok(scope) => config.guard_scope = scope,
                Err(e) => log::warn!("Ignoring MODPANEL_GUARD_SCOPE: {}", e),
            }
        }
        config
    }
}

/// Comma-separated server names, blanks dropped.
pub fn parse_servers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PanelConfig::default();
        assert_eq!(config.api_path, "api.php");
        assert_eq!(config.login_page, "login.html");
        assert_eq!(config.servers, vec!["One", "Two"]);
        assert_eq!(config.default_server, "One");
        assert_eq!(config.online_poll_ms, 60_000);
        assert_eq!(config.notice_lifetime_ms, 5_000);
        assert_eq!(config.guard_scope, GuardScope::PerEntity);
    }

    #[test]
    fn overrides_apply() {
        let config = PanelConfig::from_lookup(|key| match key {
            "MODPANEL_API_PATH" => Some("/panel/api.php"),
            "MODPANEL_SERVERS" => Some(" Alpha , ,Beta"),
            "MODPANEL_GUARD_SCOPE" => Some("global"),
            _ => None,
        });
        assert_eq!(config.api_path, "/panel/api.php");
        assert_eq!(config.servers, vec!["Alpha", "Beta"]);
        assert_eq!(config.default_server, "Alpha");
        assert_eq!(config.guard_scope, GuardScope::Global);
        assert_eq!(config.login_page, "login.html");
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = PanelConfig::from_lookup(|key| match key {
            "MODPANEL_SERVERS" => Some(" , "),
            "MODPANEL_GUARD_SCOPE" => Some("sometimes"),
            "MODPANEL_LOGIN_PAGE" => Some("  "),
            _ => None,
        });
        assert_eq!(config, PanelConfig::default());
    }
}
