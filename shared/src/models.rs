//! Records returned by the moderation backend
//!
//! Field names follow the backend's column names, which are kept verbatim on
//! the wire via `rename`.

use serde::Deserialize;

use crate::dates::DateValue;
use crate::de;
use crate::entity::Entity;

/// A record type that belongs to one entity page.
pub trait PanelRecord: serde::de::DeserializeOwned + Clone + PartialEq + 'static {
    const ENTITY: Entity;
}

/// The signed-in moderator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionUser {
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub level: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub server: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub role: Option<String>,
}

impl SessionUser {
    pub fn role_label(&self) -> String {
        match self.role.as_deref().map(str::trim) {
            Some(role) if !role.is_empty() => role.to_string(),
            _ => format!("Level {}", self.level.unwrap_or(1)),
        }
    }

    pub fn avatar_letter(&self) -> String {
        initial(&self.name)
    }

    pub fn server_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback)
    }
}

/// Uppercased first character of a name, `?` for an empty one.
pub fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminRecord {
    #[serde(rename = "Name", default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(rename = "ADM", default, deserialize_with = "de::opt_i64")]
    pub adm: Option<i64>,
    #[serde(rename = "Adm", default, deserialize_with = "de::opt_i64")]
    pub adm_alt: Option<i64>,
    #[serde(rename = "Preds", default, deserialize_with = "de::opt_i64")]
    pub warnings: Option<i64>,
    #[serde(rename = "Podtverjden", default, deserialize_with = "de::flag")]
    pub confirmed: bool,
    #[serde(rename = "Support", default, deserialize_with = "de::flag")]
    pub support: bool,
    #[serde(rename = "Date", default, deserialize_with = "de::opt_date")]
    pub appointed_at: Option<DateValue>,
    #[serde(rename = "Kem", default, deserialize_with = "de::opt_string")]
    pub appointed_by: Option<String>,
    #[serde(rename = "IP", default, deserialize_with = "de::opt_string")]
    pub ip: Option<String>,
}

impl AdminRecord {
    /// Admin level; zero or missing falls through to the alternate column, then 1.
    pub fn level(&self) -> i64 {
        self.adm
            .filter(|l| *l != 0)
            .or(self.adm_alt.filter(|l| *l != 0))
            .unwrap_or(1)
    }
}

impl PanelRecord for AdminRecord {
    const ENTITY: Entity = Entity::Admins;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Admin", default, deserialize_with = "de::string")]
    pub admin: String,
    #[serde(rename = "Player", default, deserialize_with = "de::string")]
    pub player: String,
    #[serde(rename = "CMD", default, deserialize_with = "de::string")]
    pub command: String,
    #[serde(rename = "Reason", default, deserialize_with = "de::string")]
    pub reason: String,
    #[serde(rename = "Amount", default, deserialize_with = "de::truthy_string")]
    pub amount: Option<String>,
    #[serde(rename = "Date", default, deserialize_with = "de::opt_date")]
    pub date: Option<DateValue>,
}

impl PanelRecord for LogRecord {
    const ENTITY: Entity = Entity::Logs;
}

/// Label the backend uses for a blocked reputation entry.
pub const BLOCKED_LABEL: &str = "Да";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReputationRecord {
    #[serde(rename = "A", default, deserialize_with = "de::string")]
    pub from: String,
    #[serde(rename = "B", default, deserialize_with = "de::string")]
    pub to: String,
    #[serde(rename = "Repa", default, deserialize_with = "de::opt_i64")]
    pub delta: Option<i64>,
    #[serde(rename = "Comment", default, deserialize_with = "de::string")]
    pub comment: String,
    #[serde(rename = "Blocked", default, deserialize_with = "de::string")]
    pub blocked: String,
    #[serde(rename = "Date2", default, deserialize_with = "de::opt_date")]
    pub date: Option<DateValue>,
}

impl ReputationRecord {
    pub fn is_blocked(&self) -> bool {
        self.blocked.trim() == BLOCKED_LABEL
    }
}

impl PanelRecord for ReputationRecord {
    const ENTITY: Entity = Entity::Reputation;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NameChangeRecord {
    #[serde(rename = "idacc", default, deserialize_with = "de::string")]
    pub account_id: String,
    #[serde(rename = "Do", default, deserialize_with = "de::string")]
    pub previous: String,
    #[serde(rename = "Posle", default, deserialize_with = "de::string")]
    pub current: String,
    #[serde(rename = "Adm", default, deserialize_with = "de::string")]
    pub admin: String,
    #[serde(rename = "Date", default, deserialize_with = "de::opt_date")]
    pub date: Option<DateValue>,
}

impl PanelRecord for NameChangeRecord {
    const ENTITY: Entity = Entity::Names;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn admin_record_tolerates_loose_columns() {
        let admin: AdminRecord = serde_json::from_value(json!({
            "Name": "Nick_Name",
            "ADM": "4",
            "Preds": 2,
            "Podtverjden": "1",
            "Support": 0,
            "Date": "2023-01-02 10:00:00",
            "Kem": null,
            "IP": "127.0.0.1"
        }))
        .unwrap();

        assert_eq!(admin.name, "Nick_Name");
        assert_eq!(admin.level(), 4);
        assert_eq!(admin.warnings, Some(2));
        assert!(admin.confirmed);
        assert!(!admin.support);
        assert_eq!(admin.appointed_by, None);
        assert_eq!(admin.ip.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn admin_level_falls_back() {
        let only_alt: AdminRecord =
            serde_json::from_value(json!({"Name": "a", "Adm": 3})).unwrap();
        assert_eq!(only_alt.level(), 3);

        let zero: AdminRecord =
            serde_json::from_value(json!({"Name": "a", "ADM": 0, "Adm": 5})).unwrap();
        assert_eq!(zero.level(), 5);

        let none: AdminRecord = serde_json::from_value(json!({"Name": "a"})).unwrap();
        assert_eq!(none.level(), 1);
    }

    #[test]
    fn reputation_blocked_label() {
        let rec: ReputationRecord = serde_json::from_value(json!({
            "A": "x", "B": "y", "Repa": "-3", "Comment": "", "Blocked": "Да", "Date2": "1700000000"
        }))
        .unwrap();
        assert!(rec.is_blocked());
        assert_eq!(rec.delta, Some(-3));
        assert_eq!(rec.date, Some(DateValue::Text("1700000000".into())));
    }

    #[test]
    fn session_user_labels() {
        let user: SessionUser =
            serde_json::from_value(json!({"name": "moder", "level": "5", "server": "Two"})).unwrap();
        assert_eq!(user.role_label(), "Level 5");
        assert_eq!(user.avatar_letter(), "M");
        assert_eq!(user.server_or("One"), "Two");

        let bare: SessionUser = serde_json::from_value(json!({"name": ""})).unwrap();
        assert_eq!(bare.avatar_letter(), "?");
        assert_eq!(bare.server_or("One"), "One");
    }

    #[test]
    fn initial_handles_cyrillic() {
        assert_eq!(initial("иван"), "И");
    }
}
