//! Display models for record cards and table rows
//!
//! These hold exactly the strings and CSS classes the components render, so
//! display rules are decided here and the components stay declarative.

use crate::dates::{format_date, format_date_legacy};
use crate::models::{initial, AdminRecord, LogRecord, NameChangeRecord, ReputationRecord};

pub const YES_LABEL: &str = "Да";
pub const NO_LABEL: &str = "Нет";
pub const UNKNOWN_ADMIN_LABEL: &str = "Неизвестно";
pub const HIDDEN_IP_LABEL: &str = "Скрыт";
pub const OFFLINE_LABEL: &str = "Оффлайн";
pub const EMPTY_AMOUNT: &str = "—";
pub const MAX_WARNINGS: i64 = 3;

/// A Yes/No cell with its status styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub class: &'static str,
}

impl StatusBadge {
    pub fn yes_no(flag: bool) -> Self {
        if flag {
            Self {
                label: YES_LABEL,
                class: "status-yes",
            }
        } else {
            Self {
                label: NO_LABEL,
                class: "status-no",
            }
        }
    }
}

/// Link to the standalone admin detail page.
pub fn detail_href(detail_page: &str, name: &str) -> String {
    format!("{}?name={}", detail_page, urlencoding::encode(name))
}

fn or_label(value: Option<&str>, label: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(label)
        .to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminCardView {
    pub name: String,
    pub avatar: String,
    pub level_label: String,
    pub warnings: String,
    pub confirmed: StatusBadge,
    pub support: StatusBadge,
    pub online_label: &'static str,
    pub appointed_at: String,
    pub appointed_by: String,
    pub ip: String,
    pub detail_href: String,
}

impl AdminCardView {
    pub fn new(admin: &AdminRecord, detail_page: &str) -> Self {
        let warnings = admin.warnings.unwrap_or(0).clamp(0, MAX_WARNINGS);
        Self {
            name: admin.name.clone(),
            avatar: initial(&admin.name),
            level_label: format!("Level {}", admin.level()),
            warnings: format!("{}/{}", warnings, MAX_WARNINGS),
            confirmed: StatusBadge::yes_no(admin.confirmed),
            support: StatusBadge::yes_no(admin.support),
            online_label: OFFLINE_LABEL,
            appointed_at: format_date(admin.appointed_at.as_ref()),
            appointed_by: or_label(admin.appointed_by.as_deref(), UNKNOWN_ADMIN_LABEL),
            ip: or_label(admin.ip.as_deref(), HIDDEN_IP_LABEL),
            detail_href: detail_href(detail_page, &admin.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogRowView {
    pub admin: String,
    pub player: String,
    pub command: String,
    pub reason: String,
    pub amount: String,
    pub date: String,
}

impl From<&LogRecord> for LogRowView {
    fn from(log: &LogRecord) -> Self {
        Self {
            admin: log.admin.clone(),
            player: log.player.clone(),
            command: log.command.clone(),
            reason: log.reason.clone(),
            amount: or_label(log.amount.as_deref(), EMPTY_AMOUNT),
            date: format_date(log.date.as_ref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReputationBadge {
    pub text: String,
    pub class: &'static str,
}

/// Positive deltas get a `+` and positive styling; zero and below do not.
pub fn reputation_badge(delta: i64) -> ReputationBadge {
    if delta > 0 {
        ReputationBadge {
            text: format!("+{}", delta),
            class: "reputation-badge positive",
        }
    } else {
        ReputationBadge {
            text: delta.to_string(),
            class: "reputation-badge negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReputationRowView {
    pub from: String,
    pub to: String,
    pub badge: ReputationBadge,
    pub comment: String,
    pub blocked_label: String,
    /// Blocked entries take the negative style even though they read "Да".
    pub blocked_class: &'static str,
    pub date: String,
}

impl From<&ReputationRecord> for ReputationRowView {
    fn from(rep: &ReputationRecord) -> Self {
        Self {
            from: rep.from.clone(),
            to: rep.to.clone(),
            badge: reputation_badge(rep.delta.unwrap_or(0)),
            comment: rep.comment.clone(),
            blocked_label: rep.blocked.clone(),
            blocked_class: if rep.is_blocked() {
                "status-no"
            } else {
                "status-yes"
            },
            date: format_date_legacy(rep.date.as_ref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NameRowView {
    pub account_id: String,
    pub previous: String,
    pub current: String,
    pub admin: String,
    pub date: String,
}

impl From<&NameChangeRecord> for NameRowView {
    fn from(change: &NameChangeRecord) -> Self {
        Self {
            account_id: change.account_id.clone(),
            previous: change.previous.clone(),
            current: change.current.clone(),
            admin: change.admin.clone(),
            date: format_date(change.date.as_ref()),
        }
    }
}
