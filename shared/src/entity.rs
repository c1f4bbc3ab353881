//! The four record pages and how each one is queried

use crate::api::{Action, ApiRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Admins,
    Logs,
    Reputation,
    Names,
}

/// One named filter input on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    /// Query parameter sent to the backend
    pub param: &'static str,
    /// DOM id of the input
    pub input_id: &'static str,
    pub placeholder: &'static str,
}

const ADMIN_FILTERS: &[FilterField] = &[FilterField {
    param: "search",
    input_id: "adminSearchInput",
    placeholder: "Поиск по нику...",
}];

const LOG_FILTERS: &[FilterField] = &[
    FilterField {
        param: "admin",
        input_id: "adminFilter",
        placeholder: "Администратор",
    },
    FilterField {
        param: "player",
        input_id: "playerFilter",
        placeholder: "Игрок",
    },
    FilterField {
        param: "cmd",
        input_id: "cmdFilter",
        placeholder: "Команда",
    },
    FilterField {
        param: "reason",
        input_id: "reasonFilter",
        placeholder: "Причина",
    },
];

const REPUTATION_FILTERS: &[FilterField] = &[
    FilterField {
        param: "from",
        input_id: "fromFilter",
        placeholder: "От кого",
    },
    FilterField {
        param: "to",
        input_id: "toFilter",
        placeholder: "Кому",
    },
    FilterField {
        param: "comment",
        input_id: "commentFilter",
        placeholder: "Комментарий",
    },
];

const NAME_FILTERS: &[FilterField] = &[
    FilterField {
        param: "account",
        input_id: "accountFilter",
        placeholder: "ID аккаунта",
    },
    FilterField {
        param: "before",
        input_id: "beforeFilter",
        placeholder: "Старый ник",
    },
    FilterField {
        param: "after",
        input_id: "afterFilter",
        placeholder: "Новый ник",
    },
    FilterField {
        param: "admin",
        input_id: "adminNamesFilter",
        placeholder: "Администратор",
    },
];

impl Entity {
    pub const ALL: [Entity; 4] = [
        Entity::Admins,
        Entity::Logs,
        Entity::Reputation,
        Entity::Names,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Entity::Admins => "admins",
            Entity::Logs => "logs",
            Entity::Reputation => "reputation",
            Entity::Names => "names",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.key() == key)
    }

    pub fn action(&self) -> Action {
        match self {
            Entity::Admins => Action::GetAdmins,
            Entity::Logs => Action::GetLogs,
            Entity::Reputation => Action::GetReputation,
            Entity::Names => Action::GetNames,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Entity::Admins => "Администраторы",
            Entity::Logs => "Логи действий",
            Entity::Reputation => "Репутация",
            Entity::Names => "История никнеймов",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Entity::Admins => "fas fa-user-shield",
            Entity::Logs => "fas fa-list",
            Entity::Reputation => "fas fa-star",
            Entity::Names => "fas fa-id-badge",
        }
    }

    pub fn filter_fields(&self) -> &'static [FilterField] {
        match self {
            Entity::Admins => ADMIN_FILTERS,
            Entity::Logs => LOG_FILTERS,
            Entity::Reputation => REPUTATION_FILTERS,
            Entity::Names => NAME_FILTERS,
        }
    }

    /// The admin roster is a single listing; the rest step through pages.
    pub fn is_paginated(&self) -> bool {
        !matches!(self, Entity::Admins)
    }

    /// Whether the active server selection is part of the query.
    pub fn is_server_scoped(&self) -> bool {
        matches!(self, Entity::Admins | Entity::Logs)
    }

    /// Columns of the entity's table (placeholders span all of them).
    pub fn column_count(&self) -> usize {
        match self {
            Entity::Admins => 1,
            Entity::Logs | Entity::Reputation => 6,
            Entity::Names => 5,
        }
    }

    pub fn loading_text(&self) -> &'static str {
        match self {
            Entity::Admins => "Загружаем администраторов...",
            Entity::Logs => "Загружаем логи...",
            Entity::Reputation => "Загружаем данные репутации...",
            Entity::Names => "Загружаем историю никнеймов...",
        }
    }

    /// Error notice used when the backend does not supply a message.
    pub fn fallback_error(&self) -> &'static str {
        match self {
            Entity::Admins => "Ошибка загрузки администраторов",
            Entity::Logs => "Ошибка загрузки логов",
            Entity::Reputation => "Ошибка загрузки репутации",
            Entity::Names => "Ошибка загрузки истории никнеймов",
        }
    }

    pub fn loaded_notice(&self, count: i64) -> String {
        match self {
            Entity::Admins => format!("Загружено {} администраторов", count),
            _ => format!("Загружено {} записей", count),
        }
    }
}

/// Current values of a page's filter inputs, keyed by query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    values: Vec<(&'static str, String)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value; it is trimmed on the way in.
    pub fn set(&mut self, param: &'static str, value: &str) {
        let value = value.trim().to_string();
        match self.values.iter_mut().find(|(p, _)| *p == param) {
            Some(slot) => slot.1 = value,
            None => self.values.push((param, value)),
        }
    }

    pub fn with(mut self, param: &'static str, value: &str) -> Self {
        self.set(param, value);
        self
    }

    /// Value for `param`, empty when the input was never filled.
    pub fn get(&self, param: &str) -> &str {
        self.values
            .iter()
            .find(|(p, _)| *p == param)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

/// Build the listing request for one page of `entity`.
///
/// Paged entities always send every filter (blank ones as empty strings);
/// the admin roster only sends a non-blank search.
pub fn build_request(entity: Entity, filters: &Filters, page: u32, server: &str) -> ApiRequest {
    let mut request = ApiRequest::new(entity.action());
    if entity.is_server_scoped() {
        request = request.param("server", server);
    }
    if entity.is_paginated() {
        request = request.param("page", page.max(1));
        for field in entity.filter_fields() {
            request = request.param(field.param, filters.get(field.param));
        }
    } else {
        for field in entity.filter_fields() {
            let value = filters.get(field.param);
            if !value.is_empty() {
                request = request.param(field.param, value);
            }
        }
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for entity in Entity::ALL {
            assert_eq!(Entity::from_key(entity.key()), Some(entity));
        }
        assert_eq!(Entity::from_key("bans"), None);
    }

    #[test]
    fn admin_request_skips_blank_search() {
        let req = build_request(Entity::Admins, &Filters::new().with("search", "   "), 3, "One");
        assert_eq!(req.query_string(), "action=get-admins&server=One");

        let req = build_request(Entity::Admins, &Filters::new().with("search", " Nick "), 1, "Two");
        assert_eq!(req.query_string(), "action=get-admins&server=Two&search=Nick");
    }

    #[test]
    fn log_request_sends_all_filters() {
        let filters = Filters::new().with("player", "  Bob ").with("cmd", "ban");
        let req = build_request(Entity::Logs, &filters, 2, "One");
        assert_eq!(
            req.query_string(),
            "action=get-logs&server=One&page=2&admin=&player=Bob&cmd=ban&reason="
        );
    }

    #[test]
    fn reputation_and_names_are_not_server_scoped() {
        let req = build_request(Entity::Reputation, &Filters::new(), 1, "One");
        assert_eq!(
            req.query_string(),
            "action=get-reputation&page=1&from=&to=&comment="
        );

        let req = build_request(Entity::Names, &Filters::new().with("account", "42"), 0, "One");
        assert_eq!(
            req.query_string(),
            "action=get-names&page=1&account=42&before=&after=&admin="
        );
    }

    #[test]
    fn filters_overwrite_in_place() {
        let mut filters = Filters::new();
        filters.set("admin", "a");
        filters.set("admin", "b");
        assert_eq!(filters.get("admin"), "b");
        assert_eq!(filters.get("missing"), "");
    }
}
