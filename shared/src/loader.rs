//! Page-load pipeline: guard → fetch → validate → outcome
//!
//! The outcome tells the page what to render; notifications and DOM updates
//! stay with the caller.

use crate::api::{decode, expect_success, ApiRequest, GatewayError, PageReply, PanelApi};
use crate::entity::{build_request, Entity, Filters};
use crate::guard::{LoadGuard, LoadTicket};
use crate::models::PanelRecord;
use crate::pagination::Pager;

/// Where a page is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Rendered,
    Errored,
}

/// Everything needed to ask for one page of records.
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub entity: Entity,
    pub page: u32,
    pub filters: Filters,
    pub server: String,
}

impl PageQuery {
    pub fn new(entity: Entity, page: u32, filters: Filters, server: impl Into<String>) -> Self {
        Self {
            entity,
            page: page.max(1),
            filters,
            server: server.into(),
        }
    }

    pub fn request(&self) -> ApiRequest {
        build_request(self.entity, &self.filters, self.page, &self.server)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage<R> {
    pub records: Vec<R>,
    /// Success notice, e.g. "Загружено 9 записей"
    pub notice: String,
    /// `None` for the unpaged admin roster
    pub pager: Option<Pager>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<R> {
    /// Another load held the guard; nothing happened
    Skipped,
    /// The request was aborted, usually because the page went away
    Cancelled,
    /// Session expired; the gateway already sent the browser to login
    Redirected,
    Rendered(LoadedPage<R>),
    Errored { message: String },
}

impl<R> LoadOutcome<R> {
    /// The state the page settles in, or `None` if it should stay as it was.
    pub fn settled_state(&self) -> Option<LoadState> {
        match self {
            LoadOutcome::Rendered(_) => Some(LoadState::Rendered),
            LoadOutcome::Errored { .. } => Some(LoadState::Errored),
            LoadOutcome::Skipped | LoadOutcome::Cancelled | LoadOutcome::Redirected => None,
        }
    }
}

async fn fetch<R, A>(api: &A, query: &PageQuery) -> Result<LoadedPage<R>, GatewayError>
where
    R: PanelRecord,
    A: PanelApi,
{
    let body = expect_success(api.call(query.request()).await?)?;
    let reply: PageReply<R> = decode(body)?;

    let count = reply
        .count
        .filter(|c| *c != 0)
        .unwrap_or(reply.records.len() as i64);
    let pager = query
        .entity
        .is_paginated()
        .then(|| Pager::new(query.entity, query.page, reply.has_more));

    Ok(LoadedPage {
        notice: query.entity.loaded_notice(count),
        records: reply.records,
        pager,
    })
}

/// Load one page of `R` unless a load already holds the guard.
pub async fn load_page<R, A>(api: &A, guard: &LoadGuard, query: &PageQuery) -> LoadOutcome<R>
where
    R: PanelRecord,
    A: PanelApi,
{
    let Some(ticket) = guard.try_acquire(query.entity) else {
        log::debug!("Skipping {} load: another load is in flight", query.entity.key());
        return LoadOutcome::Skipped;
    };
    fetch_page(api, query, ticket).await
}

/// Run a load whose guard ticket the caller already claimed.
///
/// The ticket is held across the fetch and released on return, whatever
/// the result.
pub async fn fetch_page<R, A>(api: &A, query: &PageQuery, ticket: LoadTicket) -> LoadOutcome<R>
where
    R: PanelRecord,
    A: PanelApi,
{
    debug_assert_eq!(query.entity, R::ENTITY);

    let result = fetch::<R, A>(api, query).await;
    drop(ticket);

    match result {
        Ok(page) => LoadOutcome::Rendered(page),
        Err(GatewayError::Unauthorized) => LoadOutcome::Redirected,
        Err(GatewayError::Aborted) => LoadOutcome::Cancelled,
        Err(e) => {
            log::warn!("Failed to load {}: {}", query.entity.key(), e);
            LoadOutcome::Errored {
                message: e
                    .server_message()
                    .unwrap_or(query.entity.fallback_error())
                    .to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::classify_reply;
    use crate::guard::GuardScope;
    use crate::models::{AdminRecord, LogRecord, ReputationRecord};
    use crate::view::{AdminCardView, NO_LABEL};
    use futures::executor::block_on;
    use futures_channel::oneshot;
    use serde_json::{json, Value};
    use std::cell::{Cell, RefCell};

    /// Replies with a fixed body, optionally waiting on a gate first.
    struct StubApi {
        reply: Result<Value, GatewayError>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
        calls: RefCell<Vec<ApiRequest>>,
        in_flight: Cell<usize>,
        max_in_flight: Cell<usize>,
    }

    impl StubApi {
        fn new(reply: Result<Value, GatewayError>) -> Self {
            Self {
                reply,
                gate: RefCell::new(None),
                calls: RefCell::new(Vec::new()),
                in_flight: Cell::new(0),
                max_in_flight: Cell::new(0),
            }
        }

        fn gated(reply: Value) -> (Self, oneshot::Sender<()>) {
            let (tx, rx) = oneshot::channel();
            let api = Self::new(Ok(reply));
            *api.gate.borrow_mut() = Some(rx);
            (api, tx)
        }
    }

    impl PanelApi for StubApi {
        async fn call(&self, request: ApiRequest) -> Result<Value, GatewayError> {
            self.calls.borrow_mut().push(request);
            self.in_flight.set(self.in_flight.get() + 1);
            self.max_in_flight
                .set(self.max_in_flight.get().max(self.in_flight.get()));

            let gate = self.gate.borrow_mut().take();
            if let Some(rx) = gate {
                let _ = rx.await;
            }

            self.in_flight.set(self.in_flight.get() - 1);
            self.reply.clone()
        }
    }

    fn logs_query(page: u32) -> PageQuery {
        PageQuery::new(Entity::Logs, page, Filters::new(), "One")
    }

    #[test]
    fn second_load_while_in_flight_is_skipped() {
        let (api, release) = StubApi::gated(json!({"success": true, "logs": [], "hasMore": false}));
        let guard = LoadGuard::new(GuardScope::PerEntity);
        let query = logs_query(1);

        let (first, second, ()) = block_on(async {
            futures::join!(
                load_page::<LogRecord, _>(&api, &guard, &query),
                load_page::<LogRecord, _>(&api, &guard, &query),
                async move {
                    let _ = release.send(());
                }
            )
        });

        assert!(matches!(first, LoadOutcome::Rendered(_)));
        assert_eq!(second, LoadOutcome::Skipped);
        assert_eq!(api.calls.borrow().len(), 1);
        assert_eq!(api.max_in_flight.get(), 1);
        assert!(!guard.is_loading(Entity::Logs));
    }

    #[test]
    fn global_guard_blocks_other_entities() {
        let (api, release) = StubApi::gated(json!({"success": true, "logs": []}));
        let guard = LoadGuard::new(GuardScope::Global);
        let logs = logs_query(1);
        let reputation = PageQuery::new(Entity::Reputation, 1, Filters::new(), "One");

        let (first, second, ()) = block_on(async {
            futures::join!(
                load_page::<LogRecord, _>(&api, &guard, &logs),
                load_page::<ReputationRecord, _>(&api, &guard, &reputation),
                async move {
                    let _ = release.send(());
                }
            )
        });

        assert!(matches!(first, LoadOutcome::Rendered(_)));
        assert_eq!(second, LoadOutcome::Skipped);
    }

    #[test]
    fn guard_released_after_error() {
        let api = StubApi::new(Ok(json!({"success": false})));
        let guard = LoadGuard::default();

        let outcome = block_on(load_page::<LogRecord, _>(&api, &guard, &logs_query(1)));
        assert_eq!(
            outcome,
            LoadOutcome::Errored {
                message: "Ошибка загрузки логов".to_string()
            }
        );
        assert_eq!(outcome.settled_state(), Some(LoadState::Errored));
        assert!(guard.try_acquire(Entity::Logs).is_some());
    }

    #[test]
    fn server_error_message_wins() {
        let api = StubApi::new(Ok(json!({"success": false, "error": "Сервер недоступен"})));
        let outcome = block_on(load_page::<LogRecord, _>(&api, &LoadGuard::default(), &logs_query(1)));
        assert_eq!(
            outcome,
            LoadOutcome::Errored {
                message: "Сервер недоступен".to_string()
            }
        );
    }

    #[test]
    fn network_failure_uses_fallback() {
        let api = StubApi::new(Err(GatewayError::Network("offline".into())));
        let query = PageQuery::new(Entity::Reputation, 1, Filters::new(), "One");
        let outcome = block_on(load_page::<ReputationRecord, _>(&api, &LoadGuard::default(), &query));
        assert_eq!(
            outcome,
            LoadOutcome::Errored {
                message: "Ошибка загрузки репутации".to_string()
            }
        );
    }

    #[test]
    fn expired_session_redirects_without_error() {
        let api = StubApi::new(classify_reply(401, json!({"success": false})));
        let outcome = block_on(load_page::<LogRecord, _>(&api, &LoadGuard::default(), &logs_query(1)));
        assert_eq!(outcome, LoadOutcome::Redirected);
        assert_eq!(outcome.settled_state(), None);
    }

    #[test]
    fn admin_roster_renders_card() {
        let api = StubApi::new(Ok(json!({
            "success": true,
            "admins": [{"Name": "X", "ADM": 2, "Preds": 1}],
            "count": 1
        })));
        let query = PageQuery::new(Entity::Admins, 1, Filters::new(), "One");
        let outcome = block_on(load_page::<AdminRecord, _>(&api, &LoadGuard::default(), &query));

        let LoadOutcome::Rendered(page) = outcome else {
            panic!("expected rendered page");
        };
        assert_eq!(page.notice, "Загружено 1 администраторов");
        assert!(page.pager.is_none());

        let card = AdminCardView::new(&page.records[0], "admin-detail.html");
        assert_eq!(card.name, "X");
        assert_eq!(card.level_label, "Level 2");
        assert_eq!(card.warnings, "1/3");
        assert_eq!(card.confirmed.label, NO_LABEL);
        assert_eq!(card.support.label, NO_LABEL);

        assert_eq!(
            api.calls.borrow()[0].query_string(),
            "action=get-admins&server=One"
        );
    }

    #[test]
    fn first_log_page_with_more() {
        let logs: Vec<Value> = (0..9)
            .map(|i| json!({"Admin": "a", "Player": format!("p{}", i), "CMD": "kick", "Reason": "r"}))
            .collect();
        let api = StubApi::new(Ok(json!({"success": true, "logs": logs, "hasMore": true})));
        let outcome = block_on(load_page::<LogRecord, _>(&api, &LoadGuard::default(), &logs_query(1)));

        let LoadOutcome::Rendered(page) = outcome else {
            panic!("expected rendered page");
        };
        assert_eq!(page.records.len(), 9);
        assert_eq!(page.notice, "Загружено 9 записей");
        let pager = page.pager.unwrap();
        assert!(pager.prev_disabled());
        assert!(!pager.next_disabled());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let api = StubApi::new(Ok(json!({"success": true, "logs": "nope"})));
        let outcome = block_on(load_page::<LogRecord, _>(&api, &LoadGuard::default(), &logs_query(1)));
        assert!(matches!(outcome, LoadOutcome::Errored { .. }));
    }

    #[test]
    fn aborted_request_is_cancelled() {
        let api = StubApi::new(Err(GatewayError::Aborted));
        let outcome = block_on(load_page::<LogRecord, _>(&api, &LoadGuard::default(), &logs_query(2)));
        assert_eq!(outcome, LoadOutcome::Cancelled);
    }

    #[test]
    fn caller_claimed_ticket_is_released() {
        let api = StubApi::new(Ok(json!({"success": true, "logs": []})));
        let guard = LoadGuard::default();
        let ticket = guard.try_acquire(Entity::Logs).unwrap();
        assert!(guard.is_loading(Entity::Logs));

        let outcome = block_on(fetch_page::<LogRecord, _>(&api, &logs_query(1), ticket));
        assert_eq!(outcome.settled_state(), Some(LoadState::Rendered));
        assert!(!guard.is_loading(Entity::Logs));
    }
}
