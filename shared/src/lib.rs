//! Core of the moderation panel: wire types, formatting and the page-load
//! pipeline. Nothing here touches the DOM, so it builds for both WASM and
//! native test targets.

pub mod api;
pub mod config;
pub mod dates;
pub mod de;
pub mod entity;
pub mod guard;
pub mod loader;
pub mod models;
pub mod notify;
pub mod pagination;
pub mod session;
pub mod view;

pub use api::{Action, ApiRequest, GatewayError, Method, PanelApi};
pub use config::PanelConfig;
pub use dates::{format_date, format_date_legacy, DateValue, UNSET_LABEL};
pub use entity::{Entity, FilterField, Filters};
pub use guard::{GuardScope, LoadGuard, LoadTicket, ReleaseWatch};
pub use loader::{fetch_page, load_page, LoadOutcome, LoadState, LoadedPage, PageQuery};
pub use models::{
    AdminRecord, LogRecord, NameChangeRecord, PanelRecord, ReputationRecord, SessionUser,
};
pub use notify::{Notice, NotificationSlot, Severity};
pub use pagination::Pager;
