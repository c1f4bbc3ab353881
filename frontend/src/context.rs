use std::cell::RefCell;
use std::rc::Rc;

use shared::{LoadGuard, PanelConfig, SessionUser, Severity};

use crate::gateway::{BrowserGateway, Notifier};

/// A notice held back until the next page load has settled, so that it
/// lands on top of that load's own notice.
#[derive(Clone, Default)]
pub struct FollowUp(Rc<RefCell<Option<(String, Severity)>>>);

impl PartialEq for FollowUp {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl FollowUp {
    pub fn set(&self, message: impl Into<String>, severity: Severity) {
        *self.0.borrow_mut() = Some((message.into(), severity));
    }

    pub fn take(&self) -> Option<(String, Severity)> {
        self.0.borrow_mut().take()
    }
}

/// State shared by every page once the session is known.
#[derive(Clone, PartialEq)]
pub struct PanelContext {
    pub config: Rc<PanelConfig>,
    pub gateway: BrowserGateway,
    pub guard: LoadGuard,
    pub user: Rc<SessionUser>,
    pub notifier: Notifier,
    pub follow_up: FollowUp,
}

impl PanelContext {
    /// Server the session is bound to, or the configured default.
    pub fn server(&self) -> String {
        self.user.server_or(&self.config.default_server).to_string()
    }

    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.notifier.emit((message.into(), severity));
    }

    /// Show the held-back notice, if any. Called when a load settles.
    pub fn flush_follow_up(&self) {
        if let Some((message, severity)) = self.follow_up.take() {
            self.notify(message, severity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_up_is_shown_once() {
        let follow_up = FollowUp::default();
        assert_eq!(follow_up.take(), None);

        follow_up.clone().set("Переключено на сервер Two", Severity::Success);
        assert_eq!(
            follow_up.take(),
            Some(("Переключено на сервер Two".to_string(), Severity::Success))
        );
        assert_eq!(follow_up.take(), None);
    }

    #[test]
    fn newer_follow_up_replaces_older() {
        let follow_up = FollowUp::default();
        follow_up.set("first", Severity::Info);
        follow_up.set("second", Severity::Success);
        assert_eq!(follow_up.take().map(|(m, _)| m), Some("second".to_string()));
    }
}
