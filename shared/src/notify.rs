//! Notification slot: at most one banner, newest wins

use crate::config::NOTICE_LIFETIME_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "fas fa-check-circle",
            Severity::Error => "fas fa-exclamation-circle",
            Severity::Warning => "fas fa-exclamation-triangle",
            Severity::Info => "fas fa-info-circle",
        }
    }

    pub fn class(&self) -> String {
        format!("notification notification-{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSlot {
    next_id: u64,
    current: Option<Notice>,
    lifetime_ms: u32,
}

impl Default for NotificationSlot {
    fn default() -> Self {
        Self::with_lifetime(NOTICE_LIFETIME_MS)
    }
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lifetime(lifetime_ms: u32) -> Self {
        Self {
            next_id: 0,
            current: None,
            lifetime_ms,
        }
    }

    /// How long a notice stays up unless closed.
    pub fn lifetime_ms(&self) -> u32 {
        self.lifetime_ms
    }

    /// Replace whatever is showing; returns the new notice's id.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.next_id += 1;
        self.current = Some(Notice {
            id: self.next_id,
            message: message.into(),
            severity,
        });
        self.next_id
    }

    /// Remove notice `id` if it is still the one showing.
    ///
    /// The auto-dismiss timer and the close button both call this; whichever
    /// loses the race is a no-op.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Auto-dismiss notice `id` once it has been up for the slot's lifetime.
    pub fn expire(&mut self, id: u64, elapsed_ms: u32) -> bool {
        elapsed_ms >= self.lifetime_ms && self.dismiss(id)
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_replaces_previous() {
        let mut slot = NotificationSlot::new();
        let first = slot.show("first", Severity::Info);
        let second = slot.show("second", Severity::Error);

        let current = slot.current().unwrap();
        assert_eq!(current.id, second);
        assert_eq!(current.message, "second");

        // The first banner's timer firing later must not remove the second.
        assert!(!slot.dismiss(first));
        assert!(slot.current().is_some());

        assert!(slot.dismiss(second));
        assert!(slot.current().is_none());
    }

    #[test]
    fn double_dismiss_is_harmless() {
        let mut slot = NotificationSlot::new();
        let id = slot.show("bye", Severity::Success);
        assert!(slot.dismiss(id));
        assert!(!slot.dismiss(id));
    }

    #[test]
    fn notice_expires_after_lifetime() {
        let mut slot = NotificationSlot::new();
        assert_eq!(slot.lifetime_ms(), 5_000);
        let id = slot.show("Загружено 3 записей", Severity::Success);

        assert!(!slot.expire(id, 4_999));
        assert!(slot.current().is_some());

        assert!(slot.expire(id, 5_000));
        assert!(slot.current().is_none());
    }

    #[test]
    fn expiry_of_replaced_notice_is_ignored() {
        let mut slot = NotificationSlot::with_lifetime(100);
        let old = slot.show("old", Severity::Info);
        let new = slot.show("new", Severity::Warning);

        assert!(!slot.expire(old, 100));
        assert_eq!(slot.current().map(|n| n.id), Some(new));
        assert!(slot.expire(new, 250));
    }

    #[test]
    fn severity_icons() {
        assert_eq!(Severity::Success.icon(), "fas fa-check-circle");
        assert_eq!(Severity::Error.icon(), "fas fa-exclamation-circle");
        assert_eq!(Severity::Warning.icon(), "fas fa-exclamation-triangle");
        assert_eq!(Severity::Info.icon(), "fas fa-info-circle");
        assert_eq!(Severity::Warning.class(), "notification notification-warning");
    }
}
