//! Forward/backward page stepping driven by the backend's `hasMore` flag

use crate::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub entity: Entity,
    /// 1-based
    pub page: u32,
    pub has_more: bool,
}

impl Pager {
    pub fn new(entity: Entity, page: u32, has_more: bool) -> Self {
        Self {
            entity,
            page: page.max(1),
            has_more,
        }
    }

    pub fn prev_disabled(&self) -> bool {
        self.page <= 1
    }

    pub fn next_disabled(&self) -> bool {
        !self.has_more
    }

    pub fn previous(&self) -> Option<u32> {
        (!self.prev_disabled()).then(|| self.page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        (!self.next_disabled()).then(|| self.page + 1)
    }

    pub fn label(&self) -> String {
        format!("Страница {}", self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_with_more() {
        let pager = Pager::new(Entity::Logs, 1, true);
        assert!(pager.prev_disabled());
        assert!(!pager.next_disabled());
        assert_eq!(pager.previous(), None);
        assert_eq!(pager.next(), Some(2));
        assert_eq!(pager.label(), "Страница 1");
    }

    #[test]
    fn last_page() {
        let pager = Pager::new(Entity::Names, 4, false);
        assert!(!pager.prev_disabled());
        assert!(pager.next_disabled());
        assert_eq!(pager.previous(), Some(3));
        assert_eq!(pager.next(), None);
    }

    #[test]
    fn page_zero_is_clamped() {
        let pager = Pager::new(Entity::Reputation, 0, false);
        assert_eq!(pager.page, 1);
        assert!(pager.prev_disabled());
    }
}
