//! In-flight guard for page loads
//!
//! A load holds a [`LoadTicket`] for its whole fetch; a second load under the
//! same key is refused while the ticket lives. Dropping the ticket releases
//! the key on every exit path.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use crate::entity::Entity;

/// How widely one in-flight load blocks others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardScope {
    /// One load at a time across all pages
    Global,
    /// One load at a time per entity
    #[default]
    PerEntity,
}

impl FromStr for GuardScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(GuardScope::Global),
            "per-entity" | "per_entity" | "entity" => Ok(GuardScope::PerEntity),
            other => Err(format!("unknown guard scope: {}", other)),
        }
    }
}

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct GuardState {
    in_flight: RefCell<HashSet<Option<Entity>>>,
    watchers: RefCell<Vec<(u64, Listener)>>,
    next_watch: Cell<u64>,
}

impl GuardState {
    fn release(&self, key: Option<Entity>) {
        self.in_flight.borrow_mut().remove(&key);
        // Snapshot first: a watcher may drop its own handle while running
        let watchers: Vec<Listener> = self
            .watchers
            .borrow()
            .iter()
            .map(|(_, f)| Rc::clone(f))
            .collect();
        for watcher in watchers {
            watcher();
        }
    }
}

#[derive(Clone, Default)]
pub struct LoadGuard {
    scope: GuardScope,
    state: Rc<GuardState>,
}

impl fmt::Debug for LoadGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadGuard")
            .field("scope", &self.scope)
            .field("in_flight", &self.state.in_flight.borrow())
            .finish()
    }
}

impl PartialEq for LoadGuard {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && Rc::ptr_eq(&self.state, &other.state)
    }
}

impl LoadGuard {
    pub fn new(scope: GuardScope) -> Self {
        Self {
            scope,
            state: Rc::default(),
        }
    }

    pub fn scope(&self) -> GuardScope {
        self.scope
    }

    fn key(&self, entity: Entity) -> Option<Entity> {
        match self.scope {
            GuardScope::Global => None,
            GuardScope::PerEntity => Some(entity),
        }
    }

    /// Claim the slot for `entity`, or `None` if a load already holds it.
    pub fn try_acquire(&self, entity: Entity) -> Option<LoadTicket> {
        let key = self.key(entity);
        if !self.state.in_flight.borrow_mut().insert(key) {
            return None;
        }
        Some(LoadTicket {
            key,
            state: Rc::clone(&self.state),
        })
    }

    pub fn is_loading(&self, entity: Entity) -> bool {
        self.state.in_flight.borrow().contains(&self.key(entity))
    }

    /// Call `on_release` every time any ticket is released, for as long as
    /// the returned watch is alive.
    pub fn watch_release(&self, on_release: impl Fn() + 'static) -> ReleaseWatch {
        let id = self.state.next_watch.get();
        self.state.next_watch.set(id + 1);
        let listener: Listener = Rc::new(on_release);
        self.state.watchers.borrow_mut().push((id, listener));
        ReleaseWatch {
            id,
            state: Rc::downgrade(&self.state),
        }
    }
}

pub struct LoadTicket {
    key: Option<Entity>,
    state: Rc<GuardState>,
}

impl fmt::Debug for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadTicket").field("key", &self.key).finish()
    }
}

impl Drop for LoadTicket {
    fn drop(&mut self) {
        self.state.release(self.key);
    }
}

/// Subscription made by [`LoadGuard::watch_release`]; dropping it unsubscribes.
pub struct ReleaseWatch {
    id: u64,
    state: Weak<GuardState>,
}

impl Drop for ReleaseWatch {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.watchers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
