//! Synchronous typed publish/subscribe bus.
//!
//! The bus is the only path between the core and everything outside it.
//! Delivery is immediate and in registration order; handlers are plain
//! observers and carry no business logic. The whole core is
//! single-threaded, so the bus uses interior mutability instead of locks.

use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use super::types::{validate_event, EventKind, GameEvent};
use crate::core::constants::MAX_REENTRANT_PUBLISH_DEPTH;

/// Token returned by registration, used to unregister. Closures are not
/// comparable in Rust, so removal is by id (or by owner tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler = Box<dyn Fn(&GameEvent)>;

struct Entry {
    id: HandlerId,
    kind: EventKind,
    owner: &'static str,
    once: bool,
    dead: Cell<bool>,
    handler: Handler,
}

/// Single shared event bus, constructed once and owned by the
/// application context alongside the game state.
#[derive(Default)]
pub struct EventBus {
    entries: RefCell<Vec<Rc<Entry>>>,
    next_id: Cell<u64>,
    // Kinds currently being dispatched; re-entrant publishes are legal
    // but the same kind is depth-limited to break feedback loops.
    dispatch_stack: RefCell<Vec<EventKind>>,
    torn_down: Cell<bool>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for one event kind. Handlers registered
    /// while a publish is in flight do not receive that event.
    pub fn register<F>(&self, kind: EventKind, owner: &'static str, handler: F) -> HandlerId
    where
        F: Fn(&GameEvent) + 'static,
    {
        self.push_entry(kind, owner, false, Box::new(handler))
    }

    /// Registers a handler that is removed after its first delivery.
    pub fn register_once<F>(&self, kind: EventKind, owner: &'static str, handler: F) -> HandlerId
    where
        F: Fn(&GameEvent) + 'static,
    {
        self.push_entry(kind, owner, true, Box::new(handler))
    }

    fn push_entry(
        &self,
        kind: EventKind,
        owner: &'static str,
        once: bool,
        handler: Handler,
    ) -> HandlerId {
        let id = HandlerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.entries.borrow_mut().push(Rc::new(Entry {
            id,
            kind,
            owner,
            once,
            dead: Cell::new(false),
            handler,
        }));
        id
    }

    /// Removes one handler. Returns false if no live handler matched.
    pub fn unregister(&self, kind: EventKind, id: HandlerId) -> bool {
        let mut found = false;
        for entry in self.entries.borrow().iter() {
            if entry.kind == kind && entry.id == id && !entry.dead.get() {
                entry.dead.set(true);
                found = true;
            }
        }
        self.sweep_if_idle();
        found
    }

    /// Removes every handler registered under the given owner tag.
    pub fn remove_owner(&self, owner: &'static str) {
        for entry in self.entries.borrow().iter() {
            if entry.owner == owner {
                entry.dead.set(true);
            }
        }
        self.sweep_if_idle();
    }

    /// Removes all handlers, or all handlers for one kind.
    pub fn remove_all(&self, kind: Option<EventKind>) {
        for entry in self.entries.borrow().iter() {
            if kind.is_none() || kind == Some(entry.kind) {
                entry.dead.set(true);
            }
        }
        self.sweep_if_idle();
    }

    /// Number of live handlers for a kind.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.kind == kind && !e.dead.get())
            .count()
    }

    /// Delivers an event synchronously to every currently-registered
    /// handler for its kind, in registration order. A panicking handler
    /// is logged and skipped; the rest still receive the event.
    pub fn publish(&self, event: GameEvent) {
        if self.torn_down.get() {
            tracing::debug!(kind = ?event.kind(), "publish after shutdown dropped");
            return;
        }

        if cfg!(debug_assertions) {
            if let Err(reason) = validate_event(&event) {
                tracing::warn!(kind = ?event.kind(), %reason, "malformed event payload");
            }
        }

        let kind = event.kind();
        {
            let stack = self.dispatch_stack.borrow();
            let depth = stack.iter().filter(|k| **k == kind).count();
            if depth >= MAX_REENTRANT_PUBLISH_DEPTH {
                tracing::warn!(?kind, depth, "re-entrant publish depth exceeded, event dropped");
                return;
            }
        }

        // Snapshot the matching handlers so registration during dispatch
        // neither invalidates iteration nor sees the in-flight event.
        let snapshot: Vec<Rc<Entry>> = self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.kind == kind && !e.dead.get())
            .cloned()
            .collect();

        self.dispatch_stack.borrow_mut().push(kind);
        for entry in snapshot {
            if entry.dead.get() {
                continue;
            }
            let outcome = catch_unwind(AssertUnwindSafe(|| (entry.handler)(&event)));
            if outcome.is_err() {
                tracing::error!(?kind, owner = entry.owner, "event handler panicked");
            }
            if entry.once {
                entry.dead.set(true);
            }
        }
        self.dispatch_stack.borrow_mut().pop();
        self.sweep_if_idle();
    }

    /// Tears the bus down. Later publishes become silent no-ops.
    pub fn shutdown(&self) {
        self.torn_down.set(true);
        self.entries.borrow_mut().clear();
    }

    fn sweep_if_idle(&self) {
        if self.dispatch_stack.borrow().is_empty() {
            self.entries.borrow_mut().retain(|e| !e.dead.get());
        }
    }
}
