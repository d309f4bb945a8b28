//! Mock Async Action - Fixed-latency stand-in for a network call
//!
//! State machine:
//!
//! ```text
//! Idle --trigger--> Busy --latency elapsed--> Idle (+ notification)
//! ```
//!
//! There is no failure branch: the action always completes after its latency.
//! At most one run is in flight per action; triggering while busy is rejected
//! with [`FolioError::DuplicateTrigger`] and schedules nothing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;
use spark_signals::{signal, Signal};
use tracing::{info, warn};

use super::notify::Notifier;
use crate::error::{FolioError, Result};
use crate::platform::Timers;
use crate::types::{Millis, NotifyKind};

/// Observable state of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Busy,
}

/// Completion record of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub action: String,
    pub ticket: u64,
    pub started_at: Millis,
    pub completed_at: Millis,
}

/// Handle to one accepted run.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: u64,
    pub started_at: Millis,
    pub due_at: Millis,
    ack: Rc<RefCell<Option<Ack>>>,
}

impl Ticket {
    /// The completion record, once the latency has elapsed.
    pub fn ack(&self) -> Option<Ack> {
        self.ack.borrow().clone()
    }

    pub fn is_complete(&self) -> bool {
        self.ack.borrow().is_some()
    }
}

type CompleteHook = Box<dyn Fn(&Ack)>;

struct ActionInner {
    name: String,
    latency_ms: Millis,
    busy: Signal<bool>,
    timers: Rc<dyn Timers>,
    notifier: Notifier,
    completion: RefCell<Option<(String, NotifyKind)>>,
    next_ticket: Cell<u64>,
    hooks: RefCell<Vec<CompleteHook>>,
}

/// A user-triggered mock action (form submit, resume download, ...).
///
/// Cloning yields another handle to the same action.
#[derive(Clone)]
pub struct MockAction {
    inner: Rc<ActionInner>,
}

impl MockAction {
    pub fn new(
        name: impl Into<String>,
        latency_ms: Millis,
        timers: Rc<dyn Timers>,
        notifier: Notifier,
    ) -> Self {
        Self {
            inner: Rc::new(ActionInner {
                name: name.into(),
                latency_ms,
                busy: signal(false),
                timers,
                notifier,
                completion: RefCell::new(None),
                next_ticket: Cell::new(1),
                hooks: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Notification emitted when a run completes.
    pub fn with_completion(self, message: impl Into<String>, kind: NotifyKind) -> Self {
        self.set_completion(message, kind);
        self
    }

    /// Replace the completion notification. Applies to every handle of this
    /// action, including runs already in flight.
    pub fn set_completion(&self, message: impl Into<String>, kind: NotifyKind) {
        *self.inner.completion.borrow_mut() = Some((message.into(), kind));
    }

    /// Run `hook` after every completion, after `busy` has cleared.
    pub fn on_complete(&self, hook: impl Fn(&Ack) + 'static) {
        self.inner.hooks.borrow_mut().push(Box::new(hook));
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn latency_ms(&self) -> Millis {
        self.inner.latency_ms
    }

    /// Whether a run is in flight (tracked read). The triggering control is
    /// disabled while this is true.
    pub fn is_busy(&self) -> bool {
        self.inner.busy.get()
    }

    pub fn state(&self) -> ActionState {
        if self.is_busy() {
            ActionState::Busy
        } else {
            ActionState::Idle
        }
    }

    /// Start a run carrying `payload`.
    ///
    /// `busy` is set immediately and cleared exactly `latency_ms` later, after
    /// which the completion notification (if any) is shown and hooks run.
    pub fn submit<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Ticket> {
        let inner = &self.inner;
        if inner.busy.get() {
            warn!(action = %inner.name, "trigger rejected while busy");
            return Err(FolioError::DuplicateTrigger {
                action: inner.name.clone(),
            });
        }

        let id = inner.next_ticket.get();
        inner.next_ticket.set(id + 1);
        let started_at = inner.timers.now_ms();
        let ticket = Ticket {
            id,
            started_at,
            due_at: started_at.saturating_add(inner.latency_ms),
            ack: Rc::new(RefCell::new(None)),
        };

        let payload = serde_json::to_string(payload).unwrap_or_else(|_| "<unserializable>".into());
        info!(action = %inner.name, ticket = id, %payload, "action started");
        inner.busy.set(true);

        let this = self.inner.clone();
        let slot = ticket.ack.clone();
        inner.timers.after(
            inner.latency_ms,
            Box::new(move || {
                let ack = Ack {
                    action: this.name.clone(),
                    ticket: id,
                    started_at,
                    completed_at: this.timers.now_ms(),
                };
                this.busy.set(false);
                *slot.borrow_mut() = Some(ack.clone());
                info!(action = %this.name, ticket = id, "action completed");

                let completion = this.completion.borrow().clone();
                if let Some((message, kind)) = completion {
                    this.notifier.notify(message, kind);
                }

                // Hooks may register more hooks; those first run next time
                let running = std::mem::take(&mut *this.hooks.borrow_mut());
                for hook in &running {
                    hook(&ack);
                }
                let mut hooks = this.hooks.borrow_mut();
                let added = std::mem::replace(&mut *hooks, running);
                hooks.extend(added);
            }),
        );
        Ok(ticket)
    }

    /// Start a run with no payload.
    pub fn trigger(&self) -> Result<Ticket> {
        self.submit(&())
    }
}

// =============================================================================
// TESTS
// =============================================================================
