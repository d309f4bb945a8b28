//! Notifications - Toast queue with auto-dismiss
//!
//! `notify()` is fire-and-forget: the toast shows immediately, disappears after
//! the configured time-to-live, and can be closed early with `dismiss()`.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::info;

use crate::platform::Timers;
use crate::types::{Millis, NotifyKind};

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: NotifyKind,
    pub shown_at: Millis,
}

/// Toast surface shared by every control on the page.
#[derive(Clone)]
pub struct Notifier {
    toasts: Signal<Vec<Toast>>,
    timers: Rc<dyn Timers>,
    ttl_ms: Millis,
    next_id: Rc<Cell<u64>>,
}

impl Notifier {
    pub fn new(timers: Rc<dyn Timers>, ttl_ms: Millis) -> Self {
        Self {
            toasts: signal(Vec::new()),
            timers,
            ttl_ms,
            next_id: Rc::new(Cell::new(1)),
        }
    }

    /// Show a toast. Returns its id.
    pub fn notify(&self, message: impl Into<String>, kind: NotifyKind) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let toast = Toast {
            id,
            message: message.into(),
            kind,
            shown_at: self.timers.now_ms(),
        };
        info!(id, kind = ?kind, message = %toast.message, "notification");

        let mut toasts = self.toasts.get();
        toasts.push(toast);
        self.toasts.set(toasts);

        let this = self.clone();
        self.timers.after(
            self.ttl_ms,
            Box::new(move || {
                this.dismiss(id);
            }),
        );
        id
    }

    /// Close a toast early. Returns `false` if it is already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut toasts = self.toasts.get();
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        if toasts.len() == before {
            return false;
        }
        self.toasts.set(toasts);
        true
    }

    /// Currently visible toasts, oldest first (tracked read).
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualClock;

    fn setup() -> (ManualClock, Notifier) {
        let clock = ManualClock::new();
        let notifier = Notifier::new(Rc::new(clock.clone()), 5000);
        (clock, notifier)
    }

    #[test]
    fn test_notify_shows_toast() {
        let (clock, notifier) = setup();
        clock.advance(250);

        let id = notifier.notify("Resume download started!", NotifyKind::Success);
        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, id);
        assert_eq!(toasts[0].shown_at, 250);
        assert_eq!(toasts[0].kind, NotifyKind::Success);
    }

    #[test]
    fn test_auto_dismiss_after_ttl() {
        let (clock, notifier) = setup();
        notifier.notify("hello", NotifyKind::Info);

        clock.advance(4999);
        assert_eq!(notifier.toasts().len(), 1);
        clock.advance(1);
        assert!(notifier.toasts().is_empty());
    }

    #[test]
    fn test_dismiss_early() {
        let (clock, notifier) = setup();
        let first = notifier.notify("one", NotifyKind::Info);
        let second = notifier.notify("two", NotifyKind::Info);

        assert!(notifier.dismiss(first));
        assert!(!notifier.dismiss(first));
        assert_eq!(notifier.toasts()[0].id, second);

        // Expiry of an already dismissed toast is harmless
        clock.advance(5000);
        assert!(notifier.toasts().is_empty());
    }
}
