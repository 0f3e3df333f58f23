//! Inbox channel types.
//!
//! Everything asynchronous reports back to the runtime through one
//! unbounded channel: watch forwarders, and the navigator the controller
//! signals.

use plate_core::navigation::{NavRequest, Navigator, Route};
use tokio::sync::{mpsc, watch};

use crate::events::UiEvent;

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Navigator that posts `UiEvent::Navigate` into the inbox.
pub struct InboxNavigator {
    tx: UiEventSender,
}

impl InboxNavigator {
    pub fn new(tx: UiEventSender) -> Self {
        Self { tx }
    }

    fn send(&self, request: NavRequest) {
        if self.tx.send(UiEvent::Navigate(request)).is_err() {
            tracing::debug!(?request, "navigation dropped, runtime is gone");
        }
    }
}

impl Navigator for InboxNavigator {
    fn replace(&self, route: Route) {
        self.send(NavRequest::Replace(route));
    }

    fn back(&self) {
        self.send(NavRequest::Back);
    }
}

/// Forwards every value published on `rx` into the inbox.
///
/// Stops when the sender side is dropped or the inbox is closed.
pub fn forward_watch<T, F>(mut rx: watch::Receiver<T>, tx: UiEventSender, wrap: F)
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> UiEvent + Send + 'static,
{
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let value = rx.borrow_and_update().clone();
            if tx.send(wrap(value)).is_err() {
                break;
            }
        }
    });
}
