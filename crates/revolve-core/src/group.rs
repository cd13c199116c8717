//! Group coordination: a registry of named channels keeping multiple
//! carousel instances in sync.
//!
//! The registry is constructed explicitly and shared by handle; there is
//! no process-wide singleton. Channels have no teardown of their own,
//! they are simply empty once every subscriber has left.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Identifies one subscription so the publisher can exclude itself and
/// so subscriptions can be cancelled individually.
pub type HandlerId = u64;

type Handler = Rc<dyn Fn(i64)>;

#[derive(Default)]
pub struct GroupRegistry {
    channels: RefCell<HashMap<String, Vec<(HandlerId, Handler)>>>,
    next_id: Cell<HandlerId>,
}

impl GroupRegistry {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn subscribe(&self, group: &str, handler: Rc<dyn Fn(i64)>) -> HandlerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.channels
            .borrow_mut()
            .entry(group.to_string())
            .or_default()
            .push((id, handler));
        tracing::debug!(group, id, "group subscription added");
        id
    }

    pub fn unsubscribe(&self, group: &str, id: HandlerId) {
        let mut channels = self.channels.borrow_mut();
        if let Some(handlers) = channels.get_mut(group) {
            handlers.retain(|(handler_id, _)| *handler_id != id);
        }
    }

    /// Invoke every subscriber of `group` synchronously, in registration
    /// order.
    pub fn publish(&self, group: &str, target: i64) {
        self.dispatch(group, None, target);
    }

    /// Invoke every subscriber of `group` except `source`. Used by a
    /// sliding instance so its own handler never re-enters it.
    pub fn publish_from(&self, group: &str, source: HandlerId, target: i64) {
        self.dispatch(group, Some(source), target);
    }

    pub fn subscriber_count(&self, group: &str) -> usize {
        self.channels
            .borrow()
            .get(group)
            .map_or(0, |handlers| handlers.len())
    }

    fn dispatch(&self, group: &str, skip: Option<HandlerId>, target: i64) {
        // Snapshot the subscriber list before invoking anything: handlers
        // may subscribe or unsubscribe mid-broadcast.
        let handlers: Vec<(HandlerId, Handler)> = match self.channels.borrow().get(group) {
            Some(handlers) => handlers.clone(),
            None => return,
        };

        for (id, handler) in handlers {
            if Some(id) == skip {
                continue;
            }
            handler(target);
        }
    }
}
