//! Page-wide show/hide/rebuild signalling between tooltip instances.
//!
//! Any part of the host can request an action on tooltip instances without a
//! direct reference to them: signals are broadcast into a per-subscriber
//! mailbox and drained by each instance's pump. Delivery is fire-and-forget;
//! membership filtering happens in the instance, which knows its own trigger
//! set. Subscribing happens on mount and unsubscribing on dispose, so the
//! subscriber list never holds dead instances.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::geometry::NodeId;

/// A coordination signal addressed to whichever instances it concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Re-run trigger discovery and binding.
    Rebuild,
    /// Synthesize a show request against a specific trigger.
    Show { target: NodeId },
    /// Synthesize a membership-checked hide request.
    Hide { target: NodeId },
}

type Mailbox = Rc<RefCell<VecDeque<Signal>>>;

/// A live subscription handed to a tooltip instance.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    mailbox: Mailbox,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Take all pending signals, in arrival order.
    pub fn drain(&self) -> Vec<Signal> {
        self.mailbox.borrow_mut().drain(..).collect()
    }
}

/// Broadcast channel over all live tooltip instances.
#[derive(Debug, Default)]
pub struct GlobalCoordinator {
    subscribers: HashMap<u64, Mailbox>,
    next_id: u64,
}

impl GlobalCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        let mailbox: Mailbox = Rc::default();
        self.subscribers.insert(id, Rc::clone(&mailbox));
        Subscription { id, mailbox }
    }

    /// Idempotent; dropping an unknown id is a no-op.
    pub fn unsubscribe(&mut self, id: u64) {
        self.subscribers.remove(&id);
    }

    /// Deliver a signal to every live subscriber.
    pub fn broadcast(&self, signal: Signal) {
        for mailbox in self.subscribers.values() {
            mailbox.borrow_mut().push_back(signal);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
