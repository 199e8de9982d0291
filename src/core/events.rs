//! Change notifications published to the presentation layer.
//!
//! Every mutation of the account manager emits one [`StateChange`]; the
//! subscriber re-reads whatever state it renders.

use std::{
    fmt,
    sync::mpsc::{channel, Receiver, Sender},
};

/// The slice of state that changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedEntity {
    Profile,
    Session,
    Transactions,
    Withdrawals,
}

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    Updated,
    Created,
    Reloaded,
    Seeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub entity: ChangedEntity,
    pub action: ChangeAction,
}

impl StateChange {
    pub fn new(entity: ChangedEntity, action: ChangeAction) -> Self {
        Self { entity, action }
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.entity, self.action)
    }
}

/// Fan-out list of channel senders. Subscribers whose receiver has been
/// dropped are pruned on the next publish.
#[derive(Debug, Default)]
pub struct ChangeBroadcaster {
    subscribers: Vec<Sender<StateChange>>,
}

impl ChangeBroadcaster {
    pub fn subscribe(&mut self) -> Receiver<StateChange> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, change: StateChange) {
        self.subscribers.retain(|tx| tx.send(change).is_ok());
        tracing::trace!(%change, subscribers = self.subscribers.len(), "state change published");
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
