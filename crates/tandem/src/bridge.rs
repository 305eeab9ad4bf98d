//! The application bridge: the boundary the application programs against.
//!
//! Two one-directional, unbounded logical queues: outgoing (application
//! to core, via [`ApplicationBridge::send`]) and incoming (core to
//! application, via [`ApplicationBridge::next_event`]). Inbound actions
//! arrive in log order, exactly once each.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::mpsc;

use tandem_core::{Action, JoinAddress, OutgoingLog, SessionId};

use crate::error::SessionError;

/// Everything a session can hand to the application.
#[derive(Debug)]
pub enum SessionEvent {
    /// Host side only: the generated join address, queued before any
    /// remote traffic and never transmitted to the peer.
    HostUrl(JoinAddress),

    /// The peer's handshake carrying its identity; the first remote
    /// item either side observes.
    PeerReady(SessionId),

    /// An application action from the peer, in log order, exactly once.
    Action(Action),

    /// Terminal: the session failed and no further delivery will occur.
    Fault(SessionError),

    /// Terminal: the session ended cleanly.
    Closed,
}

/// The handle the application holds for one side of a session.
#[derive(Debug)]
pub struct ApplicationBridge {
    log: Arc<OutgoingLog>,
    /// Locally produced events, drained before any remote delivery.
    local: VecDeque<SessionEvent>,
    actions: mpsc::UnboundedReceiver<Action>,
    control: mpsc::UnboundedReceiver<SessionEvent>,
    finished: bool,
}

impl ApplicationBridge {
    pub(crate) fn new(
        log: Arc<OutgoingLog>,
        actions: mpsc::UnboundedReceiver<Action>,
        control: mpsc::UnboundedReceiver<SessionEvent>,
        local: Vec<SessionEvent>,
    ) -> Self {
        Self {
            log,
            local: local.into(),
            actions,
            control,
            finished: false,
        }
    }

    /// Append an action for the peer. Fire-and-forget: delivery is not
    /// observable from this call.
    pub fn send(&self, action: Action) {
        self.log.append(action);
    }

    /// Wait for the next session event.
    ///
    /// All delivered actions drain before a terminal event is reported;
    /// after the terminal event this keeps returning
    /// [`SessionEvent::Closed`].
    pub async fn next_event(&mut self) -> SessionEvent {
        if let Some(event) = self.local.pop_front() {
            return event;
        }
        if self.finished {
            return SessionEvent::Closed;
        }

        if let Some(action) = self.actions.recv().await {
            return map_action(action);
        }

        // Delivery stream ended; the engine supervisor reports why.
        self.finished = true;
        match self.control.recv().await {
            Some(event) => event,
            None => SessionEvent::Closed,
        }
    }
}

/// Reserved kinds become their own events so the application never has
/// to parse them.
fn map_action(action: Action) -> SessionEvent {
    match action.ready_peer() {
        Some(peer) => SessionEvent::PeerReady(peer),
        None => SessionEvent::Action(action),
    }
}
