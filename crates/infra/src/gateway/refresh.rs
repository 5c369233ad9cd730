//! Single-flight session refresh bookkeeping
//!
//! At most one refresh call is in flight per gateway. The first request to
//! see a 401 becomes the leader and runs the refresh; every request that
//! fails while it is running parks here in arrival order and is settled by
//! the leader once the refresh outcome is known.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

use super::errors::GatewayError;
use super::request::{GatewayResponse, RequestSpec};

pub(crate) type Reply = Result<GatewayResponse, GatewayError>;

/// A request waiting for the in-flight refresh to settle
#[derive(Debug)]
pub(crate) struct PendingRequest {
    pub(crate) spec: RequestSpec,
    reply: oneshot::Sender<Reply>,
}

impl PendingRequest {
    /// Deliver the final outcome; a caller that has gone away is ignored.
    pub(crate) fn resolve(self, outcome: Reply) {
        let _ = self.reply.send(outcome);
    }

    pub(crate) fn reject(self, error: GatewayError) {
        self.resolve(Err(error));
    }

    /// The caller stopped waiting, so replaying would be wasted work
    pub(crate) fn is_abandoned(&self) -> bool {
        self.reply.is_closed()
    }
}

/// Outcome of presenting a 401'd request to the refresh state
#[derive(Debug)]
pub(crate) enum Admission {
    /// No refresh was running; the caller must perform it
    Leader(RequestSpec),
    /// A refresh is already running; wait for the leader's verdict
    Queued(oneshot::Receiver<Reply>),
}

#[derive(Debug, Default)]
pub(crate) struct RefreshState {
    in_flight: bool,
    queue: VecDeque<PendingRequest>,
}

impl RefreshState {
    /// Join the current refresh cycle, or open a new one.
    pub(crate) fn admit(&mut self, spec: RequestSpec) -> Admission {
        if self.in_flight {
            let (reply, receiver) = oneshot::channel();
            self.queue.push_back(PendingRequest { spec, reply });
            debug!(queued = self.queue.len(), "request queued behind session refresh");
            Admission::Queued(receiver)
        } else {
            self.in_flight = true;
            Admission::Leader(spec)
        }
    }

    /// Close the cycle and hand back everything that queued behind it.
    ///
    /// Clearing the flag and draining the queue happen under the same lock,
    /// so a request arriving afterwards always starts a fresh cycle.
    pub(crate) fn settle(&mut self) -> Vec<PendingRequest> {
        self.in_flight = false;
        self.queue.drain(..).collect()
    }

    pub(crate) fn is_refreshing(&self) -> bool {
        self.in_flight
    }

    pub(crate) fn queued(&self) -> usize {
        self.queue.len()
    }
}

/// Leader-side handle on an open refresh cycle.
///
/// Dropping it without calling [`RefreshCycle::settle`] (the leader's future
/// was cancelled mid-refresh) closes the cycle and rejects the waiters so
/// nobody stays parked forever.
pub(crate) struct RefreshCycle {
    state: Arc<Mutex<RefreshState>>,
    settled: bool,
}

impl RefreshCycle {
    pub(crate) fn open(state: Arc<Mutex<RefreshState>>) -> Self {
        Self { state, settled: false }
    }

    pub(crate) fn settle(mut self) -> Vec<PendingRequest> {
        self.settled = true;
        let drained = self.state.lock().settle();
        drained
    }
}

impl Drop for RefreshCycle {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let orphaned = self.state.lock().settle();
        if !orphaned.is_empty() {
            debug!(count = orphaned.len(), "refresh leader dropped; rejecting queued requests");
        }
        for pending in orphaned {
            pending.reject(GatewayError::Cancelled);
        }
    }
}
