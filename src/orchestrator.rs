//! Request lifecycle for the single optimization call.
//!
//! The orchestrator drives `MutationState` through one episode at a time:
//! `begin` moves to `Pending` synchronously and hands out a `Ticket`, `run`
//! performs the call and settles. Each ticket carries a sequence number and
//! only the latest one may settle, so a response from a superseded episode is
//! dropped instead of overwriting newer state.

use crate::api::{OptimizeTransport, RequestPayload, ResponseModel};
use crate::error::{FcError, FcResult};
use crate::normalize::{normalize, Failure};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Pending,
    Success(ResponseModel),
    Failed(String),
}

impl MutationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, MutationState::Pending)
    }

    pub fn result(&self) -> Option<&ResponseModel> {
        match self {
            MutationState::Success(body) => Some(body),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MutationState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Proof that an episode was started. Consumed by `run`.
#[derive(Debug)]
pub struct Ticket {
    seq: u64,
    payload: RequestPayload,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn payload(&self) -> &RequestPayload {
        &self.payload
    }
}

#[derive(Debug, Default)]
struct Tracker {
    state: MutationState,
    latest: u64,
}

pub struct RequestOrchestrator<T> {
    transport: T,
    timeout: Duration,
    tracker: Mutex<Tracker>,
}

impl<T: OptimizeTransport> RequestOrchestrator<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        Self {
            transport,
            timeout,
            tracker: Mutex::new(Tracker::default()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // The tracker holds plain data, so a poisoned lock is still usable.
    fn tracker(&self) -> MutexGuard<'_, Tracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> MutationState {
        self.tracker().state.clone()
    }

    /// False while a request is pending. The front-end disables its submit
    /// control on this.
    pub fn can_submit(&self) -> bool {
        !self.tracker().state.is_pending()
    }

    pub fn begin(&self, payload: RequestPayload) -> FcResult<Ticket> {
        let mut tracker = self.tracker();
        if tracker.state.is_pending() {
            warn!("Submission ignored: request #{} still pending", tracker.latest);
            return Err(FcError::Busy);
        }
        tracker.latest += 1;
        tracker.state = MutationState::Pending;
        Ok(Ticket {
            seq: tracker.latest,
            payload,
        })
    }

    /// Returns to `Idle` and invalidates any outstanding ticket.
    pub fn reset(&self) {
        let mut tracker = self.tracker();
        tracker.latest += 1;
        tracker.state = MutationState::Idle;
    }

    pub async fn run(&self, ticket: Ticket) -> MutationState {
        let p = *ticket.payload();
        info!(
            "🚀 Request #{}: {} customers, {} FC candidates, k={}",
            ticket.seq, p.num_customers, p.num_fc_candidates, p.k
        );

        let started = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, self.transport.optimize(&p)).await;

        let next = match outcome {
            Ok(Ok(body)) => {
                for issue in body.check_consistency(p.k) {
                    warn!("Result #{} looks inconsistent: {}", ticket.seq, issue);
                }
                info!(
                    "✅ Request #{} succeeded in {:.1}s (total cost {})",
                    ticket.seq,
                    started.elapsed().as_secs_f32(),
                    body.total_cost
                );
                MutationState::Success(body)
            }
            Ok(Err(failure)) => {
                let message = normalize(Some(&failure));
                warn!("❌ Request #{} failed: {}", ticket.seq, message);
                MutationState::Failed(message)
            }
            Err(_) => {
                let failure = Failure::timeout(self.timeout.as_millis());
                let message = normalize(Some(&failure));
                warn!("⏱️  Request #{} timed out", ticket.seq);
                MutationState::Failed(message)
            }
        };

        let mut tracker = self.tracker();
        if tracker.latest == ticket.seq {
            tracker.state = next;
        } else {
            debug!(
                "Dropping settlement of #{} (latest is #{})",
                ticket.seq, tracker.latest
            );
        }
        tracker.state.clone()
    }

    pub async fn submit(&self, payload: RequestPayload) -> FcResult<MutationState> {
        let ticket = self.begin(payload)?;
        Ok(self.run(ticket).await)
    }
}
