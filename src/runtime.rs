//! Runtime driving the demo state machine
//!
//! Owns the snapshot, interprets effects from the pure transition function,
//! spawns the single gateway call for an accepted submission, and feeds the
//! settled outcome back in. Snapshots are pushed to SSE subscribers over a
//! broadcast channel so clients redraw from the latest state.

use crate::demo::{
    transition, DemoMode, DemoSnapshot, Effect, Event, Outcome, TransitionError,
};
use crate::gateway::DemoGateway;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

pub struct DemoRuntime {
    gateway: DemoGateway,
    snapshot: Mutex<DemoSnapshot>,
    broadcast_tx: broadcast::Sender<DemoSnapshot>,
}

impl DemoRuntime {
    pub fn new(gateway: DemoGateway) -> Arc<Self> {
        let (broadcast_tx, _) = broadcast::channel(32);
        Arc::new(Self {
            gateway,
            snapshot: Mutex::new(DemoSnapshot::default()),
            broadcast_tx,
        })
    }

    /// Current state, cloned for the caller
    pub async fn snapshot(&self) -> DemoSnapshot {
        self.snapshot.lock().await.clone()
    }

    /// Subscribe to snapshot broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<DemoSnapshot> {
        self.broadcast_tx.subscribe()
    }

    /// Submit a demo request. `Err(Busy)` while a request is in flight and
    /// `Err(EmptyInput)` for a blank analysis payload; in both cases no
    /// gateway call is made and the state is unchanged.
    pub async fn submit(
        self: &Arc<Self>,
        mode: DemoMode,
        input: String,
    ) -> Result<(), TransitionError> {
        let effects = self.apply(Event::Submit { mode, input }).await?;

        for effect in effects {
            if let Effect::CallGateway { mode, input } = effect {
                let runtime = Arc::clone(self);
                // No cancellation: the call runs to completion and settles
                // whenever the provider answers.
                tokio::spawn(async move {
                    let outcome = match mode {
                        DemoMode::Intelligence => {
                            Outcome::Intelligence(runtime.gateway.fetch_intelligence(&input).await)
                        }
                        DemoMode::Analysis => {
                            Outcome::Analysis(runtime.gateway.analyze_incident(&input).await)
                        }
                    };
                    runtime.settle(outcome).await;
                });
            }
        }

        Ok(())
    }

    /// Switch the visible panel. Never cancels an in-flight request.
    pub async fn select_mode(&self, mode: DemoMode) -> Result<(), TransitionError> {
        self.apply(Event::SelectMode { mode }).await?;
        Ok(())
    }

    async fn settle(&self, outcome: Outcome) {
        if let Err(err) = self.apply(Event::Settled { outcome }).await {
            // Only possible if a settle races a state the machine does not
            // expect; log and drop rather than poison the snapshot.
            tracing::error!(error = %err, "Dropped unexpected settle event");
        }
    }

    /// Run one transition under the snapshot lock. Broadcast effects are
    /// handled here; remaining effects are returned to the caller.
    async fn apply(&self, event: Event) -> Result<Vec<Effect>, TransitionError> {
        let mut guard = self.snapshot.lock().await;
        let result = transition(&guard, event)?;
        *guard = result.snapshot;
        let current = guard.clone();
        drop(guard);

        let mut remaining = Vec::new();
        for effect in result.effects {
            match effect {
                Effect::Broadcast => {
                    // No subscribers is fine; SSE clients come and go.
                    let _ = self.broadcast_tx.send(current.clone());
                }
                other => remaining.push(other),
            }
        }

        Ok(remaining)
    }
}
