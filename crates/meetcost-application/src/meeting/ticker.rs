use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

use super::controller::ControllerState;

/// Background task that accrues cost once per period.
///
/// The task only holds a `Weak` reference to the controller state, so it ends
/// on its own once the controller is gone. Cancelling is idempotent.
pub(super) struct Ticker {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub(super) fn spawn(state: Weak<ControllerState>, period: Duration) -> Self {
        let token = CancellationToken::new();
        let child = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            // Accrual is elapsed-based, a late tick loses nothing.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::debug!(period_ms = period.as_millis() as u64, "ticker started");

            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        let Some(state) = state.upgrade() else { break };
                        if let Err(e) = state.tick().await {
                            tracing::error!("tick failed: {}", e);
                        }
                    }
                }
            }

            tracing::debug!("ticker stopped");
        });

        Self { token, handle }
    }

    pub(super) fn cancel(&self) {
        self.token.cancel();
    }

    pub(super) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
