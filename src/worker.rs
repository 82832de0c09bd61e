// Background reporting task: one cycle per poll interval, never overlapping.
// Shutdown is cooperative; an in-flight send finishes before the loop exits.

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{Instrument, error, info};

use crate::session::ReportingSession;

/// Why the worker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Shutdown,
    Halted,
}

/// Spawns the reporting loop. The first cycle fires one poll interval after the call.
///
/// The handle yields the session back so callers can inspect its final state.
pub fn spawn(
    mut session: ReportingSession,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> JoinHandle<(ReportingSession, StopReason)> {
    let poll_interval = session.poll_interval();
    let span = tracing::info_span!(
        "reporting_worker",
        plugin = %session.name(),
        poll_interval_secs = poll_interval.as_secs()
    );

    tokio::spawn(
        async move {
            info!(components = session.components().len(), "starting reporting session");
            let mut tick = interval_at(Instant::now() + poll_interval, poll_interval);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let reason = loop {
                tokio::select! {
                    _ = tick.tick() => {
                        let outcome = session.run_cycle(Instant::now()).await;
                        session.settle();
                        if outcome.is_halt() {
                            error!("encountered a fatal error; reporting session is shutting down");
                            break StopReason::Halted;
                        }
                    }
                    _ = &mut shutdown_rx => {
                        info!("reporting session stopped");
                        break StopReason::Shutdown;
                    }
                }
            };
            (session, reason)
        }
        .instrument(span),
    )
}
