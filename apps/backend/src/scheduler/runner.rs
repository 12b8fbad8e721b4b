use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{PhaseJob, PhaseKind};
use crate::error::AppError;
use crate::services::game_flow::GameFlowService;

/// Fires due deadlines into the game flow on a fixed tick.
pub struct PhaseRunner {
    flow: Arc<GameFlowService>,
    tick: Duration,
}

impl PhaseRunner {
    pub fn new(flow: Arc<GameFlowService>, tick: Duration) -> Self {
        Self { flow, tick }
    }

    /// Fire every job that is due now. Failures are logged and dropped; the
    /// flow operations are safe to miss or repeat.
    ///
    /// Returns how many jobs were fired.
    pub async fn run_due(&self) -> usize {
        let now = self.flow.clock().now();
        let due = self.flow.queue().pop_due(now);
        let fired = due.len();

        for job in due {
            let result = match job.kind {
                PhaseKind::SubmissionDeadline => {
                    self.flow.close_round(&job.game_id, job.round).await
                }
                PhaseKind::RatingDeadline => self.flow.advance_round(&job.game_id, job.round).await,
            };
            if let Err(e) = result {
                warn!(
                    game_id = %job.game_id,
                    round = job.round,
                    kind = ?job.kind,
                    error = %e,
                    "Phase job failed"
                );
            }
        }

        if fired > 0 {
            debug!(fired, pending = self.flow.queue().len(), "Phase tick");
        }
        fired
    }

    /// Rebuild pending deadlines from running games after a restart.
    pub async fn recover(&self) -> Result<usize, AppError> {
        let games = self.flow.in_progress_games().await?;
        let mut scheduled = 0;
        for game in &games {
            if let Some(job) = PhaseJob::next_for(game) {
                if self.flow.queue().schedule(job) {
                    scheduled += 1;
                }
            }
        }
        info!(games = games.len(), scheduled, "Recovered phase deadlines");
        Ok(scheduled)
    }

    /// Tick until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(tick_ms = self.tick.as_millis() as u64, "Phase runner started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Phase runner stopped");
                    break;
                }
                _ = interval.tick() => {
                    self.run_due().await;
                }
            }
        }
    }
}
