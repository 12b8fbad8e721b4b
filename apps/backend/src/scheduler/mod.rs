//! Phase scheduler: time-driven deadlines that force round transitions.
//!
//! Jobs are plain data. The queue only orders and deduplicates them; the
//! runner hands due jobs to the game flow, whose operations are idempotent
//! per round number, so a late or repeated job is harmless.

mod runner;

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use parking_lot::Mutex;
use time::OffsetDateTime;

use crate::domain::{Game, GameId, GameState, RoundNumber};

pub use runner::PhaseRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhaseKind {
    /// Submission window of the round ends.
    SubmissionDeadline,
    /// Rating window of the round ends.
    RatingDeadline,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhaseJob {
    pub game_id: GameId,
    pub round: RoundNumber,
    pub kind: PhaseKind,
    pub due_at: OffsetDateTime,
}

impl PhaseJob {
    fn key(&self) -> (GameId, RoundNumber, PhaseKind) {
        (self.game_id.clone(), self.round, self.kind)
    }

    /// The next deadline of a persisted game, if it is running.
    pub fn next_for(game: &Game) -> Option<Self> {
        if game.state() != GameState::InProgress {
            return None;
        }
        let round = game.active_round()?;
        let (kind, due_at) = if round.is_open() {
            (
                PhaseKind::SubmissionDeadline,
                round.opened_at()? + game.settings.round_duration(),
            )
        } else {
            (
                PhaseKind::RatingDeadline,
                round.closed_at()? + game.settings.rating_duration(),
            )
        };
        Some(Self {
            game_id: game.id.clone(),
            round: round.number(),
            kind,
            due_at,
        })
    }
}

impl Ord for PhaseJob {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_at
            .cmp(&other.due_at)
            .then_with(|| self.game_id.cmp(&other.game_id))
            .then_with(|| self.round.cmp(&other.round))
            .then_with(|| self.kind.cmp(&other.kind))
    }
}

impl PartialOrd for PhaseJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
struct QueueInner {
    heap: BinaryHeap<Reverse<PhaseJob>>,
    pending: HashSet<(GameId, RoundNumber, PhaseKind)>,
}

/// Min-heap of deadlines keyed by (game, round, kind).
#[derive(Debug, Default)]
pub struct PhaseQueue {
    inner: Mutex<QueueInner>,
}

impl PhaseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a job. Returns `false` if the same (game, round, kind) is
    /// already pending; the earlier entry wins.
    pub fn schedule(&self, job: PhaseJob) -> bool {
        let mut inner = self.inner.lock();
        if !inner.pending.insert(job.key()) {
            return false;
        }
        inner.heap.push(Reverse(job));
        true
    }

    /// Remove and return every job due at or before `now`, earliest first.
    pub fn pop_due(&self, now: OffsetDateTime) -> Vec<PhaseJob> {
        let mut inner = self.inner.lock();
        let mut due = Vec::new();
        while inner
            .heap
            .peek()
            .is_some_and(|Reverse(job)| job.due_at <= now)
        {
            if let Some(Reverse(job)) = inner.heap.pop() {
                inner.pending.remove(&job.key());
                due.push(job);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.inner.lock().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn next_due(&self) -> Option<OffsetDateTime> {
        self.inner.lock().heap.peek().map(|Reverse(job)| job.due_at)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;
    use time::Duration;

    use super::*;

    const T0: OffsetDateTime = datetime!(2026-04-01 10:00 UTC);

    fn job(game: &str, round: RoundNumber, kind: PhaseKind, secs: i64) -> PhaseJob {
        PhaseJob {
            game_id: GameId::from(game),
            round,
            kind,
            due_at: T0 + Duration::seconds(secs),
        }
    }

    #[test]
    fn pops_only_due_jobs_in_order() {
        let queue = PhaseQueue::new();
        queue.schedule(job("b", 1, PhaseKind::SubmissionDeadline, 30));
        queue.schedule(job("a", 1, PhaseKind::SubmissionDeadline, 10));
        queue.schedule(job("c", 1, PhaseKind::RatingDeadline, 90));

        assert_eq!(queue.next_due(), Some(T0 + Duration::seconds(10)));
        let due = queue.pop_due(T0 + Duration::seconds(30));
        let games: Vec<&str> = due.iter().map(|j| j.game_id.as_str()).collect();
        assert_eq!(games, vec!["a", "b"]);
        assert_eq!(queue.len(), 1);
        assert!(queue.pop_due(T0).is_empty());
    }

    #[test]
    fn duplicate_key_is_ignored_until_popped() {
        let queue = PhaseQueue::new();
        assert!(queue.schedule(job("a", 1, PhaseKind::SubmissionDeadline, 10)));
        assert!(!queue.schedule(job("a", 1, PhaseKind::SubmissionDeadline, 5)));
        assert!(queue.schedule(job("a", 1, PhaseKind::RatingDeadline, 10)));
        assert_eq!(queue.len(), 2);

        queue.pop_due(T0 + Duration::seconds(10));
        assert!(queue.is_empty());
        assert!(queue.schedule(job("a", 1, PhaseKind::SubmissionDeadline, 10)));
    }
}
