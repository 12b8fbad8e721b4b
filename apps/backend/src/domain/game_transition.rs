// apps/backend/src/domain/game_transition.rs

use crate::domain::game::GameState;
use crate::domain::ids::RoundNumber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub version: u64,
    pub state: GameState,
    pub round: RoundNumber,
    pub round_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: Game moved from Creation -> InProgress
    GameStarted,

    /// Edge-triggered: a round started accepting submissions on the clock.
    RoundOpened { round: RoundNumber },

    /// Edge-triggered: the active round stopped accepting submissions and
    /// rating began.
    SubmissionsClosed { round: RoundNumber },

    /// Edge-triggered: Game moved from InProgress -> Finished
    GameFinished,
}

/// Derive domain transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Game start (Creation -> InProgress)
    if before.state == GameState::Creation && after.state == GameState::InProgress {
        transitions.push(GameTransition::GameStarted);
    }

    // 2. Round opened on the clock: either the game just started, or the
    // round number moved while still in progress.
    if after.state == GameState::InProgress
        && after.round_open
        && (before.state != GameState::InProgress || before.round != after.round)
    {
        transitions.push(GameTransition::RoundOpened { round: after.round });
    }

    // 3. Same round flipped open -> closed without the game ending
    if before.state == GameState::InProgress
        && after.state == GameState::InProgress
        && before.round == after.round
        && before.round_open
        && !after.round_open
    {
        transitions.push(GameTransition::SubmissionsClosed { round: after.round });
    }

    // 4. Game end (!Finished -> Finished)
    if before.state != GameState::Finished && after.state == GameState::Finished {
        transitions.push(GameTransition::GameFinished);
    }

    transitions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(state: GameState, round: RoundNumber, round_open: bool) -> GameLifecycleView {
        GameLifecycleView {
            version: 1,
            state,
            round,
            round_open,
        }
    }

    #[test]
    fn test_derive_game_started_opens_round_one() {
        let before = view(GameState::Creation, 1, true);
        let after = view(GameState::InProgress, 1, true);
        let transitions = derive_game_transitions(&before, &after);
        assert_eq!(
            transitions,
            vec![
                GameTransition::GameStarted,
                GameTransition::RoundOpened { round: 1 }
            ]
        );
    }

    #[test]
    fn test_derive_submissions_closed() {
        let before = view(GameState::InProgress, 2, true);
        let after = view(GameState::InProgress, 2, false);
        let transitions = derive_game_transitions(&before, &after);
        assert_eq!(transitions, vec![GameTransition::SubmissionsClosed { round: 2 }]);
    }

    #[test]
    fn test_derive_next_round_opened() {
        let before = view(GameState::InProgress, 1, false);
        let after = view(GameState::InProgress, 2, true);
        let transitions = derive_game_transitions(&before, &after);
        assert_eq!(transitions, vec![GameTransition::RoundOpened { round: 2 }]);
    }

    #[test]
    fn test_derive_game_finished() {
        let before = view(GameState::InProgress, 3, false);
        let after = view(GameState::Finished, 3, false);
        let transitions = derive_game_transitions(&before, &after);
        assert_eq!(transitions, vec![GameTransition::GameFinished]);
    }

    #[test]
    fn test_no_change_no_transitions() {
        let v = view(GameState::InProgress, 1, true);
        assert!(derive_game_transitions(&v, &v).is_empty());

        let done = view(GameState::Finished, 3, false);
        assert!(derive_game_transitions(&done, &done).is_empty());
    }
}
