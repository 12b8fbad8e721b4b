//! Property tests for round progression driven through the game flow with
//! random interleavings of player actions and deadline ticks.

mod common;
mod support;

use std::collections::HashSet;

use common::proptest_prelude::proptest_prelude_config;
use meme_clash::domain::{Game, GameState};
use proptest::prelude::*;
use support::{new_meme, settings, template_id, user, vote, Harness};

const PLAYERS: [&str; 3] = ["ann", "ben", "cat"];

#[derive(Debug, Clone)]
enum Step {
    Submit(usize),
    Rate { rater: usize, target: usize, score: u8 },
    Tick(i64),
    Advance,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0..PLAYERS.len()).prop_map(Step::Submit),
        3 => (0..PLAYERS.len(), 0..PLAYERS.len(), 1u8..=5)
            .prop_map(|(rater, target, score)| Step::Rate { rater, target, score }),
        2 => (1i64..=90).prop_map(Step::Tick),
        1 => Just(Step::Advance),
    ]
}

fn check_shape(game: &Game) {
    let max = game.settings.max_rounds;
    assert!(game.current_round() >= 1);
    assert!(game.current_round() <= max);
    assert_eq!(game.rounds().len() as u32, game.current_round());
    for (i, round) in game.rounds().iter().enumerate() {
        assert_eq!(round.number(), i as u32 + 1);
        if i + 1 < game.rounds().len() {
            assert!(!round.is_open(), "only the active round may be open");
        }
    }
    if game.state() == GameState::Finished {
        assert_eq!(game.current_round(), max);
        assert!(game.rounds().iter().all(|r| !r.is_open()));
    }

    let mut seen = HashSet::new();
    for round in game.rounds() {
        for r in round.ratings() {
            assert!(
                seen.insert((r.user_id.clone(), r.meme_id)),
                "duplicate rating by {} for {}",
                r.user_id,
                r.meme_id
            );
        }
    }
}

async fn play(max_rounds: u32, steps: Vec<Step>) {
    let h = Harness::new();
    let game = h.started_game(&PLAYERS, settings(max_rounds)).await;
    let runner = h.runner();
    let mut last_version = game.version;

    for step in steps {
        let current = h.flow.get_game(&game.id).await.unwrap();
        match step {
            Step::Submit(p) => {
                let who = PLAYERS[p];
                let _ = h
                    .flow
                    .create_meme(&game.id, template_id(), new_meme(who, "caption"), &user(who))
                    .await;
            }
            Step::Rate { rater, target, score } => {
                let memes = current.active_round().map(|r| r.memes()).unwrap_or_default();
                if let Some(meme) = memes.iter().find(|m| m.user_id == user(PLAYERS[target])) {
                    let who = PLAYERS[rater];
                    let _ = h
                        .flow
                        .create_rating(&game.id, meme.id, vote(score, who), &user(who))
                        .await;
                }
            }
            Step::Tick(secs) => {
                h.advance_clock(secs);
                runner.run_due().await;
            }
            Step::Advance => {
                let _ = h.flow.advance_round(&game.id, current.current_round()).await;
            }
        }

        let after = h.flow.get_game(&game.id).await.unwrap();
        assert!(after.version >= last_version);
        last_version = after.version;
        check_shape(&after);
    }
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    #[test]
    fn rounds_stay_within_bounds_and_ratings_unique(
        max_rounds in 1u32..=4,
        steps in prop::collection::vec(step(), 1..40),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        rt.block_on(play(max_rounds, steps));
    }
}
