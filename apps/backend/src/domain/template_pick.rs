//! Deterministic template assignment.
//!
//! A player sees the same template for the whole round no matter how often
//! they ask, and different players usually see different ones.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use xxhash_rust::xxh3::xxh3_64;

use super::ids::{GameId, RoundNumber, UserId};
use super::template::Template;

/// Derive the RNG seed for one (game, player, round) triple.
pub fn derive_template_seed(game_id: &GameId, user_id: &UserId, round: RoundNumber) -> u64 {
    let base = xxh3_64(game_id.as_str().as_bytes());
    let user = xxh3_64(user_id.as_str().as_bytes());

    base.wrapping_add(user.wrapping_mul(31))
        .wrapping_add(u64::from(round).wrapping_mul(1_000_003))
}

/// Pick a template from the pool. `None` only for an empty pool.
pub fn pick_template<'a>(
    pool: &'a [Template],
    game_id: &GameId,
    user_id: &UserId,
    round: RoundNumber,
) -> Option<&'a Template> {
    if pool.is_empty() {
        return None;
    }
    let mut rng = ChaCha8Rng::seed_from_u64(derive_template_seed(game_id, user_id, round));
    pool.get(rng.random_range(0..pool.len()))
}
