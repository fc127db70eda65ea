use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::cards::{CardId, DECK_SIZE};

/// Deterministic RNG factory for a given (seed, game_id) pair.
///
/// - Derives a per-game 64-bit seed as `seed ^ rotate(game_id)`.
/// - Uses PCG 64-bit generator (rand_pcg::Pcg64) for reproducible sequences.
/// - Same inputs always give the same shuffle and the same deal coin flip.
#[inline]
pub fn rng_for_game(seed: u64, game_id: u64) -> impl Rng {
    let derived: u64 = seed ^ game_id.rotate_left(32);
    Pcg64::seed_from_u64(derived)
}

/// A shuffled 104-card deal sequence.
pub fn shuffled_deal<R: Rng>(rng: &mut R) -> Vec<CardId> {
    let mut cards: Vec<CardId> = (0..DECK_SIZE as u8).map(CardId).collect();
    cards.shuffle(rng);
    cards
}
