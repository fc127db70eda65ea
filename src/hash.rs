use crate::state::GameState;
use crate::table::{PileId, PILE_COUNT};
use crate::types::PlayerId;

/// SplitMix64 PRNG step for stable, fast token generation.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn token128_from_seed(seed: u64) -> u128 {
    // Two rounds to build 128 bits deterministically.
    let lo = splitmix64(seed ^ 0xC0FF_EE00_D15E_CAFE);
    let hi = splitmix64(seed ^ 0xDEAD_BEEF_F00D_FACE ^ lo.rotate_left(17));
    ((hi as u128) << 64) | (lo as u128)
}

// Domain tags (arbitrary but fixed)
const DOM_PILE: u64 = 0x4B52_A9E7_0000_0001;
const DOM_NEXT: u64 = 0x4B52_A9E7_0000_00C0;

/// Token for one card occupying a given depth of a given pile. Depth is mixed
/// in because piles are ordered stacks, so the XOR fold must not treat the
/// same cards in a different order as the same position.
#[inline]
pub fn token_card(pile: PileId, depth: usize, card: u8, face_up: bool) -> u128 {
    let seed = DOM_PILE
        ^ (pile.0 as u64)
        ^ ((depth as u64) << 8)
        ^ ((card as u64) << 24)
        ^ ((face_up as u64) << 32);
    token128_from_seed(seed)
}

#[inline]
pub fn token_next(p: PlayerId) -> u128 {
    token128_from_seed(DOM_NEXT ^ p.index() as u64)
}

/// Full position key: every pile's ordered contents plus the side to move.
/// Used for loop detection in simulations and state-identity assertions in
/// tests; never persisted.
pub fn state_key(state: &GameState) -> u128 {
    let mut z: u128 = 0;
    for i in 0..PILE_COUNT {
        let pile = PileId(i as u8);
        for (depth, &id) in state.table.cards_of(pile).iter().enumerate() {
            let card = state.table.card(id);
            z ^= token_card(pile, depth, id.0, card.face_up);
        }
    }
    z ^= token_next(state.current);
    z
}
