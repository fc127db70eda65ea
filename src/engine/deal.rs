use rand::Rng;

use crate::cards::{CardId, DECK_SIZE};
use crate::state::GameState;
use crate::table::Table;
use crate::types::PlayerId;

const TABLED_PER_PLAYER: usize = 4;
const RESERVE_SIZE: usize = 13;
const STOCK_SIZE: usize = 35;

/// Perform the fixed deal from a shuffled 104-card sequence and compute the
/// starting player.
///
/// Dealing order matches the original: 4 tabled cards per player and 13
/// reserve cards per player off the back of the sequence, then 35 stock cards
/// per player off the front.
///
/// Starting player tie-break chain: higher reserve top rank, then higher best
/// tabled rank, then higher tabled rank sum, then a coin flip from `rng`.
pub fn restart<R: Rng>(
    state: &mut GameState,
    shuffled: &[CardId],
    rng: &mut R,
) -> Result<(), String> {
    if shuffled.len() != DECK_SIZE {
        return Err(format!(
            "deal expects {DECK_SIZE} cards, got {}",
            shuffled.len()
        ));
    }
    let mut seen = [false; DECK_SIZE];
    for &id in shuffled {
        let slot = seen
            .get_mut(id.index())
            .ok_or_else(|| format!("card id {} out of range", id.0))?;
        if *slot {
            return Err(format!("card id {} dealt twice", id.0));
        }
        *slot = true;
    }

    state.table.clear();
    state.clear_history();

    let mut front = 0usize;
    let mut back = shuffled.len();

    // Tabled cards; track the tie-break accumulators as they are dealt.
    // All four start at zero (ranks are >= 1, so zero is a true sentinel).
    let mut best = [0u8; 2];
    let mut sum = [0u32; 2];
    for i in 0..2 * TABLED_PER_PLAYER {
        back -= 1;
        let id = shuffled[back];
        state.table.place(id, Table::tableau(i), true);
        let p = usize::from(i >= TABLED_PER_PLAYER);
        let v = state.table.card(id).rank.value();
        best[p] = best[p].max(v);
        sum[p] += u32::from(v);
    }

    for player in [PlayerId::One, PlayerId::Two] {
        let reserve = Table::reserve(player);
        for _ in 0..RESERVE_SIZE {
            back -= 1;
            state.table.place(shuffled[back], reserve, false);
        }
        if let Some(top) = state.table.top_card(reserve) {
            state.table.set_face_up(top, true);
        }
    }

    for player in [PlayerId::One, PlayerId::Two] {
        let stock = Table::stock(player);
        for _ in 0..STOCK_SIZE {
            state.table.place(shuffled[front], stock, false);
            front += 1;
        }
    }
    debug_assert_eq!(front, back);

    let reserve_rank = |p: PlayerId| {
        state
            .table
            .top_card(Table::reserve(p))
            .map_or(0, |id| state.table.card(id).rank.value())
    };
    let r1 = reserve_rank(PlayerId::One);
    let r2 = reserve_rank(PlayerId::Two);

    state.current = if r1 != r2 {
        if r1 > r2 {
            PlayerId::One
        } else {
            PlayerId::Two
        }
    } else if best[0] != best[1] {
        if best[0] > best[1] {
            PlayerId::One
        } else {
            PlayerId::Two
        }
    } else if sum[0] != sum[1] {
        if sum[0] > sum[1] {
            PlayerId::One
        } else {
            PlayerId::Two
        }
    } else if rng.gen_bool(0.5) {
        PlayerId::One
    } else {
        PlayerId::Two
    };

    Ok(())
}
