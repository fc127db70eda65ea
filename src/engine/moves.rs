use crate::cards::CardId;
use crate::engine::legality::check_compulsory_moves;
use crate::state::GameState;
use crate::table::{PileId, Table};
use crate::types::{PileRole, Rank};

/// What a committed move did to the session, reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Where the cards actually landed, after foundation auto-routing.
    pub destination: PileId,
    pub turn_ended: bool,
    pub game_won: bool,
    pub game_lost: bool,
}

/// Two foundation slots exist per suit (two decks). An Ace is routed to the
/// suit's first slot if it is free, otherwise the second; non-Ace foundation
/// drops already name the pile holding their suit's run.
pub fn route_foundation(state: &GameState, cards: &[CardId], dest: PileId) -> PileId {
    if state.table.role(dest) == PileRole::Foundation {
        if let Some(&first) = cards.first() {
            let card = state.table.card(first);
            if card.rank == Rank::Ace {
                let left = Table::foundation(card.suit.index());
                return if state.table.is_empty(left) {
                    left
                } else {
                    Table::foundation(card.suit.index() + 4)
                };
            }
        }
    }
    dest
}

/// Commit a move and run the post-move bookkeeping: play history, reserve top
/// reveal, and the turn switch when the mover discards onto their own waste.
/// Legality is the caller's concern (`check_add`/`check_remove`); this only
/// rejects structurally impossible relocations.
pub fn move_cards(
    state: &mut GameState,
    cards: &[CardId],
    dest: PileId,
) -> Result<MoveOutcome, String> {
    let dest = route_foundation(state, cards, dest);
    let from = state.table.move_cards(cards, dest)?;
    for &id in cards {
        state.table.set_face_up(id, true);
    }

    let game_won = state.is_game_won();
    let game_lost = state.is_game_lost();
    let mut turn_ended = false;
    if !game_won && !game_lost {
        if let Some(&last) = cards.last() {
            state.record_play(last);
        }
        if state.table.role(from) == PileRole::Cell && !state.table.is_empty(from) {
            if let Some(top) = state.table.top_card(from) {
                state.table.set_face_up(top, true);
            }
        }
        if dest == state.active_waste() {
            state.change_player();
            turn_ended = true;
        }
    }

    Ok(MoveOutcome {
        destination: dest,
        turn_ended,
        game_won,
        game_lost,
    })
}

/// Draw request: reveal the stock top, or turn the waste over into the empty
/// stock. Returns whether anything happened.
pub fn new_cards(state: &mut GameState) -> bool {
    // a revealed top must be played before drawing again
    if state.stock_top_face_up() {
        return false;
    }
    if check_compulsory_moves(state)
        || (!state.table.is_empty(state.active_reserve()) && state.count_empty_tableaus() > 0)
    {
        return false;
    }

    let stock = state.active_stock();
    if state.table.is_empty(stock) {
        // turn the waste over: top of waste becomes bottom of stock, face down
        let waste = state.active_waste();
        while let Ok(id) = state.table.take_top(waste) {
            state.table.place(id, stock, false);
        }
    } else if let Some(top) = state.table.top_card(stock) {
        state.table.set_face_up(top, true);
    }
    true
}

/// Draw affordance toward the host: false once the stock is empty and the
/// waste has nothing left to recycle.
pub fn new_cards_possible(state: &GameState) -> bool {
    !state.table.is_empty(state.active_stock()) || state.table.count(state.active_waste()) > 1
}
