//! The computer player: a greedy search over prioritized move categories.
//! Each step places at most one card and returns; the host re-invokes it
//! after the animation settles (or immediately, headless).

use crate::cards::{
    check_add_alternate_color_descending_from_king, is_rank_adjacent_same_suit, CardId,
};
use crate::engine::legality::first_compulsory;
use crate::engine::moves::{move_cards, new_cards};
use crate::state::GameState;
use crate::table::{PileId, Table, TABLEAU_COUNT};

/// One executed computer play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiPlay {
    pub card: CardId,
    pub from: PileId,
    /// Actual landing pile, after foundation auto-routing.
    pub to: PileId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiStep {
    /// The active player is under human control; nothing was done.
    NotComputer,
    Played(AiPlay),
    /// Nothing applied; a draw or waste turnover happened instead.
    Drew,
    /// Nothing applied and the draw was vetoed too.
    Stalled,
}

/// Run one ply of the computer player, first applicable category wins:
/// forced foundation plays, then the revealed stock card, then unloading onto
/// the opponent, then reserve-to-tableau, then tableau reshuffling, then a
/// draw.
pub fn ai_step(state: &mut GameState) -> AiStep {
    if state.is_human(state.current) {
        return AiStep::NotComputer;
    }

    // Foundation plays come first, toggle or not.
    if let Some(play) = compulsory_play(state) {
        return AiStep::Played(play);
    }

    // Play the revealed stock card; if nowhere else, discard it (ending the
    // turn).
    if state.stock_top_face_up() {
        if let Some(card) = state.table.top_card(state.active_stock()) {
            let opp = state.opponent();
            for dest in [Table::reserve(opp), Table::waste(opp)] {
                if let Some(play) = try_unload(state, card, dest) {
                    return AiStep::Played(play);
                }
            }
            for i in 0..TABLEAU_COUNT {
                if let Some(play) = try_tableau(state, card, Table::tableau(i)) {
                    return AiStep::Played(play);
                }
            }
            let waste = state.active_waste();
            if let Some(play) = execute(state, card, waste) {
                return AiStep::Played(play);
            }
        }
        return AiStep::Stalled;
    }

    // Unload onto the opponent: reserve top first, then any tableau top.
    let opp = state.opponent();
    if let Some(card) = state.table.top_card(state.active_reserve()) {
        for dest in [Table::reserve(opp), Table::waste(opp)] {
            if let Some(play) = try_unload(state, card, dest) {
                return AiStep::Played(play);
            }
        }
    }
    for dest in [Table::reserve(opp), Table::waste(opp)] {
        if let Some(play) = tabled_to_player(state, dest) {
            return AiStep::Played(play);
        }
    }

    // Play the reserve onto the tableau.
    if let Some(card) = state.table.top_card(state.active_reserve()) {
        for i in 0..TABLEAU_COUNT {
            if let Some(play) = try_tableau(state, card, Table::tableau(i)) {
                return AiStep::Played(play);
            }
        }
    }

    // Tableau to tableau, guarded against immediate reversals, two-move
    // cycles, symmetric duplicates, and useless exposures.
    for i in 0..TABLEAU_COUNT {
        let origin = Table::tableau(i);
        let Some(top) = state.table.top_card(origin) else {
            continue;
        };
        if state.last_played() == Some(top) {
            continue;
        }
        if state.plays_recorded() >= 3
            && state.played_back(3) == state.played_back(1)
            && state.played_back(2) == Some(top)
        {
            continue;
        }
        for j in 0..TABLEAU_COUNT {
            let dest = Table::tableau(j);
            if origin == dest {
                continue;
            }
            if !state.table.is_empty(dest) && state.table.same_sequence(origin, dest) {
                continue;
            }
            if is_move_useless(state, origin, dest) {
                continue;
            }
            if let Some(play) = try_tableau(state, top, dest) {
                return AiStep::Played(play);
            }
        }
    }

    if new_cards(state) {
        AiStep::Drew
    } else {
        AiStep::Stalled
    }
}

/// Forced foundation play, if any. The scan order is the compulsory-move
/// order: per foundation, stock top, then reserve top, then tableau tops.
fn compulsory_play(state: &mut GameState) -> Option<AiPlay> {
    let (source, target) = first_compulsory(state)?;
    let card = state.table.top_card(source)?;
    execute(state, card, target)
}

fn execute(state: &mut GameState, card: CardId, dest: PileId) -> Option<AiPlay> {
    let from = state.table.pile_of(card)?;
    let outcome = move_cards(state, &[card], dest).ok()?;
    Some(AiPlay {
        card,
        from,
        to: outcome.destination,
    })
}

/// Put `card` on an opponent reserve or waste if it is suit-adjacent to the
/// pile's top.
fn try_unload(state: &mut GameState, card: CardId, dest: PileId) -> Option<AiPlay> {
    let top = state.table.top_card(dest)?;
    if is_rank_adjacent_same_suit(state.table.card(top), state.table.card(card)) {
        execute(state, card, dest)
    } else {
        None
    }
}

/// Put `card` on a tableau pile: any empty pile, or a continuing
/// alternating-color descending run.
fn try_tableau(state: &mut GameState, card: CardId, dest: PileId) -> Option<AiPlay> {
    if state.table.is_empty(dest) {
        return execute(state, card, dest);
    }
    let old = state.table.resolve(state.table.cards_of(dest));
    if check_add_alternate_color_descending_from_king(&old, &[state.table.card(card)]) {
        execute(state, card, dest)
    } else {
        None
    }
}

/// First tableau top that fits the given opponent pile.
fn tabled_to_player(state: &mut GameState, dest: PileId) -> Option<AiPlay> {
    if state.table.is_empty(dest) {
        return None;
    }
    for i in 0..TABLEAU_COUNT {
        if let Some(top) = state.table.top_card(Table::tableau(i)) {
            if let Some(play) = try_unload(state, top, dest) {
                return Some(play);
            }
        }
    }
    None
}

/// Pure probe: does `card` have any legal home among the opponent piles or
/// the other tableau piles? No trial mutation; the adjacency and run tests
/// only need the tops.
fn card_has_destination(state: &GameState, card: CardId) -> bool {
    let opp = state.opponent();
    let candidate = state.table.card(card);
    for dest in [Table::reserve(opp), Table::waste(opp)] {
        if let Some(top) = state.table.top_card(dest) {
            if is_rank_adjacent_same_suit(state.table.card(top), candidate) {
                return true;
            }
        }
    }
    for i in 0..TABLEAU_COUNT {
        let pile = Table::tableau(i);
        if state.table.is_empty(pile) || state.table.pile_of(card) == Some(pile) {
            continue;
        }
        let old = state.table.resolve(state.table.cards_of(pile));
        if check_add_alternate_color_descending_from_king(&old, &[candidate]) {
            return true;
        }
    }
    false
}

/// One-ply lookahead. Moving a lone card onto an empty pile is a pointless
/// shuffle; moving a covered stack's top is pointless when the card beneath
/// would have nowhere to go once exposed.
fn is_move_useless(state: &GameState, origin: PileId, dest: PileId) -> bool {
    let n = state.table.count(origin);
    if n == 1 && state.table.is_empty(dest) {
        return true;
    }
    if n > 1 {
        if let Some(beneath) = state.table.card_at(origin, n - 2) {
            if !card_has_destination(state, beneath) {
                return true;
            }
        }
    }
    false
}
