use crate::cards::{
    check_add_alternate_color_descending_from_king, check_add_same_suit_ascending_from_ace,
    is_rank_adjacent_same_suit, CardId,
};
use crate::rules::Rules;
use crate::state::GameState;
use crate::table::{PileId, Table, FOUNDATION_COUNT, TABLEAU_COUNT};
use crate::types::{PileRole, Rank};

/// Whether `new_cards` (already resolved to their source pile by the table)
/// may be dropped on `pile`. The destination's current contents are read from
/// the table; legality always observes the pre-move state.
pub fn check_add(state: &GameState, pile: PileId, new_cards: &[CardId]) -> bool {
    let t = &state.table;
    let old = t.resolve(t.cards_of(pile));
    let new = t.resolve(new_cards);

    // Foundation plays are accepted before the compulsory veto below: a
    // compulsory obligation never blocks the play that satisfies it. This
    // ordering is load-bearing.
    if t.role(pile) == PileRole::Foundation && check_add_same_suit_ascending_from_ace(&old, &new) {
        return true;
    }

    let empty_tableaus = state.count_empty_tableaus();
    if check_compulsory_moves(state)
        || (!t.is_empty(state.active_reserve())
            && state.stock_top_face_up()
            && empty_tableaus > 0)
    {
        return false;
    }

    match t.role(pile) {
        PileRole::Tableau => {
            if state.rules.move_shortcuts {
                (t.is_empty(pile) && Rules::shortcut_allows(true, new.len(), empty_tableaus))
                    || (!t.is_empty(pile)
                        && Rules::shortcut_allows(false, new.len(), empty_tableaus)
                        && check_add_alternate_color_descending_from_king(&old, &new))
            } else {
                new.len() == 1
                    && (t.is_empty(pile)
                        || check_add_alternate_color_descending_from_king(&old, &new))
            }
        }
        // unreachable in practice: the fast-path above already decided
        PileRole::Foundation => check_add_same_suit_ascending_from_ace(&old, &new),
        PileRole::Waste => {
            if new.len() != 1 {
                return false;
            }
            if pile == state.active_waste() {
                // an empty tableau must be filled before discarding
                if empty_tableaus > 0 {
                    return false;
                }
                let source = t.pile_of(new_cards[0]);
                // own waste accepts drawn stock cards only
                if source == Some(state.active_reserve()) {
                    return false;
                }
                if source.map_or(false, |s| t.role(s) == PileRole::Tableau) {
                    return false;
                }
                true
            } else {
                if t.is_empty(pile) {
                    return false;
                }
                // a revealed stock card must be resolved before anything else
                // goes to the opponent's waste
                if state.stock_top_face_up()
                    && t.top_card(state.active_stock()) != Some(new_cards[0])
                {
                    return false;
                }
                old.last()
                    .map_or(false, |&top| is_rank_adjacent_same_suit(top, new[0]))
            }
        }
        PileRole::Cell => {
            new.len() == 1
                && pile != state.active_reserve()
                && old
                    .last()
                    .map_or(false, |&top| is_rank_adjacent_same_suit(top, new[0]))
        }
        PileRole::Stock => false,
    }
}

/// Whether cards may be picked up from `pile` at all, independent of where
/// they might land.
pub fn check_remove(state: &GameState, pile: PileId, _cards: &[CardId]) -> bool {
    match state.table.role(pile) {
        // an undrawn-but-revealed stock card must be played first
        PileRole::Tableau => !state.stock_top_face_up(),
        PileRole::Foundation | PileRole::Waste => false,
        PileRole::Cell => pile == state.active_reserve() && !state.stock_top_face_up(),
        PileRole::Stock => true,
    }
}

/// Whether the top of `own` may extend the foundation pile `dest`.
pub fn check_add_card_to_foundation(state: &GameState, own: PileId, dest: PileId) -> bool {
    let t = &state.table;
    let Some(top) = t.top_card(own) else {
        return false;
    };
    if t.card(top).rank == Rank::Ace && t.is_empty(dest) {
        return true;
    }
    !t.is_empty(dest)
        && check_add_same_suit_ascending_from_ace(
            &t.resolve(t.cards_of(dest)),
            &[t.card(top)],
        )
}

/// The first (source, foundation) pair the active player could feed, scanning
/// per foundation: revealed stock top, then reserve top, then each tableau
/// top, in that fixed order.
pub fn first_compulsory(state: &GameState) -> Option<(PileId, PileId)> {
    for i in 0..FOUNDATION_COUNT {
        let target = Table::foundation(i);
        if state.stock_top_face_up()
            && check_add_card_to_foundation(state, state.active_stock(), target)
        {
            return Some((state.active_stock(), target));
        }
        if check_add_card_to_foundation(state, state.active_reserve(), target) {
            return Some((state.active_reserve(), target));
        }
        for j in 0..TABLEAU_COUNT {
            if check_add_card_to_foundation(state, Table::tableau(j), target) {
                return Some((Table::tableau(j), target));
            }
        }
    }
    None
}

/// Whether a mandatory foundation play is pending for the active player.
/// Only meaningful with the compulsory-moves toggle on; used both to veto
/// other moves and to drive forced computer plays.
pub fn check_compulsory_moves(state: &GameState) -> bool {
    state.rules.compulsory_moves && first_compulsory(state).is_some()
}
