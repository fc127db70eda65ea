#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod types;
pub mod rules;
pub mod cards;
pub mod table;
pub mod state;
pub mod hash;
pub mod rng;

pub mod engine {
    pub mod legality;
    pub mod deal;
    pub mod moves;
}

pub mod ai;
pub mod host;

// Re-exports: stable minimal API surface for external callers
pub use crate::ai::{ai_step, AiPlay, AiStep};
pub use crate::cards::{
    check_add_alternate_color_descending_from_king, check_add_same_suit_ascending_from_ace,
    is_alternate_color_descending, is_rank_adjacent_same_suit, is_same_suit_ascending,
    is_same_suit_descending, Card, CardId, DECK_SIZE,
};
pub use crate::engine::deal::restart;
pub use crate::engine::legality::{
    check_add, check_add_card_to_foundation, check_compulsory_moves, check_remove,
    first_compulsory,
};
pub use crate::engine::moves::{move_cards, new_cards, new_cards_possible, MoveOutcome};
pub use crate::hash::state_key;
pub use crate::host::{Command, Game, Reply};
pub use crate::rng::{rng_for_game, shuffled_deal};
pub use crate::rules::{CrapetteRule, Rules, Variant};
pub use crate::state::GameState;
pub use crate::table::{PileId, Table, FOUNDATION_COUNT, PILE_COUNT, TABLEAU_COUNT};
pub use crate::types::{AiSpeed, Color, PileRole, PlayerId, Rank, Suit};
