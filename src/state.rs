use crate::cards::CardId;
use crate::rules::Rules;
use crate::table::{PileId, Table, TABLEAU_COUNT};
use crate::types::PlayerId;

/// The AI repetition guards look at most three plays back; the history is a
/// short ring, not an undo log (the host owns real undo).
pub const HISTORY_CAP: usize = 8;

#[derive(Debug, Clone)]
pub struct GameState {
    pub table: Table,
    pub rules: Rules,
    pub current: PlayerId,
    human: [bool; 2],
    cards_played: Vec<CardId>,
}

impl GameState {
    /// A fresh table with no cards dealt. Player one starts out human,
    /// player two computer, as in the original scene setup.
    pub fn new(rules: Rules) -> Self {
        Self {
            table: Table::new(),
            rules,
            current: PlayerId::One,
            human: [true, false],
            cards_played: Vec::new(),
        }
    }

    #[inline]
    pub fn is_human(&self, p: PlayerId) -> bool {
        self.human[p.index()]
    }

    #[inline]
    pub fn set_human(&mut self, p: PlayerId, human: bool) {
        self.human[p.index()] = human;
    }

    #[inline]
    pub fn toggle_control(&mut self, p: PlayerId) {
        self.human[p.index()] = !self.human[p.index()];
    }

    #[inline]
    pub fn opponent(&self) -> PlayerId {
        self.current.other()
    }

    #[inline]
    pub fn active_reserve(&self) -> PileId {
        Table::reserve(self.current)
    }

    #[inline]
    pub fn active_stock(&self) -> PileId {
        Table::stock(self.current)
    }

    #[inline]
    pub fn active_waste(&self) -> PileId {
        Table::waste(self.current)
    }

    /// Whether the active stock has a revealed (drawn but unplayed) top card.
    #[inline]
    pub fn stock_top_face_up(&self) -> bool {
        self.table.top_face_up(self.active_stock())
    }

    pub fn count_empty_tableaus(&self) -> usize {
        (0..TABLEAU_COUNT)
            .filter(|&i| self.table.is_empty(Table::tableau(i)))
            .count()
    }

    pub fn total_cards(&self, p: PlayerId) -> usize {
        self.table.count(Table::stock(p))
            + self.table.count(Table::reserve(p))
            + self.table.count(Table::waste(p))
    }

    /// The active player wins by emptying reserve, stock, and waste.
    pub fn is_game_won(&self) -> bool {
        self.total_cards(self.current) == 0
    }

    /// Symmetric check: the opponent emptied out first.
    pub fn is_game_lost(&self) -> bool {
        self.total_cards(self.opponent()) == 0
    }

    /// Hand the turn to the other player and forget the play history.
    pub fn change_player(&mut self) {
        self.cards_played.clear();
        self.current = self.current.other();
    }

    pub fn clear_history(&mut self) {
        self.cards_played.clear();
    }

    pub fn record_play(&mut self, card: CardId) {
        if self.cards_played.len() == HISTORY_CAP {
            self.cards_played.remove(0);
        }
        self.cards_played.push(card);
    }

    #[inline]
    pub fn last_played(&self) -> Option<CardId> {
        self.cards_played.last().copied()
    }

    /// The n-th most recent play (1 = last). None once the history runs out.
    #[inline]
    pub fn played_back(&self, n: usize) -> Option<CardId> {
        self.cards_played
            .len()
            .checked_sub(n)
            .and_then(|i| self.cards_played.get(i).copied())
    }

    #[inline]
    pub fn plays_recorded(&self) -> usize {
        self.cards_played.len()
    }
}
