use crate::cards::{double_deck, Card, CardId, DECK_SIZE};
use crate::types::{PileRole, PlayerId};

/// Stable arena handle for one of the 22 piles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PileId(pub u8);

impl PileId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

pub const PILE_COUNT: usize = 22;
pub const TABLEAU_COUNT: usize = 8;
pub const FOUNDATION_COUNT: usize = 8;

#[derive(Debug, Clone)]
pub struct Pile {
    role: PileRole,
    owner: Option<PlayerId>,
    cards: Vec<CardId>,
}

/// The whole playing surface: every pile and every card lives here, addressed
/// by index handles. Players hold pile ids, never pile ownership, and card to
/// pile membership is a plain index map rather than back-pointers.
#[derive(Debug, Clone)]
pub struct Table {
    piles: Vec<Pile>,
    cards: Vec<Card>,
    location: [Option<PileId>; DECK_SIZE],
}

impl Table {
    /// Fixed pile ids, matching the construction order of the original table:
    /// per-player waste/stock/reserve first, then 8 foundations, 8 tableaus.
    #[inline]
    pub const fn waste(p: PlayerId) -> PileId {
        PileId(p.index() as u8 * 3)
    }

    #[inline]
    pub const fn stock(p: PlayerId) -> PileId {
        PileId(p.index() as u8 * 3 + 1)
    }

    #[inline]
    pub const fn reserve(p: PlayerId) -> PileId {
        PileId(p.index() as u8 * 3 + 2)
    }

    #[inline]
    pub const fn foundation(i: usize) -> PileId {
        debug_assert!(i < FOUNDATION_COUNT);
        PileId(6 + i as u8)
    }

    #[inline]
    pub const fn tableau(i: usize) -> PileId {
        debug_assert!(i < TABLEAU_COUNT);
        PileId(14 + i as u8)
    }

    pub fn new() -> Self {
        let mut piles = Vec::with_capacity(PILE_COUNT);
        for p in [PlayerId::One, PlayerId::Two] {
            for role in [PileRole::Waste, PileRole::Stock, PileRole::Cell] {
                piles.push(Pile {
                    role,
                    owner: Some(p),
                    cards: Vec::new(),
                });
            }
        }
        for _ in 0..FOUNDATION_COUNT {
            piles.push(Pile {
                role: PileRole::Foundation,
                owner: None,
                cards: Vec::new(),
            });
        }
        for _ in 0..TABLEAU_COUNT {
            piles.push(Pile {
                role: PileRole::Tableau,
                owner: None,
                cards: Vec::new(),
            });
        }
        Self {
            piles,
            cards: double_deck(),
            location: [None; DECK_SIZE],
        }
    }

    #[inline]
    pub fn role(&self, pile: PileId) -> PileRole {
        self.piles[pile.index()].role
    }

    #[inline]
    pub fn owner(&self, pile: PileId) -> Option<PlayerId> {
        self.piles[pile.index()].owner
    }

    #[inline]
    pub fn is_empty(&self, pile: PileId) -> bool {
        self.piles[pile.index()].cards.is_empty()
    }

    #[inline]
    pub fn count(&self, pile: PileId) -> usize {
        self.piles[pile.index()].cards.len()
    }

    #[inline]
    pub fn top_card(&self, pile: PileId) -> Option<CardId> {
        self.piles[pile.index()].cards.last().copied()
    }

    #[inline]
    pub fn card_at(&self, pile: PileId, idx: usize) -> Option<CardId> {
        self.piles[pile.index()].cards.get(idx).copied()
    }

    /// Ordered snapshot, bottom first.
    #[inline]
    pub fn cards_of(&self, pile: PileId) -> &[CardId] {
        &self.piles[pile.index()].cards
    }

    #[inline]
    pub fn card(&self, id: CardId) -> Card {
        self.cards[id.index()]
    }

    #[inline]
    pub fn pile_of(&self, id: CardId) -> Option<PileId> {
        self.location[id.index()]
    }

    #[inline]
    pub fn set_face_up(&mut self, id: CardId, face_up: bool) {
        self.cards[id.index()].face_up = face_up;
    }

    /// Whether the pile has a face-up top card. Empty piles have none.
    #[inline]
    pub fn top_face_up(&self, pile: PileId) -> bool {
        self.top_card(pile)
            .map_or(false, |id| self.card(id).face_up)
    }

    pub fn resolve(&self, ids: &[CardId]) -> Vec<Card> {
        ids.iter().map(|&id| self.card(id)).collect()
    }

    /// Whether two piles hold the same rank/suit sequence (card identity
    /// across the two decks is ignored).
    pub fn same_sequence(&self, a: PileId, b: PileId) -> bool {
        let pa = self.cards_of(a);
        let pb = self.cards_of(b);
        pa.len() == pb.len()
            && pa.iter().zip(pb.iter()).all(|(&x, &y)| {
                let (cx, cy) = (self.card(x), self.card(y));
                cx.rank == cy.rank && cx.suit == cy.suit
            })
    }

    /// Put a single card on top of a pile, detaching it from wherever it was.
    /// This is the deal/scripting primitive; rule checks happen elsewhere.
    pub fn place(&mut self, id: CardId, pile: PileId, face_up: bool) {
        if let Some(from) = self.location[id.index()] {
            self.piles[from.index()].cards.retain(|&c| c != id);
        }
        self.piles[pile.index()].cards.push(id);
        self.location[id.index()] = Some(pile);
        self.cards[id.index()].face_up = face_up;
    }

    pub fn take_top(&mut self, pile: PileId) -> Result<CardId, String> {
        let id = self.piles[pile.index()]
            .cards
            .pop()
            .ok_or_else(|| format!("pile {} is empty", pile.0))?;
        self.location[id.index()] = None;
        Ok(id)
    }

    /// Relocate `cards` onto `to`, preserving order. The cards must be the
    /// top segment of a single source pile (bottom-most given first).
    /// Returns the source pile.
    pub fn move_cards(&mut self, cards: &[CardId], to: PileId) -> Result<PileId, String> {
        let first = cards
            .first()
            .ok_or_else(|| "no cards to move".to_string())?;
        let from = self
            .pile_of(*first)
            .ok_or_else(|| "card is not on any pile".to_string())?;
        let pile = &self.piles[from.index()];
        if pile.cards.len() < cards.len()
            || pile.cards[pile.cards.len() - cards.len()..] != *cards
        {
            return Err("cards are not the top of one pile".to_string());
        }
        let at = self.piles[from.index()].cards.len() - cards.len();
        self.piles[from.index()].cards.truncate(at);
        for &id in cards {
            self.piles[to.index()].cards.push(id);
            self.location[id.index()] = Some(to);
        }
        Ok(from)
    }

    /// Strip every pile; cards become unplaced and face down. Used by the deal.
    pub fn clear(&mut self) {
        for pile in &mut self.piles {
            pile.cards.clear();
        }
        self.location = [None; DECK_SIZE];
        for card in &mut self.cards {
            card.face_up = false;
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
