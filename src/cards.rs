use serde::{Deserialize, Serialize};

use crate::types::{Rank, Suit};

/// Two full 52-card decks are in play; card identity matters, so duplicate
/// rank/suit pairs are distinct ids.
pub const DECK_SIZE: usize = 104;

/// Stable arena handle for one of the 104 cards.
/// Layout: `copy * 52 + suit * 13 + (rank - 1)`, so test positions can name
/// cards as constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    #[inline]
    pub const fn of(rank: Rank, suit: Suit, copy: u8) -> CardId {
        CardId(copy * 52 + (suit.index() as u8) * 13 + (rank.value() - 1))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub face_up: bool,
}

/// The fixed 104-card double deck, face down, in id order.
pub fn double_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for _copy in 0..2 {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                deck.push(Card {
                    rank,
                    suit,
                    face_up: false,
                });
            }
        }
    }
    deck
}

// Sequence predicates. Single-card sequences satisfy all of them.

pub fn is_same_suit_ascending(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| {
        w[0].suit == w[1].suit && w[0].rank.value() + 1 == w[1].rank.value()
    })
}

pub fn is_same_suit_descending(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| {
        w[0].suit == w[1].suit && w[0].rank.value() == w[1].rank.value() + 1
    })
}

pub fn is_alternate_color_descending(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| {
        w[0].suit.color() != w[1].suit.color() && w[0].rank.value() == w[1].rank.value() + 1
    })
}

/// Whether `new` may extend `old` as a same-suit ascending run rooted at Ace.
pub fn check_add_same_suit_ascending_from_ace(old: &[Card], new: &[Card]) -> bool {
    let Some(first) = new.first() else {
        return false;
    };
    match old.last() {
        None => first.rank == Rank::Ace && is_same_suit_ascending(new),
        Some(top) => {
            top.suit == first.suit
                && top.rank.value() + 1 == first.rank.value()
                && is_same_suit_ascending(new)
        }
    }
}

/// Whether `new` may extend `old` as an alternating-color descending run
/// rooted at King.
pub fn check_add_alternate_color_descending_from_king(old: &[Card], new: &[Card]) -> bool {
    let Some(first) = new.first() else {
        return false;
    };
    match old.last() {
        None => first.rank == Rank::King && is_alternate_color_descending(new),
        Some(top) => {
            top.suit.color() != first.suit.color()
                && top.rank.value() == first.rank.value() + 1
                && is_alternate_color_descending(new)
        }
    }
}

/// Same suit, one rank apart in either direction. This is the test for
/// unloading a card onto an opponent's waste or reserve.
#[inline]
pub fn is_rank_adjacent_same_suit(top: Card, candidate: Card) -> bool {
    top.suit == candidate.suit && top.rank.value().abs_diff(candidate.rank.value()) == 1
}
