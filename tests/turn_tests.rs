use krapette::{
    move_cards, new_cards, new_cards_possible, restart, rng_for_game, CardId, GameState, PileId,
    PlayerId, Rank, Rules, Suit, Table, DECK_SIZE,
};

fn card(rank: Rank, suit: Suit) -> CardId {
    CardId::of(rank, suit, 0)
}

fn card2(rank: Rank, suit: Suit) -> CardId {
    CardId::of(rank, suit, 1)
}

fn put(state: &mut GameState, pile: PileId, cards: &[CardId]) {
    for &c in cards {
        state.table.place(c, pile, true);
    }
}

/// Identity deal order with chosen cards swapped into chosen positions.
fn deal_order(assignments: &[(usize, CardId)]) -> Vec<CardId> {
    let mut deck: Vec<CardId> = (0..DECK_SIZE as u8).map(CardId).collect();
    for &(pos, id) in assignments {
        let cur = deck.iter().position(|&c| c == id).expect("card present");
        deck.swap(pos, cur);
    }
    deck
}

// Deal positions, taken off the back: 103..=96 are the tabled cards (player
// one first), 95..=83 player one's reserve (83 on top), 82..=70 player two's
// reserve (70 on top); the front 70 fill the stocks.
const RESERVE1_TOP: usize = 83;
const RESERVE2_TOP: usize = 70;

#[test]
fn deal_lays_out_the_fixed_pattern() {
    let mut state = GameState::new(Rules::krapette());
    let deck: Vec<CardId> = (0..DECK_SIZE as u8).map(CardId).collect();
    let mut rng = rng_for_game(7, 0);
    restart(&mut state, &deck, &mut rng).expect("deal");

    for i in 0..8 {
        assert_eq!(state.table.count(Table::tableau(i)), 1);
        let top = state.table.top_card(Table::tableau(i)).expect("tabled card");
        assert!(state.table.card(top).face_up);
    }
    for p in [PlayerId::One, PlayerId::Two] {
        assert_eq!(state.table.count(Table::reserve(p)), 13);
        assert_eq!(state.table.count(Table::stock(p)), 35);
        assert_eq!(state.table.count(Table::waste(p)), 0);

        // only the reserve top is face up; the stock is all face down
        let reserve = state.table.cards_of(Table::reserve(p)).to_vec();
        for (i, id) in reserve.iter().enumerate() {
            assert_eq!(state.table.card(*id).face_up, i == reserve.len() - 1);
        }
        for &id in state.table.cards_of(Table::stock(p)) {
            assert!(!state.table.card(id).face_up);
        }
    }
    for i in 0..8 {
        assert!(state.table.is_empty(Table::foundation(i)));
    }
}

#[test]
fn deal_rejects_malformed_sequences() {
    let mut state = GameState::new(Rules::krapette());
    let mut rng = rng_for_game(7, 0);

    let short: Vec<CardId> = (0..10u8).map(CardId).collect();
    assert!(restart(&mut state, &short, &mut rng).is_err());

    let mut dup: Vec<CardId> = (0..DECK_SIZE as u8).map(CardId).collect();
    dup[0] = dup[1];
    assert!(restart(&mut state, &dup, &mut rng).is_err());
}

#[test]
fn higher_reserve_top_starts() {
    let mut state = GameState::new(Rules::krapette());
    let deck = deal_order(&[
        (RESERVE1_TOP, card(Rank::Queen, Suit::Spades)),
        (RESERVE2_TOP, card(Rank::Five, Suit::Hearts)),
    ]);
    let mut rng = rng_for_game(7, 0);
    restart(&mut state, &deck, &mut rng).expect("deal");
    assert_eq!(state.current, PlayerId::One);

    let deck = deal_order(&[
        (RESERVE1_TOP, card(Rank::Five, Suit::Spades)),
        (RESERVE2_TOP, card(Rank::Queen, Suit::Hearts)),
    ]);
    restart(&mut state, &deck, &mut rng).expect("deal");
    assert_eq!(state.current, PlayerId::Two);
}

#[test]
fn tabled_sum_breaks_a_double_tie_deterministically() {
    // Equal reserve tops, equal best tabled rank, differing tabled sums:
    // the higher sum starts, no randomness involved.
    let mut state = GameState::new(Rules::krapette());
    let deck = deal_order(&[
        (RESERVE1_TOP, card(Rank::Five, Suit::Spades)),
        (RESERVE2_TOP, card(Rank::Five, Suit::Hearts)),
        // player one tabled: 9 3 3 2 (sum 17)
        (103, card(Rank::Nine, Suit::Spades)),
        (102, card(Rank::Three, Suit::Spades)),
        (101, card(Rank::Three, Suit::Hearts)),
        (100, card(Rank::Two, Suit::Spades)),
        // player two tabled: 9 2 2 2 (sum 15)
        (99, card(Rank::Nine, Suit::Hearts)),
        (98, card(Rank::Two, Suit::Hearts)),
        (97, card(Rank::Two, Suit::Clubs)),
        (96, card(Rank::Two, Suit::Diamonds)),
    ]);

    for game_id in 0..4 {
        let mut rng = rng_for_game(7, game_id);
        restart(&mut state, &deck, &mut rng).expect("deal");
        assert_eq!(state.current, PlayerId::One);
    }
}

#[test]
fn best_tabled_rank_breaks_a_reserve_tie() {
    let mut state = GameState::new(Rules::krapette());
    let deck = deal_order(&[
        (RESERVE1_TOP, card(Rank::Five, Suit::Spades)),
        (RESERVE2_TOP, card(Rank::Five, Suit::Hearts)),
        // player one's best tabled is a Ten, player two's a King
        (103, card(Rank::Ten, Suit::Spades)),
        (102, card(Rank::Two, Suit::Spades)),
        (101, card(Rank::Two, Suit::Hearts)),
        (100, card(Rank::Two, Suit::Clubs)),
        (99, card(Rank::King, Suit::Hearts)),
        (98, card(Rank::Three, Suit::Hearts)),
        (97, card(Rank::Three, Suit::Spades)),
        (96, card(Rank::Three, Suit::Clubs)),
    ]);
    let mut rng = rng_for_game(7, 0);
    restart(&mut state, &deck, &mut rng).expect("deal");
    assert_eq!(state.current, PlayerId::Two);
}

#[test]
fn turn_switches_only_on_own_waste_landing() {
    let mut state = GameState::new(Rules::krapette());
    put(
        &mut state,
        Table::reserve(PlayerId::One),
        &[card(Rank::Nine, Suit::Clubs), card(Rank::Eight, Suit::Clubs)],
    );
    put(
        &mut state,
        Table::reserve(PlayerId::Two),
        &[card(Rank::Seven, Suit::Clubs)],
    );

    // reserve -> opponent reserve: no switch
    let outcome = move_cards(
        &mut state,
        &[card(Rank::Eight, Suit::Clubs)],
        Table::reserve(PlayerId::Two),
    )
    .expect("move");
    assert!(!outcome.turn_ended);
    assert_eq!(state.current, PlayerId::One);

    // the uncovered reserve card turns face up
    let top = state
        .table
        .top_card(Table::reserve(PlayerId::One))
        .expect("reserve top");
    assert!(state.table.card(top).face_up);

    // something -> own waste: the turn ends
    let drawn = card(Rank::Two, Suit::Hearts);
    state.table.place(drawn, Table::stock(PlayerId::One), true);
    let outcome = move_cards(&mut state, &[drawn], Table::waste(PlayerId::One)).expect("move");
    assert!(outcome.turn_ended);
    assert_eq!(state.current, PlayerId::Two);
}

#[test]
fn win_and_loss_are_symmetric() {
    let mut state = GameState::new(Rules::krapette());
    // player two still holds cards; player one's three piles are empty
    put(
        &mut state,
        Table::reserve(PlayerId::Two),
        &[card(Rank::Seven, Suit::Clubs)],
    );

    state.current = PlayerId::One;
    assert!(state.is_game_won());
    assert!(!state.is_game_lost());

    state.current = PlayerId::Two;
    assert!(!state.is_game_won());
    assert!(state.is_game_lost());
}

#[test]
fn drawing_reveals_then_recycles() {
    let mut state = GameState::new(Rules::krapette());
    // the opponent holds cards, so the game is not over mid-script
    put(
        &mut state,
        Table::reserve(PlayerId::Two),
        &[card(Rank::Seven, Suit::Clubs)],
    );
    let a = card(Rank::Two, Suit::Hearts);
    let b = card(Rank::Nine, Suit::Spades);
    state.table.place(a, Table::stock(PlayerId::One), false);
    state.table.place(b, Table::stock(PlayerId::One), false);

    assert!(new_cards(&mut state));
    assert!(state.table.card(b).face_up);
    // the revealed card blocks another draw
    assert!(!new_cards(&mut state));

    // play it away, draw the second, discard it: stock empties
    move_cards(&mut state, &[b], Table::tableau(0)).expect("move");
    assert!(new_cards(&mut state));
    move_cards(&mut state, &[a], Table::waste(PlayerId::One)).expect("move");
    assert_eq!(state.current, PlayerId::Two);

    // back on player one's turn, the empty stock recycles the waste
    state.current = PlayerId::One;
    assert!(state.table.is_empty(Table::stock(PlayerId::One)));
    assert!(new_cards_possible(&state));
    assert!(new_cards(&mut state));
    assert_eq!(state.table.count(Table::stock(PlayerId::One)), 1);
    assert!(state.table.is_empty(Table::waste(PlayerId::One)));
    assert!(!state.table.card(a).face_up);
}

#[test]
fn draw_blocked_while_reserve_must_fill_an_empty_tableau() {
    let mut state = GameState::new(Rules::krapette());
    put(
        &mut state,
        Table::reserve(PlayerId::One),
        &[card(Rank::Nine, Suit::Clubs)],
    );
    state
        .table
        .place(card(Rank::Two, Suit::Hearts), Table::stock(PlayerId::One), false);

    // an empty tableau exists and the reserve is not empty: no drawing
    assert!(!new_cards(&mut state));

    // with every tableau filled the draw goes through
    let suits = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];
    for i in 0..4 {
        put(&mut state, Table::tableau(i), &[card(Rank::Five, suits[i])]);
        put(&mut state, Table::tableau(i + 4), &[card2(Rank::Five, suits[i])]);
    }
    assert!(new_cards(&mut state));
}

#[test]
fn new_cards_possible_tracks_the_draw_affordance() {
    let mut state = GameState::new(Rules::krapette());
    assert!(!new_cards_possible(&state));

    state
        .table
        .place(card(Rank::Two, Suit::Hearts), Table::stock(PlayerId::One), false);
    assert!(new_cards_possible(&state));

    let mut state = GameState::new(Rules::krapette());
    put(
        &mut state,
        Table::waste(PlayerId::One),
        &[card(Rank::Two, Suit::Hearts), card(Rank::Three, Suit::Hearts)],
    );
    assert!(new_cards_possible(&state));

    let mut state = GameState::new(Rules::krapette());
    put(&mut state, Table::waste(PlayerId::One), &[card(Rank::Two, Suit::Hearts)]);
    assert!(!new_cards_possible(&state));
}
