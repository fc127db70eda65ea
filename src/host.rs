//! Host-facing surface: the callbacks a card-game host drives (drop attempts,
//! draw clicks, deal, AI timer ticks) modeled as a synchronous command step
//! function over one owned session. Single-writer by construction: every
//! mutation goes through `&mut Game`.

use std::time::Duration;

use crate::ai::{ai_step, AiStep};
use crate::cards::CardId;
use crate::engine::deal::restart;
use crate::engine::legality::{check_add, check_remove};
use crate::engine::moves::{move_cards, new_cards, new_cards_possible, MoveOutcome};
use crate::rng::{rng_for_game, shuffled_deal};
use crate::rules::{Rules, Variant};
use crate::state::GameState;
use crate::table::PileId;
use crate::types::PlayerId;

/// Host notifications, in the order the host produces them.
#[derive(Debug, Clone)]
pub enum Command {
    /// Deal a fresh game from a seeded shuffle.
    Restart { seed: u64, game_id: u64 },
    /// A drag was released over `pile`.
    Drop { cards: Vec<CardId>, pile: PileId },
    /// The stock was clicked.
    Draw,
    /// The AI pacing timer expired.
    AiTick,
    /// The user switched a player between human and computer control.
    ToggleControl(PlayerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Dealt,
    /// `None` when the drop was rejected by the legality engine.
    Dropped(Option<MoveOutcome>),
    Drew(bool),
    Ai(AiStep),
}

/// One game session. Wraps the raw `GameState` with the validated
/// configuration and the host protocol.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
}

impl Game {
    pub fn new(rules: Rules) -> Result<Self, String> {
        rules.validate()?;
        Ok(Self {
            state: GameState::new(rules),
        })
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn restart_seeded(&mut self, seed: u64, game_id: u64) -> Result<(), String> {
        let mut rng = rng_for_game(seed, game_id);
        let deal = shuffled_deal(&mut rng);
        restart(&mut self.state, &deal, &mut rng)
    }

    /// Pure legality predicate for a drop attempt.
    #[inline]
    pub fn check_add(&self, pile: PileId, cards: &[CardId]) -> bool {
        check_add(&self.state, pile, cards)
    }

    /// Pure legality predicate for a pickup attempt.
    #[inline]
    pub fn check_remove(&self, pile: PileId, cards: &[CardId]) -> bool {
        check_remove(&self.state, pile, cards)
    }

    /// Validate a full drag (pickup and drop) and commit it if legal.
    /// `Ok(None)` means the move was rejected and the host should snap the
    /// cards back.
    pub fn drop_cards(
        &mut self,
        cards: &[CardId],
        pile: PileId,
    ) -> Result<Option<MoveOutcome>, String> {
        let &first = cards
            .first()
            .ok_or_else(|| "empty drop".to_string())?;
        let source = self
            .state
            .table
            .pile_of(first)
            .ok_or_else(|| "dropped card is not on any pile".to_string())?;
        if !self.check_remove(source, cards) || !self.check_add(pile, cards) {
            return Ok(None);
        }
        move_cards(&mut self.state, cards, pile).map(Some)
    }

    /// Draw / redeal request. Returns whether an action occurred.
    #[inline]
    pub fn draw(&mut self) -> bool {
        new_cards(&mut self.state)
    }

    /// Draw affordance signal toward the host.
    #[inline]
    pub fn new_cards_possible(&self) -> bool {
        new_cards_possible(&self.state)
    }

    /// Run one computer ply if the active player is computer-controlled.
    #[inline]
    pub fn ai_tick(&mut self) -> AiStep {
        ai_step(&mut self.state)
    }

    /// How long the host should wait before the next `AiTick`.
    #[inline]
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.state.rules.ai_speed.delay_ms())
    }

    /// Flip a player between human and computer. If the toggled player is
    /// active, a computer ply runs immediately. Russian Bank fixes control at
    /// construction, so the toggle is a no-op there.
    pub fn toggle_control(&mut self, player: PlayerId) -> AiStep {
        if self.state.rules.variant != Variant::Krapette {
            return AiStep::NotComputer;
        }
        self.state.toggle_control(player);
        if self.state.current == player {
            self.ai_tick()
        } else {
            AiStep::NotComputer
        }
    }

    /// The persisted single-token game state: the active player's identity.
    #[inline]
    pub fn state_token(&self) -> &'static str {
        self.state.current.token()
    }

    /// A restored token naming the other player means the host is undoing
    /// across a turn boundary, not requesting a direct switch.
    #[inline]
    pub fn token_matches(&self, token: &str) -> bool {
        token == self.state_token()
    }

    pub fn handle(&mut self, cmd: Command) -> Result<Reply, String> {
        match cmd {
            Command::Restart { seed, game_id } => {
                self.restart_seeded(seed, game_id)?;
                Ok(Reply::Dealt)
            }
            Command::Drop { cards, pile } => {
                self.drop_cards(&cards, pile).map(Reply::Dropped)
            }
            Command::Draw => Ok(Reply::Drew(self.draw())),
            Command::AiTick => Ok(Reply::Ai(self.ai_tick())),
            Command::ToggleControl(player) => Ok(Reply::Ai(self.toggle_control(player))),
        }
    }
}
