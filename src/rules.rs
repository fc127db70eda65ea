use serde::{Deserialize, Serialize};

use crate::types::AiSpeed;

/// The two documented rule variants. They share the whole engine; the variant
/// only selects which session options are meaningful (the crapette-rule
/// escalation and mid-game control toggling exist in Krapette only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Krapette,
    RussianBank,
}

/// Escalation levels for the "crapette" interruption rule. Stored and
/// validated as configuration; the legality engine itself does not consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrapetteRule {
    Off,
    TabledOnly,
    TabledAndPersonal,
    TabledAndPersonalPriority,
}

/// Maximum run length allowed onto an *empty* tableau pile, indexed by run
/// length; the stored value is the number of empty tableaus required.
pub const SHORTCUTS_ONTO_EMPTY: [u8; 12] = [0, 1, 2, 3, 3, 4, 5, 5, 5, 5, 6, 6];

/// Same, for a run landing on a matching descending top card.
pub const SHORTCUTS_ONTO_RUN: [u8; 12] = [0, 0, 1, 2, 2, 3, 3, 3, 3, 4, 4, 4];

/// Session-scoped rule toggles. Loaded once, mutated only by explicit user
/// action; never per-entity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rules {
    pub variant: Variant,
    pub compulsory_moves: bool,
    pub move_shortcuts: bool,
    pub crapette_rule: CrapetteRule,
    pub ai_speed: AiSpeed,
}

impl Default for Rules {
    fn default() -> Self {
        Self::krapette()
    }
}

impl Rules {
    #[inline]
    pub const fn krapette() -> Self {
        Self {
            variant: Variant::Krapette,
            compulsory_moves: false,
            move_shortcuts: false,
            crapette_rule: CrapetteRule::Off,
            ai_speed: AiSpeed::Normal,
        }
    }

    #[inline]
    pub const fn russian_bank() -> Self {
        Self {
            variant: Variant::RussianBank,
            compulsory_moves: false,
            move_shortcuts: false,
            crapette_rule: CrapetteRule::Off,
            ai_speed: AiSpeed::Normal,
        }
    }

    /// The crapette rule and compulsory moves are mutually exclusive; the
    /// Russian Bank variant has no crapette rule at all.
    pub fn validate(&self) -> Result<(), String> {
        if self.crapette_rule != CrapetteRule::Off && self.compulsory_moves {
            return Err("crapette rule is not compatible with compulsory moves".to_string());
        }
        if self.variant == Variant::RussianBank && self.crapette_rule != CrapetteRule::Off {
            return Err("Russian Bank has no crapette rule".to_string());
        }
        Ok(())
    }

    /// Whether a run of `run_len` cards may relocate onto a tableau pile,
    /// given the current number of empty tableau piles. `onto_empty` selects
    /// the landing case. Runs longer than the table covers are rejected.
    #[inline]
    pub fn shortcut_allows(onto_empty: bool, run_len: usize, empty_tableaus: usize) -> bool {
        let table = if onto_empty {
            &SHORTCUTS_ONTO_EMPTY
        } else {
            &SHORTCUTS_ONTO_RUN
        };
        match table.get(run_len) {
            Some(&required) => (required as usize) <= empty_tableaus,
            None => false,
        }
    }
}
