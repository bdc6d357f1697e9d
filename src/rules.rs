use serde::{Deserialize, Serialize};


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GyroadRules {
    // Promotions a side needs to win the game.
    pub win_threshold: u32,
    // Rotate actions each side may confirm per turn.
    pub rotations_per_turn: u8,
}

impl GyroadRules {
    pub fn standard() -> Self {
        Self {
            win_threshold: 6,
            rotations_per_turn: 2,
        }
    }

    // A quicker variant: first to five promotions wins.
    pub fn short_match() -> Self {
        Self {
            win_threshold: 5,
            ..Self::standard()
        }
    }
}
