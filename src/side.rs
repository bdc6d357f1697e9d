use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;


// South is the player who starts on rows 7-8 and moves toward row 1;
// North is the mirror image.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
pub enum Side {
    South,
    North,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::South => Side::North,
            Side::North => Side::South,
        }
    }
}
