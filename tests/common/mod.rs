// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use gyroad::coord::Coord;
use gyroad::game::{Game, Placement};
use gyroad::rules::GyroadRules;


#[allow(dead_code)]
pub fn standard_game() -> Game {
    Game::new(GyroadRules::standard())
}

#[allow(dead_code)]
pub fn custom_game(placements: &[Placement]) -> Game {
    custom_game_with_rules(GyroadRules::standard(), placements)
}

#[allow(dead_code)]
pub fn custom_game_with_rules(rules: GyroadRules, placements: &[Placement]) -> Game {
    Game::from_placements(rules, placements).unwrap()
}

#[allow(dead_code)]
pub fn coord(s: &str) -> Coord {
    Coord::from_algebraic(s)
}
