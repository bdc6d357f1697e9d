#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod coord;
pub mod error;
pub mod game;
pub mod grid;
pub mod piece;
pub mod rules;
pub mod side;
