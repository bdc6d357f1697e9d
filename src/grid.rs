use std::{fmt, ops};

use ndarray::{Array, Array2};
use serde::{Deserialize, Serialize};

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::piece::{Orientation, PieceOnBoard};


pub type Grid = GenericGrid<PieceOnBoard>;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericGrid<T: Clone> {
    data: Array2<Option<T>>,
}

impl<T: Clone> GenericGrid<T> {
    pub fn new() -> Self {
        GenericGrid {
            data: Array::from_elem((NUM_ROWS as usize, NUM_COLS as usize), None),
        }
    }
}

impl<T: Clone> ops::Index<Coord> for GenericGrid<T> {
    type Output = Option<T>;
    #[track_caller]
    fn index(&self, pos: Coord) -> &Self::Output {
        self.data
            .get(coord_to_index(pos))
            .unwrap_or_else(|| panic!("{}", out_of_bound_message(pos)))
    }
}

impl<T: Clone> ops::IndexMut<Coord> for GenericGrid<T> {
    #[track_caller]
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        self.data
            .get_mut(coord_to_index(pos))
            .unwrap_or_else(|| panic!("{}", out_of_bound_message(pos)))
    }
}

fn coord_to_index(pos: Coord) -> [usize; 2] {
    [
        pos.row.to_zero_based() as usize,
        pos.col.to_zero_based() as usize,
    ]
}

fn out_of_bound_message(pos: Coord) -> String {
    format!(
        "Coord ({}, {}) is out of bound for {}x{} board",
        pos.row.to_zero_based(),
        pos.col.to_zero_based(),
        NUM_ROWS,
        NUM_COLS
    )
}

fn debug_format_piece(piece: &PieceOnBoard) -> String {
    let mut s = format!("[{}]-{:?}-{:?}", piece.id.0, piece.side, piece.kind);
    if piece.orientation != Orientation::Deg0 {
        s.push_str(&format!("-{:?}", piece.orientation));
    }
    s
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(Coord::all().filter_map(|coord| {
                self[coord].map(|piece| (coord.to_algebraic(), debug_format_piece(&piece)))
            }))
            .finish()
    }
}
