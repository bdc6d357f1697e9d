use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::side::Side;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
pub enum PieceKind {
    PawnRight,
    PawnLeft,
    PawnCross,
    Disc,
    Triangle,
    Diamond,
    Crown,
}

impl PieceKind {
    // Pawns have a fixed facing; every other kind may be re-oriented.
    pub fn is_rotatable(self) -> bool {
        use PieceKind::*;
        !matches!(self, PawnRight | PawnLeft | PawnCross)
    }

    // Reaching the far rank retires the piece and scores a point for its owner.
    pub fn is_promotable(self) -> bool {
        use PieceKind::*;
        matches!(self, PawnRight | PawnLeft)
    }

    // The same kind with left and right handedness swapped. Mirroring the
    // board across the middle rank turns one side's setup into the other's.
    pub fn mirrored(self) -> PieceKind {
        use PieceKind::*;
        match self {
            PawnRight => PawnLeft,
            PawnLeft => PawnRight,
            other => other,
        }
    }
}


// Counter-clockwise 90° steps.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
pub enum Orientation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    // A confirmed rotate action turns the piece by -90°.
    pub fn rotated_cw(self) -> Self {
        use Orientation::*;
        match self {
            Deg0 => Deg270,
            Deg270 => Deg180,
            Deg180 => Deg90,
            Deg90 => Deg0,
        }
    }

    // Undoes this orientation to express a base offset in world space.
    // Table-exact: 90° multiples only, no trigonometric rounding.
    pub fn unrotate(self, (dx, dy): (i8, i8)) -> (i8, i8) {
        use Orientation::*;
        match self {
            Deg0 => (dx, dy),
            Deg90 => (dy, -dx),
            Deg180 => (-dx, -dy),
            Deg270 => (-dy, dx),
        }
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    pub fn new() -> Self { PieceId(0) }
    pub fn inc(&mut self) -> PieceId {
        let id = *self;
        self.0 += 1;
        id
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct PieceOnBoard {
    pub id: PieceId,
    pub kind: PieceKind,
    pub side: Side,
    pub mirrored: bool,  // sprite seed for the side that starts upside down
    pub orientation: Orientation,
    #[new(value = "false")]
    pub moved_this_turn: bool,
    #[new(value = "false")]
    pub rotated_this_turn: bool,
}

impl PieceOnBoard {
    // Movement offsets for the piece as it currently stands: the kind's base
    // pattern in the owner's side-relative basis, unrotated by the current
    // orientation. Order follows the base tables, so repeated calls on the
    // same piece compare equal.
    pub fn resolved_offsets(&self) -> Vec<(i8, i8)> {
        base_pattern(self.kind, self.side)
            .into_iter()
            .map(|offset| self.orientation.unrotate(offset))
            .collect()
    }
}

// South's basis; North's is the 180° flip.
const UP: (i8, i8) = (0, -1);
const DOWN: (i8, i8) = (0, 1);
const LEFT: (i8, i8) = (-1, 0);
const RIGHT: (i8, i8) = (1, 0);

fn base_pattern(kind: PieceKind, side: Side) -> Vec<(i8, i8)> {
    let (up, down, left, right) = match side {
        Side::South => (UP, DOWN, LEFT, RIGHT),
        Side::North => (DOWN, UP, RIGHT, LEFT),
    };
    let sum = |a: (i8, i8), b: (i8, i8)| (a.0 + b.0, a.1 + b.1);
    let twice = |a: (i8, i8)| (a.0 * 2, a.1 * 2);
    use PieceKind::*;
    match kind {
        PawnRight => vec![left, sum(right, down)],
        PawnLeft => vec![right, sum(left, down)],
        PawnCross => vec![sum(right, up), sum(right, down), sum(left, up), sum(left, down)],
        Disc => vec![up, twice(up), left, right],
        Triangle => vec![up, sum(up, left), sum(up, right), down],
        Diamond => vec![up, down, twice(left), twice(right)],
        Crown => vec![up, sum(down, left), sum(down, right)],
    }
}
