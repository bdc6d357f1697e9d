use serde::{Deserialize, Serialize};

use crate::board::{
    Board, GameStatus, MoveOutcome, ReachLayer, available_squares, reachable_squares,
};
use crate::coord::{Col, Coord, NUM_ROWS, Row};
use crate::error::{ActionError, SetupError};
use crate::grid::Grid;
use crate::internal_error_message;
use crate::piece::{Orientation, PieceId, PieceKind, PieceOnBoard};
use crate::rules::GyroadRules;
use crate::side::Side;


// Raw setup input: (kind, side, x, y) with x across columns, y across rows.
pub type Placement = (PieceKind, Side, u8, u8);

fn new_south(id: PieceId, kind: PieceKind) -> PieceOnBoard {
    PieceOnBoard::new(id, kind, Side::South, false, Orientation::Deg0)
}

fn setup_south_pawns_on_7th_row(grid: &mut Grid, piece_id: &mut PieceId) {
    use PieceKind::*;
    let kinds = [PawnRight, PawnLeft, PawnRight, PawnCross, PawnLeft, PawnRight, PawnLeft];
    for (kind, col) in kinds.into_iter().zip(Col::all()) {
        grid[Coord::new(Row::_7, col)] = Some(new_south(piece_id.inc(), kind));
    }
}

// North's army is South's reflected across the middle of the board, which
// also swaps each piece's handedness.
fn setup_north_pieces_mirrorlike(grid: &mut Grid, piece_id: &mut PieceId) {
    for coord in Coord::all() {
        if let Some(piece) = grid[coord] {
            if piece.side == Side::South {
                let mirror_row = Row::from_zero_based(NUM_ROWS - coord.row.to_zero_based() - 1);
                let mirror_coord = Coord::new(mirror_row, coord.col);
                assert!(grid[mirror_coord].is_none(), "{:?}", grid);
                grid[mirror_coord] = Some(PieceOnBoard::new(
                    piece_id.inc(),
                    piece.kind.mirrored(),
                    Side::North,
                    true,
                    Orientation::Deg0,
                ));
            }
        }
    }
}

fn standard_grid() -> Grid {
    use PieceKind::*;
    let mut piece_id = PieceId::new();
    let mut grid = Grid::new();
    let back_rank = [Disc, Triangle, Diamond, Crown, Diamond, Triangle, Disc];
    for (kind, col) in back_rank.into_iter().zip(Col::all()) {
        grid[Coord::new(Row::_8, col)] = Some(new_south(piece_id.inc(), kind));
    }
    setup_south_pawns_on_7th_row(&mut grid, &mut piece_id);
    setup_north_pieces_mirrorlike(&mut grid, &mut piece_id);
    grid
}


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Selected { at: Coord },
    Rotating { at: Coord, entered_with: Orientation },
}

// A successful selection: the piece and its staged highlight layers.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Selection {
    pub piece: PieceOnBoard,
    pub layers: Vec<ReachLayer>,
}


// The only mutator of game state. UI events arrive as commands; every
// command either advances the state machine or rejects as a no-op.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    phase: Phase,
}

impl Game {
    pub fn new(rules: GyroadRules) -> Self {
        Game {
            board: Board::new(rules, standard_grid()),
            phase: Phase::Idle,
        }
    }

    pub fn from_placements(
        rules: GyroadRules, placements: &[Placement],
    ) -> Result<Self, SetupError> {
        let mut piece_id = PieceId::new();
        let mut grid = Grid::new();
        for &(kind, side, x, y) in placements {
            let Some(pos) = Coord::from_xy(x, y) else {
                return Err(SetupError::PositionOutOfBounds { x, y });
            };
            if grid[pos].is_some() {
                return Err(SetupError::SquareOccupied(pos));
            }
            grid[pos] = Some(PieceOnBoard::new(
                piece_id.inc(),
                kind,
                side,
                side == Side::North,
                Orientation::Deg0,
            ));
        }
        Ok(Game {
            board: Board::new(rules, grid),
            phase: Phase::Idle,
        })
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn status(&self) -> GameStatus { self.board.status() }
    pub fn active_side(&self) -> Side { self.board.active_side() }

    // Pure queries. These may be recomputed freely at any time.

    pub fn available_squares(&self, at: Coord) -> Vec<Coord> {
        available_squares(self.board.grid(), at)
    }

    pub fn reachable_layers(&self, at: Coord) -> Vec<ReachLayer> {
        reachable_squares(self.board.grid(), at).into_layers()
    }

    pub fn destination_squares(&self, at: Coord) -> Vec<Coord> {
        reachable_squares(self.board.grid(), at).destinations()
    }

    pub fn find_path(&self, at: Coord, destination: Coord) -> Option<Vec<Coord>> {
        reachable_squares(self.board.grid(), at).find_path(self.board.grid(), destination)
    }

    pub fn selection(&self) -> Option<Selection> {
        match self.phase {
            Phase::Idle => None,
            Phase::Selected { at } | Phase::Rotating { at, .. } => Some(self.selection_for(at)),
        }
    }

    // Commands.

    pub fn select(&mut self, at: Coord, acting_side: Side) -> Result<Selection, ActionError> {
        self.ensure_active()?;
        match self.phase {
            Phase::Rotating { .. } => return Err(ActionError::RotationInProgress),
            Phase::Selected { at: selected } if selected != at => {
                return Err(ActionError::SelectionActive);
            }
            _ => {}
        }
        let Some(piece) = self.board.piece_at(at) else {
            return Err(ActionError::SquareEmpty);
        };
        if acting_side != self.board.active_side() || piece.side != acting_side {
            return Err(ActionError::WrongSide);
        }
        if piece.moved_this_turn {
            return Err(ActionError::PieceAlreadyMoved);
        }
        if piece.rotated_this_turn {
            return Err(ActionError::PieceAlreadyRotated);
        }
        self.phase = Phase::Selected { at };
        Ok(self.selection_for(at))
    }

    pub fn deselect(&mut self) -> Result<(), ActionError> {
        match self.phase {
            Phase::Rotating { .. } => Err(ActionError::RotationInProgress),
            _ => {
                self.phase = Phase::Idle;
                Ok(())
            }
        }
    }

    pub fn commit_move(&mut self, destination: Coord) -> Result<MoveOutcome, ActionError> {
        self.ensure_active()?;
        let at = match self.phase {
            Phase::Idle => return Err(ActionError::NothingSelected),
            Phase::Rotating { .. } => return Err(ActionError::RotationInProgress),
            Phase::Selected { at } => at,
        };
        let reach = reachable_squares(self.board.grid(), at);
        if !reach.can_land_on(destination) {
            return Err(ActionError::DestinationUnreachable);
        }
        let path = reach.find_path(self.board.grid(), destination).unwrap_or_else(|| {
            panic!(
                "{}",
                internal_error_message!("no relay chain to reachable square {:?}", destination)
            )
        });
        self.phase = Phase::Idle;
        Ok(self.board.apply_move(at, destination, path))
    }

    pub fn begin_rotate(&mut self) -> Result<(), ActionError> {
        self.ensure_active()?;
        let at = match self.phase {
            Phase::Idle => return Err(ActionError::NothingSelected),
            Phase::Rotating { .. } => return Err(ActionError::RotationInProgress),
            Phase::Selected { at } => at,
        };
        let piece = self.board.piece_at(at).unwrap();
        if !piece.kind.is_rotatable() {
            return Err(ActionError::NotRotatable);
        }
        if piece.rotated_this_turn {
            return Err(ActionError::PieceAlreadyRotated);
        }
        if self.board.rotation_budget() == 0 {
            return Err(ActionError::NoRotationsLeft);
        }
        self.phase = Phase::Rotating { at, entered_with: piece.orientation };
        Ok(())
    }

    // Turns the piece under rotation by -90°. May be invoked repeatedly
    // before the rotation is confirmed or cancelled.
    pub fn rotate_step(&mut self) -> Result<Orientation, ActionError> {
        let Phase::Rotating { at, .. } = self.phase else {
            return Err(ActionError::RotationNotStarted);
        };
        Ok(self.board.rotate_piece_cw(at))
    }

    // Commits the rotation: spends one rotation action and clears the
    // selection. The turn does not end.
    pub fn confirm_rotate(&mut self) -> Result<(), ActionError> {
        let Phase::Rotating { at, .. } = self.phase else {
            return Err(ActionError::RotationNotStarted);
        };
        self.board.commit_rotation(at);
        self.phase = Phase::Idle;
        Ok(())
    }

    // Reverts to the orientation the piece had when rotation began and
    // returns to the selected state with fresh highlight layers.
    pub fn cancel_rotate(&mut self) -> Result<Selection, ActionError> {
        let Phase::Rotating { at, entered_with } = self.phase else {
            return Err(ActionError::RotationNotStarted);
        };
        self.board.set_orientation(at, entered_with);
        self.phase = Phase::Selected { at };
        Ok(self.selection_for(at))
    }

    // Voluntary turn handover, for the side that cannot or will not move.
    pub fn end_turn_if_idle(&mut self) -> Result<Side, ActionError> {
        self.ensure_active()?;
        match self.phase {
            Phase::Selected { .. } => Err(ActionError::SelectionActive),
            Phase::Rotating { .. } => Err(ActionError::RotationInProgress),
            Phase::Idle => {
                self.board.end_turn();
                Ok(self.board.active_side())
            }
        }
    }

    fn selection_for(&self, at: Coord) -> Selection {
        Selection {
            piece: self.board.piece_at(at).unwrap(),
            layers: reachable_squares(self.board.grid(), at).into_layers(),
        }
    }

    fn ensure_active(&self) -> Result<(), ActionError> {
        match self.board.status() {
            GameStatus::Active => Ok(()),
            _ => Err(ActionError::GameOver),
        }
    }
}
