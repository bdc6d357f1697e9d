use std::collections::{HashSet, VecDeque};

use enum_map::{EnumMap, enum_map};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::coord::{Coord, NUM_ROWS, Row, SubjectiveRow};
use crate::grid::Grid;
use crate::piece::{Orientation, PieceId, PieceKind, PieceOnBoard};
use crate::rules::GyroadRules;
use crate::side::Side;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Victory(Side),
    Draw,  // both sides crossed the win threshold in the same turn
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Promotion {
    pub piece: PieceId,
    pub kind: PieceKind,
    pub side: Side,
    pub at: Coord,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MoveOutcome {
    // Origin, relay squares and destination, in travel order.
    pub path: Vec<Coord>,
    // The enemy piece displaced onto the origin square, if the move captured.
    pub swapped_with: Option<PieceId>,
    pub promotions: Vec<Promotion>,
    pub turn_ended: bool,
    pub status: GameStatus,
}


// One breadth layer of the relay search. `empty` and `capture` are legal
// destinations discovered in this layer. `relay` squares are occupied by
// friendly pieces: they extend the chain and feed staged highlighting, but
// are not legal landing spots.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ReachLayer {
    pub empty: Vec<Coord>,
    pub capture: Vec<Coord>,
    pub relay: Vec<Coord>,
}

impl ReachLayer {
    fn is_empty(&self) -> bool {
        self.empty.is_empty() && self.capture.is_empty() && self.relay.is_empty()
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Reachability {
    origin: Coord,
    layers: Vec<ReachLayer>,
    // Friendly pieces visited by the search, the selected piece first.
    relay_pieces: Vec<Coord>,
}

impl Reachability {
    pub fn origin(&self) -> Coord { self.origin }
    pub fn layers(&self) -> &[ReachLayer] { &self.layers }
    pub fn into_layers(self) -> Vec<ReachLayer> { self.layers }
    pub fn relay_pieces(&self) -> &[Coord] { &self.relay_pieces }

    pub fn can_land_on(&self, destination: Coord) -> bool {
        self.layers
            .iter()
            .any(|layer| layer.empty.contains(&destination) || layer.capture.contains(&destination))
    }

    // All legal destinations, in discovery order.
    pub fn destinations(&self) -> Vec<Coord> {
        self.layers
            .iter()
            .flat_map(|layer| layer.empty.iter().chain(layer.capture.iter()))
            .copied()
            .collect()
    }

    // Recovers one concrete relay chain to `destination`, in
    // origin -> destination order. Searches backward from the destination:
    // a square's predecessors are the visited pieces whose offsets cover it.
    // Restricting candidates to the pieces the forward search visited
    // guarantees a chain exists for every destination it classified as legal.
    pub fn find_path(&self, grid: &Grid, destination: Coord) -> Option<Vec<Coord>> {
        if !self.can_land_on(destination) {
            return None;
        }
        let destination_is_empty = grid[destination].is_none();
        let mut queue: VecDeque<Vec<Coord>> = VecDeque::new();
        queue.push_back(vec![destination]);
        let mut visited: HashSet<Coord> = HashSet::from([destination]);
        while let Some(path) = queue.pop_front() {
            let current = *path.last().unwrap();
            if current == self.origin {
                return Some(path.into_iter().rev().collect());
            }
            // The mover itself cannot throw the final hop onto an empty
            // square; its direct offsets only land on occupants.
            let final_hop = path.len() == 1;
            for &relay in &self.relay_pieces {
                if final_hop && destination_is_empty && relay == self.origin {
                    continue;
                }
                if visited.contains(&relay) {
                    continue;
                }
                if available_squares(grid, relay).contains(&current) {
                    visited.insert(relay);
                    let mut next = path.clone();
                    next.push(relay);
                    queue.push_back(next);
                }
            }
        }
        None
    }
}


// Landing squares of the piece's resolved offsets; off-board targets are
// dropped. Direct reach only — the relay search builds on top of this.
pub fn available_squares(grid: &Grid, at: Coord) -> Vec<Coord> {
    match grid[at] {
        Some(piece) => {
            piece.resolved_offsets().into_iter().filter_map(|offset| at.shift(offset)).collect()
        }
        None => Vec::new(),
    }
}

// Layered breadth-first search over the relay graph. The frontier holds
// pieces, not squares: each layer classifies the squares the frontier
// pieces cover, then advances to the friendly pieces discovered there.
// Every square is claimed by the first layer that discovers it. The search
// terminates because a piece enters the frontier at most once.
//
// The selected piece's own first-hop candidates are restricted to occupied
// squares: a piece moves by relaying through an occupant or by landing on
// an enemy directly, never by stepping into the open on its own.
pub fn reachable_squares(grid: &Grid, origin: Coord) -> Reachability {
    let mut result =
        Reachability { origin, layers: Vec::new(), relay_pieces: Vec::new() };
    let Some(selected) = grid[origin] else {
        return result;
    };
    let mut visited_squares: HashSet<Coord> = HashSet::new();
    let mut visited_pieces: HashSet<PieceId> = HashSet::new();
    visited_pieces.insert(selected.id);
    result.relay_pieces.push(origin);

    let mut frontier = vec![origin];
    while !frontier.is_empty() {
        let mut layer = ReachLayer::default();
        let mut next_frontier = Vec::new();
        for &from in &frontier {
            for to in available_squares(grid, from) {
                if from == origin && grid[to].is_none() {
                    continue;
                }
                if !visited_squares.insert(to) {
                    continue;
                }
                match grid[to] {
                    None => layer.empty.push(to),
                    Some(target) if target.side != selected.side => {
                        // Terminal landing spot: the chain never continues
                        // past an enemy piece.
                        layer.capture.push(to);
                    }
                    Some(target) => {
                        layer.relay.push(to);
                        if visited_pieces.insert(target.id) {
                            next_frontier.push(to);
                            result.relay_pieces.push(to);
                        }
                    }
                }
            }
        }
        if !layer.is_empty() {
            result.layers.push(layer);
        }
        frontier = next_frontier;
    }
    result
}


fn promotion_row(side: Side) -> Row {
    SubjectiveRow::from_one_based(NUM_ROWS).to_row(side)
}


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Board {
    rules: GyroadRules,
    grid: Grid,
    active_side: Side,
    rotation_budget: u8,
    scores: EnumMap<Side, u32>,
    status: GameStatus,
}

impl Board {
    pub fn new(rules: GyroadRules, starting_grid: Grid) -> Board {
        let rotation_budget = rules.rotations_per_turn;
        Board {
            rules,
            grid: starting_grid,
            active_side: Side::South,
            rotation_budget,
            scores: enum_map! { _ => 0 },
            status: GameStatus::Active,
        }
    }

    pub fn rules(&self) -> &GyroadRules { &self.rules }
    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn active_side(&self) -> Side { self.active_side }
    pub fn rotation_budget(&self) -> u8 { self.rotation_budget }
    pub fn score(&self, side: Side) -> u32 { self.scores[side] }
    pub fn status(&self) -> GameStatus { self.status }
    pub fn piece_at(&self, pos: Coord) -> Option<PieceOnBoard> { self.grid[pos] }

    // Moves the piece at `from` to a destination the reachability search
    // approved. Landing on an enemy exchanges the two pieces' positions;
    // nothing is ever captured off the board. Ends the turn.
    pub(crate) fn apply_move(&mut self, from: Coord, to: Coord, path: Vec<Coord>) -> MoveOutcome {
        let mut mover = self.grid[from].unwrap();
        mover.moved_this_turn = true;
        let swapped_with = match self.grid[to] {
            Some(mut target) => {
                target.moved_this_turn = true;
                self.grid[from] = Some(target);
                Some(target.id)
            }
            None => {
                self.grid[from] = None;
                None
            }
        };
        self.grid[to] = Some(mover);
        let promotions = self.apply_promotions();
        self.update_status();
        self.end_turn();
        MoveOutcome {
            path,
            swapped_with,
            promotions,
            turn_ended: true,
            status: self.status,
        }
    }

    // Every promotable piece sitting on the rank farthest from its own side
    // retires and scores, regardless of whose turn it is: a swap may push
    // the opponent's pawn home as well.
    fn apply_promotions(&mut self) -> Vec<Promotion> {
        let mut promotions = Vec::new();
        for pos in Coord::all() {
            if let Some(piece) = self.grid[pos] {
                if piece.kind.is_promotable() && pos.row == promotion_row(piece.side) {
                    self.grid[pos] = None;
                    self.scores[piece.side] += 1;
                    promotions.push(Promotion {
                        piece: piece.id,
                        kind: piece.kind,
                        side: piece.side,
                        at: pos,
                    });
                }
            }
        }
        promotions
    }

    fn update_status(&mut self) {
        if self.status != GameStatus::Active {
            return;
        }
        let winners = Side::iter()
            .filter(|&side| self.scores[side] >= self.rules.win_threshold)
            .collect_vec();
        self.status = match winners[..] {
            [] => GameStatus::Active,
            [side] => GameStatus::Victory(side),
            _ => GameStatus::Draw,
        };
    }

    // Turn handover: the incoming side starts with a fresh rotation budget
    // and clean per-turn flags.
    pub(crate) fn end_turn(&mut self) {
        self.active_side = self.active_side.opponent();
        self.rotation_budget = self.rules.rotations_per_turn;
        for pos in Coord::all() {
            if let Some(piece) = self.grid[pos].as_mut() {
                piece.moved_this_turn = false;
                if piece.side == self.active_side {
                    piece.rotated_this_turn = false;
                }
            }
        }
    }

    pub(crate) fn rotate_piece_cw(&mut self, at: Coord) -> Orientation {
        let piece = self.grid[at].as_mut().unwrap();
        piece.orientation = piece.orientation.rotated_cw();
        piece.orientation
    }

    pub(crate) fn set_orientation(&mut self, at: Coord, orientation: Orientation) {
        self.grid[at].as_mut().unwrap().orientation = orientation;
    }

    pub(crate) fn commit_rotation(&mut self, at: Coord) {
        assert!(self.rotation_budget > 0);
        self.rotation_budget -= 1;
        self.grid[at].as_mut().unwrap().rotated_this_turn = true;
    }
}
