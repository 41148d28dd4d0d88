//! Per-move analysis records handed over by the board/engine collaborator.
//!
//! Evaluations are expressed from the perspective of the player who made the
//! move, both before and after it; the collaborator is responsible for
//! normalizing engine output to that view.

use serde::{Deserialize, Serialize};

/// Standard board size used when a record does not say otherwise.
pub const DEFAULT_BOARD_SIZE: u8 = 19;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Player {
    #[serde(rename = "B", alias = "black", alias = "Black")]
    Black,
    #[serde(rename = "W", alias = "white", alias = "White")]
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Black => write!(f, "B"),
            Player::White => write!(f, "W"),
        }
    }
}

/// Zero-based (column, row) intersection; row 0 is the top edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Point(pub u8, pub u8);

impl Point {
    pub fn column(self) -> u8 {
        self.0
    }

    pub fn row(self) -> u8 {
        self.1
    }
}

/// Engine evaluation of one position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionEval {
    pub winrate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visits: Option<u64>,
}

/// A move the engine considered in the position before the played move.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    /// `None` is a pass.
    #[serde(default)]
    pub point: Option<Point>,
    pub winrate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_mean: Option<f64>,
    #[serde(default)]
    pub visits: u64,
}

/// Everything known about one played move.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoveAnalysis {
    pub move_number: u32,
    pub player: Player,
    /// `None` is a pass.
    #[serde(default)]
    pub played: Option<Point>,
    #[serde(default = "default_board_size")]
    pub board_size: u8,
    pub before: PositionEval,
    pub after: PositionEval,
    /// Candidates in engine rank order, best first.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

fn default_board_size() -> u8 {
    DEFAULT_BOARD_SIZE
}
