//! Wire-level data model shared by the session, renderer and input router.
//! Snapshots arrive from the game server as JSON and are treated as opaque
//! beyond the fields declared here.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub const BOARD_ROWS: usize = 20;
pub const BOARD_COLS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Index order used by the settled-cell color mapping.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    pub fn from_symbol(raw: &str) -> Option<Self> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.symbol() == raw.trim())
    }

    /// Spawn-orientation cells as (x, y) offsets inside a 4x4 box.
    pub fn shape(self) -> [(i32, i32); 4] {
        match self {
            PieceKind::I => [(0, 0), (1, 0), (2, 0), (3, 0)],
            PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            PieceKind::T => [(1, 0), (0, 1), (1, 1), (2, 1)],
            PieceKind::S => [(1, 0), (2, 0), (0, 1), (1, 1)],
            PieceKind::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
            PieceKind::J => [(0, 0), (0, 1), (1, 1), (2, 1)],
            PieceKind::L => [(2, 0), (0, 1), (1, 1), (2, 1)],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveCommand {
    Left,
    Right,
    Down,
    Rotate,
    Drop,
}

impl MoveCommand {
    /// Path segment used by `/api/game/move/{direction}`.
    pub fn as_path(self) -> &'static str {
        match self {
            MoveCommand::Left => "left",
            MoveCommand::Right => "right",
            MoveCommand::Down => "down",
            MoveCommand::Rotate => "rotate",
            MoveCommand::Drop => "drop",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GameSnapshot {
    /// Row-major; `board[y][x]`, 0 = empty.
    pub board: Vec<Vec<i64>>,
    /// Active piece cells relative to (`piece_x`, `piece_y`).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub piece: Vec<(i32, i32)>,
    pub piece_x: i32,
    pub piece_y: i32,
    pub piece_type: PieceKind,
    #[serde(default)]
    pub next_piece: Option<String>,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    #[serde(default)]
    pub game_over: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<(i32, i32)>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<(i32, i32)>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("board has {0} rows, expected 20")]
    RowCount(usize),
    #[error("board row {row} has {len} columns, expected 10")]
    ColumnCount { row: usize, len: usize },
}

impl GameSnapshot {
    /// Checks the 20x10 board invariant. Piece offsets are not checked here;
    /// the renderer discards anything off the board.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.board.len() != BOARD_ROWS {
            return Err(SnapshotError::RowCount(self.board.len()));
        }
        for (row, cells) in self.board.iter().enumerate() {
            if cells.len() != BOARD_COLS {
                return Err(SnapshotError::ColumnCount {
                    row,
                    len: cells.len(),
                });
            }
        }
        Ok(())
    }

    pub fn final_stats(&self) -> FinalStats {
        FinalStats {
            score: self.score,
            level: self.level,
            lines: self.lines,
        }
    }
}

/// Score readout captured when a game ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FinalStats {
    pub score: u64,
    pub level: u32,
    pub lines: u32,
}
