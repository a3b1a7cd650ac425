//! Snapshot -> cell classification. Pure; rebuilt from scratch on every call so
//! nothing from a previous snapshot can survive a replacement.

use std::collections::HashSet;

use crate::model::{GameSnapshot, PieceKind, BOARD_COLS, BOARD_ROWS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellVisual {
    Empty,
    Settled(PieceKind),
    Active(PieceKind),
}

impl CellVisual {
    pub fn class_name(self) -> String {
        match self {
            CellVisual::Empty => "board-block".to_string(),
            CellVisual::Settled(kind) => format!("board-block filled {}", kind.symbol()),
            CellVisual::Active(kind) => format!("board-block filled current {}", kind.symbol()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    /// Row-major, `BOARD_ROWS * BOARD_COLS` entries.
    cells: Vec<CellVisual>,
}

impl BoardView {
    pub fn cells(&self) -> &[CellVisual] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellVisual]> {
        self.cells.chunks(BOARD_COLS)
    }

    /// All-empty grid, shown before the first snapshot arrives.
    pub fn blank() -> Self {
        Self {
            cells: vec![CellVisual::Empty; BOARD_ROWS * BOARD_COLS],
        }
    }
}

/// Color for a settled cell: `ALL[|value| mod 7]`.
pub fn settled_kind(value: i64) -> PieceKind {
    PieceKind::ALL[(value.unsigned_abs() % PieceKind::ALL.len() as u64) as usize]
}

/// Board coordinates (row, col) covered by the active piece. Offsets landing
/// outside the board are dropped.
pub fn active_cells(snapshot: &GameSnapshot) -> HashSet<(usize, usize)> {
    snapshot
        .piece
        .iter()
        .filter_map(|&(dx, dy)| {
            let x = snapshot.piece_x.checked_add(dx)?;
            let y = snapshot.piece_y.checked_add(dy)?;
            let col = usize::try_from(x).ok().filter(|c| *c < BOARD_COLS)?;
            let row = usize::try_from(y).ok().filter(|r| *r < BOARD_ROWS)?;
            Some((row, col))
        })
        .collect()
}

pub fn render_board(snapshot: &GameSnapshot) -> BoardView {
    let active = active_cells(snapshot);
    let mut cells = Vec::with_capacity(BOARD_ROWS * BOARD_COLS);
    for row in 0..BOARD_ROWS {
        for col in 0..BOARD_COLS {
            // a short row reads as empty rather than panicking
            let value = snapshot
                .board
                .get(row)
                .and_then(|r| r.get(col))
                .copied()
                .unwrap_or(0);
            let visual = if active.contains(&(row, col)) {
                CellVisual::Active(snapshot.piece_type)
            } else if value != 0 {
                CellVisual::Settled(settled_kind(value))
            } else {
                CellVisual::Empty
            };
            cells.push(visual);
        }
    }
    BoardView { cells }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NextPreview {
    Hidden,
    Shape {
        kind: PieceKind,
        /// `grid[y][x]`
        grid: [[bool; 4]; 4],
    },
    Label(String),
}

pub fn render_next(snapshot: &GameSnapshot) -> NextPreview {
    let Some(label) = snapshot.next_piece.as_deref() else {
        return NextPreview::Hidden;
    };
    let Some(kind) = PieceKind::from_symbol(label) else {
        return NextPreview::Label(label.to_string());
    };
    let mut grid = [[false; 4]; 4];
    for (x, y) in kind.shape() {
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
            if x < 4 && y < 4 {
                grid[y][x] = true;
            }
        }
    }
    NextPreview::Shape { kind, grid }
}
