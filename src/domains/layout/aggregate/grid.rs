use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

pub const MIN_DIMENSION: usize = 3;
/// Row letters run `A..=Z`.
pub const MAX_ROWS: usize = 26;

pub const EMPTY_SYMBOL: &str = ".";
pub const OBSTACLE_SYMBOL: &str = "X";

/// Row-major grid of planner symbols: `.`, `X` or an agent label.
pub type SymbolGrid = Vec<Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellRole {
    Empty,
    Obstacle,
    Start(String),
    End(String),
}

impl CellRole {
    pub fn agent_label(&self) -> Option<&str> {
        match self {
            CellRole::Start(label) | CellRole::End(label) => Some(label),
            CellRole::Empty | CellRole::Obstacle => None,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            CellRole::Empty => EMPTY_SYMBOL,
            CellRole::Obstacle => OBSTACLE_SYMBOL,
            CellRole::Start(label) | CellRole::End(label) => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub coordinate: String,
    pub role: CellRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<Cell>>,
}

/// `chr('A' + row) + (col + 1)`, e.g. (0, 0) -> "A1", (2, 2) -> "C3".
pub fn coordinate_label(row: usize, col: usize) -> String {
    let letter = (b'A' + row as u8) as char;
    format!("{}{}", letter, col + 1)
}

impl Grid {
    pub fn create(width: usize, height: usize) -> DomainResult<Self> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION || height > MAX_ROWS {
            return Err(DomainError::InvalidDimensions { width, height });
        }
        let cells = (0..height)
            .map(|row| {
                (0..width)
                    .map(|col| Cell {
                        coordinate: coordinate_label(row, col),
                        role: CellRole::Empty,
                    })
                    .collect()
            })
            .collect();
        Ok(Self { width, height, cells })
    }

    /// Inverse of [`coordinate_label`], bounded to this grid.
    pub fn parse_coordinate(&self, label: &str) -> Option<(usize, usize)> {
        let mut chars = label.chars();
        let letter = chars.next()?;
        if !letter.is_ascii_uppercase() {
            return None;
        }
        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let row = (letter as u8 - b'A') as usize;
        let col = digits.parse::<usize>().ok()?.checked_sub(1)?;
        (row < self.height && col < self.width).then_some((row, col))
    }

    pub fn cell(&self, coordinate: &str) -> Option<&Cell> {
        let (row, col) = self.parse_coordinate(coordinate)?;
        Some(&self.cells[row][col])
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Returns a copy with exactly the targeted cell changed.
    pub fn with_cell_role(&self, coordinate: &str, role: CellRole) -> DomainResult<Grid> {
        let (row, col) = self
            .parse_coordinate(coordinate)
            .ok_or_else(|| DomainError::UnknownCell {
                coordinate: coordinate.to_string(),
            })?;
        let mut next = self.clone();
        next.cells[row][col].role = role;
        Ok(next)
    }

    pub fn count_where(&self, predicate: impl Fn(&CellRole) -> bool) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| predicate(&cell.role))
            .count() as u32
    }

    pub fn start_count(&self) -> u32 {
        self.count_where(|role| matches!(role, CellRole::Start(_)))
    }

    pub fn end_count(&self) -> u32 {
        self.count_where(|role| matches!(role, CellRole::End(_)))
    }

    pub fn obstacle_count(&self) -> u32 {
        self.count_where(|role| matches!(role, CellRole::Obstacle))
    }

    pub fn to_symbols(&self) -> SymbolGrid {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.role.symbol().to_string()).collect())
            .collect()
    }
}
