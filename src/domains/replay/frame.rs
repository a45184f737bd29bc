use super::colors::RobotPalette;
use super::trace::{Coord, GridDimensions};
use crate::domains::layout::{SymbolGrid, EMPTY_SYMBOL, OBSTACLE_SYMBOL};
use std::collections::BTreeMap;

/// Dense displayable grid for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub dimensions: GridDimensions,
    pub rows: SymbolGrid,
}

impl Frame {
    pub fn symbol(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn is_agent(symbol: &str) -> bool {
        symbol != EMPTY_SYMBOL && symbol != OBSTACLE_SYMBOL
    }

    /// Text block with cells padded to the widest symbol; agents are tinted when a palette is given.
    pub fn render(&self, palette: Option<&RobotPalette>) -> String {
        let cell_width = self
            .rows
            .iter()
            .flatten()
            .map(|symbol| symbol.chars().count())
            .max()
            .unwrap_or(1);

        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|symbol| {
                        let padded = format!("{:>width$}", symbol, width = cell_width);
                        match palette {
                            Some(palette) if Self::is_agent(symbol) => {
                                palette.color_of(symbol).paint(&padded)
                            }
                            _ => padded,
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Builds the frame for one step. Obstacles first, then agents on top; out-of-bounds
/// coordinates are dropped.
pub fn reconstruct(
    dimensions: GridDimensions,
    obstacles: &[Coord],
    positions: &BTreeMap<String, Coord>,
) -> Frame {
    let mut rows = vec![vec![EMPTY_SYMBOL.to_string(); dimensions.width]; dimensions.height];

    for &coord in obstacles.iter().filter(|c| dimensions.contains(**c)) {
        rows[coord.row() as usize][coord.col() as usize] = OBSTACLE_SYMBOL.to_string();
    }
    for (agent_id, &coord) in positions.iter().filter(|(_, c)| dimensions.contains(**c)) {
        rows[coord.row() as usize][coord.col() as usize] = agent_id.clone();
    }

    Frame { dimensions, rows }
}
