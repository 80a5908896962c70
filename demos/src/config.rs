//! TOML scenario files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::Deserialize;
use stepgrid_core::Board;
use stepgrid_paths::{Algorithm, GridGeometry};

/// A complete scenario: the board to search and how to drive the search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub grid: GridConfig,
    pub run: RunConfig,
}

/// The board, either drawn as a `map` or described by size and indices.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Rows of `.#SE`. When set, every other field is ignored.
    pub map: Option<String>,
    pub width: i32,
    pub height: i32,
    pub start: usize,
    pub end: usize,
    /// Cell indices to block.
    pub blocked: Vec<usize>,
    /// Fraction of remaining cells to block at random.
    pub random_blocked: f64,
    pub seed: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            map: None,
            width: 16,
            height: 10,
            start: 0,
            end: 16 * 10 - 1,
            blocked: Vec::new(),
            random_blocked: 0.0,
            seed: 0,
        }
    }
}

/// Driver settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub algorithm: Algorithm,
    /// Pause between steps, standing in for an animation frame.
    pub delay_ms: u64,
    /// Give up after this many `advance` calls.
    pub max_steps: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            delay_ms: 100,
            max_steps: 100_000,
        }
    }
}

impl Scenario {
    /// Read and parse a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Build the board this scenario describes.
    pub fn board(&self) -> Result<Board> {
        let g = &self.grid;
        if let Some(map) = &g.map {
            return Ok(Board::parse(map)?);
        }

        let geometry = GridGeometry::new(g.width, g.height)?;
        let len = geometry.len();
        ensure!(g.start < len, "start index {} outside {len} cells", g.start);
        ensure!(g.end < len, "end index {} outside {len} cells", g.end);
        ensure!(
            (0.0..1.0).contains(&g.random_blocked),
            "random_blocked must be in [0, 1), got {}",
            g.random_blocked
        );

        let mut board = Board::new(g.width, g.height)?;
        for &i in &g.blocked {
            ensure!(i < len, "blocked index {i} outside {len} cells");
            board.set_blocked(geometry.coordinate_of(i), true)?;
        }
        if g.random_blocked > 0.0 {
            let mut rng = StdRng::seed_from_u64(g.seed);
            for p in geometry.range() {
                if rng.random_range(0.0..1.0) < g.random_blocked {
                    board.set_blocked(p, true)?;
                }
            }
        }
        board.set_start(geometry.coordinate_of(g.start))?;
        board.set_end(geometry.coordinate_of(g.end))?;
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepgrid_core::{CellKind, Point};

    #[test]
    fn defaults_fill_missing_sections() {
        let s = Scenario::from_toml("").unwrap();
        assert_eq!(s.run.algorithm, Algorithm::BreadthFirst);
        assert_eq!(s.grid.width, 16);
        let board = s.board().unwrap();
        assert_eq!(board.end(), Point::new(15, 9));
    }

    #[test]
    fn map_scenario() {
        let s = Scenario::from_toml(
            r#"
            [grid]
            map = """
            S.#
            ..E
            """
            [run]
            algorithm = "astar"
            delay_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(s.run.algorithm, Algorithm::BestFirst);
        assert_eq!(s.run.delay_ms, 0);
        let board = s.board().unwrap();
        assert_eq!(board.kind(Point::new(2, 0)), Some(CellKind::Blocked));
        assert_eq!(board.end(), Point::new(2, 1));
    }

    #[test]
    fn indexed_scenario_with_random_obstacles() {
        let text = "
            [grid]
            width = 6
            height = 4
            start = 0
            end = 23
            blocked = [7, 8]
            random_blocked = 0.5
            seed = 3
        ";
        let a = Scenario::from_toml(text).unwrap().board().unwrap();
        let b = Scenario::from_toml(text).unwrap().board().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.kind(Point::new(1, 1)), Some(CellKind::Blocked));
        assert_eq!(a.kind(Point::new(0, 0)), Some(CellKind::Start));
        assert_eq!(a.kind(Point::new(5, 3)), Some(CellKind::End));
    }

    #[test]
    fn rejects_bad_scenarios() {
        assert!(Scenario::from_toml("[grid]\nwidth = 0").unwrap().board().is_err());
        assert!(Scenario::from_toml("[grid]\nend = 500").unwrap().board().is_err());
        assert!(Scenario::from_toml("[run]\nalgorithm = \"dfs\"").is_err());
        assert!(Scenario::from_toml("[grid]\ncolour = 1").is_err());
    }

    #[test]
    fn bundled_scenarios_parse() {
        for text in [
            include_str!("../scenarios/maze.toml"),
            include_str!("../scenarios/random.toml"),
            include_str!("../scenarios/walled.toml"),
        ] {
            Scenario::from_toml(text).unwrap().board().unwrap();
        }
    }
}
