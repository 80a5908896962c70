use std::fmt;
use std::str::FromStr;

use crate::astar::BestFirst;
use crate::bfs::BreadthFirst;
use crate::error::GridError;
use crate::gate::VisitGate;
use crate::geometry::GridGeometry;
use crate::stepper::Stepper;

/// Which search engine a driver wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// [`BreadthFirst`]: one expanded cell per step.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "bfs", alias = "breadth-first"))]
    BreadthFirst,
    /// [`BestFirst`]: one neighbor direction per step.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "astar", alias = "a-star", alias = "best-first")
    )]
    BestFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Self::BreadthFirst, Self::BestFirst];

    /// Build a boxed engine searching `geometry` from cell `start` to `end`.
    pub fn build<'g, G: VisitGate + 'g>(
        self,
        geometry: GridGeometry,
        start: usize,
        end: usize,
        gate: G,
    ) -> Result<Box<dyn Stepper + 'g>, GridError> {
        let engine: Box<dyn Stepper + 'g> = match self {
            Self::BreadthFirst => Box::new(BreadthFirst::with_geometry(geometry, start, end, gate)?),
            Self::BestFirst => Box::new(BestFirst::with_geometry(geometry, start, end, gate)?),
        };
        Ok(engine)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BreadthFirst => f.write_str("bfs"),
            Self::BestFirst => f.write_str("astar"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::BreadthFirst),
            "astar" | "a-star" | "a*" | "best-first" => Ok(Self::BestFirst),
            _ => Err(GridError::UnknownAlgorithm(s.to_string())),
        }
    }
}
