//! Resumable, step-bounded grid search.
//!
//! This crate advances a search by exactly one unit of work per call so an
//! external driver can animate it frame by frame:
//!
//! - **Breadth-first** expansion ([`BreadthFirst`]): one expanded cell per
//!   step.
//! - **Heuristic best-first** expansion ([`BestFirst`]): one neighbor
//!   direction per step, ordered by `g + h` with a squared straight-line
//!   heuristic.
//!
//! Both implement [`Stepper`]. Whether a cell may be entered is decided by a
//! caller-supplied [`VisitGate`], which is also where the caller records
//! visits for display. The engines never loop across calls, sleep, or spawn;
//! the driver decides when the next step happens.
//!
//! ```
//! use stepgrid_core::Board;
//! use stepgrid_paths::{Algorithm, GridGeometry, Outcome, run_to_end};
//!
//! let mut board = Board::parse("S.#\n.#.\n..E").unwrap();
//! let geometry = GridGeometry::from_range(board.range()).unwrap();
//! let (start, end) = (geometry.index_of(board.start()), geometry.index_of(board.end()));
//! let mut engine = Algorithm::BreadthFirst.build(geometry, start, end, board.gate()).unwrap();
//! assert_eq!(run_to_end(&mut engine, 100), Some(Outcome::Found));
//! ```

mod algorithm;
mod astar;
mod bfs;
mod error;
mod gate;
mod geometry;
mod neighbors;
mod stepper;

pub use algorithm::Algorithm;
pub use astar::{BestFirst, SearchNode};
pub use bfs::BreadthFirst;
pub use error::{Endpoint, GridError};
pub use gate::{GateMemo, VisitGate};
pub use geometry::GridGeometry;
pub use neighbors::COMPASS;
pub use stepper::{Outcome, Stepper, run_to_end};
