//! **stepgrid-core**: geometry primitives and the board collaborator shared
//! by the stepgrid search engines.
//!
//! This crate provides [`Point`] and [`Range`], the squared-distance
//! heuristic, and [`Board`], a text-backed grid of start/end/blocked/visited
//! cells whose [`Board::visit`] method acts as a visit gate.

pub mod board;
pub mod distance;
pub mod geom;

pub use board::{Board, BoardError, CellKind};
pub use distance::euclidean_squared;
pub use geom::{Point, Range, RangeIter};
