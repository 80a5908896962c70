use std::collections::VecDeque;

use stepgrid_core::Point;

use crate::error::{Endpoint, GridError};
use crate::gate::{GateMemo, VisitGate};
use crate::geometry::GridGeometry;
use crate::stepper::{Outcome, Stepper};

/// Uninformed breadth-first search, one expanded cell per step.
///
/// Each [`advance`](Stepper::advance) pops frontier entries until one is
/// accepted, closes it and queues its in-bounds neighbors. Entries that are
/// already closed or that the gate refuses are skipped inside the same call.
/// The goal is recognized when it is popped; it is never submitted to the
/// gate.
pub struct BreadthFirst<G> {
    geometry: GridGeometry,
    start: Point,
    end: Point,
    frontier: VecDeque<usize>,
    closed: Vec<bool>,
    closed_len: usize,
    gate: GateMemo<G>,
    outcome: Option<Outcome>,
    steps: usize,
}

impl<G: VisitGate> BreadthFirst<G> {
    /// Set up a search on a `width` × `height` grid from cell index `start`
    /// to cell index `end`.
    pub fn new(width: i32, height: i32, start: usize, end: usize, gate: G) -> Result<Self, GridError> {
        Self::with_geometry(GridGeometry::new(width, height)?, start, end, gate)
    }

    /// Like [`new`](Self::new) with an already validated geometry.
    pub fn with_geometry(
        geometry: GridGeometry,
        start: usize,
        end: usize,
        gate: G,
    ) -> Result<Self, GridError> {
        let start_point = geometry.endpoint(Endpoint::Start, start)?;
        let end_point = geometry.endpoint(Endpoint::End, end)?;
        let mut frontier = VecDeque::new();
        frontier.push_back(start);
        Ok(Self {
            geometry,
            start: start_point,
            end: end_point,
            frontier,
            closed: vec![false; geometry.len()],
            closed_len: 0,
            gate: GateMemo::new(gate, geometry.len()),
            outcome: None,
            steps: 0,
        })
    }

    /// Number of pending frontier entries, duplicates included.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Whether the cell `index` has been expanded.
    pub fn is_closed(&self, index: usize) -> bool {
        self.closed.get(index).copied().unwrap_or(false)
    }

    /// How many times the gate has been called.
    pub fn gate_calls(&self) -> usize {
        self.gate.calls()
    }

    fn finish(&mut self, outcome: Outcome) -> bool {
        log::debug!(
            "bfs {} -> {}: {outcome} after {} steps, {} cells expanded",
            self.start,
            self.end,
            self.steps,
            self.closed_len
        );
        self.outcome = Some(outcome);
        true
    }
}

impl<G: VisitGate> Stepper for BreadthFirst<G> {
    fn advance(&mut self) -> bool {
        if self.outcome.is_some() {
            return true;
        }
        self.steps += 1;

        let (ci, cp) = loop {
            let Some(i) = self.frontier.pop_front() else {
                return self.finish(Outcome::Exhausted);
            };
            let p = self.geometry.coordinate_of(i);
            if p == self.end {
                return self.finish(Outcome::Found);
            }
            if self.closed[i] || !self.gate.admit(i, p) {
                continue;
            }
            break (i, p);
        };

        self.closed[ci] = true;
        self.closed_len += 1;
        let geometry = self.geometry;
        self.frontier
            .extend(geometry.neighbors(cp).map(|n| geometry.index_of(n)));
        log::trace!("bfs expanded {cp}, frontier {}", self.frontier.len());
        false
    }

    fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn steps(&self) -> usize {
        self.steps
    }

    fn expanded(&self) -> usize {
        self.closed_len
    }

    fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(_: Point) -> bool {
        true
    }

    #[test]
    fn first_step_expands_start() {
        let mut bfs = BreadthFirst::new(3, 3, 4, 0, open).unwrap();
        assert!(!bfs.advance());
        assert!(bfs.is_closed(4));
        assert_eq!(bfs.expanded(), 1);
        assert_eq!(bfs.frontier_len(), 8);
        assert_eq!(bfs.outcome(), None);
    }

    #[test]
    fn expands_in_compass_order() {
        let mut seen = Vec::new();
        let mut bfs = BreadthFirst::new(3, 3, 4, 8, |p: Point| {
            seen.push(p);
            true
        })
        .unwrap();
        bfs.advance();
        bfs.advance();
        bfs.advance();
        drop(bfs);
        // centre, then its north-east and east neighbors
        assert_eq!(seen, vec![Point::new(1, 1), Point::new(2, 0), Point::new(2, 1)]);
    }

    #[test]
    fn rejected_cells_are_skipped_within_one_call() {
        // Only the start and the cell east of it are enterable.
        let gate = |p: Point| p == Point::new(0, 0) || p == Point::new(1, 0);
        let mut bfs = BreadthFirst::new(4, 4, 0, 15, gate).unwrap();
        assert!(!bfs.advance());
        assert!(!bfs.advance());
        assert!(bfs.is_closed(1));
        assert_eq!(bfs.expanded(), 2);
        // Every remaining entry is rejected or closed: one call drains them.
        assert!(bfs.advance());
        assert_eq!(bfs.outcome(), Some(Outcome::Exhausted));
        assert_eq!(bfs.steps(), 3);
    }

    #[test]
    fn gate_is_asked_once_per_cell() {
        let mut calls = vec![0u32; 16];
        let gate = |p: Point| {
            calls[(p.y * 4 + p.x) as usize] += 1;
            p.x != 2
        };
        let mut bfs = BreadthFirst::new(4, 4, 0, 15, gate).unwrap();
        let outcome = crate::run_to_end(&mut bfs, 100);
        assert_eq!(outcome, Some(Outcome::Exhausted));
        drop(bfs);
        assert!(calls.iter().all(|&c| c <= 1));
        // columns 0 and 1 accepted, column 2 rejected, column 3 never asked
        assert_eq!(calls.iter().filter(|&&c| c == 1).count(), 12);
    }

    #[test]
    fn latched_after_termination() {
        let mut asked = 0;
        let mut bfs = BreadthFirst::new(2, 1, 0, 1, |_: Point| {
            asked += 1;
            true
        })
        .unwrap();
        assert!(!bfs.advance());
        assert!(bfs.advance());
        assert!(bfs.advance());
        assert_eq!(bfs.steps(), 2);
        assert_eq!(bfs.outcome(), Some(Outcome::Found));
        drop(bfs);
        assert_eq!(asked, 1);
    }

    #[test]
    fn goal_is_not_gated() {
        let mut bfs = BreadthFirst::new(2, 1, 0, 1, |p: Point| p.x == 0).unwrap();
        assert!(!bfs.advance());
        assert!(bfs.advance());
        assert_eq!(bfs.outcome(), Some(Outcome::Found));
        assert_eq!(bfs.gate_calls(), 1);
    }

    #[test]
    fn rejects_endpoints_outside_grid() {
        assert!(matches!(
            BreadthFirst::new(2, 2, 4, 0, open),
            Err(GridError::EndpointOutOfRange {
                endpoint: Endpoint::Start,
                ..
            })
        ));
        assert!(matches!(
            BreadthFirst::new(2, 2, 0, 9, open),
            Err(GridError::EndpointOutOfRange {
                endpoint: Endpoint::End,
                ..
            })
        ));
        assert!(matches!(
            BreadthFirst::new(0, 2, 0, 0, open),
            Err(GridError::InvalidDimensions { .. })
        ));
    }
}
