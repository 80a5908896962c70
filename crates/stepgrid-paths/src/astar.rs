use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use stepgrid_core::{Point, euclidean_squared};

use crate::error::{Endpoint, GridError};
use crate::gate::{GateMemo, VisitGate};
use crate::geometry::GridGeometry;
use crate::neighbors::COMPASS;
use crate::stepper::{Outcome, Stepper};

/// Bookkeeping record for one cell in a best-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchNode {
    pub index: usize,
    pub pos: Point,
    /// Cell this node was reached from. Provenance only.
    pub parent: Option<usize>,
    /// Steps taken from the start.
    pub g: i64,
    /// Heuristic estimate to the goal.
    pub h: i64,
    /// `g + h`.
    pub f: i64,
}

impl SearchNode {
    fn root(index: usize, pos: Point) -> Self {
        Self {
            index,
            pos,
            parent: None,
            g: 0,
            h: 0,
            f: 0,
        }
    }

    fn child(&self, index: usize, pos: Point, goal: Point) -> Self {
        let g = self.g + 1;
        let h = euclidean_squared(pos, goal);
        Self {
            index,
            pos,
            parent: Some(self.index),
            g,
            h,
            f: g + h,
        }
    }
}

/// Node being expanded and the next compass direction to process.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    node: SearchNode,
    dir: usize,
}

/// Heuristic best-first search, one neighbor direction per step.
///
/// The node with the lowest `f = g + h` is taken from the open set (ties go
/// to the lowest cell index) and closed; its eight compass directions are
/// then processed one per [`advance`](Stepper::advance) call, the selecting
/// call included.
///
/// The heuristic is the squared straight-line distance to the goal. It
/// overestimates, so this is a greedy "closest in a straight line first"
/// search rather than an optimal A*: it always terminates and always finds
/// a reachable goal, but the route it implies need not be shortest.
pub struct BestFirst<G> {
    geometry: GridGeometry,
    start: Point,
    goal: SearchNode,
    open: BTreeMap<usize, SearchNode>,
    closed: BTreeMap<usize, SearchNode>,
    cursor: Option<Cursor>,
    /// Goal candidate met while expanding; confirmed on the next call.
    reached: Option<SearchNode>,
    last_selected: Option<SearchNode>,
    gate: GateMemo<G>,
    outcome: Option<Outcome>,
    steps: usize,
}

impl<G: VisitGate> BestFirst<G> {
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
        let mut open = BTreeMap::new();
        open.insert(start, SearchNode::root(start, start_point));
        Ok(Self {
            geometry,
            start: start_point,
            goal: SearchNode::root(end, end_point),
            open,
            closed: BTreeMap::new(),
            cursor: None,
            reached: None,
            last_selected: None,
            gate: GateMemo::new(gate, geometry.len()),
            outcome: None,
            steps: 0,
        })
    }

    /// Nodes not yet finalized, in cell-index order.
    pub fn open_nodes(&self) -> impl Iterator<Item = &SearchNode> {
        self.open.values()
    }

    /// Finalized nodes, in cell-index order.
    pub fn closed_nodes(&self) -> impl Iterator<Item = &SearchNode> {
        self.closed.values()
    }

    /// The node whose neighbors are being processed, if any.
    pub fn selected(&self) -> Option<&SearchNode> {
        self.cursor.as_ref().map(|c| &c.node)
    }

    /// The most recent node taken from the open set.
    pub fn last_selected(&self) -> Option<&SearchNode> {
        self.last_selected.as_ref()
    }

    /// How many times the gate has been called.
    pub fn gate_calls(&self) -> usize {
        self.gate.calls()
    }

    fn finish(&mut self, outcome: Outcome) -> bool {
        log::debug!(
            "best-first {} -> {}: {outcome} after {} steps, {} nodes closed",
            self.start,
            self.goal.pos,
            self.steps,
            self.closed.len()
        );
        self.outcome = Some(outcome);
        true
    }

    /// Move the lowest-`f` open node to the closed set.
    fn select(&mut self) -> Option<SearchNode> {
        // min_by_key keeps the first minimum, i.e. the lowest index.
        let index = self.open.values().min_by_key(|n| n.f)?.index;
        let node = self.open.remove(&index)?;
        self.closed.insert(index, node);
        self.last_selected = Some(node);
        log::trace!("best-first selected {} f={}", node.pos, node.f);
        Some(node)
    }

    /// Process the cursor's current direction and move it along.
    fn expand_one(&mut self, Cursor { node: parent, dir }: Cursor) {
        self.cursor = (dir + 1 < COMPASS.len()).then_some(Cursor {
            node: parent,
            dir: dir + 1,
        });

        let pos = parent.pos + COMPASS[dir];
        let Some(index) = self.geometry.checked_index(pos) else {
            return;
        };
        if !self.gate.admit(index, pos) {
            return;
        }
        let candidate = parent.child(index, pos, self.goal.pos);

        if index == self.goal.index {
            self.open.clear();
            self.cursor = None;
            self.reached = Some(candidate);
            return;
        }

        if let Some(existing) = self.closed.get_mut(&index) {
            if existing.f > candidate.f {
                *existing = candidate;
            }
            return;
        }

        match self.open.entry(index) {
            Entry::Occupied(mut e) => {
                if e.get().f > candidate.f {
                    e.insert(candidate);
                }
            }
            Entry::Vacant(e) => {
                e.insert(candidate);
            }
        }
    }
}

impl<G: VisitGate> Stepper for BestFirst<G> {
    fn advance(&mut self) -> bool {
        if self.outcome.is_some() {
            return true;
        }
        self.steps += 1;

        if let Some(goal) = self.reached.take() {
            self.closed.insert(goal.index, goal);
            return self.finish(Outcome::Found);
        }

        let cursor = match self.cursor {
            Some(cursor) => cursor,
            None => {
                let Some(node) = self.select() else {
                    return self.finish(Outcome::Exhausted);
                };
                if node.index == self.goal.index {
                    return self.finish(Outcome::Found);
                }
                Cursor { node, dir: 0 }
            }
        };
        self.expand_one(cursor);
        false
    }

    fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn steps(&self) -> usize {
        self.steps
    }

    fn expanded(&self) -> usize {
        self.closed.len()
    }

    fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.goal.pos
    }
}
