use stepgrid_core::Point;

/// Permission to enter a cell, granted by whoever owns the grid's display
/// state.
///
/// The engines call [`visit`](Self::visit) with in-bounds points only.
/// Returning `true` means the cell may be entered and is now considered
/// visited (the implementation records that however it likes); `false` means
/// the cell is blocked and is never expanded from.
///
/// Any `FnMut(Point) -> bool` closure is a gate.
pub trait VisitGate {
    fn visit(&mut self, p: Point) -> bool;
}

impl<F: FnMut(Point) -> bool> VisitGate for F {
    #[inline]
    fn visit(&mut self, p: Point) -> bool {
        self(p)
    }
}

/// A gate wrapper that asks the inner gate at most once per cell.
///
/// The first answer for a cell index is remembered and returned for every
/// later proposal of that cell.
#[derive(Debug, Clone)]
pub struct GateMemo<G> {
    gate: G,
    answers: Vec<Option<bool>>,
    calls: usize,
}

impl<G: VisitGate> GateMemo<G> {
    /// Wrap `gate` for a grid of `len` cells.
    pub fn new(gate: G, len: usize) -> Self {
        Self {
            gate,
            answers: vec![None; len],
            calls: 0,
        }
    }

    /// Ask whether the cell `index` (at `p`) may be entered.
    pub fn admit(&mut self, index: usize, p: Point) -> bool {
        if let Some(answer) = self.answers[index] {
            return answer;
        }
        let answer = self.gate.visit(p);
        self.calls += 1;
        self.answers[index] = Some(answer);
        log::trace!("gate {} {p}", if answer { "accepted" } else { "rejected" });
        answer
    }

    /// The remembered answer for `index`, if the gate was asked.
    #[inline]
    pub fn answer(&self, index: usize) -> Option<bool> {
        self.answers[index]
    }

    /// How many times the inner gate has been called.
    #[inline]
    pub fn calls(&self) -> usize {
        self.calls
    }
}
