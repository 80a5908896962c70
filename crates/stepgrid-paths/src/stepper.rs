use std::fmt;

use stepgrid_core::Point;

use crate::geometry::GridGeometry;

/// How a finished search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The goal cell was reached.
    Found,
    /// Every reachable cell was expanded without meeting the goal.
    Exhausted,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found => f.write_str("goal found"),
            Self::Exhausted => f.write_str("goal unreachable"),
        }
    }
}

/// A search that makes progress one externally triggered step at a time.
///
/// Drivers call [`advance`](Self::advance) on their own schedule (a frame
/// timer, a test loop) until it returns `true`. Once finished, further calls
/// keep returning `true` and do nothing.
pub trait Stepper {
    /// Perform one unit of work. Returns `true` once the search has ended.
    fn advance(&mut self) -> bool;

    /// How the search ended, or `None` while it is still running.
    fn outcome(&self) -> Option<Outcome>;

    /// Number of `advance` calls that did work, including the final one.
    fn steps(&self) -> usize;

    /// Number of cells finalized so far.
    fn expanded(&self) -> usize;

    /// The grid being searched.
    fn geometry(&self) -> GridGeometry;

    fn start(&self) -> Point;

    fn end(&self) -> Point;

    /// Whether the search has ended.
    fn is_done(&self) -> bool {
        self.outcome().is_some()
    }
}

impl<S: Stepper + ?Sized> Stepper for Box<S> {
    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn outcome(&self) -> Option<Outcome> {
        (**self).outcome()
    }

    fn steps(&self) -> usize {
        (**self).steps()
    }

    fn expanded(&self) -> usize {
        (**self).expanded()
    }

    fn geometry(&self) -> GridGeometry {
        (**self).geometry()
    }

    fn start(&self) -> Point {
        (**self).start()
    }

    fn end(&self) -> Point {
        (**self).end()
    }
}

/// Call `advance` until the search ends or `max_calls` calls were made.
///
/// Returns the outcome if the search ended.
pub fn run_to_end<S: Stepper + ?Sized>(stepper: &mut S, max_calls: usize) -> Option<Outcome> {
    for _ in 0..max_calls {
        if stepper.advance() {
            break;
        }
    }
    stepper.outcome()
}
