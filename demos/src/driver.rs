//! Fixed-delay step loop standing in for an animation timer.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use stepgrid_core::{Board, Point};
use stepgrid_paths::{GridGeometry, Outcome, Stepper};

use crate::config::Scenario;

/// Summary of one driven search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// `None` if the step cap was hit first.
    pub outcome: Option<Outcome>,
    pub steps: usize,
    pub expanded: usize,
    pub visited: usize,
}

/// How much of the board to print while driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frames {
    /// The board after every step.
    All,
    /// Only the final board.
    Last,
}

/// Drive the scenario's search to completion, writing board frames to `out`.
///
/// The board is shared between the gate (which marks visits) and the
/// printer, the way a UI would share it between its event handler and its
/// painter.
pub fn run(scenario: &Scenario, frames: Frames, out: &mut impl Write) -> Result<Report> {
    let board = Rc::new(RefCell::new(scenario.board()?));
    let (geometry, start, end) = {
        let b = board.borrow();
        let geometry = GridGeometry::from_range(b.range())?;
        (geometry, geometry.index_of(b.start()), geometry.index_of(b.end()))
    };

    let gate_board = Rc::clone(&board);
    let gate = move |p: Point| gate_board.borrow_mut().visit(p);
    let algorithm = scenario.run.algorithm;
    let mut engine = algorithm.build(geometry, start, end, gate)?;
    tracing::info!(
        %algorithm,
        width = geometry.width(),
        height = geometry.height(),
        start = %engine.start(),
        end = %engine.end(),
        "search started"
    );

    let delay = Duration::from_millis(scenario.run.delay_ms);
    let mut done = false;
    while !done && engine.steps() < scenario.run.max_steps {
        done = engine.advance();
        if frames == Frames::All {
            write_frame(out, engine.steps(), &board.borrow())?;
            if !delay.is_zero() && !done {
                thread::sleep(delay);
            }
        }
    }
    if frames == Frames::Last {
        write_frame(out, engine.steps(), &board.borrow())?;
    }

    let report = Report {
        outcome: engine.outcome(),
        steps: engine.steps(),
        expanded: engine.expanded(),
        visited: board.borrow().visited_count(),
    };
    match report.outcome {
        Some(outcome) => tracing::info!(steps = report.steps, expanded = report.expanded, "{outcome}"),
        None => tracing::warn!(steps = report.steps, "step limit reached before the search ended"),
    }
    Ok(report)
}

fn write_frame(out: &mut impl Write, step: usize, board: &Board) -> Result<()> {
    writeln!(out, "step {step}")?;
    write!(out, "{board}")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepgrid_paths::Algorithm;

    fn scenario(map: &str, algorithm: Algorithm) -> Scenario {
        let mut s = Scenario::default();
        s.grid.map = Some(map.to_string());
        s.run.algorithm = algorithm;
        s.run.delay_ms = 0;
        s
    }

    #[test]
    fn drives_both_engines_to_the_goal() {
        for a in Algorithm::ALL {
            let s = scenario("S.#.\n..#.\n...E", a);
            let mut out = Vec::new();
            let report = run(&s, Frames::Last, &mut out).unwrap();
            assert_eq!(report.outcome, Some(Outcome::Found), "{a}");
            assert!(report.visited > 0);
            let text = String::from_utf8(out).unwrap();
            assert!(text.starts_with(&format!("step {}", report.steps)));
            assert!(text.contains('+'));
        }
    }

    #[test]
    fn one_frame_per_step() {
        let s = scenario("S..E", Algorithm::BreadthFirst);
        let mut out = Vec::new();
        let report = run(&s, Frames::All, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("step ").count(), report.steps);
        assert_eq!(report.steps, 4);
    }

    #[test]
    fn step_cap_leaves_outcome_open() {
        let mut s = scenario("S.........E", Algorithm::BestFirst);
        s.run.max_steps = 3;
        let report = run(&s, Frames::Last, &mut Vec::new()).unwrap();
        assert_eq!(report.outcome, None);
        assert_eq!(report.steps, 3);
    }

    #[test]
    fn unreachable_goal() {
        let s = scenario("S#.\n##.\n..E", Algorithm::BestFirst);
        let report = run(&s, Frames::Last, &mut Vec::new()).unwrap();
        assert_eq!(report.outcome, Some(Outcome::Exhausted));
        assert_eq!(report.visited, 0);
    }
}
