use stepgrid_core::{Board, CellKind, Point};
use stepgrid_paths::{Algorithm, BestFirst, BreadthFirst, GridGeometry, Outcome, Stepper, run_to_end};

fn open(_: Point) -> bool {
    true
}

#[test]
fn bfs_three_by_one_reaches_goal_within_three_calls() {
    let mut bfs = BreadthFirst::new(3, 1, 0, 2, open).unwrap();
    let mut calls = 0;
    while !bfs.advance() {
        calls += 1;
        assert!(calls < 3);
    }
    assert!(bfs.steps() <= 3);
    assert_eq!(bfs.outcome(), Some(Outcome::Found));
}

#[test]
fn single_cell_terminates_immediately() {
    let geometry = GridGeometry::new(1, 1).unwrap();
    for a in Algorithm::ALL {
        let mut engine = a.build(geometry, 0, 0, open).unwrap();
        assert!(engine.advance(), "{a}");
        assert_eq!(engine.outcome(), Some(Outcome::Found));
    }
}

#[test]
fn walled_in_goal_is_unreachable() {
    // Every cell except start and end is disabled.
    let board_text = "
        S##
        ###
        ##E
    ";
    for a in Algorithm::ALL {
        let mut board = Board::parse(board_text).unwrap();
        let geometry = GridGeometry::from_range(board.range()).unwrap();
        let (start, end) = (geometry.index_of(board.start()), geometry.index_of(board.end()));
        let outcome = {
            let mut engine = a.build(geometry, start, end, board.gate()).unwrap();
            run_to_end(&mut engine, 100)
        };
        assert_eq!(outcome, Some(Outcome::Exhausted), "{a}");
        assert_eq!(board.kind(board.end()), Some(CellKind::End));
        assert!(!board.is_visited(board.end()));
    }
}

#[test]
fn best_first_open_five_by_five() {
    let mut bf = BestFirst::new(5, 5, 0, 24, open).unwrap();
    let mut selections = 0;
    loop {
        let idle = bf.selected().is_none();
        let before: Vec<i64> = bf.open_nodes().map(|n| n.f).collect();
        let done = bf.advance();
        if idle && !before.is_empty() {
            let chosen = bf.last_selected().unwrap();
            assert!(before.iter().all(|&f| chosen.f <= f));
            assert!(before.contains(&chosen.f));
            selections += 1;
        }
        if done {
            break;
        }
        assert!(bf.steps() < 25 * 8 + 2);
    }
    assert_eq!(bf.outcome(), Some(Outcome::Found));
    assert!(selections > 0);
    assert!(bf.closed_nodes().any(|n| n.pos == Point::new(4, 4)));
}

#[test]
fn bfs_marks_board_as_it_goes() {
    let mut board = Board::parse(
        "
        S...
        .##.
        ...E
        ",
    )
    .unwrap();
    let geometry = GridGeometry::from_range(board.range()).unwrap();
    let (start, end) = (geometry.index_of(board.start()), geometry.index_of(board.end()));
    let mut bfs = BreadthFirst::with_geometry(geometry, start, end, board.gate()).unwrap();
    assert!(!bfs.advance());
    assert_eq!(bfs.expanded(), 1);
    let outcome = run_to_end(&mut bfs, 100);
    assert_eq!(outcome, Some(Outcome::Found));
    let expanded = bfs.expanded();
    drop(bfs);
    // Start is marked but still shows as the start; goal is never gated.
    assert!(board.is_visited(board.start()));
    assert!(!board.is_visited(board.end()));
    assert_eq!(board.visited_count(), expanded);
    assert!(!board.is_visited(Point::new(1, 1)));
}

#[test]
fn best_first_goes_around_a_wall() {
    let mut board = Board::parse(
        "
        S.#...
        ..#.#.
        ....#E
        ",
    )
    .unwrap();
    let geometry = GridGeometry::from_range(board.range()).unwrap();
    let (start, end) = (geometry.index_of(board.start()), geometry.index_of(board.end()));
    let mut bf = BestFirst::with_geometry(geometry, start, end, board.gate()).unwrap();
    assert_eq!(run_to_end(&mut bf, 10_000), Some(Outcome::Found));
    let goal = *bf.closed_nodes().find(|n| n.pos == Point::new(5, 2)).unwrap();
    assert!(goal.g >= 5);
    drop(bf);
    assert!(board.is_visited(Point::new(3, 1)));
}

#[test]
fn best_first_skips_goal_the_gate_refuses() {
    // The gate is consulted for every neighbor, the goal included.
    let mut bf = BestFirst::new(3, 1, 0, 2, |p: Point| p.x != 2).unwrap();
    assert_eq!(run_to_end(&mut bf, 100), Some(Outcome::Exhausted));
}
