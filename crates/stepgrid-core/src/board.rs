//! A text-backed board of cells that plays the visit-gate role for the
//! search engines.
//!
//! A [`Board`] owns the mutable display state around a search: which cells
//! are blocked, where the start and end markers sit, and which cells have
//! been visited so far. [`Board::visit`] is the gate behavior: it refuses
//! blocked or out-of-bounds cells and marks every other cell as visited.

use std::fmt;

use crate::geom::{Point, Range};

/// What a board cell currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Free, not yet visited.
    #[default]
    Open,
    /// Disabled; never entered.
    Blocked,
    /// The search origin.
    Start,
    /// The search goal.
    End,
    /// Free and already entered by a search.
    Visited,
}

impl CellKind {
    /// Character used by [`Board::parse`] and the `Display` impl.
    pub const fn glyph(self) -> char {
        match self {
            Self::Open => '.',
            Self::Blocked => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Visited => '+',
        }
    }
}

/// Errors that can occur when building a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Width or height is not positive, or the cell count overflows.
    #[error("board: invalid size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
    /// Lines have inconsistent widths.
    #[error("board: line {line} has width {found}, expected {expected}")]
    InconsistentSize {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `.#SE` was found.
    #[error("board contains invalid rune \u{201c}{ch}\u{201d} at {pos}")]
    InvalidRune { ch: char, pos: Point },
    /// No `S` or no `E` marker.
    #[error("board has no \u{201c}{0}\u{201d} marker")]
    MissingMarker(char),
    /// More than one `S` or `E` marker.
    #[error("board has more than one \u{201c}{ch}\u{201d} marker (second at {pos})")]
    DuplicateMarker { ch: char, pos: Point },
    /// A position outside the board was given.
    #[error("board: {pos} is outside {range}")]
    OutOfBounds { pos: Point, range: Range },
    /// The board rectangle does not start at the origin.
    #[error("board: {0} is not anchored at (0, 0)")]
    NotAnchored(Range),
    /// A per-cell layer does not have one entry per cell.
    #[error("board: {layer} layer has {found} cells, expected {expected}")]
    LayerSize {
        layer: &'static str,
        expected: usize,
        found: usize,
    },
}

/// A rectangular board with start/end markers, blocked cells and visit marks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "BoardParts")
)]
pub struct Board {
    range: Range,
    blocked: Vec<bool>,
    visited: Vec<bool>,
    start: Point,
    end: Point,
}

/// Unchecked wire form of [`Board`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct BoardParts {
    range: Range,
    blocked: Vec<bool>,
    visited: Vec<bool>,
    start: Point,
    end: Point,
}

#[cfg(feature = "serde")]
impl TryFrom<BoardParts> for Board {
    type Error = BoardError;

    fn try_from(parts: BoardParts) -> Result<Self, BoardError> {
        let BoardParts {
            range,
            blocked,
            visited,
            start,
            end,
        } = parts;
        if range.min != Point::ZERO {
            return Err(BoardError::NotAnchored(range));
        }
        let mut board = Self::new(range.width(), range.height())?;
        let expected = board.range.len();
        for (layer, cells) in [("blocked", &blocked), ("visited", &visited)] {
            if cells.len() != expected {
                return Err(BoardError::LayerSize {
                    layer,
                    expected,
                    found: cells.len(),
                });
            }
        }
        board.checked(start)?;
        board.checked(end)?;
        board.blocked = blocked;
        board.visited = visited;
        board.start = start;
        board.end = end;
        Ok(board)
    }
}

impl Board {
    /// Create an open board with the start in the top-left corner and the
    /// end in the bottom-right one.
    pub fn new(width: i32, height: i32) -> Result<Self, BoardError> {
        if width <= 0 || height <= 0 || width.checked_mul(height).is_none() {
            return Err(BoardError::InvalidSize { width, height });
        }
        let range = Range::sized(width, height);
        let len = range.len();
        Ok(Self {
            range,
            blocked: vec![false; len],
            visited: vec![false; len],
            start: Point::ZERO,
            end: Point::new(width - 1, height - 1),
        })
    }

    /// Parse a board from rows of `.` (open), `#` (blocked), `S` (start) and
    /// `E` (end).
    ///
    /// Leading and trailing whitespace of the whole text and of each line is
    /// ignored; blank lines are skipped. Exactly one `S` and one `E` are
    /// required.
    pub fn parse(s: &str) -> Result<Self, BoardError> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        for (line, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(BoardError::InconsistentSize {
                    line,
                    expected: width,
                    found,
                });
            }
        }

        let mut board = Self::new(width as i32, rows.len() as i32)?;
        let mut start = None;
        let mut end = None;
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let slot = match ch {
                    '.' => continue,
                    '#' => {
                        board.set_blocked(pos, true)?;
                        continue;
                    }
                    'S' => &mut start,
                    'E' => &mut end,
                    _ => return Err(BoardError::InvalidRune { ch, pos }),
                };
                if slot.replace(pos).is_some() {
                    return Err(BoardError::DuplicateMarker { ch, pos });
                }
            }
        }
        board.start = start.ok_or(BoardError::MissingMarker('S'))?;
        board.end = end.ok_or(BoardError::MissingMarker('E'))?;
        Ok(board)
    }

    /// The board rectangle, always anchored at the origin.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Board width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.range.width()
    }

    /// Board height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.range.height()
    }

    /// Start marker position.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// End marker position.
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Row-major index of `p`, or `None` if it lies outside the board.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.range.contains(p) {
            return None;
        }
        Some((p.y * self.range.width() + p.x) as usize)
    }

    fn checked(&self, p: Point) -> Result<usize, BoardError> {
        self.index(p).ok_or(BoardError::OutOfBounds {
            pos: p,
            range: self.range,
        })
    }

    /// What the cell at `p` shows, or `None` outside the board.
    ///
    /// Blocked wins over the markers, which win over the visit mark.
    pub fn kind(&self, p: Point) -> Option<CellKind> {
        let i = self.index(p)?;
        let kind = if self.blocked[i] {
            CellKind::Blocked
        } else if p == self.start {
            CellKind::Start
        } else if p == self.end {
            CellKind::End
        } else if self.visited[i] {
            CellKind::Visited
        } else {
            CellKind::Open
        };
        Some(kind)
    }

    /// Block or unblock the cell at `p`.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) -> Result<(), BoardError> {
        let i = self.checked(p)?;
        self.blocked[i] = blocked;
        Ok(())
    }

    /// Move the start marker to `p`, unblocking that cell.
    pub fn set_start(&mut self, p: Point) -> Result<(), BoardError> {
        let i = self.checked(p)?;
        self.blocked[i] = false;
        self.start = p;
        Ok(())
    }

    /// Move the end marker to `p`, unblocking that cell.
    pub fn set_end(&mut self, p: Point) -> Result<(), BoardError> {
        let i = self.checked(p)?;
        self.blocked[i] = false;
        self.end = p;
        Ok(())
    }

    /// Whether the cell at `p` has been visited.
    pub fn is_visited(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.visited[i])
    }

    /// Number of visited cells.
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }

    /// Forget every visit mark, keeping obstacles and markers.
    pub fn clear_visited(&mut self) {
        self.visited.fill(false);
    }

    /// Gate a search step into `p`.
    ///
    /// Returns `false` for cells outside the board or blocked cells.
    /// Otherwise marks the cell visited and returns `true`.
    pub fn visit(&mut self, p: Point) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        if self.blocked[i] {
            return false;
        }
        self.visited[i] = true;
        true
    }

    /// A closure over [`visit`](Self::visit), suitable as a search gate.
    pub fn gate(&mut self) -> impl FnMut(Point) -> bool + '_ {
        move |p| self.visit(p)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let kind = self.kind(Point::new(x, y)).unwrap_or_default();
                write!(f, "{}", kind.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
