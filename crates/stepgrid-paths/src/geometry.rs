use stepgrid_core::{Point, Range};

use crate::error::{Endpoint, GridError};
use crate::neighbors;

/// Bijection between row-major cell indices and grid coordinates.
///
/// The grid is anchored at the origin: valid points satisfy
/// `0 <= x < width` and `0 <= y < height`, and the cell index of `(x, y)` is
/// `y * width + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Dimensions")
)]
pub struct GridGeometry {
    width: i32,
    height: i32,
}

/// Unchecked wire form of [`GridGeometry`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct Dimensions {
    width: i32,
    height: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<Dimensions> for GridGeometry {
    type Error = GridError;

    fn try_from(d: Dimensions) -> Result<Self, GridError> {
        Self::new(d.width, d.height)
    }
}

impl GridGeometry {
    /// Create the geometry of a `width` × `height` grid.
    ///
    /// Both dimensions must be positive and the cell count must fit in an
    /// `i32`.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 || width.checked_mul(height).is_none() {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Geometry covering `range`, which must start at the origin.
    pub fn from_range(range: Range) -> Result<Self, GridError> {
        if range.min != Point::ZERO {
            return Err(GridError::InvalidDimensions {
                width: range.width(),
                height: range.height(),
            });
        }
        Self::new(range.width(), range.height())
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(self) -> bool {
        false
    }

    /// The grid rectangle.
    #[inline]
    pub fn range(self) -> Range {
        Range::sized(self.width, self.height)
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn in_bounds(self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Convert an in-bounds point to its cell index.
    ///
    /// The result is meaningless for out-of-bounds points; use
    /// [`checked_index`](Self::checked_index) when probing.
    #[inline]
    pub fn index_of(self, p: Point) -> usize {
        debug_assert!(self.in_bounds(p), "{p} outside {}", self.range());
        (p.y * self.width + p.x) as usize
    }

    /// Convert a point to a cell index. Returns `None` if out of bounds.
    #[inline]
    pub fn checked_index(self, p: Point) -> Option<usize> {
        self.in_bounds(p).then(|| self.index_of(p))
    }

    /// Convert a cell index back to a point.
    #[inline]
    pub fn coordinate_of(self, index: usize) -> Point {
        debug_assert!(index < self.len(), "index {index} outside {} cells", self.len());
        let w = self.width as usize;
        Point::new((index % w) as i32, (index / w) as i32)
    }

    /// In-bounds neighbors of `p`, in compass order.
    #[inline]
    pub fn neighbors(self, p: Point) -> impl Iterator<Item = Point> {
        neighbors::compass(p).filter(move |&n| self.in_bounds(n))
    }

    /// Check that a start or end index lies inside the grid.
    pub(crate) fn endpoint(self, endpoint: Endpoint, index: usize) -> Result<Point, GridError> {
        if index >= self.len() {
            return Err(GridError::EndpointOutOfRange {
                endpoint,
                index,
                len: self.len(),
            });
        }
        Ok(self.coordinate_of(index))
    }
}
