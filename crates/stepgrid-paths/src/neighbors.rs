use stepgrid_core::Point;

/// The eight compass offsets in expansion order, clockwise from north-east.
///
/// The order only shapes the visual expansion pattern, never reachability.
pub const COMPASS: [Point; 8] = [
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
    Point::new(0, -1),
];

/// All eight neighbors of `p` in [`COMPASS`] order, bounds unchecked.
#[inline]
pub fn compass(p: Point) -> impl Iterator<Item = Point> {
    COMPASS.into_iter().map(move |d| p + d)
}
