use crate::Point;

/// Squared Euclidean distance between two points.
///
/// Overestimates the 8-way step count for every diagonal or multi-step
/// offset, so it is not an admissible A* heuristic. Computed in `i64`: the
/// square of a board-wide offset does not fit in an `i32`.
#[inline]
pub fn euclidean_squared(a: Point, b: Point) -> i64 {
    let dx = i64::from(a.x) - i64::from(b.x);
    let dy = i64::from(a.y) - i64::from(b.y);
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_and_zero_on_self() {
        let a = Point::new(0, 0);
        let b = Point::new(3, -4);
        assert_eq!(euclidean_squared(a, b), 25);
        assert_eq!(euclidean_squared(b, a), 25);
        assert_eq!(euclidean_squared(a, a), 0);
    }

    #[test]
    fn overestimates_beyond_one_step() {
        let a = Point::new(0, 0);
        assert_eq!(euclidean_squared(a, Point::new(1, 1)), 2);
        // two diagonal steps away
        assert_eq!(euclidean_squared(a, Point::new(2, 2)), 8);
    }

    #[test]
    fn wide_offsets_do_not_overflow() {
        let a = Point::new(0, 0);
        assert_eq!(euclidean_squared(a, Point::new(49_998, 0)), 2_499_800_004);
        assert_eq!(
            euclidean_squared(Point::new(i32::MAX - 1, 0), Point::new(0, i32::MAX - 1)),
            2 * i64::from(i32::MAX - 1).pow(2)
        );
    }
}
