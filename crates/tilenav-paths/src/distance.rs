use std::f64::consts::SQRT_2;

use tilenav_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    dx.hypot(dy)
}

/// Octile distance: exact cost on an open 8-way grid with √2 diagonals.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    f64::from(dx.max(dy)) + (SQRT_2 - 1.0) * f64::from(dx.min(dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(chebyshev(a, b), 4);
        assert_eq!(euclidean(a, b), 5.0);
        assert!((octile(a, b) - (4.0 + 3.0 * (SQRT_2 - 1.0))).abs() < 1e-12);
    }

    #[test]
    fn octile_bounded_by_euclidean_and_manhattan() {
        for x in -4..=4 {
            for y in -4..=4 {
                let a = Point::ZERO;
                let b = Point::new(x, y);
                assert!(euclidean(a, b) <= octile(a, b) + 1e-12);
                assert!(octile(a, b) <= f64::from(manhattan(a, b)) + 1e-12);
                assert!(f64::from(chebyshev(a, b)) <= euclidean(a, b) + 1e-12);
            }
        }
    }
}
