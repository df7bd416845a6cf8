//! Liang–Barsky segment clipping against an axis-aligned rectangle.

/// Clip the segment `a`–`b` to `[x0, x1] × [y0, y1]` in place.
///
/// Returns `false` when no part of the segment is inside, in which case the
/// endpoints are left untouched.
pub fn clip_line(a: &mut [f64; 2], b: &mut [f64; 2], x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
    let (ax, ay) = (a[0], a[1]);
    let dx = b[0] - ax;
    let dy = b[1] - ay;
    let mut t0 = 0.0;
    let mut t1 = 1.0;

    // Each edge as (distance from a, direction component, entering when positive).
    let edges = [
        (x0 - ax, dx, true),
        (x1 - ax, dx, false),
        (y0 - ay, dy, true),
        (y1 - ay, dy, false),
    ];

    for (r, d, low) in edges {
        if d == 0.0 {
            if (low && r > 0.0) || (!low && r < 0.0) {
                return false;
            }
            continue;
        }
        let r = r / d;
        // Leaving through this edge narrows t1, entering through it narrows t0.
        if (d < 0.0) == low {
            if r < t0 {
                return false;
            }
            if r < t1 {
                t1 = r;
            }
        } else {
            if r > t1 {
                return false;
            }
            if r > t0 {
                t0 = r;
            }
        }
    }

    if t0 > 0.0 {
        *a = [ax + t0 * dx, ay + t0 * dy];
    }
    if t1 < 1.0 {
        *b = [ax + t1 * dx, ay + t1 * dy];
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_inside_is_untouched() {
        let (mut a, mut b) = ([1.0, 1.0], [2.0, 2.0]);
        assert!(clip_line(&mut a, &mut b, 0.0, 0.0, 10.0, 10.0));
        assert_eq!((a, b), ([1.0, 1.0], [2.0, 2.0]));
    }

    #[test]
    fn test_segment_crossing_both_edges() {
        let (mut a, mut b) = ([-5.0, 5.0], [15.0, 5.0]);
        assert!(clip_line(&mut a, &mut b, 0.0, 0.0, 10.0, 10.0));
        assert_eq!((a, b), ([0.0, 5.0], [10.0, 5.0]));
    }

    #[test]
    fn test_segment_outside() {
        let (mut a, mut b) = ([-5.0, -5.0], [-1.0, 20.0]);
        assert!(!clip_line(&mut a, &mut b, 0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_vertical_segment_entering_from_above() {
        let (mut a, mut b) = ([5.0, -10.0], [5.0, 5.0]);
        assert!(clip_line(&mut a, &mut b, 0.0, 0.0, 10.0, 10.0));
        assert_eq!(a, [5.0, 0.0]);
        assert_eq!(b, [5.0, 5.0]);
    }
}
