#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Folds any angle into [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Angle of `p` as seen from `center`, in degrees in [0, 360).
///
/// Screen coordinates (+y down), so 90° points straight down on screen.
/// This matches the sweep direction the layout assigns slice angles in.
pub fn point_to_angle(center: Point, p: Point) -> f64 {
    normalize_degrees((p.y - center.y).atan2(p.x - center.x).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point { x: 100.0, y: 75.0 };

    #[test]
    fn test_cardinal_directions() {
        let cases = [
            (Point::new(150.0, 75.0), 0.0),   // right
            (Point::new(100.0, 125.0), 90.0), // down on screen
            (Point::new(50.0, 75.0), 180.0),  // left
            (Point::new(100.0, 25.0), 270.0), // up on screen
        ];

        for (p, expected) in cases {
            assert!(
                (point_to_angle(CENTER, p) - expected).abs() < 1e-9,
                "{p:?} should map to {expected}"
            );
        }
    }

    #[test]
    fn test_normalize_wraps_into_range() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(0.0), 0.0);
    }

    #[test]
    fn test_distance() {
        assert_eq!(CENTER.distance_to(Point::new(103.0, 79.0)), 5.0);
        assert_eq!(CENTER.distance_to(CENTER), 0.0);
    }
}
