use crate::types::Point;

/// Linear interpolation between two f32 values
pub fn lerp(start: f32, end: f32, alpha: f32) -> f32 {
    start + (end - start) * alpha
}

/// Linear interpolation between two Point values
pub fn lerp_point(start: Point, end: Point, alpha: f32) -> Point {
    Point {
        x: lerp(start.x, end.x, alpha),
        y: lerp(start.y, end.y, alpha),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_lerp() {
        assert_approx_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_approx_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_approx_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_approx_eq!(lerp(5.0, 10.0, 0.5), 7.5);
    }

    #[test]
    fn test_lerp_point() {
        let start = Point { x: 0.0, y: 0.0 };
        let end = Point { x: 10.0, y: 20.0 };
        let result = lerp_point(start, end, 0.5);
        assert_approx_eq!(result.x, 5.0);
        assert_approx_eq!(result.y, 10.0);
    }
}
