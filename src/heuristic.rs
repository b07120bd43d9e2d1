use grid_util::point::Point;

/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two
/// positions. Admissible on a 4-grid where every step costs at least 1.
pub fn manhattan(a: &Point, b: &Point) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_and_zero_on_equal() {
        let a = Point::new(0, 0);
        let b = Point::new(3, -4);
        assert_eq!(manhattan(&a, &b), 7);
        assert_eq!(manhattan(&b, &a), 7);
        assert_eq!(manhattan(&b, &b), 0);
    }

    #[test]
    fn extreme_coordinates() {
        let a = Point::new(i32::MIN, 0);
        let b = Point::new(i32::MAX, 0);
        assert_eq!(manhattan(&a, &b), u32::MAX);
        assert_eq!(manhattan(&Point::new(0, i32::MIN), &Point::new(0, 0)), 1 << 31);
    }
}
