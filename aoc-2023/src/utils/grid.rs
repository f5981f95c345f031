//! Integer lattice points and compass directions shared by the grid puzzles
//!
//! `y` grows downwards, matching row order in puzzle input, so
//! [`Direction::North`] is `y - 1`.

use std::fmt;
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The point `steps` cells away in `direction`.
    pub fn moved(self, direction: Direction, steps: i64) -> Self {
        self + direction.delta() * steps
    }

    /// The four axis neighbours, in [`Direction::ALL`] order.
    pub fn neighbors(self) -> impl Iterator<Item = Point> {
        Direction::ALL.into_iter().map(move |d| self.moved(d, 1))
    }

    /// Reduce into `0..width` x `0..height` (tiling lookup).
    pub fn wrapped(self, width: i64, height: i64) -> Self {
        Self::new(self.x.rem_euclid(width), self.y.rem_euclid(height))
    }

    /// Cross product `self.x * other.y - self.y * other.x`.
    pub fn cross(self, other: Point) -> i64 {
        self.x * other.y - self.y * other.x
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i64> for Point {
    type Output = Point;

    fn mul(self, rhs: i64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const fn delta(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::South => Point::new(0, 1),
            Direction::East => Point::new(1, 0),
            Direction::West => Point::new(-1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moved_scales_delta() {
        let p = Point::new(2, 3);
        assert_eq!(p.moved(Direction::North, 4), Point::new(2, -1));
        assert_eq!(p.moved(Direction::West, 2), Point::new(0, 3));
    }

    #[test]
    fn neighbors_are_adjacent() {
        let around: Vec<_> = Point::ORIGIN.neighbors().collect();
        assert_eq!(
            around,
            vec![
                Point::new(0, -1),
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(-1, 0)
            ]
        );
    }

    #[test]
    fn wrapped_handles_negatives() {
        assert_eq!(Point::new(-1, -12).wrapped(11, 11), Point::new(10, 10));
        assert_eq!(Point::new(23, 5).wrapped(11, 11), Point::new(1, 5));
    }

    #[test]
    fn opposite_round_trips() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.delta() + d.opposite().delta(), Point::ORIGIN);
        }
    }
}
