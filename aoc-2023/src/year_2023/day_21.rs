//! Day 21: Step Counter
//!
//! Counts garden plots an elf can stand on after exactly N steps. Any plot
//! whose shortest distance has the same parity as N (and is within N)
//! counts, since the elf can burn spare steps pacing back and forth.

use crate::utils::grid::Point;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{HashSet, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 21, tags = ["grid", "bfs"])]
pub struct Solver;

/// Step budgets for the two parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCounterParams {
    pub steps: u64,
    pub extended_steps: u64,
}

impl Default for StepCounterParams {
    fn default() -> Self {
        Self {
            steps: 64,
            extended_steps: 26_501_365,
        }
    }
}

/// Whether lookups outside the map fall off the edge or repeat the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tiling {
    Bounded,
    Wrapping,
}

#[derive(Debug, thiserror::Error)]
pub enum GardenError {
    #[error("empty map")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid tile {tile:?} at {at}")]
    InvalidTile { tile: char, at: Point },
    #[error("map has no start cell 'S'")]
    MissingStart,
    #[error("found another start at {second} after {first}")]
    MultipleStarts { first: Point, second: Point },
}

impl From<GardenError> for ParseError {
    fn from(err: GardenError) -> Self {
        match err {
            GardenError::MissingStart | GardenError::MultipleStarts { .. } => {
                ParseError::Configuration(err.to_string())
            }
            _ => ParseError::InvalidFormat(err.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Garden {
    width: i64,
    height: i64,
    rocks: Vec<bool>,
    start: Point,
}

impl Garden {
    pub fn parse(input: &str) -> Result<Self, GardenError> {
        let mut width = None;
        let mut rocks = Vec::new();
        let mut start = None;
        let mut height = 0;

        for (row, line) in input.trim().lines().map(str::trim).enumerate() {
            let found = line.chars().count();
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(GardenError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }

            for (col, tile) in line.chars().enumerate() {
                let at = Point::new(col as i64, row as i64);
                match tile {
                    '.' => rocks.push(false),
                    '#' => rocks.push(true),
                    'S' => {
                        if let Some(first) = start {
                            return Err(GardenError::MultipleStarts { first, second: at });
                        }
                        start = Some(at);
                        rocks.push(false);
                    }
                    tile => return Err(GardenError::InvalidTile { tile, at }),
                }
            }
            height += 1;
        }

        let width = match width {
            Some(w) if w > 0 => w as i64,
            _ => return Err(GardenError::Empty),
        };
        let start = start.ok_or(GardenError::MissingStart)?;

        Ok(Self {
            width,
            height,
            rocks,
            start,
        })
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    fn contains(&self, p: Point) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    /// Rock lookup; `p` must already be inside the map.
    fn is_rock(&self, p: Point) -> bool {
        self.rocks[(p.y * self.width + p.x) as usize]
    }

    /// Plots where a walk of exactly `steps` steps from `start` can end.
    ///
    /// Breadth-first with cells marked visited when queued, so each cell is
    /// expanded once. A cell is recorded when it is dequeued with an even
    /// number of steps left.
    pub fn fill(&self, start: Point, steps: u64, tiling: Tiling) -> HashSet<Point> {
        let mut reachable = HashSet::new();
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, steps)]);

        while let Some((point, remaining)) = queue.pop_front() {
            if remaining % 2 == 0 {
                reachable.insert(point);
            }
            if remaining == 0 {
                continue;
            }

            for next in point.neighbors() {
                let tile = match tiling {
                    Tiling::Bounded if !self.contains(next) => continue,
                    Tiling::Bounded => next,
                    Tiling::Wrapping => next.wrapped(self.width, self.height),
                };
                if self.is_rock(tile) || !seen.insert(next) {
                    continue;
                }
                queue.push_back((next, remaining - 1));
            }
        }

        reachable
    }

    /// Plot count for a huge budget on the infinitely tiled map, by
    /// counting whole and partial tiles of the reachable diamond.
    ///
    /// Only exact for this puzzle's input shape: a square map of odd side
    /// of at least 3 with the start in the middle, an open start row and
    /// column, an open border, and a budget of `size / 2` plus an even
    /// number of map widths. All but the open rows and border are
    /// asserted; violating them panics because the count would silently
    /// be wrong.
    pub fn extrapolate(&self, steps: u64) -> u64 {
        assert_eq!(self.width, self.height, "extrapolation needs a square map");
        let size = self.width as u64;
        assert!(size % 2 == 1, "extrapolation needs an odd map side, got {size}");
        assert!(size >= 3, "extrapolation needs a map side of at least 3, got {size}");
        let centre = (size / 2) as i64;
        assert_eq!(
            self.start,
            Point::new(centre, centre),
            "extrapolation needs the start in the middle of the map"
        );
        assert_eq!(
            steps % size,
            size / 2,
            "budget {steps} must end at a map edge (size / 2 past whole tiles)"
        );
        let tiles = steps / size;
        assert!(
            tiles >= 2 && tiles % 2 == 0,
            "budget {steps} must span an even number (>= 2) of {size}-wide tiles"
        );

        let grid_width = tiles - 1;
        let odd = (grid_width / 2 * 2 + 1).pow(2);
        let even = ((grid_width + 1) / 2 * 2).pow(2);

        let last = size as i64 - 1;
        let count = |from: Point, budget: u64| self.fill(from, budget, Tiling::Bounded).len() as u64;

        let odd_points = count(self.start, size * 2 + 1);
        let even_points = count(self.start, size * 2);

        // tips of the diamond, entered from the middle of one edge
        let tips = [
            Point::new(centre, last),
            Point::new(0, centre),
            Point::new(centre, 0),
            Point::new(last, centre),
        ]
        .into_iter()
        .map(|p| count(p, size - 1))
        .sum::<u64>();

        // diagonal edges, entered from a corner
        let corners = [
            Point::new(0, last),
            Point::new(last, last),
            Point::new(0, 0),
            Point::new(last, 0),
        ];
        let small = corners.iter().map(|&p| count(p, size / 2 - 1)).sum::<u64>();
        let large = corners.iter().map(|&p| count(p, size * 3 / 2 - 1)).sum::<u64>();

        log::debug!(
            "step counter: {} tiles wide, {} odd / {} even full tiles ({} / {} plots each)",
            grid_width,
            odd,
            even,
            odd_points,
            even_points
        );

        odd * odd_points
            + even * even_points
            + tips
            + (grid_width + 1) * small
            + grid_width * large
    }
}

#[derive(Debug)]
pub struct SharedData {
    garden: Garden,
    params: StepCounterParams,
}

/// Parse with budgets other than the puzzle's.
pub fn parse_with(input: &str, params: StepCounterParams) -> Result<SharedData, ParseError> {
    let garden = Garden::parse(input)?;
    Ok(SharedData { garden, params })
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_with(input, StepCounterParams::default())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let garden = &shared.garden;
        let plots = garden.fill(garden.start(), shared.params.steps, Tiling::Bounded);
        Ok(plots.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .garden
            .extrapolate(shared.params.extended_steps)
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "\
...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........
";

    const OPEN: &str = "\
...........
...........
...........
...........
...........
.....S.....
...........
...........
...........
...........
...........
";

    const SPARSE_ROCKS: &str = "\
...........
...........
..#.....#..
...#...#...
...........
.....S.....
...........
...#...#...
..#.....#..
...........
...........
";

    fn sample() -> Garden {
        Garden::parse(SAMPLE).unwrap()
    }

    #[test]
    fn sample_six_steps() {
        let mut shared = parse_with(
            SAMPLE,
            StepCounterParams {
                steps: 6,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "16");
    }

    #[test]
    fn sample_bounded_default_budget() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "42");
    }

    #[test]
    fn sample_wrapping() {
        let garden = sample();
        for (steps, expected) in [(6, 16), (10, 50), (50, 1594), (100, 6536)] {
            assert_eq!(
                garden.fill(garden.start(), steps, Tiling::Wrapping).len(),
                expected,
                "{steps} steps"
            );
        }
    }

    #[test]
    fn zero_budget_is_just_the_start() {
        let garden = sample();
        let plots = garden.fill(garden.start(), 0, Tiling::Bounded);
        assert_eq!(plots, HashSet::from([garden.start()]));
    }

    #[test]
    fn odd_budget_excludes_the_start() {
        let garden = sample();
        let plots = garden.fill(garden.start(), 1, Tiling::Bounded);
        assert_eq!(plots.len(), 2);
        assert!(!plots.contains(&garden.start()));
    }

    #[test]
    fn extrapolation_matches_wrapping_fill() {
        for (map, expected) in [(OPEN, [784, 2500, 5184]), (SPARSE_ROCKS, [744, 2356, 4872])] {
            let garden = Garden::parse(map).unwrap();
            for (tiles, expected) in [2u64, 4, 6].into_iter().zip(expected) {
                let steps = tiles * 11 + 5;
                assert_eq!(garden.extrapolate(steps), expected, "{tiles} tiles");
                assert_eq!(
                    garden.fill(garden.start(), steps, Tiling::Wrapping).len() as u64,
                    expected
                );
            }
        }
    }

    #[test]
    #[should_panic(expected = "even number")]
    fn extrapolation_rejects_odd_tile_count() {
        Garden::parse(OPEN).unwrap().extrapolate(3 * 11 + 5);
    }

    #[test]
    #[should_panic(expected = "map edge")]
    fn extrapolation_rejects_mid_tile_budget() {
        Garden::parse(OPEN).unwrap().extrapolate(4 * 11);
    }

    #[test]
    #[should_panic(expected = "square")]
    fn extrapolation_rejects_non_square_map() {
        Garden::parse("...\n.S.\n...\n...\n").unwrap().extrapolate(7);
    }

    #[test]
    #[should_panic(expected = "at least 3")]
    fn extrapolation_rejects_single_cell_map() {
        Garden::parse("S\n").unwrap().extrapolate(4);
    }

    #[test]
    #[should_panic(expected = "middle")]
    fn extrapolation_rejects_off_centre_start() {
        Garden::parse("S..\n...\n...\n").unwrap().extrapolate(7);
    }

    #[test]
    fn start_cell_must_be_unique() {
        assert!(matches!(
            Solver::parse("...\n...\n"),
            Err(ParseError::Configuration(_))
        ));
        assert!(matches!(
            Garden::parse(".S.\n..S\n"),
            Err(GardenError::MultipleStarts { first, second })
                if first == Point::new(1, 0) && second == Point::new(2, 1)
        ));
        assert!(matches!(
            Solver::parse("S.S\n"),
            Err(ParseError::Configuration(_))
        ));
    }

    #[test]
    fn malformed_maps() {
        assert!(matches!(Garden::parse(""), Err(GardenError::Empty)));
        assert!(matches!(
            Garden::parse("..S\n..\n"),
            Err(GardenError::RaggedRow { row: 1, expected: 3, found: 2 })
        ));
        assert!(matches!(
            Solver::parse(".S.\n.x.\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("'x'")
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn smaller_budget_of_same_parity_is_subset(
            x in 0i64..11,
            y in 0i64..11,
            small in 0u64..12,
            extra in 0u64..6,
        ) {
            let garden = Garden::parse(OPEN).unwrap();
            let start = Point::new(x, y);
            let large = small + 2 * extra;
            let a = garden.fill(start, small, Tiling::Bounded);
            let b = garden.fill(start, large, Tiling::Bounded);
            prop_assert!(a.is_subset(&b));
        }

        #[test]
        fn fill_is_repeatable(steps in 0u64..40, wrapping in any::<bool>()) {
            let garden = sample();
            let tiling = if wrapping { Tiling::Wrapping } else { Tiling::Bounded };
            let first = garden.fill(garden.start(), steps, tiling);
            let second = garden.fill(garden.start(), steps, tiling);
            prop_assert_eq!(first, second);
        }
    }
}
