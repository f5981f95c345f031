//! Day 18: Lavaduct Lagoon
//!
//! The dig plan traces a closed rectilinear trench one cell wide. The
//! lagoon is the trench plus everything it encloses, which for a lattice
//! polygon through cell centres is the shoelace area plus half the
//! perimeter plus one (Pick's theorem rearranged).

use crate::utils::grid::{Direction, Point};
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 18, tags = ["geometry"])]
pub struct Solver;

/// Longest plain segment; the five hex digits of a colour length share it.
const MAX_LENGTH: u32 = 0xf_ffff;

/// One straight trench segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub direction: Direction,
    pub length: i64,
}

impl Move {
    pub fn reversed(self) -> Self {
        Move {
            direction: self.direction.opposite(),
            length: self.length,
        }
    }
}

/// A dig plan line read both ways: the plain `R 6` and the colour code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigStep {
    pub plain: Move,
    pub color: Move,
}

#[derive(Debug)]
pub struct SharedData {
    steps: Vec<DigStep>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                parse_step(line).with_context(|| format!("(line {}) {:?}", line_idx + 1, line))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|steps| SharedData { steps })
            .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))
    }
}

fn parse_step(line: &str) -> anyhow::Result<DigStep> {
    let mut tokens = line.split_whitespace();
    let (Some(dir), Some(len), Some(color), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        bail!("expected `<dir> <length> (#rrggbb)`");
    };

    let direction = match dir {
        "U" => Direction::North,
        "D" => Direction::South,
        "L" => Direction::West,
        "R" => Direction::East,
        other => bail!("unknown direction {:?}", other),
    };
    let length = len.parse::<u32>().context("bad length")?;
    if length > MAX_LENGTH {
        bail!("length {} is above {}", length, MAX_LENGTH);
    }
    let length = i64::from(length);

    let hex = color
        .strip_prefix("(#")
        .and_then(|c| c.strip_suffix(')'))
        .filter(|c| c.len() == 6)
        .ok_or_else(|| anyhow!("colour must look like (#70c710), got {:?}", color))?;
    let code = u32::from_str_radix(hex, 16).context("colour is not hex")?;
    let color_direction = match code & 0xf {
        0 => Direction::East,
        1 => Direction::South,
        2 => Direction::West,
        3 => Direction::North,
        other => bail!("colour direction digit {} is not 0-3", other),
    };

    Ok(DigStep {
        plain: Move { direction, length },
        color: Move {
            direction: color_direction,
            length: i64::from(code >> 4),
        },
    })
}

/// Cells dug out by a closed path starting at the origin, trench included.
///
/// The path is assumed to close into a simple polygon; an open path gives a
/// meaningless number rather than an error.
pub fn lagoon_area<I>(moves: I) -> i64
where
    I: IntoIterator<Item = Move>,
{
    let mut vertex = Point::ORIGIN;
    let mut twice_area = 0;
    let mut perimeter = 0;
    let mut vertices = 1usize;

    for step in moves {
        let next = vertex.moved(step.direction, step.length);
        twice_area += vertex.cross(next);
        perimeter += step.length;
        vertex = next;
        vertices += 1;
    }
    // closing edge back to the origin
    twice_area += vertex.cross(Point::ORIGIN);

    log::trace!(
        "lagoon: {} vertices, perimeter {}, shoelace x2 {}",
        vertices,
        perimeter,
        twice_area
    );

    twice_area.abs() / 2 + perimeter / 2 + 1
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_area(shared.steps.iter().map(|s| s.plain)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_area(shared.steps.iter().map(|s| s.color)).to_string())
    }
}
