//! Day 24: Never Tell Me The Odds
//!
//! Hailstones fly in straight lines. Part 1 counts pairs whose XY paths
//! cross inside a test area in the future; part 2 finds the single rock
//! throw that hits every hailstone.
//!
//! All geometry is exact: intersections are kept as fractions over `i128`
//! rather than rounded to floating point.

use anyhow::{Context, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 24, tags = ["geometry"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HailParams {
    /// Inclusive X and Y bounds for part 1 crossings.
    pub test_area: RangeInclusive<i64>,
    /// Rock XY velocities searched in part 2 are within `-radius..=radius`.
    pub velocity_radius: i64,
}

impl Default for HailParams {
    fn default() -> Self {
        Self {
            test_area: 200_000_000_000_000..=400_000_000_000_000,
            velocity_radius: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hailstone {
    pub position: [i64; 3],
    pub velocity: [i64; 3],
}

#[derive(Debug)]
pub struct SharedData {
    stones: Vec<Hailstone>,
    params: HailParams,
}

pub fn parse_with(input: &str, params: HailParams) -> Result<SharedData, ParseError> {
    let stones = input
        .trim()
        .lines()
        .enumerate()
        .map(|(line_idx, line)| {
            parse_hailstone(line).with_context(|| format!("(line {}) {:?}", line_idx + 1, line))
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))?;
    Ok(SharedData { stones, params })
}

/// `19, 13, 30 @ -2,  1, -2`
fn parse_hailstone(line: &str) -> anyhow::Result<Hailstone> {
    let Some((position, velocity)) = line.split_once('@') else {
        bail!("missing '@'");
    };
    let triple = |s: &str| -> anyhow::Result<[i64; 3]> {
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<i64>().with_context(|| format!("bad number {:?}", v.trim())))
            .collect::<anyhow::Result<Vec<_>>>()?;
        match values[..] {
            [x, y, z] => Ok([x, y, z]),
            _ => bail!("expected three numbers, got {}", values.len()),
        }
    };
    Ok(Hailstone {
        position: triple(position)?,
        velocity: triple(velocity)?,
    })
}

/// 2D cross product over the XY components.
fn cross(a: (i128, i128), b: (i128, i128)) -> i128 {
    a.0 * b.1 - a.1 * b.0
}

fn xy(v: [i64; 3]) -> (i128, i128) {
    (i128::from(v[0]), i128::from(v[1]))
}

/// Whether the XY paths of `a` and `b` cross inside `area` at a time that
/// is in the future for both stones. Parallel paths never cross.
pub fn paths_cross_within(a: &Hailstone, b: &Hailstone, area: &RangeInclusive<i64>) -> bool {
    let (pa, va) = (xy(a.position), xy(a.velocity));
    let (pb, vb) = (xy(b.position), xy(b.velocity));

    let mut det = cross(va, vb);
    if det == 0 {
        return false;
    }
    let delta = (pb.0 - pa.0, pb.1 - pa.1);
    // times as fractions t_num / det and s_num / det
    let mut t_num = cross(delta, vb);
    let mut s_num = cross(delta, va);
    if det < 0 {
        det = -det;
        t_num = -t_num;
        s_num = -s_num;
    }
    if t_num < 0 || s_num < 0 {
        return false;
    }

    let lo = i128::from(*area.start()) * det;
    let hi = i128::from(*area.end()) * det;
    let x = pa.0 * det + t_num * va.0;
    let y = pa.1 * det + t_num * va.1;
    (lo..=hi).contains(&x) && (lo..=hi).contains(&y)
}

/// Position and velocity of a rock that hits every hailstone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throw {
    pub position: [i64; 3],
    pub velocity: [i64; 3],
}

/// Search integer XY rock velocities for a throw that hits every stone at
/// a whole, non-negative time.
///
/// Seen from the rock, each stone moves with `v_stone - v_rock` and every
/// path passes through the rock's start. For each candidate velocity two
/// stones fix that start in XY, the rest confirm it, and two distinct hit
/// times then fix Z.
pub fn find_throw(stones: &[Hailstone], radius: i64) -> Option<Throw> {
    let (first, rest) = stones.split_first()?;
    (-radius..=radius)
        .cartesian_product(-radius..=radius)
        .find_map(|(vx, vy)| {
            let second = rest.iter().find(|s| {
                let w0 = (i128::from(first.velocity[0] - vx), i128::from(first.velocity[1] - vy));
                let w1 = (i128::from(s.velocity[0] - vx), i128::from(s.velocity[1] - vy));
                cross(w0, w1) != 0
            })?;
            throw_with_velocity(stones, first, second, vx, vy)
        })
        .inspect(|throw| log::debug!("hailstones: rock thrown with velocity {:?}", throw.velocity))
}

fn throw_with_velocity(
    stones: &[Hailstone],
    a: &Hailstone,
    b: &Hailstone,
    vx: i64,
    vy: i64,
) -> Option<Throw> {
    let rel = |s: &Hailstone| {
        (
            i128::from(s.velocity[0] - vx),
            i128::from(s.velocity[1] - vy),
        )
    };
    let (pa, wa) = (xy(a.position), rel(a));
    let (pb, wb) = (xy(b.position), rel(b));

    let det = cross(wa, wb);
    let t_num = cross((pb.0 - pa.0, pb.1 - pa.1), wb);
    if t_num % det != 0 {
        return None;
    }
    let t = t_num / det;
    if t < 0 {
        return None;
    }
    let origin = (pa.0 + wa.0 * t, pa.1 + wa.1 * t);

    // hit time of every stone that moves relative to the rock in XY
    let mut hits = Vec::with_capacity(stones.len());
    for s in stones {
        let (p, w) = (xy(s.position), rel(s));
        let d = (origin.0 - p.0, origin.1 - p.1);
        let time = match w {
            (0, 0) if d == (0, 0) => continue,
            (0, 0) => return None,
            (wx, _) if wx != 0 => exact_div(d.0, wx)?,
            (_, wy) => exact_div(d.1, wy)?,
        };
        if time < 0 || p.0 + w.0 * time != origin.0 || p.1 + w.1 * time != origin.1 {
            return None;
        }
        hits.push((s, time));
    }

    let (s0, t0) = *hits.first()?;
    let (s1, t1) = *hits.iter().find(|(_, t)| *t != t0)?;
    let z_at = |s: &Hailstone, t: i128| i128::from(s.position[2]) + i128::from(s.velocity[2]) * t;
    let vz = exact_div(z_at(s0, t0) - z_at(s1, t1), t0 - t1)?;
    let z = z_at(s0, t0) - vz * t0;
    if hits.iter().any(|&(s, t)| z + vz * t != z_at(s, t)) {
        return None;
    }

    let narrow = |v: i128| i64::try_from(v).ok();
    Some(Throw {
        position: [narrow(origin.0)?, narrow(origin.1)?, narrow(z)?],
        velocity: [vx, vy, narrow(vz)?],
    })
}

fn exact_div(num: i128, den: i128) -> Option<i128> {
    (den != 0 && num % den == 0).then(|| num / den)
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_with(input, HailParams::default())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let area = &shared.params.test_area;
        let crossings = shared
            .stones
            .iter()
            .tuple_combinations()
            .filter(|(a, b)| paths_cross_within(a, b, area))
            .count();
        Ok(crossings.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let throw = find_throw(&shared.stones, shared.params.velocity_radius).ok_or_else(|| {
            SolveError::failed(format!(
                "no rock throw with XY speed within {} hits every hailstone",
                shared.params.velocity_radius
            ))
        })?;
        Ok(throw.position.iter().sum::<i64>().to_string())
    }
}
