//! Day 23: A Long Walk
//!
//! Longest hike from the top opening to the bottom one without stepping on
//! a tile twice. The maze is mostly one-tile corridors, so it is reduced to
//! a small graph of junctions first and the longest path is found by
//! exhaustive DFS on that graph.

use crate::utils::grid::{Direction, Point};
use anyhow::anyhow;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 23, tags = ["grid", "graph"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Path,
    Forest,
    /// Can only be crossed in the direction it points.
    Slope(Direction),
}

impl Tile {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '.' => Tile::Path,
            '#' => Tile::Forest,
            '^' => Tile::Slope(Direction::North),
            'v' => Tile::Slope(Direction::South),
            '>' => Tile::Slope(Direction::East),
            '<' => Tile::Slope(Direction::West),
            _ => return None,
        })
    }

    fn is_open(self) -> bool {
        self != Tile::Forest
    }
}

#[derive(Debug, Clone)]
pub struct Map {
    tiles: Vec<Vec<Tile>>,
    start: Point,
    target: Point,
}

/// Junctions with the corridor lengths to their reachable neighbours.
#[derive(Debug)]
pub struct JunctionGraph {
    edges: Vec<Vec<(usize, u32)>>,
    start: usize,
    target: usize,
}

impl Map {
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let tiles = input
            .trim()
            .lines()
            .enumerate()
            .map(|(row, line)| {
                line.trim()
                    .chars()
                    .map(|c| {
                        Tile::from_char(c)
                            .ok_or_else(|| anyhow!("(line {}) unknown tile {:?}", row + 1, c))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let opening = |row: &[Tile], y: usize| {
            row.iter()
                .position(|t| *t == Tile::Path)
                .map(|x| Point::new(x as i64, y as i64))
        };
        let (first, last) = match (tiles.first(), tiles.last()) {
            (Some(first), Some(last)) if tiles.len() > 1 => (first, last),
            _ => return Err(anyhow!("map needs at least two rows")),
        };
        let start = opening(first, 0).ok_or_else(|| anyhow!("no opening in the top row"))?;
        let target = opening(last, tiles.len() - 1)
            .ok_or_else(|| anyhow!("no opening in the bottom row"))?;

        Ok(Self {
            tiles,
            start,
            target,
        })
    }

    pub fn at(&self, p: Point) -> Option<Tile> {
        let row = self.tiles.get(usize::try_from(p.y).ok()?)?;
        row.get(usize::try_from(p.x).ok()?).copied()
    }

    /// Same map with every slope turned into plain path.
    pub fn without_slopes(&self) -> Self {
        let tiles = self
            .tiles
            .iter()
            .map(|row| {
                row.iter()
                    .map(|t| match t {
                        Tile::Slope(_) => Tile::Path,
                        other => *other,
                    })
                    .collect()
            })
            .collect();
        Self {
            tiles,
            start: self.start,
            target: self.target,
        }
    }

    fn open_neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors()
            .filter(|n| self.at(*n).is_some_and(Tile::is_open))
    }

    /// Collapse corridors into weighted edges between junctions.
    ///
    /// A junction is an open tile with three or more open neighbours, plus
    /// the start and the target. A corridor that crosses a slope pointing
    /// back the way we came is one-way and produces no edge in this
    /// direction; a corridor that dead-ends is dropped.
    pub fn junction_graph(&self) -> JunctionGraph {
        let mut junctions = vec![self.start, self.target];
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let p = Point::new(x as i64, y as i64);
                if tile.is_open()
                    && p != self.start
                    && p != self.target
                    && self.open_neighbors(p).count() >= 3
                {
                    junctions.push(p);
                }
            }
        }
        let index: HashMap<Point, usize> =
            junctions.iter().enumerate().map(|(i, p)| (*p, i)).collect();

        let mut edges = vec![Vec::new(); junctions.len()];
        for (from, &junction) in junctions.iter().enumerate() {
            for first in self.open_neighbors(junction) {
                if let Some((to, len)) = self.walk_corridor(junction, first, &index) {
                    edges[from].push((to, len));
                }
            }
        }

        log::debug!(
            "long walk: {} junctions, {} edges",
            junctions.len(),
            edges.iter().map(Vec::len).sum::<usize>()
        );

        JunctionGraph {
            edges,
            start: 0,
            target: 1,
        }
    }

    fn walk_corridor(
        &self,
        from: Point,
        first: Point,
        junctions: &HashMap<Point, usize>,
    ) -> Option<(usize, u32)> {
        let (mut prev, mut cur) = (from, first);
        let mut len = 1;
        loop {
            if let Some(Tile::Slope(dir)) = self.at(cur) {
                if cur.moved(dir, 1) == prev {
                    return None;
                }
            }
            if let Some(&to) = junctions.get(&cur) {
                return Some((to, len));
            }
            let next = self.open_neighbors(cur).find(|n| *n != prev)?;
            (prev, cur) = (cur, next);
            len += 1;
        }
    }
}

impl JunctionGraph {
    /// Length of the longest simple path from start to target, if any.
    pub fn longest_path(&self) -> Option<u32> {
        let mut visited = vec![false; self.edges.len()];
        self.dfs(self.start, &mut visited)
    }

    fn dfs(&self, node: usize, visited: &mut [bool]) -> Option<u32> {
        if node == self.target {
            return Some(0);
        }
        visited[node] = true;
        let best = self.edges[node]
            .iter()
            .filter_map(|&(next, len)| {
                if visited[next] {
                    None
                } else {
                    self.dfs(next, visited).map(|rest| rest + len)
                }
            })
            .max();
        visited[node] = false;
        best
    }
}

fn longest_hike(map: &Map) -> Result<String, SolveError> {
    map.junction_graph()
        .longest_path()
        .map(|len| len.to_string())
        .ok_or_else(|| SolveError::failed("no route from the top opening to the bottom one"))
}

impl AocParser for Solver {
    type SharedData<'a> = Map;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Map::parse(input).map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        longest_hike(shared)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        longest_hike(&shared.without_slopes())
    }
}
