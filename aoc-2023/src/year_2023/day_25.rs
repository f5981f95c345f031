//! Day 25: Snowverload
//!
//! Cut exactly three wires to split the components into two groups and
//! multiply the group sizes. Every wire has unit capacity, so a pair of
//! components on opposite sides is found by running max-flow from one
//! fixed component until the flow to some other component is exactly
//! three.

use anyhow::{Context, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{HashMap, VecDeque};

/// Number of wires that have to be cut.
const CUT_SIZE: usize = 3;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2023, day = 25, tags = ["graph"])]
pub struct Solver;

/// Undirected wiring diagram with components numbered in order of first
/// appearance.
#[derive(Debug, Default)]
pub struct Wiring<'a> {
    names: Vec<&'a str>,
    adjacency: Vec<Vec<usize>>,
}

impl<'a> Wiring<'a> {
    pub fn parse(input: &'a str) -> anyhow::Result<Self> {
        let mut wiring = Wiring::default();
        let mut index = HashMap::new();
        for (line_idx, line) in input.trim().lines().enumerate() {
            wiring
                .add_line(line, &mut index)
                .with_context(|| format!("(line {}) {:?}", line_idx + 1, line))?;
        }
        Ok(wiring)
    }

    fn add_line(&mut self, line: &'a str, index: &mut HashMap<&'a str, usize>) -> anyhow::Result<()> {
        let Some((from, to)) = line.split_once(':') else {
            bail!("missing ':'");
        };
        let from = from.trim();
        if from.is_empty() {
            bail!("missing component name");
        }
        let from = self.node(from, index);
        let mut any = false;
        for name in to.split_whitespace() {
            let to = self.node(name, index);
            if to == from {
                bail!("component {:?} is wired to itself", name);
            }
            if !self.adjacency[from].contains(&to) {
                self.adjacency[from].push(to);
                self.adjacency[to].push(from);
            }
            any = true;
        }
        if !any {
            bail!("no connected components listed");
        }
        Ok(())
    }

    fn node(&mut self, name: &'a str, index: &mut HashMap<&'a str, usize>) -> usize {
        *index.entry(name).or_insert_with(|| {
            self.names.push(name);
            self.adjacency.push(Vec::new());
            self.names.len() - 1
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Sizes of the two groups left after cutting exactly `cut` wires, if
    /// such a cut exists.
    pub fn split_sizes(&self, cut: usize) -> Option<(usize, usize)> {
        (1..self.len()).find_map(|sink| {
            let side = self.source_side(0, sink, cut)?;
            log::debug!(
                "snowverload: {:?} and {:?} are separated by {} wires",
                self.names[0],
                self.names[sink],
                cut
            );
            Some((side, self.len() - side))
        })
    }

    /// Runs unit-capacity Edmonds-Karp from `source` to `sink`. When the
    /// max flow is exactly `cut`, returns how many nodes stay reachable from
    /// the source in the residual graph.
    fn source_side(&self, source: usize, sink: usize, cut: usize) -> Option<usize> {
        // flow[(u, v)] is +1 when a unit goes u -> v over the undirected wire
        let mut flow: HashMap<(usize, usize), i8> = HashMap::new();
        let residual = |flow: &HashMap<(usize, usize), i8>, u: usize, v: usize| {
            1 - flow.get(&(u, v)).copied().unwrap_or(0)
        };

        for paths in 0..=cut {
            let mut parent = vec![usize::MAX; self.len()];
            parent[source] = source;
            let mut queue = VecDeque::from([source]);
            while let Some(u) = queue.pop_front() {
                if u == sink {
                    break;
                }
                for &v in &self.adjacency[u] {
                    if parent[v] == usize::MAX && residual(&flow, u, v) > 0 {
                        parent[v] = u;
                        queue.push_back(v);
                    }
                }
            }

            if parent[sink] == usize::MAX {
                if paths != cut {
                    return None;
                }
                let reachable = parent.iter().filter(|&&p| p != usize::MAX).count();
                return Some(reachable);
            }

            let mut v = sink;
            while v != source {
                let u = parent[v];
                *flow.entry((u, v)).or_default() += 1;
                *flow.entry((v, u)).or_default() -= 1;
                v = u;
            }
        }
        // more than `cut` disjoint paths
        None
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Wiring<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let wiring =
            Wiring::parse(input).map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))?;
        if wiring.is_empty() {
            return Err(ParseError::MissingData("no components".to_string()));
        }
        Ok(wiring)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (a, b) = shared.split_sizes(CUT_SIZE).ok_or_else(|| {
            SolveError::failed(format!("no set of {} wires splits the components", CUT_SIZE))
        })?;
        Ok((a * b).to_string())
    }
}
