//! Day 19: Aplenty
//!
//! Machine parts carry four ratings and are routed through named
//! workflows of threshold rules until accepted or rejected. Part 2 pushes
//! whole boxes of ratings through the same rules, splitting a box at every
//! threshold it straddles.

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 19, tags = ["intervals"])]
pub struct Solver;

/// Name of the workflow every part enters first.
pub const ENTRY: &str = "in";
/// Inclusive bounds of each rating in part 2.
pub const RATING_RANGE: (u64, u64) = (1, 4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    X,
    M,
    A,
    S,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::X, Category::M, Category::A, Category::S];

    pub const fn index(self) -> usize {
        self as usize
    }

    fn from_char(c: char) -> anyhow::Result<Self> {
        Ok(match c {
            'x' => Category::X,
            'm' => Category::M,
            'a' => Category::A,
            's' => Category::S,
            other => bail!("unknown category {:?}", other),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Accept,
    Reject,
    Workflow(&'a str),
}

impl<'a> Target<'a> {
    fn parse(s: &'a str) -> anyhow::Result<Self> {
        Ok(match s {
            "A" => Target::Accept,
            "R" => Target::Reject,
            "" => bail!("empty target"),
            name => Target::Workflow(name),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    Greater,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule<'a> {
    pub category: Category,
    pub comparison: Comparison,
    pub value: u64,
    pub target: Target<'a>,
}

impl Rule<'_> {
    fn matches(&self, part: &Part) -> bool {
        let rating = part.ratings[self.category.index()];
        match self.comparison {
            Comparison::Less => rating < self.value,
            Comparison::Greater => rating > self.value,
        }
    }
}

/// Conditional rules tried in order, then an unconditional fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow<'a> {
    pub rules: Vec<Rule<'a>>,
    pub fallback: Target<'a>,
}

impl<'a> Workflow<'a> {
    pub fn route(&self, part: &Part) -> Target<'a> {
        self.rules
            .iter()
            .find(|rule| rule.matches(part))
            .map_or(self.fallback, |rule| rule.target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part {
    pub ratings: [u64; 4],
}

impl Part {
    pub fn total(&self) -> u64 {
        self.ratings.iter().sum()
    }
}

#[derive(Debug)]
pub struct SharedData<'a> {
    workflows: HashMap<&'a str, Workflow<'a>>,
    parts: Vec<Part>,
}

#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("no workflow named {0:?}")]
    UnknownWorkflow(String),
    #[error("routing loops after {0} workflows")]
    Cycle(usize),
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut workflows = HashMap::new();
        let mut parts = Vec::new();
        let mut in_parts = false;

        for (line_idx, line) in input.trim().lines().enumerate() {
            let line = line.trim();
            let context = || format!("(line {}) {:?}", line_idx + 1, line);
            if line.is_empty() {
                in_parts = true;
            } else if in_parts {
                parts.push(parse_part(line).with_context(context).map_err(invalid)?);
            } else {
                let (name, workflow) = parse_workflow(line).with_context(context).map_err(invalid)?;
                if workflows.insert(name, workflow).is_some() {
                    return Err(ParseError::InvalidFormat(format!(
                        "{}: workflow {:?} defined twice",
                        context(),
                        name
                    )));
                }
            }
        }

        if !workflows.contains_key(ENTRY) {
            return Err(ParseError::MissingData(format!("no {:?} workflow", ENTRY)));
        }

        Ok(SharedData { workflows, parts })
    }
}

fn invalid(e: anyhow::Error) -> ParseError {
    ParseError::InvalidFormat(format!("{:#}", e))
}

/// `px{a<2006:qkq,m>2090:A,rfg}`
fn parse_workflow(line: &str) -> anyhow::Result<(&str, Workflow<'_>)> {
    let (name, body) = line
        .split_once('{')
        .ok_or_else(|| anyhow!("missing '{{'"))?;
    let body = body.strip_suffix('}').ok_or_else(|| anyhow!("missing '}}'"))?;
    if name.is_empty() {
        bail!("workflow without a name");
    }

    let mut clauses: Vec<&str> = body.split(',').collect();
    let fallback = clauses
        .pop()
        .map(Target::parse)
        .transpose()?
        .ok_or_else(|| anyhow!("no fallback target"))?;
    let rules = clauses
        .into_iter()
        .map(parse_rule)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok((name, Workflow { rules, fallback }))
}

/// `a<2006:qkq`
fn parse_rule(clause: &str) -> anyhow::Result<Rule<'_>> {
    let (condition, target) = clause
        .split_once(':')
        .ok_or_else(|| anyhow!("rule {:?} has no ':'", clause))?;
    let mut chars = condition.chars();
    let category = Category::from_char(chars.next().unwrap_or(' '))?;
    let comparison = match chars.next() {
        Some('<') => Comparison::Less,
        Some('>') => Comparison::Greater,
        other => bail!("expected '<' or '>', got {:?}", other),
    };
    let value = chars
        .as_str()
        .parse()
        .with_context(|| format!("bad threshold in {:?}", clause))?;

    Ok(Rule {
        category,
        comparison,
        value,
        target: Target::parse(target)?,
    })
}

/// `{x=787,m=2655,a=1222,s=2876}`
fn parse_part(line: &str) -> anyhow::Result<Part> {
    let body = line
        .strip_prefix('{')
        .and_then(|l| l.strip_suffix('}'))
        .ok_or_else(|| anyhow!("part must be wrapped in braces"))?;

    let mut ratings = [None; 4];
    for field in body.split(',') {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| anyhow!("rating {:?} has no '='", field))?;
        let mut key_chars = key.chars();
        let category = match (key_chars.next(), key_chars.next()) {
            (Some(c), None) => Category::from_char(c)?,
            _ => bail!("bad rating name {:?}", key),
        };
        let value: u64 = value.parse().with_context(|| format!("bad rating {:?}", field))?;
        if ratings[category.index()].replace(value).is_some() {
            bail!("rating {:?} given twice", key);
        }
    }

    let mut out = [0; 4];
    for category in Category::ALL {
        out[category.index()] = ratings[category.index()]
            .ok_or_else(|| anyhow!("missing rating {:?}", category))?;
    }
    Ok(Part { ratings: out })
}

impl<'a> SharedData<'a> {
    fn workflow(&self, name: &str) -> Result<&Workflow<'a>, RoutingError> {
        self.workflows
            .get(name)
            .ok_or_else(|| RoutingError::UnknownWorkflow(name.to_string()))
    }

    /// Run one part from the entry workflow to a verdict.
    pub fn accepts(&self, part: &Part) -> Result<bool, RoutingError> {
        let mut current = ENTRY;
        for _ in 0..=self.workflows.len() {
            match self.workflow(current)?.route(part) {
                Target::Accept => return Ok(true),
                Target::Reject => return Ok(false),
                Target::Workflow(next) => current = next,
            }
        }
        Err(RoutingError::Cycle(self.workflows.len()))
    }

    /// Number of rating combinations in `RATING_RANGE` that end up accepted.
    pub fn accepted_combinations(&self) -> Result<u64, RoutingError> {
        let (lo, hi) = RATING_RANGE;
        let mut pending = vec![(Target::Workflow(ENTRY), RatingBox::new(lo, hi), 0usize)];
        let mut total = 0;

        while let Some((target, ratings, depth)) = pending.pop() {
            let name = match target {
                Target::Accept => {
                    total += ratings.volume();
                    continue;
                }
                Target::Reject => continue,
                Target::Workflow(name) => name,
            };
            if depth > self.workflows.len() {
                return Err(RoutingError::Cycle(depth));
            }

            let workflow = self.workflow(name)?;
            // None once a rule has taken every remaining rating
            let mut remaining = Some(ratings);
            for rule in &workflow.rules {
                let Some(unmatched) = remaining else {
                    break;
                };
                let (matched, rest) = unmatched.split(rule);
                if let Some(matched) = matched {
                    pending.push((rule.target, matched, depth + 1));
                }
                remaining = rest;
            }
            if let Some(rest) = remaining {
                pending.push((workflow.fallback, rest, depth + 1));
            }
        }

        Ok(total)
    }
}

/// Inclusive per-category rating bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RatingBox {
    lo: [u64; 4],
    hi: [u64; 4],
}

impl RatingBox {
    fn new(lo: u64, hi: u64) -> Self {
        Self {
            lo: [lo; 4],
            hi: [hi; 4],
        }
    }

    fn is_empty(&self) -> bool {
        self.lo.iter().zip(&self.hi).any(|(lo, hi)| lo > hi)
    }

    fn volume(&self) -> u64 {
        self.lo
            .iter()
            .zip(&self.hi)
            .map(|(&lo, &hi)| (hi + 1).saturating_sub(lo))
            .product()
    }

    /// Split into the part satisfying `rule` and the part that does not.
    fn split(self, rule: &Rule<'_>) -> (Option<Self>, Option<Self>) {
        let i = rule.category.index();
        let (mut matched, mut rest) = (self, self);
        match rule.comparison {
            Comparison::Less => {
                matched.hi[i] = matched.hi[i].min(rule.value.saturating_sub(1));
                rest.lo[i] = rest.lo[i].max(rule.value);
            }
            Comparison::Greater => {
                matched.lo[i] = matched.lo[i].max(rule.value.saturating_add(1));
                rest.hi[i] = rest.hi[i].min(rule.value);
            }
        }
        let keep = |b: RatingBox| (!b.is_empty()).then_some(b);
        (keep(matched), keep(rest))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for part in &shared.parts {
            if shared.accepts(part).map_err(SolveError::failed)? {
                total += part.total();
            }
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .accepted_combinations()
            .map(|n| n.to_string())
            .map_err(SolveError::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
px{a<2006:qkq,m>2090:A,rfg}
pv{a>1716:R,A}
lnx{m>1548:A,A}
rfg{s<537:gd,x>2440:R,A}
qs{s>3448:A,lnx}
qkq{x<1416:A,crn}
crn{x>2662:A,R}
in{s<1351:px,qqz}
qqz{s>2770:qs,m<1801:hdj,R}
gd{a>3333:R,R}
hdj{m>838:A,pv}

{x=787,m=2655,a=1222,s=2876}
{x=1679,m=44,a=2067,s=496}
{x=2036,m=264,a=79,s=2244}
{x=2461,m=1339,a=466,s=291}
{x=2127,m=1623,a=2188,s=1013}
";

    #[test]
    fn sample_part1() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "19114");
    }

    #[test]
    fn sample_part2() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(
            <Solver as PartSolver<2>>::solve(&mut shared).unwrap(),
            "167409079868000"
        );
    }

    #[test]
    fn parses_workflow_structure() {
        let (name, workflow) = parse_workflow("qqz{s>2770:qs,m<1801:hdj,R}").unwrap();
        assert_eq!(name, "qqz");
        assert_eq!(workflow.fallback, Target::Reject);
        assert_eq!(
            workflow.rules,
            vec![
                Rule {
                    category: Category::S,
                    comparison: Comparison::Greater,
                    value: 2770,
                    target: Target::Workflow("qs"),
                },
                Rule {
                    category: Category::M,
                    comparison: Comparison::Less,
                    value: 1801,
                    target: Target::Workflow("hdj"),
                },
            ]
        );
    }

    #[test]
    fn part_fields_may_come_in_any_order() {
        let part = parse_part("{s=4,a=3,m=2,x=1}").unwrap();
        assert_eq!(part.ratings, [1, 2, 3, 4]);
    }

    #[test]
    fn accept_everything_counts_full_space() {
        let mut shared = Solver::parse("in{A}\n").unwrap();
        assert_eq!(
            <Solver as PartSolver<2>>::solve(&mut shared).unwrap(),
            4000u64.pow(4).to_string()
        );
    }

    #[test]
    fn single_threshold_splits_space() {
        let shared = Solver::parse("in{x<1001:A,R}\n").unwrap();
        assert_eq!(shared.accepted_combinations().unwrap(), 1000 * 4000u64.pow(3));
    }

    #[test]
    fn rule_matching_whole_box_skips_fallback() {
        let shared = Solver::parse("in{x<5000:A,A}\n").unwrap();
        assert_eq!(shared.accepted_combinations().unwrap(), 4000u64.pow(4));

        // the first workflow already narrows `a` below the second threshold
        let shared = Solver::parse("in{a<2006:px,R}\npx{a<3000:A,A}\n").unwrap();
        assert_eq!(shared.accepted_combinations().unwrap(), 2005 * 4000u64.pow(3));
    }

    #[test]
    fn threshold_at_numeric_limit() {
        let input = format!("in{{x>{}:A,R}}\n\n{{x=1,m=1,a=1,s=1}}\n", u64::MAX);
        let mut shared = Solver::parse(&input).unwrap();
        assert_eq!(shared.accepted_combinations().unwrap(), 0);
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "0");
    }

    #[test]
    fn unknown_workflow_fails_to_solve() {
        let mut shared = Solver::parse("in{x>10:nope,A}\n\n{x=11,m=1,a=1,s=1}\n").unwrap();
        assert!(matches!(
            <Solver as PartSolver<1>>::solve(&mut shared),
            Err(SolveError::SolveFailed(_))
        ));
        assert!(matches!(
            shared.accepted_combinations(),
            Err(RoutingError::UnknownWorkflow(name)) if name == "nope"
        ));
    }

    #[test]
    fn routing_loop_is_reported() {
        let shared = Solver::parse("in{aa}\naa{in}\n\n{x=1,m=1,a=1,s=1}\n").unwrap();
        assert!(matches!(
            shared.accepts(&shared.parts[0]),
            Err(RoutingError::Cycle(_))
        ));
        assert!(matches!(shared.accepted_combinations(), Err(RoutingError::Cycle(_))));
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Solver::parse("px{a<2006:qkq,A}\n"),
            Err(ParseError::MissingData(_))
        ));
        for bad in [
            "in{q<5:A,R}",
            "in{a=5:A,R}",
            "in{a<x:A,R}",
            "in{a<5A,R}",
            "in{A",
            "in{A}\nin{R}",
            "in{A}\n\n{x=1,m=2,a=3}",
            "in{A}\n\n{x=1,m=2,a=3,s=4,x=5}",
            "in{A}\n\nx=1,m=2,a=3,s=4",
        ] {
            assert!(
                matches!(Solver::parse(bad), Err(ParseError::InvalidFormat(_))),
                "{bad:?}"
            );
        }
    }
}
