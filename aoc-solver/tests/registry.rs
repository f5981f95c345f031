//! Registry construction, lookup and dispatch through `DynSolver`

use aoc_solver::{
    AocParser, AocSolver, ParseError, PartSolver, RegistrationError, RegistryBuilder, SolveError,
    SolverError, SolverInfo, register_solver,
};
use proptest::prelude::*;

/// Sums path lengths ("R 6") in part 1, counts turns in part 2.
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Moves;

#[derive(Debug)]
struct MoveData {
    lengths: Vec<u32>,
    part1_calls: u32,
}

impl AocParser for Moves {
    type SharedData<'a> = MoveData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let lengths = input
            .lines()
            .map(|line| {
                let (_, len) = line
                    .split_once(' ')
                    .ok_or_else(|| ParseError::MissingData(format!("no length in {line:?}")))?;
                len.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad length {len:?}")))
            })
            .collect::<Result<Vec<u32>, _>>()?;
        Ok(MoveData {
            lengths,
            part1_calls: 0,
        })
    }
}

impl PartSolver<1> for Moves {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.part1_calls += 1;
        Ok(shared.lengths.iter().sum::<u32>().to_string())
    }
}

impl PartSolver<2> for Moves {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.part1_calls == 0 {
            return Err(SolveError::failed("part 1 has not run"));
        }
        Ok(shared.lengths.len().saturating_sub(1).to_string())
    }
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct Echo;

impl AocParser for Echo {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.trim())
    }
}

impl PartSolver<1> for Echo {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.to_string())
    }
}

#[test]
fn creates_and_solves_registered_solver() {
    let registry = RegistryBuilder::new()
        .register_solver::<Moves>(2023, 18)
        .unwrap()
        .build();

    let mut solver = registry
        .create_solver(2023, 18, "R 6\nD 5\nL 2")
        .unwrap();
    assert_eq!(solver.year(), 2023);
    assert_eq!(solver.day(), 18);
    assert_eq!(solver.parts(), 2);
    assert!(solver.parse_duration() >= chrono::TimeDelta::zero());

    let result = solver.solve(1).unwrap();
    assert_eq!(result.answer, "13");
    assert!(result.solve_end >= result.solve_start);
    assert_eq!(solver.solve(2).unwrap().answer, "2");
}

#[test]
fn shared_data_persists_between_parts() {
    let registry = RegistryBuilder::new()
        .register_solver::<Moves>(2023, 18)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2023, 18, "R 1").unwrap();
    assert!(matches!(solver.solve(2), Err(SolveError::SolveFailed(_))));
    solver.solve(1).unwrap();
    assert_eq!(solver.solve(2).unwrap().answer, "0");
}

#[test]
fn out_of_range_part_through_dyn_solver() {
    let registry = RegistryBuilder::new()
        .register_solver::<Echo>(2023, 1)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2023, 1, "x").unwrap();
    assert!(matches!(solver.solve(2), Err(SolveError::PartOutOfRange(2))));
    assert!(matches!(solver.solve(0), Err(SolveError::PartOutOfRange(0))));
}

#[test]
fn missing_solver_and_parse_failure() {
    let registry = RegistryBuilder::new()
        .register_solver::<Moves>(2023, 18)
        .unwrap()
        .build();

    assert!(matches!(
        registry.create_solver(2023, 19, ""),
        Err(SolverError::NotFound(2023, 19))
    ));
    assert!(matches!(
        registry.create_solver(2023, 18, "R x"),
        Err(SolverError::ParseError(ParseError::InvalidFormat(_)))
    ));
    assert!(matches!(
        registry.create_solver(2023, 18, "R6"),
        Err(SolverError::ParseError(ParseError::MissingData(_)))
    ));
}

#[test]
fn duplicate_and_invalid_registrations_fail() {
    let duplicate = RegistryBuilder::new()
        .register_solver::<Moves>(2023, 18)
        .unwrap()
        .register_solver::<Echo>(2023, 18);
    assert_eq!(
        duplicate.err(),
        Some(RegistrationError::DuplicateSolver(2023, 18))
    );

    let invalid = RegistryBuilder::new().register_solver::<Echo>(2023, 26);
    assert_eq!(invalid.err(), Some(RegistrationError::InvalidYearDay(2023, 26)));

    let zero = RegistryBuilder::new().register_solver::<Echo>(2023, 0);
    assert_eq!(zero.err(), Some(RegistrationError::InvalidYearDay(2023, 0)));
}

#[test]
fn register_solver_macro() {
    let mut builder = RegistryBuilder::new();
    register_solver!(builder, Echo, 2022, 5);
    register_solver!(builder, Moves, 2021, 9);
    let registry = builder.build();

    assert_eq!(registry.len(), 2);
    assert!(registry.contains(2022, 5));
    assert!(!registry.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn info_is_sorted_by_year_then_day(
        keys in prop::collection::btree_set((2015u16..2030, 1u8..=25), 0..12)
    ) {
        let mut shuffled: Vec<_> = keys.iter().copied().collect();
        shuffled.reverse();

        let mut builder = RegistryBuilder::new();
        for (year, day) in shuffled {
            builder = builder.register_solver::<Echo>(year, day).unwrap();
        }
        let registry = builder.build();

        let listed: Vec<SolverInfo> = registry.iter_info().collect();
        let expected: Vec<SolverInfo> = keys
            .into_iter()
            .map(|(year, day)| SolverInfo { year, day, parts: 1 })
            .collect();
        prop_assert_eq!(listed, expected);
    }
}
