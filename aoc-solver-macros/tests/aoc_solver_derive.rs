use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Lengths;

impl AocParser for Lengths {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split_whitespace()
            .map(|t| {
                t.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("not a length: {t}")))
            })
            .collect()
    }
}

impl PartSolver<1> for Lengths {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<u32>().to_string())
    }
}

impl PartSolver<2> for Lengths {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().max().copied().unwrap_or(0).to_string())
    }
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct SinglePart;

impl AocParser for SinglePart {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for SinglePart {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.lines().count().to_string())
    }
}

#[test]
fn parts_constant_matches_attribute() {
    assert_eq!(<Lengths as Solver>::PARTS, 2);
    assert_eq!(<SinglePart as Solver>::PARTS, 1);
}

#[test]
fn dispatches_to_each_part() {
    let mut shared = Lengths::parse("6 5 2 2").unwrap();
    assert_eq!(Lengths::solve_part(&mut shared, 1).unwrap(), "15");
    assert_eq!(Lengths::solve_part(&mut shared, 2).unwrap(), "6");
}

#[test]
fn unknown_part_is_not_implemented() {
    let mut shared = Lengths::parse("1").unwrap();
    assert!(matches!(
        Lengths::solve_part(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));

    let mut shared = SinglePart::parse("a\nb").unwrap();
    assert!(matches!(
        SinglePart::solve_part(&mut shared, 2),
        Err(SolveError::PartNotImplemented(2))
    ));
}

#[test]
fn borrowed_shared_data() {
    let input = String::from("x\ny\nz");
    let mut shared = SinglePart::parse(&input).unwrap();
    assert_eq!(SinglePart::solve_part(&mut shared, 1).unwrap(), "3");
}
