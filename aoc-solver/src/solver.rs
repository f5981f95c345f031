//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Parses raw puzzle text into the data every part works on.
///
/// `SharedData` is generic over the input lifetime so a parser can keep
/// `&'a str` slices of the input (workflow names, node labels) instead of
/// allocating owned strings.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Trench;
///
/// impl AocParser for Trench {
///     type SharedData<'a> = Vec<i64>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// assert_eq!(Trench::parse("6\n5\n2").unwrap(), vec![6, 5, 2]);
/// ```
pub trait AocParser {
    /// Parsed input plus anything the parts want to cache between them.
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Implementing `PartSolver<1>` and `PartSolver<2>` and deriving
/// [`AocSolver`](crate::AocSolver) is the usual way to get a [`Solver`].
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Perimeter;
///
/// impl AocParser for Perimeter {
///     type SharedData<'a> = Vec<i64>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split_whitespace()
///             .map(|t| t.parse().map_err(|_| ParseError::InvalidFormat(t.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Perimeter {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.iter().sum::<i64>().to_string())
///     }
/// }
///
/// let mut shared = Perimeter::parse("6 5 2").unwrap();
/// assert_eq!(<Perimeter as PartSolver<1>>::solve(&mut shared).unwrap(), "13");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part of the puzzle.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Dispatches a runtime part number to the matching part implementation.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Lengths;
///
/// impl AocParser for Lengths {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.lines().collect())
///     }
/// }
///
/// impl Solver for Lengths {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared.len().to_string()),
///             2 => Ok(shared.iter().map(|l| l.len()).sum::<usize>().to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut shared = Lengths::parse("ab\ncde").unwrap();
/// assert_eq!(Lengths::solve_part(&mut shared, 2).unwrap(), "5");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the problem
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - The part is not implemented
    /// * `Err(SolveError::SolveFailed)` - An error occurred while solving
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

pub trait SolverExt: Solver {
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
