//! Advent of Code Solver Library
//!
//! A small framework for puzzle solvers: each puzzle parses its input once
//! into shared data and answers its parts from that data.
//!
//! # Overview
//!
//! - [`AocParser`] turns raw text into the puzzle's shared data
//! - [`PartSolver<N>`] answers part `N`; `#[derive(AocSolver)]` glues the
//!   parts into a [`Solver`] that dispatches on a runtime part number
//! - [`RegistryBuilder`] / [`SolverRegistry`] map (year, day) to solver
//!   factories; `#[derive(AutoRegisterSolver)]` submits a solver to the
//!   plugin table the builder can pull from
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, RegistryBuilder, SolveError};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or_default().to_string())
//!     }
//! }
//!
//! let registry = RegistryBuilder::new()
//!     .register_solver::<Depths>(2023, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2023, 1, "1\n7\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "11");
//! assert_eq!(solver.solve(2).unwrap().answer, "7");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    DAYS_PER_YEAR, RegisterableSolver, RegistryBuilder, SolverFactory, SolverInfo, SolverPlugin,
    SolverRegistry,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
