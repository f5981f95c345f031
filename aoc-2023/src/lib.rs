//! Advent of Code 2023 puzzle solutions with automatic registration
//!
//! Each day lives in [`year_2023`] and submits itself to the solver plugin
//! table through `#[derive(AutoRegisterSolver)]`. [`registry`] collects
//! them into a ready-to-use [`SolverRegistry`].
//!
//! Days whose real inputs need different constants from their examples
//! (step budgets, test areas) expose a `parse_with` taking a parameter
//! struct; the registered solvers always use the defaults.

use aoc_solver::{RegistrationError, RegistryBuilder, SolverRegistry};

pub mod utils;
pub mod year_2023;

pub const YEAR: u16 = 2023;

/// Registry holding every 2023 solver in this crate.
pub fn registry() -> Result<SolverRegistry, RegistrationError> {
    let registry = RegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == YEAR)?
        .build();
    log::info!("registered {} solvers for {}", registry.len(), YEAR);
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_day() {
        let registry = registry().unwrap();
        let days: Vec<(u8, u8)> = registry
            .iter_info()
            .map(|info| (info.day, info.parts))
            .collect();
        assert_eq!(days, [(18, 2), (19, 2), (21, 2), (23, 2), (24, 2), (25, 1)]);
    }
}
