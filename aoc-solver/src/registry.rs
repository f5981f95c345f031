//! Solver registry: an immutable table from (year, day) to solver factories

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use std::collections::BTreeMap;

/// Days per year in AoC (1-25)
pub const DAYS_PER_YEAR: u8 = 25;

/// Factory that parses an input and wraps it into a type-erased solver
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// Metadata about a registered solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverInfo {
    pub year: u16,
    pub day: u8,
    /// Number of parts this solver supports
    pub parts: u8,
}

struct SolverEntry {
    factory: SolverFactory,
    parts: u8,
}

/// Builder for constructing a [`SolverRegistry`]
///
/// Registration is fallible so duplicates surface while the table is
/// built rather than when a lookup picks the wrong solver.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, RegistryBuilder, SolveError, Solver};
///
/// struct Echo;
///
/// impl AocParser for Echo {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.trim())
///     }
/// }
///
/// impl Solver for Echo {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
///         Ok(shared.to_string())
///     }
/// }
///
/// let registry = RegistryBuilder::new()
///     .register_solver::<Echo>(2023, 1)
///     .unwrap()
///     .build();
///
/// let mut solver = registry.create_solver(2023, 1, " hi ").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "hi");
/// ```
pub struct RegistryBuilder {
    solvers: BTreeMap<(u16, u8), SolverEntry>,
}

impl RegistryBuilder {
    /// Create a new empty registry builder
    pub fn new() -> Self {
        Self {
            solvers: BTreeMap::new(),
        }
    }

    /// Register a solver factory function for a specific year and day
    ///
    /// # Returns
    /// * `Ok(Self)` - Builder with the solver registered, ready for chaining
    /// * `Err(RegistrationError::InvalidYearDay)` - `day` is outside 1..=25
    /// * `Err(RegistrationError::DuplicateSolver)` - Year-day already taken
    pub fn register<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        if day == 0 || day > DAYS_PER_YEAR {
            return Err(RegistrationError::InvalidYearDay(year, day));
        }
        if self.solvers.contains_key(&(year, day)) {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }

        log::debug!("registering solver {}/{:02} ({} parts)", year, day, parts);
        self.solvers.insert(
            (year, day),
            SolverEntry {
                factory: Box::new(factory),
                parts,
            },
        );
        Ok(self)
    }

    /// Register solver type `S` for a specific year and day
    pub fn register_solver<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: crate::solver::Solver + 'static,
    {
        self.register(year, day, S::PARTS, move |input: &str| {
            let instance = SolverInstance::<S>::new(year, day, input)?;
            Ok(Box::new(instance))
        })
    }

    /// Register every plugin submitted via `inventory::submit!`
    ///
    /// ```no_run
    /// # use aoc_solver::RegistryBuilder;
    /// let registry = RegistryBuilder::new()
    ///     .register_all_plugins()
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register only the plugins for which `filter` returns `true`
    ///
    /// ```no_run
    /// # use aoc_solver::RegistryBuilder;
    /// // Only the grid puzzles
    /// let registry = RegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.tags.contains(&"grid"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.year, plugin.day)?;
            }
        }
        Ok(self)
    }

    /// Finalize the builder into an immutable registry
    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            solvers: self.solvers,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable registry for looking up and creating solvers
pub struct SolverRegistry {
    solvers: BTreeMap<(u16, u8), SolverEntry>,
}

impl SolverRegistry {
    /// Parse `input` with the solver registered for `year`/`day`
    ///
    /// # Returns
    /// * `Ok(Box<dyn DynSolver>)` - Successfully created solver
    /// * `Err(SolverError::NotFound)` - Nothing registered for year/day
    /// * `Err(SolverError::ParseError)` - The solver rejected the input
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let entry = self
            .solvers
            .get(&(year, day))
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.solvers.contains_key(&(year, day))
    }

    /// Metadata for every registered solver, ordered by year then day
    pub fn iter_info(&self) -> impl Iterator<Item = SolverInfo> + '_ {
        self.solvers.iter().map(|(&(year, day), entry)| SolverInfo {
            year,
            day,
            parts: entry.parts,
        })
    }

    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }
}

/// Object-safe registration hook, so solvers of different types can sit
/// in one plugin table
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: RegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<RegistryBuilder, RegistrationError>;

    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: crate::solver::Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: RegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<RegistryBuilder, RegistrationError> {
        builder.register_solver::<S>(year, day)
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// A solver submitted to the plugin table, usually by
/// `#[derive(AutoRegisterSolver)]`
///
/// ```ignore
/// inventory::submit! {
///     SolverPlugin {
///         year: 2023,
///         day: 18,
///         solver: &Day18,
///         tags: &["geometry"],
///     }
/// }
/// ```
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels for filtering (e.g. "grid", "graph")
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

/// Register a solver type with a builder held in a `mut` binding
///
/// Panics on registration failure; meant for tests and small drivers.
///
/// ```ignore
/// let mut builder = RegistryBuilder::new();
/// register_solver!(builder, Day18, 2023, 18);
/// let registry = builder.build();
/// ```
#[macro_export]
macro_rules! register_solver {
    ($builder:expr, $solver:ty, $year:expr, $day:expr) => {
        $builder = $builder
            .register_solver::<$solver>($year, $day)
            .expect("Failed to register solver");
    };
}
