use crate::scenario::{MarketScenario, OptimalBundle};

/// Trait that all solvers implement.
///
/// Synchronous and infallible: a `MarketScenario` is validated on
/// construction, so every scenario has a defined optimum.
pub trait Solver: Send + Sync {
    fn name(&self) -> &'static str;

    fn solve(&self, scenario: &MarketScenario) -> OptimalBundle;
}
