use super::traits::Solver;
use super::utility;
use crate::scenario::{MarketScenario, OptimalBundle};

/// Closed-form optimum from the Lagrangian first-order conditions.
///
/// MRS = price ratio gives `x1 = (alpha/beta) * (p2/p1) * x2`; substituting
/// into the budget line `p1*x1 + p2*x2 = m` yields
/// `x2 = m / ((alpha/beta) * p2 + p2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LagrangianSolver;

impl Solver for LagrangianSolver {
    fn name(&self) -> &'static str {
        "lagrangian"
    }

    fn solve(&self, scenario: &MarketScenario) -> OptimalBundle {
        let (alpha, beta) = (scenario.alpha(), scenario.beta());
        let (p1, p2, m) = (scenario.p1(), scenario.p2(), scenario.m());

        let exponent_ratio = alpha / beta;
        let x2 = m / (exponent_ratio * p2 + p2);
        let x1 = exponent_ratio * (p2 / p1) * x2;
        let u = utility(x1, alpha, x2, beta);

        OptimalBundle { x1, x2, u }
    }
}
