pub mod lagrangian;
pub mod traits;

pub use lagrangian::LagrangianSolver;
pub use traits::Solver;

use crate::error::DomainError;
use crate::scenario::{MarketScenario, OptimalBundle};

/// `x1^alpha * x2^beta`. Unchecked; callers own the domain.
pub fn utility(x1: f64, alpha: f64, x2: f64, beta: f64) -> f64 {
    x1.powf(alpha) * x2.powf(beta)
}

/// Validates the five inputs and returns the utility-maximizing bundle.
pub fn optimize(
    alpha: f64,
    beta: f64,
    p1: f64,
    p2: f64,
    m: f64,
) -> Result<OptimalBundle, DomainError> {
    let scenario = MarketScenario::new(alpha, beta, p1, p2, m)?;
    ensure_finite_bundle(solve(&scenario))
}

/// Optimum of an already-validated scenario.
pub fn solve(scenario: &MarketScenario) -> OptimalBundle {
    LagrangianSolver.solve(scenario)
}

/// `x2` on the indifference curve `x1^alpha * x2^beta = u`.
pub fn isoquant(x1: f64, alpha: f64, beta: f64, u: f64) -> Result<f64, DomainError> {
    ensure_finite("x1", x1)?;
    ensure_finite("alpha", alpha)?;
    ensure_finite("beta", beta)?;
    ensure_finite("u", u)?;
    if x1 <= 0.0 {
        return Err(DomainError::NonPositive {
            quantity: "x1",
            value: x1,
        });
    }
    if beta == 0.0 {
        return Err(DomainError::ZeroDivisor { quantity: "beta" });
    }
    // A negative base has no real fractional power.
    if u < 0.0 {
        return Err(DomainError::NonPositive {
            quantity: "u",
            value: u,
        });
    }

    let x2 = (u / x1.powf(alpha)).powf(1.0 / beta);
    ensure_finite("x2", x2)
}

/// `x2` on the budget line `p1*x1 + p2*x2 = m`. Not clipped at zero.
pub fn budget_line(m: f64, p1: f64, p2: f64, x1: f64) -> Result<f64, DomainError> {
    ensure_finite("m", m)?;
    ensure_finite("p1", p1)?;
    ensure_finite("p2", p2)?;
    ensure_finite("x1", x1)?;
    if p2 == 0.0 {
        return Err(DomainError::ZeroDivisor { quantity: "p2" });
    }

    ensure_finite("x2", m / p2 - (p1 / p2) * x1)
}

pub(crate) fn ensure_finite_bundle(bundle: OptimalBundle) -> Result<OptimalBundle, DomainError> {
    ensure_finite("x1", bundle.x1)?;
    ensure_finite("x2", bundle.x2)?;
    ensure_finite("u", bundle.u)?;
    Ok(bundle)
}

fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite { quantity, value })
    }
}
