//! Samples the isoquant through the optimum and the budget line over an
//! `x1` grid. The grid is always supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::optimizer::{budget_line, ensure_finite_bundle, isoquant, Solver};
use crate::scenario::{MarketScenario, OptimalBundle};

/// Evenly spaced `x1` values, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleGrid {
    lower: f64,
    upper: f64,
    points: usize,
}

impl SampleGrid {
    /// `lower` must be strictly positive: the isoquant is undefined at `x1 = 0`.
    pub fn new(lower: f64, upper: f64, points: usize) -> Result<Self, DomainError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(DomainError::InvalidGrid {
                reason: format!("bounds must be finite, got [{lower}, {upper}]"),
            });
        }
        if lower <= 0.0 {
            return Err(DomainError::InvalidGrid {
                reason: format!("lower bound must be positive, got {lower}"),
            });
        }
        if upper <= lower {
            return Err(DomainError::InvalidGrid {
                reason: format!("upper bound {upper} must exceed lower bound {lower}"),
            });
        }
        if points < 2 {
            return Err(DomainError::InvalidGrid {
                reason: format!("need at least 2 points, got {points}"),
            });
        }
        Ok(Self {
            lower,
            upper,
            points,
        })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        let last = self.points - 1;
        let step = (self.upper - self.lower) / last as f64;
        (0..self.points).map(move |i| {
            // Pin the last sample so rounding never overshoots the bound.
            if i == last {
                self.upper
            } else {
                self.lower + step * i as f64
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    Isoquant,
    BudgetLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x1: f64,
    pub x2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub kind: CurveKind,
    pub points: Vec<CurvePoint>,
}

pub fn sample_isoquant(
    grid: &SampleGrid,
    alpha: f64,
    beta: f64,
    u: f64,
) -> Result<Curve, DomainError> {
    sample(grid, CurveKind::Isoquant, |x1| isoquant(x1, alpha, beta, u))
}

pub fn sample_budget_line(
    grid: &SampleGrid,
    m: f64,
    p1: f64,
    p2: f64,
) -> Result<Curve, DomainError> {
    sample(grid, CurveKind::BudgetLine, |x1| budget_line(m, p1, p2, x1))
}

fn sample<F>(grid: &SampleGrid, kind: CurveKind, f: F) -> Result<Curve, DomainError>
where
    F: Fn(f64) -> Result<f64, DomainError>,
{
    let points = grid
        .xs()
        .map(|x1| f(x1).map(|x2| CurvePoint { x1, x2 }))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Curve { kind, points })
}

/// Everything one parameter change produces for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub solver: String,
    pub scenario: MarketScenario,
    pub optimum: OptimalBundle,
    pub isoquant: Curve,
    pub budget_line: Curve,
}

impl Plot {
    pub fn compute(
        solver: &dyn Solver,
        scenario: &MarketScenario,
        grid: &SampleGrid,
    ) -> Result<Self, DomainError> {
        let optimum = ensure_finite_bundle(solver.solve(scenario))?;
        let isoquant = sample_isoquant(grid, scenario.alpha(), scenario.beta(), optimum.u)?;
        let budget_line = sample_budget_line(grid, scenario.m(), scenario.p1(), scenario.p2())?;

        Ok(Self {
            solver: solver.name().to_string(),
            scenario: *scenario,
            optimum,
            isoquant,
            budget_line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::{utility, LagrangianSolver};

    fn grid() -> SampleGrid {
        SampleGrid::new(0.1, 10.0, 100).unwrap()
    }

    #[test]
    fn test_grid_includes_both_bounds() {
        let xs: Vec<f64> = grid().xs().collect();
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.1);
        assert_eq!(xs[99], 10.0);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_grid_rejects_bad_bounds() {
        assert!(SampleGrid::new(0.0, 10.0, 100).is_err());
        assert!(SampleGrid::new(5.0, 5.0, 100).is_err());
        assert!(SampleGrid::new(0.1, f64::INFINITY, 100).is_err());
        assert!(SampleGrid::new(0.1, 10.0, 1).is_err());
    }

    #[test]
    fn test_isoquant_is_decreasing_and_level() {
        let curve = sample_isoquant(&grid(), 0.3, 0.7, 2.0).unwrap();
        assert_eq!(curve.kind, CurveKind::Isoquant);
        assert_eq!(curve.points.len(), 100);
        assert!(curve.points.windows(2).all(|w| w[0].x2 > w[1].x2));
        for p in &curve.points {
            assert!((utility(p.x1, 0.3, p.x2, 0.7) - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_budget_line_is_linear() {
        let curve = sample_budget_line(&grid(), 10.0, 2.0, 1.0).unwrap();
        let slopes: Vec<f64> = curve
            .points
            .windows(2)
            .map(|w| (w[1].x2 - w[0].x2) / (w[1].x1 - w[0].x1))
            .collect();
        for slope in slopes {
            assert!((slope + 2.0).abs() < 1e-9);
        }
        // Extends past the intercept at x1 = 5 without clipping.
        assert!(curve.points.last().unwrap().x2 < 0.0);
    }

    #[test]
    fn test_budget_line_rejects_zero_price() {
        assert!(sample_budget_line(&grid(), 10.0, 2.0, 0.0).is_err());
    }

    #[test]
    fn test_plot_bundles_optimum_and_curves() {
        let scenario = MarketScenario::new(0.5, 0.5, 2.0, 1.0, 10.0).unwrap();
        let plot = Plot::compute(&LagrangianSolver, &scenario, &grid()).unwrap();

        assert_eq!(plot.solver, "lagrangian");
        assert_eq!(plot.scenario, scenario);
        assert!((plot.optimum.x1 - 2.5).abs() < 1e-9);
        assert_eq!(plot.isoquant.points.len(), grid().points());
        assert_eq!(plot.budget_line.kind, CurveKind::BudgetLine);
    }

    #[test]
    fn test_plot_serializes_curve_kind_in_snake_case() {
        let scenario = MarketScenario::new(0.5, 0.5, 1.0, 1.0, 10.0).unwrap();
        let plot = Plot::compute(&LagrangianSolver, &scenario, &grid()).unwrap();
        let json = serde_json::to_value(&plot).unwrap();
        assert_eq!(json["budget_line"]["kind"], "budget_line");
        assert_eq!(json["isoquant"]["kind"], "isoquant");
        assert_eq!(json["optimum"]["u"], plot.optimum.u);
    }
}
