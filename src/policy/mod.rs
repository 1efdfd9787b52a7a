//! Caller-side input policy: slider ranges and the optional
//! `alpha + beta = 1` normalization. The optimizer never consults this.

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::scenario::{MarketScenario, Parameter};

const UNIT_SUM_TOLERANCE: f64 = 1e-9;

/// Inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputPolicy {
    pub alpha: Bounds,
    pub beta: Bounds,
    pub p1: Bounds,
    pub p2: Bounds,
    pub m: Bounds,
    pub require_unit_sum: bool,
}

impl Default for InputPolicy {
    /// The reference scenario's slider ranges.
    fn default() -> Self {
        Self {
            alpha: Bounds::new(0.01, 0.99),
            beta: Bounds::new(0.01, 0.99),
            p1: Bounds::new(1.0, 10.0),
            p2: Bounds::new(1.0, 10.0),
            m: Bounds::new(1.0, 24.0),
            require_unit_sum: false,
        }
    }
}

impl InputPolicy {
    /// No bounds at all; only the model's own domain applies.
    pub fn permissive() -> Self {
        let open = Bounds::new(f64::MIN_POSITIVE, f64::MAX);
        Self {
            alpha: open,
            beta: open,
            p1: open,
            p2: open,
            m: open,
            require_unit_sum: false,
        }
    }

    pub fn with_unit_sum(mut self, require: bool) -> Self {
        self.require_unit_sum = require;
        self
    }

    pub fn bounds(&self, parameter: Parameter) -> Bounds {
        match parameter {
            Parameter::Alpha => self.alpha,
            Parameter::Beta => self.beta,
            Parameter::P1 => self.p1,
            Parameter::P2 => self.p2,
            Parameter::M => self.m,
        }
    }

    pub fn check(&self, scenario: &MarketScenario) -> Result<(), PolicyError> {
        for parameter in Parameter::ALL {
            let value = scenario.get(parameter);
            let bounds = self.bounds(parameter);
            if !bounds.contains(value) {
                return Err(PolicyError::OutOfBounds {
                    parameter,
                    value,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }

        if self.require_unit_sum {
            let sum = scenario.alpha() + scenario.beta();
            if (sum - 1.0).abs() > UNIT_SUM_TOLERANCE {
                return Err(PolicyError::ExponentSum { sum });
            }
        }

        Ok(())
    }
}
