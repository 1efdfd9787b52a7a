use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CommandError, DomainError};
use super::ensure_positive;

/// The five inputs of a scenario, named the way commands and JSON name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Alpha,
    Beta,
    P1,
    P2,
    M,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::Alpha,
        Parameter::Beta,
        Parameter::P1,
        Parameter::P2,
        Parameter::M,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Alpha => "alpha",
            Parameter::Beta => "beta",
            Parameter::P1 => "p1",
            Parameter::P2 => "p2",
            Parameter::M => "m",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Parameter {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Parameter::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| CommandError::UnknownParameter(name.to_string()))
    }
}

/// Utility exponents, prices and income. Always valid once constructed:
/// every field is finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScenario")]
pub struct MarketScenario {
    alpha: f64,
    beta: f64,
    p1: f64,
    p2: f64,
    m: f64,
}

#[derive(Deserialize)]
struct RawScenario {
    alpha: f64,
    beta: f64,
    p1: f64,
    p2: f64,
    m: f64,
}

impl TryFrom<RawScenario> for MarketScenario {
    type Error = DomainError;

    fn try_from(raw: RawScenario) -> Result<Self, Self::Error> {
        MarketScenario::new(raw.alpha, raw.beta, raw.p1, raw.p2, raw.m)
    }
}

impl MarketScenario {
    pub fn new(alpha: f64, beta: f64, p1: f64, p2: f64, m: f64) -> Result<Self, DomainError> {
        Ok(Self {
            alpha: ensure_positive(Parameter::Alpha, alpha)?,
            beta: ensure_positive(Parameter::Beta, beta)?,
            p1: ensure_positive(Parameter::P1, p1)?,
            p2: ensure_positive(Parameter::P2, p2)?,
            m: ensure_positive(Parameter::M, m)?,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn p1(&self) -> f64 {
        self.p1
    }

    pub fn p2(&self) -> f64 {
        self.p2
    }

    pub fn m(&self) -> f64 {
        self.m
    }

    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Alpha => self.alpha,
            Parameter::Beta => self.beta,
            Parameter::P1 => self.p1,
            Parameter::P2 => self.p2,
            Parameter::M => self.m,
        }
    }

    /// Returns a copy with one parameter replaced, re-validated.
    pub fn with(&self, parameter: Parameter, value: f64) -> Result<Self, DomainError> {
        let mut next = *self;
        let slot = match parameter {
            Parameter::Alpha => &mut next.alpha,
            Parameter::Beta => &mut next.beta,
            Parameter::P1 => &mut next.p1,
            Parameter::P2 => &mut next.p2,
            Parameter::M => &mut next.m,
        };
        *slot = ensure_positive(parameter, value)?;
        Ok(next)
    }

    pub fn with_alpha(&self, alpha: f64) -> Result<Self, DomainError> {
        self.with(Parameter::Alpha, alpha)
    }

    pub fn with_beta(&self, beta: f64) -> Result<Self, DomainError> {
        self.with(Parameter::Beta, beta)
    }

    pub fn with_prices(&self, p1: f64, p2: f64) -> Result<Self, DomainError> {
        self.with(Parameter::P1, p1)?.with(Parameter::P2, p2)
    }

    pub fn with_income(&self, m: f64) -> Result<Self, DomainError> {
        self.with(Parameter::M, m)
    }

    /// Fractions of income spent on goods 1 and 2 at the optimum.
    /// Sum to one whether or not the exponents do.
    pub fn budget_shares(&self) -> (f64, f64) {
        let total = self.alpha + self.beta;
        (self.alpha / total, self.beta / total)
    }
}

/// Utility-maximizing quantities and the utility they reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalBundle {
    pub x1: f64,
    pub x2: f64,
    pub u: f64,
}

impl OptimalBundle {
    pub fn expenditure(&self, p1: f64, p2: f64) -> f64 {
        self.x1 * p1 + self.x2 * p2
    }

    /// `x1 / x2`.
    pub fn ratio(&self) -> f64 {
        self.x1 / self.x2
    }
}
