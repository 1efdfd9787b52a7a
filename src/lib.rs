//! Cobb-Douglas utility maximization under a linear budget constraint.
//!
//! The core (`scenario`, `optimizer`, `curves`) is pure and synchronous.
//! `session` wires it to a line-oriented parameter stream for the binary.

pub mod config;
pub mod curves;
pub mod error;
pub mod metrics;
pub mod optimizer;
pub mod policy;
pub mod scenario;
pub mod session;

pub use error::{CommandError, DomainError, PolicyError, SessionError};
pub use optimizer::{budget_line, isoquant, optimize, solve, utility, LagrangianSolver, Solver};
pub use scenario::{MarketScenario, OptimalBundle, Parameter};
