use serde::{Deserialize, Serialize};

use crate::curves::Plot;
use crate::error::CommandError;
use crate::scenario::Parameter;

/// One slider movement: a single parameter set to a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterChange {
    pub parameter: Parameter,
    pub value: f64,
}

/// Output of an accepted change, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub seq: u64,
    pub plot: Plot,
}

/// Parses `name=value`. Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_command(line: &str) -> Result<Option<ParameterChange>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (name, value) = line
        .split_once('=')
        .ok_or_else(|| CommandError::Malformed(line.to_string()))?;
    let parameter: Parameter = name.parse()?;

    let value = value.trim();
    if value.is_empty() {
        return Err(CommandError::Malformed(line.to_string()));
    }
    let value = value.parse::<f64>().map_err(|_| CommandError::InvalidNumber {
        parameter,
        value: value.to_string(),
    })?;

    Ok(Some(ParameterChange { parameter, value }))
}
