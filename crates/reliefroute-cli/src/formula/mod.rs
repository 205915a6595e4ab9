//! `reliefroute formula <name> <args...>`.

use clap::ValueEnum;

use reliefroute::{formula, Point};

use crate::error::{CliError, Result};


#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormulaName {
    /// base population vulnerability seasonality
    Demand,
    /// x1 y1 x2 y2
    Distance,
    /// required vulnerability available
    Allocation,
    /// delivered target delivery_time target_time
    Efficiency,
    /// vulnerability days_since_delivery current_inventory
    Priority,
    /// vulnerability days_since_delivery current_inventory
    PriorityClamped,
    /// radius population_density
    Coverage,
    /// distance average_speed loading_time
    ResponseTime,
    /// successful total on_time_factor
    SuccessRate,
    /// population infrastructure food_security accessibility
    VulnerabilityIndex,
    /// delivery_success coverage_rate response_time_factor efficiency
    DistributionScore,
}

impl FormulaName {
    /// Number of arguments the formula takes.
    pub fn arity(self) -> usize {
        match self {
            FormulaName::Coverage => 2,
            FormulaName::Allocation
            | FormulaName::Priority
            | FormulaName::PriorityClamped
            | FormulaName::ResponseTime
            | FormulaName::SuccessRate => 3,
            FormulaName::Demand
            | FormulaName::Distance
            | FormulaName::Efficiency
            | FormulaName::VulnerabilityIndex
            | FormulaName::DistributionScore => 4,
        }
    }
}

/// Evaluates `name` with positional arguments.
pub fn evaluate(name: FormulaName, args: &[f64]) -> Result<f64> {
    if args.len() != name.arity() {
        return Err(CliError::Usage(format!(
            "{} takes {} arguments, got {}",
            name_of(name),
            name.arity(),
            args.len()
        )));
    }

    let value = match name {
        FormulaName::Demand => formula::demand(args[0], count(args[1])?, args[2], args[3]),
        FormulaName::Distance => formula::distance(
            Point::new(args[0], args[1]),
            Point::new(args[2], args[3]),
        ),
        FormulaName::Allocation => formula::allocation(args[0], args[1], args[2]),
        FormulaName::Efficiency => formula::efficiency(args[0], args[1], args[2], args[3]),
        FormulaName::Priority => formula::priority(args[0], args[1], args[2]),
        FormulaName::PriorityClamped => formula::priority_clamped(args[0], args[1], args[2]),
        FormulaName::Coverage => formula::coverage(args[0], args[1]),
        FormulaName::ResponseTime => formula::response_time(args[0], args[1], args[2]),
        FormulaName::SuccessRate => {
            formula::success_rate(count(args[0])?, count(args[1])?, args[2])
        }
        FormulaName::VulnerabilityIndex => {
            formula::vulnerability_index(count(args[0])?, args[1], args[2], args[3])
        }
        FormulaName::DistributionScore => {
            formula::distribution_score(args[0], args[1], args[2], args[3])
        }
    }?;
    Ok(value)
}

fn name_of(name: FormulaName) -> String {
    name.to_possible_value()
        .map(|value| value.get_name().to_string())
        .unwrap_or_else(|| format!("{name:?}"))
}

// Counts must be whole and non-negative.
fn count(value: f64) -> Result<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(CliError::Usage(format!(
            "expected a non-negative whole number, got {value}"
        )))
    }
}
