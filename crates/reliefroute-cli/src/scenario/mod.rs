//! Scenario files: areas, centers, stock and demand history in one TOML document.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use reliefroute::{
    Area, DistributionCenter, DistributionNetwork, EngineConfig, InventorySnapshot, Point,
    TrainingSet,
};

use crate::error::{CliError, Result};

#[cfg(test)]
mod tests;

/// Scenario used when no file is given.
pub const DEMO_SCENARIO: &str = include_str!("../../scenarios/demo.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Route start. Defaults to the first center's location.
    #[serde(default)]
    pub depot: Option<[f64; 2]>,
    /// Forecast row shared by areas that do not set their own.
    #[serde(default)]
    pub forecast: Option<Vec<f64>>,
    #[serde(default)]
    pub centers: Vec<CenterEntry>,
    pub areas: Vec<AreaEntry>,
    #[serde(default)]
    pub inventory: BTreeMap<String, f64>,
    /// Engine settings; `--config` replaces them.
    #[serde(default)]
    pub engine: Option<EngineConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CenterEntry {
    pub id: String,
    pub location: [f64; 2],
    pub capacity: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AreaEntry {
    pub id: String,
    pub location: [f64; 2],
    pub population: u64,
    pub vulnerability: f64,
    pub history: Vec<f64>,
    /// Training row paired with `history`.
    pub features: Vec<f64>,
    #[serde(default)]
    pub forecast: Option<Vec<f64>>,
}

/// A scenario converted into validated domain values.
#[derive(Debug)]
pub struct PreparedScenario {
    pub areas: Vec<Area>,
    pub network: DistributionNetwork,
    pub inventory: InventorySnapshot,
    pub history: TrainingSet,
    pub features: Vec<Vec<f64>>,
    pub forecast: Vec<Vec<f64>>,
    pub depot: Point,
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn demo() -> Result<Self> {
        Self::from_toml_str(DEMO_SCENARIO)
    }

    /// Validates the scenario and builds domain values.
    pub fn prepare(&self) -> Result<PreparedScenario> {
        if self.areas.is_empty() {
            return Err(CliError::Usage("scenario defines no areas".into()));
        }

        let mut network = DistributionNetwork::new();
        for entry in &self.centers {
            let [x, y] = entry.location;
            network.add_center(DistributionCenter::new(
                entry.id.as_str(),
                Point::try_new(x, y)?,
                entry.capacity,
            )?)?;
        }

        let mut areas = Vec::with_capacity(self.areas.len());
        let mut history = TrainingSet::new();
        let mut features = Vec::with_capacity(self.areas.len());
        let mut forecast = Vec::with_capacity(self.areas.len());
        for entry in &self.areas {
            let [x, y] = entry.location;
            let area = Area::new(
                entry.id.as_str(),
                Point::try_new(x, y)?,
                entry.population,
                entry.vulnerability,
            )?;
            network.add_area(area.clone())?;
            areas.push(area);

            history.insert(entry.id.as_str(), entry.history.clone());
            features.push(entry.features.clone());
            let row = entry
                .forecast
                .as_ref()
                .or(self.forecast.as_ref())
                .ok_or_else(|| {
                    CliError::Usage(format!(
                        "area {} has no forecast and the scenario sets no shared forecast",
                        entry.id
                    ))
                })?;
            forecast.push(row.clone());
        }

        let inventory = InventorySnapshot::try_from(self.inventory.clone())?;

        let depot = match (self.depot, network.centers().first()) {
            (Some([x, y]), _) => Point::try_new(x, y)?,
            (None, Some(center)) => center.location(),
            (None, None) => Point::ORIGIN,
        };

        Ok(PreparedScenario {
            areas,
            network,
            inventory,
            history,
            features,
            forecast,
            depot,
        })
    }
}
