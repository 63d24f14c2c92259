/// Escape model configuration
///
/// Every field has a default, so a JSON document only needs to name what it
/// changes. Configs are validated when loaded and before use.

use crate::constants::{
    CROSSOVER_BRACKET_HIGH_AMU, CROSSOVER_BRACKET_LOW_AMU, CROSSOVER_DISPLAY_CEILING_AMU,
    DEFAULT_BOND_ALBEDO, DEFAULT_HEAT_REDISTRIBUTION, DEFAULT_HEATING_EFFICIENCY,
    DEFAULT_LIGHT_MOLE_FRACTION, EUV_ABSORPTION_CROSS_SECTION_CM2, MEAN_MOLECULAR_WEIGHT,
    PROTON_MASS_G, REFERENCE_PRESSURE_BARYE,
};
use crate::error::{EscapeError, EscapeResult};
use crate::root_finder::BrentSolver;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Crossover root search settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub bracket_low_amu: f64,
    pub bracket_high_amu: f64,
    pub absolute_tolerance_amu: f64,
    pub relative_tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            bracket_low_amu: CROSSOVER_BRACKET_LOW_AMU,
            bracket_high_amu: CROSSOVER_BRACKET_HIGH_AMU,
            absolute_tolerance_amu: 1e-9,
            relative_tolerance: 4.0 * f64::EPSILON,
            max_iterations: 100,
        }
    }
}

impl SolverConfig {
    /// Same tolerances, different search bracket.
    pub fn with_bracket(self, low_amu: f64, high_amu: f64) -> Self {
        Self {
            bracket_low_amu: low_amu,
            bracket_high_amu: high_amu,
            ..self
        }
    }

    pub fn brent(&self) -> BrentSolver {
        BrentSolver::new(
            self.absolute_tolerance_amu,
            self.relative_tolerance,
            self.max_iterations,
        )
    }

    pub fn validate(&self) -> EscapeResult<()> {
        if !(self.bracket_low_amu > 0.0 && self.bracket_high_amu > self.bracket_low_amu) {
            return Err(EscapeError::InvalidConfig(format!(
                "bracket [{}, {}] must satisfy 0 < low < high",
                self.bracket_low_amu, self.bracket_high_amu
            )));
        }
        if !(self.absolute_tolerance_amu > 0.0) || self.relative_tolerance < 0.0 {
            return Err(EscapeError::InvalidConfig(
                "tolerances must be positive".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(EscapeError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Grid sweep settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Largest crossover mass shown as a value; anything above is capped
    pub display_ceiling_amu: f64,
    /// Solve cells on the rayon pool
    pub parallel: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            display_ceiling_amu: CROSSOVER_DISPLAY_CEILING_AMU,
            parallel: true,
        }
    }
}

impl GridConfig {
    /// Marker value for capped or failed cells, just above the ceiling.
    pub fn sentinel(&self) -> f64 {
        self.display_ceiling_amu + 1.0
    }

    pub fn validate(&self) -> EscapeResult<()> {
        if !(self.display_ceiling_amu > 0.0 && self.display_ceiling_amu.is_finite()) {
            return Err(EscapeError::InvalidConfig(format!(
                "display ceiling {} must be positive",
                self.display_ceiling_amu
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeConfig {
    /// eta, fraction of absorbed EUV energy that drives escape
    pub heating_efficiency: f64,
    /// m1, mass of the escaping light species [g]
    pub light_species_mass_g: f64,
    /// x1, mole fraction of the light species
    pub light_species_mole_fraction: f64,
    pub bond_albedo: f64,
    /// F: 0.25 full redistribution, 0.5 dayside only
    pub heat_redistribution: f64,
    pub absorption_cross_section_cm2: f64,
    pub reference_pressure_barye: f64,
    pub mean_molecular_weight: f64,
    pub solver: SolverConfig,
    pub grid: GridConfig,
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self {
            heating_efficiency: DEFAULT_HEATING_EFFICIENCY,
            light_species_mass_g: PROTON_MASS_G,
            light_species_mole_fraction: DEFAULT_LIGHT_MOLE_FRACTION,
            bond_albedo: DEFAULT_BOND_ALBEDO,
            heat_redistribution: DEFAULT_HEAT_REDISTRIBUTION,
            absorption_cross_section_cm2: EUV_ABSORPTION_CROSS_SECTION_CM2,
            reference_pressure_barye: REFERENCE_PRESSURE_BARYE,
            mean_molecular_weight: MEAN_MOLECULAR_WEIGHT,
            solver: SolverConfig::default(),
            grid: GridConfig::default(),
        }
    }
}

impl EscapeConfig {
    pub fn from_json_str(json_str: &str) -> EscapeResult<Self> {
        let config: EscapeConfig = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> EscapeResult<Self> {
        let json_str = fs::read_to_string(path)?;
        Self::from_json_str(&json_str)
    }

    pub fn validate(&self) -> EscapeResult<()> {
        let positive = [
            ("light_species_mass_g", self.light_species_mass_g),
            ("absorption_cross_section_cm2", self.absorption_cross_section_cm2),
            ("reference_pressure_barye", self.reference_pressure_barye),
            ("mean_molecular_weight", self.mean_molecular_weight),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(EscapeError::InvalidConfig(format!("{name} = {value} must be positive")));
        }
        let unit_interval = [
            ("heating_efficiency", self.heating_efficiency),
            ("light_species_mole_fraction", self.light_species_mole_fraction),
            ("heat_redistribution", self.heat_redistribution),
        ];
        if let Some((name, value)) = unit_interval.iter().find(|(_, v)| !(*v > 0.0 && *v <= 1.0)) {
            return Err(EscapeError::InvalidConfig(format!("{name} = {value} must lie in (0, 1]")));
        }
        if !(0.0..1.0).contains(&self.bond_albedo) {
            return Err(EscapeError::InvalidConfig(format!(
                "bond_albedo = {} must lie in [0, 1)",
                self.bond_albedo
            )));
        }
        self.solver.validate()?;
        self.grid.validate()
    }
}
