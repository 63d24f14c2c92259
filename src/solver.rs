/// Self-consistent crossover mass
///
/// The crossover mass m2 sets its own collision diameter through the atomic
/// radius table, hence the diffusion coefficient b1(m2), hence the Hunten
/// crossover mass. The solver looks for the m2 [amu] where
///
/// residual(m2) = crossover_mass(T, Mdot, M, R, x1, m1, b1(m2)) / amu - m2
///
/// vanishes, using Brent's method on the configured bracket.

use crate::atomic_radius::AtomicRadiusTable;
use crate::config::SolverConfig;
use crate::constants::AMU_G;
use crate::crossover::crossover_mass;
use crate::diffusion::binary_diffusion_coefficient;
use crate::error::EscapeResult;
use crate::planet::PlanetParameters;
use log::debug;
use serde::Serialize;

/// The quantities the residual depends on, pulled out of `PlanetParameters`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossoverInputs {
    pub temperature_k: f64,
    /// Mdot [g/cm²/s]
    pub mass_flux: f64,
    pub planet_mass_g: f64,
    pub planet_radius_cm: f64,
    pub light_species_mole_fraction: f64,
    pub light_species_mass_g: f64,
}

impl From<&PlanetParameters> for CrossoverInputs {
    fn from(params: &PlanetParameters) -> Self {
        Self {
            temperature_k: params.temperature_k(),
            mass_flux: params.mass_flux(),
            planet_mass_g: params.mass_g(),
            planet_radius_cm: params.radius_cm(),
            light_species_mole_fraction: params.light_species_mole_fraction(),
            light_species_mass_g: params.light_species_mass_g(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossoverDiagnostics {
    pub iterations: usize,
    pub evaluations: usize,
    /// residual(m2) at the returned root [amu]
    pub residual_amu: f64,
    pub bracket_amu: (f64, f64),
    /// b1 at the root [1/cm/s]
    pub diffusion_coefficient: f64,
    pub light_diameter_cm: f64,
    pub heavy_diameter_cm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossoverSolution {
    pub mass_amu: f64,
    pub diagnostics: CrossoverDiagnostics,
}

impl CrossoverSolution {
    pub fn mass_g(&self) -> f64 {
        self.mass_amu * AMU_G
    }
}

pub struct CrossoverSolver<'a> {
    table: &'a AtomicRadiusTable,
    config: SolverConfig,
}

impl<'a> CrossoverSolver<'a> {
    pub fn new(table: &'a AtomicRadiusTable, config: SolverConfig) -> EscapeResult<Self> {
        config.validate()?;
        Ok(Self { table, config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// b1 for a heavy species of mass `m2_amu` diffusing through the light species.
    pub fn diffusion_coefficient(&self, inputs: &CrossoverInputs, m2_amu: f64) -> EscapeResult<f64> {
        let (d1, d2) = self.diameters(inputs, m2_amu);
        binary_diffusion_coefficient(
            inputs.temperature_k,
            inputs.light_species_mass_g,
            m2_amu * AMU_G,
            d1,
            d2,
        )
    }

    pub fn residual(&self, inputs: &CrossoverInputs, m2_amu: f64) -> EscapeResult<f64> {
        let b1 = self.diffusion_coefficient(inputs, m2_amu)?;
        let m2_g = crossover_mass(
            inputs.temperature_k,
            inputs.mass_flux,
            inputs.planet_mass_g,
            inputs.planet_radius_cm,
            inputs.light_species_mole_fraction,
            inputs.light_species_mass_g,
            b1,
        )?;
        Ok(m2_g / AMU_G - m2_amu)
    }

    pub fn solve(&self, params: &PlanetParameters) -> EscapeResult<CrossoverSolution> {
        self.solve_inputs(&CrossoverInputs::from(params))
    }

    pub fn solve_inputs(&self, inputs: &CrossoverInputs) -> EscapeResult<CrossoverSolution> {
        let (low, high) = (self.config.bracket_low_amu, self.config.bracket_high_amu);
        let solution = self
            .config
            .brent()
            .find_root(|m2_amu| self.residual(inputs, m2_amu), low, high)?;

        let (light_diameter_cm, heavy_diameter_cm) = self.diameters(inputs, solution.root);
        let diffusion_coefficient = self.diffusion_coefficient(inputs, solution.root)?;

        debug!(
            "crossover mass {:.4} amu after {} iterations (residual {:.2e})",
            solution.root, solution.iterations, solution.residual
        );

        Ok(CrossoverSolution {
            mass_amu: solution.root,
            diagnostics: CrossoverDiagnostics {
                iterations: solution.iterations,
                evaluations: solution.evaluations,
                residual_amu: solution.residual,
                bracket_amu: (low, high),
                diffusion_coefficient,
                light_diameter_cm,
                heavy_diameter_cm,
            },
        })
    }

    fn diameters(&self, inputs: &CrossoverInputs, m2_amu: f64) -> (f64, f64) {
        (
            self.table
                .kinetic_diameter_cm(inputs.light_species_mass_g / AMU_G),
            self.table.kinetic_diameter_cm(m2_amu),
        )
    }
}
