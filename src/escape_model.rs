/// Entry point tying the escape pieces together for one configuration.
///
/// ```no_run
/// use atmo_escape_rust::config::EscapeConfig;
/// use atmo_escape_rust::escape_model::EscapeModel;
/// use atmo_escape_rust::planet::PlanetInputs;
///
/// # fn run(inputs: PlanetInputs) -> atmo_escape_rust::error::EscapeResult<()> {
/// let model = EscapeModel::new(EscapeConfig::default())?;
/// let params = model.assemble(&inputs)?;
/// let crossover = model.solve_crossover_mass(&params)?;
/// println!("{:.2} amu, {:.3e} g/s", crossover.mass_amu, model.compute_massloss(&params)?);
/// # Ok(())
/// # }
/// ```

use crate::atomic_radius::AtomicRadiusTable;
use crate::config::EscapeConfig;
use crate::error::EscapeResult;
use crate::escape::total_massloss_rate;
use crate::grid::{self, CrossoverGrid};
use crate::planet::{missing, PlanetInputs, PlanetParameters};
use crate::solver::{CrossoverSolution, CrossoverSolver};
use crate::temperature::equilibrium_temperature;

pub struct EscapeModel<'a> {
    table: &'a AtomicRadiusTable,
    config: EscapeConfig,
}

impl EscapeModel<'static> {
    /// Model backed by the built-in Bondi radius table.
    pub fn new(config: EscapeConfig) -> EscapeResult<Self> {
        EscapeModel::with_table(AtomicRadiusTable::bondi(), config)
    }
}

impl<'a> EscapeModel<'a> {
    pub fn with_table(table: &'a AtomicRadiusTable, config: EscapeConfig) -> EscapeResult<Self> {
        config.validate()?;
        Ok(Self { table, config })
    }

    pub fn config(&self) -> &EscapeConfig {
        &self.config
    }

    pub fn table(&self) -> &AtomicRadiusTable {
        self.table
    }

    pub fn assemble(&self, inputs: &PlanetInputs) -> EscapeResult<PlanetParameters> {
        PlanetParameters::assemble(inputs, &self.config)
    }

    pub fn solve_crossover_mass(&self, params: &PlanetParameters) -> EscapeResult<CrossoverSolution> {
        CrossoverSolver::new(self.table, self.config.solver)?.solve(params)
    }

    /// Total mass-loss rate [g/s].
    pub fn compute_massloss(&self, params: &PlanetParameters) -> EscapeResult<f64> {
        total_massloss_rate(params.mass_flux(), params.radius_cm())
    }

    /// Equilibrium temperature [K] of an assembled planet, with the configured
    /// redistribution and albedo. Ignores any temperature override; fails when the
    /// planet was assembled without `teff_k` or `a_over_rstar`.
    pub fn compute_equilibrium_temperature(&self, params: &PlanetParameters) -> EscapeResult<f64> {
        equilibrium_temperature(
            params.teff_k().ok_or_else(|| missing("teff_k"))?,
            params.a_over_rstar().ok_or_else(|| missing("a_over_rstar"))?,
            self.config.heat_redistribution,
            self.config.bond_albedo,
        )
    }

    pub fn sweep_crossover_grid(
        &self,
        masses_g: &[f64],
        radii_cm: &[f64],
        base: &PlanetInputs,
    ) -> EscapeResult<CrossoverGrid> {
        grid::sweep_crossover_grid(masses_g, radii_cm, base, &self.config, self.table)
    }
}
