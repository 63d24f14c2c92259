/// Mass/radius sweeps of the crossover mass
///
/// Every cell is solved on its own and ends up as a `CellOutcome`. A cell that
/// fails or lands above the display ceiling is kept in the grid with its reason,
/// and `values()` renders it as the sentinel, so one bad cell never takes the
/// whole sweep down.
///
/// Layout follows a meshgrid: rows walk the radius axis, columns the mass axis.

use crate::atomic_radius::AtomicRadiusTable;
use crate::config::{EscapeConfig, GridConfig};
use crate::error::{EscapeError, EscapeResult};
use crate::planet::{PlanetInputs, PlanetParameters};
use crate::solver::CrossoverSolver;
use log::{info, warn};
use ndarray::Array2;
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum CellOutcome {
    /// Crossover mass [amu] within the display ceiling
    Converged(f64),
    /// Solved, but above the display ceiling [amu]
    OutOfRange(f64),
    /// The cell could not be solved; carries the reason
    Failed(String),
}

impl CellOutcome {
    fn classify(result: EscapeResult<f64>, ceiling: f64) -> Self {
        match result {
            Ok(mass) if !mass.is_finite() => {
                CellOutcome::Failed(format!("non-finite crossover mass {mass}"))
            }
            Ok(mass) if mass > ceiling => CellOutcome::OutOfRange(mass),
            Ok(mass) => CellOutcome::Converged(mass),
            Err(err) => CellOutcome::Failed(err.to_string()),
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, CellOutcome::Converged(_))
    }

    /// Value to plot: the mass when converged, `sentinel` otherwise.
    pub fn display_value(&self, sentinel: f64) -> f64 {
        match self {
            CellOutcome::Converged(mass) => *mass,
            _ => sentinel,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrossoverGrid {
    masses: Vec<f64>,
    radii: Vec<f64>,
    outcomes: Array2<CellOutcome>,
    sentinel: f64,
}

impl CrossoverGrid {
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn sentinel(&self) -> f64 {
        self.sentinel
    }

    /// Per-cell outcomes, indexed `[radius, mass]`.
    pub fn outcomes(&self) -> &Array2<CellOutcome> {
        &self.outcomes
    }

    pub fn outcome(&self, radius_index: usize, mass_index: usize) -> Option<&CellOutcome> {
        self.outcomes.get((radius_index, mass_index))
    }

    /// Crossover masses [amu], sentinel where a cell did not converge within the ceiling.
    pub fn values(&self) -> Array2<f64> {
        self.outcomes.map(|outcome| outcome.display_value(self.sentinel))
    }

    pub fn sentinel_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_converged()).count()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.outcomes.dim()
    }
}

/// Evaluates `cell_fn(mass, radius)` over the full mass/radius grid.
///
/// Errors from `cell_fn` are recorded per cell and never returned; only an
/// invalid `GridConfig` fails the sweep.
pub fn sweep_grid<F>(
    masses: &[f64],
    radii: &[f64],
    config: &GridConfig,
    cell_fn: F,
) -> EscapeResult<CrossoverGrid>
where
    F: Fn(f64, f64) -> EscapeResult<f64> + Sync,
{
    config.validate()?;
    let ceiling = config.display_ceiling_amu;
    let cells: Vec<(f64, f64)> = radii
        .iter()
        .flat_map(|&radius| masses.iter().map(move |&mass| (mass, radius)))
        .collect();

    let solve = |&(mass, radius): &(f64, f64)| {
        let outcome = CellOutcome::classify(cell_fn(mass, radius), ceiling);
        match &outcome {
            CellOutcome::OutOfRange(value) => {
                warn!("cell M={mass:.4e} R={radius:.4e}: {value:.2} amu above ceiling {ceiling}")
            }
            CellOutcome::Failed(reason) => warn!("cell M={mass:.4e} R={radius:.4e} failed: {reason}"),
            CellOutcome::Converged(_) => {}
        }
        outcome
    };

    let outcomes: Vec<CellOutcome> = if config.parallel {
        cells.par_iter().map(solve).collect()
    } else {
        cells.iter().map(solve).collect()
    };

    let outcomes = Array2::from_shape_vec((radii.len(), masses.len()), outcomes)
        .map_err(|err| EscapeError::InvalidConfig(format!("grid shape: {err}")))?;

    let grid = CrossoverGrid {
        masses: masses.to_vec(),
        radii: radii.to_vec(),
        outcomes,
        sentinel: config.sentinel(),
    };
    info!(
        "swept {}x{} grid: {} cells at sentinel {}",
        radii.len(),
        masses.len(),
        grid.sentinel_count(),
        grid.sentinel
    );
    Ok(grid)
}

/// Solves the crossover mass for every (mass [g], radius [cm]) pair, reassembling
/// the planet from `base` at each cell.
pub fn sweep_crossover_grid(
    masses_g: &[f64],
    radii_cm: &[f64],
    base: &PlanetInputs,
    config: &EscapeConfig,
    table: &AtomicRadiusTable,
) -> EscapeResult<CrossoverGrid> {
    config.validate()?;
    let solver = CrossoverSolver::new(table, config.solver)?;
    sweep_grid(masses_g, radii_cm, &config.grid, |mass_g, radius_cm| {
        let params = PlanetParameters::assemble(&base.with_mass_and_radius(mass_g, radius_cm), config)?;
        Ok(solver.solve(&params)?.mass_amu)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential() -> GridConfig {
        GridConfig {
            parallel: false,
            ..GridConfig::default()
        }
    }

    #[test]
    fn test_layout_is_radius_by_mass() {
        let grid = sweep_grid(&[1.0, 2.0, 3.0], &[10.0, 20.0], &sequential(), |m, r| Ok(m + r))
            .unwrap();
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.outcome(1, 2), Some(&CellOutcome::Converged(23.0)));
        assert_eq!(grid.outcome(0, 0), Some(&CellOutcome::Converged(11.0)));
        assert_eq!(grid.outcome(2, 0), None);
    }

    #[test]
    fn test_failures_become_sentinels() {
        let grid = sweep_grid(&[1.0, 2.0], &[1.0, 2.0], &sequential(), |m, r| {
            if m == 2.0 && r == 1.0 {
                Err(EscapeError::ConvergenceFailure {
                    iterations: 100,
                    last_estimate: 3.0,
                })
            } else {
                Ok(m * r)
            }
        })
        .unwrap();
        let values = grid.values();
        assert_eq!(values[[0, 1]], 101.0);
        assert_eq!(values[[1, 1]], 4.0);
        assert_eq!(grid.sentinel_count(), 1);
        assert!(matches!(grid.outcome(0, 1), Some(CellOutcome::Failed(_))));
    }

    #[test]
    fn test_values_above_ceiling_are_capped() {
        let grid = sweep_grid(&[50.0, 150.0], &[1.0], &sequential(), |m, _| Ok(m)).unwrap();
        assert_eq!(grid.outcome(0, 1), Some(&CellOutcome::OutOfRange(150.0)));
        assert_eq!(grid.values()[[0, 1]], grid.sentinel());
        assert_eq!(grid.values()[[0, 0]], 50.0);
    }

    #[test]
    fn test_non_finite_values_fail() {
        let grid = sweep_grid(&[1.0], &[1.0], &sequential(), |_, _| Ok(f64::NAN)).unwrap();
        assert!(matches!(grid.outcome(0, 0), Some(CellOutcome::Failed(_))));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let masses: Vec<f64> = (1..=8).map(|i| i as f64).collect();
        let radii: Vec<f64> = (1..=5).map(|i| i as f64 * 0.5).collect();
        let cell = |m: f64, r: f64| -> EscapeResult<f64> { Ok(m.powf(r)) };
        let seq = sweep_grid(&masses, &radii, &sequential(), cell).unwrap();
        let par = sweep_grid(&masses, &radii, &GridConfig::default(), cell).unwrap();
        assert_eq!(seq.outcomes(), par.outcomes());
    }

    #[test]
    fn test_empty_axes() {
        let grid = sweep_grid(&[], &[1.0], &sequential(), |m, _| Ok(m)).unwrap();
        assert_eq!(grid.shape(), (1, 0));
        assert_eq!(grid.sentinel_count(), 0);
    }

    #[test]
    fn test_invalid_ceiling_rejected() {
        let config = GridConfig {
            display_ceiling_amu: -1.0,
            parallel: false,
        };
        assert!(sweep_grid(&[1.0], &[1.0], &config, |m, _| Ok(m)).is_err());
    }
}
