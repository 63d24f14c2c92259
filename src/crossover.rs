/// Crossover mass of a heavier species dragged along by an escaping light one (Hunten 1987)
///
/// The driving quantity is the areal mass flux `Mdot` [g/cm²/s] of the light
/// species, as produced by `escape::energy_limited_massflux`. With the number
/// flux `Mdot / m1` and surface gravity `G·M/R²` the Hunten relation reads
///
/// m2 = m1 + kb·T·Mdot·R² / (b1·G·M·x1·m1)
///
/// and comes out in grams.

use crate::constants::{BOLTZMANN_ERG_PER_K, GRAVITATIONAL_CGS};
use crate::error::{require_non_negative, require_positive, EscapeResult};

/// # Arguments
/// * `temperature_k` - atmospheric temperature [K]
/// * `mass_flux` - escaping mass flux of constituent 1 [g/cm²/s]
/// * `planet_mass_g`, `planet_radius_cm` - planet mass [g] and radius [cm]
/// * `x1` - mole fraction of constituent 1
/// * `m1_g` - mass of constituent 1 [g]
/// * `b1` - binary diffusion coefficient [1/cm/s]
pub fn crossover_mass(
    temperature_k: f64,
    mass_flux: f64,
    planet_mass_g: f64,
    planet_radius_cm: f64,
    x1: f64,
    m1_g: f64,
    b1: f64,
) -> EscapeResult<f64> {
    require_positive("temperature_k", temperature_k)?;
    require_non_negative("mass_flux", mass_flux)?;
    require_positive("planet_mass_g", planet_mass_g)?;
    require_positive("planet_radius_cm", planet_radius_cm)?;
    require_positive("x1", x1)?;
    require_positive("m1_g", m1_g)?;
    require_positive("b1", b1)?;

    let drag = BOLTZMANN_ERG_PER_K * temperature_k * mass_flux * planet_radius_cm.powi(2);
    let hold = b1 * GRAVITATIONAL_CGS * planet_mass_g * x1 * m1_g;
    Ok(m1_g + drag / hold)
}
