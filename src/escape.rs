/// Energy-limited atmospheric escape
///
/// A fraction `eta` of the absorbed stellar EUV energy lifts gas out of the
/// planet's potential well. The Roche-lobe factor `K` lowers the effective
/// potential and `ruvrp2` enlarges the absorbing area above the optical radius.

use crate::constants::GRAVITATIONAL_CGS;
use crate::error::{require_in_range, require_non_negative, require_positive, EscapeResult};
use std::f64::consts::PI;

/// Areal mass flux [g/cm²/s] from the stellar EUV luminosity
///
/// # Arguments
/// * `euv_luminosity` - stellar EUV luminosity [erg/s]
/// * `semi_major_axis_cm` - orbital distance [cm]
/// * `planet_mass_g`, `planet_radius_cm` - planet mass [g] and radius [cm]
/// * `ruvrp2` - (R_uv / R_p)², absorption radius scaling
/// * `roche_factor` - K, Roche-lobe potential reduction
/// * `heating_efficiency` - eta, fraction of EUV energy driving escape
pub fn energy_limited_massflux(
    euv_luminosity: f64,
    semi_major_axis_cm: f64,
    planet_mass_g: f64,
    planet_radius_cm: f64,
    ruvrp2: f64,
    roche_factor: f64,
    heating_efficiency: f64,
) -> EscapeResult<f64> {
    require_non_negative("euv_luminosity", euv_luminosity)?;
    require_positive("semi_major_axis_cm", semi_major_axis_cm)?;
    let euv_flux = euv_luminosity / (4.0 * PI * semi_major_axis_cm.powi(2));
    energy_limited_massflux_from_flux(
        euv_flux,
        planet_mass_g,
        planet_radius_cm,
        ruvrp2,
        roche_factor,
        heating_efficiency,
    )
}

/// Areal mass flux [g/cm²/s] from the EUV flux already evaluated at the planet [erg/cm²/s].
pub fn energy_limited_massflux_from_flux(
    euv_flux: f64,
    planet_mass_g: f64,
    planet_radius_cm: f64,
    ruvrp2: f64,
    roche_factor: f64,
    heating_efficiency: f64,
) -> EscapeResult<f64> {
    require_non_negative("euv_flux", euv_flux)?;
    require_positive("planet_mass_g", planet_mass_g)?;
    require_positive("planet_radius_cm", planet_radius_cm)?;
    require_positive("ruvrp2", ruvrp2)?;
    require_positive("roche_factor", roche_factor)?;
    require_in_range("heating_efficiency", heating_efficiency, 0.0, 1.0)?;

    let heating_flux = heating_efficiency * euv_flux;
    let potential = roche_factor * GRAVITATIONAL_CGS * planet_mass_g / planet_radius_cm;
    // πR² absorbs, 4πR² loses
    Ok(0.25 * heating_flux * ruvrp2 / potential)
}

/// Converts an areal mass flux [g/cm²/s] to a planet-wide loss rate [g/s].
pub fn total_massloss_rate(mass_flux: f64, planet_radius_cm: f64) -> EscapeResult<f64> {
    require_non_negative("mass_flux", mass_flux)?;
    require_positive("planet_radius_cm", planet_radius_cm)?;
    Ok(mass_flux * 4.0 * PI * planet_radius_cm.powi(2))
}
