/// Planetary equilibrium temperature from radiative balance (Southworth 2010)

use crate::error::{require_in_range, require_positive, EscapeError, EscapeResult};

/// Equilibrium temperature [K]
///
/// # Arguments
/// * `teff_k` - stellar effective temperature [K]
/// * `a_over_rstar` - scaled semi-major axis a/R*
/// * `heat_redistribution` - F: 0.25 averages heating over the planet, 0.5 heats the dayside only
/// * `bond_albedo` - Ab in [0, 1)
pub fn equilibrium_temperature(
    teff_k: f64,
    a_over_rstar: f64,
    heat_redistribution: f64,
    bond_albedo: f64,
) -> EscapeResult<f64> {
    require_positive("teff_k", teff_k)?;
    require_positive("a_over_rstar", a_over_rstar)?;
    require_in_range("heat_redistribution", heat_redistribution, 0.0, 1.0)?;
    if !(0.0..1.0).contains(&bond_albedo) {
        return Err(EscapeError::InvalidPhysicalState {
            quantity: "bond_albedo",
            value: bond_albedo,
            reason: "must lie in [0, 1)",
        });
    }

    Ok(teff_k
        * ((1.0 - bond_albedo) / (4.0 * heat_redistribution)).powf(0.25)
        * (1.0 / a_over_rstar).sqrt()
        * 0.5_f64.sqrt())
}
