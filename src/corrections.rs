/// Geometric corrections to energy-limited escape
///
/// - surface gravity and pressure scale height of the lower atmosphere
/// - the EUV absorption radius, a number of scale heights above the optical
///   radius where the absorber column reaches unit optical depth
/// - the Roche-lobe potential reduction K (Erkaev et al. 2007)

use crate::constants::{BOLTZMANN_ERG_PER_K, GRAVITATIONAL_CGS, PROTON_MASS_G};
use crate::error::{require_positive, EscapeError, EscapeResult};

/// Surface gravity G·M/R² [cm/s²].
pub fn surface_gravity(planet_mass_g: f64, planet_radius_cm: f64) -> EscapeResult<f64> {
    require_positive("planet_mass_g", planet_mass_g)?;
    require_positive("planet_radius_cm", planet_radius_cm)?;
    Ok(GRAVITATIONAL_CGS * planet_mass_g / planet_radius_cm.powi(2))
}

/// Pressure scale height kb·T / (μ·mp·g) [cm].
pub fn scale_height(
    temperature_k: f64,
    gravity: f64,
    mean_molecular_weight: f64,
) -> EscapeResult<f64> {
    require_positive("temperature_k", temperature_k)?;
    require_positive("gravity", gravity)?;
    require_positive("mean_molecular_weight", mean_molecular_weight)?;
    Ok(BOLTZMANN_ERG_PER_K * temperature_k / (mean_molecular_weight * PROTON_MASS_G * gravity))
}

/// Number of scale heights between the reference pressure and the EUV absorption level.
///
/// The absorption level sits at P = mp·g/σ, where one absorber column gives
/// unit optical depth; the count is ln(P_ref / P). A level below the reference
/// pressure (negative count) is not a valid state.
pub fn scale_height_count(
    gravity: f64,
    absorption_cross_section_cm2: f64,
    reference_pressure_barye: f64,
) -> EscapeResult<f64> {
    require_positive("gravity", gravity)?;
    require_positive("absorption_cross_section_cm2", absorption_cross_section_cm2)?;
    require_positive("reference_pressure_barye", reference_pressure_barye)?;

    let absorption_pressure = PROTON_MASS_G * gravity / absorption_cross_section_cm2;
    let count = -(absorption_pressure / reference_pressure_barye).ln();
    if count < 0.0 {
        return Err(EscapeError::InvalidPhysicalState {
            quantity: "scale_height_count",
            value: count,
            reason: "EUV absorption level lies below the reference pressure",
        });
    }
    Ok(count)
}

/// (R_uv / R_p)² with R_uv = R_p + n·H. Never below 1.
pub fn absorption_radius_ratio_sq(
    scale_height_cm: f64,
    scale_height_count: f64,
    planet_radius_cm: f64,
) -> EscapeResult<f64> {
    require_positive("scale_height_cm", scale_height_cm)?;
    require_positive("planet_radius_cm", planet_radius_cm)?;
    if !(scale_height_count >= 0.0) {
        return Err(EscapeError::InvalidPhysicalState {
            quantity: "scale_height_count",
            value: scale_height_count,
            reason: "must be non-negative",
        });
    }
    Ok(((scale_height_cm * scale_height_count + planet_radius_cm) / planet_radius_cm).powi(2))
}

/// Roche-lobe factor K = 1 - 3/(2η) + 1/(2η³), η = (a/R)·(M/(3M*))^(1/3)
///
/// K lies in [0, 1); it vanishes when the planet fills its Roche lobe (η = 1).
pub fn roche_lobe_factor(
    planet_mass_g: f64,
    stellar_mass_g: f64,
    semi_major_axis_cm: f64,
    planet_radius_cm: f64,
) -> EscapeResult<f64> {
    require_positive("planet_mass_g", planet_mass_g)?;
    require_positive("stellar_mass_g", stellar_mass_g)?;
    require_positive("semi_major_axis_cm", semi_major_axis_cm)?;
    require_positive("planet_radius_cm", planet_radius_cm)?;

    let delta = planet_mass_g / stellar_mass_g;
    let lambda = semi_major_axis_cm / planet_radius_cm;
    let eta = lambda * (delta / 3.0).cbrt();
    if !(eta > 0.0 && eta.is_finite()) {
        return Err(EscapeError::InvalidPhysicalState {
            quantity: "roche_eta",
            value: eta,
            reason: "Roche parameter must be positive",
        });
    }
    Ok(1.0 - 1.5 / eta + 0.5 / eta.powi(3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{
        AU_CM, EARTH_MASS_G, EARTH_RADIUS_CM, JUPITER_MASS_G, JUPITER_RADIUS_CM, SOLAR_MASS_G,
    };
    use approx::assert_relative_eq;
    use more_asserts::{assert_ge, assert_lt};

    const M: f64 = 0.0727 * JUPITER_MASS_G;
    const R: f64 = 0.3767 * JUPITER_RADIUS_CM;

    #[test]
    fn test_reference_corrections() {
        let g = surface_gravity(M, R).unwrap();
        assert_relative_eq!(g, 1327.8057723150173, max_relative = 1e-12);

        let n = scale_height_count(g, 5e-18, 10.0).unwrap();
        assert_relative_eq!(n, 10.023426873410683, max_relative = 1e-12);

        let h = scale_height(600.0, g, 2.3).unwrap();
        assert_relative_eq!(h, 16234969.509102734, max_relative = 1e-12);

        let ruvrp2 = absorption_radius_ratio_sq(h, n, R).unwrap();
        assert_relative_eq!(ruvrp2, 1.1274005341877762, max_relative = 1e-12);

        let k = roche_lobe_factor(M, 0.452 * SOLAR_MASS_G, 0.02887 * AU_CM, R).unwrap();
        assert_relative_eq!(k, 0.7558339511573374, max_relative = 1e-12);
    }

    #[test]
    fn test_roche_factor_limits() {
        // distant planet: K -> 1
        let far = roche_lobe_factor(EARTH_MASS_G, SOLAR_MASS_G, AU_CM, EARTH_RADIUS_CM).unwrap();
        assert_lt!(far, 1.0);
        assert_relative_eq!(far, 1.0, max_relative = 1e-2);

        // Roche-lobe filling (eta = 1): K = 0
        let stellar = M * (0.01 * AU_CM / R).powi(3) / 3.0;
        let filling = roche_lobe_factor(M, stellar, 0.01 * AU_CM, R).unwrap();
        assert!(filling.abs() < 1e-9, "K = {filling}");
    }

    #[test]
    fn test_absorption_ratio_at_least_one() {
        assert_eq!(absorption_radius_ratio_sq(1e7, 0.0, R).unwrap(), 1.0);
        assert_ge!(absorption_radius_ratio_sq(1e7, 3.0, R).unwrap(), 1.0);
        assert!(absorption_radius_ratio_sq(1e7, -1.0, R).is_err());
    }

    #[test]
    fn test_high_gravity_absorption_level_is_invalid() {
        // mp·g/σ > P_ref for g above ~3e7 cm/s²
        assert!(matches!(
            scale_height_count(1e9, 5e-18, 10.0),
            Err(EscapeError::InvalidPhysicalState { quantity: "scale_height_count", .. })
        ));
    }

    #[test]
    fn test_rejects_non_physical_inputs() {
        assert!(surface_gravity(0.0, R).is_err());
        assert!(surface_gravity(M, -R).is_err());
        assert!(scale_height(0.0, 1000.0, 2.3).is_err());
        assert!(roche_lobe_factor(M, 0.0, AU_CM, R).is_err());
        assert!(roche_lobe_factor(M, SOLAR_MASS_G, AU_CM, 0.0).is_err());
    }
}
