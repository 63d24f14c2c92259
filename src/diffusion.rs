/// Hard-sphere binary diffusion between two atomic species

use crate::constants::BOLTZMANN_ERG_PER_K;
use crate::error::{require_positive, EscapeResult};
use std::f64::consts::PI;

/// Collision cross-section (π/16)(d1 + d2)² for hard-sphere diameters in cm.
pub fn collision_cross_section(d1_cm: f64, d2_cm: f64) -> EscapeResult<f64> {
    require_positive("d1_cm", d1_cm)?;
    require_positive("d2_cm", d2_cm)?;
    Ok((PI / 16.0) * (d1_cm + d2_cm).powi(2))
}

/// Binary diffusion coefficient b = n·D [1/cm/s] in the hard-sphere approximation
///
/// # Arguments
/// * `temperature_k` - gas temperature [K]
/// * `m1_g`, `m2_g` - species masses [g]
/// * `d1_cm`, `d2_cm` - collision diameters [cm]
///
/// Symmetric under swapping (m1, d1) with (m2, d2).
pub fn binary_diffusion_coefficient(
    temperature_k: f64,
    m1_g: f64,
    m2_g: f64,
    d1_cm: f64,
    d2_cm: f64,
) -> EscapeResult<f64> {
    require_positive("temperature_k", temperature_k)?;
    require_positive("m1_g", m1_g)?;
    require_positive("m2_g", m2_g)?;
    let q = collision_cross_section(d1_cm, d2_cm)?;
    let reduced = (m1_g + m2_g) / (m1_g * m2_g);
    Ok(3.0 / (64.0 * q) * (2.0 * PI * BOLTZMANN_ERG_PER_K * temperature_k * reduced).sqrt())
}
