/// Stellar EUV budget from a sampled spectrum
///
/// The spectrum arrives already extracted (wavelength in Å, flux density at
/// Earth in erg/cm²/s/Å). Only samples shortward of the hydrogen ionization
/// threshold count toward the EUV budget.

use crate::constants::HYDROGEN_IONIZATION_WAVELENGTH_A;
use crate::error::{require_positive, EscapeError, EscapeResult};
use crate::math_utils::trapezoid;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EuvSpectrum {
    pub wavelength_angstrom: Vec<f64>,
    /// Flux density observed at Earth [erg/cm²/s/Å]
    pub flux: Vec<f64>,
}

impl EuvSpectrum {
    pub fn new(wavelength_angstrom: Vec<f64>, flux: Vec<f64>) -> EscapeResult<Self> {
        if wavelength_angstrom.len() != flux.len() {
            return Err(EscapeError::InvalidSpectrum(format!(
                "{} wavelengths but {} flux samples",
                wavelength_angstrom.len(),
                flux.len()
            )));
        }
        if wavelength_angstrom.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(EscapeError::InvalidSpectrum(
                "wavelengths must increase monotonically".to_string(),
            ));
        }
        if flux.iter().any(|f| !f.is_finite()) {
            return Err(EscapeError::InvalidSpectrum("non-finite flux sample".to_string()));
        }
        Ok(Self {
            wavelength_angstrom,
            flux,
        })
    }

    /// Samples strictly shortward of 912 Å.
    pub fn euv_band(&self) -> EuvSpectrum {
        let (wavelength_angstrom, flux) = self
            .wavelength_angstrom
            .iter()
            .zip(&self.flux)
            .filter(|&(&w, _)| w < HYDROGEN_IONIZATION_WAVELENGTH_A)
            .map(|(&w, &f)| (w, f))
            .unzip();
        EuvSpectrum {
            wavelength_angstrom,
            flux,
        }
    }

    /// Band-integrated EUV flux at Earth [erg/cm²/s].
    pub fn integrated_flux(&self) -> EscapeResult<f64> {
        let band = self.euv_band();
        if band.wavelength_angstrom.len() < 2 {
            return Err(EscapeError::InvalidSpectrum(format!(
                "need at least 2 samples below {HYDROGEN_IONIZATION_WAVELENGTH_A} Å, got {}",
                band.wavelength_angstrom.len()
            )));
        }
        Ok(trapezoid(&band.flux, &band.wavelength_angstrom))
    }

    /// EUV flux at the planet [erg/cm²/s], rescaled from the observer distance
    /// to the orbital distance.
    pub fn flux_at_planet(&self, distance_cm: f64, semi_major_axis_cm: f64) -> EscapeResult<f64> {
        require_positive("distance_cm", distance_cm)?;
        require_positive("semi_major_axis_cm", semi_major_axis_cm)?;
        Ok(self.integrated_flux()? * (distance_cm / semi_major_axis_cm).powi(2))
    }

    /// Stellar EUV luminosity [erg/s].
    pub fn luminosity(&self, distance_cm: f64) -> EscapeResult<f64> {
        require_positive("distance_cm", distance_cm)?;
        Ok(4.0 * PI * distance_cm.powi(2) * self.integrated_flux()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{AU_CM, PARSEC_CM};
    use approx::assert_relative_eq;

    fn flat_spectrum() -> EuvSpectrum {
        // 1e-14 erg/cm²/s/Å from 100 to 1200 Å in 100 Å steps
        let wavelength: Vec<f64> = (1..=12).map(|i| i as f64 * 100.0).collect();
        let flux = vec![1e-14; wavelength.len()];
        EuvSpectrum::new(wavelength, flux).unwrap()
    }

    #[test]
    fn test_euv_band_cuts_at_912() {
        let band = flat_spectrum().euv_band();
        assert_eq!(band.wavelength_angstrom.len(), 9);
        assert_eq!(band.wavelength_angstrom.last(), Some(&900.0));
    }

    #[test]
    fn test_integrated_flux() {
        // flat 1e-14 over [100, 900] Å
        assert_relative_eq!(flat_spectrum().integrated_flux().unwrap(), 8e-12, max_relative = 1e-12);
    }

    #[test]
    fn test_planet_flux_and_luminosity_are_consistent() {
        let spectrum = flat_spectrum();
        let distance = 10.14 * PARSEC_CM;
        let a = 0.02887 * AU_CM;
        let at_planet = spectrum.flux_at_planet(distance, a).unwrap();
        let luminosity = spectrum.luminosity(distance).unwrap();
        assert_relative_eq!(at_planet, luminosity / (4.0 * PI * a * a), max_relative = 1e-12);
    }

    #[test]
    fn test_rejects_malformed_spectra() {
        assert!(EuvSpectrum::new(vec![100.0, 200.0], vec![1.0]).is_err());
        assert!(EuvSpectrum::new(vec![200.0, 100.0], vec![1.0, 1.0]).is_err());
        assert!(EuvSpectrum::new(vec![100.0, 200.0], vec![1.0, f64::NAN]).is_err());

        let optical = EuvSpectrum::new(vec![1000.0, 2000.0], vec![1.0, 1.0]).unwrap();
        assert!(matches!(optical.integrated_flux(), Err(EscapeError::InvalidSpectrum(_))));
        assert!(flat_spectrum().flux_at_planet(0.0, AU_CM).is_err());
    }
}
