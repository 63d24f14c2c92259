/// Planet parameters for the escape model
///
/// `PlanetInputs` carries raw CGS quantities handed over by a catalog or
/// spectrum reader. `PlanetParameters::assemble` validates them once, fills in
/// the derived quantities (temperature, gravity, scale height, absorption
/// radius, Roche factor, mass flux) and yields a value that is never mutated
/// afterwards. `CatalogEntry` converts an exoplanet catalog row from catalog
/// units into `PlanetInputs`.

use crate::config::EscapeConfig;
use crate::constants::{AU_CM, JUPITER_MASS_G, JUPITER_RADIUS_CM, PARSEC_CM, SOLAR_MASS_G};
use crate::corrections::{
    absorption_radius_ratio_sq, roche_lobe_factor, scale_height, scale_height_count,
    surface_gravity,
};
use crate::error::{require_in_range, require_positive, EscapeError, EscapeResult};
use crate::escape::{energy_limited_massflux, total_massloss_rate};
use crate::spectrum::EuvSpectrum;
use crate::temperature::equilibrium_temperature;
use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Raw planet, orbit and star quantities in CGS units.
///
/// The optional escape fields override the `EscapeConfig` defaults for this planet only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanetInputs {
    pub name: String,
    pub mass_g: f64,
    pub radius_cm: f64,
    pub semi_major_axis_cm: f64,
    pub stellar_mass_g: f64,
    #[serde(default)]
    pub distance_cm: Option<f64>,
    #[serde(default)]
    pub teff_k: Option<f64>,
    /// a/R*, needed for the equilibrium temperature
    #[serde(default)]
    pub a_over_rstar: Option<f64>,
    /// Fixed operating temperature; skips the equilibrium estimate
    #[serde(default)]
    pub temperature_k: Option<f64>,
    /// EUV flux at the planet [erg/cm²/s]
    #[serde(default)]
    pub euv_flux: Option<f64>,
    /// Stellar EUV luminosity [erg/s]
    #[serde(default)]
    pub euv_luminosity: Option<f64>,
    #[serde(default)]
    pub light_species_mass_g: Option<f64>,
    #[serde(default)]
    pub light_species_mole_fraction: Option<f64>,
    #[serde(default)]
    pub heating_efficiency: Option<f64>,
}

impl PlanetInputs {
    /// Fills the EUV flux and luminosity by integrating `spectrum`; needs `distance_cm`.
    pub fn with_spectrum(mut self, spectrum: &EuvSpectrum) -> EscapeResult<Self> {
        let distance_cm = self.distance_cm.ok_or(EscapeError::InvalidPhysicalState {
            quantity: "distance_cm",
            value: f64::NAN,
            reason: "stellar distance is required to scale a spectrum",
        })?;
        self.euv_flux = Some(spectrum.flux_at_planet(distance_cm, self.semi_major_axis_cm)?);
        self.euv_luminosity = Some(spectrum.luminosity(distance_cm)?);
        Ok(self)
    }

    /// Same planet with a different mass and radius, as used by grid sweeps.
    pub fn with_mass_and_radius(&self, mass_g: f64, radius_cm: f64) -> Self {
        Self {
            mass_g,
            radius_cm,
            ..self.clone()
        }
    }
}

/// Validated, fully derived planet state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetParameters {
    name: String,
    mass_g: f64,
    radius_cm: f64,
    semi_major_axis_cm: f64,
    stellar_mass_g: f64,
    distance_cm: Option<f64>,
    teff_k: Option<f64>,
    a_over_rstar: Option<f64>,
    temperature_k: f64,
    temperature_overridden: bool,
    light_species_mass_g: f64,
    light_species_mole_fraction: f64,
    heating_efficiency: f64,
    euv_flux: f64,
    euv_luminosity: f64,
    gravity: f64,
    scale_height_cm: f64,
    scale_height_count: f64,
    absorption_radius_ratio_sq: f64,
    roche_factor: f64,
    mass_flux: f64,
    massloss_rate: f64,
}

impl PlanetParameters {
    pub fn assemble(inputs: &PlanetInputs, config: &EscapeConfig) -> EscapeResult<Self> {
        let mass_g = require_positive("mass_g", inputs.mass_g)?;
        let radius_cm = require_positive("radius_cm", inputs.radius_cm)?;
        let semi_major_axis_cm = require_positive("semi_major_axis_cm", inputs.semi_major_axis_cm)?;
        let stellar_mass_g = require_positive("stellar_mass_g", inputs.stellar_mass_g)?;
        if let Some(distance) = inputs.distance_cm {
            require_positive("distance_cm", distance)?;
        }
        if let Some(teff) = inputs.teff_k {
            require_positive("teff_k", teff)?;
        }
        if let Some(ratio) = inputs.a_over_rstar {
            require_positive("a_over_rstar", ratio)?;
        }

        let light_species_mass_g = require_positive(
            "light_species_mass_g",
            inputs.light_species_mass_g.unwrap_or(config.light_species_mass_g),
        )?;
        let light_species_mole_fraction = require_in_range(
            "light_species_mole_fraction",
            inputs
                .light_species_mole_fraction
                .unwrap_or(config.light_species_mole_fraction),
            0.0,
            1.0,
        )?;
        let heating_efficiency = require_in_range(
            "heating_efficiency",
            inputs.heating_efficiency.unwrap_or(config.heating_efficiency),
            0.0,
            1.0,
        )?;

        // an explicit temperature replaces the equilibrium estimate entirely
        let temperature_k = match inputs.temperature_k {
            Some(t) => require_positive("temperature_k", t)?,
            None => equilibrium_temperature(
                inputs.teff_k.ok_or_else(|| missing("teff_k"))?,
                inputs.a_over_rstar.ok_or_else(|| missing("a_over_rstar"))?,
                config.heat_redistribution,
                config.bond_albedo,
            )?,
        };

        let (euv_flux, euv_luminosity) =
            resolve_euv(inputs.euv_flux, inputs.euv_luminosity, semi_major_axis_cm)?;

        let gravity = surface_gravity(mass_g, radius_cm)?;
        let scale_height_cm = scale_height(temperature_k, gravity, config.mean_molecular_weight)?;
        let scale_height_count = scale_height_count(
            gravity,
            config.absorption_cross_section_cm2,
            config.reference_pressure_barye,
        )?;
        let absorption_radius_ratio_sq =
            absorption_radius_ratio_sq(scale_height_cm, scale_height_count, radius_cm)?;
        let roche_factor =
            roche_lobe_factor(mass_g, stellar_mass_g, semi_major_axis_cm, radius_cm)?;

        let mass_flux = energy_limited_massflux(
            euv_luminosity,
            semi_major_axis_cm,
            mass_g,
            radius_cm,
            absorption_radius_ratio_sq,
            roche_factor,
            heating_efficiency,
        )?;
        let massloss_rate = total_massloss_rate(mass_flux, radius_cm)?;

        debug!(
            "assembled {}: T={:.1}K g={:.3e} H={:.3e}cm ruvrp2={:.4} K={:.4} Mdot={:.3e}g/cm2/s",
            inputs.name,
            temperature_k,
            gravity,
            scale_height_cm,
            absorption_radius_ratio_sq,
            roche_factor,
            mass_flux
        );

        Ok(Self {
            name: inputs.name.clone(),
            mass_g,
            radius_cm,
            semi_major_axis_cm,
            stellar_mass_g,
            distance_cm: inputs.distance_cm,
            teff_k: inputs.teff_k,
            a_over_rstar: inputs.a_over_rstar,
            temperature_k,
            temperature_overridden: inputs.temperature_k.is_some(),
            light_species_mass_g,
            light_species_mole_fraction,
            heating_efficiency,
            euv_flux,
            euv_luminosity,
            gravity,
            scale_height_cm,
            scale_height_count,
            absorption_radius_ratio_sq,
            roche_factor,
            mass_flux,
            massloss_rate,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass_g(&self) -> f64 {
        self.mass_g
    }

    pub fn radius_cm(&self) -> f64 {
        self.radius_cm
    }

    pub fn semi_major_axis_cm(&self) -> f64 {
        self.semi_major_axis_cm
    }

    pub fn stellar_mass_g(&self) -> f64 {
        self.stellar_mass_g
    }

    pub fn distance_cm(&self) -> Option<f64> {
        self.distance_cm
    }

    pub fn teff_k(&self) -> Option<f64> {
        self.teff_k
    }

    pub fn a_over_rstar(&self) -> Option<f64> {
        self.a_over_rstar
    }

    /// Operating temperature: the override if one was given, else the equilibrium value.
    pub fn temperature_k(&self) -> f64 {
        self.temperature_k
    }

    pub fn temperature_overridden(&self) -> bool {
        self.temperature_overridden
    }

    /// m1 [g]
    pub fn light_species_mass_g(&self) -> f64 {
        self.light_species_mass_g
    }

    /// x1
    pub fn light_species_mole_fraction(&self) -> f64 {
        self.light_species_mole_fraction
    }

    pub fn heating_efficiency(&self) -> f64 {
        self.heating_efficiency
    }

    /// EUV flux at the planet [erg/cm²/s]
    pub fn euv_flux(&self) -> f64 {
        self.euv_flux
    }

    /// [erg/s]
    pub fn euv_luminosity(&self) -> f64 {
        self.euv_luminosity
    }

    /// [cm/s²]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn scale_height_cm(&self) -> f64 {
        self.scale_height_cm
    }

    pub fn scale_height_count(&self) -> f64 {
        self.scale_height_count
    }

    /// ruvrp2 = (R_uv / R_p)²
    pub fn absorption_radius_ratio_sq(&self) -> f64 {
        self.absorption_radius_ratio_sq
    }

    /// K
    pub fn roche_factor(&self) -> f64 {
        self.roche_factor
    }

    /// Mdot [g/cm²/s]
    pub fn mass_flux(&self) -> f64 {
        self.mass_flux
    }

    /// [g/s]
    pub fn massloss_rate(&self) -> f64 {
        self.massloss_rate
    }
}

pub(crate) fn missing(quantity: &'static str) -> EscapeError {
    EscapeError::InvalidPhysicalState {
        quantity,
        value: f64::NAN,
        reason: "needed for the equilibrium temperature",
    }
}

/// Completes (flux, luminosity) from whichever was supplied. A supplied
/// luminosity is authoritative; the flux follows from the orbital distance.
fn resolve_euv(
    euv_flux: Option<f64>,
    euv_luminosity: Option<f64>,
    semi_major_axis_cm: f64,
) -> EscapeResult<(f64, f64)> {
    let sphere = 4.0 * PI * semi_major_axis_cm.powi(2);
    let (flux, luminosity) = match (euv_flux, euv_luminosity) {
        (Some(flux), Some(luminosity)) => (flux, luminosity),
        (Some(flux), None) => (flux, flux * sphere),
        (None, Some(luminosity)) => (luminosity / sphere, luminosity),
        (None, None) => {
            return Err(EscapeError::InvalidPhysicalState {
                quantity: "euv_flux",
                value: f64::NAN,
                reason: "neither EUV flux nor EUV luminosity supplied",
            });
        }
    };
    if !(flux >= 0.0 && flux.is_finite()) {
        return Err(EscapeError::InvalidPhysicalState {
            quantity: "euv_flux",
            value: flux,
            reason: "must be non-negative",
        });
    }
    if !(luminosity >= 0.0 && luminosity.is_finite()) {
        return Err(EscapeError::InvalidPhysicalState {
            quantity: "euv_luminosity",
            value: luminosity,
            reason: "must be non-negative",
        });
    }
    Ok((flux, luminosity))
}

/// One row of an exoplanet catalog in catalog units
///
/// MASS and R in Jupiter units, DIST in parsec, A in AU, MSTAR in solar masses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "EANAME")]
    pub name: String,
    #[serde(rename = "MASS")]
    pub mass_mjup: f64,
    #[serde(rename = "UMASS", default)]
    pub mass_uncertainty_mjup: Option<f64>,
    #[serde(rename = "R")]
    pub radius_rjup: f64,
    #[serde(rename = "UR", default)]
    pub radius_uncertainty_rjup: Option<f64>,
    #[serde(rename = "DIST")]
    pub distance_pc: f64,
    #[serde(rename = "UDIST", default)]
    pub distance_uncertainty_pc: Option<f64>,
    #[serde(rename = "A")]
    pub semi_major_axis_au: f64,
    #[serde(rename = "UA", default)]
    pub semi_major_axis_uncertainty_au: Option<f64>,
    #[serde(rename = "TEFF")]
    pub teff_k: f64,
    #[serde(rename = "AR")]
    pub a_over_rstar: f64,
    #[serde(rename = "MSTAR")]
    pub stellar_mass_msun: f64,
    #[serde(rename = "UMSTAR", default)]
    pub stellar_mass_uncertainty_msun: Option<f64>,
}

/// Catalog uncertainties converted to CGS.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CatalogUncertainties {
    pub mass_g: Option<f64>,
    pub radius_cm: Option<f64>,
    pub distance_cm: Option<f64>,
    pub semi_major_axis_cm: Option<f64>,
    pub stellar_mass_g: Option<f64>,
}

impl CatalogEntry {
    /// Converts to CGS inputs; with a spectrum the EUV budget is filled in too.
    pub fn into_inputs(self, spectrum: Option<&EuvSpectrum>) -> EscapeResult<PlanetInputs> {
        let inputs = PlanetInputs {
            name: self.name,
            mass_g: self.mass_mjup * JUPITER_MASS_G,
            radius_cm: self.radius_rjup * JUPITER_RADIUS_CM,
            semi_major_axis_cm: self.semi_major_axis_au * AU_CM,
            stellar_mass_g: self.stellar_mass_msun * SOLAR_MASS_G,
            distance_cm: Some(self.distance_pc * PARSEC_CM),
            teff_k: Some(self.teff_k),
            a_over_rstar: Some(self.a_over_rstar),
            ..PlanetInputs::default()
        };
        match spectrum {
            Some(spectrum) => inputs.with_spectrum(spectrum),
            None => Ok(inputs),
        }
    }

    pub fn uncertainties(&self) -> CatalogUncertainties {
        CatalogUncertainties {
            mass_g: self.mass_uncertainty_mjup.map(|u| u * JUPITER_MASS_G),
            radius_cm: self.radius_uncertainty_rjup.map(|u| u * JUPITER_RADIUS_CM),
            distance_cm: self.distance_uncertainty_pc.map(|u| u * PARSEC_CM),
            semi_major_axis_cm: self.semi_major_axis_uncertainty_au.map(|u| u * AU_CM),
            stellar_mass_g: self.stellar_mass_uncertainty_msun.map(|u| u * SOLAR_MASS_G),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PROTON_MASS_G;
    use approx::assert_relative_eq;

    fn gj436b_inputs() -> PlanetInputs {
        PlanetInputs {
            name: "GJ 436 b".to_string(),
            mass_g: 0.0727 * JUPITER_MASS_G,
            radius_cm: 0.3767 * JUPITER_RADIUS_CM,
            semi_major_axis_cm: 0.02887 * AU_CM,
            stellar_mass_g: 0.452 * SOLAR_MASS_G,
            temperature_k: Some(600.0),
            euv_flux: Some(1000.0),
            ..PlanetInputs::default()
        }
    }

    #[test]
    fn test_assemble_reference_planet() {
        let params = PlanetParameters::assemble(&gj436b_inputs(), &EscapeConfig::default()).unwrap();
        assert_eq!(params.name(), "GJ 436 b");
        assert_eq!(params.temperature_k(), 600.0);
        assert!(params.temperature_overridden());
        assert_eq!(params.light_species_mass_g(), PROTON_MASS_G);
        assert_eq!(params.light_species_mole_fraction(), 0.9);
        assert_relative_eq!(params.gravity(), 1327.8057723150173, max_relative = 1e-12);
        assert_relative_eq!(params.absorption_radius_ratio_sq(), 1.1274005341877762, max_relative = 1e-12);
        assert_relative_eq!(params.roche_factor(), 0.7558339511573374, max_relative = 1e-12);
        assert_relative_eq!(params.mass_flux(), 2.1327804826524905e-11, max_relative = 1e-9);
        assert_relative_eq!(params.massloss_rate(), 1858824083.8950822, max_relative = 1e-9);
        assert_relative_eq!(
            params.euv_luminosity(),
            1000.0 * 4.0 * PI * (0.02887 * AU_CM).powi(2),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_equilibrium_temperature_used_without_override() {
        let inputs = PlanetInputs {
            temperature_k: None,
            teff_k: Some(5000.0),
            a_over_rstar: Some(100.0),
            ..gj436b_inputs()
        };
        let params = PlanetParameters::assemble(&inputs, &EscapeConfig::default()).unwrap();
        assert!(!params.temperature_overridden());
        assert_relative_eq!(params.temperature_k(), 353.5533905932738, max_relative = 1e-12);
    }

    #[test]
    fn test_missing_stellar_inputs_without_override() {
        let inputs = PlanetInputs {
            temperature_k: None,
            ..gj436b_inputs()
        };
        assert!(matches!(
            PlanetParameters::assemble(&inputs, &EscapeConfig::default()),
            Err(EscapeError::InvalidPhysicalState { quantity: "teff_k", .. })
        ));
    }

    #[test]
    fn test_stellar_inputs_kept_with_override() {
        let inputs = PlanetInputs {
            teff_k: Some(3416.0),
            a_over_rstar: Some(14.54),
            ..gj436b_inputs()
        };
        let params = PlanetParameters::assemble(&inputs, &EscapeConfig::default()).unwrap();
        assert!(params.temperature_overridden());
        assert_eq!(params.teff_k(), Some(3416.0));
        assert_eq!(params.a_over_rstar(), Some(14.54));

        let bare = PlanetParameters::assemble(&gj436b_inputs(), &EscapeConfig::default()).unwrap();
        assert_eq!(bare.teff_k(), None);
        assert_eq!(bare.a_over_rstar(), None);
    }

    #[test]
    fn test_invalid_inputs_fail_fast() {
        let config = EscapeConfig::default();
        let cases = [
            PlanetInputs { mass_g: 0.0, ..gj436b_inputs() },
            PlanetInputs { radius_cm: -1.0, ..gj436b_inputs() },
            PlanetInputs { temperature_k: Some(0.0), ..gj436b_inputs() },
            PlanetInputs { light_species_mass_g: Some(-PROTON_MASS_G), ..gj436b_inputs() },
            PlanetInputs { light_species_mole_fraction: Some(0.0), ..gj436b_inputs() },
            PlanetInputs { light_species_mole_fraction: Some(1.2), ..gj436b_inputs() },
            PlanetInputs { euv_flux: Some(-1.0), ..gj436b_inputs() },
            PlanetInputs { euv_flux: None, ..gj436b_inputs() },
            PlanetInputs { teff_k: Some(-3416.0), ..gj436b_inputs() },
            PlanetInputs { a_over_rstar: Some(0.0), ..gj436b_inputs() },
        ];
        for inputs in cases {
            let result = PlanetParameters::assemble(&inputs, &config);
            assert!(
                matches!(result, Err(EscapeError::InvalidPhysicalState { .. })),
                "{inputs:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_luminosity_input_resolves_flux() {
        let a = 0.02887 * AU_CM;
        let inputs = PlanetInputs {
            euv_flux: None,
            euv_luminosity: Some(1000.0 * 4.0 * PI * a * a),
            ..gj436b_inputs()
        };
        let params = PlanetParameters::assemble(&inputs, &EscapeConfig::default()).unwrap();
        assert_relative_eq!(params.euv_flux(), 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_catalog_entry_conversion() {
        let json = r#"{
            "EANAME": "GJ 436 b",
            "MASS": 0.0727, "UMASS": 0.0024,
            "R": 0.3767, "UR": 0.0082,
            "DIST": 10.14,
            "A": 0.02887,
            "TEFF": 3416.0,
            "AR": 14.54,
            "MSTAR": 0.452
        }"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        let uncertainties = entry.uncertainties();
        assert_relative_eq!(uncertainties.mass_g.unwrap(), 0.0024 * JUPITER_MASS_G);
        assert_eq!(uncertainties.distance_cm, None);

        let spectrum = EuvSpectrum::new(vec![100.0, 500.0, 900.0], vec![1e-14, 1e-14, 1e-14]).unwrap();
        let inputs = entry.into_inputs(Some(&spectrum)).unwrap();
        assert_relative_eq!(inputs.mass_g, 0.0727 * JUPITER_MASS_G);
        assert_relative_eq!(inputs.distance_cm.unwrap(), 10.14 * PARSEC_CM);
        let scale = (10.14 * PARSEC_CM / (0.02887 * AU_CM)).powi(2);
        assert_relative_eq!(inputs.euv_flux.unwrap(), 8e-12 * scale, max_relative = 1e-12);

        let params = PlanetParameters::assemble(&inputs, &EscapeConfig::default()).unwrap();
        assert!(!params.temperature_overridden());
        assert!(params.temperature_k() > 400.0 && params.temperature_k() < 700.0);
    }
}
