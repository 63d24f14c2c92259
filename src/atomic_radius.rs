/// Van der Waals radii by atomic mass
///
/// The table maps atomic mass [amu] to van der Waals radius [Å] and answers
/// lookups through a `LinearInterpolator`, so masses between tabulated
/// elements blend linearly and masses beyond the table extrapolate. The
/// built-in table holds Bondi radii and is parsed once from embedded JSON;
/// callers that need other data build their own table and pass it by reference.

use crate::constants::ANGSTROM_TO_CM;
use crate::error::{EscapeError, EscapeResult};
use crate::interpolator::LinearInterpolator;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicRadiusSample {
    #[serde(default)]
    pub element: Option<String>,
    pub mass_amu: f64,
    pub radius_angstrom: f64,
}

/// On-disk layout of a radius table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AtomicRadiusDocument {
    #[serde(default)]
    source: Option<String>,
    samples: Vec<AtomicRadiusSample>,
}

#[derive(Debug, Clone)]
pub struct AtomicRadiusTable {
    samples: Vec<AtomicRadiusSample>,
    source: Option<String>,
    interpolator: LinearInterpolator,
}

static BONDI_TABLE: Lazy<AtomicRadiusTable> = Lazy::new(|| {
    let json_str = include_str!("atomic_radii.json");
    AtomicRadiusTable::from_json_str(json_str).expect("Failed to parse atomic_radii.json")
});

impl AtomicRadiusTable {
    pub fn new(samples: Vec<AtomicRadiusSample>) -> EscapeResult<Self> {
        if let Some(bad) = samples
            .iter()
            .find(|s| !(s.mass_amu > 0.0) || !(s.radius_angstrom > 0.0))
        {
            return Err(EscapeError::InvalidTable(format!(
                "mass and radius must be positive, got ({}, {})",
                bad.mass_amu, bad.radius_angstrom
            )));
        }
        let pairs: Vec<(f64, f64)> = samples
            .iter()
            .map(|s| (s.mass_amu, s.radius_angstrom))
            .collect();
        let interpolator = LinearInterpolator::new(&pairs)?;
        Ok(Self {
            samples,
            source: None,
            interpolator,
        })
    }

    /// Builds a table from bare (mass [amu], radius [Å]) pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> EscapeResult<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(mass_amu, radius_angstrom)| AtomicRadiusSample {
                    element: None,
                    mass_amu,
                    radius_angstrom,
                })
                .collect(),
        )
    }

    pub fn from_json_str(json_str: &str) -> EscapeResult<Self> {
        let document: AtomicRadiusDocument = serde_json::from_str(json_str)?;
        let mut table = Self::new(document.samples)?;
        table.source = document.source;
        Ok(table)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> EscapeResult<Self> {
        let json_str = fs::read_to_string(path)?;
        Self::from_json_str(&json_str)
    }

    /// Bondi (1964) radii for the elements up to uranium, with the uranium
    /// radius held out to 1000 amu.
    pub fn bondi() -> &'static AtomicRadiusTable {
        &BONDI_TABLE
    }

    /// Van der Waals radius [Å] for an atomic mass [amu]. Extrapolates
    /// outside the tabulated masses rather than failing.
    pub fn radius_angstrom(&self, mass_amu: f64) -> f64 {
        self.interpolator.evaluate(mass_amu)
    }

    /// Hard-sphere collision diameter [cm]: twice the van der Waals radius.
    pub fn kinetic_diameter_cm(&self, mass_amu: f64) -> f64 {
        2.0 * self.radius_angstrom(mass_amu) * ANGSTROM_TO_CM
    }

    pub fn samples(&self) -> &[AtomicRadiusSample] {
        &self.samples
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn mass_domain_amu(&self) -> (f64, f64) {
        self.interpolator.domain()
    }
}
