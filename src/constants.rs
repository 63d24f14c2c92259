/// Physical constants and unit conversions, all CGS.

// Fundamental constants
pub const BOLTZMANN_ERG_PER_K: f64 = 1.38e-16; // g cm² s⁻² K⁻¹
pub const GRAVITATIONAL_CGS: f64 = 6.674e-8; // cm³ g⁻¹ s⁻²
pub const PLANCK_ERG_S: f64 = 6.626e-27;
pub const SPEED_OF_LIGHT_CM_S: f64 = 2.9979e10;
pub const PROTON_MASS_G: f64 = 1.67e-24;

/// Grams per atomic mass unit. The proton mass stands in for the amu throughout.
pub const AMU_G: f64 = PROTON_MASS_G;

// Reference bodies
pub const SOLAR_MASS_G: f64 = 1.989e33;
pub const SOLAR_RADIUS_CM: f64 = 6.957e10;
pub const JUPITER_MASS_G: f64 = 1.898e30;
pub const JUPITER_RADIUS_CM: f64 = 6.9911e9;
pub const EARTH_MASS_G: f64 = 5.97e27;
pub const EARTH_RADIUS_CM: f64 = 6.371e8;

// Distances
pub const AU_CM: f64 = 1.496e13;
pub const PARSEC_CM: f64 = 3.086e18;
pub const ANGSTROM_TO_CM: f64 = 1.0e-8;

/// Hydrogen photoionization threshold (vacuum), upper edge of the EUV band.
pub const HYDROGEN_IONIZATION_WAVELENGTH_A: f64 = 912.0;

// Absorption level defaults
pub const EUV_ABSORPTION_CROSS_SECTION_CM2: f64 = 5.0e-18; // HI, 13-20 eV
pub const REFERENCE_PRESSURE_BARYE: f64 = 10.0;
pub const MEAN_MOLECULAR_WEIGHT: f64 = 2.3;

// Escape defaults
pub const DEFAULT_HEATING_EFFICIENCY: f64 = 0.2;
pub const DEFAULT_LIGHT_MOLE_FRACTION: f64 = 0.9;
pub const DEFAULT_HEAT_REDISTRIBUTION: f64 = 0.25; // dayside + nightside average
pub const DEFAULT_BOND_ALBEDO: f64 = 0.0;

// Crossover search defaults, amu
pub const CROSSOVER_BRACKET_LOW_AMU: f64 = 1.0;
pub const CROSSOVER_BRACKET_HIGH_AMU: f64 = 1000.0;
pub const CROSSOVER_DISPLAY_CEILING_AMU: f64 = 100.0;
