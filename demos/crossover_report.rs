// Crossover report for a GJ 436 b-like planet
// Builds the planet from a catalog row plus a synthetic EUV spectrum, then prints
// the mass-loss rate, the crossover mass and a small mass/radius grid.

use atmo_escape_rust::config::EscapeConfig;
use atmo_escape_rust::constants::{JUPITER_MASS_G, JUPITER_RADIUS_CM};
use atmo_escape_rust::escape_model::EscapeModel;
use atmo_escape_rust::grid::CellOutcome;
use atmo_escape_rust::planet::CatalogEntry;
use atmo_escape_rust::spectrum::EuvSpectrum;
use colored::Colorize;

const CATALOG_ROW: &str = r#"{
    "EANAME": "GJ 436 b",
    "MASS": 0.0727, "UMASS": 0.0024,
    "R": 0.3767, "UR": 0.0082,
    "DIST": 10.14, "UDIST": 0.24,
    "A": 0.02887, "UA": 0.00029,
    "TEFF": 3416.0,
    "AR": 14.54,
    "MSTAR": 0.452, "UMSTAR": 0.013
}"#;

fn synthetic_spectrum() -> Result<EuvSpectrum, Box<dyn std::error::Error>> {
    // power law falling towards the Lyman limit, extending past it
    let wavelength: Vec<f64> = (1..=60).map(|i| i as f64 * 20.0).collect();
    let flux = wavelength.iter().map(|w| 2e-13 * (100.0 / w).powf(1.5)).collect();
    Ok(EuvSpectrum::new(wavelength, flux)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "🪐 Hydrodynamic escape report".bold());

    let entry: CatalogEntry = serde_json::from_str(CATALOG_ROW)?;
    let inputs = entry.into_inputs(Some(&synthetic_spectrum()?))?;
    let model = EscapeModel::new(EscapeConfig::default())?;
    let params = model.assemble(&inputs)?;

    println!("   planet:            {}", params.name());
    println!("   T_eq:              {:.1} K", params.temperature_k());
    println!("   EUV flux:          {:.3e} erg/cm²/s", params.euv_flux());
    println!("   gravity:           {:.1} cm/s²", params.gravity());
    println!("   scale heights:     {:.2}", params.scale_height_count());
    println!("   (Rx/Rp)²:          {:.4}", params.absorption_radius_ratio_sq());
    println!("   Roche factor K:    {:.4}", params.roche_factor());
    println!("   mass loss:         {:.3e} g/s", model.compute_massloss(&params)?);

    match model.solve_crossover_mass(&params) {
        Ok(solution) => println!(
            "   crossover mass:    {} ({} iterations)",
            format!("{:.3} amu", solution.mass_amu).green(),
            solution.diagnostics.iterations
        ),
        Err(err) => println!("   crossover mass:    {}", err.to_string().red()),
    }

    let masses: Vec<f64> = [0.03, 0.05, 0.0727, 0.1, 0.2]
        .iter()
        .map(|m| m * JUPITER_MASS_G)
        .collect();
    let radii: Vec<f64> = [0.25, 0.3, 0.3767, 0.45, 0.6]
        .iter()
        .map(|r| r * JUPITER_RADIUS_CM)
        .collect();
    let grid = model.sweep_crossover_grid(&masses, &radii, &inputs)?;

    println!();
    println!("{}", "   crossover mass [amu], rows R [Rjup], columns M [Mjup]".bold());
    print!("   {:>8}", "");
    for mass in grid.masses() {
        print!("{:>9.4}", mass / JUPITER_MASS_G);
    }
    println!();
    for (row, radius) in grid.radii().iter().enumerate() {
        print!("   {:>8.4}", radius / JUPITER_RADIUS_CM);
        for col in 0..grid.masses().len() {
            let cell = match grid.outcome(row, col) {
                Some(CellOutcome::Converged(value)) => format!("{value:>9.2}").green(),
                Some(CellOutcome::OutOfRange(_)) => format!("{:>9}", format!(">{}", grid.sentinel() - 1.0)).yellow(),
                Some(CellOutcome::Failed(_)) | None => format!("{:>9}", "--").red(),
            };
            print!("{cell}");
        }
        println!();
    }
    println!(
        "   {} of {} cells at the sentinel ({})",
        grid.sentinel_count(),
        masses.len() * radii.len(),
        grid.sentinel()
    );

    Ok(())
}
