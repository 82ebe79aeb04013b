use super::assemble_forcefield;
use crate::cli::TableArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use pairpot::core::units::{ANGSTROM, KCALMOL};
use pairpot::engine::config::TableConfigBuilder;
use pairpot::engine::error::EngineError;
use pairpot::engine::progress::ProgressReporter;
use pairpot::workflows::tabulate::{self, PairTable};
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct Row {
    distance: f64,
    energy: f64,
    force: f64,
}

pub fn run(args: TableArgs) -> Result<()> {
    let mut forcefield = assemble_forcefield(&args.input)?;

    let rmax = match args.rmax {
        Some(rmax) => rmax * ANGSTROM,
        None => tabulate::tabulated_rcut(&forcefield).ok_or_else(|| {
            CliError::Argument("the force field has no part to tabulate".to_string())
        })?,
    };
    let config = TableConfigBuilder::new()
        .rmin(args.rmin * ANGSTROM)
        .rmax(rmax)
        .nrows(args.nrows)
        .build()
        .map_err(EngineError::from)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.callback());
    let tables = tabulate::run(&mut forcefield, &config, &reporter)?;

    std::fs::create_dir_all(&args.output_dir)?;
    for table in &tables {
        let path = args.output_dir.join(format!("{}.csv", table.name));
        write_table(table, &path)?;
        info!("Wrote table {} to {:?}", table.name, &path);
    }
    println!(
        "Wrote {} table(s) with {} rows to {}",
        tables.len(),
        config.nrows(),
        args.output_dir.display()
    );
    Ok(())
}

/// Writes distances in angstrom, energies in kcal/mol and forces in kcal/mol/angstrom.
fn write_table(table: &PairTable, path: &Path) -> Result<()> {
    let output_err = |source| CliError::Output {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(output_err)?;
    for row in &table.rows {
        writer
            .serialize(Row {
                distance: row.distance / ANGSTROM,
                energy: row.energy / KCALMOL,
                force: row.force / (KCALMOL / ANGSTROM),
            })
            .map_err(output_err)?;
    }
    writer.flush()?;
    Ok(())
}
