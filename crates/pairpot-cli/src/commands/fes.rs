use crate::cli::FesArgs;
use crate::error::{CliError, Result};
use pairpot::analysis::hills::{SumHills, load_grid_csv};
use pairpot::engine::error::EngineError;
use std::path::Path;
use tracing::info;

pub fn run(args: FesArgs) -> Result<()> {
    let grid = load_grid_csv(&args.grid).map_err(EngineError::from)?;
    let mut hills = SumHills::new(grid).map_err(EngineError::from)?;

    if !args.periods.is_empty() {
        let mut periodicities = vec![None; hills.ncv()];
        for &(index, period) in &args.periods {
            let slot = periodicities.get_mut(index).ok_or_else(|| {
                CliError::Argument(format!(
                    "period given for variable {index}, but the grid has {} variables",
                    hills.ncv()
                ))
            })?;
            *slot = Some(period);
        }
        hills = hills
            .with_periodicities(periodicities)
            .map_err(EngineError::from)?;
    }

    let count = hills.load_csv(&args.hills).map_err(EngineError::from)?;
    info!("Loaded {} hills from {:?}", count, &args.hills);

    let fes = hills.compute_fes();
    write_fes(hills.grid(), &fes, &args.output)?;
    println!(
        "Wrote free energy at {} grid points from {} hills to {}",
        fes.len(),
        count,
        args.output.display()
    );
    Ok(())
}

fn write_fes(grid: &[Vec<f64>], fes: &[f64], path: &Path) -> Result<()> {
    let output_err = |source| CliError::Output {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(output_err)?;

    let ncv = grid.first().map_or(0, Vec::len);
    let header = (0..ncv)
        .map(|k| format!("cv_{k}"))
        .chain(std::iter::once("fes".to_string()));
    writer.write_record(header).map_err(output_err)?;
    for (point, f) in grid.iter().zip(fes) {
        let record = point.iter().chain(std::iter::once(f)).map(f64::to_string);
        writer.write_record(record).map_err(output_err)?;
    }
    writer.flush()?;
    Ok(())
}
