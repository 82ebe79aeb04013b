use super::assemble_forcefield;
use crate::cli::EnergyArgs;
use crate::error::Result;
use nalgebra::Vector3;
use pairpot::core::units::{ANGSTROM, KCALMOL};
use tracing::info;

pub fn run(args: EnergyArgs) -> Result<()> {
    let forcefield = assemble_forcefield(&args.input)?;
    let natom = forcefield.system().natom();

    let mut gpos = args.gradient.then(|| vec![Vector3::zeros(); natom]);
    let energy = forcefield.compute(gpos.as_deref_mut(), None);
    info!(?energy, "Energy evaluated");

    println!("Particles:       {natom}");
    println!("Contacts:        {}", forcefield.nlist().nneigh());
    println!("vdW:             {:>16.6} kcal/mol", energy.vdw / KCALMOL);
    println!("Electrostatic:   {:>16.6} kcal/mol", energy.electrostatic / KCALMOL);
    println!("Total:           {:>16.6} kcal/mol", energy.total() / KCALMOL);

    if let Some(gpos) = gpos {
        let norm = gpos.iter().map(|g| g.norm_squared()).sum::<f64>().sqrt();
        println!("Gradient norm:   {:>16.6} kcal/mol/A", norm / (KCALMOL / ANGSTROM));
    }
    Ok(())
}
