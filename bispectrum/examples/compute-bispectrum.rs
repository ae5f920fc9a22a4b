use std::path::PathBuf;

use bispectrum::{BispectrumJob, Solver, System};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // load the systems from command line argument
    let path = std::env::args().nth(1).expect("expected a command line argument");
    let systems = bispectrum::systems::read_from_file(path)?;
    // transform systems into a vector of trait objects (`Vec<Box<dyn System>>`)
    let systems = systems.into_iter()
        .map(|s| Box::new(s) as Box<dyn System>)
        .collect::<Vec<_>>();

    // pass hyper-parameters as JSON. The order of the elements is the order
    // of the atom types given to LAMMPS
    let parameters = r#"{
        "cutoff_scale": 5.0,
        "twojmax": 6,
        "diagonal": 3,
        "elements": {
            "Na": {"radius": 0.3, "weight": 0.9},
            "Cl": {"radius": 0.7, "weight": 3.0}
        }
    }"#;
    let job = BispectrumJob::from_json(parameters)?
        .with_solver(Solver::new("lmp_serial"));

    // each system gets its own sub-directory
    let directory = PathBuf::from("bispectrum-output");
    let dumps = job.compute(&systems, &directory)?;

    // the columns of the dump files correspond to these (j1, j2, j3)
    let properties = job.parameters().properties();
    println!("{} bispectrum components per atom", properties.count());
    for (i, dump) in dumps.iter().enumerate() {
        println!("system {}: {}", i, dump.sna.display());
    }

    Ok(())
}
