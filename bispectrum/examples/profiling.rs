use std::path::PathBuf;

use bispectrum::{BispectrumJob, System};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).expect("expected a command line argument");

    // enable collection of profiling data
    time_graph::enable_data_collection(true);
    // clear any existing collected data
    time_graph::clear_collected_data();

    // run the calculation
    compute_bispectrum(&path)?;

    // get the call graph and display it
    let graph = time_graph::get_full_graph();
    // (this requires the "table" feature for the time_graph crate)
    println!("{}", graph.as_short_table());

    // also available for saving profiling data to the disk & future analysis
    // (this requires the "json" feature for the time_graph crate)
    println!("{}", graph.as_json());

    Ok(())
}

/// Compute the bispectrum, this is the same code as the 'compute-bispectrum'
/// example
fn compute_bispectrum(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let systems = bispectrum::systems::read_from_file(path)?;
    let systems = systems.into_iter()
        .map(|s| Box::new(s) as Box<dyn System>)
        .collect::<Vec<_>>();

    let parameters = r#"{
        "cutoff_scale": 5.0,
        "twojmax": 8,
        "elements": {
            "Na": {"radius": 0.3, "weight": 0.9},
            "Cl": {"radius": 0.7, "weight": 3.0}
        }
    }"#;

    let job = BispectrumJob::from_json(parameters)?;
    time_graph::spanned!("Full calculation", {
        job.compute(&systems, &PathBuf::from("bispectrum-profiling"))
    })?;

    Ok(())
}
