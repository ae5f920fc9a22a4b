#![allow(dead_code)]

use std::path::PathBuf;

use bispectrum::{BispectrumJob, Solver};

/// Parameters for NaCl with the default diagonal style, giving 8 components
pub const NACL_PARAMETERS: &str = r#"{
    "cutoff_scale": 5.0,
    "twojmax": 3,
    "elements": {
        "Na": {"radius": 0.3, "weight": 0.9},
        "Cl": {"radius": 0.7, "weight": 3.0}
    }
}"#;

pub fn nacl_job() -> BispectrumJob {
    BispectrumJob::from_json(NACL_PARAMETERS).expect("invalid NaCl parameters")
}

/// Solver running `tests/data/fake-lammps.sh` through `sh`
pub fn fake_solver() -> Solver {
    let mut script = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    script.push("tests");
    script.push("data");
    script.push("fake-lammps.sh");

    Solver::new("sh").arg(script.to_str().expect("non UTF-8 path"))
}

/// Get an empty directory for the test with the given `name`
pub fn job_directory(name: &str) -> PathBuf {
    let mut directory = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
    directory.push("bispectrum-jobs");
    directory.push(name);

    if directory.exists() {
        std::fs::remove_dir_all(&directory).expect("failed to clean job directory");
    }

    return directory;
}

/// Get the sorted list of file names in `directory`
pub fn file_names(directory: &std::path::Path) -> Vec<String> {
    let mut names = std::fs::read_dir(directory)
        .expect("failed to read directory")
        .map(|entry| entry.expect("invalid entry").file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    return names;
}
