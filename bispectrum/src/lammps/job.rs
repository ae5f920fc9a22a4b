use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::{Error, System};
use crate::calculators::BispectrumParameters;

use super::{InputScript, LammpsData, Solver};
use super::transient::TransientFiles;
use super::{DATA_FILE, INPUT_SCRIPT, LOG_FILE};
use super::{DUMP_ELEMENT, DUMP_SNA, DUMP_SNAD, DUMP_SNAV};

/// Paths to the per-atom files written by the solver for a single structure.
///
/// Columns in `sna`, `snad` and `snav` follow the order of
/// [`BispectrumParameters::triplets`].
#[derive(Debug, Clone, PartialEq)]
pub struct DumpFiles {
    /// Element symbol of each atom
    pub element: PathBuf,
    /// Bispectrum components of each atom
    pub sna: PathBuf,
    /// Derivatives of the bispectrum components with respect to positions
    pub snad: PathBuf,
    /// Virial contributions of the bispectrum components
    pub snav: PathBuf,
}

impl DumpFiles {
    fn new(directory: &Path) -> DumpFiles {
        DumpFiles {
            element: directory.join(DUMP_ELEMENT),
            sna: directory.join(DUMP_SNA),
            snad: directory.join(DUMP_SNAD),
            snav: directory.join(DUMP_SNAV),
        }
    }

    fn all(&self) -> [&Path; 4] {
        [&self.element, &self.sna, &self.snad, &self.snav]
    }
}

/// Bispectrum calculation driving an external solver.
///
/// Each call to [`BispectrumJob::run`] works in a directory given by the
/// caller: the input files for the solver are created there, and removed once
/// the solver exits, whether it succeeded or not. Only the dump files stay.
/// Two jobs must not run in the same directory at the same time.
#[derive(Debug, Clone)]
pub struct BispectrumJob {
    parameters: BispectrumParameters,
    script: InputScript,
    solver: Solver,
}

impl BispectrumJob {
    /// Create a new job with the given `parameters`, using the default solver
    pub fn new(parameters: BispectrumParameters) -> Result<BispectrumJob, Error> {
        parameters.validate()?;
        let script = InputScript::new(&parameters);

        return Ok(BispectrumJob {
            parameters: parameters,
            script: script,
            solver: Solver::default(),
        });
    }

    /// Create a new job with parameters given as JSON
    pub fn from_json(parameters: &str) -> Result<BispectrumJob, Error> {
        let parameters = BispectrumParameters::from_json(parameters)?;
        return BispectrumJob::new(parameters);
    }

    /// Use the given `solver` to run this job
    #[must_use]
    pub fn with_solver(mut self, solver: Solver) -> BispectrumJob {
        self.solver = solver;
        self
    }

    /// Get the parameters used by this job
    pub fn parameters(&self) -> &BispectrumParameters {
        &self.parameters
    }

    /// Get the input script this job gives to the solver
    pub fn script(&self) -> &InputScript {
        &self.script
    }

    /// Get the solver used by this job
    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    /// Compute the bispectrum of a single `system`, with all files in
    /// `directory`. The directory is created if needed.
    ///
    /// This blocks until the solver exits. Solver failures are not retried.
    #[time_graph::instrument(name = "BispectrumJob::run")]
    pub fn run(&self, system: &dyn System, directory: &Path) -> Result<DumpFiles, Error> {
        let element_order = self.parameters.element_order();
        let data = LammpsData::new(system, &element_order)?;

        info!(
            "computing {} bispectrum components for {} atoms in {}",
            self.parameters.size(), data.size(), directory.display()
        );

        std::fs::create_dir_all(directory)?;
        let transient = TransientFiles::new(vec![
            directory.join(DATA_FILE),
            directory.join(INPUT_SCRIPT),
            directory.join(LOG_FILE),
        ]);

        data.write_file(directory.join(DATA_FILE))?;
        self.script.write_file(directory.join(INPUT_SCRIPT))?;
        debug!("solver input script:\n{}", self.script);

        self.solver.run(Path::new(INPUT_SCRIPT), directory)?;

        transient.remove()?;

        let dumps = DumpFiles::new(directory);
        for path in dumps.all() {
            if !path.is_file() {
                warn!("the solver succeeded but did not create {}", path.display());
            }
        }

        return Ok(dumps);
    }

    /// Compute the bispectrum of all `systems`, one after the other. The files
    /// for the system at index `i` are in `directory/i/`.
    pub fn compute(&self, systems: &[Box<dyn System>], directory: &Path) -> Result<Vec<DumpFiles>, Error> {
        let mut dumps = Vec::with_capacity(systems.len());
        for (i, system) in systems.iter().enumerate() {
            dumps.push(self.run(&**system, &directory.join(i.to_string()))?);
        }
        return Ok(dumps);
    }
}
