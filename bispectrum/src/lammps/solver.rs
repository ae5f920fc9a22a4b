use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::Error;

fn default_executable() -> String {
    "lmp_serial".into()
}

/// How to run the external solver.
///
/// The solver is executed as `<executable> <arguments...> -in <script>`, from
/// inside the job directory. Extra `arguments` can be used to go through a
/// launcher, for example with `executable = "mpirun"` and `arguments = ["-np",
/// "4", "lmp_mpi"]`.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Solver {
    /// Name of or path to the executable
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Additional arguments, inserted before `-in <script>`
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl Default for Solver {
    fn default() -> Solver {
        Solver {
            executable: default_executable(),
            arguments: Vec::new(),
        }
    }
}

impl Solver {
    /// Create a new `Solver` running the given `executable`
    pub fn new(executable: impl Into<String>) -> Solver {
        Solver {
            executable: executable.into(),
            arguments: Vec::new(),
        }
    }

    /// Add an argument to pass to the executable before `-in <script>`
    #[must_use]
    pub fn arg(mut self, argument: impl Into<String>) -> Solver {
        self.arguments.push(argument.into());
        self
    }

    /// Run the solver on the `script`, from inside `directory`. The `script`
    /// path is relative to `directory`.
    ///
    /// This blocks until the solver exits, and returns its standard output if
    /// it exited successfully.
    pub fn run(&self, script: &Path, directory: &Path) -> Result<String, Error> {
        info!("running {} on {} in {}", self.executable, script.display(), directory.display());

        let output = Command::new(&self.executable)
            .args(&self.arguments)
            .arg("-in")
            .arg(script)
            .current_dir(directory)
            .output()
            .map_err(|error| Error::SolverLaunch {
                executable: self.executable.clone(),
                error: error,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("{} output:\n{}", self.executable, stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut captured = stdout;
            if !stderr.is_empty() {
                if !captured.is_empty() && !captured.ends_with('\n') {
                    captured.push('\n');
                }
                captured.push_str(&stderr);
            }

            return Err(Error::Solver {
                status: output.status.code(),
                output: captured,
            });
        }

        return Ok(stdout);
    }
}
