//! Running bispectrum calculations with [LAMMPS](https://www.lammps.org/).
//!
//! LAMMPS is used as an external executable: for each structure we write a
//! data file and an input script in a job directory, run LAMMPS on them, and
//! keep the per-atom dump files it creates.

/// Name of the data file containing the structure
pub const DATA_FILE: &str = "data.0";
/// Name of the input script given to the solver
pub const INPUT_SCRIPT: &str = "in.sna";
/// Name of the log file created by the solver
pub const LOG_FILE: &str = "log.lammps";

/// Name of the dump file containing the element of each atom
pub const DUMP_ELEMENT: &str = "dump.element";
/// Name of the dump file containing the bispectrum components
pub const DUMP_SNA: &str = "dump.sna";
/// Name of the dump file containing the bispectrum derivatives
pub const DUMP_SNAD: &str = "dump.snad";
/// Name of the dump file containing the bispectrum virial contributions
pub const DUMP_SNAV: &str = "dump.snav";

mod data;
pub use self::data::{LammpsBox, LammpsData};

mod script;
pub use self::script::InputScript;

mod solver;
pub use self::solver::Solver;

mod transient;

mod job;
pub use self::job::{BispectrumJob, DumpFiles};
