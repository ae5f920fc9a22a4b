#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Got an invalid parameter value in a function
    InvalidParameter(String),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
    /// Error while reading or writing files
    Io(std::io::Error),
    /// The external solver could not be started
    SolverLaunch {
        /// executable we tried to run
        executable: String,
        /// error returned by the OS when launching the process
        error: std::io::Error,
    },
    /// The external solver exited with a non-zero status
    Solver {
        /// exit code of the solver, `None` if it was killed by a signal
        status: Option<i32>,
        /// captured standard output and error of the solver
        output: String,
    },
    /// Error related to reading structure files
    Chemfiles(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::SolverLaunch { executable, error } => {
                write!(f, "failed to launch '{}': {}", executable, error)
            },
            Error::Solver { status, output } => {
                match status {
                    Some(code) => write!(f, "solver exited with status {}", code)?,
                    None => write!(f, "solver was terminated by a signal")?,
                }
                if output.is_empty() {
                    Ok(())
                } else {
                    write!(f, ", output was:\n{}", output)
                }
            },
            Error::Chemfiles(e) => write!(f, "chemfiles error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidParameter(_) |
            Error::Solver { .. } |
            Error::Chemfiles(_) => None,
            Error::Json(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::SolverLaunch { error, .. } => Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let error = Error::InvalidParameter("twojmax can not be negative".into());
        assert_eq!(error.to_string(), "invalid parameter: twojmax can not be negative");

        let error = Error::Solver { status: Some(1), output: "ERROR: Unknown command".into() };
        assert_eq!(error.to_string(), "solver exited with status 1, output was:\nERROR: Unknown command");

        let error = Error::Solver { status: None, output: String::new() };
        assert_eq!(error.to_string(), "solver was terminated by a signal");

        let error = Error::SolverLaunch {
            executable: "lmp_serial".into(),
            error: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(error.to_string(), "failed to launch 'lmp_serial': not found");
    }
}
