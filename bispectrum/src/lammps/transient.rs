use std::io::ErrorKind;
use std::path::PathBuf;

use log::warn;

use crate::Error;

/// Files created for a single solver run, removed when this guard is dropped
/// or when calling [`TransientFiles::remove`].
///
/// Dropping the guard removes the files on a best-effort basis, logging
/// failures; `remove` reports them to the caller.
#[derive(Debug)]
pub(crate) struct TransientFiles {
    paths: Vec<PathBuf>,
}

impl TransientFiles {
    pub fn new(paths: Vec<PathBuf>) -> TransientFiles {
        TransientFiles { paths }
    }

    /// Remove all the files, returning the first error. Files which do not
    /// exist are ignored.
    pub fn remove(mut self) -> Result<(), Error> {
        let mut result = Ok(());
        for path in self.paths.drain(..) {
            if let Err(error) = remove_if_exists(&path) {
                if result.is_ok() {
                    result = Err(Error::Io(error));
                } else {
                    warn!("failed to remove {}: {}", path.display(), error);
                }
            }
        }
        return result;
    }
}

impl Drop for TransientFiles {
    fn drop(&mut self) {
        for path in self.paths.drain(..) {
            if let Err(error) = remove_if_exists(&path) {
                warn!("failed to remove {}: {}", path.display(), error);
            }
        }
    }
}

fn remove_if_exists(path: &std::path::Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove() {
        let directory = tempfile::tempdir().unwrap();
        let first = directory.path().join("first");
        let second = directory.path().join("second");
        std::fs::write(&first, "1").unwrap();

        let guard = TransientFiles::new(vec![first.clone(), second]);
        guard.remove().unwrap();
        assert!(!first.exists());
    }

    #[test]
    fn drop_guard() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("file");
        {
            let _guard = TransientFiles::new(vec![path.clone()]);
            std::fs::write(&path, "content").unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn remove_error() {
        let directory = tempfile::tempdir().unwrap();
        // removing a directory with `remove_file` fails
        let path = directory.path().join("not-a-file");
        std::fs::create_dir_all(&path).unwrap();

        let guard = TransientFiles::new(vec![path.clone()]);
        assert!(matches!(guard.remove(), Err(Error::Io(_))));
    }
}
