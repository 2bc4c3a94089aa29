use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum PatchError {
    /// Wrong number of command line arguments.
    Usage,
    /// `source` is `None` when the path was rejected before reaching the
    /// platform loader.
    Load {
        path: PathBuf,
        source: Option<libloading::Error>,
    },
    SymbolNotFound {
        path: PathBuf,
        source: libloading::Error,
    },
    /// The argument string can't be handed over as a C string.
    InvalidArgument,
    Unload {
        path: PathBuf,
        source: libloading::Error,
    },
}

impl std::error::Error for PatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load { source, .. } => source
                .as_ref()
                .map(|e| e as &(dyn std::error::Error + 'static)),
            Self::SymbolNotFound { source, .. } | Self::Unload { source, .. } => Some(source),
            Self::Usage | Self::InvalidArgument => None,
        }
    }
}

/// `message` followed by the path, when there is one.
fn with_path(f: &mut fmt::Formatter, message: &str, path: &Path) -> fmt::Result {
    if path.as_os_str().is_empty() {
        write!(f, "{}", message)
    } else {
        write!(f, "{} {}", message, path.display())
    }
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Usage => write!(
                f,
                "Usage: <patchclient.dll path> \"<args for patchclient.dll>\""
            ),
            Self::Load { path, .. } => with_path(f, "Failed to load patch client", path),
            Self::SymbolNotFound { path, .. } => {
                with_path(f, "No `Patch` function found in patch client", path)
            }
            Self::InvalidArgument => {
                write!(f, "Argument string for patch client contains a NUL byte")
            }
            Self::Unload { path, .. } => with_path(f, "Failed to unload patch client", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::path::Path;
    use test_log::test;

    fn load_error(path: &Path) -> libloading::Error {
        unsafe { libloading::Library::new(path) }.err().unwrap()
    }

    #[test]
    fn messages() {
        assert_eq!(
            PatchError::Usage.to_string(),
            "Usage: <patchclient.dll path> \"<args for patchclient.dll>\""
        );

        let path = Path::new("does/not/exist/patchclient.dll");
        let err = PatchError::Load {
            path: path.to_path_buf(),
            source: Some(load_error(path)),
        };
        assert_eq!(
            err.to_string(),
            format!("Failed to load patch client {}", path.display())
        );

        let err = PatchError::SymbolNotFound {
            path: path.to_path_buf(),
            source: load_error(path),
        };
        assert_eq!(
            err.to_string(),
            format!("No `Patch` function found in patch client {}", path.display())
        );
    }

    #[test]
    fn source_chain() {
        let path = Path::new("does/not/exist/patchclient.dll");
        let err = PatchError::Load {
            path: path.to_path_buf(),
            source: Some(load_error(path)),
        };
        assert!(err.source().is_some());

        let err = PatchError::Load {
            path: PathBuf::new(),
            source: None,
        };
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "Failed to load patch client");
        assert!(PatchError::Usage.source().is_none());
        assert!(PatchError::InvalidArgument.source().is_none());
    }
}
