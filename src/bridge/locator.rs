// ABOUTME: Resolves the launcher executable before any process is spawned.
// ABOUTME: SearchPath walks PATH the way a shell would; tests swap in fakes.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Finds the launcher binary.
pub trait LauncherLocator: Send + Sync {
    /// Return the full path of `launcher`, or `None` if it cannot be found.
    fn locate(&self, launcher: &str) -> Option<PathBuf>;
}

/// Locates launchers on the executable search path.
///
/// Names containing a path separator are checked directly. Bare names are
/// looked up in each `PATH` entry (and with each `PATHEXT` suffix on Windows).
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    path: Option<OsString>,
}

impl SearchPath {
    /// Search the process `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search an explicit `PATH`-style value instead of the process one.
    pub fn with_path(path: impl Into<OsString>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl LauncherLocator for SearchPath {
    fn locate(&self, launcher: &str) -> Option<PathBuf> {
        if launcher.is_empty() {
            return None;
        }

        let candidate = Path::new(launcher);
        if candidate.components().count() > 1 {
            return is_executable(candidate).then(|| candidate.to_path_buf());
        }

        let path = self.path.clone().or_else(|| std::env::var_os("PATH"))?;
        std::env::split_paths(&path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .flat_map(|dir| executable_names(launcher).map(move |name| dir.join(name)))
            .find(|full| is_executable(full))
    }
}

#[cfg(windows)]
fn executable_names(launcher: &str) -> impl Iterator<Item = String> + '_ {
    let exts = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    std::iter::once(launcher.to_string()).chain(
        exts.split(';')
            .filter(|e| !e.is_empty())
            .map(|e| format!("{launcher}{e}"))
            .collect::<Vec<_>>(),
    )
}

#[cfg(not(windows))]
fn executable_names(launcher: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(launcher.to_string())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
