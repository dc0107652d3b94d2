use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path into an absolute one.
///
/// Resolves `.` and `..` components without touching the filesystem, so the
/// target does not need to exist. Relative paths are anchored at the process
/// working directory. Symlinks are not resolved.
#[must_use]
pub fn absolutize(path: &Path) -> PathBuf {
    let mut out = if path.is_absolute() {
        PathBuf::new()
    } else {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"))
    };

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }

    out
}
