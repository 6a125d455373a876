use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};

use nix::unistd::{access, AccessFlags};
use tracing::{debug, trace};

/// Longest candidate path, terminator included.
pub const MAX_PATH_LEN: usize = 4096;

const SYSTEM_DIR: &str = "/bin";

/// Ordered directories searched for external commands: `$HOME`, then `/bin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<OsString>,
}

impl SearchPath {
    pub fn from_env() -> Self {
        Self::with_home(env::var_os("HOME"))
    }

    /// Home is skipped when missing or empty.
    pub fn with_home(home: Option<OsString>) -> Self {
        let mut dirs = Vec::with_capacity(2);
        if let Some(home) = home.filter(|h| !h.is_empty()) {
            dirs.push(home);
        }
        dirs.push(OsString::from(SYSTEM_DIR));
        Self { dirs }
    }

    pub fn new<I, D>(dirs: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<OsString>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    #[cfg(test)]
    fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(Path::new)
    }

    /// First `dir/name` that is an executable regular file.
    ///
    /// `name` ends at its first NUL byte, the way a C string would.
    pub fn resolve(&self, name: &[u8]) -> Option<PathBuf> {
        let name = &name[..name.iter().position(|&b| b == 0).unwrap_or(name.len())];
        for dir in &self.dirs {
            let Some(candidate) = candidate(dir, name) else {
                debug!(dir = ?dir, "candidate path too long, skipping");
                continue;
            };

            if is_executable(&candidate) {
                debug!(path = %candidate.display(), "resolved command");
                return Some(candidate);
            }
            trace!(path = %candidate.display(), "not executable");
        }
        None
    }
}

fn candidate(dir: &OsStr, name: &[u8]) -> Option<PathBuf> {
    let dir = dir.as_bytes();
    let needed = dir.len() + 1 + name.len() + 1;
    if needed > MAX_PATH_LEN {
        return None;
    }

    let mut bytes = Vec::with_capacity(needed - 1);
    bytes.extend_from_slice(dir);
    bytes.push(b'/');
    bytes.extend_from_slice(name);
    Some(PathBuf::from(OsString::from_vec(bytes)))
}

/// True for a regular file (after symlinks) that the caller may execute.
pub fn is_executable(path: &Path) -> bool {
    let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    is_file && access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, mode: u32) -> io::Result<PathBuf> {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n")?;
        fs::set_permissions(&path, fs::Permissions::from_mode(mode))?;
        Ok(path)
    }

    #[test]
    fn test_home_is_searched_first() -> io::Result<()> {
        let home = TempDir::new()?;
        let system = TempDir::new()?;
        let expected = write_file(home.path(), "tool", 0o755)?;
        write_file(system.path(), "tool", 0o755)?;

        let search = SearchPath::new([home.path(), system.path()]);
        assert_eq!(search.resolve(b"tool"), Some(expected));
        Ok(())
    }

    #[test]
    fn test_executable_in_home_beats_plain_file_later() -> io::Result<()> {
        let home = TempDir::new()?;
        let system = TempDir::new()?;
        let expected = write_file(home.path(), "tool", 0o700)?;
        write_file(system.path(), "tool", 0o644)?;

        let search = SearchPath::new([home.path(), system.path()]);
        assert_eq!(search.resolve(b"tool"), Some(expected));
        Ok(())
    }

    #[test]
    fn test_non_executable_is_skipped() -> io::Result<()> {
        let home = TempDir::new()?;
        let system = TempDir::new()?;
        write_file(home.path(), "tool", 0o644)?;
        let expected = write_file(system.path(), "tool", 0o755)?;

        let search = SearchPath::new([home.path(), system.path()]);
        assert_eq!(search.resolve(b"tool"), Some(expected));
        Ok(())
    }

    #[test]
    fn test_nothing_executable_resolves_to_none() -> io::Result<()> {
        let home = TempDir::new()?;
        write_file(home.path(), "tool", 0o600)?;

        let search = SearchPath::new([home.path()]);
        assert_eq!(search.resolve(b"tool"), None);
        assert_eq!(search.resolve(b"missing"), None);
        Ok(())
    }

    #[test]
    fn test_name_stops_at_nul() -> io::Result<()> {
        let home = TempDir::new()?;
        let expected = write_file(home.path(), "tool", 0o755)?;

        let search = SearchPath::new([home.path()]);
        assert_eq!(search.resolve(b"tool\0junk"), Some(expected));
        assert_eq!(search.resolve(b"\0tool"), None);
        Ok(())
    }

    #[test]
    fn test_directory_is_not_a_command() -> io::Result<()> {
        let home = TempDir::new()?;
        fs::create_dir(home.path().join("subdir"))?;

        let search = SearchPath::new([home.path()]);
        assert_eq!(search.resolve(b"subdir"), None);
        Ok(())
    }

    #[test]
    fn test_overlong_candidate_is_skipped() -> io::Result<()> {
        let home = TempDir::new()?;
        let name = vec![b'x'; MAX_PATH_LEN];

        let search = SearchPath::new([home.path()]);
        assert_eq!(search.resolve(&name), None);
        Ok(())
    }

    #[test]
    fn test_candidate_length_limit() {
        let dir = OsStr::new("/bin");
        let fits = vec![b'a'; MAX_PATH_LEN - 6];
        let too_long = vec![b'a'; MAX_PATH_LEN - 5];

        assert!(candidate(dir, &fits).is_some());
        assert!(candidate(dir, &too_long).is_none());
        assert_eq!(candidate(dir, b"ls"), Some(PathBuf::from("/bin/ls")));
    }

    #[test]
    fn test_missing_or_empty_home_is_skipped() {
        let expected = vec![Path::new("/bin")];
        let unset = SearchPath::with_home(None);
        let empty = SearchPath::with_home(Some(OsString::new()));

        assert_eq!(unset.dirs().collect::<Vec<_>>(), expected);
        assert_eq!(empty.dirs().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_home_then_bin_order() {
        let search = SearchPath::with_home(Some(OsString::from("/home/u")));
        let dirs: Vec<_> = search.dirs().collect();
        assert_eq!(dirs, vec![Path::new("/home/u"), Path::new("/bin")]);
    }

    #[test]
    fn test_system_dir_lookup() {
        if !Path::new("/bin/sh").exists() {
            return;
        }
        let search = SearchPath::with_home(None);
        assert_eq!(search.resolve(b"sh"), Some(PathBuf::from("/bin/sh")));
    }
}
