use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Manages Chrome profile directories.
///
/// A temporary profile is removed when the manager drops; a named profile
/// persists under `~/.punchcard/profiles/<name>` so the site's session
/// cookies survive between runs.
pub struct ProfileManager {
    path: PathBuf,
    is_temporary: bool,
}

impl ProfileManager {
    /// Create a throwaway profile deleted on drop.
    pub fn temporary() -> Result<Self> {
        let temp_dir = tempfile::tempdir().map_err(Error::Io)?;

        Ok(Self {
            path: temp_dir.keep(),
            is_temporary: true,
        })
    }

    /// Create or reuse a named persistent profile.
    pub fn named(name: &str) -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Browser("Could not determine home directory".to_string()))?;
        Self::persistent(home.join(".punchcard").join("profiles").join(name))
    }

    /// Create or reuse a persistent profile at an explicit path.
    pub fn persistent(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(Error::Io)?;
        }

        Ok(Self {
            path,
            is_temporary: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }
}

impl Drop for ProfileManager {
    fn drop(&mut self) {
        if self.is_temporary && self.path.exists() {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_profile_creates_and_cleans_up() {
        let profile = ProfileManager::temporary().unwrap();
        let path = profile.path().to_path_buf();

        assert!(path.is_dir());
        assert!(profile.is_temporary());

        drop(profile);

        assert!(!path.exists());
    }

    #[test]
    fn test_persistent_profile_survives_drop() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile_path = temp_dir.path().join("work-account");

        let profile = ProfileManager::persistent(profile_path.clone()).unwrap();
        assert!(profile_path.is_dir());
        assert!(!profile.is_temporary());

        drop(profile);

        assert!(profile_path.exists());
    }

    #[test]
    fn test_persistent_profile_creates_missing_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile_path = temp_dir.path().join("nested").join("profile");

        let _profile = ProfileManager::persistent(profile_path.clone()).unwrap();
        assert!(profile_path.is_dir());
    }
}
