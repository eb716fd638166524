//! Where profile documents live and how they are discovered.
//!
//! Defaults suit the repository layout (`profiles/*.yml`). A TOML file can
//! override them, and `DIRECTORY_PROFILES_DIR` overrides the directory last:
//!
//! ```toml
//! profiles_dir = "data/profiles"
//! extensions = ["yml", "yaml"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable that overrides [`DirectoryConfig::profiles_dir`].
pub const PROFILES_DIR_ENV: &str = "DIRECTORY_PROFILES_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Directory holding one document per profile.
    #[serde(default = "default_profiles_dir")]
    pub profiles_dir: PathBuf,
    /// File extensions (without dot, case-insensitive) treated as profiles.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            profiles_dir: default_profiles_dir(),
            extensions: default_extensions(),
        }
    }
}

fn default_profiles_dir() -> PathBuf {
    PathBuf::from("profiles")
}

fn default_extensions() -> Vec<String> {
    vec!["yml".into(), "yaml".into(), "json".into()]
}

impl DirectoryConfig {
    /// Config reading profiles from `dir` with default extensions.
    pub fn with_profiles_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            profiles_dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Apply `DIRECTORY_PROFILES_DIR` if it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(PROFILES_DIR_ENV).filter(|v| !v.is_empty()) {
            log::debug!("profiles_dir overridden by {PROFILES_DIR_ENV}: {dir:?}");
            self.profiles_dir = PathBuf::from(dir);
        }
        self
    }

    /// Whether `path` has one of the configured profile extensions.
    pub fn is_profile_file(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg = DirectoryConfig::from_toml_str("", Path::new("directory.toml")).unwrap();
        assert_eq!(cfg, DirectoryConfig::default());

        let cfg = DirectoryConfig::from_toml_str(
            "profiles_dir = \"data/people\"",
            Path::new("directory.toml"),
        )
        .unwrap();
        assert_eq!(cfg.profiles_dir, PathBuf::from("data/people"));
        assert_eq!(cfg.extensions, default_extensions());
    }

    #[test]
    fn invalid_toml_names_the_file() {
        let err = DirectoryConfig::from_toml_str("extensions = 3", Path::new("bad.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn reads_toml_file_and_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("directory.toml");
        std::fs::write(&path, "profiles_dir = \"people\"\nextensions = [\"yml\"]\n").unwrap();

        let cfg = DirectoryConfig::from_toml_file(&path).unwrap();
        assert_eq!(cfg.profiles_dir, PathBuf::from("people"));
        assert_eq!(cfg.extensions, vec!["yml".to_string()]);
        assert!(!cfg.is_profile_file(Path::new("people/a.json")));

        std::env::set_var(PROFILES_DIR_ENV, "/srv/profiles");
        let cfg = cfg.with_env_overrides();
        std::env::remove_var(PROFILES_DIR_ENV);
        assert_eq!(cfg.profiles_dir, PathBuf::from("/srv/profiles"));

        let missing = DirectoryConfig::from_toml_file(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let cfg = DirectoryConfig::default();
        assert!(cfg.is_profile_file(Path::new("profiles/amir.yml")));
        assert!(cfg.is_profile_file(Path::new("profiles/amir.YAML")));
        assert!(cfg.is_profile_file(Path::new("profiles/amir.json")));
        assert!(!cfg.is_profile_file(Path::new("profiles/README.md")));
        assert!(!cfg.is_profile_file(Path::new("profiles/noext")));
    }
}
