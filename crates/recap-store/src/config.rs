//! User-level configuration: env var, then `config.json`, then default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Number of trailing log records examined per pass.
pub const DEFAULT_WINDOW: usize = 100;

/// Contents of `<config dir>/recap/config.json`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecapConfig {
    pub window: Option<usize>,
    pub state_dir: Option<PathBuf>,
}

impl RecapConfig {
    /// Config file location: `RECAP_CONFIG`, else `<config dir>/recap/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(p) = std::env::var_os("RECAP_CONFIG") {
            return Some(PathBuf::from(p));
        }
        dirs::config_dir().map(|d| d.join("recap").join("config.json"))
    }

    /// Load from the default location.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from `path`. Missing or unparseable files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }
        }
    }

    /// Effective window: `RECAP_WINDOW`, then config, then [`DEFAULT_WINDOW`].
    pub fn window(&self) -> usize {
        resolve_window(std::env::var("RECAP_WINDOW").ok().as_deref(), self.window)
    }

    /// Effective state dir: `RECAP_STATE_DIR`, then config, then the temp dir.
    pub fn state_dir(&self) -> PathBuf {
        resolve_state_dir(
            std::env::var_os("RECAP_STATE_DIR").map(PathBuf::from),
            self.state_dir.clone(),
        )
    }
}

fn resolve_window(env: Option<&str>, file: Option<usize>) -> usize {
    env.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|w| *w > 0)
        .or(file.filter(|w| *w > 0))
        .unwrap_or(DEFAULT_WINDOW)
}

fn resolve_state_dir(env: Option<PathBuf>, file: Option<PathBuf>) -> PathBuf {
    env.filter(|p| !p.as_os_str().is_empty())
        .or(file)
        .unwrap_or_else(std::env::temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_precedence() {
        assert_eq!(resolve_window(None, None), DEFAULT_WINDOW);
        assert_eq!(resolve_window(None, Some(40)), 40);
        assert_eq!(resolve_window(Some("25"), Some(40)), 25);
        assert_eq!(resolve_window(Some("not_a_number"), Some(40)), 40);
        assert_eq!(resolve_window(Some("0"), None), DEFAULT_WINDOW);
        assert_eq!(resolve_window(Some("0"), Some(40)), 40);
        assert_eq!(resolve_window(None, Some(0)), DEFAULT_WINDOW);
    }

    #[test]
    fn state_dir_precedence() {
        let env = Some(PathBuf::from("/var/tmp/recap"));
        let file = Some(PathBuf::from("/home/u/.recap"));
        assert_eq!(resolve_state_dir(env, file.clone()), PathBuf::from("/var/tmp/recap"));
        assert_eq!(resolve_state_dir(None, file), PathBuf::from("/home/u/.recap"));
        assert_eq!(resolve_state_dir(Some(PathBuf::new()), None), std::env::temp_dir());
    }

    #[test]
    fn load_from_missing_is_default() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = RecapConfig::load_from(&tmp.path().join("config.json"));
        assert_eq!(cfg, RecapConfig::default());
    }

    #[test]
    fn load_from_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"window": 50}"#).unwrap();
        let cfg = RecapConfig::load_from(&path);
        assert_eq!(cfg.window, Some(50));
        assert_eq!(cfg.state_dir, None);
    }

    #[test]
    fn load_from_malformed_is_default() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(RecapConfig::load_from(&path), RecapConfig::default());
    }
}
