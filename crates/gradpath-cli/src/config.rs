//! Configuration file management for gradpath.
//!
//! Provides a TOML-based config file at `~/.config/gradpath/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gradpath_catalog::CatalogConfig;
use gradpath_core::layout::GridConfig;

/// Environment variable naming the catalog directory.
pub const CATALOG_DIR_ENV: &str = "GRADPATH_CATALOG_DIR";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub catalog: CatalogSection,
    /// Graph grid used by `gradpath serve`.
    #[serde(default)]
    pub layout: GridConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogSection {
    /// Directory holding `courses.json` and the prerequisite tables.
    pub dir: PathBuf,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the gradpath config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/gradpath` or `~/.config/gradpath`,
/// never the platform-specific `dirs::config_dir()`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("gradpath");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("gradpath")
}

/// Return the path to the gradpath config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct GradpathConfig {
    pub catalog: CatalogConfig,
    pub grid: GridConfig,
}

impl GradpathConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Catalog dir: `cli_dir` > `GRADPATH_CATALOG_DIR` env > `config_file.catalog.dir` > `CatalogConfig::DEFAULT_DIR`
    /// - Grid: `config_file.layout` > `GridConfig::default()`
    pub fn resolve(cli_dir: Option<&Path>) -> Self {
        let file_config = match load_config() {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                tracing::debug!(error = %format!("{e:#}"), "no usable config file");
                None
            }
        };

        let dir = if let Some(dir) = cli_dir {
            dir.to_path_buf()
        } else if let Ok(dir) = std::env::var(CATALOG_DIR_ENV) {
            PathBuf::from(dir)
        } else if let Some(ref cfg) = file_config {
            cfg.catalog.dir.clone()
        } else {
            PathBuf::from(CatalogConfig::DEFAULT_DIR)
        };

        let grid = file_config.map(|cfg| cfg.layout).unwrap_or_default();

        Self {
            catalog: CatalogConfig::new(dir),
            grid,
        }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    /// Point `XDG_CONFIG_HOME` at a temp dir for the duration of `f`.
    fn with_config_home<T>(f: impl FnOnce(&Path) -> T) -> T {
        let tmp = tempfile::TempDir::new().unwrap();
        let orig_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };

        let result = f(tmp.path());

        // Restore env before asserting, to avoid poisoning the mutex on failure.
        match orig_xdg {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }
        result
    }

    #[test]
    fn save_and_load_config_roundtrip() {
        let _lock = lock_env();
        let loaded = with_config_home(|home| {
            let original = ConfigFile {
                catalog: CatalogSection {
                    dir: PathBuf::from("/srv/catalog"),
                },
                layout: GridConfig {
                    column_width: 250.0,
                    ..GridConfig::default()
                },
            };
            save_config(&original).unwrap();
            assert!(home.join("gradpath").join("config.toml").exists());
            load_config().unwrap()
        });

        assert_eq!(loaded.catalog.dir, PathBuf::from("/srv/catalog"));
        assert_eq!(loaded.layout.column_width, 250.0);
        assert_eq!(loaded.layout.row_height, 90.0);
    }

    #[test]
    fn layout_section_is_optional() {
        let cfg: ConfigFile = toml::from_str("[catalog]\ndir = \"data\"\n").unwrap();
        assert_eq!(cfg.layout, GridConfig::default());
    }

    #[test]
    fn resolve_with_cli_flag_overrides_all() {
        let _lock = lock_env();
        unsafe { std::env::set_var(CATALOG_DIR_ENV, "/from/env") };

        let config = GradpathConfig::resolve(Some(Path::new("/from/cli")));
        assert_eq!(config.catalog.dir, PathBuf::from("/from/cli"));

        unsafe { std::env::remove_var(CATALOG_DIR_ENV) };
    }

    #[test]
    fn resolve_with_env_var_overrides_config_file() {
        let _lock = lock_env();
        let config = with_config_home(|_| {
            save_config(&ConfigFile {
                catalog: CatalogSection {
                    dir: PathBuf::from("/from/file"),
                },
                layout: GridConfig::default(),
            })
            .unwrap();
            unsafe { std::env::set_var(CATALOG_DIR_ENV, "/from/env") };
            let config = GradpathConfig::resolve(None);
            unsafe { std::env::remove_var(CATALOG_DIR_ENV) };
            config
        });
        assert_eq!(config.catalog.dir, PathBuf::from("/from/env"));
    }

    #[test]
    fn resolve_reads_config_file() {
        let _lock = lock_env();
        unsafe { std::env::remove_var(CATALOG_DIR_ENV) };
        let config = with_config_home(|_| {
            save_config(&ConfigFile {
                catalog: CatalogSection {
                    dir: PathBuf::from("/from/file"),
                },
                layout: GridConfig {
                    row_height: 120.0,
                    ..GridConfig::default()
                },
            })
            .unwrap();
            GradpathConfig::resolve(None)
        });
        assert_eq!(config.catalog.dir, PathBuf::from("/from/file"));
        assert_eq!(config.grid.row_height, 120.0);
    }

    #[test]
    fn resolve_defaults_when_nothing_set() {
        let _lock = lock_env();
        unsafe { std::env::remove_var(CATALOG_DIR_ENV) };
        let config = with_config_home(|_| GradpathConfig::resolve(None));
        assert_eq!(config.catalog.dir, PathBuf::from(CatalogConfig::DEFAULT_DIR));
        assert_eq!(config.grid, GridConfig::default());
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let _lock = lock_env();
        let path = config_path();
        assert!(
            path.ends_with("gradpath/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
