use std::env;
use std::path::{Path, PathBuf};

/// Catalog location.
///
/// Reads the directory from the `GRADPATH_CATALOG_DIR` environment variable,
/// falling back to `./data` when unset. File names inside the directory
/// follow the names the catalog dumps ship with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory holding the catalog files.
    pub dir: PathBuf,
    /// Course metadata (`courses.json`).
    pub courses_file: String,
    /// Flat prerequisite lists (`prerequisites.json`).
    pub rules_file: String,
    /// Boolean prerequisite trees (`parsed_prerequisites_cleaned.json`).
    pub trees_file: String,
}

impl CatalogConfig {
    /// The catalog directory used when no environment variable is set.
    pub const DEFAULT_DIR: &str = "data";

    pub const COURSES_FILE: &str = "courses.json";
    pub const RULES_FILE: &str = "prerequisites.json";
    pub const TREES_FILE: &str = "parsed_prerequisites_cleaned.json";

    /// Build a config from the environment.
    ///
    /// Priority: `GRADPATH_CATALOG_DIR` env var, then the compile-time default.
    pub fn from_env() -> Self {
        let dir = env::var("GRADPATH_CATALOG_DIR").unwrap_or_else(|_| Self::DEFAULT_DIR.to_owned());
        Self::new(dir)
    }

    /// Build a config from an explicit directory (useful for tests and CLI flags).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            courses_file: Self::COURSES_FILE.to_owned(),
            rules_file: Self::RULES_FILE.to_owned(),
            trees_file: Self::TREES_FILE.to_owned(),
        }
    }

    pub fn courses_path(&self) -> PathBuf {
        self.dir.join(&self.courses_file)
    }

    pub fn rules_path(&self) -> PathBuf {
        self.dir.join(&self.rules_file)
    }

    pub fn trees_path(&self) -> PathBuf {
        self.dir.join(&self.trees_file)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dir() {
        let cfg = CatalogConfig::new(CatalogConfig::DEFAULT_DIR);
        assert_eq!(cfg.dir, PathBuf::from("data"));
    }

    #[test]
    fn paths_join_file_names() {
        let cfg = CatalogConfig::new("/srv/catalog");
        assert_eq!(cfg.courses_path(), PathBuf::from("/srv/catalog/courses.json"));
        assert_eq!(cfg.rules_path(), PathBuf::from("/srv/catalog/prerequisites.json"));
        assert_eq!(
            cfg.trees_path(),
            PathBuf::from("/srv/catalog/parsed_prerequisites_cleaned.json")
        );
    }
}
