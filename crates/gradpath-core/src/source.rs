//! The `PrereqSource` trait -- lookup of a course's own requirement tree.
//!
//! Tree expansion only ever asks one question of the catalog: "what is the
//! requirement tree of this course?". A failed or missing lookup is not an
//! error; it means the course has no further prerequisites.

use std::path::PathBuf;

use async_trait::async_trait;

use gradpath_catalog::{Catalog, Prerequisite, TreeRules};
use gradpath_catalog::loader::trees_from_raw;

/// Catalog lookup consumed by tree expansion.
///
/// Object-safe so expansion can take `&dyn PrereqSource`. Lookups for
/// sibling branches run concurrently, so implementations must not rely on
/// call order.
#[async_trait]
pub trait PrereqSource: Send + Sync {
    /// Return the requirement tree of `course_id`, or `None` when the course
    /// has no (resolvable) prerequisites.
    async fn fetch_prereq_tree(&self, course_id: &str) -> Option<Prerequisite>;
}

// Compile-time assertion: PrereqSource must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn PrereqSource) {}
};

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// A source backed by an in-memory tree table.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    trees: TreeRules,
}

impl StaticSource {
    pub fn new(trees: TreeRules) -> Self {
        Self { trees }
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.trees().clone())
    }
}

#[async_trait]
impl PrereqSource for StaticSource {
    async fn fetch_prereq_tree(&self, course_id: &str) -> Option<Prerequisite> {
        self.trees.get(course_id).cloned()
    }
}

// ---------------------------------------------------------------------------
// File-backed source
// ---------------------------------------------------------------------------

/// A source that re-reads a JSON tree table from disk on every lookup.
///
/// Every IO or parse failure degrades to `None`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PrereqSource for JsonFileSource {
    async fn fetch_prereq_tree(&self, course_id: &str) -> Option<Prerequisite> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "prerequisite table unreadable");
                return None;
            }
        };
        let raw: std::collections::BTreeMap<String, serde_json::Value> =
            match serde_json::from_str(&contents) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::debug!(path = %self.path.display(), error = %e, "prerequisite table malformed");
                    return None;
                }
            };
        trees_from_raw(raw).remove(course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_source_returns_known_trees() {
        let mut trees = TreeRules::new();
        trees.insert("CMSC132".into(), Prerequisite::course("CMSC131"));
        let source: Box<dyn PrereqSource> = Box::new(StaticSource::new(trees));

        assert_eq!(
            source.fetch_prereq_tree("CMSC132").await,
            Some(Prerequisite::course("CMSC131"))
        );
        assert_eq!(source.fetch_prereq_tree("CMSC131").await, None);
    }

    #[tokio::test]
    async fn file_source_reads_table() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("trees.json");
        std::fs::write(
            &path,
            r#"{"CMSC132": {"type": "course", "course": "CMSC131"}, "X": {"type": "none"}}"#,
        )
        .unwrap();

        let source = JsonFileSource::new(&path);
        assert_eq!(
            source.fetch_prereq_tree("CMSC132").await,
            Some(Prerequisite::course("CMSC131"))
        );
        assert_eq!(source.fetch_prereq_tree("X").await, None);
    }

    #[tokio::test]
    async fn file_source_degrades_on_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = JsonFileSource::new(tmp.path().join("nope.json"));
        assert_eq!(source.fetch_prereq_tree("CMSC132").await, None);
    }

    #[tokio::test]
    async fn file_source_degrades_on_malformed_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("trees.json");
        std::fs::write(&path, "not json").unwrap();
        let source = JsonFileSource::new(&path);
        assert_eq!(source.fetch_prereq_tree("CMSC132").await, None);
    }
}
