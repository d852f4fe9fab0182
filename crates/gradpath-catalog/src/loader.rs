//! Catalog file loading.
//!
//! Whole-file problems (unreadable, not JSON) are errors. Problems with a
//! single entry degrade: the entry is skipped and treated as a course with
//! no prerequisites.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::CatalogConfig;
use crate::models::{CourseInfo, PrereqRules, Prerequisite, TreeRules};

/// Errors raised while reading catalog files.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// File formats
// ---------------------------------------------------------------------------

/// `courses.json` comes either keyed by id or as a list of records.
#[derive(Deserialize)]
#[serde(untagged)]
enum CoursesFile {
    Keyed(BTreeMap<String, CourseInfo>),
    Records(Vec<CourseRecord>),
}

#[derive(Deserialize)]
struct CourseRecord {
    #[serde(alias = "id")]
    course_id: Option<String>,
    #[serde(flatten)]
    info: CourseInfo,
}

fn read_json(path: &Path) -> Result<serde_json::Value, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_value<T: serde::de::DeserializeOwned>(
    path: &Path,
    value: serde_json::Value,
) -> Result<T, CatalogError> {
    serde_json::from_value(value).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load course metadata from a JSON file.
///
/// Records without an id are dropped.
pub fn load_courses(path: &Path) -> Result<BTreeMap<String, CourseInfo>, CatalogError> {
    let file: CoursesFile = parse_value(path, read_json(path)?)?;
    let courses = match file {
        CoursesFile::Keyed(map) => map,
        CoursesFile::Records(records) => records
            .into_iter()
            .filter_map(|r| r.course_id.map(|id| (id, r.info)))
            .collect(),
    };
    tracing::debug!(path = %path.display(), count = courses.len(), "loaded course metadata");
    Ok(courses)
}

/// Load the flat prerequisite table (`id -> [id, ...]`).
pub fn load_prereq_rules(path: &Path) -> Result<PrereqRules, CatalogError> {
    let rules: PrereqRules = parse_value(path, read_json(path)?)?;
    tracing::debug!(path = %path.display(), count = rules.len(), "loaded prerequisite lists");
    Ok(rules)
}

/// Load the boolean prerequisite table (`id -> tree`).
///
/// Entries that are not valid trees (e.g. `{"type": "none"}`) are skipped.
pub fn load_prereq_trees(path: &Path) -> Result<TreeRules, CatalogError> {
    let raw: BTreeMap<String, serde_json::Value> = parse_value(path, read_json(path)?)?;
    Ok(trees_from_raw(raw))
}

/// Keep the entries of a raw rule table that parse as trees.
pub fn trees_from_raw(raw: BTreeMap<String, serde_json::Value>) -> TreeRules {
    let mut trees = TreeRules::new();
    for (id, value) in raw {
        match serde_json::from_value::<Prerequisite>(value) {
            Ok(tree) => {
                trees.insert(id, tree);
            }
            Err(e) => {
                tracing::warn!(course = %id, error = %e, "skipping unparseable prerequisite tree");
            }
        }
    }
    trees
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// An in-memory course catalog.
///
/// Holds both prerequisite representations. [`Catalog::rules`] is the flat
/// view used by the layout algorithms: the flat list where one exists,
/// otherwise the courses of the tree's first alternative
/// ([`Prerequisite::first_alternative`]). A tree nobody can satisfy
/// contributes no prerequisites.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: BTreeMap<String, CourseInfo>,
    trees: TreeRules,
    rules: PrereqRules,
}

impl Catalog {
    pub fn new(courses: BTreeMap<String, CourseInfo>, rules: PrereqRules, trees: TreeRules) -> Self {
        let mut merged = rules;
        for (id, tree) in &trees {
            if merged.contains_key(id) {
                continue;
            }
            let prereqs = tree.first_alternative().unwrap_or_else(|| {
                tracing::warn!(course = %id, "prerequisite tree has no satisfiable alternative");
                Vec::new()
            });
            merged.insert(id.clone(), prereqs);
        }
        Self {
            courses,
            trees,
            rules: merged,
        }
    }

    /// Load every catalog file that exists under the configured directory.
    ///
    /// A missing file yields an empty table; a present but malformed file
    /// is an error.
    pub fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let courses_path = config.courses_path();
        let rules_path = config.rules_path();
        let trees_path = config.trees_path();

        let courses = if courses_path.exists() {
            load_courses(&courses_path)?
        } else {
            tracing::warn!(path = %courses_path.display(), "course metadata file not found");
            BTreeMap::new()
        };
        let rules = if rules_path.exists() {
            load_prereq_rules(&rules_path)?
        } else {
            PrereqRules::new()
        };
        let trees = if trees_path.exists() {
            load_prereq_trees(&trees_path)?
        } else {
            TreeRules::new()
        };

        tracing::info!(
            dir = %config.dir.display(),
            courses = courses.len(),
            flat_rules = rules.len(),
            tree_rules = trees.len(),
            "catalog loaded"
        );
        Ok(Self::new(courses, rules, trees))
    }

    /// Every known course id, sorted. Includes ids that only appear as rule keys.
    pub fn course_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.courses.keys().cloned().collect();
        for id in self.rules.keys() {
            if !self.courses.contains_key(id) {
                ids.push(id.clone());
            }
        }
        ids.sort();
        ids
    }

    /// Whether `id` has metadata or a rule entry.
    pub fn contains(&self, id: &str) -> bool {
        self.courses.contains_key(id) || self.rules.contains_key(id)
    }

    pub fn info(&self, id: &str) -> Option<&CourseInfo> {
        self.courses.get(id)
    }

    pub fn courses(&self) -> &BTreeMap<String, CourseInfo> {
        &self.courses
    }

    /// Direct prerequisites of `id`; empty when the catalog has no entry.
    pub fn prereqs_of(&self, id: &str) -> &[String] {
        self.rules.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Flat rule table used by the layout algorithms.
    pub fn rules(&self) -> &PrereqRules {
        &self.rules
    }

    /// Boolean rule table used by tree expansion.
    pub fn trees(&self) -> &TreeRules {
        &self.trees
    }

    pub fn tree(&self, id: &str) -> Option<&Prerequisite> {
        self.trees.get(id)
    }
}
