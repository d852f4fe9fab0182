//! Course catalog data layer: course metadata, prerequisite rule tables in
//! both flat and boolean-tree form, and loading them from JSON files.

pub mod config;
pub mod loader;
pub mod models;

pub use config::CatalogConfig;
pub use loader::{Catalog, CatalogError, load_courses, load_prereq_rules, load_prereq_trees};
pub use models::{CourseInfo, CourseLeaf, PrereqRules, Prerequisite, TreeRules};
