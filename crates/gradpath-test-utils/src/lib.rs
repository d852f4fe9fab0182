//! Shared test fixtures for gradpath integration tests.
//!
//! Provides:
//! - [`sample_catalog`]: a small computer-science major with flat
//!   prerequisite lists (diamonds included, no cycles).
//! - [`branching_trees`]: boolean requirement trees with nested `or` choices.
//! - [`cyclic_trees`]: trees where two courses require each other.
//! - [`write_sample_catalog`]: the sample catalog as JSON files on disk.

use std::collections::BTreeMap;
use std::path::Path;

use gradpath_catalog::{Catalog, CourseInfo, PrereqRules, Prerequisite, TreeRules};

/// `(id, name, credits, prerequisites)` for the sample major.
const SAMPLE_COURSES: &[(&str, &str, u32, &[&str])] = &[
    ("MATH140", "Calculus I", 4, &[]),
    ("MATH141", "Calculus II", 4, &["MATH140"]),
    ("CMSC131", "Object-Oriented Programming I", 4, &[]),
    ("CMSC132", "Object-Oriented Programming II", 4, &["CMSC131"]),
    ("STAT400", "Applied Probability and Statistics", 3, &["MATH141"]),
    ("CMSC250", "Discrete Structures", 4, &["CMSC131", "MATH141"]),
    ("CMSC216", "Introduction to Computer Systems", 4, &["CMSC132"]),
    ("MATH461", "Linear Algebra for Scientists and Engineers", 3, &["MATH141", "CMSC250"]),
    ("CMSC320", "Introduction to Data Science", 3, &["MATH140", "STAT400"]),
    ("CMSC330", "Organization of Programming Languages", 3, &["CMSC216", "MATH461"]),
    ("CMSC351", "Algorithms", 3, &["CMSC216", "MATH461"]),
    ("MATH401", "Applications of Linear Algebra", 3, &["MATH461", "CMSC330", "CMSC351"]),
    ("CMSC422", "Introduction to Machine Learning", 3, &["CMSC330", "CMSC351"]),
    ("CMSC426", "Computer Vision", 3, &["CMSC330", "CMSC351", "MATH461"]),
    ("CMSC470", "Natural Language Processing", 3, &["CMSC320", "CMSC330", "CMSC351", "MATH461"]),
    ("CMSC460", "Computational Methods", 3, &["CMSC422"]),
    ("CMSC435", "Software Engineering", 3, &["CMSC426"]),
];

/// Course metadata for the sample major.
pub fn sample_courses() -> BTreeMap<String, CourseInfo> {
    SAMPLE_COURSES
        .iter()
        .map(|(id, name, credits, _)| {
            (
                id.to_string(),
                CourseInfo::new(*name, *credits, format!("{name} ({id})")),
            )
        })
        .collect()
}

/// Flat prerequisite lists for the sample major.
pub fn sample_rules() -> PrereqRules {
    SAMPLE_COURSES
        .iter()
        .map(|(id, _, _, prereqs)| {
            (
                id.to_string(),
                prereqs.iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect()
}

/// The sample major as a catalog with flat rules only.
pub fn sample_catalog() -> Catalog {
    Catalog::new(sample_courses(), sample_rules(), TreeRules::new())
}

/// Build a flat rule table from `(course, [prereq, ...])` pairs.
pub fn rules(pairs: &[(&str, &[&str])]) -> PrereqRules {
    pairs
        .iter()
        .map(|(id, prereqs)| (id.to_string(), prereqs.iter().map(|p| p.to_string()).collect()))
        .collect()
}

fn c(id: &str) -> Prerequisite {
    Prerequisite::course(id)
}

/// Requirement trees with nested choices:
///
/// - `ROOT`: `courseC and (courseJ or courseK) and courseB`
/// - `courseB`: `(courseH or courseI) and (courseD or courseE or courseF)`
/// - `courseF`: `courseG`
pub fn branching_trees() -> TreeRules {
    let mut trees = TreeRules::new();
    trees.insert(
        "ROOT".into(),
        Prerequisite::and(vec![
            c("courseC"),
            Prerequisite::or(vec![c("courseJ"), c("courseK")]),
            c("courseB"),
        ]),
    );
    trees.insert(
        "courseB".into(),
        Prerequisite::and(vec![
            Prerequisite::or(vec![c("courseH"), c("courseI")]),
            Prerequisite::or(vec![c("courseD"), c("courseE"), c("courseF")]),
        ]),
    );
    trees.insert("courseF".into(), c("courseG"));
    trees
}

/// Requirement trees where `A` requires `B` and `B` requires `A`.
pub fn cyclic_trees() -> TreeRules {
    let mut trees = TreeRules::new();
    trees.insert("A".into(), c("B"));
    trees.insert("B".into(), c("A"));
    trees
}

/// Write the sample major to `dir` as `courses.json` (record form) and
/// `prerequisites.json`, plus [`branching_trees`] as the tree table.
pub fn write_sample_catalog(dir: &Path) -> std::io::Result<()> {
    let records: Vec<serde_json::Value> = SAMPLE_COURSES
        .iter()
        .map(|(id, name, credits, _)| {
            serde_json::json!({
                "course_id": id,
                "name": name,
                "credits": credits.to_string(),
                "description": format!("{name} ({id})"),
            })
        })
        .collect();
    std::fs::write(
        dir.join("courses.json"),
        serde_json::to_string_pretty(&records)?,
    )?;
    std::fs::write(
        dir.join("prerequisites.json"),
        serde_json::to_string_pretty(&sample_rules())?,
    )?;
    std::fs::write(
        dir.join("parsed_prerequisites_cleaned.json"),
        serde_json::to_string_pretty(&branching_trees())?,
    )?;
    Ok(())
}
