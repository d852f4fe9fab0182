use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Course metadata
// ---------------------------------------------------------------------------

/// Descriptive metadata for a single catalog course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CourseInfo {
    /// Human-readable title (e.g. "Calculus I").
    #[serde(default)]
    pub name: String,
    /// Credit hours. Catalog dumps sometimes encode this as a string.
    #[serde(default, deserialize_with = "credits_from_number_or_string")]
    pub credits: u32,
    #[serde(default)]
    pub description: String,
}

impl CourseInfo {
    pub fn new(name: impl Into<String>, credits: u32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credits,
            description: description.into(),
        }
    }
}

fn credits_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        // Ranges such as "1-3" keep the lower bound.
        Raw::Text(s) => {
            let head = s.trim().split(['-', ' ']).next().unwrap_or_default();
            head.parse::<u32>().map_err(serde::de::Error::custom)
        }
    }
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Flat prerequisite table: course id -> direct prerequisite ids, in order.
pub type PrereqRules = BTreeMap<String, Vec<String>>;

/// Boolean prerequisite table: course id -> requirement tree.
pub type TreeRules = BTreeMap<String, Prerequisite>;

// ---------------------------------------------------------------------------
// Prerequisite tree
// ---------------------------------------------------------------------------

/// A boolean requirement expression over course ids.
///
/// Serialized with an internal `type` tag so it matches the JSON rule table:
///
/// ```json
/// {"type": "and", "children": [{"type": "course", "course": "CMSC131"}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Prerequisite {
    Course(CourseLeaf),
    And { children: Vec<Prerequisite> },
    Or { children: Vec<Prerequisite> },
}

/// A `course` leaf plus the annotations added during expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseLeaf {
    pub course: String,
    /// Id of the course this requirement belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Course ids named directly in this course's own requirement tree.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,
    /// Every course this requirement is nested under, nearest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
}

impl CourseLeaf {
    pub fn new(course: impl Into<String>) -> Self {
        Self {
            course: course.into(),
            parent: None,
            prerequisites: Vec::new(),
            parents: Vec::new(),
        }
    }
}

impl Prerequisite {
    /// Build a bare `course` leaf.
    pub fn course(id: impl Into<String>) -> Self {
        Self::Course(CourseLeaf::new(id))
    }

    /// Build a `course` leaf annotated with its owning course.
    pub fn course_with_parent(id: impl Into<String>, parent: impl Into<String>) -> Self {
        let mut leaf = CourseLeaf::new(id);
        leaf.parent = Some(parent.into());
        Self::Course(leaf)
    }

    pub fn and(children: Vec<Prerequisite>) -> Self {
        Self::And { children }
    }

    pub fn or(children: Vec<Prerequisite>) -> Self {
        Self::Or { children }
    }

    /// The course id if this node is a leaf.
    pub fn course_id(&self) -> Option<&str> {
        match self {
            Self::Course(leaf) => Some(&leaf.course),
            _ => None,
        }
    }

    /// Children of an `and`/`or` node; empty for leaves.
    pub fn children(&self) -> &[Prerequisite] {
        match self {
            Self::Course(_) => &[],
            Self::And { children } | Self::Or { children } => children,
        }
    }

    /// Node label as it appears in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Course(_) => "course",
            Self::And { .. } => "and",
            Self::Or { .. } => "or",
        }
    }

    /// `true` when no `or` node appears anywhere in the tree.
    pub fn is_or_free(&self) -> bool {
        match self {
            Self::Course(_) => true,
            Self::Or { .. } => false,
            Self::And { children } => children.iter().all(Prerequisite::is_or_free),
        }
    }

    /// Distinct course ids in depth-first, first-seen order.
    pub fn course_ids(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        self.collect_ids(&mut out);
        out
    }

    /// Distinct course ids of the first OR-free way to satisfy the tree:
    /// the first child of every `or` that can be satisfied, every child of
    /// every `and`.
    ///
    /// Returns `None` when no alternative exists (an `or` with no
    /// satisfiable child).
    pub fn first_alternative(&self) -> Option<Vec<String>> {
        let mut out = Vec::new();
        self.collect_first(&mut out).then_some(out)
    }

    fn collect_first(&self, out: &mut Vec<String>) -> bool {
        match self {
            Self::Course(leaf) => {
                if !out.contains(&leaf.course) {
                    out.push(leaf.course.clone());
                }
                true
            }
            Self::And { children } => children.iter().all(|child| child.collect_first(out)),
            Self::Or { children } => {
                let mark = out.len();
                for child in children {
                    if child.collect_first(out) {
                        return true;
                    }
                    out.truncate(mark);
                }
                false
            }
        }
    }

    fn collect_ids(&self, out: &mut Vec<String>) {
        match self {
            Self::Course(leaf) => {
                if !out.contains(&leaf.course) {
                    out.push(leaf.course.clone());
                }
            }
            Self::And { children } | Self::Or { children } => {
                for child in children {
                    child.collect_ids(out);
                }
            }
        }
    }
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Course(leaf) => f.write_str(&leaf.course),
            Self::And { children } | Self::Or { children } => {
                let sep = if matches!(self, Self::And { .. }) {
                    " and "
                } else {
                    " or "
                };
                f.write_str("(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(sep)?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}
