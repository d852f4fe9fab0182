//! The working plan.
//!
//! A [`PlanSession`] is an immutable value: every edit returns a new
//! session. [`compute_layout`] derives the full [`PlanLayout`] from a session
//! from scratch, so the same session always lays out the same way.
//! [`PlanController`] owns the current session and its layout.

mod controller;

use std::collections::BTreeSet;

use gradpath_catalog::Catalog;
use serde::{Deserialize, Serialize};

use crate::layout::{assign_semesters, full_prereq_tree, order_within_semesters, unassigned};

pub use controller::PlanController;

/// Courses in the plan and which of them are already taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSession {
    pub active: BTreeSet<String>,
    pub completed: BTreeSet<String>,
}

impl PlanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` together with its whole prerequisite closure.
    ///
    /// Ids the catalog does not know are added with no prerequisites.
    pub fn with_course(&self, id: &str, catalog: &Catalog) -> Self {
        let mut next = self.clone();
        next.active.extend(full_prereq_tree(id, catalog.rules()));
        next
    }

    pub fn cleared(&self) -> Self {
        Self::default()
    }

    /// Flip the completed flag of an active course. Inactive ids are ignored.
    pub fn with_toggled(&self, id: &str) -> Self {
        let mut next = self.clone();
        if !next.active.contains(id) {
            return next;
        }
        if !next.completed.remove(id) {
            next.completed.insert(id.to_string());
        }
        next
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// One course as placed in the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    /// Catalog title, or the id when the catalog has no metadata.
    pub name: String,
    pub credits: u32,
    /// 0 for completed courses.
    pub semester: u32,
    pub vertical_index: usize,
    pub completed: bool,
    /// Set when the course sits on a prerequisite cycle and its semester
    /// is a placeholder.
    pub unresolved: bool,
}

/// Prerequisite edge, `source` before `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
}

/// Everything a renderer needs to draw a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLayout {
    /// Sorted by semester, then vertical index.
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    /// Courses no topological order could place.
    pub unassigned: Vec<String>,
}

impl PlanLayout {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Highest semester in the layout, 0 when empty.
    pub fn semester_count(&self) -> u32 {
        self.nodes.iter().map(|n| n.semester).max().unwrap_or(0)
    }

    /// Node ids of one semester, top to bottom.
    pub fn semester(&self, semester: u32) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.semester == semester)
            .map(|n| n.id.as_str())
            .collect()
    }
}

/// Lay out `session` against `catalog`.
///
/// Courses left unplaced by a prerequisite cycle are put in semester 1 and
/// flagged `unresolved` so the plan still renders.
pub fn compute_layout(session: &PlanSession, catalog: &Catalog) -> PlanLayout {
    let rules = catalog.rules();
    let completed: BTreeSet<String> = session
        .completed
        .intersection(&session.active)
        .cloned()
        .collect();

    let mut semesters = assign_semesters(&session.active, rules, Some(&completed));
    let missing = unassigned(&session.active, &semesters);
    if !missing.is_empty() {
        tracing::warn!(
            courses = ?missing,
            "prerequisite cycle detected; placing courses in semester 1"
        );
        for id in &missing {
            semesters.insert(id.clone(), 1);
        }
    }

    let positions = order_within_semesters(&semesters, rules);

    let mut nodes: Vec<LayoutNode> = semesters
        .iter()
        .map(|(id, semester)| {
            let info = catalog.info(id);
            LayoutNode {
                id: id.clone(),
                name: info.map_or_else(|| id.clone(), |i| i.name.clone()),
                credits: info.map_or(0, |i| i.credits),
                semester: *semester,
                vertical_index: positions.get(id).copied().unwrap_or_default(),
                completed: completed.contains(id),
                unresolved: missing.contains(id),
            }
        })
        .collect();
    nodes.sort_by_key(|n| (n.semester, n.vertical_index));

    let mut edges = Vec::new();
    for target in &session.active {
        let mut seen = BTreeSet::new();
        for source in catalog.prereqs_of(target) {
            if session.active.contains(source) && seen.insert(source) {
                edges.push(LayoutEdge {
                    source: source.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    tracing::debug!(
        courses = nodes.len(),
        edges = edges.len(),
        unresolved = missing.len(),
        "plan laid out"
    );

    PlanLayout {
        nodes,
        edges,
        unassigned: missing,
    }
}
