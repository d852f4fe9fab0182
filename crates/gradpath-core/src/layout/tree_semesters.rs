//! Semester assignment over an expanded requirement tree.
//!
//! Works from the leaves up through the `parent` annotation left by
//! expansion: courses that own no other course start in semester 1, and a
//! course is placed one level later once every course it owns is placed.
//! Each course has at most one recorded parent (the last one seen), unlike
//! the multi-parent graph used by [`super::assign_semesters`].

use std::collections::{BTreeMap, BTreeSet};

use gradpath_catalog::Prerequisite;

/// Result of [`assign_tree_semesters`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeSemesters {
    pub semesters: BTreeMap<String, u32>,
    /// Highest semester assigned; 0 when nothing could be placed.
    pub max_semester: u32,
}

#[derive(Default)]
struct Ownership {
    /// Course ids in first-seen order.
    courses: Vec<String>,
    parent_of: BTreeMap<String, String>,
    children_of: BTreeMap<String, BTreeSet<String>>,
}

impl Ownership {
    fn collect(&mut self, node: &Prerequisite) {
        match node {
            Prerequisite::Course(leaf) => {
                if !self.courses.contains(&leaf.course) {
                    self.courses.push(leaf.course.clone());
                }
                if let Some(parent) = &leaf.parent {
                    self.parent_of.insert(leaf.course.clone(), parent.clone());
                    self.children_of
                        .entry(parent.clone())
                        .or_default()
                        .insert(leaf.course.clone());
                }
            }
            Prerequisite::And { children } | Prerequisite::Or { children } => {
                for child in children {
                    self.collect(child);
                }
            }
        }
    }
}

/// Assign semesters to the courses of an expanded tree.
///
/// Courses whose ownership chain loops back on itself (possible after a
/// cycle was cut during expansion) are never released and stay unassigned.
pub fn assign_tree_semesters(tree: &Prerequisite) -> TreeSemesters {
    let mut own = Ownership::default();
    own.collect(tree);

    let mut queue: Vec<String> = own
        .courses
        .iter()
        .filter(|c| !own.children_of.contains_key(*c))
        .cloned()
        .collect();

    let mut semesters = BTreeMap::new();
    let mut placed: BTreeSet<String> = BTreeSet::new();
    let mut semester = 1u32;

    while !queue.is_empty() {
        let mut next = Vec::new();
        for course in queue {
            if !placed.insert(course.clone()) {
                continue;
            }
            semesters.insert(course.clone(), semester);

            let Some(parent) = own.parent_of.get(&course) else {
                continue;
            };
            if placed.contains(parent) {
                continue;
            }
            let ready = own
                .children_of
                .get(parent)
                .is_none_or(|kids| kids.iter().all(|k| placed.contains(k)));
            if ready {
                next.push(parent.clone());
            }
        }
        queue = next;
        semester += 1;
    }

    let max_semester = semesters.values().copied().max().unwrap_or(0);
    TreeSemesters {
        semesters,
        max_semester,
    }
}
