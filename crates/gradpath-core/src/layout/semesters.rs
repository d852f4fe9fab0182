//! Semester assignment by level-synchronous topological layering.
//!
//! Kahn's algorithm over the prerequisite graph restricted to the active
//! set: every course whose prerequisites are all placed is assigned the
//! current semester at once, then the counter advances. A course lands one
//! semester after its latest active prerequisite.

use std::collections::{BTreeMap, BTreeSet};

use gradpath_catalog::PrereqRules;

/// Assign a semester to every course in `active`.
///
/// With a `completed` set, completed courses get semester 0 and count as
/// already satisfied: edges into them are dropped and they add nothing to
/// their dependents' in-degree, so the remaining courses start at 1.
///
/// Courses on an unresolvable cycle never reach in-degree 0 and are left
/// out of the map; see [`unassigned`].
pub fn assign_semesters(
    active: &BTreeSet<String>,
    rules: &PrereqRules,
    completed: Option<&BTreeSet<String>>,
) -> BTreeMap<String, u32> {
    let is_completed = |id: &str| completed.is_some_and(|c| c.contains(id));

    let mut semesters: BTreeMap<String, u32> = active
        .iter()
        .filter(|id| is_completed(id))
        .map(|id| (id.clone(), 0))
        .collect();

    // Build adjacency list and in-degree map over the pending courses.
    let mut in_degree: BTreeMap<&str, usize> = active
        .iter()
        .filter(|id| !is_completed(id))
        .map(|id| (id.as_str(), 0))
        .collect();
    let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    let pending: Vec<&str> = in_degree.keys().copied().collect();
    for id in pending {
        let mut seen = BTreeSet::new();
        for prereq in rules.get(id).into_iter().flatten() {
            let prereq = prereq.as_str();
            // Edge: prereq -> id, only between pending courses.
            if !in_degree.contains_key(prereq) || !seen.insert(prereq) {
                continue;
            }
            dependents.entry(prereq).or_default().push(id);
            if let Some(deg) = in_degree.get_mut(id) {
                *deg += 1;
            }
        }
    }

    // Kahn's algorithm, one level per semester.
    let mut level: Vec<&str> = in_degree
        .iter()
        .filter(|(_, deg)| **deg == 0)
        .map(|(id, _)| *id)
        .collect();
    let mut semester = 1u32;

    while !level.is_empty() {
        let mut next = Vec::new();
        for id in level {
            semesters.insert(id.to_string(), semester);
            for dependent in dependents.get(id).into_iter().flatten() {
                if let Some(deg) = in_degree.get_mut(dependent) {
                    *deg -= 1;
                    if *deg == 0 {
                        next.push(*dependent);
                    }
                }
            }
        }
        next.sort_unstable();
        level = next;
        semester += 1;
    }

    semesters
}

/// Active courses missing from `semesters`, sorted.
///
/// A non-empty result means the active set contains a prerequisite cycle
/// (or a course downstream of one).
pub fn unassigned(active: &BTreeSet<String>, semesters: &BTreeMap<String, u32>) -> Vec<String> {
    active
        .iter()
        .filter(|id| !semesters.contains_key(*id))
        .cloned()
        .collect()
}
