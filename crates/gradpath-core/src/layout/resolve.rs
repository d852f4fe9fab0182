//! Transitive prerequisite closure over the flat rule table.

use std::collections::BTreeSet;

use gradpath_catalog::PrereqRules;

/// `course_id` plus every course reachable through prerequisite edges.
///
/// Depth-first with a visited set: a course already collected is not
/// expanded again, which handles both diamonds and cycles. Ids without a
/// rule entry have no prerequisites.
pub fn full_prereq_tree(course_id: &str, rules: &PrereqRules) -> BTreeSet<String> {
    let mut tree = BTreeSet::new();
    let mut stack = vec![course_id.to_string()];

    while let Some(id) = stack.pop() {
        if tree.contains(&id) {
            continue;
        }
        if let Some(prereqs) = rules.get(&id) {
            // Reverse keeps the walk in listed order.
            stack.extend(
                prereqs
                    .iter()
                    .rev()
                    .filter(|p| !tree.contains(*p))
                    .cloned(),
            );
        }
        tree.insert(id);
    }

    tree
}
