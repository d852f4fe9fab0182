//! Rewriting a requirement tree into OR-free alternatives.
//!
//! - `course` -> one alternative (the leaf itself).
//! - `or` -> the alternatives of every child, concatenated.
//! - `and` -> the cartesian product of the children's alternatives, each
//!   combination wrapped in a new `and` in original child order.
//!
//! The result grows multiplicatively with nested choices. Callers that need a
//! bound use [`split_prereq_tree_capped`].

use gradpath_catalog::Prerequisite;

/// Every concrete way to satisfy `tree`, as OR-free trees.
pub fn split_prereq_tree(tree: &Prerequisite) -> Vec<Prerequisite> {
    match tree {
        Prerequisite::Course(_) => vec![tree.clone()],
        Prerequisite::Or { children } => children.iter().flat_map(split_prereq_tree).collect(),
        Prerequisite::And { children } => {
            let per_child: Vec<Vec<Prerequisite>> = children.iter().map(split_prereq_tree).collect();
            cartesian_product(&per_child)
                .into_iter()
                .map(Prerequisite::and)
                .collect()
        }
    }
}

/// Like [`split_prereq_tree`] but stops after `limit` alternatives.
///
/// Alternatives are produced in the same order as the uncapped split; the
/// first `limit` are returned. Intermediate results are capped too, so a
/// tree with a huge number of combinations never materializes them.
pub fn split_prereq_tree_capped(tree: &Prerequisite, limit: usize) -> Vec<Prerequisite> {
    if limit == 0 {
        return Vec::new();
    }
    match tree {
        Prerequisite::Course(_) => vec![tree.clone()],
        Prerequisite::Or { children } => {
            let mut out = Vec::new();
            for child in children {
                if out.len() >= limit {
                    break;
                }
                out.extend(split_prereq_tree_capped(child, limit - out.len()));
            }
            out
        }
        Prerequisite::And { children } => {
            let per_child: Vec<Vec<Prerequisite>> = children
                .iter()
                .map(|child| split_prereq_tree_capped(child, limit))
                .collect();
            let mut combos: Vec<Vec<Prerequisite>> = vec![Vec::new()];
            for options in &per_child {
                combos = combos
                    .iter()
                    .flat_map(|prefix| {
                        options.iter().map(move |option| {
                            let mut next = prefix.clone();
                            next.push(option.clone());
                            next
                        })
                    })
                    .take(limit)
                    .collect();
            }
            combos.into_iter().map(Prerequisite::and).collect()
        }
    }
}

fn cartesian_product(lists: &[Vec<Prerequisite>]) -> Vec<Vec<Prerequisite>> {
    lists.iter().fold(vec![Vec::new()], |acc, options| {
        acc.iter()
            .flat_map(|prefix| {
                options.iter().map(move |option| {
                    let mut next = prefix.clone();
                    next.push(option.clone());
                    next
                })
            })
            .collect()
    })
}
