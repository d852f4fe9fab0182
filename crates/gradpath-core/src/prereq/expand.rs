//! Recursive expansion of a requirement tree.
//!
//! Every course leaf is replaced by `and[<its own expanded tree>, <leaf>]`
//! until the leaves are courses without further prerequisites. A course id
//! seen twice on the same path is left as a leaf, which breaks catalog
//! cycles. Each branch carries its own copy of the visited set, so sibling
//! branches that share an ancestor course do not cut each other short.

use std::collections::BTreeSet;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};

use gradpath_catalog::Prerequisite;

use crate::source::PrereqSource;

/// Expand `tree` from an empty visited set with no owning course.
pub async fn expand_prereq_tree(tree: &Prerequisite, source: &dyn PrereqSource) -> Prerequisite {
    expand_with(tree.clone(), source, BTreeSet::new(), Vec::new()).await
}

/// Look up `course_id`'s own tree and expand it.
///
/// Returns `None` when the course has no prerequisites at all.
pub async fn expand_course(course_id: &str, source: &dyn PrereqSource) -> Option<Prerequisite> {
    let tree = source.fetch_prereq_tree(course_id).await?;
    Some(expand_prereq_tree(&tree, source).await)
}

/// Expand `tree` given the ids already visited on this path and the chain
/// of courses the tree belongs to, nearest first.
///
/// Leaves get the nearest owner as `parent` and the whole chain as
/// `parents`. Sibling lookups are dispatched together and joined before the
/// parent node is rebuilt.
pub fn expand_with<'a>(
    tree: Prerequisite,
    source: &'a dyn PrereqSource,
    mut visited: BTreeSet<String>,
    owners: Vec<String>,
) -> BoxFuture<'a, Prerequisite> {
    async move {
        match tree {
            Prerequisite::Course(mut leaf) => {
                if let Some(nearest) = owners.first() {
                    leaf.parent = Some(nearest.clone());
                    leaf.parents = owners.clone();
                }

                if !visited.insert(leaf.course.clone()) {
                    tracing::debug!(course = %leaf.course, "prerequisite cycle, keeping course as leaf");
                    return Prerequisite::Course(leaf);
                }

                match source.fetch_prereq_tree(&leaf.course).await {
                    Some(own) => {
                        leaf.prerequisites = own.course_ids();
                        let mut chain = Vec::with_capacity(owners.len() + 1);
                        chain.push(leaf.course.clone());
                        chain.extend(owners);
                        let expanded = expand_with(own, source, visited, chain).await;
                        Prerequisite::and(vec![expanded, Prerequisite::Course(leaf)])
                    }
                    None => Prerequisite::Course(leaf),
                }
            }
            Prerequisite::And { children } => {
                let children = expand_children(children, source, &visited, &owners).await;
                collapse(children).unwrap_or_else(|children| Prerequisite::And { children })
            }
            Prerequisite::Or { children } => {
                let children = expand_children(children, source, &visited, &owners).await;
                collapse(children).unwrap_or_else(|children| Prerequisite::Or { children })
            }
        }
    }
    .boxed()
}

async fn expand_children(
    children: Vec<Prerequisite>,
    source: &dyn PrereqSource,
    visited: &BTreeSet<String>,
    owners: &[String],
) -> Vec<Prerequisite> {
    join_all(
        children
            .into_iter()
            .map(|child| expand_with(child, source, visited.clone(), owners.to_vec())),
    )
    .await
}

/// A single child replaces its `and`/`or` wrapper.
fn collapse(mut children: Vec<Prerequisite>) -> Result<Prerequisite, Vec<Prerequisite>> {
    if children.len() == 1 {
        Ok(children.remove(0))
    } else {
        Err(children)
    }
}
