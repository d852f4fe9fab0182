//! Text outline of a requirement tree.
//!
//! ```text
//! and
//!    ├─ and
//!    │  ├─ course: courseD (p: courseB)
//!    │  └─ course: courseB
//!    └─ course: courseC
//! ```

use std::collections::BTreeMap;
use std::fmt::Write;

use gradpath_catalog::Prerequisite;

/// Render `tree` as an indented outline, one node per line.
pub fn visualize_prereq_tree(tree: &Prerequisite) -> String {
    let mut out = String::new();
    render(tree, "", true, None, &mut out);
    out
}

/// Render `tree`, appending ` [s: N]` to each course that has a semester.
pub fn visualize_with_semesters(tree: &Prerequisite, semesters: &BTreeMap<String, u32>) -> String {
    let mut out = String::new();
    render(tree, "", true, Some(semesters), &mut out);
    out
}

fn render(
    node: &Prerequisite,
    indent: &str,
    is_last: bool,
    semesters: Option<&BTreeMap<String, u32>>,
    out: &mut String,
) {
    out.push_str(indent);
    if !indent.is_empty() {
        out.push_str(if is_last { "└─ " } else { "├─ " });
    }

    match node {
        Prerequisite::Course(leaf) => {
            let _ = write!(out, "course: {}", leaf.course);
            if let Some(parent) = &leaf.parent {
                let _ = write!(out, " (p: {parent})");
            }
            if let Some(semester) = semesters.and_then(|s| s.get(&leaf.course)) {
                let _ = write!(out, " [s: {semester}]");
            }
        }
        other => out.push_str(other.kind()),
    }
    out.push('\n');

    let children = node.children();
    if children.is_empty() {
        return;
    }
    let next_indent = format!("{indent}{}", if is_last { "   " } else { "│  " });
    for (i, child) in children.iter().enumerate() {
        render(child, &next_indent, i + 1 == children.len(), semesters, out);
    }
}
