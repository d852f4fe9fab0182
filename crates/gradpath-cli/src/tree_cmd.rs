//! `gradpath tree`: expand a course's requirement tree and print it.

use anyhow::{Result, bail};
use std::fmt::Write;

use gradpath_core::PrereqSource;
use gradpath_core::layout::assign_tree_semesters;
use gradpath_core::prereq::{
    expand_course, split_prereq_tree_capped, visualize_prereq_tree, visualize_with_semesters,
};

/// Default cap on printed alternatives.
pub const DEFAULT_MAX_SPLITS: usize = 16;

#[derive(Debug)]
pub struct TreeArgs {
    pub course: String,
    pub split: bool,
    pub semesters: bool,
    pub max_splits: usize,
}

pub async fn run_tree(source: &dyn PrereqSource, args: &TreeArgs) -> Result<()> {
    print!("{}", render_tree(source, args).await?);
    Ok(())
}

pub async fn render_tree(source: &dyn PrereqSource, args: &TreeArgs) -> Result<String> {
    let Some(tree) = expand_course(&args.course, source).await else {
        bail!("course {} has no prerequisite tree", args.course);
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}: {tree}", args.course);
    out.push('\n');

    if args.semesters {
        let assigned = assign_tree_semesters(&tree);
        out.push_str(&visualize_with_semesters(&tree, &assigned.semesters));
        let _ = writeln!(
            out,
            "\n{} semesters before {} (longest alternative)",
            assigned.max_semester, args.course
        );
    } else {
        out.push_str(&visualize_prereq_tree(&tree));
    }

    if args.split {
        // One extra to tell whether the cap cut anything off.
        let mut splits = split_prereq_tree_capped(&tree, args.max_splits.saturating_add(1));
        let truncated = splits.len() > args.max_splits;
        splits.truncate(args.max_splits);

        let _ = writeln!(out, "\nAlternatives:");
        for (i, alternative) in splits.iter().enumerate() {
            // Each alternative is laid out on its own.
            let length = assign_tree_semesters(alternative).max_semester;
            let _ = writeln!(
                out,
                "  {}. {} ({length} semesters)",
                i + 1,
                alternative.course_ids().join(", ")
            );
        }
        if truncated {
            let _ = writeln!(out, "  ... (showing first {})", args.max_splits);
        }
    }

    Ok(out)
}
