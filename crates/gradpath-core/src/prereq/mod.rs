//! Boolean requirement trees: expansion, splitting into OR-free
//! alternatives, and text rendering.

pub mod expand;
pub mod split;
pub mod visualize;

pub use expand::{expand_course, expand_prereq_tree, expand_with};
pub use split::{split_prereq_tree, split_prereq_tree_capped};
pub use visualize::{visualize_prereq_tree, visualize_with_semesters};
