//! Plan layout: which courses a plan needs, which semester each lands in,
//! and where each sits within its semester column.

pub mod credits;
pub mod graph;
pub mod ordering;
pub mod resolve;
pub mod semesters;
pub mod tree_semesters;

pub use credits::{CreditSummary, credit_summary};
pub use graph::{GraphData, GraphEdge, GraphNode, GridConfig, build_graph};
pub use ordering::order_within_semesters;
pub use resolve::full_prereq_tree;
pub use semesters::{assign_semesters, unassigned};
pub use tree_semesters::{TreeSemesters, assign_tree_semesters};
