//! Prerequisite planning engine.
//!
//! - [`prereq`]: expansion and splitting of boolean requirement trees.
//! - [`layout`]: transitive closure, semester layering and vertical ordering.
//! - [`session`]: the working plan and its single-writer controller.
//! - [`plan_file`]: `plan.toml` parsing.

pub mod layout;
pub mod plan_file;
pub mod prereq;
pub mod session;
pub mod source;

pub use session::{PlanController, PlanLayout, PlanSession};
pub use source::{JsonFileSource, PrereqSource, StaticSource};
