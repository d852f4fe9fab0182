//! `plan.toml` files: a named list of required courses plus the ones
//! already completed.

pub mod parser;
pub mod toml_format;

pub use parser::{PlanParseError, parse_plan_toml};
pub use toml_format::{CoursesToml, PlanMeta, PlanToml};
