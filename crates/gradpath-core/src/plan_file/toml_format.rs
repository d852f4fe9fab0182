//! TOML format types for plan files.
//!
//! These types map directly to the `plan.toml` on-disk format and are
//! deserialized via `serde` + the `toml` crate.

use gradpath_catalog::Catalog;
use serde::{Deserialize, Serialize};

use crate::session::PlanSession;

/// Top-level structure of a `plan.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanToml {
    pub plan: PlanMeta,
    pub courses: CoursesToml,
}

/// Plan-level metadata in `[plan]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanMeta {
    /// Human-readable plan name.
    pub name: String,
    /// Credits needed to graduate. Absent means no check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_credits: Option<u32>,
}

/// The `[courses]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoursesToml {
    /// Target courses. Their prerequisites are pulled in automatically.
    #[serde(default)]
    pub required: Vec<String>,
    /// Courses already taken.
    #[serde(default)]
    pub completed: Vec<String>,
}

impl PlanToml {
    /// Build a session from the plan against `catalog`.
    ///
    /// Completed ids that are not part of the resulting plan are skipped.
    pub fn to_session(&self, catalog: &Catalog) -> PlanSession {
        let mut session = self
            .courses
            .required
            .iter()
            .fold(PlanSession::new(), |session, id| session.with_course(id, catalog));

        for id in &self.courses.completed {
            if session.completed.contains(id) {
                continue;
            }
            if session.active.contains(id) {
                session = session.with_toggled(id);
            } else {
                tracing::warn!(course = %id, plan = %self.plan.name, "completed course is not part of the plan; ignoring");
            }
        }
        session
    }
}
