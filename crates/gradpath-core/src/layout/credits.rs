use std::collections::BTreeMap;

use serde::Serialize;

use crate::session::PlanLayout;

/// Credit totals for a laid-out plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreditSummary {
    pub total: u32,
    /// Credits already earned (semester 0).
    pub completed: u32,
    pub remaining: u32,
    pub per_semester: BTreeMap<u32, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_credits: Option<u32>,
}

impl CreditSummary {
    /// `None` when no minimum was given.
    pub fn meets_minimum(&self) -> Option<bool> {
        self.min_credits.map(|min| self.total >= min)
    }
}

/// Sum credits over every node of `plan`.
pub fn credit_summary(plan: &PlanLayout, min_credits: Option<u32>) -> CreditSummary {
    let mut summary = CreditSummary {
        min_credits,
        ..Default::default()
    };
    for node in &plan.nodes {
        summary.total += node.credits;
        if node.completed {
            summary.completed += node.credits;
        }
        *summary.per_semester.entry(node.semester).or_default() += node.credits;
    }
    summary.remaining = summary.total - summary.completed;
    summary
}
