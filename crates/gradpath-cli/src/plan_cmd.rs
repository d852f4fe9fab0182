//! `gradpath plan`, `gradpath closure` and `gradpath courses`.

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use gradpath_catalog::Catalog;
use gradpath_core::layout::{CreditSummary, credit_summary, full_prereq_tree};
use gradpath_core::plan_file::parse_plan_toml;
use gradpath_core::session::compute_layout;
use gradpath_core::{PlanLayout, PlanSession};

/// Inputs of `gradpath plan`.
#[derive(Debug, Default)]
pub struct PlanArgs {
    pub courses: Vec<String>,
    pub file: Option<PathBuf>,
    pub completed: Vec<String>,
    pub min_credits: Option<u32>,
    pub json: bool,
}

/// JSON shape of `gradpath plan --json`.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub name: String,
    pub layout: PlanLayout,
    pub credits: CreditSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meets_minimum: Option<bool>,
}

pub fn run_plan(catalog: &Catalog, args: &PlanArgs) -> Result<()> {
    let report = build_report(catalog, args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

/// Merge the plan file (if any) with course ids and completed marks from
/// the command line, then lay the result out.
pub fn build_report(catalog: &Catalog, args: &PlanArgs) -> Result<PlanReport> {
    let mut name = "plan".to_string();
    let mut min_credits = args.min_credits;
    let mut session = PlanSession::new();

    if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plan file {}", path.display()))?;
        let plan = parse_plan_toml(&content)
            .with_context(|| format!("invalid plan file {}", path.display()))?;
        session = plan.to_session(catalog);
        name = plan.plan.name;
        min_credits = min_credits.or(plan.plan.min_credits);
    }

    for id in &args.courses {
        if !catalog.contains(id) {
            tracing::warn!(course = %id, "course not in catalog; adding without prerequisites");
        }
        session = session.with_course(id, catalog);
    }
    for id in &args.completed {
        if session.completed.contains(id) {
            continue;
        }
        if !session.active.contains(id) {
            tracing::warn!(course = %id, "completed course is not part of the plan; ignoring");
            continue;
        }
        session = session.with_toggled(id);
    }

    if session.is_empty() {
        bail!("no courses given; pass course ids or --file <plan.toml>");
    }

    let layout = compute_layout(&session, catalog);
    let credits = credit_summary(&layout, min_credits);
    Ok(PlanReport {
        name,
        meets_minimum: credits.meets_minimum(),
        layout,
        credits,
    })
}

/// Human-readable semester table.
pub fn render_report(report: &PlanReport) -> String {
    let layout = &report.layout;
    let mut out = String::new();
    let _ = writeln!(out, "Plan: {}", report.name);

    let first = if layout.nodes.iter().any(|n| n.completed) { 0 } else { 1 };
    for semester in first..=layout.semester_count() {
        let credits = report.credits.per_semester.get(&semester).copied().unwrap_or(0);
        if semester == 0 {
            let _ = writeln!(out, "\nCompleted ({credits} credits)");
        } else {
            let _ = writeln!(out, "\nSemester {semester} ({credits} credits)");
        }
        for id in layout.semester(semester) {
            let Some(node) = layout.node(id) else {
                continue;
            };
            let flag = if node.unresolved { "  [cycle]" } else { "" };
            let _ = writeln!(out, "  {:<10} {} ({} cr){flag}", node.id, node.name, node.credits);
        }
    }

    if !layout.unassigned.is_empty() {
        let _ = writeln!(
            out,
            "\nUnresolved prerequisite cycle: {}",
            layout.unassigned.join(", ")
        );
    }

    let credits = &report.credits;
    let _ = writeln!(
        out,
        "\nCredits: {} total, {} completed, {} remaining",
        credits.total, credits.completed, credits.remaining
    );
    if let (Some(min), Some(met)) = (credits.min_credits, report.meets_minimum) {
        let verdict = if met { "met" } else { "not met" };
        let _ = writeln!(out, "Minimum of {min} credits: {verdict}");
    }
    out
}

/// Print the flat prerequisite closure of `course`, one id per line.
pub fn run_closure(catalog: &Catalog, course: &str) -> Result<()> {
    if !catalog.contains(course) {
        bail!("course {course} not found in catalog");
    }
    for id in full_prereq_tree(course, catalog.rules()) {
        match catalog.info(&id) {
            Some(info) => println!("{id}  {}", info.name),
            None => println!("{id}"),
        }
    }
    Ok(())
}

/// Print catalog courses, optionally filtered by a search string.
pub async fn run_courses(catalog: std::sync::Arc<Catalog>, search: Option<&str>) -> Result<()> {
    let controller = gradpath_core::PlanController::new(catalog);
    let ids = controller.available_courses(search).await;
    if ids.is_empty() {
        println!("No matching courses.");
        return Ok(());
    }
    for id in &ids {
        match controller.catalog().info(id) {
            Some(info) => println!("{id:<10} {} ({} cr)", info.name, info.credits),
            None => println!("{id}"),
        }
    }
    Ok(())
}
