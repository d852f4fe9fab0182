//! Vertical order within each semester column.
//!
//! One greedy barycenter pass, left to right: the first populated semester
//! is ordered by id, every later semester by the mean position of each
//! course's already-placed prerequisites. Courses with no placed
//! prerequisites go to the bottom. Scores closer than [`TIE_EPSILON`] are
//! ordered by id so the layout is deterministic.

use std::collections::BTreeMap;

use gradpath_catalog::PrereqRules;

/// Scores closer than this are treated as equal.
pub const TIE_EPSILON: f64 = 0.01;

/// Score for a course with no placed prerequisites.
const NO_PREREQ_SCORE: f64 = f64::MAX;

/// Assign a 0-based vertical index to every course in `semesters`.
pub fn order_within_semesters(
    semesters: &BTreeMap<String, u32>,
    rules: &PrereqRules,
) -> BTreeMap<String, usize> {
    let mut columns: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
    for (id, semester) in semesters {
        columns.entry(*semester).or_default().push(id);
    }

    let mut positions: BTreeMap<String, usize> = BTreeMap::new();
    for (column, (_, mut ids)) in columns.into_iter().enumerate() {
        if column == 0 {
            ids.sort_unstable();
        } else {
            let mut scored: Vec<(f64, &str)> = ids
                .iter()
                .map(|id| (barycenter(id, rules, &positions), *id))
                .collect();
            scored.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));
            ids = settle_ties(scored);
        }
        for (index, id) in ids.into_iter().enumerate() {
            positions.insert(id.to_string(), index);
        }
    }

    positions
}

/// Mean position of the course's prerequisites that already have one.
fn barycenter(id: &str, rules: &PrereqRules, positions: &BTreeMap<String, usize>) -> f64 {
    let placed: Vec<usize> = rules
        .get(id)
        .into_iter()
        .flatten()
        .filter_map(|p| positions.get(p).copied())
        .collect();
    if placed.is_empty() {
        return NO_PREREQ_SCORE;
    }
    placed.iter().sum::<usize>() as f64 / placed.len() as f64
}

/// Re-sort runs of near-equal scores by id. Input is sorted by score.
fn settle_ties(scored: Vec<(f64, &str)>) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::with_capacity(scored.len());
    let mut run: Vec<&str> = Vec::new();
    let mut prev: Option<f64> = None;

    for (score, id) in scored {
        if let Some(p) = prev {
            if score - p >= TIE_EPSILON {
                run.sort_unstable();
                out.append(&mut run);
            }
        }
        run.push(id);
        prev = Some(score);
    }
    run.sort_unstable();
    out.append(&mut run);
    out
}
