use std::sync::Arc;

use gradpath_catalog::Catalog;
use tokio::sync::Mutex;
use tracing::info;

use super::{PlanLayout, PlanSession, compute_layout};

/// Searches shorter than this match every course.
const MIN_SEARCH_LEN: usize = 2;

struct State {
    session: PlanSession,
    layout: PlanLayout,
}

/// Single writer for the current plan.
///
/// Each mutation builds the next session, lays it out, and swaps both in
/// while holding one lock, so readers never see a session paired with a
/// stale layout. Mutations return the pair they installed, which a later
/// writer cannot have touched.
pub struct PlanController {
    catalog: Arc<Catalog>,
    state: Mutex<State>,
}

impl std::fmt::Debug for PlanController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanController").finish_non_exhaustive()
    }
}

impl PlanController {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_session(catalog, PlanSession::new())
    }

    /// Start from an existing session, e.g. one read from a plan file.
    pub fn with_session(catalog: Arc<Catalog>, session: PlanSession) -> Self {
        let layout = compute_layout(&session, &catalog);
        Self {
            catalog,
            state: Mutex::new(State { session, layout }),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Add a course and its prerequisite closure.
    pub async fn add_course(&self, id: &str) -> (PlanSession, PlanLayout) {
        let mut state = self.state.lock().await;
        let next = state.session.with_course(id, &self.catalog);
        info!(course = id, added = next.active.len() - state.session.active.len(), "course added");
        self.replace(&mut state, next)
    }

    pub async fn clear(&self) -> (PlanSession, PlanLayout) {
        let mut state = self.state.lock().await;
        let next = state.session.cleared();
        info!("plan cleared");
        self.replace(&mut state, next)
    }

    /// Flip a course's completed mark.
    ///
    /// Returns `None` and changes nothing when the course is not active.
    pub async fn toggle_completed(&self, id: &str) -> Option<(PlanSession, PlanLayout)> {
        let mut state = self.state.lock().await;
        if !state.session.active.contains(id) {
            tracing::debug!(course = id, "toggle ignored; course not in plan");
            return None;
        }
        let next = state.session.with_toggled(id);
        Some(self.replace(&mut state, next))
    }

    /// Current session and layout, taken under the same lock.
    pub async fn snapshot(&self) -> (PlanSession, PlanLayout) {
        let state = self.state.lock().await;
        (state.session.clone(), state.layout.clone())
    }

    pub async fn layout(&self) -> PlanLayout {
        self.state.lock().await.layout.clone()
    }

    /// Catalog ids not yet in the plan, sorted.
    ///
    /// With a search of at least two characters, only ids or names that
    /// contain it (case-insensitively) are returned.
    pub async fn available_courses(&self, search: Option<&str>) -> Vec<String> {
        let active = self.state.lock().await.session.active.clone();
        let needle = search
            .map(str::trim)
            .filter(|s| s.chars().count() >= MIN_SEARCH_LEN)
            .map(str::to_lowercase);

        self.catalog
            .course_ids()
            .into_iter()
            .filter(|id| !active.contains(id))
            .filter(|id| match &needle {
                None => true,
                Some(needle) => {
                    id.to_lowercase().contains(needle)
                        || self
                            .catalog
                            .info(id)
                            .is_some_and(|i| i.name.to_lowercase().contains(needle))
                }
            })
            .collect()
    }

    fn replace(&self, state: &mut State, session: PlanSession) -> (PlanSession, PlanLayout) {
        let layout = compute_layout(&session, &self.catalog);
        state.session = session.clone();
        state.layout = layout.clone();
        (session, layout)
    }
}
