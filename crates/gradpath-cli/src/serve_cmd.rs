use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use gradpath_core::layout::{CreditSummary, GraphData, GridConfig, build_graph, credit_summary};
use gradpath_core::{PlanController, PlanLayout, PlanSession};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AddCourseRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct CourseQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CourseEntry {
    pub id: String,
    pub name: String,
    pub credits: u32,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub active: Vec<String>,
    pub completed: Vec<String>,
    pub layout: PlanLayout,
    pub credits: CreditSummary,
}

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<PlanController>,
    pub grid: GridConfig,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/courses", get(list_courses))
        .route("/api/plan", get(get_plan).delete(clear_plan))
        .route("/api/plan/courses", post(add_course))
        .route("/api/plan/completed/{id}", post(toggle_completed))
        .route("/api/graph", get(get_graph))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(state: AppState, bind: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("gradpath serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("gradpath serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index() -> Html<&'static str> {
    Html(
        "<!DOCTYPE html>\
<html><head><title>gradpath</title></head><body>\
<h1>gradpath</h1>\
<p><a href=\"/api/courses\">/api/courses</a> | <a href=\"/api/plan\">/api/plan</a> | \
<a href=\"/api/graph\">/api/graph</a></p>\
</body></html>",
    )
}

async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> Json<Vec<CourseEntry>> {
    let catalog = state.controller.catalog();
    let courses = state
        .controller
        .available_courses(query.search.as_deref())
        .await
        .into_iter()
        .map(|id| {
            let info = catalog.info(&id);
            CourseEntry {
                name: info.map_or_else(|| id.clone(), |i| i.name.clone()),
                credits: info.map_or(0, |i| i.credits),
                id,
            }
        })
        .collect();
    Json(courses)
}

async fn get_plan(State(state): State<AppState>) -> Json<PlanResponse> {
    let (session, layout) = state.controller.snapshot().await;
    Json(plan_response(session, layout))
}

async fn add_course(
    State(state): State<AppState>,
    Json(request): Json<AddCourseRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    let id = request.id.trim();
    if id.is_empty() {
        return Err(AppError::bad_request("course id must not be empty"));
    }
    if !state.controller.catalog().contains(id) {
        return Err(AppError::not_found(format!("course {id} not found")));
    }
    let (session, layout) = state.controller.add_course(id).await;
    Ok(Json(plan_response(session, layout)))
}

async fn clear_plan(State(state): State<AppState>) -> Json<PlanResponse> {
    let (session, layout) = state.controller.clear().await;
    Json(plan_response(session, layout))
}

async fn toggle_completed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlanResponse>, AppError> {
    let Some((session, layout)) = state.controller.toggle_completed(&id).await else {
        return Err(AppError::not_found(format!("course {id} is not in the plan")));
    };
    Ok(Json(plan_response(session, layout)))
}

async fn get_graph(State(state): State<AppState>) -> Json<GraphData> {
    let layout = state.controller.layout().await;
    Json(build_graph(&layout, &state.grid))
}

fn plan_response(session: PlanSession, layout: PlanLayout) -> PlanResponse {
    PlanResponse {
        active: session.active.into_iter().collect(),
        completed: session.completed.into_iter().collect(),
        credits: credit_summary(&layout, None),
        layout,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    use gradpath_core::PlanController;
    use gradpath_core::layout::GridConfig;
    use gradpath_test_utils::sample_catalog;

    use super::AppState;

    // -----------------------------------------------------------------------
    // HTTP helpers
    // -----------------------------------------------------------------------

    fn test_state() -> AppState {
        AppState {
            controller: Arc::new(PlanController::new(Arc::new(sample_catalog()))),
            grid: GridConfig::default(),
        }
    }

    async fn send(
        state: AppState,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> axum::response::Response {
        let app = super::build_router(state);
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        app.oneshot(request).await.unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1_048_576)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_index_returns_html() {
        let resp = send(test_state(), Method::GET, "/", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get("content-type")
            .expect("should have content-type header")
            .to_str()
            .unwrap();
        assert!(
            content_type.contains("text/html"),
            "content-type should contain text/html, got: {content_type}"
        );
    }

    #[tokio::test]
    async fn test_empty_plan() {
        let resp = send(test_state(), Method::GET, "/api/plan", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["active"], serde_json::json!([]));
        assert_eq!(json["layout"]["nodes"], serde_json::json!([]));
        assert_eq!(json["credits"]["total"], 0);
    }

    #[tokio::test]
    async fn test_add_course_pulls_in_prerequisites() {
        let state = test_state();
        let resp = send(
            state.clone(),
            Method::POST,
            "/api/plan/courses",
            Some(serde_json::json!({ "id": "MATH141" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["active"], serde_json::json!(["MATH140", "MATH141"]));

        let nodes = json["layout"]["nodes"].as_array().unwrap();
        assert_eq!(nodes[0]["id"], "MATH140");
        assert_eq!(nodes[0]["semester"], 1);
        assert_eq!(nodes[1]["id"], "MATH141");
        assert_eq!(nodes[1]["semester"], 2);
        assert_eq!(json["credits"]["total"], 8);

        // The course list no longer offers them.
        let resp = send(state, Method::GET, "/api/courses", None).await;
        let courses = body_json(resp).await;
        let ids: Vec<&str> = courses
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids.len(), 15);
        assert!(!ids.contains(&"MATH140"));
    }

    #[tokio::test]
    async fn test_add_unknown_course_is_404() {
        let resp = send(
            test_state(),
            Method::POST,
            "/api/plan/courses",
            Some(serde_json::json!({ "id": "CMSC999" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = body_json(resp).await;
        assert!(
            json["error"].as_str().unwrap().contains("CMSC999"),
            "error should name the course: {json}"
        );
    }

    #[tokio::test]
    async fn test_add_blank_course_is_400() {
        let resp = send(
            test_state(),
            Method::POST,
            "/api/plan/courses",
            Some(serde_json::json!({ "id": "  " })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_toggle_completed() {
        let state = test_state();
        state.controller.add_course("CMSC216").await;

        let resp = send(
            state.clone(),
            Method::POST,
            "/api/plan/completed/CMSC131",
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["completed"], serde_json::json!(["CMSC131"]));
        assert_eq!(json["credits"]["completed"], 4);

        // Toggling again restores it.
        let resp = send(state, Method::POST, "/api/plan/completed/CMSC131", None).await;
        let json = body_json(resp).await;
        assert_eq!(json["completed"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_add_response_is_the_state_it_produced() {
        let state = test_state();
        let resp = send(
            state.clone(),
            Method::POST,
            "/api/plan/courses",
            Some(serde_json::json!({ "id": "MATH140" })),
        )
        .await;
        let first = body_json(resp).await;

        state.controller.add_course("CMSC216").await;
        let resp = send(state, Method::POST, "/api/plan/completed/MATH140", None).await;
        let second = body_json(resp).await;

        assert_eq!(first["active"], serde_json::json!(["MATH140"]));
        assert_eq!(second["active"].as_array().unwrap().len(), 4);
        assert_eq!(second["completed"], serde_json::json!(["MATH140"]));
    }

    #[tokio::test]
    async fn test_toggle_inactive_course_is_404() {
        let resp = send(test_state(), Method::POST, "/api/plan/completed/CMSC131", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_clear_plan() {
        let state = test_state();
        state.controller.add_course("CMSC216").await;
        let resp = send(state.clone(), Method::DELETE, "/api/plan", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["active"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_graph_has_coordinates_and_edges() {
        let state = test_state();
        state.controller.add_course("MATH141").await;
        let resp = send(state, Method::GET, "/api/graph", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;

        let nodes = json["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["x"], 300.0);
        assert_eq!(nodes[0]["y"], 100.0);
        let edges = json["edges"].as_array().unwrap();
        assert_eq!(edges[0]["id"], "MATH140-MATH141");
    }

    #[tokio::test]
    async fn test_course_search() {
        let resp = send(test_state(), Method::GET, "/api/courses?search=calc", None).await;
        let json = body_json(resp).await;
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["name"], "Calculus I");
    }
}
