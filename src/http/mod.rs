//! HTTP surface of the application.
//!
//! ```text
//! GET    /                     HTML task list
//! GET    /health               liveness check (public)
//! GET    /static/*             files from the static directory (public)
//! GET    /api/tasks            list, optional ?priority= or ?status=
//! POST   /api/tasks            create
//! GET    /api/tasks/{id}       fetch one
//! PUT    /api/tasks/{id}       partial update
//! DELETE /api/tasks/{id}       delete
//! PUT    /api/tasks/{id}/toggle flip completion
//! ```
//!
//! Everything except `/health` and `/static` sits behind basic
//! authentication when the state carries credentials.

use crate::db::tasks::Tasks;
use crate::libs::config::Credentials;
use axum::{middleware::from_fn_with_state, routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod auth;
pub mod error;
pub mod routes;

use error::ApiError;

/// Shared, immutable request state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub tasks: Tasks,
    pub credentials: Option<Arc<Credentials>>,
}

impl AppState {
    pub fn new(tasks: Tasks, credentials: Option<Credentials>) -> Self {
        AppState {
            tasks,
            credentials: credentials.map(Arc::new),
        }
    }
}

pub fn router(state: AppState, static_dir: &Path) -> Router {
    let protected = Router::new()
        .route("/", get(routes::index::index))
        .nest("/api", routes::tasks::router())
        .layer(from_fn_with_state(state.clone(), auth::require_basic_auth));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest_service("/static", ServeDir::new(static_dir))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs blocking store work off the async executor.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| ApiError::Internal(err.into()))?
        .map_err(ApiError::Internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct TestApp {
        _dir: TempDir,
        app: Router,
    }

    fn setup(credentials: Option<Credentials>) -> TestApp {
        let dir = TempDir::new().unwrap();
        let tasks = Tasks::new(dir.path().join("tasks.db"));
        tasks.init().unwrap();

        let static_dir = dir.path().join("static");
        std::fs::create_dir_all(static_dir.join("css")).unwrap();
        std::fs::write(static_dir.join("css/app.css"), "body {}").unwrap();

        let app = router(AppState::new(tasks, credentials), &static_dir);
        TestApp { _dir: dir, app }
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn create_toggle_delete_scenario() {
        let TestApp { app, .. } = &setup(None);

        let response = send(app, "POST", "/api/tasks", Some(json!({ "title": "Buy milk" }))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["title"], "Buy milk");
        assert_eq!(created["description"], "");
        assert_eq!(created["priority"], "medium");
        assert_eq!(created["due_date"], Value::Null);
        assert_eq!(created["completed"], false);
        assert!(created["created_at"].is_string());

        let response = send(app, "PUT", "/api/tasks/1/toggle", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["completed"], true);

        let response = send(app, "DELETE", "/api/tasks/1", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["message"], "Task deleted successfully");

        let response = send(app, "GET", "/api/tasks/1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn create_requires_title() {
        let TestApp { app, .. } = &setup(None);

        let response = send(app, "POST", "/api/tasks", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(app, "POST", "/api/tasks", Some(json!({ "description": "no title" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Title is required");

        let response = send(app, "GET", "/api/tasks", None).await;
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let TestApp { app, .. } = &setup(None);

        let body = json!({ "title": "Write report", "description": "Q3", "priority": "high", "due_date": "2030-01-01" });
        let created = json_body(send(app, "POST", "/api/tasks", Some(body)).await).await;

        let response = send(app, "PUT", "/api/tasks/1", Some(json!({ "completed": true, "due_date": null }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = json_body(response).await;
        assert_eq!(updated["completed"], true);
        assert_eq!(updated["title"], created["title"]);
        assert_eq!(updated["description"], "Q3");
        assert_eq!(updated["priority"], "high");
        assert_eq!(updated["due_date"], "2030-01-01");
        assert_eq!(updated["created_at"], created["created_at"]);
    }

    #[tokio::test]
    async fn update_rejects_blank_title() {
        let TestApp { app, .. } = &setup(None);
        send(app, "POST", "/api/tasks", Some(json!({ "title": "Keep me" }))).await;

        for title in ["", "   "] {
            let response = send(app, "PUT", "/api/tasks/1", Some(json!({ "title": title }))).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(response).await["error"], "Title is required");
        }

        let stored = json_body(send(app, "GET", "/api/tasks/1", None).await).await;
        assert_eq!(stored["title"], "Keep me");
    }

    #[tokio::test]
    async fn update_rejects_missing_body_and_unknown_id() {
        let TestApp { app, .. } = &setup(None);
        send(app, "POST", "/api/tasks", Some(json!({ "title": "A" }))).await;

        let response = send(app, "PUT", "/api/tasks/1", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(app, "PUT", "/api/tasks/99", Some(json!({ "title": "B" }))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(app, "PUT", "/api/tasks/99/toggle", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(app, "DELETE", "/api/tasks/99", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(app, "GET", "/api/tasks/abc", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filterable() {
        let TestApp { app, .. } = &setup(None);
        for (title, priority) in [("A", "low"), ("B", "high"), ("C", "high")] {
            send(app, "POST", "/api/tasks", Some(json!({ "title": title, "priority": priority }))).await;
        }
        send(app, "PUT", "/api/tasks/2/toggle", None).await;

        let titles = |tasks: Value| -> Vec<String> {
            tasks
                .as_array()
                .unwrap()
                .iter()
                .map(|task| task["title"].as_str().unwrap().to_string())
                .collect()
        };

        let all = json_body(send(app, "GET", "/api/tasks", None).await).await;
        assert_eq!(titles(all), ["C", "B", "A"]);

        let high = json_body(send(app, "GET", "/api/tasks?priority=high", None).await).await;
        assert_eq!(titles(high), ["C", "B"]);

        let completed = json_body(send(app, "GET", "/api/tasks?status=completed", None).await).await;
        assert_eq!(titles(completed), ["B"]);

        let pending = json_body(send(app, "GET", "/api/tasks?status=pending", None).await).await;
        assert_eq!(titles(pending), ["C", "A"]);

        let response = send(app, "GET", "/api/tasks?priority=high&status=pending", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_is_public() {
        let TestApp { app, .. } = &setup(Some(Credentials::new("alice", "s3cret")));

        let response = send(app, "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({ "status": "healthy", "message": "TaskMaster API is running" })
        );
    }

    #[tokio::test]
    async fn static_files_are_public() {
        let TestApp { app, .. } = &setup(Some(Credentials::new("alice", "s3cret")));

        let response = send(app, "GET", "/static/css/app.css", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn api_requires_credentials_when_enabled() {
        let TestApp { app, .. } = &setup(Some(Credentials::new("alice", "s3cret")));

        for uri in ["/", "/api/tasks"] {
            let response = send(app, "GET", uri, None).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(response.headers()[header::WWW_AUTHENTICATE], r#"Basic realm="Login Required""#);
        }

        let wrong = Request::builder()
            .uri("/api/tasks")
            .header(header::AUTHORIZATION, format!("Basic {}", STANDARD.encode("alice:wrong")))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(wrong).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let right = Request::builder()
            .uri("/api/tasks")
            .header(header::AUTHORIZATION, format!("Basic {}", STANDARD.encode("alice:s3cret")))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(right).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn index_renders_tasks() {
        let TestApp { app, .. } = &setup(None);
        send(app, "POST", "/api/tasks", Some(json!({ "title": "Water <plants>" }))).await;

        let response = send(app, "GET", "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Water &lt;plants&gt;"));
        assert!(html.contains(r#"<span id="totalTasks">1</span>"#));
    }
}
