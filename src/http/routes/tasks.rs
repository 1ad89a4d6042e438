use crate::http::{error::ApiError, run_blocking, AppState};
use crate::libs::messages::Message;
use crate::libs::task::{Priority, Task, TaskFilter, TaskPatch};
use crate::msg_debug;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).put(update_task).delete(delete_task))
        .route("/tasks/{id}/toggle", put(toggle_task))
}

/// Optional filters of `GET /api/tasks`. At most one may be given.
#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl TaskQuery {
    pub fn into_filter(self) -> Result<TaskFilter, ApiError> {
        let priority = self.priority.filter(|value| !value.is_empty());
        let status = self.status.filter(|value| !value.is_empty());

        match (priority, status) {
            (Some(_), Some(_)) => Err(ApiError::validation(Message::ConflictingTaskFilters)),
            (Some(priority), None) => Ok(TaskFilter::Priority(Priority::from(priority))),
            (None, Some(status)) => match status.as_str() {
                "completed" => Ok(TaskFilter::Completed),
                "pending" => Ok(TaskFilter::Pending),
                _ => Err(ApiError::validation(Message::InvalidStatusFilter(status))),
            },
            (None, None) => Ok(TaskFilter::All),
        }
    }
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Deserialize)]
pub struct NewTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<String>,
}

impl NewTask {
    pub fn into_task(self) -> Result<Task, ApiError> {
        let title = self
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| ApiError::validation(Message::TaskTitleRequired))?;

        Ok(Task::new(
            &title,
            self.description.as_deref().unwrap_or_default(),
            self.priority.unwrap_or_default(),
            self.due_date,
        ))
    }
}

/// A patch may leave the title out, but may not blank it.
fn check_patch(patch: &TaskPatch) -> Result<(), ApiError> {
    match &patch.title {
        Some(title) if title.trim().is_empty() => Err(ApiError::validation(Message::TaskTitleRequired)),
        _ => Ok(()),
    }
}

/// Parses a request body that must be a non-empty JSON object.
fn parse_json_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::validation(Message::RequestBodyRequired));
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ApiError::validation(Message::RequestBodyInvalid(err.to_string())))?;

    match &value {
        Value::Null => Err(ApiError::validation(Message::RequestBodyRequired)),
        Value::Object(map) if map.is_empty() => Err(ApiError::validation(Message::RequestBodyRequired)),
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|err| ApiError::validation(Message::RequestBodyInvalid(err.to_string()))),
        _ => Err(ApiError::validation(Message::RequestBodyInvalid("expected a JSON object".to_string()))),
    }
}

/// Non-numeric ids cannot match a row, so they are reported as not found.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found(Message::TaskNotFound))
}

pub async fn list_tasks(State(state): State<AppState>, Query(query): Query<TaskQuery>) -> Result<Json<Vec<Task>>, ApiError> {
    let filter = query.into_filter()?;
    let tasks = run_blocking(move || state.tasks.fetch(filter)).await?;
    Ok(Json(tasks))
}

pub async fn get_task(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    let task = run_blocking(move || state.tasks.get_by_id(id)).await?;
    task.map(Json).ok_or_else(|| ApiError::not_found(Message::TaskNotFoundWithId(id)))
}

pub async fn create_task(State(state): State<AppState>, body: Bytes) -> Result<(StatusCode, Json<Task>), ApiError> {
    let new_task: NewTask = parse_json_object(&body)?;
    let mut task = new_task.into_task()?;

    let task = run_blocking(move || {
        let id = state.tasks.insert(&task)?;
        task.id = Some(id);
        Ok(task)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(State(state): State<AppState>, Path(id): Path<String>, body: Bytes) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    let patch: TaskPatch = parse_json_object(&body)?;
    check_patch(&patch)?;

    let task = run_blocking(move || {
        let Some(mut task) = state.tasks.get_by_id(id)? else {
            return Ok(None);
        };
        task.apply(patch);
        Ok(state.tasks.update(&mut task)?.then_some(task))
    })
    .await?;

    task.map(Json).ok_or_else(|| ApiError::not_found(Message::TaskNotFoundWithId(id)))
}

pub async fn delete_task(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = run_blocking(move || state.tasks.delete(id)).await?;
    if !deleted {
        return Err(ApiError::not_found(Message::TaskNotFoundWithId(id)));
    }

    Ok(Json(json!({ "message": Message::TaskDeletedSuccessfully.to_string() })))
}

pub async fn toggle_task(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;

    let task = run_blocking(move || {
        let Some(mut task) = state.tasks.get_by_id(id)? else {
            return Ok(None);
        };
        task.toggle_completed();
        let updated = state.tasks.update(&mut task)?;
        if updated {
            msg_debug!(Message::TaskToggled(id, task.completed));
        }
        Ok(updated.then_some(task))
    })
    .await?;

    task.map(Json).ok_or_else(|| ApiError::not_found(Message::TaskNotFoundWithId(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_filters() {
        let query = |priority: Option<&str>, status: Option<&str>| TaskQuery {
            priority: priority.map(str::to_string),
            status: status.map(str::to_string),
        };

        assert_eq!(query(None, None).into_filter().unwrap(), TaskFilter::All);
        assert_eq!(query(Some(""), None).into_filter().unwrap(), TaskFilter::All);
        assert_eq!(
            query(Some("high"), None).into_filter().unwrap(),
            TaskFilter::Priority(Priority::High)
        );
        assert_eq!(query(None, Some("completed")).into_filter().unwrap(), TaskFilter::Completed);
        assert_eq!(query(None, Some("pending")).into_filter().unwrap(), TaskFilter::Pending);
        assert!(query(None, Some("archived")).into_filter().is_err());
        assert!(query(Some("high"), Some("pending")).into_filter().is_err());
    }

    #[test]
    fn new_task_requires_title() {
        let blank: NewTask = serde_json::from_str(r#"{"title": "   "}"#).unwrap();
        assert!(matches!(blank.into_task(), Err(ApiError::Validation(_))));

        let missing: NewTask = serde_json::from_str(r#"{"description": "x"}"#).unwrap();
        assert!(matches!(missing.into_task(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn new_task_defaults() {
        let new_task: NewTask = serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        let task = new_task.into_task().unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.due_date, None);
        assert!(!task.completed);
    }

    #[test]
    fn body_must_be_a_non_empty_object() {
        assert!(matches!(parse_json_object::<TaskPatch>(b""), Err(ApiError::Validation(_))));
        assert!(matches!(parse_json_object::<TaskPatch>(b"  \n"), Err(ApiError::Validation(_))));
        assert!(matches!(parse_json_object::<TaskPatch>(b"null"), Err(ApiError::Validation(_))));
        assert!(matches!(parse_json_object::<TaskPatch>(b"{}"), Err(ApiError::Validation(_))));
        assert!(matches!(parse_json_object::<TaskPatch>(b"[1]"), Err(ApiError::Validation(_))));
        assert!(matches!(parse_json_object::<TaskPatch>(b"{not json"), Err(ApiError::Validation(_))));
        assert!(matches!(
            parse_json_object::<TaskPatch>(br#"{"completed": "yes"}"#),
            Err(ApiError::Validation(_))
        ));

        let patch: TaskPatch = parse_json_object(br#"{"completed": true}"#).unwrap();
        assert_eq!(patch.completed, Some(true));
    }

    #[test]
    fn patch_cannot_blank_title() {
        for body in [r#"{"title": ""}"#, r#"{"title": "   "}"#] {
            let patch: TaskPatch = serde_json::from_str(body).unwrap();
            assert!(matches!(check_patch(&patch), Err(ApiError::Validation(_))));
        }

        let renamed: TaskPatch = serde_json::from_str(r#"{"title": "Renamed"}"#).unwrap();
        assert!(check_patch(&renamed).is_ok());
        let untouched: TaskPatch = serde_json::from_str(r#"{"completed": true}"#).unwrap();
        assert!(check_patch(&untouched).is_ok());
    }

    #[test]
    fn non_numeric_id_is_not_found() {
        assert!(matches!(parse_id("abc"), Err(ApiError::NotFound(_))));
        assert_eq!(parse_id("42").unwrap(), 42);
    }
}
