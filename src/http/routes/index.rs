use crate::http::{error::ApiError, run_blocking, AppState};
use crate::libs::page;
use axum::{extract::State, response::Html};
use chrono::Local;

/// HTML list of every task.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let tasks = run_blocking(move || state.tasks.get_all()).await?;
    Ok(Html(page::render_index(&tasks, Local::now().date_naive())))
}
