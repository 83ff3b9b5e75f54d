use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{AuthUser, Role},
    error::ApiError,
    state::AppState,
    tasks::{
        access::{self, TaskAction},
        dto::{
            CreateTaskRequest, DeleteTaskResponse, PageQuery, PaginationMeta, TaskListResponse,
            UpdateTaskRequest,
        },
        repo_types::{Task, TaskStatus},
    },
};

pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
}

fn parse_task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::validation("Invalid task ID"))
}

fn parse_status(raw: &str) -> Result<TaskStatus, ApiError> {
    TaskStatus::parse(raw)
        .ok_or_else(|| ApiError::validation("Status must be either pending or completed"))
}

/// Admins see every task, everyone else only their own.
fn list_scope(identity: &crate::auth::Identity) -> Option<Uuid> {
    match identity.role {
        Role::Admin => None,
        Role::User => Some(identity.user_id),
    }
}

#[instrument(skip(state))]
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Query(p): Query<PageQuery>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let owner = list_scope(&identity);
    let (page, limit) = (p.page(), p.limit());

    let tasks = Task::page(&state.db, owner, limit, p.offset()).await?;
    let total = Task::count(&state.db, owner).await?;

    Ok(Json(TaskListResponse {
        tasks,
        pagination: PaginationMeta::new(page, limit, total),
    }))
}

#[instrument(skip(state))]
pub async fn get_task(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    access::authorize(identity, &task, TaskAction::View)?;
    Ok(Json(task))
}

#[instrument(skip(state, payload))]
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ApiError::validation(
            "Title is required and must be a non-empty string",
        ));
    }
    let status = match payload.status.as_deref() {
        Some(raw) => parse_status(raw)?,
        None => TaskStatus::default(),
    };

    let task = Task::create(&state.db, identity.user_id, title, status).await?;
    info!(task_id = %task.id, user_id = %identity.user_id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

#[instrument(skip(state, payload))]
pub async fn update_task(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    access::authorize(identity, &task, TaskAction::Update)?;

    let title = match payload.title.as_deref() {
        Some(t) => {
            let t = t.trim();
            if t.is_empty() {
                return Err(ApiError::validation("Title must be a non-empty string"));
            }
            Some(t.to_string())
        }
        None => None,
    };
    let status = match payload.status.as_deref() {
        Some(raw) => Some(parse_status(raw)?),
        None => None,
    };

    let task = Task::update(&state.db, id, title.as_deref(), status).await?;
    info!(task_id = %task.id, user_id = %identity.user_id, "task updated");
    Ok(Json(task))
}

#[instrument(skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteTaskResponse>, ApiError> {
    let id = parse_task_id(&id)?;
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    access::authorize(identity, &task, TaskAction::Delete)?;

    Task::delete(&state.db, id).await?;
    info!(task_id = %id, user_id = %identity.user_id, "task deleted");
    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_task_id_is_a_validation_error() {
        let err = parse_task_id("definitely-not-a-uuid").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid task ID");
    }

    #[test]
    fn well_formed_task_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(parse_task_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn status_strings_parse() {
        assert_eq!(parse_status("pending").unwrap(), TaskStatus::Pending);
        assert_eq!(parse_status("completed").unwrap(), TaskStatus::Completed);
        let err = parse_status("done").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Status must be either pending or completed"
        );
    }

    #[test]
    fn list_scope_by_role() {
        let user = crate::auth::Identity {
            user_id: Uuid::new_v4(),
            role: Role::User,
        };
        assert_eq!(list_scope(&user), Some(user.user_id));

        let admin = crate::auth::Identity {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
        };
        assert_eq!(list_scope(&admin), None);
    }
}
