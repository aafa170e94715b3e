use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{Task, TaskInput, TaskUpdate},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Retrieves all tasks owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects in insertion order.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[get("")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, user_id, created_at, updated_at \
         FROM tasks WHERE user_id = $1 ORDER BY created_at",
    )
    .bind(user.0)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// ## Request Body:
/// A JSON object matching the `TaskInput` struct:
/// - `title`: The title of the task (required, 1-255 characters).
/// - `description` (optional): A description of the task (up to 1000 characters).
/// - `status` (optional): "pending" or "completed". Defaults to "pending".
///
/// The owner of the task is always the authenticated user; it cannot be set
/// from the request body.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `400 Bad Request`: If input validation on `TaskInput` fails.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), user.0);

    // Insert task; created_at/updated_at come from the column defaults
    let result = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, title, description, status, user_id) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, title, description, status, user_id, created_at, updated_at",
    )
    .bind(task.id)
    .bind(task.title)
    .bind(task.description)
    .bind(task.status)
    .bind(task.user_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(result))
}

/// Applies a partial update to a task owned by the authenticated user.
///
/// Only the fields present in the body are changed; `updated_at` is bumped on
/// every successful call. Passing `"description": null` clears the description,
/// while omitting the key leaves it untouched.
///
/// The ownership check and the mutation are a single conditional UPDATE, so
/// there is no window between checking the owner and writing the row. A task
/// that does not exist and a task owned by another user produce the same 404.
///
/// ## Path Parameters:
/// - `id`: The UUID of the task to update.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `400 Bad Request`: If input validation on `TaskUpdate` fails.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is not owned by the user.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let task_uuid = task_id.into_inner();
    let update = task_data.into_inner();

    let description_present = update.description.is_some();
    let description_value = update.description.flatten();

    let result = sqlx::query_as::<_, Task>(
        "UPDATE tasks \
         SET title = COALESCE($1, title), \
             description = CASE WHEN $2 THEN $3 ELSE description END, \
             status = COALESCE($4, status), \
             updated_at = NOW() \
         WHERE id = $5 AND user_id = $6 \
         RETURNING id, title, description, status, user_id, created_at, updated_at",
    )
    .bind(update.title)
    .bind(description_present)
    .bind(description_value)
    .bind(update.status)
    .bind(task_uuid)
    .bind(user.0)
    .fetch_optional(&**pool)
    .await?;

    match result {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound(
            "Task not found or not authorized".into(),
        )),
    }
}

/// Deletes a task owned by the authenticated user.
///
/// The deletion is filtered by both id and owner in one statement; either the
/// single matching row is removed or nothing is. Missing tasks, already
/// deleted tasks, and tasks owned by another user all yield the same 404.
///
/// ## Path Parameters:
/// - `id`: The UUID of the task to delete.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task deleted successfully"}`.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is not owned by the user.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task_uuid = task_id.into_inner();

    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_uuid)
        .bind(user.0)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(
            "Task not found or not authorized".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted successfully"
    })))
}
