use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Todo, TodoCreate, TodoUpdate},
    response::ApiResponse,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use log::{debug, error, info, warn};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const TODO_COLUMNS: &str = "id, user_id, description, due_date, priority, is_completed, completed_at";

/// Fetches a todo by id, scoped to its owner in a single atomic condition.
///
/// A todo owned by someone else is indistinguishable from one that does not
/// exist: both come back as `TodoNotFound` carrying the requested id.
async fn fetch_owned_todo(pool: &PgPool, todo_id: Uuid, user_id: Uuid) -> Result<Todo, AppError> {
    let todo = sqlx::query_as::<_, Todo>(&format!(
        "SELECT {} FROM todos WHERE id = $1 AND user_id = $2",
        TODO_COLUMNS
    ))
    .bind(todo_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    todo.ok_or_else(|| {
        warn!("Todo {} not found for user {}", todo_id, user_id);
        AppError::TodoNotFound(Some(todo_id))
    })
}

/// Creates a new todo for the authenticated user.
///
/// Expects a `TodoCreate` JSON payload; `description` is required, `due_date`
/// is optional, and a missing `priority` defaults to medium. The owner is
/// always the caller, never taken from the payload.
///
/// ## Responses:
/// - `201 Created`: success envelope around the created todo.
/// - `401 Unauthorized`: missing or invalid token.
/// - `422 Unprocessable Entity`: input validation failed.
/// - `500 Internal Server Error`: the insert failed; the envelope message
///   carries the underlying cause. A failed insert leaves no row behind.
#[post("")]
pub async fn create_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_data: web::Json<TodoCreate>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let user_id = current_user.user_id();
    let todo = Todo::new(todo_data.into_inner(), user_id);

    let created = sqlx::query_as::<_, Todo>(&format!(
        "INSERT INTO todos (id, user_id, description, due_date, priority, is_completed, completed_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {}",
        TODO_COLUMNS
    ))
    .bind(todo.id)
    .bind(todo.user_id)
    .bind(&todo.description)
    .bind(todo.due_date)
    .bind(todo.priority)
    .bind(todo.is_completed)
    .bind(todo.completed_at)
    .fetch_one(&**pool)
    .await
    .map_err(|e| {
        error!("Failed to create todo for user {}. Error: {}", user_id, e);
        AppError::TodoCreationFailed(e.to_string())
    })?;

    info!("Created new todo for user: {}", user_id);
    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Todo created successfully")))
}

/// Retrieves all todos owned by the authenticated user.
///
/// An empty list is a normal success result. Rows are ordered by due date
/// (todos without one last), then id, for a stable listing.
#[get("")]
pub async fn get_todos(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let user_id = current_user.user_id();

    let todos = sqlx::query_as::<_, Todo>(&format!(
        "SELECT {} FROM todos WHERE user_id = $1 ORDER BY due_date ASC NULLS LAST, id ASC",
        TODO_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(&**pool)
    .await?;

    info!("Retrieved {} todos for user: {}", todos.len(), user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(todos, "Todos retrieved successfully")))
}

/// Retrieves a single todo by id.
///
/// ## Responses:
/// - `200 OK`: success envelope around the todo.
/// - `404 Not Found`: no such todo for this caller.
#[get("/{id}")]
pub async fn get_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let user_id = current_user.user_id();
    let todo_id = todo_id.into_inner();

    let todo = fetch_owned_todo(&pool, todo_id, user_id).await?;

    info!("Retrieved todo {} for user {}", todo_id, user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(todo, "Todo retrieved successfully")))
}

/// Applies a partial update to a todo.
///
/// Only fields present in the `TodoUpdate` payload are written; absent fields
/// keep their stored values, so an empty body is a valid no-op that still
/// succeeds. The update and the ownership check are one statement: zero rows
/// affected, whether the row never existed or was deleted mid-flight, yields
/// not-found.
///
/// ## Responses:
/// - `200 OK`: success envelope around the post-update todo.
/// - `404 Not Found`: no such todo for this caller.
/// - `422 Unprocessable Entity`: input validation failed.
#[put("/{id}")]
pub async fn update_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_id: web::Path<Uuid>,
    todo_data: web::Json<TodoUpdate>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let user_id = current_user.user_id();
    let todo_id = todo_id.into_inner();

    let updated = sqlx::query_as::<_, Todo>(&format!(
        "UPDATE todos
         SET description = COALESCE($1, description),
             due_date = COALESCE($2, due_date),
             priority = COALESCE($3, priority)
         WHERE id = $4 AND user_id = $5
         RETURNING {}",
        TODO_COLUMNS
    ))
    .bind(&todo_data.description)
    .bind(todo_data.due_date)
    .bind(todo_data.priority)
    .bind(todo_id)
    .bind(user_id)
    .fetch_optional(&**pool)
    .await?;

    match updated {
        Some(todo) => {
            info!("Successfully updated todo {} for user {}", todo_id, user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(todo, "Todo updated successfully")))
        }
        None => {
            warn!("Todo {} not found for user {}", todo_id, user_id);
            Err(AppError::TodoNotFound(Some(todo_id)))
        }
    }
}

/// Marks a todo as completed. Idempotent.
///
/// Completing an already-completed todo returns the stored record unchanged;
/// in particular `completed_at` is never overwritten by a second call.
///
/// ## Responses:
/// - `200 OK`: success envelope around the (possibly unchanged) todo.
/// - `404 Not Found`: no such todo for this caller.
#[put("/{id}/complete")]
pub async fn complete_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let user_id = current_user.user_id();
    let todo_id = todo_id.into_inner();

    let todo = fetch_owned_todo(&pool, todo_id, user_id).await?;
    if todo.is_completed {
        debug!("Todo {} is already completed", todo_id);
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            todo,
            "Todo marked as completed successfully",
        )));
    }

    let completed = sqlx::query_as::<_, Todo>(&format!(
        "UPDATE todos SET is_completed = TRUE, completed_at = $1
         WHERE id = $2 AND user_id = $3
         RETURNING {}",
        TODO_COLUMNS
    ))
    .bind(Utc::now())
    .bind(todo_id)
    .bind(user_id)
    .fetch_optional(&**pool)
    .await?
    // The row can vanish between the read above and this update.
    .ok_or(AppError::TodoNotFound(Some(todo_id)))?;

    info!("Todo {} marked as completed by user {}", todo_id, user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        completed,
        "Todo marked as completed successfully",
    )))
}

/// Deletes a todo.
///
/// ## Responses:
/// - `200 OK`: success envelope with `data: true`.
/// - `404 Not Found`: no such todo for this caller.
#[delete("/{id}")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let user_id = current_user.user_id();
    let todo_id = todo_id.into_inner();

    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
        .bind(todo_id)
        .bind(user_id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        warn!("Todo {} not found for user {}", todo_id, user_id);
        return Err(AppError::TodoNotFound(Some(todo_id)));
    }

    info!("Todo {} deleted by user {}", todo_id, user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(true, "Todo deleted successfully")))
}

#[cfg(test)]
mod tests {
    use crate::models::{Priority, TodoCreate, TodoUpdate};
    use validator::Validate;

    #[test]
    fn test_create_input_validation() {
        let invalid_empty_description = TodoCreate {
            description: "".to_string(),
            due_date: None,
            priority: Some(Priority::High),
        };
        assert!(
            invalid_empty_description.validate().is_err(),
            "Validation should fail for an empty description."
        );

        let long_description = "a".repeat(1001);
        let invalid_long_description = TodoCreate {
            description: long_description,
            due_date: None,
            priority: None,
        };
        assert!(
            invalid_long_description.validate().is_err(),
            "Validation should fail for an overly long description."
        );

        let valid_input = TodoCreate {
            description: "buy milk".to_string(),
            due_date: None,
            priority: None,
        };
        assert!(
            valid_input.validate().is_ok(),
            "Validation should pass for valid input."
        );
    }

    #[test]
    fn test_update_input_validation() {
        // All fields absent: a legal no-op update.
        let empty_update = TodoUpdate::default();
        assert!(empty_update.validate().is_ok());

        let invalid_update = TodoUpdate {
            description: Some("".to_string()),
            due_date: None,
            priority: None,
        };
        assert!(
            invalid_update.validate().is_err(),
            "A present-but-empty description should fail validation."
        );
    }
}
