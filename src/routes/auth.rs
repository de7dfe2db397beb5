use crate::{
    auth::{
        generate_token, hash_password, verify_password, AuthResponse, ChangePasswordRequest,
        CurrentUser, LoginRequest, RegisterRequest,
    },
    error::AppError,
    models::User,
    response::ApiResponse,
};
use actix_web::{post, put, web, HttpResponse, Responder};
use log::{info, warn};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns an authentication token inside the
/// success envelope.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let password_hash = hash_password(&register_data.password)?;
    let user_id = Uuid::new_v4();

    // The UNIQUE constraint on email is the authority on duplicates; a
    // lookup beforehand would race with a concurrent registration.
    let inserted = sqlx::query(
        "INSERT INTO users (id, username, email, password_hash) VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(&register_data.username)
    .bind(&register_data.email)
    .bind(&password_hash)
    .execute(&**pool)
    .await;

    if let Err(e) = inserted {
        if let sqlx::Error::Database(db_err) = &e {
            // 23505 = unique_violation
            if db_err.code().as_deref() == Some("23505") {
                return Err(AppError::BadRequest("Email already registered".into()));
            }
        }
        return Err(e.into());
    }

    let token = generate_token(user_id)?;

    info!("Registered new user: {}", user_id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        AuthResponse { token, user_id },
        "User registered successfully",
    )))
}

/// Login user
///
/// Authenticates a user by email and password and returns a token.
/// An unknown email and a wrong password are deliberately indistinguishable.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user: Option<(Uuid, String)> =
        sqlx::query_as("SELECT id, password_hash FROM users WHERE email = $1")
            .bind(&login_data.email)
            .fetch_optional(&**pool)
            .await?;

    if let Some((user_id, password_hash)) = user {
        if verify_password(&login_data.password, &password_hash)? {
            let token = generate_token(user_id)?;
            info!("User {} logged in", user_id);
            return Ok(HttpResponse::Ok().json(ApiResponse::success(
                AuthResponse { token, user_id },
                "Login successful",
            )));
        }
    }

    warn!("Failed login attempt for {}", login_data.email);
    Err(AppError::AuthenticationFailed("Could not validate user".into()))
}

/// Change the current user's password.
///
/// The new password must be confirmed and the current one must verify against
/// the stored hash before anything is written.
#[put("/password")]
pub async fn change_password(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    change_data: web::Json<ChangePasswordRequest>,
) -> Result<impl Responder, AppError> {
    change_data.validate()?;

    if change_data.new_password != change_data.confirm_new_password {
        return Err(AppError::PasswordMismatch);
    }

    let user_id = current_user.user_id();

    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&**pool)
    .await?
    .ok_or(AppError::UserNotFound(Some(user_id)))?;

    if !verify_password(&change_data.current_password, &user.password_hash)? {
        warn!("Wrong current password supplied by user {}", user_id);
        return Err(AppError::InvalidPassword);
    }

    let new_hash = hash_password(&change_data.new_password)?;
    sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(&new_hash)
        .bind(user_id)
        .execute(&**pool)
        .await?;

    info!("Password changed for user {}", user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(true, "Password changed successfully")))
}
