use crate::{
    auth::{
        generate_token, hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest,
    },
    error::AppError,
    models::{PublicUser, User},
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns an authentication token together
/// with the public user fields. The password hash is never part of the response.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // Check if username already exists
    let existing_user: Option<(i32,)> =
        sqlx::query_as("SELECT id FROM users WHERE username = $1")
            .bind(&register_data.username)
            .fetch_optional(&**pool)
            .await?;

    if existing_user.is_some() {
        return Err(AppError::BadRequest("Username already exists".into()));
    }

    // Hash password on the blocking pool; bcrypt is deliberately expensive
    let password = register_data.password.clone();
    let password_hash = web::block(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))??;

    // Insert new user. The existence check above can race with a concurrent
    // registration; the unique constraint on username is the authoritative
    // check and a violation gets the same client-facing message.
    let user: PublicUser = sqlx::query_as(
        "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id, username",
    )
    .bind(&register_data.username)
    .bind(&password_hash)
    .fetch_one(&**pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::BadRequest("Username already exists".into())
        }
        other => other.into(),
    })?;

    // Generate token
    let token = generate_token(user.id)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User created successfully".into(),
        token,
        user,
    }))
}

/// Login user
///
/// Authenticates a user and returns an authentication token. A missing user
/// and a wrong password produce the same "Invalid credentials" response, so
/// an attacker cannot confirm whether a username exists.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    // Get user from database
    let user: Option<User> = sqlx::query_as(
        "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
    )
    .bind(&login_data.username)
    .fetch_optional(&**pool)
    .await?;

    let user = match user {
        Some(user) => user,
        None => return Err(AppError::BadRequest("Invalid credentials".into())),
    };

    // Verify password on the blocking pool
    let password = login_data.password.clone();
    let password_hash = user.password_hash.clone();
    let valid = web::block(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))??;

    if !valid {
        return Err(AppError::BadRequest("Invalid credentials".into()));
    }

    // Generate token
    let token = generate_token(user.id)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".into(),
        token,
        user: user.into(),
    }))
}
