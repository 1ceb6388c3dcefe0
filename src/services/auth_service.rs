use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest};
use crate::{
    activity::log_activity,
    db::DbPool,
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Meta},
};

pub async fn register_user(pool: &DbPool, payload: RegisterRequest) -> AppResult<ApiResponse<User>> {
    let RegisterRequest {
        login,
        email,
        password,
    } = payload;

    if login.trim().is_empty() || email.trim().is_empty() {
        return Err(AppError::BadRequest("login and email are required".into()));
    }
    if password.len() < 6 {
        return Err(AppError::BadRequest(
            "password must be at least 6 characters".into(),
        ));
    }

    let exist: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE login = $1 OR email = $2")
            .bind(login.as_str())
            .bind(email.as_str())
            .fetch_optional(pool)
            .await?;

    if exist.is_some() {
        return Err(AppError::BadRequest(
            "Login or email is already taken".to_string(),
        ));
    }

    let password_hash = hash_password(&password)?;
    let id = Uuid::new_v4();

    let user: User = sqlx::query_as(
        "INSERT INTO users (id, login, email, password_hash, role) VALUES ($1, $2, $3, $4, 'user') RETURNING *",
    )
    .bind(id)
    .bind(login.as_str())
    .bind(email.as_str())
    .bind(password_hash)
    .fetch_one(pool)
    .await
    // The pre-check above races with concurrent registrations; the unique
    // indexes are the real guard, so map their violation instead of a 500.
    .map_err(|e| AppError::conflict_on_unique(e, "Login or email is already taken"))?;

    if let Err(err) = log_activity(
        pool,
        Some(user.id),
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "login": user.login })),
    )
    .await
    {
        tracing::warn!(error = %err, "activity log failed");
    }
    Ok(ApiResponse::success("User created", user, None))
}

pub async fn login_user(
    pool: &DbPool,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest {
        login_or_email,
        password,
    } = payload;
    let user: Option<User> =
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE login = $1 OR email = $1")
            .bind(login_or_email.as_str())
            .fetch_optional(pool)
            .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::BadRequest("Invalid login or password".into())),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::BadRequest("Invalid login or password".into()));
    }

    let token = issue_token(&user)?;

    if let Err(err) = log_activity(
        pool,
        Some(user.id),
        "user_login",
        Some("users"),
        None,
    )
    .await
    {
        tracing::warn!(error = %err, "activity log failed");
    }

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse { token, user },
        Some(Meta::empty()),
    ))
}

/// Create a throwaway guest account so anonymous visitors can use the cart.
pub async fn guest_user(pool: &DbPool) -> AppResult<ApiResponse<LoginResponse>> {
    let id = Uuid::new_v4();
    let short = &id.to_string()[..8];
    let login = format!("guest-{short}");
    let email = format!("guest-{short}@guest.local");
    // Guests cannot log back in; the password is random and never returned.
    let password_hash = hash_password(&Uuid::new_v4().to_string())?;

    let user: User = sqlx::query_as(
        "INSERT INTO users (id, login, email, password_hash, role) VALUES ($1, $2, $3, $4, 'guest') RETURNING *",
    )
    .bind(id)
    .bind(login)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    let token = issue_token(&user)?;

    if let Err(err) = log_activity(pool, Some(user.id), "guest_created", Some("users"), None).await
    {
        tracing::warn!(error = %err, "activity log failed");
    }

    Ok(ApiResponse::success(
        "Guest created",
        LoginResponse { token, user },
        Some(Meta::empty()),
    ))
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn issue_token(user: &User) -> AppResult<String> {
    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role.clone(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}
