//! User service handlers: register, login, and CRUD.

use axum::extract::rejection::JsonRejection;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use super::repository::UserRepository;
use crate::auth::{hash_password, verify_password};
use crate::error::{ApiError, parse_uuid};
use crate::models::User;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Re-hashed when present; omitted fields keep the stored hash.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// POST /api/users/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let password_hash = hash_password(&req.password)?;

    match UserRepository::create(state.db.pool(), &req.name, &req.email, &password_hash).await {
        Ok(user) => {
            tracing::info!("Registered user {}", user.id);
            Ok((StatusCode::CREATED, Json(user)))
        }
        Err(err) if ApiError::is_unique_violation(&err) => {
            tracing::warn!("Registration attempt for existing email: {}", req.email);
            Err(ApiError::Conflict("Email already exists".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /api/users/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let user = UserRepository::get_by_email(state.db.pool(), &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    if !verify_password(&req.password, &user.password_hash) {
        tracing::warn!("Failed login for {}", req.email);
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let token = state.auth.issue_token(&user)?;
    Ok(Json(LoginResponse { token, user }))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user_id = parse_uuid(&id, "Invalid user ID")?;

    UserRepository::get_by_id(state.db.pool(), user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let user_id = parse_uuid(&id, "Invalid user ID")?;
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let password_hash = match &req.password {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    match UserRepository::update(
        state.db.pool(),
        user_id,
        &req.name,
        &req.email,
        password_hash.as_deref(),
    )
    .await
    {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => Err(ApiError::NotFound("User not found".to_string())),
        Err(err) if ApiError::is_unique_violation(&err) => {
            Err(ApiError::Conflict("Email already exists".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user_id = parse_uuid(&id, "Invalid user ID")?;

    if UserRepository::soft_delete(state.db.pool(), user_id).await? {
        Ok(Json(
            serde_json::json!({"message": "User deleted successfully"}),
        ))
    } else {
        Err(ApiError::NotFound("User not found".to_string()))
    }
}

/// GET /api/users/
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepository::list(state.db.pool()).await?;
    Ok(Json(users))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid_request()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid_request()
        };
        assert!(short_password.validate().is_err());

        let empty_name = RegisterRequest {
            name: String::new(),
            ..valid_request()
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_update_request_password_optional() {
        let no_password = UpdateUserRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: None,
        };
        assert!(no_password.validate().is_ok());

        let short_password = UpdateUserRequest {
            password: Some("short".to_string()),
            ..no_password
        };
        assert!(short_password.validate().is_err());
    }

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
        }
    }
}
