use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::errors::{AppError, AppResult};
use crate::models::{LoginPayload, SignupPayload};
use crate::services::Store;

#[axum::debug_handler]
pub async fn signup(
    State(store): State<Store>,
    Json(payload): Json<SignupPayload>,
) -> AppResult<Response> {
    tracing::info!("Signup attempt for email: {}", payload.email);

    // Existence check and insert are two independent statements; the UNIQUE
    // index on email is the only backstop against the race between them.
    if store.find_user_by_email(&payload.email).await?.is_some() {
        tracing::warn!("Signup rejected, email already registered: {}", payload.email);
        return Err(AppError::Conflict("User already exists".into()));
    }

    store
        .insert_user(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully" })),
    )
        .into_response())
}

#[axum::debug_handler]
pub async fn login(
    State(store): State<Store>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for email: {}", payload.email);

    // Plain string comparison against the stored password; unknown email and
    // wrong password collapse into the same response. The full user record,
    // password included, goes back to the client.
    match store.find_user_by_email(&payload.email).await? {
        Some(user) if user.password == payload.password => {
            tracing::debug!("Login successful for user {}", user.id);
            Ok(Json(json!({ "message": "Login successful", "user": user })).into_response())
        }
        _ => {
            tracing::warn!("Invalid credentials for email: {}", payload.email);
            Err(AppError::Unauthorized("Invalid credentials".into()))
        }
    }
}
