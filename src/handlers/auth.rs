// src/handlers/auth.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedAdmin,
    models::auth::{Admin, AuthResponse, LoginAdminPayload, RegisterAdminPayload},
};

// Handler pendaftaran admin
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterAdminPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .register_admin(&payload.email, &payload.name, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// Handler login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginAdminPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login_admin(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// Rute terlindungi /me: sesi masih hidup dan siapa pemiliknya
pub async fn get_me(AuthenticatedAdmin(admin): AuthenticatedAdmin) -> Json<Admin> {
    Json(admin)
}
