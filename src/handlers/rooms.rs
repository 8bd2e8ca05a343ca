// src/handlers/rooms.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::room::{CreateRoomPayload, RoomOccupancy},
};

// GET /api/rooms: semua kamar dengan status hunian turunannya
#[utoipa::path(
    get,
    path = "/api/rooms",
    tag = "Kamar",
    responses(
        (status = 200, description = "Daftar kamar dengan hunian", body = Vec<RoomOccupancy>),
        (status = 401, description = "Tidak terautentikasi")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_rooms(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = app_state.room_service.list_with_occupancy().await?;
    Ok(Json(rooms))
}

// GET /api/rooms/available: hanya kamar yang benar-benar kosong,
// untuk alur tambah penghuni baru
pub async fn list_available_rooms(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = app_state.room_service.list_available().await?;
    Ok(Json(rooms))
}

// POST /api/rooms
pub async fn create_room(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateRoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let room = app_state.room_service.create_room(payload.room_number).await?;
    Ok((StatusCode::CREATED, Json(room)))
}
