// src/handlers/residents.rs

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::resident::{CreateResidentsPayload, EditOccupantsPayload, UpdateResidentPayload},
    services::resident_service::DocumentKind,
};

// GET /api/residents: penghuni aktif dengan nomor kamarnya
pub async fn list_residents(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let residents = app_state.resident_service.list_active().await?;
    Ok(Json(residents))
}

// POST /api/residents: daftarkan rombongan ke satu kamar kosong
pub async fn create_residents(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateResidentsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let residents = app_state.resident_service.create_group(&payload).await?;
    Ok((StatusCode::CREATED, Json(residents)))
}

// PUT /api/residents/{id}
pub async fn update_resident(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateResidentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let resident = app_state
        .resident_service
        .update_resident(id, &payload)
        .await?;
    Ok(Json(resident))
}

// GET /api/rooms/{room_id}/occupants: penghuni aktif satu kamar
pub async fn list_room_occupants(
    State(app_state): State<AppState>,
    Path(room_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let occupants = app_state
        .resident_service
        .list_room_occupants(room_id)
        .await?;
    Ok(Json(occupants))
}

// PUT /api/rooms/{room_id}/occupants: edit semua penghuni satu kamar
pub async fn edit_room_occupants(
    State(app_state): State<AppState>,
    Path(room_id): Path<i64>,
    Json(payload): Json<EditOccupantsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let residents = app_state
        .resident_service
        .edit_room_occupants(room_id, &payload)
        .await?;
    Ok(Json(residents))
}

// POST /api/residents/{id}/checkout: tandai sudah keluar per hari ini
pub async fn checkout_resident(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let resident = app_state.resident_service.checkout(id).await?;
    Ok(Json(resident))
}

// DELETE /api/residents/{id}
pub async fn delete_resident(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.resident_service.delete_resident(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/residents/history: yang sudah keluar, dengan lama tinggal
pub async fn resident_history(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let history = app_state.resident_service.history().await?;
    Ok(Json(history))
}

// GET /api/residents/pending-documents: lampiran dokumennya belum beres
pub async fn pending_documents(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let residents = app_state.resident_service.pending_documents().await?;
    Ok(Json(residents))
}

fn extension_from_headers(headers: &HeaderMap) -> &'static str {
    match headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        Some("image/png") => "png",
        Some("image/webp") => "webp",
        // Kamera ponsel mengirim JPEG; pakai itu sebagai default
        _ => "jpg",
    }
}

// PUT /api/residents/{id}/documents/{kind}: body mentah berisi gambar,
// {kind} salah satu dari "ktp" atau "surat-nikah"
pub async fn upload_document(
    State(app_state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let kind = match kind.as_str() {
        "ktp" => DocumentKind::Ktp,
        "surat-nikah" => DocumentKind::SuratNikah,
        _ => return Err(AppError::UnknownDocumentKind),
    };

    let ext = extension_from_headers(&headers);
    let resident = app_state
        .resident_service
        .attach_document(id, kind, ext, &body)
        .await?;
    Ok(Json(resident))
}
