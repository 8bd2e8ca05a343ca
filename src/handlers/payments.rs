// src/handlers/payments.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::payment::{CreatePaymentPayload, PaymentWithResident, ShareReceiptResponse},
};

#[derive(Debug, Deserialize)]
pub struct MonthFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

// GET /api/payments?year=&month=: default bulan berjalan
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Pembayaran",
    params(
        ("year" = Option<i32>, Query, description = "Tahun kalender"),
        ("month" = Option<u32>, Query, description = "Bulan kalender 1-12")
    ),
    responses(
        (status = 200, description = "Pembayaran satu bulan kalender", body = Vec<PaymentWithResident>),
        (status = 401, description = "Tidak terautentikasi")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
    Query(filter): Query<MonthFilter>,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state
        .payment_service
        .list_for_month(filter.year, filter.month)
        .await?;
    Ok(Json(payments))
}

// GET /api/payments/candidates: penghuni aktif yang belum bayar
// periode berjalan
pub async fn list_candidates(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let candidates = app_state.payment_service.candidates().await?;
    Ok(Json(candidates))
}

// POST /api/payments
pub async fn create_payment(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let payment = app_state.payment_service.create_payment(&payload).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

// PUT /api/payments/{id}
pub async fn update_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let payment = app_state
        .payment_service
        .update_payment(id, &payload)
        .await?;
    Ok(Json(payment))
}

// DELETE /api/payments/{id}
pub async fn delete_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.payment_service.delete_payment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/payments/{id}/kwitansi: unduh PDF langsung
#[utoipa::path(
    get,
    path = "/api/payments/{id}/kwitansi",
    tag = "Pembayaran",
    params(("id" = Uuid, Path, description = "ID pembayaran")),
    responses(
        (status = 200, description = "PDF kwitansi", content_type = "application/pdf"),
        (status = 404, description = "Pembayaran tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn download_kwitansi(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (pdf_bytes, file_name) = app_state.payment_service.generate_kwitansi(id).await?;

    // Header agar browser mengunduh dengan nama file yang benar
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}

// POST /api/payments/{id}/share-whatsapp: simpan kwitansi lalu susun link
// WhatsApp berisi URL publiknya
#[utoipa::path(
    post,
    path = "/api/payments/{id}/share-whatsapp",
    tag = "Pembayaran",
    params(("id" = Uuid, Path, description = "ID pembayaran")),
    responses(
        (status = 200, description = "Link WhatsApp dan URL kwitansi", body = ShareReceiptResponse),
        (status = 404, description = "Pembayaran tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn share_whatsapp(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let response = app_state.payment_service.share_via_whatsapp(id).await?;
    Ok(Json(response))
}
