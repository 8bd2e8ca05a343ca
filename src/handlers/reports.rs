// src/handlers/reports.rs

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{common::error::AppError, config::AppState};

#[derive(Debug, Deserialize)]
pub struct YearFilter {
    pub year: Option<i32>,
}

fn pdf_response(pdf_bytes: Vec<u8>, file_name: String) -> Response {
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ),
    ];
    (headers, pdf_bytes).into_response()
}

// GET /api/reports/summary?year=: rekap pemasukan/pengeluaran per bulan
pub async fn yearly_report(
    State(app_state): State<AppState>,
    Query(filter): Query<YearFilter>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.yearly_report(filter.year).await?;
    Ok(Json(summary))
}

// GET /api/reports/yearly/{year}/pdf: laporan kos tahunan dalam PDF
pub async fn yearly_report_pdf(
    State(app_state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Response, AppError> {
    let (bytes, file_name) = app_state.dashboard_service.yearly_report_pdf(year).await?;
    Ok(pdf_response(bytes, file_name))
}

// GET /api/reports/expenses/{year}/pdf: laporan pengeluaran tahunan
pub async fn expenses_yearly_pdf(
    State(app_state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Response, AppError> {
    let (bytes, file_name) = app_state.expense_service.yearly_report_pdf(year).await?;
    Ok(pdf_response(bytes, file_name))
}

// GET /api/reports/expenses/{year}/{month}/pdf: laporan pengeluaran
// satu bulan
pub async fn expenses_monthly_pdf(
    State(app_state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Response, AppError> {
    let (bytes, file_name) = app_state
        .expense_service
        .monthly_report_pdf(year, month)
        .await?;
    Ok(pdf_response(bytes, file_name))
}
