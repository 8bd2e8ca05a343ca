// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState, models::dashboard::DashboardSummary};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Ringkasan hunian dan keuangan bulan berjalan", body = DashboardSummary),
        (status = 401, description = "Tidak terautentikasi")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.summary().await?;
    Ok(Json(summary))
}

// GET /api/dashboard/recent-residents: 5 penghuni terbaru
pub async fn recent_residents(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let residents = app_state.dashboard_service.recent_residents().await?;
    Ok(Json(residents))
}
