// src/handlers/expenses.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::expense::{CreateExpensePayload, ExpenseCategory},
};

#[derive(Debug, Deserialize)]
pub struct MonthFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

// GET /api/expenses?year=&month=: default bulan berjalan
pub async fn list_expenses(
    State(app_state): State<AppState>,
    Query(filter): Query<MonthFilter>,
) -> Result<impl IntoResponse, AppError> {
    let expenses = app_state
        .expense_service
        .list_for_month(filter.year, filter.month)
        .await?;
    Ok(Json(expenses))
}

// GET /api/expenses/summary?year=&month=: total, per kategori, per hari
pub async fn expense_summary(
    State(app_state): State<AppState>,
    Query(filter): Query<MonthFilter>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .expense_service
        .summary_for_month(filter.year, filter.month)
        .await?;
    Ok(Json(summary))
}

// GET /api/expenses/categories: himpunan kategori tetap untuk dropdown
pub async fn list_categories() -> Json<Vec<&'static str>> {
    Json(ExpenseCategory::ALL.iter().map(|c| c.label()).collect())
}

// POST /api/expenses
pub async fn create_expense(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let expense = app_state.expense_service.create_expense(&payload).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

// PUT /api/expenses/{id}
pub async fn update_expense(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let expense = app_state
        .expense_service
        .update_expense(id, &payload)
        .await?;
    Ok(Json(expense))
}

// DELETE /api/expenses/{id}
pub async fn delete_expense(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.expense_service.delete_expense(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
