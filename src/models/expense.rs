// src/models/expense.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Kategori pengeluaran kos: himpunan tertutup 5 label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "expense_category")]
pub enum ExpenseCategory {
    #[sqlx(rename = "Uang Sampah")]
    #[serde(rename = "Uang Sampah")]
    UangSampah,
    #[sqlx(rename = "Gaji Ema Tati")]
    #[serde(rename = "Gaji Ema Tati")]
    GajiEmaTati,
    #[sqlx(rename = "Belanja")]
    #[serde(rename = "Belanja")]
    Belanja,
    #[sqlx(rename = "Service")]
    #[serde(rename = "Service")]
    Service,
    #[sqlx(rename = "Lain-lain")]
    #[serde(rename = "Lain-lain")]
    LainLain,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::UangSampah,
        ExpenseCategory::GajiEmaTati,
        ExpenseCategory::Belanja,
        ExpenseCategory::Service,
        ExpenseCategory::LainLain,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::UangSampah => "Uang Sampah",
            ExpenseCategory::GajiEmaTati => "Gaji Ema Tati",
            ExpenseCategory::Belanja => "Belanja",
            ExpenseCategory::Service => "Service",
            ExpenseCategory::LainLain => "Lain-lain",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub category: ExpenseCategory,

    #[schema(value_type = String, example = "150000.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date)]
    pub expense_date: NaiveDate,

    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Rekap pengeluaran satu bulan untuk grafik dan ringkasan
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub year: i32,
    pub month: u32,

    #[schema(value_type = String)]
    pub total: Decimal,

    // Label kategori -> total
    #[schema(value_type = Object)]
    pub by_category: std::collections::BTreeMap<String, Decimal>,

    // Tanggal -> total hari itu, urut tanggal
    #[schema(value_type = Object)]
    pub by_day: std::collections::BTreeMap<NaiveDate, Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateExpensePayload {
    pub category: ExpenseCategory,

    #[schema(value_type = String)]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date)]
    pub expense_date: NaiveDate,

    pub description: Option<String>,
}
