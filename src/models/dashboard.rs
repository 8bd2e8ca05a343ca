// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Ringkasan dashboard: semua angka dihitung ulang per request,
// tidak ada cache.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[schema(example = 20)]
    pub total_rooms: i64,

    // Kamar dengan >= 1 penghuni aktif (turunan, bukan flag tersimpan)
    #[schema(example = 14)]
    pub occupied_rooms: i64,

    #[schema(example = 17)]
    pub active_residents: i64,

    #[schema(value_type = String, example = "10500000.00")]
    pub monthly_income: Decimal,

    #[schema(value_type = String, example = "2300000.00")]
    pub monthly_expenses: Decimal,

    // profit = pemasukan - pengeluaran bulan berjalan
    #[schema(value_type = String, example = "8200000.00")]
    pub profit: Decimal,
}

// Rekap satu bulan untuk halaman laporan
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportEntry {
    #[schema(example = "Januari")]
    pub month: String,

    #[schema(value_type = String)]
    pub income: Decimal,

    pub payment_count: i64,

    #[schema(value_type = String)]
    pub expenses: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReportSummary {
    pub year: i32,
    pub months: Vec<MonthlyReportEntry>,

    #[schema(value_type = String)]
    pub total_income: Decimal,

    #[schema(value_type = String)]
    pub total_expenses: Decimal,

    pub active_residents: i64,

    // Persentase kamar terisi (0..=100)
    #[schema(example = 70.0)]
    pub occupancy_rate: f64,
}
