// src/models/payment.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub resident_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2025-02-10")]
    pub payment_date: NaiveDate,

    // Periode tagihan terstruktur (1..=12, tahun), bukan nama bulan
    // bebas, supaya filter lintas tahun tidak rapuh.
    #[schema(example = 2)]
    pub period_month: i32,
    #[schema(example = 2025)]
    pub period_year: i32,

    #[schema(value_type = String, example = "750000.00")]
    pub amount: Decimal,

    #[schema(example = "Transfer Bank")]
    pub payment_method: String,

    pub receipt_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Pembayaran dengan nama penghuni dan nomor kamarnya (hasil JOIN)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWithResident {
    pub id: Uuid,
    pub resident_id: Uuid,
    pub full_name: String,
    pub room_number: i32,

    #[schema(value_type = String, format = Date)]
    pub payment_date: NaiveDate,

    #[schema(value_type = String, format = Date)]
    pub entry_date: NaiveDate,

    pub period_month: i32,
    pub period_year: i32,

    #[schema(value_type = String)]
    pub amount: Decimal,

    pub payment_method: String,
    pub receipt_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Kandidat pembayaran baru: penghuni aktif yang belum bayar bulan ini
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCandidate {
    pub id: Uuid,
    pub full_name: String,
    pub room_number: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentPayload {
    pub resident_id: Uuid,

    #[schema(value_type = String, format = Date)]
    pub payment_date: NaiveDate,

    #[validate(range(min = 1, max = 12, message = "Bulan sewa harus 1 sampai 12."))]
    pub period_month: i32,
    pub period_year: i32,

    #[schema(value_type = String)]
    pub amount: Decimal,

    #[validate(length(min = 1, message = "Metode pembayaran wajib diisi."))]
    pub payment_method: String,
}

// Hasil bagikan kwitansi lewat WhatsApp
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareReceiptResponse {
    pub receipt_url: String,
    pub whatsapp_url: String,
}
