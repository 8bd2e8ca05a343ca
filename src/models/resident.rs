// src/models/resident.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums (dipetakan ke tipe Postgres) ---

// Status siklus hidup penghuni. Menggantikan flag boolean `is_active`
// yang lama; flag lama tetap disinkronkan demi kompatibilitas mundur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "resident_status")]
pub enum ResidentStatus {
    #[sqlx(rename = "Aktif")]
    #[serde(rename = "Aktif")]
    Aktif,
    #[sqlx(rename = "Sudah Keluar")]
    #[serde(rename = "Sudah Keluar")]
    SudahKeluar,
}

// State machine penulisan dua fase: record penghuni dibuat dulu
// (PENDING), URL dokumen dilampirkan belakangan (ATTACHED).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "document_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Pending,
    Attached,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub room_id: i64,

    #[schema(value_type = String, format = Date, example = "2025-01-15")]
    pub entry_date: NaiveDate,

    pub marital_status: Option<String>,
    pub status_penghuni: ResidentStatus,
    pub is_active: bool,

    #[schema(value_type = Option<String>, format = Date)]
    pub tanggal_keluar: Option<NaiveDate>,

    pub ktp_image_url: Option<String>,
    pub marriage_cert_url: Option<String>,
    pub document_status: DocumentStatus,

    pub created_at: DateTime<Utc>,
}

// Penghuni dengan nomor kamarnya (hasil JOIN)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResidentWithRoom {
    pub id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub room_id: i64,
    pub room_number: i32,

    #[schema(value_type = String, format = Date)]
    pub entry_date: NaiveDate,

    pub marital_status: Option<String>,
    pub status_penghuni: ResidentStatus,
    pub is_active: bool,

    #[schema(value_type = Option<String>, format = Date)]
    pub tanggal_keluar: Option<NaiveDate>,

    pub ktp_image_url: Option<String>,
    pub marriage_cert_url: Option<String>,
    pub document_status: DocumentStatus,

    pub created_at: DateTime<Utc>,
}

// Baris riwayat penghuni yang sudah keluar, dengan lama tinggal terhitung
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResidentHistoryEntry {
    pub id: Uuid,
    pub full_name: String,
    pub room_number: i32,

    #[schema(value_type = String, format = Date)]
    pub entry_date: NaiveDate,

    #[schema(value_type = String, format = Date)]
    pub tanggal_keluar: NaiveDate,

    #[schema(example = "3 bulan 12 hari")]
    pub stay_duration: String,
}

// --- Payloads ---

// Satu slot penghuni di form tambah kamar (bisa lebih dari satu untuk
// kamar berkapasitas 2)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OccupantPayload {
    #[validate(length(min = 1, message = "Nama lengkap wajib diisi."))]
    pub full_name: String,

    #[validate(length(min = 1, message = "Nomor telepon wajib diisi."))]
    pub phone_number: String,

    #[schema(value_type = String, format = Date)]
    pub entry_date: NaiveDate,

    pub marital_status: Option<String>,
}

// Pendaftaran satu rombongan penghuni ke satu kamar kosong
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateResidentsPayload {
    pub room_id: i64,

    #[validate(length(min = 1, message = "Minimal satu penghuni harus diisi."))]
    #[validate(nested)]
    pub occupants: Vec<OccupantPayload>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateResidentPayload {
    #[validate(length(min = 1, message = "Nama lengkap wajib diisi."))]
    pub full_name: String,

    #[validate(length(min = 1, message = "Nomor telepon wajib diisi."))]
    pub phone_number: String,

    pub room_id: i64,
    pub entry_date: NaiveDate,
    pub marital_status: Option<String>,
}

// Satu blok pada form edit penghuni kamar. `resident_id` eksplisit:
// blok dengan id meng-update record itu, blok tanpa id mengisi slot
// kosong. Tidak ada lagi pencocokan berdasarkan posisi array.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OccupantSlotPayload {
    pub resident_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Nama lengkap wajib diisi."))]
    pub full_name: String,

    #[validate(length(min = 1, message = "Nomor telepon wajib diisi."))]
    pub phone_number: String,

    #[schema(value_type = String, format = Date)]
    pub entry_date: NaiveDate,

    pub marital_status: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EditOccupantsPayload {
    #[validate(length(min = 1, message = "Minimal satu penghuni harus diisi."))]
    #[validate(nested)]
    pub occupants: Vec<OccupantSlotPayload>,
}
