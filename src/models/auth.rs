// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Admin pengelola kos, sebagaimana tersimpan di tabel `admins`
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub name: String,

    #[serde(skip_serializing)] // PENTING untuk keamanan
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

// Data untuk mendaftarkan admin baru
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAdminPayload {
    #[validate(email(message = "E-mail yang diberikan tidak valid."))]
    pub email: String,
    #[validate(length(min = 1, message = "Nama wajib diisi."))]
    pub name: String,
    #[validate(length(min = 6, message = "Password minimal 6 karakter."))]
    pub password: String,
}

// Data untuk login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginAdminPayload {
    #[validate(email(message = "E-mail yang diberikan tidak valid."))]
    pub email: String,
    #[validate(length(min = 6, message = "Password minimal 6 karakter."))]
    pub password: String,
}

// Respons autentikasi berisi token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

// Struktur data ("claims") di dalam JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID admin)
    pub exp: usize, // Expiration time (kapan token kedaluwarsa)
    pub iat: usize, // Issued At (kapan token dibuat)
}
