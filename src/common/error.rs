use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Tipe error aplikasi, memakai `thiserror` agar ergonomis.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error validasi")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail sudah terdaftar")]
    EmailAlreadyExists,

    #[error("Kredensial tidak valid")]
    InvalidCredentials,

    #[error("Token tidak valid")]
    InvalidToken,

    #[error("Admin tidak ditemukan")]
    AdminNotFound,

    #[error("Kamar tidak ditemukan")]
    RoomNotFound,

    #[error("Nomor kamar sudah terdaftar")]
    RoomNumberAlreadyExists,

    #[error("Penghuni tidak ditemukan")]
    ResidentNotFound,

    #[error("Pembayaran tidak ditemukan")]
    PaymentNotFound,

    #[error("Pengeluaran tidak ditemukan")]
    ExpenseNotFound,

    #[error("Kamar masih terisi")]
    RoomNotVacant,

    #[error("Kapasitas kamar terlampaui (maksimal {0} penghuni)")]
    RoomCapacityExceeded(i32),

    #[error("Nominal tidak boleh negatif")]
    NegativeAmount,

    #[error("Bulan di luar rentang 1-12")]
    InvalidMonth,

    #[error("Jenis dokumen tidak dikenal")]
    UnknownDocumentKind,

    #[error("Font tidak ditemukan: {0}")]
    FontNotFound(String),

    #[error("Gagal menyimpan file: {0}")]
    StorageError(#[from] std::io::Error),

    // Varian untuk error database (sqlx)
    #[error("Error database")]
    DatabaseError(#[from] sqlx::Error),

    // Varian generik untuk error tak terduga lainnya.
    // `anyhow::Error` bagus untuk membawa konteks errornya.
    #[error("Error internal server")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Error bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Error JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Kembalikan seluruh detail validasi per field.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Satu atau beberapa field tidak valid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "E-mail ini sudah dipakai.".to_string())
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Email atau password salah.".to_string(),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token autentikasi tidak valid atau tidak ada.".to_string(),
            ),
            AppError::AdminNotFound => {
                (StatusCode::NOT_FOUND, "Admin tidak ditemukan.".to_string())
            }
            AppError::RoomNotFound => {
                (StatusCode::NOT_FOUND, "Kamar tidak ditemukan.".to_string())
            }
            AppError::RoomNumberAlreadyExists => (
                StatusCode::CONFLICT,
                "Nomor kamar ini sudah terdaftar.".to_string(),
            ),
            AppError::ResidentNotFound => (
                StatusCode::NOT_FOUND,
                "Penghuni tidak ditemukan.".to_string(),
            ),
            AppError::PaymentNotFound => (
                StatusCode::NOT_FOUND,
                "Data pembayaran tidak ditemukan.".to_string(),
            ),
            AppError::ExpenseNotFound => (
                StatusCode::NOT_FOUND,
                "Data pengeluaran tidak ditemukan.".to_string(),
            ),
            AppError::RoomNotVacant => (
                StatusCode::CONFLICT,
                "Kamar ini masih ada penghuni aktif.".to_string(),
            ),
            AppError::RoomCapacityExceeded(cap) => (
                StatusCode::CONFLICT,
                format!("Jumlah penghuni melebihi kapasitas kamar ({} orang).", cap),
            ),
            AppError::NegativeAmount => (
                StatusCode::BAD_REQUEST,
                "Nominal tidak boleh negatif.".to_string(),
            ),
            AppError::InvalidMonth => (
                StatusCode::BAD_REQUEST,
                "Bulan harus di antara 1 sampai 12.".to_string(),
            ),
            AppError::UnknownDocumentKind => (
                StatusCode::NOT_FOUND,
                "Jenis dokumen tidak dikenal.".to_string(),
            ),

            // Sisanya (DatabaseError, StorageError, dst.) jadi 500.
            // `#[from]` sudah mengurus konversinya; `tracing` mencatat pesan
            // detail yang diberikan `thiserror`.
            ref e => {
                tracing::error!("Error internal server: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Terjadi kesalahan tak terduga.".to_string(),
                )
            }
        };

        // Respons standar untuk error sederhana dengan satu pesan.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Parameter bulan yang salah datang dari klien, jadi harus dibalas
    // 400, bukan 500.
    #[test]
    fn bulan_di_luar_rentang_dibalas_400() {
        let response = AppError::InvalidMonth.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_database_dibalas_500() {
        let response = AppError::DatabaseError(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
