// src/services/storage.rs
//
// Penyimpanan file (kwitansi PDF dan foto dokumen penghuni) di folder
// upload lokal yang di-serve publik lewat /uploads. URL publik baru
// dikembalikan SETELAH file benar-benar tertulis; pemanggil tidak boleh
// menyimpan URL sebelum itu.

use std::path::PathBuf;

use crate::common::error::AppError;

// Nama "bucket" di bawah folder upload
pub const KWITANSI_BUCKET: &str = "kwitansi";
pub const KTP_BUCKET: &str = "ktp-images";

#[derive(Clone)]
pub struct StorageService {
    upload_dir: PathBuf,
    public_base_url: String,
}

impl StorageService {
    pub fn new(upload_dir: PathBuf, public_base_url: String) -> Self {
        Self {
            upload_dir,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn upload_dir(&self) -> &PathBuf {
        &self.upload_dir
    }

    async fn save(&self, bucket: &str, file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        let dir = self.upload_dir.join(bucket);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;

        tracing::info!("📄 File tersimpan: {}", path.display());
        Ok(self.public_url(bucket, file_name))
    }

    pub async fn save_kwitansi(&self, file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        self.save(KWITANSI_BUCKET, file_name, bytes).await
    }

    pub async fn save_document(&self, file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        self.save(KTP_BUCKET, file_name, bytes).await
    }

    pub fn public_url(&self, bucket: &str, file_name: &str) -> String {
        format!("{}/uploads/{}/{}", self.public_base_url, bucket, file_name)
    }
}
