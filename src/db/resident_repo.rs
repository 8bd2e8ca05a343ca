// src/db/resident_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::resident::{Resident, ResidentStatus, ResidentWithRoom},
};

#[derive(Clone)]
pub struct ResidentRepository {
    pool: PgPool,
}

impl ResidentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PENULISAN (menerima executor supaya bisa ikut transaksi service)
    // =========================================================================

    pub async fn create<'e, E>(
        &self,
        executor: E,
        room_id: i64,
        full_name: &str,
        phone_number: &str,
        entry_date: NaiveDate,
        marital_status: Option<&str>,
    ) -> Result<Resident, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resident = sqlx::query_as::<_, Resident>(
            r#"
            INSERT INTO residents (room_id, full_name, phone_number, entry_date, marital_status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(full_name)
        .bind(phone_number)
        .bind(entry_date)
        .bind(marital_status)
        .fetch_one(executor)
        .await?;

        Ok(resident)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        room_id: i64,
        full_name: &str,
        phone_number: &str,
        entry_date: NaiveDate,
        marital_status: Option<&str>,
    ) -> Result<Resident, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resident = sqlx::query_as::<_, Resident>(
            r#"
            UPDATE residents
            SET room_id = $2, full_name = $3, phone_number = $4,
                entry_date = $5, marital_status = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(room_id)
        .bind(full_name)
        .bind(phone_number)
        .bind(entry_date)
        .bind(marital_status)
        .fetch_optional(executor)
        .await?;

        resident.ok_or(AppError::ResidentNotFound)
    }

    // Tandai penghuni sudah keluar: status baru, tanggal keluar hari ini,
    // dan flag lama is_active ikut dimatikan. Hunian kamar TIDAK diubah
    // di sini, selalu dihitung ulang dari daftar penghuni aktif.
    pub async fn mark_exited(&self, id: Uuid, exit_date: NaiveDate) -> Result<Resident, AppError> {
        let resident = sqlx::query_as::<_, Resident>(
            r#"
            UPDATE residents
            SET status_penghuni = 'Sudah Keluar', tanggal_keluar = $2, is_active = FALSE
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(exit_date)
        .fetch_optional(&self.pool)
        .await?;

        resident.ok_or(AppError::ResidentNotFound)
    }

    // Lampirkan URL dokumen SETELAH file tersimpan; sekaligus transisi
    // state machine dokumen ke ATTACHED.
    pub async fn attach_ktp_url(&self, id: Uuid, url: &str) -> Result<Resident, AppError> {
        let resident = sqlx::query_as::<_, Resident>(
            r#"
            UPDATE residents
            SET ktp_image_url = $2, document_status = 'ATTACHED'
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        resident.ok_or(AppError::ResidentNotFound)
    }

    pub async fn attach_marriage_cert_url(
        &self,
        id: Uuid,
        url: &str,
    ) -> Result<Resident, AppError> {
        let resident = sqlx::query_as::<_, Resident>(
            r#"
            UPDATE residents
            SET marriage_cert_url = $2, document_status = 'ATTACHED'
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        resident.ok_or(AppError::ResidentNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM residents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResidentNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  PEMBACAAN
    // =========================================================================

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Resident>, AppError> {
        let resident = sqlx::query_as::<_, Resident>("SELECT * FROM residents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(resident)
    }

    pub async fn get_all_active(&self) -> Result<Vec<Resident>, AppError> {
        let residents = sqlx::query_as::<_, Resident>(
            "SELECT * FROM residents WHERE status_penghuni = 'Aktif'",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(residents)
    }

    pub async fn get_active_with_room(&self) -> Result<Vec<ResidentWithRoom>, AppError> {
        let residents = sqlx::query_as::<_, ResidentWithRoom>(
            r#"
            SELECT r.*, k.room_number
            FROM residents r
            JOIN rooms k ON r.room_id = k.id
            WHERE r.status_penghuni = 'Aktif'
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(residents)
    }

    // Penghuni aktif sebuah kamar, urut waktu masuk record, urutan blok
    // di form edit kamar.
    pub async fn get_active_by_room(&self, room_id: i64) -> Result<Vec<Resident>, AppError> {
        let residents = sqlx::query_as::<_, Resident>(
            r#"
            SELECT * FROM residents
            WHERE room_id = $1 AND status_penghuni = 'Aktif'
            ORDER BY created_at ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(residents)
    }

    pub async fn get_history(&self) -> Result<Vec<ResidentWithRoom>, AppError> {
        let residents = sqlx::query_as::<_, ResidentWithRoom>(
            r#"
            SELECT r.*, k.room_number
            FROM residents r
            JOIN rooms k ON r.room_id = k.id
            WHERE r.status_penghuni = 'Sudah Keluar'
            ORDER BY r.tanggal_keluar DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(residents)
    }

    // Penghuni aktif yang dokumennya masih menggantung (fase kedua dari
    // penulisan dua fase belum terjadi), supaya operator bisa mengulang
    // upload.
    pub async fn get_pending_documents(&self) -> Result<Vec<ResidentWithRoom>, AppError> {
        let residents = sqlx::query_as::<_, ResidentWithRoom>(
            r#"
            SELECT r.*, k.room_number
            FROM residents r
            JOIN rooms k ON r.room_id = k.id
            WHERE r.status_penghuni = 'Aktif' AND r.document_status = 'PENDING'
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(residents)
    }

    pub async fn get_recent_active(&self, limit: i64) -> Result<Vec<ResidentWithRoom>, AppError> {
        let residents = sqlx::query_as::<_, ResidentWithRoom>(
            r#"
            SELECT r.*, k.room_number
            FROM residents r
            JOIN rooms k ON r.room_id = k.id
            WHERE r.status_penghuni = 'Aktif'
            ORDER BY r.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(residents)
    }

    pub async fn count_by_status(&self, status: ResidentStatus) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM residents WHERE status_penghuni = $1",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    // Jalur cadangan lewat flag boolean lama, dipakai dashboard kalau
    // query status gagal.
    pub async fn count_active_legacy(&self) -> Result<i64, AppError> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM residents WHERE is_active = TRUE")
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }

    // Jumlah kamar yang punya minimal satu penghuni aktif (hunian turunan)
    pub async fn count_occupied_rooms(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT room_id) FROM residents WHERE status_penghuni = 'Aktif'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}
