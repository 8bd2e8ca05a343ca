// src/db/payment_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::payment::{Payment, PaymentCandidate, PaymentWithResident},
};

// Rekap pemasukan satu bulan periode (hasil GROUP BY)
#[derive(Debug, sqlx::FromRow)]
pub struct MonthlyIncomeRow {
    pub period_month: i32,
    pub payment_count: i64,
    pub total: Decimal,
}

#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        resident_id: Uuid,
        payment_date: NaiveDate,
        period_month: i32,
        period_year: i32,
        amount: Decimal,
        payment_method: &str,
    ) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (resident_id, payment_date, period_month, period_year, amount, payment_method)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(resident_id)
        .bind(payment_date)
        .bind(period_month)
        .bind(period_year)
        .bind(amount)
        .bind(payment_method)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn update(
        &self,
        id: Uuid,
        resident_id: Uuid,
        payment_date: NaiveDate,
        period_month: i32,
        period_year: i32,
        amount: Decimal,
        payment_method: &str,
    ) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET resident_id = $2, payment_date = $3, period_month = $4,
                period_year = $5, amount = $6, payment_method = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(resident_id)
        .bind(payment_date)
        .bind(period_month)
        .bind(period_year)
        .bind(amount)
        .bind(payment_method)
        .fetch_optional(&self.pool)
        .await?;

        payment.ok_or(AppError::PaymentNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::PaymentNotFound);
        }
        Ok(())
    }

    // Simpan URL kwitansi, dipanggil HANYA setelah file berhasil
    // tersimpan di storage, supaya record tidak pernah menunjuk URL
    // yang tidak ada.
    pub async fn set_receipt_url(&self, id: Uuid, url: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE payments SET receipt_url = $2 WHERE id = $1")
            .bind(id)
            .bind(url)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::PaymentNotFound);
        }
        Ok(())
    }

    pub async fn find_with_resident(
        &self,
        id: Uuid,
    ) -> Result<Option<PaymentWithResident>, AppError> {
        let payment = sqlx::query_as::<_, PaymentWithResident>(
            r#"
            SELECT p.*, r.full_name, r.entry_date, k.room_number
            FROM payments p
            JOIN residents r ON p.resident_id = r.id
            JOIN rooms k ON r.room_id = k.id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    // Pembayaran dalam rentang tanggal (satu bulan kalender), urut nomor
    // kamar seperti tampilan aslinya.
    pub async fn list_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PaymentWithResident>, AppError> {
        let payments = sqlx::query_as::<_, PaymentWithResident>(
            r#"
            SELECT p.*, r.full_name, r.entry_date, k.room_number
            FROM payments p
            JOIN residents r ON p.resident_id = r.id
            JOIN rooms k ON r.room_id = k.id
            WHERE p.payment_date BETWEEN $1 AND $2
            ORDER BY k.room_number ASC, p.created_at DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    // Semua penghuni aktif dengan nomor kamarnya, urut nomor kamar.
    // Penyaringan siapa yang sudah bayar dilakukan di service.
    pub async fn active_with_rooms(&self) -> Result<Vec<PaymentCandidate>, AppError> {
        let candidates = sqlx::query_as::<_, PaymentCandidate>(
            r#"
            SELECT r.id, r.full_name, k.room_number
            FROM residents r
            JOIN rooms k ON r.room_id = k.id
            WHERE r.status_penghuni = 'Aktif'
            ORDER BY k.room_number ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(candidates)
    }

    // Penghuni yang sudah punya pembayaran untuk satu periode
    pub async fn paid_resident_ids(
        &self,
        period_month: i32,
        period_year: i32,
    ) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT DISTINCT resident_id FROM payments WHERE period_month = $1 AND period_year = $2",
        )
        .bind(period_month)
        .bind(period_year)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    pub async fn sum_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(amount) FROM payments WHERE payment_date BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }

    // Rekap pemasukan per bulan periode untuk satu tahun (laporan)
    pub async fn monthly_income(&self, year: i32) -> Result<Vec<MonthlyIncomeRow>, AppError> {
        let rows = sqlx::query_as::<_, MonthlyIncomeRow>(
            r#"
            SELECT period_month, COUNT(*) AS payment_count, SUM(amount) AS total
            FROM payments
            WHERE period_year = $1
            GROUP BY period_month
            ORDER BY period_month ASC
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
