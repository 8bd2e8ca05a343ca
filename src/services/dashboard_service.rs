// src/services/dashboard_service.rs

use chrono::{Datelike, Local};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{ExpenseRepository, PaymentRepository, ResidentRepository, RoomRepository},
    models::{
        dashboard::{DashboardSummary, MonthlyReportEntry, YearlyReportSummary},
        resident::{ResidentStatus, ResidentWithRoom},
    },
    services::{
        billing_period,
        document_service::{self, DocumentService, MonthlyReportRow},
        expense_service,
    },
};

#[derive(Clone)]
pub struct DashboardService {
    room_repo: RoomRepository,
    resident_repo: ResidentRepository,
    payment_repo: PaymentRepository,
    expense_repo: ExpenseRepository,
    documents: DocumentService,
}

impl DashboardService {
    pub fn new(
        room_repo: RoomRepository,
        resident_repo: ResidentRepository,
        payment_repo: PaymentRepository,
        expense_repo: ExpenseRepository,
        documents: DocumentService,
    ) -> Self {
        Self {
            room_repo,
            resident_repo,
            payment_repo,
            expense_repo,
            documents,
        }
    }

    // Jumlah penghuni aktif menurut kolom status. Data lama yang belum
    // punya status dihitung lewat flag is_active; selisih dicatat di log
    // supaya ketahuan ada data yang perlu dimigrasi.
    async fn active_residents(&self) -> Result<i64, AppError> {
        let by_status = self
            .resident_repo
            .count_by_status(ResidentStatus::Aktif)
            .await?;
        let legacy = self.resident_repo.count_active_legacy().await?;

        if legacy > by_status {
            tracing::warn!(
                "⚠️ {} penghuni aktif hanya terhitung lewat flag lama is_active",
                legacy - by_status
            );
            return Ok(legacy);
        }
        Ok(by_status)
    }

    pub async fn summary(&self) -> Result<DashboardSummary, AppError> {
        let today = Local::now().date_naive();
        let (start, end) = billing_period::month_range(today.year(), today.month())
            .ok_or(AppError::InvalidMonth)?;

        let total_rooms = self.room_repo.count().await?;
        let occupied_rooms = self.resident_repo.count_occupied_rooms().await?;
        let active_residents = self.active_residents().await?;
        let monthly_income = self.payment_repo.sum_in_range(start, end).await?;
        let monthly_expenses = self.expense_repo.sum_in_range(start, end).await?;

        Ok(DashboardSummary {
            total_rooms,
            occupied_rooms,
            active_residents,
            monthly_income,
            monthly_expenses,
            profit: monthly_income - monthly_expenses,
        })
    }

    // Penghuni terbaru untuk panel samping dashboard
    pub async fn recent_residents(&self) -> Result<Vec<ResidentWithRoom>, AppError> {
        self.resident_repo.get_recent_active(5).await
    }

    async fn monthly_rows(&self, year: i32) -> Result<Vec<MonthlyReportEntry>, AppError> {
        let income_rows = self.payment_repo.monthly_income(year).await?;
        let expenses = {
            let service_rows = self
                .expense_repo
                .list_in_range(
                    chrono::NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| {
                        AppError::InternalServerError(anyhow::anyhow!("Tahun tidak valid"))
                    })?,
                    chrono::NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(|| {
                        AppError::InternalServerError(anyhow::anyhow!("Tahun tidak valid"))
                    })?,
                )
                .await?;
            expense_service::total_by_month(&service_rows)
        };

        // Dua belas baris selalu, bulan tanpa transaksi tampil nol
        let months = (1..=12u32)
            .map(|month| {
                let income = income_rows
                    .iter()
                    .find(|r| r.period_month == month as i32);
                MonthlyReportEntry {
                    month: billing_period::month_name(month).to_string(),
                    income: income.map(|r| r.total).unwrap_or(Decimal::ZERO),
                    payment_count: income.map(|r| r.payment_count).unwrap_or(0),
                    expenses: expenses[(month - 1) as usize],
                }
            })
            .collect();

        Ok(months)
    }

    pub async fn yearly_report(&self, year: Option<i32>) -> Result<YearlyReportSummary, AppError> {
        let year = year.unwrap_or_else(|| Local::now().year());
        let months = self.monthly_rows(year).await?;

        let total_income = months.iter().map(|m| m.income).sum();
        let total_expenses = months.iter().map(|m| m.expenses).sum();

        let active_residents = self.active_residents().await?;
        let total_rooms = self.room_repo.count().await?;
        let occupied_rooms = self.resident_repo.count_occupied_rooms().await?;
        let occupancy_rate = if total_rooms > 0 {
            occupied_rooms as f64 / total_rooms as f64 * 100.0
        } else {
            0.0
        };

        Ok(YearlyReportSummary {
            year,
            months,
            total_income,
            total_expenses,
            active_residents,
            occupancy_rate,
        })
    }

    // Laporan tahunan kos dalam PDF: pemasukan vs pengeluaran per bulan
    pub async fn yearly_report_pdf(&self, year: i32) -> Result<(Vec<u8>, String), AppError> {
        let summary = self.yearly_report(Some(year)).await?;

        let rows: Vec<MonthlyReportRow> = summary
            .months
            .iter()
            .map(|m| MonthlyReportRow {
                month: m.month.clone(),
                income: m.income,
                payment_count: m.payment_count,
                expenses: m.expenses,
            })
            .collect();

        let bytes = self.documents.render_yearly_report(
            year,
            &rows,
            summary.total_income,
            summary.total_expenses,
            summary.active_residents,
            summary.occupancy_rate,
        )?;

        Ok((bytes, document_service::laporan_kos_file_name(year)))
    }
}
