// src/services/expense_service.rs

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ExpenseRepository,
    models::expense::{CreateExpensePayload, Expense, ExpenseCategory, ExpenseSummary},
    services::{
        billing_period,
        document_service::{self, DocumentService, ExpenseReportRow, ExpenseReportSummary},
    },
};

// Rekap murni di atas daftar pengeluaran yang sudah diambil, gaya
// rekap sisi tampilan aslinya. Murni supaya gampang diuji.

pub fn total(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn total_by_category(expenses: &[Expense]) -> HashMap<ExpenseCategory, Decimal> {
    let mut totals = HashMap::new();
    for e in expenses {
        *totals.entry(e.category).or_insert(Decimal::ZERO) += e.amount;
    }
    totals
}

// Total per bulan kalender (1..=12) untuk satu tahun
pub fn total_by_month(expenses: &[Expense]) -> [Decimal; 12] {
    let mut totals = [Decimal::ZERO; 12];
    for e in expenses {
        totals[e.expense_date.month0() as usize] += e.amount;
    }
    totals
}

// Total per tanggal, urut, untuk rekap harian satu bulan
pub fn total_by_day(expenses: &[Expense]) -> BTreeMap<chrono::NaiveDate, Decimal> {
    let mut totals = BTreeMap::new();
    for e in expenses {
        *totals.entry(e.expense_date).or_insert(Decimal::ZERO) += e.amount;
    }
    totals
}

// Baris rekap siap cetak untuk bagian laporan PDF. Kategori mengikuti
// urutan daftar kategori, bukan urutan hash map.
pub fn category_breakdown(expenses: &[Expense]) -> Vec<(String, Decimal)> {
    let totals = total_by_category(expenses);
    ExpenseCategory::ALL
        .iter()
        .filter_map(|c| totals.get(c).map(|t| (c.label().to_string(), *t)))
        .collect()
}

// Rekap per bulan untuk laporan tahunan; bulan tanpa pengeluaran dilewati
pub fn monthly_breakdown(expenses: &[Expense]) -> Vec<(String, Decimal)> {
    total_by_month(expenses)
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.is_zero())
        .map(|(i, t)| (billing_period::month_name(i as u32 + 1).to_string(), *t))
        .collect()
}

// Rekap per hari untuk laporan bulanan, tanggal terformat Indonesia
pub fn daily_breakdown(expenses: &[Expense]) -> Vec<(String, Decimal)> {
    total_by_day(expenses)
        .into_iter()
        .map(|(date, t)| (billing_period::format_tanggal(date), t))
        .collect()
}

#[derive(Clone)]
pub struct ExpenseService {
    expense_repo: ExpenseRepository,
    documents: DocumentService,
}

impl ExpenseService {
    pub fn new(expense_repo: ExpenseRepository, documents: DocumentService) -> Self {
        Self {
            expense_repo,
            documents,
        }
    }

    // Daftar pengeluaran satu bulan kalender, default bulan berjalan
    pub async fn list_for_month(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Vec<Expense>, AppError> {
        let today = Local::now().date_naive();
        let year = year.unwrap_or_else(|| today.year());
        let month = month.unwrap_or_else(|| today.month());

        let (start, end) = billing_period::month_range(year, month)
            .ok_or(AppError::InvalidMonth)?;

        self.expense_repo.list_in_range(start, end).await
    }

    // Rekap satu bulan: total keseluruhan, per kategori, dan per hari
    pub async fn summary_for_month(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<ExpenseSummary, AppError> {
        let today = Local::now().date_naive();
        let year = year.unwrap_or_else(|| today.year());
        let month = month.unwrap_or_else(|| today.month());

        let expenses = self.list_for_month(Some(year), Some(month)).await?;

        let by_category = total_by_category(&expenses)
            .into_iter()
            .map(|(category, amount)| (category.label().to_string(), amount))
            .collect();

        Ok(ExpenseSummary {
            year,
            month,
            total: total(&expenses),
            by_category,
            by_day: total_by_day(&expenses),
        })
    }

    pub async fn create_expense(&self, payload: &CreateExpensePayload) -> Result<Expense, AppError> {
        if payload.amount.is_sign_negative() {
            return Err(AppError::NegativeAmount);
        }
        let expense = self
            .expense_repo
            .create(
                payload.category,
                payload.amount,
                payload.expense_date,
                payload.description.as_deref(),
            )
            .await?;

        tracing::info!(
            "🧾 Pengeluaran {} ({}) tercatat",
            expense.id,
            expense.category.label()
        );
        Ok(expense)
    }

    pub async fn update_expense(
        &self,
        id: Uuid,
        payload: &CreateExpensePayload,
    ) -> Result<Expense, AppError> {
        if payload.amount.is_sign_negative() {
            return Err(AppError::NegativeAmount);
        }
        self.expense_repo
            .update(
                id,
                payload.category,
                payload.amount,
                payload.expense_date,
                payload.description.as_deref(),
            )
            .await
    }

    pub async fn delete_expense(&self, id: Uuid) -> Result<(), AppError> {
        self.expense_repo.delete(id).await
    }

    fn report_rows(expenses: &[Expense]) -> Vec<ExpenseReportRow> {
        expenses
            .iter()
            .map(|e| ExpenseReportRow {
                expense_date: e.expense_date,
                category: e.category.label().to_string(),
                description: e.description.clone(),
                amount: e.amount,
            })
            .collect()
    }

    // Laporan PDF pengeluaran satu bulan
    pub async fn monthly_report_pdf(
        &self,
        year: i32,
        month: u32,
    ) -> Result<(Vec<u8>, String), AppError> {
        let (start, end) = billing_period::month_range(year, month)
            .ok_or(AppError::InvalidMonth)?;
        let expenses = self.expense_repo.list_in_range(start, end).await?;

        let title = format!(
            "LAPORAN PENGELUARAN {} {}",
            billing_period::month_name(month).to_uppercase(),
            year
        );
        let rows = Self::report_rows(&expenses);
        let summary = ExpenseReportSummary {
            total: total(&expenses),
            transaction_count: expenses.len(),
            by_category: category_breakdown(&expenses),
            breakdown_title: "REKAP PER HARI".to_string(),
            breakdown: daily_breakdown(&expenses),
        };
        let bytes = self.documents.render_expense_report(&title, &rows, &summary)?;

        Ok((bytes, document_service::laporan_bulanan_file_name(month, year)))
    }

    // Laporan PDF pengeluaran setahun penuh
    pub async fn yearly_report_pdf(&self, year: i32) -> Result<(Vec<u8>, String), AppError> {
        let expenses = self.expenses_for_year(year).await?;

        let title = format!("LAPORAN PENGELUARAN TAHUNAN {}", year);
        let rows = Self::report_rows(&expenses);
        let summary = ExpenseReportSummary {
            total: total(&expenses),
            transaction_count: expenses.len(),
            by_category: category_breakdown(&expenses),
            breakdown_title: "REKAP PER BULAN".to_string(),
            breakdown: monthly_breakdown(&expenses),
        };
        let bytes = self.documents.render_expense_report(&title, &rows, &summary)?;

        Ok((bytes, document_service::laporan_tahunan_file_name(year)))
    }

    pub async fn expenses_for_year(&self, year: i32) -> Result<Vec<Expense>, AppError> {
        let start = chrono::NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| AppError::InternalServerError(anyhow::anyhow!("Tahun tidak valid")))?;
        let end = chrono::NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| AppError::InternalServerError(anyhow::anyhow!("Tahun tidak valid")))?;
        self.expense_repo.list_in_range(start, end).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn expense(category: ExpenseCategory, amount: Decimal, date: &str) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            category,
            amount,
            expense_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn total_menjumlahkan_semua_baris() {
        let expenses = vec![
            expense(ExpenseCategory::Belanja, dec!(100000), "2025-03-01"),
            expense(ExpenseCategory::Service, dec!(50000), "2025-03-10"),
        ];
        assert_eq!(total(&expenses), dec!(150000));
    }

    #[test]
    fn rekap_per_kategori() {
        let expenses = vec![
            expense(ExpenseCategory::Belanja, dec!(100000), "2025-03-01"),
            expense(ExpenseCategory::Belanja, dec!(25000), "2025-03-05"),
            expense(ExpenseCategory::UangSampah, dec!(30000), "2025-03-07"),
        ];
        let totals = total_by_category(&expenses);
        assert_eq!(totals[&ExpenseCategory::Belanja], dec!(125000));
        assert_eq!(totals[&ExpenseCategory::UangSampah], dec!(30000));
        assert!(!totals.contains_key(&ExpenseCategory::Service));
    }

    #[test]
    fn rekap_per_bulan_menempatkan_di_indeks_bulan() {
        let expenses = vec![
            expense(ExpenseCategory::Belanja, dec!(100000), "2025-01-15"),
            expense(ExpenseCategory::Service, dec!(50000), "2025-12-31"),
        ];
        let totals = total_by_month(&expenses);
        assert_eq!(totals[0], dec!(100000));
        assert_eq!(totals[11], dec!(50000));
        assert_eq!(totals[5], Decimal::ZERO);
    }

    #[test]
    fn rekap_per_hari_urut_tanggal() {
        let expenses = vec![
            expense(ExpenseCategory::Belanja, dec!(20000), "2025-03-05"),
            expense(ExpenseCategory::Service, dec!(30000), "2025-03-02"),
            expense(ExpenseCategory::Belanja, dec!(5000), "2025-03-05"),
        ];
        let totals = total_by_day(&expenses);
        let days: Vec<_> = totals.keys().collect();
        assert_eq!(days[0].day(), 2);
        assert_eq!(days[1].day(), 5);
        assert_eq!(
            totals[&NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()],
            dec!(25000)
        );
    }

    // Jumlah rekap bulanan harus sama dengan total keseluruhan
    #[test]
    fn rekap_bulanan_konsisten_dengan_total() {
        let expenses = vec![
            expense(ExpenseCategory::Belanja, dec!(100000), "2025-01-15"),
            expense(ExpenseCategory::GajiEmaTati, dec!(700000), "2025-06-01"),
            expense(ExpenseCategory::LainLain, dec!(12500), "2025-06-20"),
        ];
        let monthly_sum: Decimal = total_by_month(&expenses).iter().copied().sum();
        assert_eq!(monthly_sum, total(&expenses));
    }

    // Baris rekap kategori mengikuti urutan daftar kategori, kategori
    // tanpa pengeluaran tidak ikut dicetak
    #[test]
    fn baris_rekap_kategori_urut_dan_padat() {
        let expenses = vec![
            expense(ExpenseCategory::Belanja, dec!(100000), "2025-03-01"),
            expense(ExpenseCategory::UangSampah, dec!(30000), "2025-03-07"),
            expense(ExpenseCategory::Belanja, dec!(25000), "2025-03-10"),
        ];
        let rows = category_breakdown(&expenses);
        assert_eq!(
            rows,
            vec![
                ("Uang Sampah".to_string(), dec!(30000)),
                ("Belanja".to_string(), dec!(125000)),
            ]
        );
    }

    #[test]
    fn baris_rekap_bulanan_melewati_bulan_kosong() {
        let expenses = vec![
            expense(ExpenseCategory::Belanja, dec!(100000), "2025-01-15"),
            expense(ExpenseCategory::Service, dec!(50000), "2025-12-31"),
        ];
        let rows = monthly_breakdown(&expenses);
        assert_eq!(
            rows,
            vec![
                ("Januari".to_string(), dec!(100000)),
                ("Desember".to_string(), dec!(50000)),
            ]
        );
    }

    #[test]
    fn baris_rekap_harian_terformat_dan_urut() {
        let expenses = vec![
            expense(ExpenseCategory::Belanja, dec!(20000), "2025-03-05"),
            expense(ExpenseCategory::Service, dec!(30000), "2025-03-02"),
        ];
        let rows = daily_breakdown(&expenses);
        assert_eq!(
            rows,
            vec![
                ("2 Maret 2025".to_string(), dec!(30000)),
                ("5 Maret 2025".to_string(), dec!(20000)),
            ]
        );
    }
}
