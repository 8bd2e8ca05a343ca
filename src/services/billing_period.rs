// src/services/billing_period.rs
//
// Aritmetika periode sewa. Periode satu bulan yang dicakup sebuah
// pembayaran: tanggal mulai = tanggal masuk penghuni, dijangkarkan ke
// bulan pembayaran; kalau tanggal bayar jatuh SEBELUM tanggal masuk di
// bulan berjalan, pembayaran itu melunasi siklus bulan sebelumnya.
//
// Tanggal masuk yang melebihi panjang bulan target (misal masuk tanggal
// 31, bulan target cuma 30 hari) di-clamp ke hari terakhir bulan itu,
// mengikuti konvensi `checked_add_months` milik chrono.

use chrono::{Datelike, Months, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni",
    "Juli", "Agustus", "September", "Oktober", "November", "Desember",
];

// Nama bulan Indonesia; `month` 1..=12.
pub fn month_name(month: u32) -> &'static str {
    (month as usize)
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i))
        .copied()
        .unwrap_or("-")
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.min(last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

// Hitung (awal, akhir) periode sewa satu bulan yang dicakup pembayaran.
pub fn billing_period(
    entry_date: NaiveDate,
    payment_date: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let mut year = payment_date.year();
    let mut month = payment_date.month();

    // Bayar sebelum tanggal jatuh tempo bulan ini -> siklus bulan lalu
    if payment_date.day() < entry_date.day() {
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }

    let start = clamped_date(year, month, entry_date.day())?;
    let end = start.checked_add_months(Months::new(1))?;
    Some((start, end))
}

// Format "15 Januari 2025"
pub fn format_tanggal(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name(date.month()), date.year())
}

// Periode sewa siap cetak di kwitansi; input tak valid jadi "-".
pub fn format_periode(entry_date: NaiveDate, payment_date: NaiveDate) -> String {
    match billing_period(entry_date, payment_date) {
        Some((start, end)) => format!("{} - {}", format_tanggal(start), format_tanggal(end)),
        None => "-".to_string(),
    }
}

// Hari pertama dan terakhir sebuah bulan kalender; untuk filter rentang
// tanggal di query.
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = NaiveDate::from_ymd_opt(year, month, last_day_of_month(year, month))?;
    Some((start, end))
}

// Lama tinggal penghuni, mis. "3 bulan 12 hari", untuk riwayat penghuni.
pub fn stay_duration(entry_date: NaiveDate, exit_date: NaiveDate) -> String {
    if exit_date < entry_date {
        return "-".to_string();
    }

    let mut months: u32 = 0;
    while entry_date
        .checked_add_months(Months::new(months + 1))
        .map_or(false, |d| d <= exit_date)
    {
        months += 1;
    }

    if months > 0 {
        let anchor = entry_date
            .checked_add_months(Months::new(months))
            .unwrap_or(entry_date);
        let days = (exit_date - anchor).num_days();
        if days > 0 {
            format!("{} bulan {} hari", months, days)
        } else {
            format!("{} bulan", months)
        }
    } else {
        format!("{} hari", (exit_date - entry_date).num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn payment_on_or_after_entry_day_anchors_to_payment_month() {
        // Masuk tgl 15, bayar 20 Feb -> periode mulai 15 Feb
        let (start, end) = billing_period(d(2025, 1, 15), d(2025, 2, 20)).unwrap();
        assert_eq!(start, d(2025, 2, 15));
        assert_eq!(end, d(2025, 3, 15));
        assert_eq!(
            format_periode(d(2025, 1, 15), d(2025, 2, 20)),
            "15 Februari 2025 - 15 Maret 2025"
        );
    }

    #[test]
    fn payment_before_entry_day_shifts_back_one_month() {
        // Bayar 10 Feb, tanggal masuk 15 -> melunasi siklus Januari
        let (start, end) = billing_period(d(2025, 1, 15), d(2025, 2, 10)).unwrap();
        assert_eq!(start, d(2025, 1, 15));
        assert_eq!(end, d(2025, 2, 15));
        assert_eq!(
            format_periode(d(2025, 1, 15), d(2025, 2, 10)),
            "15 Januari 2025 - 15 Februari 2025"
        );
    }

    #[test]
    fn same_day_counts_as_current_cycle() {
        let (start, _) = billing_period(d(2025, 1, 15), d(2025, 3, 15)).unwrap();
        assert_eq!(start, d(2025, 3, 15));
    }

    #[test]
    fn january_payment_can_shift_into_previous_year() {
        let (start, end) = billing_period(d(2024, 6, 10), d(2025, 1, 5)).unwrap();
        assert_eq!(start, d(2024, 12, 10));
        assert_eq!(end, d(2025, 1, 10));
    }

    #[test]
    fn entry_day_overflow_clamps_to_last_day_of_month() {
        // Masuk tgl 31; Februari cuma punya 28 hari -> clamp, bukan
        // meluber ke bulan berikutnya
        let (start, end) = billing_period(d(2025, 1, 31), d(2025, 2, 28)).unwrap();
        assert_eq!(start, d(2025, 1, 31));
        assert_eq!(end, d(2025, 2, 28));

        // Bayar di bulan 30-hari, tanggal masuk 31
        let (start, end) = billing_period(d(2024, 10, 31), d(2024, 11, 30)).unwrap();
        assert_eq!(start, d(2024, 10, 31));
        assert_eq!(end, d(2024, 11, 30));

        // Jangkar jatuh di Februari tahun kabisat
        let (start, end) = billing_period(d(2024, 1, 31), d(2024, 2, 29)).unwrap();
        assert_eq!(start, d(2024, 1, 31));
        assert_eq!(end, d(2024, 2, 29));
    }

    #[test]
    fn month_range_covers_whole_month() {
        let (start, end) = month_range(2025, 2).unwrap();
        assert_eq!(start, d(2025, 2, 1));
        assert_eq!(end, d(2025, 2, 28));

        let (start, end) = month_range(2024, 2).unwrap();
        assert_eq!(start, d(2024, 2, 1));
        assert_eq!(end, d(2024, 2, 29));

        let (_, end) = month_range(2025, 12).unwrap();
        assert_eq!(end, d(2025, 12, 31));
    }

    #[test]
    fn stay_duration_formats() {
        assert_eq!(stay_duration(d(2025, 1, 15), d(2025, 4, 27)), "3 bulan 12 hari");
        assert_eq!(stay_duration(d(2025, 1, 15), d(2025, 3, 15)), "2 bulan");
        assert_eq!(stay_duration(d(2025, 1, 15), d(2025, 1, 25)), "10 hari");
        assert_eq!(stay_duration(d(2025, 1, 15), d(2025, 1, 10)), "-");
    }

    #[test]
    fn month_names_are_indonesian() {
        assert_eq!(month_name(1), "Januari");
        assert_eq!(month_name(12), "Desember");
        assert_eq!(month_name(0), "-");
        assert_eq!(month_name(13), "-");
    }
}
