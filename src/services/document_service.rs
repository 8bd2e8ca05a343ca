// src/services/document_service.rs

use chrono::NaiveDate;
use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use rust_decimal::Decimal;

use crate::{common::error::AppError, services::billing_period};

// Alamat dan kontak tetap yang dicetak di setiap kwitansi
const ALAMAT_KOS: &str = "Jl. Cempaka No.79 RT 01 RW 08 Sukahati, Cibinong";
const KONTAK_PENGELOLA: &str = "Kontak Pengelola: 087722667913";

// Data yang sudah siap cetak untuk satu kwitansi. Semua pengambilan dari
// database terjadi di service pemanggil, renderer ini murni.
pub struct KwitansiData {
    pub full_name: String,
    pub room_number: i32,
    pub periode: String,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    // URL publik kwitansi, ditentukan sebelum file disimpan supaya bisa
    // ikut dirender sebagai QR code
    pub receipt_url: Option<String>,
}

pub struct ExpenseReportRow {
    pub expense_date: NaiveDate,
    pub category: String,
    pub description: Option<String>,
    pub amount: Decimal,
}

// Blok ringkasan dan rekap yang menyertai tabel detail laporan
// pengeluaran. Laporan tahunan membawa rekap per bulan, laporan bulanan
// rekap per hari; judul bagiannya ikut dikirim pemanggil.
pub struct ExpenseReportSummary {
    pub total: Decimal,
    pub transaction_count: usize,
    pub by_category: Vec<(String, Decimal)>,
    pub breakdown_title: String,
    pub breakdown: Vec<(String, Decimal)>,
}

pub struct MonthlyReportRow {
    pub month: String,
    pub income: Decimal,
    pub payment_count: i64,
    pub expenses: Decimal,
}

// Format nominal ke gaya Rupiah: "Rp 1.500.000"
pub fn format_rupiah(amount: Decimal) -> String {
    let whole = amount.trunc().to_string();
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole.as_str()),
    };

    let mut grouped = String::new();
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    format!("Rp {}{}", sign, grouped)
}

// Nama file kwitansi: spasi pada nama jadi garis bawah
pub fn kwitansi_file_name(full_name: &str, payment_date: NaiveDate) -> String {
    format!(
        "kwitansi-{}-{}.pdf",
        full_name.replace(' ', "_"),
        payment_date.format("%Y-%m-%d")
    )
}

pub fn laporan_bulanan_file_name(month: u32, year: i32) -> String {
    format!(
        "laporan-pengeluaran-{}-{}.pdf",
        billing_period::month_name(month).to_lowercase(),
        year
    )
}

pub fn laporan_tahunan_file_name(year: i32) -> String {
    format!("laporan-pengeluaran-tahunan-{}.pdf", year)
}

pub fn laporan_kos_file_name(year: i32) -> String {
    format!("laporan-kos-{}.pdf", year)
}

// Persentase satu angka di belakang koma untuk blok ringkasan laporan
pub fn format_persen(rate: f64) -> String {
    format!("{:.1}%", rate)
}

#[derive(Clone)]
pub struct DocumentService {
    fonts_dir: String,
}

impl DocumentService {
    pub fn new(fonts_dir: String) -> Self {
        Self { fonts_dir }
    }

    fn new_document(&self, title: &str) -> Result<genpdf::Document, AppError> {
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None)
            .map_err(|_| {
                AppError::FontNotFound(format!("Font tidak ditemukan di folder {}", self.fonts_dir))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(title);
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(15);
        doc.set_page_decorator(decorator);
        Ok(doc)
    }

    // Gambar cincin stempel bulat. Teks "LUNAS" ditaruh sebagai paragraf
    // tersendiri karena genpdf tidak bisa menumpuk teks di atas gambar.
    fn stamp_ring() -> image::DynamicImage {
        let size: u32 = 120;
        let center = size as f32 / 2.0;
        let outer = center - 2.0;
        let inner = outer - 6.0;

        let buffer = image::ImageBuffer::from_fn(size, size, |x, y| {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= outer && dist >= inner {
                Luma([60u8])
            } else {
                Luma([255u8])
            }
        });
        image::DynamicImage::ImageLuma8(buffer)
    }

    // KWITANSI: bukti pembayaran satu transaksi, dengan stempel LUNAS
    // dan QR code menuju URL publiknya.
    pub fn render_kwitansi(&self, data: &KwitansiData) -> Result<Vec<u8>, AppError> {
        let mut doc = self.new_document("Bukti Pembayaran Kos")?;

        doc.push(
            elements::Paragraph::new("BUKTI PEMBAYARAN KOS")
                .aligned(genpdf::Alignment::Center)
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(
            elements::Paragraph::new(ALAMAT_KOS)
                .aligned(genpdf::Alignment::Center)
                .styled(style::Style::new().with_font_size(10)),
        );
        doc.push(
            elements::Paragraph::new(KONTAK_PENGELOLA)
                .aligned(genpdf::Alignment::Center)
                .styled(style::Style::new().with_font_size(10)),
        );
        doc.push(elements::Break::new(2));

        // Tabel satu baris berisi detail pembayaran
        let mut table = elements::TableLayout::new(vec![3, 1, 4, 2, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Nama Penyewa").styled(style_bold))
            .element(elements::Paragraph::new("Kamar").styled(style_bold))
            .element(elements::Paragraph::new("Periode Sewa").styled(style_bold))
            .element(elements::Paragraph::new("Nominal").styled(style_bold))
            .element(elements::Paragraph::new("Tanggal").styled(style_bold))
            .element(elements::Paragraph::new("Metode Pembayaran").styled(style_bold))
            .push()
            .expect("Table error");

        table
            .row()
            .element(elements::Paragraph::new(data.full_name.clone()))
            .element(elements::Paragraph::new(format!("{}", data.room_number)))
            .element(elements::Paragraph::new(data.periode.clone()))
            .element(elements::Paragraph::new(format_rupiah(data.amount)))
            .element(elements::Paragraph::new(billing_period::format_tanggal(
                data.payment_date,
            )))
            .element(elements::Paragraph::new(data.payment_method.clone()))
            .push()
            .expect("Table row error");

        doc.push(table);
        doc.push(elements::Break::new(3));

        // Stempel LUNAS di kiri, tanda tangan pengelola di kanan
        let ring = genpdf::elements::Image::from_dynamic_image(Self::stamp_ring())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.35, 0.35));
        doc.push(ring);
        doc.push(
            elements::Paragraph::new("LUNAS")
                .styled(style::Style::new().bold().with_font_size(14)),
        );

        doc.push(elements::Break::new(2));
        let mut signature = elements::Paragraph::new("Pengelola Kos");
        signature.set_alignment(genpdf::Alignment::Right);
        doc.push(signature.styled(style::Style::new().with_font_size(11)));

        // QR code menuju halaman kwitansi publik
        if let Some(url) = &data.receipt_url {
            doc.push(elements::Break::new(2));

            let code = QrCode::new(url.as_bytes())
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
            let image_buffer = code.render::<Luma<u8>>().build();
            let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

            let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
                .with_scale(genpdf::Scale::new(0.5, 0.5));
            doc.push(pdf_image);

            doc.push(
                elements::Paragraph::new("Pindai untuk membuka kwitansi digital")
                    .styled(style::Style::new().italic().with_font_size(8)),
            );
        }

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        Ok(buffer)
    }

    // Tabel rekap dua kolom (label dan nominal) dengan judul bagiannya
    fn push_recap_section(
        doc: &mut genpdf::Document,
        section_title: &str,
        rows: &[(String, Decimal)],
    ) {
        doc.push(
            elements::Paragraph::new(section_title.to_string())
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        doc.push(elements::Break::new(1));

        let mut table = elements::TableLayout::new(vec![3, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        for (label, amount) in rows {
            table
                .row()
                .element(elements::Paragraph::new(label.clone()))
                .element(elements::Paragraph::new(format_rupiah(*amount)))
                .push()
                .expect("Table row error");
        }
        doc.push(table);
        doc.push(elements::Break::new(2));
    }

    // Laporan pengeluaran (bulanan atau tahunan, judul dari pemanggil):
    // ringkasan, rekap per kategori, rekap per periode, lalu tabel detail.
    pub fn render_expense_report(
        &self,
        title: &str,
        rows: &[ExpenseReportRow],
        summary: &ExpenseReportSummary,
    ) -> Result<Vec<u8>, AppError> {
        let mut doc = self.new_document(title)?;

        doc.push(
            elements::Paragraph::new(title)
                .aligned(genpdf::Alignment::Center)
                .styled(style::Style::new().bold().with_font_size(16)),
        );
        doc.push(
            elements::Paragraph::new(ALAMAT_KOS)
                .aligned(genpdf::Alignment::Center)
                .styled(style::Style::new().with_font_size(10)),
        );
        doc.push(elements::Break::new(2));

        doc.push(
            elements::Paragraph::new("RINGKASAN")
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        for line in [
            format!("Total Pengeluaran: {}", format_rupiah(summary.total)),
            format!("Jumlah Transaksi: {}", summary.transaction_count),
        ] {
            doc.push(elements::Paragraph::new(line).styled(style::Style::new().with_font_size(11)));
        }
        doc.push(elements::Break::new(2));

        Self::push_recap_section(&mut doc, "REKAP PER KATEGORI", &summary.by_category);
        Self::push_recap_section(&mut doc, &summary.breakdown_title, &summary.breakdown);

        doc.push(
            elements::Paragraph::new("DETAIL PENGELUARAN")
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        doc.push(elements::Break::new(1));

        let mut table = elements::TableLayout::new(vec![2, 3, 4, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Tanggal").styled(style_bold))
            .element(elements::Paragraph::new("Kategori").styled(style_bold))
            .element(elements::Paragraph::new("Keterangan").styled(style_bold))
            .element(elements::Paragraph::new("Nominal").styled(style_bold))
            .push()
            .expect("Table error");

        for row in rows {
            table
                .row()
                .element(elements::Paragraph::new(
                    row.expense_date.format("%d/%m/%Y").to_string(),
                ))
                .element(elements::Paragraph::new(row.category.clone()))
                .element(elements::Paragraph::new(
                    row.description.clone().unwrap_or_else(|| "-".to_string()),
                ))
                .element(elements::Paragraph::new(format_rupiah(row.amount)))
                .push()
                .expect("Table row error");
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        let mut total_paragraph = elements::Paragraph::new(format!(
            "TOTAL PENGELUARAN: {}",
            format_rupiah(summary.total)
        ));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        Ok(buffer)
    }

    // Laporan tahunan kos: blok ringkasan (termasuk jumlah penghuni
    // aktif dan tingkat hunian) lalu pemasukan dan pengeluaran per bulan
    pub fn render_yearly_report(
        &self,
        year: i32,
        rows: &[MonthlyReportRow],
        total_income: Decimal,
        total_expenses: Decimal,
        active_residents: i64,
        occupancy_rate: f64,
    ) -> Result<Vec<u8>, AppError> {
        let title = format!("LAPORAN KOS TAHUN {}", year);
        let mut doc = self.new_document(&title)?;

        doc.push(
            elements::Paragraph::new(title.clone())
                .aligned(genpdf::Alignment::Center)
                .styled(style::Style::new().bold().with_font_size(16)),
        );
        doc.push(
            elements::Paragraph::new(ALAMAT_KOS)
                .aligned(genpdf::Alignment::Center)
                .styled(style::Style::new().with_font_size(10)),
        );
        doc.push(elements::Break::new(2));

        let mut table = elements::TableLayout::new(vec![3, 3, 2, 3]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Bulan").styled(style_bold))
            .element(elements::Paragraph::new("Pemasukan").styled(style_bold))
            .element(elements::Paragraph::new("Transaksi").styled(style_bold))
            .element(elements::Paragraph::new("Pengeluaran").styled(style_bold))
            .push()
            .expect("Table error");

        for row in rows {
            table
                .row()
                .element(elements::Paragraph::new(row.month.clone()))
                .element(elements::Paragraph::new(format_rupiah(row.income)))
                .element(elements::Paragraph::new(format!("{}", row.payment_count)))
                .element(elements::Paragraph::new(format_rupiah(row.expenses)))
                .push()
                .expect("Table row error");
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        let profit = total_income - total_expenses;
        for line in [
            format!("TOTAL PEMASUKAN: {}", format_rupiah(total_income)),
            format!("TOTAL PENGELUARAN: {}", format_rupiah(total_expenses)),
            format!("LABA BERSIH: {}", format_rupiah(profit)),
            format!("PENGHUNI AKTIF: {}", active_residents),
            format!("TINGKAT HUNIAN: {}", format_persen(occupancy_rate)),
        ] {
            let mut p = elements::Paragraph::new(line);
            p.set_alignment(genpdf::Alignment::Right);
            doc.push(p.styled(style::Style::new().bold().with_font_size(11)));
        }

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rupiah_mengelompokkan_ribuan_dengan_titik() {
        assert_eq!(format_rupiah(dec!(1500000)), "Rp 1.500.000");
        assert_eq!(format_rupiah(dec!(950)), "Rp 950");
        assert_eq!(format_rupiah(dec!(0)), "Rp 0");
        assert_eq!(format_rupiah(dec!(12345678)), "Rp 12.345.678");
    }

    #[test]
    fn rupiah_membuang_pecahan() {
        assert_eq!(format_rupiah(dec!(1500000.50)), "Rp 1.500.000");
    }

    #[test]
    fn nama_file_kwitansi_mengganti_spasi() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        assert_eq!(
            kwitansi_file_name("Budi Santoso", date),
            "kwitansi-Budi_Santoso-2025-02-10.pdf"
        );
    }

    #[test]
    fn nama_file_laporan() {
        assert_eq!(
            laporan_bulanan_file_name(3, 2025),
            "laporan-pengeluaran-maret-2025.pdf"
        );
        assert_eq!(
            laporan_tahunan_file_name(2025),
            "laporan-pengeluaran-tahunan-2025.pdf"
        );
        assert_eq!(laporan_kos_file_name(2025), "laporan-kos-2025.pdf");
    }

    #[test]
    fn persen_satu_angka_di_belakang_koma() {
        assert_eq!(format_persen(70.0), "70.0%");
        assert_eq!(format_persen(66.666), "66.7%");
        assert_eq!(format_persen(0.0), "0.0%");
    }
}
