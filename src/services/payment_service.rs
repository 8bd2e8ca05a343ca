// src/services/payment_service.rs

use std::collections::HashSet;

use chrono::{Datelike, Local};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{PaymentRepository, ResidentRepository},
    models::payment::{
        CreatePaymentPayload, Payment, PaymentCandidate, PaymentWithResident,
        ShareReceiptResponse,
    },
    services::{
        billing_period,
        document_service::{self, DocumentService, KwitansiData},
        storage::{self, StorageService},
    },
};

// Teks pesan WhatsApp untuk membagikan kwitansi. Murni supaya bisa
// diuji tanpa jaringan.
pub fn whatsapp_message(period_month: u32, period_year: i32, receipt_url: &str) -> String {
    format!(
        "Berikut kwitansi pembayaran kos bulan {} {}: {}",
        billing_period::month_name(period_month),
        period_year,
        receipt_url
    )
}

pub fn whatsapp_share_url(message: &str) -> String {
    format!("https://wa.me/?text={}", urlencoding::encode(message))
}

// Penghuni yang sudah bayar periode berjalan tidak ditawarkan lagi
// sebagai kandidat. Urutan sisanya dipertahankan.
pub fn exclude_paid(
    candidates: Vec<PaymentCandidate>,
    paid: &HashSet<Uuid>,
) -> Vec<PaymentCandidate> {
    candidates
        .into_iter()
        .filter(|c| !paid.contains(&c.id))
        .collect()
}

#[derive(Clone)]
pub struct PaymentService {
    payment_repo: PaymentRepository,
    resident_repo: ResidentRepository,
    documents: DocumentService,
    storage: StorageService,
}

impl PaymentService {
    pub fn new(
        payment_repo: PaymentRepository,
        resident_repo: ResidentRepository,
        documents: DocumentService,
        storage: StorageService,
    ) -> Self {
        Self {
            payment_repo,
            resident_repo,
            documents,
            storage,
        }
    }

    // Daftar pembayaran satu bulan kalender. Tanpa filter eksplisit,
    // bulan berjalan.
    pub async fn list_for_month(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Vec<PaymentWithResident>, AppError> {
        let today = Local::now().date_naive();
        let year = year.unwrap_or_else(|| today.year());
        let month = month.unwrap_or_else(|| today.month());

        let (start, end) = billing_period::month_range(year, month)
            .ok_or(AppError::InvalidMonth)?;

        self.payment_repo.list_in_range(start, end).await
    }

    // Penghuni aktif yang belum tercatat bayar untuk periode berjalan
    pub async fn candidates(&self) -> Result<Vec<PaymentCandidate>, AppError> {
        let today = Local::now().date_naive();

        let active = self.payment_repo.active_with_rooms().await?;
        let paid: HashSet<Uuid> = self
            .payment_repo
            .paid_resident_ids(today.month() as i32, today.year())
            .await?
            .into_iter()
            .collect();

        Ok(exclude_paid(active, &paid))
    }

    pub async fn create_payment(
        &self,
        payload: &CreatePaymentPayload,
    ) -> Result<Payment, AppError> {
        if payload.amount.is_sign_negative() {
            return Err(AppError::NegativeAmount);
        }
        self.resident_repo
            .find_by_id(payload.resident_id)
            .await?
            .ok_or(AppError::ResidentNotFound)?;

        let payment = self
            .payment_repo
            .create(
                payload.resident_id,
                payload.payment_date,
                payload.period_month,
                payload.period_year,
                payload.amount,
                &payload.payment_method,
            )
            .await?;

        tracing::info!(
            "💰 Pembayaran {} tercatat untuk periode {}/{}",
            payment.id,
            payment.period_month,
            payment.period_year
        );
        Ok(payment)
    }

    pub async fn update_payment(
        &self,
        id: Uuid,
        payload: &CreatePaymentPayload,
    ) -> Result<Payment, AppError> {
        if payload.amount.is_sign_negative() {
            return Err(AppError::NegativeAmount);
        }
        self.payment_repo
            .update(
                id,
                payload.resident_id,
                payload.payment_date,
                payload.period_month,
                payload.period_year,
                payload.amount,
                &payload.payment_method,
            )
            .await
    }

    pub async fn delete_payment(&self, id: Uuid) -> Result<(), AppError> {
        self.payment_repo.delete(id).await
    }

    fn kwitansi_data(&self, payment: &PaymentWithResident, with_url: bool) -> KwitansiData {
        let periode = billing_period::format_periode(payment.entry_date, payment.payment_date);

        // URL publik deterministik dari nama file, jadi bisa ikut
        // dirender sebagai QR sebelum file tersimpan
        let receipt_url = with_url.then(|| {
            let file_name =
                document_service::kwitansi_file_name(&payment.full_name, payment.payment_date);
            self.storage
                .public_url(storage::KWITANSI_BUCKET, &file_name)
        });

        KwitansiData {
            full_name: payment.full_name.clone(),
            room_number: payment.room_number,
            periode,
            amount: payment.amount,
            payment_date: payment.payment_date,
            payment_method: payment.payment_method.clone(),
            receipt_url,
        }
    }

    // Unduh kwitansi langsung: render ke memori, tanpa menyentuh storage
    pub async fn generate_kwitansi(&self, id: Uuid) -> Result<(Vec<u8>, String), AppError> {
        let payment = self
            .payment_repo
            .find_with_resident(id)
            .await?
            .ok_or(AppError::PaymentNotFound)?;

        let data = self.kwitansi_data(&payment, false);
        let bytes = self.documents.render_kwitansi(&data)?;
        let file_name =
            document_service::kwitansi_file_name(&payment.full_name, payment.payment_date);

        Ok((bytes, file_name))
    }

    // Bagikan lewat WhatsApp: render PDF, simpan ke storage, baru
    // setelah itu URL dicatat di record pembayaran. Kalau penyimpanan
    // gagal, record tetap tanpa URL.
    pub async fn share_via_whatsapp(&self, id: Uuid) -> Result<ShareReceiptResponse, AppError> {
        let payment = self
            .payment_repo
            .find_with_resident(id)
            .await?
            .ok_or(AppError::PaymentNotFound)?;

        let data = self.kwitansi_data(&payment, true);
        let bytes = self.documents.render_kwitansi(&data)?;

        let file_name =
            document_service::kwitansi_file_name(&payment.full_name, payment.payment_date);
        let receipt_url = self.storage.save_kwitansi(&file_name, &bytes).await?;

        self.payment_repo.set_receipt_url(id, &receipt_url).await?;

        let message = whatsapp_message(
            payment.period_month as u32,
            payment.period_year,
            &receipt_url,
        );

        Ok(ShareReceiptResponse {
            whatsapp_url: whatsapp_share_url(&message),
            receipt_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pesan_whatsapp_menyebut_bulan_dan_url() {
        let msg = whatsapp_message(2, 2025, "http://localhost:3000/uploads/kwitansi/k.pdf");
        assert_eq!(
            msg,
            "Berikut kwitansi pembayaran kos bulan Februari 2025: http://localhost:3000/uploads/kwitansi/k.pdf"
        );
    }

    #[test]
    fn url_whatsapp_terencode() {
        let url = whatsapp_share_url("kwitansi bulan Maret: http://x/a b.pdf");
        assert!(url.starts_with("https://wa.me/?text="));
        assert!(!url.contains(' '));
        assert!(url.contains("Maret"));
    }

    #[test]
    fn bulan_tidak_dikenal_jadi_strip() {
        let msg = whatsapp_message(13, 2025, "http://x");
        assert!(msg.contains("bulan - 2025"));
    }

    fn kandidat(id: Uuid, name: &str, room: i32) -> PaymentCandidate {
        PaymentCandidate {
            id,
            full_name: name.to_string(),
            room_number: room,
        }
    }

    // Penghuni dengan pembayaran periode berjalan tidak boleh muncul
    // lagi di daftar kandidat; yang lain tetap urut nomor kamar.
    #[test]
    fn kandidat_yang_sudah_bayar_tersaring() {
        let budi_id = Uuid::new_v4();
        let sari_id = Uuid::new_v4();
        let tono_id = Uuid::new_v4();

        let active = vec![
            kandidat(budi_id, "Budi Santoso", 2),
            kandidat(sari_id, "Sari Dewi", 5),
            kandidat(tono_id, "Tono Wijaya", 9),
        ];
        let paid = HashSet::from([sari_id]);

        let result = exclude_paid(active, &paid);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].full_name, "Budi Santoso");
        assert_eq!(result[1].full_name, "Tono Wijaya");
        assert!(result.iter().all(|c| c.id != sari_id));
    }

    #[test]
    fn tanpa_pembayaran_semua_penghuni_aktif_jadi_kandidat() {
        let active = vec![
            kandidat(Uuid::new_v4(), "Budi Santoso", 2),
            kandidat(Uuid::new_v4(), "Sari Dewi", 5),
        ];
        let result = exclude_paid(active, &HashSet::new());
        assert_eq!(result.len(), 2);
    }
}
