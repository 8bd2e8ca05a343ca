// src/services/resident_service.rs

use chrono::Local;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ResidentRepository, RoomRepository},
    models::resident::{
        CreateResidentsPayload, DocumentStatus, EditOccupantsPayload, Resident,
        ResidentHistoryEntry, ResidentWithRoom, UpdateResidentPayload,
    },
    services::{billing_period, occupancy, storage::StorageService},
};

// Jenis dokumen identitas yang bisa dilampirkan ke penghuni
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Ktp,
    SuratNikah,
}

#[derive(Clone)]
pub struct ResidentService {
    resident_repo: ResidentRepository,
    room_repo: RoomRepository,
    storage: StorageService,
    pool: PgPool, // Pool untuk memulai transaksi
}

impl ResidentService {
    pub fn new(
        resident_repo: ResidentRepository,
        room_repo: RoomRepository,
        storage: StorageService,
        pool: PgPool,
    ) -> Self {
        Self {
            resident_repo,
            room_repo,
            storage,
            pool,
        }
    }

    // LOGIKA BISNIS: daftarkan satu rombongan penghuni ke satu kamar.
    // Kamar harus benar-benar kosong (alur tambah tidak menawarkan kamar
    // terisi sebagian), dan jumlah penghuni tidak boleh melebihi
    // kapasitas. Semua record masuk dalam satu transaksi.
    pub async fn create_group(
        &self,
        payload: &CreateResidentsPayload,
    ) -> Result<Vec<Resident>, AppError> {
        let room = self
            .room_repo
            .find_by_id(payload.room_id)
            .await?
            .ok_or(AppError::RoomNotFound)?;

        let capacity = occupancy::room_capacity(room.room_number);
        let active = self.resident_repo.get_active_by_room(room.id).await?;

        if !occupancy::offerable_for_new_group(capacity, active.len() as i64) {
            return Err(AppError::RoomNotVacant);
        }
        if payload.occupants.len() as i32 > capacity {
            return Err(AppError::RoomCapacityExceeded(capacity));
        }

        let mut tx = self.pool.begin().await?;

        let mut created = Vec::with_capacity(payload.occupants.len());
        for occupant in &payload.occupants {
            let resident = self
                .resident_repo
                .create(
                    &mut *tx,
                    room.id,
                    &occupant.full_name,
                    &occupant.phone_number,
                    occupant.entry_date,
                    occupant.marital_status.as_deref(),
                )
                .await?;
            created.push(resident);
        }

        tx.commit().await?;

        tracing::info!(
            "👤 {} penghuni terdaftar di kamar {}",
            created.len(),
            room.room_number
        );
        Ok(created)
    }

    pub async fn update_resident(
        &self,
        id: Uuid,
        payload: &UpdateResidentPayload,
    ) -> Result<Resident, AppError> {
        self.room_repo
            .find_by_id(payload.room_id)
            .await?
            .ok_or(AppError::RoomNotFound)?;

        self.resident_repo
            .update(
                &self.pool,
                id,
                payload.room_id,
                &payload.full_name,
                &payload.phone_number,
                payload.entry_date,
                payload.marital_status.as_deref(),
            )
            .await
    }

    // Edit penghuni satu kamar berkapasitas >1: blok dengan resident_id
    // meng-update record itu, blok tanpa id mengisi slot kosong.
    // Pencocokan berdasarkan id eksplisit, bukan posisi array.
    pub async fn edit_room_occupants(
        &self,
        room_id: i64,
        payload: &EditOccupantsPayload,
    ) -> Result<Vec<Resident>, AppError> {
        let room = self
            .room_repo
            .find_by_id(room_id)
            .await?
            .ok_or(AppError::RoomNotFound)?;

        let capacity = occupancy::room_capacity(room.room_number);
        let active = self.resident_repo.get_active_by_room(room.id).await?;

        let existing_ids: Vec<Uuid> = active.iter().map(|r| r.id).collect();
        let new_slots = payload
            .occupants
            .iter()
            .filter(|o| o.resident_id.is_none())
            .count() as i64;

        // Slot yang diisi blok baru harus muat di sisa kapasitas
        if active.len() as i64 + new_slots > capacity as i64 {
            return Err(AppError::RoomCapacityExceeded(capacity));
        }
        // Blok ber-id harus memang penghuni aktif kamar ini
        for slot in &payload.occupants {
            if let Some(rid) = slot.resident_id {
                if !existing_ids.contains(&rid) {
                    return Err(AppError::ResidentNotFound);
                }
            }
        }

        let mut tx = self.pool.begin().await?;

        let mut result = Vec::with_capacity(payload.occupants.len());
        for slot in &payload.occupants {
            let resident = match slot.resident_id {
                Some(rid) => {
                    self.resident_repo
                        .update(
                            &mut *tx,
                            rid,
                            room.id,
                            &slot.full_name,
                            &slot.phone_number,
                            slot.entry_date,
                            slot.marital_status.as_deref(),
                        )
                        .await?
                }
                None => {
                    self.resident_repo
                        .create(
                            &mut *tx,
                            room.id,
                            &slot.full_name,
                            &slot.phone_number,
                            slot.entry_date,
                            slot.marital_status.as_deref(),
                        )
                        .await?
                }
            };
            result.push(resident);
        }

        tx.commit().await?;
        Ok(result)
    }

    // Tandai sudah keluar: status, tanggal keluar hari ini, flag lama.
    // Hunian kamar otomatis terkoreksi karena selalu diturunkan.
    pub async fn checkout(&self, id: Uuid) -> Result<Resident, AppError> {
        let today = Local::now().date_naive();
        let resident = self.resident_repo.mark_exited(id, today).await?;

        tracing::info!("🚪 Penghuni {} keluar per {}", resident.full_name, today);
        Ok(resident)
    }

    pub async fn delete_resident(&self, id: Uuid) -> Result<(), AppError> {
        self.resident_repo.delete(id).await
    }

    pub async fn list_active(&self) -> Result<Vec<ResidentWithRoom>, AppError> {
        self.resident_repo.get_active_with_room().await
    }

    pub async fn list_room_occupants(&self, room_id: i64) -> Result<Vec<Resident>, AppError> {
        self.room_repo
            .find_by_id(room_id)
            .await?
            .ok_or(AppError::RoomNotFound)?;
        self.resident_repo.get_active_by_room(room_id).await
    }

    pub async fn history(&self) -> Result<Vec<ResidentHistoryEntry>, AppError> {
        let exited = self.resident_repo.get_history().await?;

        let entries = exited
            .into_iter()
            .filter_map(|r| {
                // Baris riwayat tanpa tanggal keluar adalah data korup;
                // lewati saja daripada mengarang durasi
                let exit_date = r.tanggal_keluar?;
                Some(ResidentHistoryEntry {
                    id: r.id,
                    full_name: r.full_name,
                    room_number: r.room_number,
                    entry_date: r.entry_date,
                    tanggal_keluar: exit_date,
                    stay_duration: billing_period::stay_duration(r.entry_date, exit_date),
                })
            })
            .collect();

        Ok(entries)
    }

    // Penghuni yang fase lampir-dokumennya belum selesai, agar operator
    // bisa mengulang upload.
    pub async fn pending_documents(&self) -> Result<Vec<ResidentWithRoom>, AppError> {
        self.resident_repo.get_pending_documents().await
    }

    // Fase kedua penulisan dua fase: simpan file dulu, baru record
    // penghuni diberi URL-nya. Kalau penyimpanan gagal, record dasar
    // tetap utuh dengan status PENDING.
    pub async fn attach_document(
        &self,
        id: Uuid,
        kind: DocumentKind,
        extension: &str,
        bytes: &[u8],
    ) -> Result<Resident, AppError> {
        let resident = self
            .resident_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ResidentNotFound)?;

        let suffix = match kind {
            DocumentKind::Ktp => "ktp",
            DocumentKind::SuratNikah => "surat-nikah",
        };
        let file_name = format!("{}-{}.{}", resident.id, suffix, extension);

        let url = self.storage.save_document(&file_name, bytes).await?;

        let updated = match kind {
            DocumentKind::Ktp => self.resident_repo.attach_ktp_url(id, &url).await?,
            DocumentKind::SuratNikah => {
                self.resident_repo.attach_marriage_cert_url(id, &url).await?
            }
        };

        debug_assert_eq!(updated.document_status, DocumentStatus::Attached);
        Ok(updated)
    }
}
