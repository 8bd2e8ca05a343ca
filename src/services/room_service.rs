// src/services/room_service.rs

use crate::{
    common::error::AppError,
    db::{ResidentRepository, RoomRepository},
    models::room::{Room, RoomOccupancy},
    services::occupancy,
};

#[derive(Clone)]
pub struct RoomService {
    room_repo: RoomRepository,
    resident_repo: ResidentRepository,
}

impl RoomService {
    pub fn new(room_repo: RoomRepository, resident_repo: ResidentRepository) -> Self {
        Self {
            room_repo,
            resident_repo,
        }
    }

    pub async fn create_room(&self, room_number: i32) -> Result<Room, AppError> {
        self.room_repo.create_room(room_number).await
    }

    // Semua kamar dengan status hunian TURUNAN: satu fetch daftar
    // penghuni aktif, lalu fold murni, tidak ada flag tersimpan yang
    // bisa basi.
    pub async fn list_with_occupancy(&self) -> Result<Vec<RoomOccupancy>, AppError> {
        let rooms = self.room_repo.get_all().await?;
        let residents = self.resident_repo.get_all_active().await?;
        let counts = occupancy::active_count_by_room(&residents);

        let occupancies = rooms
            .into_iter()
            .map(|room| {
                let capacity = occupancy::room_capacity(room.room_number);
                let active_count = counts.get(&room.id).copied().unwrap_or(0);
                RoomOccupancy {
                    id: room.id,
                    room_number: room.room_number,
                    capacity,
                    active_count,
                    available_slots: occupancy::available_slots(capacity, active_count),
                    is_occupied: active_count > 0,
                }
            })
            .collect();

        Ok(occupancies)
    }

    // Kamar yang boleh ditawarkan ke alur tambah penghuni: hanya yang
    // benar-benar kosong.
    pub async fn list_available(&self) -> Result<Vec<RoomOccupancy>, AppError> {
        let rooms = self.list_with_occupancy().await?;
        Ok(rooms
            .into_iter()
            .filter(|r| occupancy::offerable_for_new_group(r.capacity, r.active_count))
            .collect())
    }
}
