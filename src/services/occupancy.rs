// src/services/occupancy.rs
//
// Perhitungan hunian kamar. Murni: bekerja di atas daftar penghuni yang
// sudah di-fetch, tidak pernah query balik ke database. Status terisi
// sebuah kamar SELALU diturunkan dari sini, tidak pernah disimpan.

use std::collections::HashMap;

use crate::models::resident::{Resident, ResidentStatus};

// Aturan bisnis kapasitas: kamar nomor 7 s/d 15 muat 2 orang,
// selain itu 1 orang.
pub fn room_capacity(room_number: i32) -> i32 {
    if (7..=15).contains(&room_number) { 2 } else { 1 }
}

// Peta room_id -> jumlah penghuni berstatus Aktif di kamar itu.
pub fn active_count_by_room(residents: &[Resident]) -> HashMap<i64, i64> {
    let mut counts = HashMap::new();
    for r in residents {
        if r.status_penghuni == ResidentStatus::Aktif {
            *counts.entry(r.room_id).or_insert(0) += 1;
        }
    }
    counts
}

pub fn available_slots(capacity: i32, active_count: i64) -> i64 {
    (capacity as i64 - active_count).max(0)
}

// Kamar hanya ditawarkan ke alur "tambah penghuni" kalau benar-benar
// kosong. Kamar kapasitas 2 yang terisi sebagian hanya bisa diisi lewat
// alur edit penghuni kamar itu sendiri.
pub fn offerable_for_new_group(capacity: i32, active_count: i64) -> bool {
    available_slots(capacity, active_count) == capacity as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    use crate::models::resident::DocumentStatus;

    fn resident(room_id: i64, status: ResidentStatus) -> Resident {
        Resident {
            id: Uuid::new_v4(),
            full_name: "Budi".to_string(),
            phone_number: "0812".to_string(),
            room_id,
            entry_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            marital_status: None,
            status_penghuni: status,
            is_active: status == ResidentStatus::Aktif,
            tanggal_keluar: None,
            ktp_image_url: None,
            marriage_cert_url: None,
            document_status: DocumentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn capacity_band_boundaries() {
        assert_eq!(room_capacity(6), 1);
        assert_eq!(room_capacity(7), 2);
        assert_eq!(room_capacity(15), 2);
        assert_eq!(room_capacity(16), 1);
        assert_eq!(room_capacity(1), 1);
    }

    #[test]
    fn counts_only_active_residents() {
        let residents = vec![
            resident(1, ResidentStatus::Aktif),
            resident(1, ResidentStatus::SudahKeluar),
            resident(2, ResidentStatus::Aktif),
            resident(2, ResidentStatus::Aktif),
        ];
        let counts = active_count_by_room(&residents);
        assert_eq!(counts.get(&1), Some(&1));
        assert_eq!(counts.get(&2), Some(&2));
        assert_eq!(counts.get(&3), None);
    }

    #[test]
    fn available_slots_never_negative() {
        assert_eq!(available_slots(1, 1), 0);
        assert_eq!(available_slots(2, 1), 1);
        assert_eq!(available_slots(2, 0), 2);
        // Data lama bisa saja over-kapasitas; jangan sampai negatif
        assert_eq!(available_slots(1, 3), 0);
    }

    #[test]
    fn only_fully_vacant_rooms_offered_to_new_groups() {
        assert!(offerable_for_new_group(1, 0));
        assert!(offerable_for_new_group(2, 0));
        assert!(!offerable_for_new_group(2, 1));
        assert!(!offerable_for_new_group(1, 1));
    }

    #[test]
    fn exited_resident_leaves_the_count() {
        let mut residents = vec![resident(5, ResidentStatus::Aktif)];
        assert_eq!(active_count_by_room(&residents).get(&5), Some(&1));

        residents[0].status_penghuni = ResidentStatus::SudahKeluar;
        assert_eq!(active_count_by_room(&residents).get(&5), None);
    }
}
