// src/models/room.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub room_number: i32,
    pub created_at: DateTime<Utc>,
}

// Kamar beserta status hunian TURUNAN. Tidak ada flag terisi yang
// tersimpan; semuanya dihitung ulang dari daftar penghuni aktif.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomOccupancy {
    pub id: i64,

    #[schema(example = 7)]
    pub room_number: i32,

    #[schema(example = 2)]
    pub capacity: i32,

    #[schema(example = 1)]
    pub active_count: i64,

    #[schema(example = 1)]
    pub available_slots: i64,

    pub is_occupied: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomPayload {
    #[validate(range(min = 1, message = "Nomor kamar minimal 1."))]
    pub room_number: i32,
}
