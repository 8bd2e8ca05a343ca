// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AdminRepository, ExpenseRepository, PaymentRepository, ResidentRepository, RoomRepository,
    },
    services::{
        auth::AuthService, dashboard_service::DashboardService, document_service::DocumentService,
        expense_service::ExpenseService, payment_service::PaymentService,
        resident_service::ResidentService, room_service::RoomService, storage::StorageService,
    },
};

// State global aplikasi: pool database plus semua service yang sudah
// terpasang dependensinya. Clone murah karena isinya Arc dan pool.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub room_service: RoomService,
    pub resident_service: ResidentService,
    pub payment_service: PaymentService,
    pub expense_service: ExpenseService,
    pub dashboard_service: DashboardService,
    pub storage: StorageService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL harus di-set di environment atau .env"))?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET harus di-set di environment atau .env"))?;

        let upload_dir =
            PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()));
        let public_base_url =
            env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let fonts_dir = env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Koneksi ke database berhasil!");

        let admin_repo = AdminRepository::new(db_pool.clone());
        let room_repo = RoomRepository::new(db_pool.clone());
        let resident_repo = ResidentRepository::new(db_pool.clone());
        let payment_repo = PaymentRepository::new(db_pool.clone());
        let expense_repo = ExpenseRepository::new(db_pool.clone());

        let storage = StorageService::new(upload_dir, public_base_url);
        let documents = DocumentService::new(fonts_dir);

        Ok(Self {
            auth_service: AuthService::new(admin_repo, jwt_secret),
            room_service: RoomService::new(room_repo.clone(), resident_repo.clone()),
            resident_service: ResidentService::new(
                resident_repo.clone(),
                room_repo.clone(),
                storage.clone(),
                db_pool.clone(),
            ),
            payment_service: PaymentService::new(
                payment_repo.clone(),
                resident_repo.clone(),
                documents.clone(),
                storage.clone(),
            ),
            expense_service: ExpenseService::new(expense_repo.clone(), documents.clone()),
            dashboard_service: DashboardService::new(
                room_repo,
                resident_repo,
                payment_repo,
                expense_repo,
                documents,
            ),
            storage,
            db_pool,
        })
    }
}
