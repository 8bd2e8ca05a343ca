// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() pantas di sini: kalau konfigurasi gagal, aplikasi
    // memang tidak boleh jalan.
    let app_state = AppState::new()
        .await
        .expect("Gagal menginisialisasi state aplikasi.");

    // Jalankan migrasi SQLx saat startup
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Gagal menjalankan migrasi database.");

    tracing::info!("✅ Migrasi database berhasil dijalankan!");

    // Rute autentikasi (publik)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // /api/auth/me tetap di bawah penjaga
    let me_routes = Router::new().route("/me", get(handlers::auth::get_me));

    let room_routes = Router::new()
        .route(
            "/",
            get(handlers::rooms::list_rooms).post(handlers::rooms::create_room),
        )
        .route("/available", get(handlers::rooms::list_available_rooms))
        .route(
            "/{room_id}/occupants",
            get(handlers::residents::list_room_occupants)
                .put(handlers::residents::edit_room_occupants),
        );

    let resident_routes = Router::new()
        .route(
            "/",
            get(handlers::residents::list_residents).post(handlers::residents::create_residents),
        )
        .route("/history", get(handlers::residents::resident_history))
        .route(
            "/pending-documents",
            get(handlers::residents::pending_documents),
        )
        .route(
            "/{id}",
            put(handlers::residents::update_resident)
                .delete(handlers::residents::delete_resident),
        )
        .route("/{id}/checkout", post(handlers::residents::checkout_resident))
        .route(
            "/{id}/documents/{kind}",
            put(handlers::residents::upload_document),
        );

    let payment_routes = Router::new()
        .route(
            "/",
            get(handlers::payments::list_payments).post(handlers::payments::create_payment),
        )
        .route("/candidates", get(handlers::payments::list_candidates))
        .route(
            "/{id}",
            put(handlers::payments::update_payment).delete(handlers::payments::delete_payment),
        )
        .route("/{id}/kwitansi", get(handlers::payments::download_kwitansi))
        .route(
            "/{id}/share-whatsapp",
            post(handlers::payments::share_whatsapp),
        );

    let expense_routes = Router::new()
        .route(
            "/",
            get(handlers::expenses::list_expenses).post(handlers::expenses::create_expense),
        )
        .route("/summary", get(handlers::expenses::expense_summary))
        .route("/categories", get(handlers::expenses::list_categories))
        .route(
            "/{id}",
            put(handlers::expenses::update_expense).delete(handlers::expenses::delete_expense),
        );

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route(
            "/recent-residents",
            get(handlers::dashboard::recent_residents),
        );

    let report_routes = Router::new()
        .route("/summary", get(handlers::reports::yearly_report))
        .route("/yearly/{year}/pdf", get(handlers::reports::yearly_report_pdf))
        .route(
            "/expenses/{year}/pdf",
            get(handlers::reports::expenses_yearly_pdf),
        )
        .route(
            "/expenses/{year}/{month}/pdf",
            get(handlers::reports::expenses_monthly_pdf),
        );

    // Semua rute admin lewat penjaga token
    let protected_routes = Router::new()
        .nest("/api/auth", me_routes)
        .nest("/api/rooms", room_routes)
        .nest("/api/residents", resident_routes)
        .nest("/api/payments", payment_routes)
        .nest("/api/expenses", expense_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/reports", report_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        // Kwitansi dan foto dokumen di-serve publik (link di pesan
        // WhatsApp harus bisa dibuka tanpa login)
        .nest_service(
            "/uploads",
            ServeDir::new(app_state.storage.upload_dir()),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Gagal membuka listener TCP");
    tracing::info!("🚀 Server berjalan di {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Server Axum berhenti dengan error");
}
