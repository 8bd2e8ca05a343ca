// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Kamar ---
        handlers::rooms::list_rooms,

        // --- Pembayaran ---
        handlers::payments::list_payments,
        handlers::payments::download_kwitansi,
        handlers::payments::share_whatsapp,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            // --- Kamar ---
            models::room::Room,
            models::room::RoomOccupancy,

            // --- Penghuni ---
            models::resident::ResidentStatus,
            models::resident::DocumentStatus,
            models::resident::Resident,
            models::resident::ResidentWithRoom,
            models::resident::ResidentHistoryEntry,
            models::resident::OccupantPayload,
            models::resident::CreateResidentsPayload,
            models::resident::OccupantSlotPayload,
            models::resident::EditOccupantsPayload,

            // --- Pembayaran ---
            models::payment::Payment,
            models::payment::PaymentWithResident,
            models::payment::PaymentCandidate,
            models::payment::CreatePaymentPayload,
            models::payment::ShareReceiptResponse,

            // --- Pengeluaran ---
            models::expense::ExpenseCategory,
            models::expense::Expense,
            models::expense::ExpenseSummary,
            models::expense::CreateExpensePayload,

            // --- Dashboard & Laporan ---
            models::dashboard::DashboardSummary,
            models::dashboard::MonthlyReportEntry,
            models::dashboard::YearlyReportSummary,
        )
    ),
    tags(
        (name = "Kamar", description = "Kamar dan status huniannya"),
        (name = "Pembayaran", description = "Pencatatan pembayaran sewa dan kwitansi"),
        (name = "Dashboard", description = "Ringkasan hunian dan keuangan")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
