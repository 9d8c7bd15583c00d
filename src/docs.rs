// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::auth::update_profile,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::reset_password,
        handlers::users::delete_user,

        // --- Stores ---
        handlers::stores::list_stores,
        handlers::stores::create_store,

        // --- Products ---
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Movements ---
        handlers::movements::list_movements,
        handlers::movements::create_movement,
        handlers::movements::record_production,

        // --- Requests ---
        handlers::requests::list_requests,
        handlers::requests::create_request,
        handlers::requests::update_request_status,

        // --- Shipments ---
        handlers::shipments::list_shipments,
        handlers::shipments::create_shipment,
        handlers::shipments::update_shipment_status,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::UserWithStore,
            models::auth::LoginUserPayload,
            models::auth::CreateUserPayload,
            models::auth::UpdateProfilePayload,
            models::auth::ResetPasswordPayload,
            models::auth::AuthResponse,

            // --- Stores ---
            models::store::Store,
            models::store::CreateStorePayload,

            // --- Inventory ---
            models::inventory::MovementType,
            models::inventory::PaymentStatus,
            models::inventory::Product,
            models::inventory::ProductWithStore,
            models::inventory::Movement,
            models::inventory::MovementWithNames,
            models::inventory::CreateProductPayload,
            models::inventory::UpdateProductPayload,
            models::inventory::CreateMovementPayload,
            models::inventory::ProductionPayload,
            models::inventory::MovementReceipt,

            // --- Logistics ---
            models::logistics::RequestStatus,
            models::logistics::ShipmentStatus,
            models::logistics::StockRequest,
            models::logistics::StockRequestWithNames,
            models::logistics::Shipment,
            models::logistics::ShipmentWithStore,
            models::logistics::CreateRequestPayload,
            models::logistics::CreateShipmentPayload,
            models::logistics::UpdateRequestStatusPayload,
            models::logistics::UpdateShipmentStatusPayload,

            // --- Dashboard ---
            models::dashboard::SalesByDay,
            models::dashboard::FinancialEntry,
            models::dashboard::FinancialReport,
            models::dashboard::DashboardStats,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Usuários e Perfil"),
        (name = "Stores", description = "Lojas da Rede"),
        (name = "Products", description = "Catálogo e Estoque"),
        (name = "Movements", description = "Livro-razão de Movimentações"),
        (name = "Requests", description = "Solicitações de Clientes"),
        (name = "Shipments", description = "Remessas entre Lojas"),
        (name = "Dashboard", description = "Indicadores Gerenciais")
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
