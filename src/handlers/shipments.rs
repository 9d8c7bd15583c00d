// src/handlers/shipments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::Superadmin,
    models::logistics::{
        CreateShipmentPayload, Shipment, ShipmentWithStore, UpdateShipmentStatusPayload,
    },
};

// Remessas são uma operação de rede, restritas a superadmin.
#[utoipa::path(
    get,
    path = "/api/shipments",
    tag = "Shipments",
    responses(
        (status = 200, description = "Remessas com a loja de destino", body = [ShipmentWithStore]),
        (status = 403, description = "Apenas superadmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_shipments(
    State(app_state): State<AppState>,
    Superadmin(_user): Superadmin,
) -> Result<Json<Vec<ShipmentWithStore>>, AppError> {
    let shipments = app_state.logistics_service.list_shipments().await?;
    Ok(Json(shipments))
}

#[utoipa::path(
    post,
    path = "/api/shipments",
    tag = "Shipments",
    request_body = CreateShipmentPayload,
    responses(
        (status = 201, description = "Remessa criada", body = Shipment),
        (status = 404, description = "Loja de destino não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_shipment(
    State(app_state): State<AppState>,
    Superadmin(_user): Superadmin,
    Json(payload): Json<CreateShipmentPayload>,
) -> Result<(StatusCode, Json<Shipment>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let shipment = app_state.logistics_service.create_shipment(payload).await?;
    Ok((StatusCode::CREATED, Json(shipment)))
}

// pending -> sent -> received; o recebimento reconcilia a remessa com o
// estoque da loja de destino (produto criado na hora se o nome não casar).
#[utoipa::path(
    put,
    path = "/api/shipments/{id}/status",
    tag = "Shipments",
    params(("id" = Uuid, Path, description = "ID da remessa")),
    request_body = UpdateShipmentStatusPayload,
    responses(
        (status = 200, description = "Status atualizado"),
        (status = 400, description = "Transição de status inválida"),
        (status = 404, description = "Remessa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_shipment_status(
    State(app_state): State<AppState>,
    Superadmin(user): Superadmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateShipmentStatusPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    app_state
        .logistics_service
        .update_shipment_status(id, payload.status, &user)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}
