// src/handlers/requests.rs

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
    middleware::auth::AuthenticatedUser,
    models::logistics::{
        CreateRequestPayload, RequestStatus, StockRequest, StockRequestWithNames,
        UpdateRequestStatusPayload,
    },
};

#[utoipa::path(
    get,
    path = "/api/requests",
    tag = "Requests",
    responses((status = 200, description = "Solicitações de clientes", body = [StockRequestWithNames])),
    security(("api_jwt" = []))
)]
pub async fn list_requests(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<StockRequestWithNames>>, AppError> {
    let requests = app_state
        .logistics_service
        .list_requests(user.store_scope())
        .await?;
    Ok(Json(requests))
}

#[utoipa::path(
    post,
    path = "/api/requests",
    tag = "Requests",
    request_body = CreateRequestPayload,
    responses(
        (status = 201, description = "Solicitação registrada", body = StockRequest),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_request(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Json(payload): Json<CreateRequestPayload>,
) -> Result<(StatusCode, Json<StockRequest>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let request = app_state.logistics_service.create_request(payload).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

// Atender a solicitação dá baixa no estoque pelo livro-razão; sem saldo
// suficiente ela continua pendente.
#[utoipa::path(
    put,
    path = "/api/requests/{id}/status",
    tag = "Requests",
    params(("id" = Uuid, Path, description = "ID da solicitação")),
    request_body = UpdateRequestStatusPayload,
    responses(
        (status = 200, description = "Solicitação atendida"),
        (status = 400, description = "Estoque insuficiente ou transição inválida"),
        (status = 404, description = "Solicitação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_request_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequestStatusPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    match payload.status {
        RequestStatus::Completed => {
            app_state.logistics_service.complete_request(id, &user).await?;
        }
        RequestStatus::Pending => {
            // Não há caminho de volta para 'pending'.
            return Err(AppError::InvalidStatusTransition("completed", "pending"));
        }
    }

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}
