// src/handlers/movements.rs

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::inventory::{
        CreateMovementPayload, MovementMetadata, MovementReceipt, MovementType, MovementWithNames,
        ProductionPayload,
    },
};

#[utoipa::path(
    get,
    path = "/api/movements",
    tag = "Movements",
    responses((status = 200, description = "Movimentações, mais recentes primeiro", body = [MovementWithNames])),
    security(("api_jwt" = []))
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<MovementWithNames>>, AppError> {
    let movements = app_state
        .inventory_service
        .list_movements(user.store_scope())
        .await?;
    Ok(Json(movements))
}

// Registra uma entrada/saída. Saídas por peso podem omitir `quantity` e
// mandar `saleWeight`/`saleWeightUnit`: a fração equivalente de uma unidade
// estocada é derivada do peso de referência do produto.
#[utoipa::path(
    post,
    path = "/api/movements",
    tag = "Movements",
    request_body = CreateMovementPayload,
    responses(
        (status = 200, description = "Movimentação registrada", body = MovementReceipt),
        (status = 400, description = "Estoque insuficiente ou payload inválido"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_movement(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateMovementPayload>,
) -> Result<Json<MovementReceipt>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let quantity = match payload.quantity {
        Some(quantity) => quantity,
        None => {
            let sale_weight = payload.sale_weight.ok_or_else(|| {
                AppError::field_validation("quantity", "Informe a quantidade ou o peso vendido.")
            })?;
            if payload.movement_type != MovementType::Out {
                return Err(AppError::field_validation(
                    "saleWeight",
                    "Venda por peso só se aplica a saídas.",
                ));
            }
            let sale_weight_unit = payload.sale_weight_unit.as_deref().unwrap_or("g");

            app_state
                .inventory_service
                .derive_sale_quantity(&app_state.db_pool, payload.product_id, sale_weight, sale_weight_unit)
                .await?
        }
    };

    let metadata = MovementMetadata {
        observation: payload.observation,
        client_name: payload.client_name,
        client_contact: payload.client_contact,
        payment_status: payload.payment_status,
        payment_due_date: payload.payment_due_date,
    };

    let new_quantity = app_state
        .inventory_service
        .record_movement(
            &app_state.db_pool,
            payload.product_id,
            payload.movement_type,
            quantity,
            user.id,
            user.store_scope(),
            metadata,
        )
        .await?;

    Ok(Json(MovementReceipt {
        success: true,
        new_quantity,
    }))
}

// Produção/fracionamento: debita o produto a granel e credita o fracionado,
// com as duas movimentações espelhadas no livro-razão.
#[utoipa::path(
    post,
    path = "/api/movements/production",
    tag = "Movements",
    request_body = ProductionPayload,
    responses(
        (status = 200, description = "Produção registrada"),
        (status = 400, description = "Estoque insuficiente na origem"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_production(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ProductionPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    app_state
        .inventory_service
        .record_production(
            &app_state.db_pool,
            payload.source_product_id,
            payload.target_product_id,
            payload.quantity_produced,
            payload.quantity_consumed,
            user.id,
            user.store_scope(),
        )
        .await?;

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}
