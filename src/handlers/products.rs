// src/handlers/products.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        auth::Role,
        inventory::{CreateProductPayload, Product, ProductEdit, ProductWithStore, UpdateProductPayload},
    },
};

// Admin enxerga os produtos da própria loja; superadmin enxerga a rede
// inteira, com o nome da loja em cada linha.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses((status = 200, description = "Lista de produtos", body = [ProductWithStore])),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let response = match user.role {
        Role::Superadmin => {
            Json(app_state.inventory_service.list_all_products().await?).into_response()
        }
        Role::Admin => {
            let store_id = user.store_id.ok_or(AppError::AccessDenied)?;
            Json(app_state.inventory_service.list_store_products(store_id).await?).into_response()
        }
    };
    Ok(response)
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateProductPayload>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // Admin cria sempre na própria loja; superadmin escolhe o destino.
    let store_id = match user.role {
        Role::Admin => user.store_id.ok_or(AppError::AccessDenied)?,
        Role::Superadmin => payload.store_id.ok_or_else(|| {
            AppError::field_validation("storeId", "Informe a loja do produto.")
        })?,
    };

    let product = app_state
        .inventory_service
        .create_product(
            &app_state.db_pool,
            store_id,
            &payload.name,
            payload.description.as_deref(),
            payload.category.as_deref(),
            payload.weight,
            &payload.unit,
            payload.stock_quantity,
            payload.image.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// Edição de produto. Alterar o saldo por aqui gera a movimentação de ajuste
// automaticamente (trilha de auditoria completa).
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<Json<Product>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let edit = ProductEdit {
        name: payload.name,
        description: payload.description,
        category: payload.category,
        weight: payload.weight,
        unit: payload.unit,
        stock_quantity: payload.stock_quantity,
        image: payload.image,
    };

    let updated = app_state
        .inventory_service
        .apply_product_edit(&app_state.db_pool, id, edit, user.id, user.store_scope())
        .await?;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    app_state
        .inventory_service
        .delete_product(&app_state.db_pool, id, user.store_scope())
        .await?;

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}
