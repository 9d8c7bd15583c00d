// src/handlers/stores.rs

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, Superadmin},
    models::store::{CreateStorePayload, Store},
};

// Qualquer usuário autenticado pode listar as lojas (os formulários de
// remessa e solicitação precisam delas).
#[utoipa::path(
    get,
    path = "/api/stores",
    tag = "Stores",
    responses((status = 200, description = "Lista de lojas", body = [Store])),
    security(("api_jwt" = []))
)]
pub async fn list_stores(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<Json<Vec<Store>>, AppError> {
    let stores = app_state.store_service.list_stores().await?;
    Ok(Json(stores))
}

#[utoipa::path(
    post,
    path = "/api/stores",
    tag = "Stores",
    request_body = CreateStorePayload,
    responses(
        (status = 201, description = "Loja criada", body = Store),
        (status = 403, description = "Apenas superadmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_store(
    State(app_state): State<AppState>,
    Superadmin(_user): Superadmin,
    Json(payload): Json<CreateStorePayload>,
) -> Result<(StatusCode, Json<Store>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let store = app_state
        .store_service
        .create_store(&payload.name, payload.location.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(store)))
}
