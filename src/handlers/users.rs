// src/handlers/users.rs

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
    models::auth::{CreateUserPayload, ResetPasswordPayload, UserWithStore},
};

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Lista de usuários com a loja resolvida", body = [UserWithStore]),
        (status = 403, description = "Apenas superadmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    Superadmin(_user): Superadmin,
) -> Result<Json<Vec<UserWithStore>>, AppError> {
    let users = app_state.auth_service.list_users().await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = UserWithStore),
        (status = 409, description = "E-mail já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    Superadmin(_user): Superadmin,
    Json(payload): Json<CreateUserPayload>,
) -> Result<(StatusCode, Json<UserWithStore>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let new_user = app_state.auth_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(new_user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/reset-password",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = ResetPasswordPayload,
    responses(
        (status = 200, description = "Senha redefinida"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn reset_password(
    State(app_state): State<AppState>,
    Superadmin(_user): Superadmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    app_state.auth_service.reset_password(id, &payload.password).await?;
    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário removido"),
        (status = 400, description = "Exclusão do próprio usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    Superadmin(user): Superadmin,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    app_state.auth_service.delete_user(&user, id).await?;
    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}
