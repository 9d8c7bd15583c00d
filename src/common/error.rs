use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    AccessDenied,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Loja não encontrada")]
    StoreNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Solicitação não encontrada")]
    RequestNotFound,

    #[error("Remessa não encontrada")]
    ShipmentNotFound,

    // Regra de negócio do livro-razão: saída maior que o saldo disponível.
    // Carrega o saldo atual para o chamador poder exibi-lo.
    #[error("Estoque insuficiente (disponível: {available})")]
    InsufficientStock { available: Decimal },

    #[error("Transição de status inválida: {0} -> {1}")]
    InvalidStatusTransition(&'static str, &'static str),

    #[error("Não é possível excluir o próprio usuário")]
    SelfDeletion,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Monta um `ValidationError` manual para regras que o derive do
    /// `validator` não expressa (ex.: quantidade positiva em `Decimal`).
    pub fn field_validation(field: &'static str, message: &'static str) -> Self {
        let mut error = ValidationError::new("invalid");
        error.message = Some(message.into());
        let mut errors = ValidationErrors::new();
        errors.add(field, error);
        AppError::ValidationError(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // Estoque insuficiente devolve o saldo disponível junto.
            AppError::InsufficientStock { available } => {
                let body = Json(json!({
                    "error": "Estoque insuficiente.",
                    "available": available,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string()),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente.".to_string()),
            AppError::AccessDenied => (StatusCode::FORBIDDEN, "Acesso negado.".to_string()),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string()),
            AppError::StoreNotFound => (StatusCode::NOT_FOUND, "Loja não encontrada.".to_string()),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "Produto não encontrado.".to_string()),
            AppError::RequestNotFound => (StatusCode::NOT_FOUND, "Solicitação não encontrada.".to_string()),
            AppError::ShipmentNotFound => (StatusCode::NOT_FOUND, "Remessa não encontrada.".to_string()),
            AppError::SelfDeletion => (StatusCode::BAD_REQUEST, "Não é possível excluir o próprio usuário.".to_string()),
            AppError::InvalidStatusTransition(from, to) => (
                StatusCode::BAD_REQUEST,
                format!("Transição de status inválida: {from} -> {to}."),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe algo genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
