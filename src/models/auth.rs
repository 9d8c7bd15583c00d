// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Papéis de acesso: `admin` é limitado à própria loja,
/// `superadmin` enxerga a rede inteira (e não pertence a loja nenhuma).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Admin,
}

impl Role {
    pub fn is_superadmin(&self) -> bool {
        matches!(self, Role::Superadmin)
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub role: Role,
    pub store_id: Option<Uuid>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Escopo de loja que o usuário impõe às operações do livro-razão:
    /// `None` para superadmin (sem restrição), `Some` para admin.
    pub fn store_scope(&self) -> Option<Uuid> {
        match self.role {
            Role::Superadmin => None,
            Role::Admin => self.store_id,
        }
    }
}

// Listagem de usuários com o nome da loja resolvido (sem hash de senha).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithStore {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub store_id: Option<Uuid>,
    pub store_name: Option<String>,
    pub phone: Option<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Dados para criação de usuário (ação de superadmin)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    pub role: Role,
    pub store_id: Option<Uuid>,
    pub phone: Option<String>,
}

// Atualização do próprio perfil (nome/e-mail e, opcionalmente, senha)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    pub name: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,
    pub current_password: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordPayload {
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação: token + dados do usuário (com nome da loja)
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserWithStore,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializa_em_minusculas() {
        assert_eq!(serde_json::to_string(&Role::Superadmin).unwrap(), "\"superadmin\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn payload_de_login_rejeita_email_invalido() {
        let payload = LoginUserPayload {
            email: "nao-e-um-email".to_string(),
            password: "123456".to_string(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn payload_de_login_aceita_dados_validos() {
        let payload = LoginUserPayload {
            email: "gerente@loja1.com".to_string(),
            password: "loja123".to_string(),
        };
        assert!(payload.validate().is_ok());
    }
}
