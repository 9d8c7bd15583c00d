// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{AuthResponse, Claims, CreateUserPayload, Role, UpdateProfilePayload, User, UserWithStore},
};

// Vida útil do token: um turno de trabalho.
const TOKEN_VALIDITY_HOURS: i64 = 8;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, pool: PgPool) -> Self {
        Self {
            user_repo,
            jwt_secret,
            pool,
        }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(user.id)?;
        let user_with_store = self
            .user_repo
            .find_with_store(user.id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        Ok(AuthResponse {
            token,
            user: user_with_store,
        })
    }

    /// Valida o token e recarrega o usuário do banco: papel e loja usados
    /// nas autorizações são sempre os atuais, não os do momento do login.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(TOKEN_VALIDITY_HOURS);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    // ---
    // Gestão de usuários (ações de superadmin)
    // ---

    pub async fn list_users(&self) -> Result<Vec<UserWithStore>, AppError> {
        self.user_repo.list_with_store().await
    }

    pub async fn create_user(&self, payload: CreateUserPayload) -> Result<UserWithStore, AppError> {
        // Admin sem loja não faz sentido; o CHECK do banco também barra.
        if payload.role == Role::Admin && payload.store_id.is_none() {
            return Err(AppError::field_validation(
                "storeId",
                "Usuários admin precisam de uma loja.",
            ));
        }

        let (hashed_password, payload) = tokio::task::spawn_blocking(move || {
            hash(&payload.password, bcrypt::DEFAULT_COST).map(|hashed| (hashed, payload))
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let new_user = self
            .user_repo
            .create_user(
                &self.pool,
                &payload.name,
                &payload.email,
                &hashed_password,
                payload.role,
                payload.store_id,
                payload.phone.as_deref(),
            )
            .await?;

        self.user_repo
            .find_with_store(new_user.id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn reset_password(&self, user_id: Uuid, password: &str) -> Result<(), AppError> {
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo
            .update_password(&self.pool, user_id, &hashed_password)
            .await
    }

    pub async fn delete_user(&self, actor: &User, user_id: Uuid) -> Result<(), AppError> {
        if actor.id == user_id {
            return Err(AppError::SelfDeletion);
        }
        self.user_repo.delete(&self.pool, user_id).await
    }

    // ---
    // Perfil (autoatendimento)
    // ---

    pub async fn update_profile(
        &self,
        actor: &User,
        payload: UpdateProfilePayload,
    ) -> Result<(), AppError> {
        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        // Troca de senha exige a senha atual correta.
        if let Some(new_password) = &payload.password {
            let current = payload
                .current_password
                .clone()
                .ok_or_else(|| {
                    AppError::field_validation("currentPassword", "Informe a senha atual.")
                })?;

            let stored_hash = actor.password_hash.clone();
            let is_valid = tokio::task::spawn_blocking(move || verify(&current, &stored_hash))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

            if !is_valid {
                return Err(AppError::field_validation(
                    "currentPassword",
                    "Senha atual incorreta.",
                ));
            }

            let new_password = new_password.clone();
            let hashed = tokio::task::spawn_blocking(move || {
                hash(&new_password, bcrypt::DEFAULT_COST)
            })
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

            self.user_repo
                .update_password(&mut *tx, actor.id, &hashed)
                .await?;
        }

        // Nome/e-mail ausentes mantêm o valor atual.
        let name = payload.name.as_deref().unwrap_or(&actor.name);
        let email = payload.email.as_deref().unwrap_or(&actor.email);
        self.user_repo
            .update_profile(&mut *tx, actor.id, name, email)
            .await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // O serviço não expõe create_token publicamente; replicamos a emissão
    // aqui para validar o formato dos claims de ponta a ponta.
    fn issue_token(secret: &str, user_id: Uuid) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            exp: (now + chrono::Duration::hours(TOKEN_VALIDITY_HOURS)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn token_roundtrip_preserva_o_sujeito() {
        let secret = "segredo-de-teste";
        let user_id = Uuid::new_v4();
        let token = issue_token(secret, user_id);

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, user_id);
        assert_eq!(
            decoded.claims.exp - decoded.claims.iat,
            (TOKEN_VALIDITY_HOURS * 3600) as usize
        );
    }

    #[test]
    fn token_com_segredo_errado_e_rejeitado() {
        let token = issue_token("segredo-certo", Uuid::new_v4());
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("segredo-errado".as_ref()),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
