// src/db/movement_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Movement, MovementMetadata, MovementType, MovementWithNames},
};

// Repositório do livro-razão. Só existe INSERT e SELECT aqui: movimentações
// nunca são alteradas nem removidas individualmente.
#[derive(Clone)]
pub struct MovementRepository {
    pool: PgPool,
}

impl MovementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registra uma movimentação no livro-razão (auditoria).
    /// O timestamp é sempre atribuído pelo servidor (DEFAULT now()).
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        movement_type: MovementType,
        quantity: Decimal,
        user_id: Uuid,
        metadata: &MovementMetadata,
    ) -> Result<Movement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, Movement>(
            r#"
            INSERT INTO movements (product_id, type, quantity, user_id, observation,
                                   client_name, client_contact, payment_status, payment_due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(movement_type)
        .bind(quantity)
        .bind(user_id)
        .bind(metadata.observation.as_deref())
        .bind(metadata.client_name.as_deref())
        .bind(metadata.client_contact.as_deref())
        .bind(metadata.payment_status)
        .bind(metadata.payment_due_date)
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }

    // Listagem global, mais recentes primeiro (visão do superadmin).
    pub async fn list_all(&self) -> Result<Vec<MovementWithNames>, AppError> {
        let movements = sqlx::query_as::<_, MovementWithNames>(
            r#"
            SELECT m.*, p.name AS product_name, u.name AS user_name
            FROM movements m
            JOIN products p ON m.product_id = p.id
            LEFT JOIN users u ON m.user_id = u.id
            ORDER BY m.timestamp DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    // Listagem limitada à loja do admin.
    pub async fn list_by_store(&self, store_id: Uuid) -> Result<Vec<MovementWithNames>, AppError> {
        let movements = sqlx::query_as::<_, MovementWithNames>(
            r#"
            SELECT m.*, p.name AS product_name, u.name AS user_name
            FROM movements m
            JOIN products p ON m.product_id = p.id
            LEFT JOIN users u ON m.user_id = u.id
            WHERE p.store_id = $1
            ORDER BY m.timestamp DESC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }
}
