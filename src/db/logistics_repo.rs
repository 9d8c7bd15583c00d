// src/db/logistics_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        inventory::PaymentStatus,
        logistics::{
            RequestStatus, Shipment, ShipmentStatus, ShipmentWithStore, StockRequest,
            StockRequestWithNames,
        },
    },
};
use chrono::NaiveDate;

// Solicitações de clientes e remessas entre lojas.
#[derive(Clone)]
pub struct LogisticsRepository {
    pool: PgPool,
}

impl LogisticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Solicitações
    // ---

    pub async fn insert_request<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        product_id: Uuid,
        quantity: Decimal,
        client_name: Option<&str>,
        client_phone: Option<&str>,
        payment_status: Option<PaymentStatus>,
        payment_due_date: Option<NaiveDate>,
    ) -> Result<StockRequest, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, StockRequest>(
            r#"
            INSERT INTO requests (store_id, product_id, quantity, status, client_name,
                                  client_phone, payment_status, payment_due_date)
            VALUES ($1, $2, $3, 'pending', $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(product_id)
        .bind(quantity)
        .bind(client_name)
        .bind(client_phone)
        .bind(payment_status)
        .bind(payment_due_date)
        .fetch_one(executor)
        .await?;
        Ok(request)
    }

    pub async fn find_request<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<StockRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, StockRequest>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(request)
    }

    pub async fn list_requests(
        &self,
        store_id: Option<Uuid>,
    ) -> Result<Vec<StockRequestWithNames>, AppError> {
        // `store_id IS NULL` libera a listagem global para o superadmin.
        let requests = sqlx::query_as::<_, StockRequestWithNames>(
            r#"
            SELECT r.*, s.name AS store_name, p.name AS product_name
            FROM requests r
            JOIN stores s ON r.store_id = s.id
            JOIN products p ON r.product_id = p.id
            WHERE $1::uuid IS NULL OR r.store_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    pub async fn set_request_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE requests SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::RequestNotFound);
        }
        Ok(())
    }

    // ---
    // Remessas
    // ---

    pub async fn insert_shipment<'e, E>(
        &self,
        executor: E,
        product_name: &str,
        quantity: Decimal,
        destination_store_id: Uuid,
    ) -> Result<Shipment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            INSERT INTO shipments (product_name, quantity, destination_store_id, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING *
            "#,
        )
        .bind(product_name)
        .bind(quantity)
        .bind(destination_store_id)
        .fetch_one(executor)
        .await?;
        Ok(shipment)
    }

    pub async fn find_shipment<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Shipment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let shipment = sqlx::query_as::<_, Shipment>("SELECT * FROM shipments WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(shipment)
    }

    pub async fn list_shipments(&self) -> Result<Vec<ShipmentWithStore>, AppError> {
        let shipments = sqlx::query_as::<_, ShipmentWithStore>(
            r#"
            SELECT sh.*, s.name AS store_name
            FROM shipments sh
            JOIN stores s ON sh.destination_store_id = s.id
            ORDER BY sh.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(shipments)
    }

    pub async fn set_shipment_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: ShipmentStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE shipments SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ShipmentNotFound);
        }
        Ok(())
    }
}
