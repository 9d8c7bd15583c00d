// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Product, ProductEdit, ProductWithStore},
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras
    // ---

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(product)
    }

    /// Resolução do vínculo "fraco" das remessas: produto pelo nome exato
    /// dentro da loja de destino.
    pub async fn find_by_name_in_store<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        name: &str,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE store_id = $1 AND name = $2 LIMIT 1",
        )
        .bind(store_id)
        .bind(name)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    pub async fn list_by_store(&self, store_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE store_id = $1 ORDER BY name ASC",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // Visão do superadmin: todos os produtos com o nome da loja.
    pub async fn list_all_with_store(&self) -> Result<Vec<ProductWithStore>, AppError> {
        let products = sqlx::query_as::<_, ProductWithStore>(
            r#"
            SELECT p.*, s.name AS store_name
            FROM products p
            JOIN stores s ON p.store_id = s.id
            ORDER BY s.name ASC, p.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // ---
    // Escritas
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        name: &str,
        description: Option<&str>,
        category: Option<&str>,
        weight: Decimal,
        unit: &str,
        stock_quantity: Decimal,
        image: Option<&str>,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (store_id, name, description, category, weight, unit, stock_quantity, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(description)
        .bind(category)
        .bind(weight)
        .bind(unit)
        .bind(stock_quantity)
        .bind(image)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    pub async fn update_fields<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        edit: &ProductEdit,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $1, description = $2, category = $3, weight = $4,
                unit = $5, stock_quantity = $6, image = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&edit.name)
        .bind(edit.description.as_deref())
        .bind(edit.category.as_deref())
        .bind(edit.weight)
        .bind(&edit.unit)
        .bind(edit.stock_quantity)
        .bind(edit.image.as_deref())
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }

    // ---
    // Ajustes de saldo do livro-razão
    // ---

    /// Soma `quantity` ao saldo e devolve o novo valor.
    pub async fn increment_stock<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        quantity: Decimal,
    ) -> Result<Option<Decimal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let new_quantity = sqlx::query_scalar::<_, Decimal>(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity + $1
            WHERE id = $2
            RETURNING stock_quantity
            "#,
        )
        .bind(quantity)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(new_quantity)
    }

    /// Baixa condicional atômica: só debita se houver saldo suficiente.
    /// `None` significa saldo insuficiente (ou produto inexistente) e nenhuma
    /// mutação feita — a checagem e o débito acontecem na mesma instrução,
    /// então duas saídas concorrentes não conseguem ambas passar do saldo.
    pub async fn decrement_stock_checked<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        quantity: Decimal,
    ) -> Result<Option<Decimal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let new_quantity = sqlx::query_scalar::<_, Decimal>(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity - $1
            WHERE id = $2 AND stock_quantity >= $1
            RETURNING stock_quantity
            "#,
        )
        .bind(quantity)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(new_quantity)
    }
}
