// src/db/dashboard_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{FinancialEntry, SalesByDay},
        inventory::{MovementWithNames, Product},
    },
};

// Consultas agregadas do dashboard. Tudo aqui é leitura de estado já
// commitado; nenhum saldo é cacheado em memória.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_stores(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM stores")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // `store_id IS NULL` conta a rede inteira (superadmin).
    pub async fn count_products(&self, store_id: Option<Uuid>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT count(*) FROM products WHERE $1::uuid IS NULL OR store_id = $1",
        )
        .bind(store_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn count_movements(&self, store_id: Option<Uuid>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT count(*)
            FROM movements m
            JOIN products p ON m.product_id = p.id
            WHERE $1::uuid IS NULL OR p.store_id = $1
            "#,
        )
        .bind(store_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    // As 5 movimentações mais recentes, com nomes resolvidos.
    pub async fn recent_movements(
        &self,
        store_id: Option<Uuid>,
    ) -> Result<Vec<MovementWithNames>, AppError> {
        let movements = sqlx::query_as::<_, MovementWithNames>(
            r#"
            SELECT m.*, p.name AS product_name, u.name AS user_name
            FROM movements m
            JOIN products p ON m.product_id = p.id
            LEFT JOIN users u ON m.user_id = u.id
            WHERE $1::uuid IS NULL OR p.store_id = $1
            ORDER BY m.timestamp DESC
            LIMIT 5
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    // Gráfico de barras: saídas somadas por dia, última semana.
    pub async fn sales_by_day(&self, store_id: Option<Uuid>) -> Result<Vec<SalesByDay>, AppError> {
        let data = sqlx::query_as::<_, SalesByDay>(
            r#"
            SELECT to_char(m.timestamp, 'YYYY-MM-DD') AS date, SUM(m.quantity) AS total
            FROM movements m
            JOIN products p ON m.product_id = p.id
            WHERE m.type = 'out'
              AND m.timestamp >= (CURRENT_DATE - INTERVAL '7 days')
              AND ($1::uuid IS NULL OR p.store_id = $1)
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(data)
    }

    // Produtos da loja abaixo do limiar de alerta.
    pub async fn low_stock(&self, store_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE store_id = $1 AND stock_quantity < 10 ORDER BY stock_quantity ASC",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // ---
    // Relatório financeiro (saídas com situação de pagamento)
    // ---

    pub async fn financial_paid(&self) -> Result<Vec<FinancialEntry>, AppError> {
        let entries = sqlx::query_as::<_, FinancialEntry>(
            r#"
            SELECT m.id, m.product_id, p.name AS product_name, s.name AS store_name,
                   m.type, m.quantity, m.client_name, m.client_contact,
                   m.payment_status, m.payment_due_date, m.timestamp
            FROM movements m
            JOIN products p ON m.product_id = p.id
            JOIN stores s ON p.store_id = s.id
            WHERE m.payment_status = 'paid' AND m.type = 'out'
            ORDER BY m.timestamp DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    // Pendentes ainda dentro do prazo (ou sem prazo definido).
    pub async fn financial_pending(&self) -> Result<Vec<FinancialEntry>, AppError> {
        let entries = sqlx::query_as::<_, FinancialEntry>(
            r#"
            SELECT m.id, m.product_id, p.name AS product_name, s.name AS store_name,
                   m.type, m.quantity, m.client_name, m.client_contact,
                   m.payment_status, m.payment_due_date, m.timestamp
            FROM movements m
            JOIN products p ON m.product_id = p.id
            JOIN stores s ON p.store_id = s.id
            WHERE m.payment_status = 'pending' AND m.type = 'out'
              AND (m.payment_due_date >= CURRENT_DATE OR m.payment_due_date IS NULL)
            ORDER BY m.payment_due_date ASC NULLS LAST
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn financial_overdue(&self) -> Result<Vec<FinancialEntry>, AppError> {
        let entries = sqlx::query_as::<_, FinancialEntry>(
            r#"
            SELECT m.id, m.product_id, p.name AS product_name, s.name AS store_name,
                   m.type, m.quantity, m.client_name, m.client_contact,
                   m.payment_status, m.payment_due_date, m.timestamp
            FROM movements m
            JOIN products p ON m.product_id = p.id
            JOIN stores s ON p.store_id = s.id
            WHERE m.payment_status = 'pending' AND m.type = 'out'
              AND m.payment_due_date < CURRENT_DATE
            ORDER BY m.payment_due_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
