// src/models/dashboard.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::inventory::{MovementType, MovementWithNames, PaymentStatus, Product};

// Vendas agregadas por dia (movimentações de saída).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesByDay {
    pub date: String,
    pub total: Decimal,
}

// Linha do relatório financeiro: saída com loja e produto resolvidos.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub store_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub client_name: Option<String>,
    pub client_contact: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_due_date: Option<NaiveDate>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FinancialReport {
    pub paid: Vec<FinancialEntry>,
    pub pending: Vec<FinancialEntry>,
    pub overdue: Vec<FinancialEntry>,
}

// O payload do dashboard muda conforme o papel: superadmin recebe os números
// da rede e o financeiro; admin recebe os da própria loja e o estoque baixo.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_stores: Option<i64>,
    pub total_products: i64,
    pub total_movements: i64,
    pub recent_movements: Vec<MovementWithNames>,
    pub sales_by_day: Vec<SalesByDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial: Option<FinancialReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock: Option<Vec<Product>>,
}
