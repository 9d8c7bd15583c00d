// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- 1. Direção da movimentação ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_type", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum MovementType {
    In,
    Out,
}

// --- 2. Situação de pagamento de uma venda ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

// --- 3. Produto ---
// O saldo (`stock_quantity`) só muda através do livro-razão; vendas
// fracionadas podem deixá-lo com casas decimais, por isso `Decimal`.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub weight: Decimal,
    pub unit: String,
    pub stock_quantity: Decimal,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Visão do superadmin: produto com o nome da loja resolvido.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithStore {
    pub id: Uuid,
    pub store_id: Uuid,
    pub store_name: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub weight: Decimal,
    pub unit: String,
    pub stock_quantity: Decimal,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- 4. Movimentação (livro-razão) ---
// Registro imutável: uma linha por alteração de saldo, nunca editada.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: Uuid,
    pub product_id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub user_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
    pub observation: Option<String>,
    pub client_name: Option<String>,
    pub client_contact: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_due_date: Option<NaiveDate>,
}

// Listagem com nomes de produto e autor resolvidos.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementWithNames {
    pub id: Uuid,
    pub product_id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub product_name: String,
    pub user_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub observation: Option<String>,
    pub client_name: Option<String>,
    pub client_contact: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_due_date: Option<NaiveDate>,
}

/// Metadados opcionais de venda/pagamento gravados junto da movimentação.
#[derive(Debug, Clone, Default)]
pub struct MovementMetadata {
    pub observation: Option<String>,
    pub client_name: Option<String>,
    pub client_contact: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_due_date: Option<NaiveDate>,
}

/// Campos editáveis de um produto. Quando `stock_quantity` difere do valor
/// armazenado, o serviço deriva uma movimentação de ajuste automaticamente.
#[derive(Debug, Clone)]
pub struct ProductEdit {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub weight: Decimal,
    pub unit: String,
    pub stock_quantity: Decimal,
    pub image: Option<String>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub weight: Decimal,
    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unit: String,
    #[serde(default)]
    pub stock_quantity: Decimal,
    pub image: Option<String>,
    // Superadmin pode criar para qualquer loja; admin usa a própria.
    pub store_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub weight: Decimal,
    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unit: String,
    pub stock_quantity: Decimal,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovementPayload {
    pub product_id: Uuid,
    #[serde(rename = "type")]
    pub movement_type: MovementType,

    // Ou a quantidade explícita...
    pub quantity: Option<Decimal>,

    // ...ou, para saídas por peso, o peso vendido (convertido pelo serviço
    // em uma fração da unidade estocada).
    pub sale_weight: Option<Decimal>,
    pub sale_weight_unit: Option<String>,

    pub observation: Option<String>,
    pub client_name: Option<String>,
    pub client_contact: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionPayload {
    pub source_product_id: Uuid,
    pub target_product_id: Uuid,
    pub quantity_produced: Decimal,
    pub quantity_consumed: Decimal,
}

// Resposta de movimentação: o novo saldo para o frontend atualizar a tela.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementReceipt {
    pub success: bool,
    pub new_quantity: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_type_usa_formato_do_banco() {
        assert_eq!(serde_json::to_string(&MovementType::In).unwrap(), "\"in\"");
        assert_eq!(serde_json::to_string(&MovementType::Out).unwrap(), "\"out\"");
        let parsed: MovementType = serde_json::from_str("\"out\"").unwrap();
        assert_eq!(parsed, MovementType::Out);
    }

    #[test]
    fn payment_status_usa_formato_do_banco() {
        assert_eq!(serde_json::to_string(&PaymentStatus::Paid).unwrap(), "\"paid\"");
        let parsed: PaymentStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, PaymentStatus::Pending);
    }

    #[test]
    fn payload_de_movimentacao_aceita_tipo_renomeado() {
        let json = r#"{"productId":"6f2f9a40-0000-0000-0000-000000000001","type":"out","quantity":2}"#;
        let payload: CreateMovementPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.movement_type, MovementType::Out);
        assert_eq!(payload.quantity, Some(Decimal::from(2)));
    }
}
