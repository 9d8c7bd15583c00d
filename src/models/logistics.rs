// src/models/logistics.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::inventory::PaymentStatus;

// --- 1. Solicitações de clientes ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockRequest {
    pub id: Uuid,
    pub store_id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub status: RequestStatus,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

// Listagem com nomes de loja e produto resolvidos.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockRequestWithNames {
    pub id: Uuid,
    pub store_id: Uuid,
    pub store_name: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: Decimal,
    pub status: RequestStatus,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestPayload {
    pub store_id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_due_date: Option<NaiveDate>,
}

// --- 2. Remessas entre lojas ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "shipment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ShipmentStatus {
    Pending,
    Sent,
    Received,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "pending",
            ShipmentStatus::Sent => "sent",
            ShipmentStatus::Received => "received",
        }
    }

    /// O ciclo de vida é estritamente progressivo, um passo por vez:
    /// pending -> sent -> received. Pular ou voltar etapas é rejeitado.
    pub fn can_transition_to(&self, next: ShipmentStatus) -> bool {
        matches!(
            (self, next),
            (ShipmentStatus::Pending, ShipmentStatus::Sent)
                | (ShipmentStatus::Sent, ShipmentStatus::Received)
        )
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: Uuid,
    pub product_name: String,
    pub quantity: Decimal,
    pub destination_store_id: Uuid,
    pub status: ShipmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentWithStore {
    pub id: Uuid,
    pub product_name: String,
    pub quantity: Decimal,
    pub destination_store_id: Uuid,
    pub store_name: String,
    pub status: ShipmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentPayload {
    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub product_name: String,
    pub quantity: Decimal,
    pub destination_store_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateShipmentStatusPayload {
    pub status: ShipmentStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRequestStatusPayload {
    pub status: RequestStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remessa_avanca_um_passo_por_vez() {
        assert!(ShipmentStatus::Pending.can_transition_to(ShipmentStatus::Sent));
        assert!(ShipmentStatus::Sent.can_transition_to(ShipmentStatus::Received));
    }

    #[test]
    fn remessa_nao_pula_nem_volta_etapas() {
        assert!(!ShipmentStatus::Pending.can_transition_to(ShipmentStatus::Received));
        assert!(!ShipmentStatus::Sent.can_transition_to(ShipmentStatus::Pending));
        assert!(!ShipmentStatus::Received.can_transition_to(ShipmentStatus::Sent));
        assert!(!ShipmentStatus::Received.can_transition_to(ShipmentStatus::Received));
        assert!(!ShipmentStatus::Pending.can_transition_to(ShipmentStatus::Pending));
    }

    #[test]
    fn status_serializa_em_minusculas() {
        assert_eq!(serde_json::to_string(&ShipmentStatus::Received).unwrap(), "\"received\"");
        assert_eq!(serde_json::to_string(&RequestStatus::Completed).unwrap(), "\"completed\"");
    }
}
