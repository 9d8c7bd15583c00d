// src/services/logistics.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LogisticsRepository, ProductRepository},
    models::{
        auth::User,
        inventory::{MovementMetadata, MovementType},
        logistics::{
            CreateRequestPayload, CreateShipmentPayload, RequestStatus, Shipment, ShipmentStatus,
            ShipmentWithStore, StockRequest, StockRequestWithNames,
        },
    },
    services::inventory::InventoryService,
};
use sqlx::PgPool;

/// Solicitações de clientes e remessas entre lojas. As operações que mexem em
/// estoque (receber remessa, atender solicitação) delegam ao livro-razão
/// dentro da mesma transação que muda o status — ou tudo entra, ou nada.
#[derive(Clone)]
pub struct LogisticsService {
    logistics_repo: LogisticsRepository,
    product_repo: ProductRepository,
    inventory_service: InventoryService,
    pool: PgPool,
}

impl LogisticsService {
    pub fn new(
        logistics_repo: LogisticsRepository,
        product_repo: ProductRepository,
        inventory_service: InventoryService,
        pool: PgPool,
    ) -> Self {
        Self {
            logistics_repo,
            product_repo,
            inventory_service,
            pool,
        }
    }

    // ---
    // Solicitações
    // ---

    pub async fn create_request(
        &self,
        payload: CreateRequestPayload,
    ) -> Result<StockRequest, AppError> {
        if payload.quantity <= Decimal::ZERO {
            return Err(AppError::field_validation(
                "quantity",
                "A quantidade deve ser maior que zero.",
            ));
        }

        // Valida a referência antes do INSERT para devolver 404 em vez de
        // erro de chave estrangeira.
        self.product_repo
            .find_by_id(&self.pool, payload.product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        self.logistics_repo
            .insert_request(
                &self.pool,
                payload.store_id,
                payload.product_id,
                payload.quantity,
                payload.client_name.as_deref(),
                payload.client_phone.as_deref(),
                payload.payment_status,
                payload.payment_due_date,
            )
            .await
    }

    pub async fn list_requests(
        &self,
        store_scope: Option<Uuid>,
    ) -> Result<Vec<StockRequestWithNames>, AppError> {
        self.logistics_repo.list_requests(store_scope).await
    }

    /// Atender uma solicitação dá baixa no estoque pela via normal do
    /// livro-razão, carregando os dados de cliente/pagamento da solicitação.
    /// Sem saldo suficiente, a operação falha inteira e a solicitação
    /// permanece pendente.
    pub async fn complete_request(&self, request_id: Uuid, actor: &User) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let request = self
            .logistics_repo
            .find_request(&mut *tx, request_id)
            .await?
            .ok_or(AppError::RequestNotFound)?;

        if request.status == RequestStatus::Completed {
            return Err(AppError::InvalidStatusTransition("completed", "completed"));
        }

        let metadata = MovementMetadata {
            observation: Some(format!("Atendimento de solicitação {}", request.id)),
            client_name: request.client_name.clone(),
            client_contact: request.client_phone.clone(),
            payment_status: request.payment_status,
            payment_due_date: request.payment_due_date,
        };

        self.inventory_service
            .record_movement(
                &mut *tx,
                request.product_id,
                MovementType::Out,
                request.quantity,
                actor.id,
                actor.store_scope(),
                metadata,
            )
            .await?;

        self.logistics_repo
            .set_request_status(&mut *tx, request_id, RequestStatus::Completed)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // ---
    // Remessas
    // ---

    pub async fn create_shipment(
        &self,
        payload: CreateShipmentPayload,
    ) -> Result<Shipment, AppError> {
        if payload.quantity <= Decimal::ZERO {
            return Err(AppError::field_validation(
                "quantity",
                "A quantidade deve ser maior que zero.",
            ));
        }

        self.logistics_repo
            .insert_shipment(
                &self.pool,
                &payload.product_name,
                payload.quantity,
                payload.destination_store_id,
            )
            .await
            .map_err(|e| match e {
                // FK de loja inexistente vira 404 amigável.
                AppError::DatabaseError(db_err)
                    if db_err
                        .as_database_error()
                        .is_some_and(|d| d.is_foreign_key_violation()) =>
                {
                    AppError::StoreNotFound
                }
                other => other,
            })
    }

    pub async fn list_shipments(&self) -> Result<Vec<ShipmentWithStore>, AppError> {
        self.logistics_repo.list_shipments().await
    }

    /// Transições são estritamente progressivas; `received` reconcilia a
    /// remessa com o estoque de destino: o produto é resolvido pelo nome
    /// exato (criado como placeholder se não existir) e recebe uma entrada
    /// no livro-razão, tudo na mesma transação da troca de status.
    pub async fn update_shipment_status(
        &self,
        shipment_id: Uuid,
        next_status: ShipmentStatus,
        actor: &User,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let shipment = self
            .logistics_repo
            .find_shipment(&mut *tx, shipment_id)
            .await?
            .ok_or(AppError::ShipmentNotFound)?;

        if !shipment.status.can_transition_to(next_status) {
            return Err(AppError::InvalidStatusTransition(
                shipment.status.as_str(),
                next_status.as_str(),
            ));
        }

        self.logistics_repo
            .set_shipment_status(&mut *tx, shipment_id, next_status)
            .await?;

        if next_status == ShipmentStatus::Received {
            let product = match self
                .product_repo
                .find_by_name_in_store(&mut *tx, shipment.destination_store_id, &shipment.product_name)
                .await?
            {
                Some(product) => product,
                None => {
                    // Produto desconhecido no destino: nasce como placeholder
                    // (sem categoria, unidade 'un', peso zero) e já recebe a
                    // entrada da remessa.
                    self.product_repo
                        .create(
                            &mut *tx,
                            shipment.destination_store_id,
                            &shipment.product_name,
                            None,
                            None,
                            Decimal::ZERO,
                            "un",
                            Decimal::ZERO,
                            None,
                        )
                        .await?
                }
            };

            let metadata = MovementMetadata {
                observation: Some(format!("Recebimento de remessa {}", shipment.id)),
                ..Default::default()
            };

            self.inventory_service
                .record_movement(
                    &mut *tx,
                    product.id,
                    MovementType::In,
                    shipment.quantity,
                    actor.id,
                    None,
                    metadata,
                )
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
