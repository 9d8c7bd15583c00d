// src/services/inventory.rs

use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{MovementRepository, ProductRepository},
    models::inventory::{
        MovementMetadata, MovementType, MovementWithNames, Product, ProductEdit, ProductWithStore,
    },
};

// Observação fixa gravada quando um ajuste de saldo nasce da edição do produto.
pub const MANUAL_ADJUSTMENT_LABEL: &str = "Ajuste manual na edição do produto";

/// O livro-razão de estoque: único caminho de escrita para
/// `products.stock_quantity` e para a tabela `movements`. Cada operação roda
/// em uma transação própria — saldo e registro de auditoria mudam juntos ou
/// não mudam.
#[derive(Clone)]
pub struct InventoryService {
    product_repo: ProductRepository,
    movement_repo: MovementRepository,
}

impl InventoryService {
    pub fn new(product_repo: ProductRepository, movement_repo: MovementRepository) -> Self {
        Self {
            product_repo,
            movement_repo,
        }
    }

    // ---
    // Operação 1: Movimentação simples (entrada/saída)
    // ---

    /// Aplica um delta ao saldo do produto e registra a movimentação.
    /// Retorna o novo saldo. Em saídas, o débito é condicional e atômico:
    /// duas saídas concorrentes nunca deixam o saldo negativo.
    pub async fn record_movement<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        movement_type: MovementType,
        quantity: Decimal,
        actor_id: Uuid,
        store_scope: Option<Uuid>,
        metadata: MovementMetadata,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Rejeita antes de tocar no banco.
        ensure_positive("quantity", quantity)?;

        let mut tx = executor.begin().await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        check_store_scope(&product, store_scope)?;

        let new_quantity = match movement_type {
            MovementType::In => self
                .product_repo
                .increment_stock(&mut *tx, product_id, quantity)
                .await?
                .ok_or(AppError::ProductNotFound)?,
            MovementType::Out => self
                .product_repo
                .decrement_stock_checked(&mut *tx, product_id, quantity)
                .await?
                // Sem linha afetada = saldo insuficiente. O `?` derruba a
                // transação no drop, então nada foi mutado.
                .ok_or(AppError::InsufficientStock {
                    available: product.stock_quantity,
                })?,
        };

        self.movement_repo
            .insert(&mut *tx, product_id, movement_type, quantity, actor_id, &metadata)
            .await?;

        tx.commit().await?;
        Ok(new_quantity)
    }

    // ---
    // Operação 2: Edição de produto com ajuste implícito
    // ---

    /// Persiste a edição do produto. Se o saldo informado difere do
    /// armazenado, uma movimentação de ajuste é derivada antes — toda
    /// alteração de saldo fica explicável por uma linha do livro-razão,
    /// mesmo quando veio de uma edição administrativa direta.
    pub async fn apply_product_edit<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        edit: ProductEdit,
        actor_id: Uuid,
        store_scope: Option<Uuid>,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if edit.stock_quantity.is_sign_negative() {
            return Err(AppError::field_validation(
                "stockQuantity",
                "O saldo não pode ser negativo.",
            ));
        }

        let mut tx = executor.begin().await?;

        let current = self
            .product_repo
            .find_by_id(&mut *tx, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        check_store_scope(&current, store_scope)?;

        if let Some((movement_type, adjusted)) =
            derive_adjustment(current.stock_quantity, edit.stock_quantity)
        {
            let metadata = MovementMetadata {
                observation: Some(MANUAL_ADJUSTMENT_LABEL.to_string()),
                ..Default::default()
            };
            self.movement_repo
                .insert(&mut *tx, product_id, movement_type, adjusted, actor_id, &metadata)
                .await?;
        }

        let updated = self
            .product_repo
            .update_fields(&mut *tx, product_id, &edit)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    // ---
    // Operação 3: Produção / fracionamento
    // ---

    /// Transferência pareada débito-crédito: consome do produto a granel e
    /// credita o produto fracionado. A razão entre as duas quantidades é
    /// responsabilidade do chamador; aqui só se garante que a origem tem
    /// saldo e que as quatro escritas acontecem juntas.
    pub async fn record_production<'e, E>(
        &self,
        executor: E,
        source_product_id: Uuid,
        target_product_id: Uuid,
        quantity_produced: Decimal,
        quantity_consumed: Decimal,
        actor_id: Uuid,
        store_scope: Option<Uuid>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        ensure_positive("quantityProduced", quantity_produced)?;
        ensure_positive("quantityConsumed", quantity_consumed)?;
        if source_product_id == target_product_id {
            return Err(AppError::field_validation(
                "targetProductId",
                "Origem e destino da produção devem ser produtos diferentes.",
            ));
        }

        let mut tx = executor.begin().await?;

        let source = self
            .product_repo
            .find_by_id(&mut *tx, source_product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        check_store_scope(&source, store_scope)?;

        let target = self
            .product_repo
            .find_by_id(&mut *tx, target_product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        check_store_scope(&target, store_scope)?;

        self.product_repo
            .decrement_stock_checked(&mut *tx, source_product_id, quantity_consumed)
            .await?
            .ok_or(AppError::InsufficientStock {
                available: source.stock_quantity,
            })?;

        self.product_repo
            .increment_stock(&mut *tx, target_product_id, quantity_produced)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        // Saída na origem referencia o destino, e vice-versa.
        let out_meta = MovementMetadata {
            observation: Some(format!("Produção: transferido para o produto {}", target.id)),
            ..Default::default()
        };
        self.movement_repo
            .insert(&mut *tx, source_product_id, MovementType::Out, quantity_consumed, actor_id, &out_meta)
            .await?;

        let in_meta = MovementMetadata {
            observation: Some(format!("Produção: originado do produto {}", source.id)),
            ..Default::default()
        };
        self.movement_repo
            .insert(&mut *tx, target_product_id, MovementType::In, quantity_produced, actor_id, &in_meta)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // ---
    // Derivação de venda fracionada (pré-livro-razão)
    // ---

    /// Converte o peso vendido na fração de uma unidade estocada, usando o
    /// peso de referência do próprio produto. O resultado alimenta
    /// `record_movement` como quantidade de saída.
    pub async fn derive_sale_quantity<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        sale_weight: Decimal,
        sale_weight_unit: &str,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = self
            .product_repo
            .find_by_id(executor, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        derive_fractional_quantity(sale_weight, sale_weight_unit, product.weight, &product.unit)
    }

    // ---
    // Listagens
    // ---

    pub async fn list_all_products(&self) -> Result<Vec<ProductWithStore>, AppError> {
        self.product_repo.list_all_with_store().await
    }

    pub async fn list_store_products(&self, store_id: Uuid) -> Result<Vec<Product>, AppError> {
        self.product_repo.list_by_store(store_id).await
    }

    pub async fn list_movements(
        &self,
        store_scope: Option<Uuid>,
    ) -> Result<Vec<MovementWithNames>, AppError> {
        match store_scope {
            Some(store_id) => self.movement_repo.list_by_store(store_id).await,
            None => self.movement_repo.list_all().await,
        }
    }

    // ---
    // CRUD de produtos
    // ---

    pub async fn create_product<'e, E>(
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
        if stock_quantity.is_sign_negative() {
            return Err(AppError::field_validation(
                "stockQuantity",
                "O saldo não pode ser negativo.",
            ));
        }
        self.product_repo
            .create(executor, store_id, name, description, category, weight, unit, stock_quantity, image)
            .await
    }

    pub async fn delete_product<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        store_scope: Option<Uuid>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        check_store_scope(&product, store_scope)?;

        self.product_repo.delete(&mut *tx, product_id).await?;
        tx.commit().await?;
        Ok(())
    }
}

// ---
// Derivações puras do livro-razão
// ---

/// Ajuste implícito de uma edição: `None` quando o saldo não mudou; caso
/// contrário a direção e a quantidade absoluta da diferença.
pub fn derive_adjustment(old: Decimal, new: Decimal) -> Option<(MovementType, Decimal)> {
    let diff = new - old;
    if diff.is_zero() {
        return None;
    }
    if diff.is_sign_positive() {
        Some((MovementType::In, diff))
    } else {
        Some((MovementType::Out, diff.abs()))
    }
}

/// Venda fracionada: converte peso vendido e peso de referência do produto
/// para gramas e deriva a fração de uma unidade estocada, com 4 casas
/// decimais (arredondamento "half-up"). Vendas repetidas acumulam deriva de
/// arredondamento frente ao estoque físico; isso é aceito, não compensado.
pub fn derive_fractional_quantity(
    sale_weight: Decimal,
    sale_weight_unit: &str,
    product_weight: Decimal,
    product_unit: &str,
) -> Result<Decimal, AppError> {
    let sale_grams = to_grams(sale_weight, sale_weight_unit, "saleWeightUnit")?;
    let product_grams = to_grams(product_weight, product_unit, "unit")?;

    if product_grams <= Decimal::ZERO {
        return Err(AppError::field_validation(
            "saleWeight",
            "O produto não tem peso de referência para venda fracionada.",
        ));
    }
    ensure_positive("saleWeight", sale_grams)?;

    Ok((sale_grams / product_grams)
        .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero))
}

fn to_grams(value: Decimal, unit: &str, field: &'static str) -> Result<Decimal, AppError> {
    match unit {
        "g" => Ok(value),
        "kg" => Ok(value * Decimal::from(1000)),
        _ => Err(AppError::field_validation(
            field,
            "Unidade de peso não suportada para venda fracionada (use 'g' ou 'kg').",
        )),
    }
}

fn ensure_positive(field: &'static str, quantity: Decimal) -> Result<(), AppError> {
    if quantity <= Decimal::ZERO {
        return Err(AppError::field_validation(
            field,
            "A quantidade deve ser maior que zero.",
        ));
    }
    Ok(())
}

fn check_store_scope(product: &Product, store_scope: Option<Uuid>) -> Result<(), AppError> {
    if let Some(store_id) = store_scope {
        if product.store_id != store_id {
            return Err(AppError::AccessDenied);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn ajuste_de_baixa_deriva_saida_pela_diferenca() {
        let (movement_type, quantity) = derive_adjustment(dec("10"), dec("4")).unwrap();
        assert_eq!(movement_type, MovementType::Out);
        assert_eq!(quantity, dec("6"));
    }

    #[test]
    fn ajuste_de_alta_deriva_entrada_pela_diferenca() {
        let (movement_type, quantity) = derive_adjustment(dec("4"), dec("10")).unwrap();
        assert_eq!(movement_type, MovementType::In);
        assert_eq!(quantity, dec("6"));
    }

    #[test]
    fn saldo_inalterado_nao_gera_movimentacao() {
        assert!(derive_adjustment(dec("10"), dec("10")).is_none());
    }

    #[test]
    fn venda_de_5g_sobre_produto_de_500g_vale_um_centesimo() {
        let quantity = derive_fractional_quantity(dec("5"), "g", dec("500"), "g").unwrap();
        assert_eq!(quantity, dec("0.01"));
    }

    #[test]
    fn pesos_em_kg_sao_convertidos_para_gramas() {
        // 250 g de um produto estocado em unidades de 1 kg.
        let quantity = derive_fractional_quantity(dec("250"), "g", dec("1"), "kg").unwrap();
        assert_eq!(quantity, dec("0.25"));
    }

    #[test]
    fn fracao_periodica_arredonda_para_quatro_casas() {
        let quantity = derive_fractional_quantity(dec("100"), "g", dec("300"), "g").unwrap();
        assert_eq!(quantity, dec("0.3333"));

        // 1/6 = 0.16666... arredonda para cima na quarta casa.
        let quantity = derive_fractional_quantity(dec("1"), "g", dec("6"), "g").unwrap();
        assert_eq!(quantity, dec("0.1667"));
    }

    #[test]
    fn unidade_nao_ponderal_e_rejeitada() {
        assert!(derive_fractional_quantity(dec("5"), "g", dec("1"), "l").is_err());
        assert!(derive_fractional_quantity(dec("5"), "un", dec("500"), "g").is_err());
    }

    #[test]
    fn produto_sem_peso_de_referencia_e_rejeitado() {
        assert!(derive_fractional_quantity(dec("5"), "g", dec("0"), "g").is_err());
    }

    #[test]
    fn quantidade_nao_positiva_e_rejeitada() {
        assert!(ensure_positive("quantity", dec("0")).is_err());
        assert!(ensure_positive("quantity", dec("-2")).is_err());
        assert!(ensure_positive("quantity", dec("0.0001")).is_ok());
    }
}
