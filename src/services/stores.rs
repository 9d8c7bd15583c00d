// src/services/stores.rs

use crate::{
    common::error::AppError,
    db::StoreRepository,
    models::store::Store,
};

#[derive(Clone)]
pub struct StoreService {
    store_repo: StoreRepository,
}

impl StoreService {
    pub fn new(store_repo: StoreRepository) -> Self {
        Self { store_repo }
    }

    pub async fn list_stores(&self) -> Result<Vec<Store>, AppError> {
        self.store_repo.list_all().await
    }

    pub async fn create_store(&self, name: &str, location: Option<&str>) -> Result<Store, AppError> {
        let store = self.store_repo.create(name, location).await?;
        tracing::info!("🏬 Loja criada: {} ({})", store.name, store.id);
        Ok(store)
    }
}
