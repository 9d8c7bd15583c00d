// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        DashboardRepository, LogisticsRepository, MovementRepository, ProductRepository,
        StoreRepository, UserRepository,
    },
    services::{
        auth::AuthService, dashboard::DashboardService, inventory::InventoryService,
        logistics::LogisticsService, stores::StoreService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub store_service: StoreService,
    pub inventory_service: InventoryService,
    pub logistics_service: LogisticsService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let store_repo = StoreRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let movement_repo = MovementRepository::new(db_pool.clone());
        let logistics_repo = LogisticsRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret, db_pool.clone());
        let store_service = StoreService::new(store_repo);
        let inventory_service = InventoryService::new(product_repo.clone(), movement_repo);
        let logistics_service = LogisticsService::new(
            logistics_repo,
            product_repo,
            inventory_service.clone(),
            db_pool.clone(),
        );
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            auth_service,
            store_service,
            inventory_service,
            logistics_service,
            dashboard_service,
        })
    }
}
