// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Banco vazio ganha a loja matriz e o superadmin padrão.
    seed_initial_data(&app_state)
        .await
        .expect("Falha ao semear os dados iniciais.");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Gestão de usuários + /me (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/{id}/reset-password",
            put(handlers::users::reset_password),
        )
        .route("/{id}", delete(handlers::users::delete_user));

    let store_routes = Router::new().route(
        "/",
        get(handlers::stores::list_stores).post(handlers::stores::create_store),
    );

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/{id}",
            put(handlers::products::update_product).delete(handlers::products::delete_product),
        );

    let movement_routes = Router::new()
        .route(
            "/",
            get(handlers::movements::list_movements).post(handlers::movements::create_movement),
        )
        .route("/production", post(handlers::movements::record_production));

    let request_routes = Router::new()
        .route(
            "/",
            get(handlers::requests::list_requests).post(handlers::requests::create_request),
        )
        .route("/{id}/status", put(handlers::requests::update_request_status));

    let shipment_routes = Router::new()
        .route(
            "/",
            get(handlers::shipments::list_shipments).post(handlers::shipments::create_shipment),
        )
        .route(
            "/{id}/status",
            put(handlers::shipments::update_shipment_status),
        );

    // Tudo que exige usuário autenticado fica atrás do auth_guard.
    let protected_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/stores", store_routes)
        .nest("/products", product_routes)
        .nest("/movements", movement_routes)
        .nest("/requests", request_routes)
        .nest("/shipments", shipment_routes)
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/profile", put(handlers::auth::update_profile))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}

/// Semeia a loja matriz e o superadmin quando não há nenhum usuário.
/// Credenciais vêm do ambiente (SEED_ADMIN_EMAIL / SEED_ADMIN_PASSWORD),
/// com padrões de desenvolvimento.
async fn seed_initial_data(app_state: &AppState) -> anyhow::Result<()> {
    use crate::db::{StoreRepository, UserRepository};
    use crate::models::auth::Role;

    let user_repo = UserRepository::new(app_state.db_pool.clone());
    if user_repo.count().await? > 0 {
        return Ok(());
    }

    tracing::info!("🌱 Banco vazio: semeando loja matriz e superadmin...");

    let store_repo = StoreRepository::new(app_state.db_pool.clone());
    let store = store_repo.create("Loja Matriz", Some("Centro")).await?;

    let email =
        std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@sistema.com".to_string());
    let password =
        std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    let hashed = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;

    user_repo
        .create_user(
            &app_state.db_pool,
            "Super Admin",
            &email,
            &hashed,
            Role::Superadmin,
            None,
            None,
        )
        .await?;

    tracing::info!("🌱 Superadmin criado ({}) e loja '{}' disponível.", email, store.name);
    Ok(())
}
