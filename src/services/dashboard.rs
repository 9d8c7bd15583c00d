// src/services/dashboard.rs

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{
        auth::{Role, User},
        dashboard::{DashboardStats, FinancialReport},
    },
};

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository) -> Self {
        Self { dashboard_repo }
    }

    // Superadmin enxerga a rede + relatório financeiro; admin enxerga a
    // própria loja + lista de estoque baixo.
    pub async fn stats_for(&self, user: &User) -> Result<DashboardStats, AppError> {
        match user.role {
            Role::Superadmin => {
                let financial = FinancialReport {
                    paid: self.dashboard_repo.financial_paid().await?,
                    pending: self.dashboard_repo.financial_pending().await?,
                    overdue: self.dashboard_repo.financial_overdue().await?,
                };

                Ok(DashboardStats {
                    total_stores: Some(self.dashboard_repo.count_stores().await?),
                    total_products: self.dashboard_repo.count_products(None).await?,
                    total_movements: self.dashboard_repo.count_movements(None).await?,
                    recent_movements: self.dashboard_repo.recent_movements(None).await?,
                    sales_by_day: self.dashboard_repo.sales_by_day(None).await?,
                    financial: Some(financial),
                    low_stock: None,
                })
            }
            Role::Admin => {
                let store_id = user.store_id.ok_or(AppError::AccessDenied)?;

                Ok(DashboardStats {
                    total_stores: None,
                    total_products: self.dashboard_repo.count_products(Some(store_id)).await?,
                    total_movements: self.dashboard_repo.count_movements(Some(store_id)).await?,
                    recent_movements: self.dashboard_repo.recent_movements(Some(store_id)).await?,
                    sales_by_day: self.dashboard_repo.sales_by_day(Some(store_id)).await?,
                    financial: None,
                    low_stock: Some(self.dashboard_repo.low_stock(store_id).await?),
                })
            }
        }
    }
}
