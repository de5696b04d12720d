//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::dashboard::DashboardData;
use crate::domain::lead::{Lead, NewLead};
use crate::domain::order::{NewOrder, Order};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DashboardReader, LeadReader, LeadWriter, OrderReader, OrderWriter};

mock! {
    pub Repository {}

    #[async_trait]
    impl LeadReader for Repository {
        async fn list_leads(&self) -> RepositoryResult<Vec<Lead>>;
    }

    #[async_trait]
    impl LeadWriter for Repository {
        async fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
        async fn update_lead(&self, lead: &Lead) -> RepositoryResult<Lead>;
    }

    #[async_trait]
    impl OrderReader for Repository {
        async fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
    }

    #[async_trait]
    impl OrderWriter for Repository {
        async fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        async fn update_order(&self, order: &Order) -> RepositoryResult<Order>;
    }

    #[async_trait]
    impl DashboardReader for Repository {
        async fn get_dashboard(&self) -> RepositoryResult<DashboardData>;
    }
}
