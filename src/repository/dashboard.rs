use async_trait::async_trait;

use crate::domain::dashboard::DashboardData;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DashboardReader, HttpRepository};

#[async_trait]
impl DashboardReader for HttpRepository {
    async fn get_dashboard(&self) -> RepositoryResult<DashboardData> {
        self.get_json("/api/dashboard").await
    }
}
