use async_trait::async_trait;

use crate::domain::lead::{Lead, NewLead};
use crate::repository::errors::RepositoryResult;
use crate::repository::{HttpRepository, LeadReader, LeadWriter};

#[async_trait]
impl LeadReader for HttpRepository {
    async fn list_leads(&self) -> RepositoryResult<Vec<Lead>> {
        self.get_json("/api/leads").await
    }
}

#[async_trait]
impl LeadWriter for HttpRepository {
    async fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        self.post_json("/api/leads", new_lead).await
    }

    async fn update_lead(&self, lead: &Lead) -> RepositoryResult<Lead> {
        self.put_json(&format!("/api/leads/{}", lead.id), lead).await
    }
}
