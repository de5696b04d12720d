use async_trait::async_trait;

use crate::domain::order::{NewOrder, Order};
use crate::repository::errors::RepositoryResult;
use crate::repository::{HttpRepository, OrderReader, OrderWriter};

#[async_trait]
impl OrderReader for HttpRepository {
    async fn list_orders(&self) -> RepositoryResult<Vec<Order>> {
        self.get_json("/api/orders").await
    }
}

#[async_trait]
impl OrderWriter for HttpRepository {
    async fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order> {
        self.post_json("/api/orders", new_order).await
    }

    async fn update_order(&self, order: &Order) -> RepositoryResult<Order> {
        self.put_json(&format!("/api/orders/{}", order.id), order)
            .await
    }
}
