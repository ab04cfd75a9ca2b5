use async_trait::async_trait;

use super::RepoError;
use crate::domain::order::{NewOrder, Order};

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, RepoError>;
}
