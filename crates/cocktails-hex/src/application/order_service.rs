use crate::errors::AppError;
use cocktails_types::domain::order::{NewOrder, Order};
use cocktails_types::ports::OrderRepository;
use std::sync::Arc;

pub struct OrderService<R: OrderRepository> {
    repo: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create_order(&self, order: String, price: i32) -> Result<Order, AppError> {
        let new_order = NewOrder::new(order, price).map_err(|e| AppError::BadRequest(e.to_string()))?;
        let created = self
            .repo
            .insert_order(new_order)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;
        tracing::info!(order_id = created.id, price = created.price, "order created");
        Ok(created)
    }
}
