use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum OrderError {
    #[error("order must not be empty")]
    EmptyOrder,
    #[error("price must be >= 0, got {0}")]
    NegativePrice(i32),
}

/// A persisted order row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub order: String,
    pub price: i32,
}

/// An order that passed domain checks and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    order: String,
    price: i32,
}

impl NewOrder {
    pub fn new(order: String, price: i32) -> Result<Self, OrderError> {
        if order.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if price < 0 {
            return Err(OrderError::NegativePrice(price));
        }
        Ok(Self { order, price })
    }

    pub fn order(&self) -> &str {
        &self.order
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    /// Attach the store-assigned id.
    pub fn into_order(self, id: i32) -> Order {
        Order {
            id,
            order: self.order,
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_free_drinks() {
        let order = NewOrder::new("Water".into(), 0).unwrap();
        assert_eq!(order.price(), 0);
        let persisted = order.into_order(7);
        assert_eq!(persisted.id, 7);
        assert_eq!(persisted.order, "Water");
    }

    #[test]
    fn rejects_empty_and_negative() {
        assert_eq!(NewOrder::new(String::new(), 5), Err(OrderError::EmptyOrder));
        assert_eq!(
            NewOrder::new("Mojito".into(), -1),
            Err(OrderError::NegativePrice(-1))
        );
    }
}
