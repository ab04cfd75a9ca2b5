use async_trait::async_trait;
use cocktails_types::domain::cocktail::Cocktail;
use cocktails_types::domain::order::{NewOrder, Order};
use cocktails_types::domain::user::{NewUser, User};
use cocktails_types::ports::{
    CocktailRepository, OrderRepository, RepoError, UserRepository,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct InMemoryRepo {
    cocktails: Arc<Vec<Cocktail>>,
    pub orders: Arc<DashMap<i32, Order>>,
    pub users: Arc<DashMap<String, User>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::with_cocktails(Vec::new())
    }

    /// Seed the read-only cocktail menu.
    pub fn with_cocktails(cocktails: Vec<Cocktail>) -> Self {
        Self {
            cocktails: Arc::new(cocktails),
            orders: Arc::new(DashMap::new()),
            users: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }

    fn next_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CocktailRepository for InMemoryRepo {
    async fn list_cocktails(&self) -> Result<Vec<Cocktail>, RepoError> {
        Ok(self.cocktails.as_ref().clone())
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepo {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, RepoError> {
        let order = order.into_order(self.next_id());
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepo {
    async fn insert_user(&self, user: NewUser) -> Result<User, RepoError> {
        match self.users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(RepoError::Constraint(format!(
                "users.email already holds {}",
                user.email
            ))),
            Entry::Vacant(slot) => {
                let user = user.into_user(self.next_id());
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users.get(email).map(|r| r.clone()))
    }
}
