pub mod cocktail_repository;
pub mod order_repository;
pub mod user_repository;

pub use cocktail_repository::CocktailRepository;
pub use order_repository::OrderRepository;
pub use user_repository::UserRepository;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("{0}")]
    Db(String),
}

/// Everything the HTTP layer needs from persistence.
pub trait Store: CocktailRepository + OrderRepository + UserRepository {}

impl<T> Store for T where T: CocktailRepository + OrderRepository + UserRepository {}
