pub mod cocktail;
pub mod order;
pub mod user;
