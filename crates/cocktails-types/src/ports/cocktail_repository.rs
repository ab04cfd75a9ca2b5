use async_trait::async_trait;

use super::RepoError;
use crate::domain::cocktail::Cocktail;

#[async_trait]
pub trait CocktailRepository: Send + Sync + 'static {
    async fn list_cocktails(&self) -> Result<Vec<Cocktail>, RepoError>;
}
