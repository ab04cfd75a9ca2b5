use crate::errors::AppError;
use cocktails_types::domain::cocktail::Cocktail;
use cocktails_types::ports::CocktailRepository;
use std::sync::Arc;

pub struct CocktailService<R: CocktailRepository> {
    repo: Arc<R>,
}

impl<R: CocktailRepository> CocktailService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_cocktails(&self) -> Result<Vec<Cocktail>, AppError> {
        self.repo
            .list_cocktails()
            .await
            .map_err(|e| AppError::Store(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn lists_menu_unchanged() {
        let menu: Vec<Cocktail> =
            serde_json::from_value(json!([{ "name": "Negroni" }, { "name": "Paloma" }])).unwrap();
        let repo = cocktails_repo::memory::InMemoryRepo::with_cocktails(menu.clone());
        let svc = CocktailService::new(Arc::new(repo));

        assert_eq!(svc.list_cocktails().await.unwrap(), menu);
    }
}
