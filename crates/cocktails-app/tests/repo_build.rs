#![cfg(feature = "sqlite")]

use cocktails_repo::{build_repo, Repo};
use cocktails_types::ports::CocktailRepository;

#[tokio::test]
async fn builds_sqlite_repo_from_url() {
    // Use a temp DB path for isolation.
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cocktails-test.db");
    let url = format!("sqlite://{}", db_path.display());

    let repo: Repo = build_repo(Some(&url)).await.expect("build repo");
    assert_eq!(repo.backend(), "sqlite");
    // basic sanity: the bootstrapped menu is empty
    let list = repo.list_cocktails().await.expect("list");
    assert!(list.is_empty());
}

#[tokio::test]
async fn rejects_unknown_schemes() {
    let err = build_repo(Some("mysql://localhost/bar")).await;
    assert!(err.is_err());
}
