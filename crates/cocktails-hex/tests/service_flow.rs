use std::sync::Arc;

use cocktails_hex::application::auth_service::AuthService;
use cocktails_hex::application::order_service::OrderService;
use cocktails_hex::application::password::PasswordHasher;
use cocktails_hex::errors::AppError;
use cocktails_repo::memory::InMemoryRepo;

// End-to-end service flow against the in-memory adapter, sharing one store.
#[tokio::test]
async fn register_login_and_order_flow() {
    let repo = Arc::new(InMemoryRepo::new());
    let auth = AuthService::new(repo.clone(), PasswordHasher::default());
    let orders = OrderService::new(repo.clone());

    let user = auth
        .register("eve@example.com".into(), "hunter2".into())
        .await
        .unwrap();
    let again = auth.login("eve@example.com", "hunter2".into()).await.unwrap();
    assert_eq!(again.id, user.id);

    let bad = auth.login("eve@example.com", "hunter3".into()).await;
    assert!(matches!(bad, Err(AppError::InvalidCredentials)));

    let first = orders.create_order("Old Fashioned".into(), 12).await.unwrap();
    let second = orders.create_order("Gimlet".into(), 10).await.unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(repo.orders.len(), 2);
}
