#![cfg(feature = "sqlite")]

use cocktails_client::{CocktailsClient, CreateOrderRequest, Credentials, LoginOutcome};
use cocktails_hex::application::password::PasswordHasher;
use cocktails_hex::inbound::http::{AppState, HttpServer, HttpServerConfig};
use cocktails_repo::build_repo;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

// Full stack over a file-backed SQLite store, as the binary wires it.
#[tokio::test]
async fn scenario_over_sqlite() {
    let tmp = tempfile::tempdir().unwrap();
    let db_url = format!("sqlite://{}", tmp.path().join("bar.db").display());
    let repo = build_repo(Some(&db_url)).await.unwrap();

    let port = find_free_port();
    let state = AppState::new(repo, PasswordHasher::default());
    let server = HttpServer::new(
        state,
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await
    .unwrap();
    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = CocktailsClient::new(&format!("http://127.0.0.1:{port}/")).unwrap();

    let order = client
        .create_order(CreateOrderRequest {
            order: "Mojito".into(),
            price: 8,
        })
        .await
        .unwrap();
    assert_eq!(order.order, "Mojito");
    assert_eq!(order.price, 8);

    let creds = |password: &str| Credentials {
        email: "a@x.com".into(),
        password: password.into(),
    };
    client.register(creds("secret")).await.unwrap();
    let duplicate = client.register(creds("secret")).await;
    assert!(duplicate.is_err());

    match client.login(creds("secret")).await.unwrap() {
        LoginOutcome::Success(body) => assert_eq!(body.message, "Login successful"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        client.login(creds("wrong")).await.unwrap(),
        LoginOutcome::InvalidCredentials
    );

    handle.abort();
}
