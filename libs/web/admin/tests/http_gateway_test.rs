//! `HttpGateway` against a live API on an ephemeral port.

use axum::{Router, http::StatusCode, routing::get};
use domain_users::{Group, InMemoryUserRepository, UserService, handlers};
use std::net::SocketAddr;
use web_admin::{DataGateway, Draft, GatewayError, HttpGateway, Operation};

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_api(groups: Vec<Group>) -> HttpGateway {
    let service = UserService::new(InMemoryUserRepository::with_groups(groups));
    let app = Router::new().nest("/api", handlers::router(service));
    let addr = spawn(app).await;
    HttpGateway::new(reqwest::Client::new(), format!("http://{addr}/"))
}

#[tokio::test]
async fn test_lists_groups_by_name() {
    let gateway = spawn_api(vec![Group::new("Zeta"), Group::new("Alpha")]).await;

    let groups = gateway.list_groups().await.unwrap();
    let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Zeta"]);
}

#[tokio::test]
async fn test_create_then_list_users() {
    let ops = Group::new("Ops");
    let dev = Group::new("Dev");
    let gateway = spawn_api(vec![ops.clone(), dev.clone()]).await;

    gateway
        .create_user(
            &Draft::empty()
                .with_name("Ada")
                .with_email("ada@example.com")
                .with_password("pw")
                .with_group_ids(vec![dev.id, ops.id]),
        )
        .await
        .unwrap();

    let users = gateway.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "ada@example.com");
    assert_eq!(users[0].group_names().collect::<Vec<_>>(), vec!["Dev", "Ops"]);
}

#[tokio::test]
async fn test_non_success_status_is_failure() {
    let gateway = spawn_api(vec![]).await;

    let err = gateway
        .create_user(&Draft::empty().with_name("Ada").with_email("nope").with_password("pw"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GatewayError::Status {
            operation: Operation::CreateUser,
            status: 400
        }
    ));
    assert_eq!(err.user_message(), "Failed to create user");
}

#[tokio::test]
async fn test_server_error_and_bad_body() {
    let app = Router::new()
        .route("/api/users", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/api/groups", get(|| async { "definitely not json" }));
    let addr = spawn(app).await;
    let gateway = HttpGateway::new(reqwest::Client::new(), format!("http://{addr}"));

    let err = gateway.list_users().await.unwrap_err();
    assert!(matches!(err, GatewayError::Status { status: 500, .. }));
    assert_eq!(err.user_message(), "Failed to load users");

    let err = gateway.list_groups().await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode { .. }));
    assert_eq!(err.user_message(), "Failed to load groups");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_failure() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = HttpGateway::new(reqwest::Client::new(), format!("http://{addr}"));
    let err = gateway.list_groups().await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport { .. }));
}
