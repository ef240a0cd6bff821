use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use axum_helpers::ErrorResponse;
use domain_users::{Group, InMemoryUserRepository, UserResponse, UserService, handlers};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&payload).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

struct Fixture {
    app: axum::Router,
    admins: Group,
    engineers: Group,
}

fn fixture() -> Fixture {
    let admins = Group::new("Administrators");
    let engineers = Group::new("Engineers");
    let repo = InMemoryUserRepository::with_groups([admins.clone(), engineers.clone()]);
    Fixture {
        app: handlers::router(UserService::new(repo)),
        admins,
        engineers,
    }
}

#[tokio::test]
async fn test_create_user_returns_created_with_groups_in_order() {
    let f = fixture();

    let response = f
        .app
        .oneshot(post_json(
            "/users",
            json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "password": "analytical",
                "groupIds": [f.engineers.id, f.admins.id]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let user: UserResponse = json_body(response.into_body()).await;
    assert_eq!(user.name, "Ada Lovelace");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(
        user.group_names().collect::<Vec<_>>(),
        vec!["Engineers", "Administrators"]
    );
    assert!(user.groups.iter().all(|m| m.user_id == user.id));
}

#[tokio::test]
async fn test_create_user_response_never_contains_password() {
    let f = fixture();

    let response = f
        .app
        .oneshot(post_json(
            "/users",
            json!({ "name": "Bob", "email": "bob@example.com", "password": "hunter22" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = json_body(response.into_body()).await;
    let text = body.to_string();
    assert!(!text.contains("hunter22"));
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
    assert_eq!(body["groups"], json!([]));
}

#[tokio::test]
async fn test_create_user_rejects_invalid_email() {
    let f = fixture();

    let response = f
        .app
        .oneshot(post_json(
            "/users",
            json!({ "name": "Bob", "email": "not-an-email", "password": "secret" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
    assert!(error.details.unwrap().to_string().contains("email"));
}

#[tokio::test]
async fn test_create_user_rejects_missing_fields() {
    let f = fixture();

    let response = f
        .app
        .oneshot(post_json("/users", json!({ "email": "x@example.com" })))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_create_user_duplicate_email_conflicts() {
    let f = fixture();

    let first = f
        .app
        .clone()
        .oneshot(post_json(
            "/users",
            json!({ "name": "Ada", "email": "ada@example.com", "password": "pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = f
        .app
        .oneshot(post_json(
            "/users",
            json!({ "name": "Other Ada", "email": "ADA@example.com", "password": "pw" }),
        ))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = json_body(second.into_body()).await;
    assert_eq!(error.error, "CONFLICT");
}

#[tokio::test]
async fn test_create_user_unknown_group_is_bad_request() {
    let f = fixture();
    let missing = uuid::Uuid::now_v7();

    let response = f
        .app
        .clone()
        .oneshot(post_json(
            "/users",
            json!({
                "name": "Eve",
                "email": "eve@example.com",
                "password": "pw",
                "groupIds": [f.admins.id, missing]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert!(error.message.contains(&missing.to_string()));

    // Nothing was stored
    let list = f.app.oneshot(get("/users")).await.unwrap();
    let users: Vec<UserResponse> = json_body(list.into_body()).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_list_users_returns_creation_order() {
    let f = fixture();

    for (name, email) in [("First", "first@example.com"), ("Second", "second@example.com")] {
        let response = f
            .app
            .clone()
            .oneshot(post_json(
                "/users",
                json!({ "name": name, "email": email, "password": "pw", "groupIds": [f.admins.id] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = f.app.oneshot(get("/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert!(users.iter().all(|u| u.groups[0].group.name == "Administrators"));
}

#[tokio::test]
async fn test_groups_endpoints() {
    let f = fixture();

    let created = f
        .app
        .clone()
        .oneshot(post_json("/groups", json!({ "name": "Architects" })))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let duplicate = f
        .app
        .clone()
        .oneshot(post_json("/groups", json!({ "name": "Architects" })))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let response = f.app.oneshot(get("/groups")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let groups: Vec<Group> = json_body(response.into_body()).await;
    let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Administrators", "Architects", "Engineers"]);
}
