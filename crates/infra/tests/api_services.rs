//! Auth and user endpoint services against a mock backend

mod support;

use adminhub_core::testing::SessionEvent;
use adminhub_domain::constants::{
    STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_REFRESH_TOKEN, STORAGE_KEY_USER,
};
use adminhub_domain::{
    AuthUser, CreateUserRequest, EntityId, LoginRequest, QueryParams, RegisterRequest,
    UpdateUserRequest, UserRole, UserStatus,
};
use adminhub_infra::{ApiError, AuthApi, UserApi};
use serde_json::{json, Value};
use support::{Fixture, OLD_TOKEN};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-02-01T00:00:00Z",
        "email": format!("{id}@example.com"),
        "firstName": "Grace",
        "lastName": "Hopper",
        "role": "manager",
        "status": "active",
        "isEmailVerified": true
    })
}

fn login_json() -> Value {
    json!({
        "user": {
            "id": 7,
            "email": "grace@example.com",
            "firstName": "Grace",
            "lastName": "Hopper",
            "role": "admin",
            "isEmailVerified": true
        },
        "accessToken": "login-access",
        "refreshToken": "login-refresh",
        "expiresIn": 3600
    })
}

#[tokio::test]
async fn login_persists_credentials_and_emits_session_event() {
    let fixture = Fixture::start(None).await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(json!({ "email": "grace@example.com", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_json()))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let auth = AuthApi::new(fixture.client.clone());
    let response = auth
        .login(&LoginRequest {
            email: "grace@example.com".into(),
            password: "hunter2".into(),
            remember_me: None,
        })
        .await
        .unwrap();

    assert_eq!(response.user.id, EntityId::Number(7));
    assert_eq!(fixture.stored(STORAGE_KEY_ACCESS_TOKEN).as_deref(), Some("login-access"));
    assert_eq!(fixture.stored(STORAGE_KEY_REFRESH_TOKEN).as_deref(), Some("login-refresh"));

    let stored_user: AuthUser =
        serde_json::from_str(&fixture.stored(STORAGE_KEY_USER).unwrap()).unwrap();
    assert_eq!(stored_user.role, UserRole::Admin);

    assert_eq!(fixture.session.events(), vec![SessionEvent::Credentials(response)]);
}

#[tokio::test]
async fn register_persists_credentials_like_login() {
    let fixture = Fixture::start(None).await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_partial_json(json!({
            "email": "grace@example.com",
            "confirmPassword": "hunter2",
            "firstName": "Grace"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(login_json()))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let response = AuthApi::new(fixture.client.clone())
        .register(&RegisterRequest {
            email: "grace@example.com".into(),
            password: "hunter2".into(),
            confirm_password: "hunter2".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
        })
        .await
        .unwrap();

    assert_eq!(fixture.stored(STORAGE_KEY_ACCESS_TOKEN).as_deref(), Some("login-access"));
    assert_eq!(fixture.stored(STORAGE_KEY_REFRESH_TOKEN).as_deref(), Some("login-refresh"));
    let stored_user: AuthUser =
        serde_json::from_str(&fixture.stored(STORAGE_KEY_USER).unwrap()).unwrap();
    assert_eq!(stored_user.email, "grace@example.com");
    assert_eq!(fixture.session.events(), vec![SessionEvent::Credentials(response)]);
}

#[tokio::test]
async fn rejected_login_persists_nothing() {
    let fixture = Fixture::start(None).await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&fixture.server)
        .await;

    let auth = AuthApi::new(fixture.client.clone());
    let err = auth
        .login(&LoginRequest { email: "x@example.com".into(), password: "y".into(), remember_me: None })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(fixture.notifier.messages(), vec!["Invalid credentials".to_string()]);
    assert_eq!(fixture.stored(STORAGE_KEY_USER), None);
    assert!(fixture.session.events().is_empty());
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_fails() {
    let fixture = Fixture::start(Some("refresh-1")).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", format!("Bearer {OLD_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&fixture.server)
        .await;

    AuthApi::new(fixture.client.clone()).logout().await;

    assert_eq!(fixture.session.logout_count(), 1);
    assert_eq!(fixture.stored(STORAGE_KEY_ACCESS_TOKEN), None);
    assert_eq!(fixture.stored(STORAGE_KEY_REFRESH_TOKEN), None);
}

#[tokio::test]
async fn list_users_sends_paging_and_search() {
    let fixture = Fixture::start(None).await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "25"))
        .and(query_param("search", "hop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [user_json("u-1"), user_json("u-2")],
            "pagination": {
                "currentPage": 2,
                "totalPages": 3,
                "pageSize": 25,
                "totalItems": 52,
                "hasNextPage": true,
                "hasPreviousPage": true
            }
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let users = UserApi::new(fixture.client.clone());
    let page = users
        .list(&QueryParams { page: Some(2), page_size: Some(25), search: Some("hop".into()) })
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].status, UserStatus::Active);
    assert_eq!(page.pagination.total_items, 52);
}

#[tokio::test]
async fn profile_flattens_user_fields() {
    let fixture = Fixture::start(None).await;
    let mut body = user_json("u-3");
    body["bio"] = json!("Compiler pioneer");
    body["preferences"] =
        json!({ "language": "en", "theme": "dark", "notifications": { "email": true, "push": false, "sms": false } });
    Mock::given(method("GET"))
        .and(path("/users/u-3/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&fixture.server)
        .await;

    let profile = UserApi::new(fixture.client.clone()).profile("u-3").await.unwrap();
    assert_eq!(profile.user.id, EntityId::from("u-3"));
    assert_eq!(profile.bio.as_deref(), Some("Compiler pioneer"));
}

#[tokio::test]
async fn create_user_posts_body_and_decodes_user() {
    let fixture = Fixture::start(None).await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("authorization", format!("Bearer {OLD_TOKEN}").as_str()))
        .and(body_partial_json(json!({
            "email": "u-5@example.com",
            "firstName": "Grace",
            "role": "manager",
            "department": "Navy"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json("u-5")))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let user = UserApi::new(fixture.client.clone())
        .create(&CreateUserRequest {
            email: "u-5@example.com".into(),
            password: "s3cret".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            role: UserRole::Manager,
            phone: None,
            department: Some("Navy".into()),
            job_title: None,
        })
        .await
        .unwrap();

    assert_eq!(user.id, EntityId::from("u-5"));
    assert_eq!(user.role, UserRole::Manager);
    assert!(fixture.session.events().is_empty());
}

#[tokio::test]
async fn update_and_delete_user() {
    let fixture = Fixture::start(None).await;
    let mut updated = user_json("u-4");
    updated["status"] = json!("suspended");
    Mock::given(method("PUT"))
        .and(path("/users/u-4"))
        .and(body_partial_json(json!({ "status": "suspended" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&fixture.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/u-4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let users = UserApi::new(fixture.client.clone());
    let user = users
        .update(
            "u-4",
            &UpdateUserRequest { status: Some(UserStatus::Suspended), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(user.status, UserStatus::Suspended);

    users.delete("u-4").await.unwrap();
}

#[tokio::test]
async fn missing_user_surfaces_404() {
    let fixture = Fixture::start(None).await;
    Mock::given(method("GET"))
        .and(path("/users/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Not Found" })))
        .mount(&fixture.server)
        .await;

    let err = UserApi::new(fixture.client.clone()).get("nope").await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 404, .. }));
    assert_eq!(fixture.notifier.messages(), vec!["Not Found".to_string()]);
}
