use std::time::Duration;

use roster_core::FetchError;
use roster_core::api::UsersClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USERS_JSON: &str = r#"[
  {
    "id": 1,
    "name": "Leanne Graham",
    "username": "Bret",
    "email": "Sincere@april.biz",
    "address": {"street": "Kulas Light", "city": "Gwenborough"},
    "phone": "1-770-736-8031 x56442",
    "website": "hildegard.org"
  },
  {
    "id": 2,
    "name": "Ervin Howell",
    "username": "Antonette",
    "email": "Shanna@melissa.tv",
    "phone": "010-692-6593 x09125"
  }
]"#;

async fn client_for(server: &MockServer) -> UsersClient {
    UsersClient::new(&format!("{}/users", server.uri()), Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn test_fetch_users_parses_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(USERS_JSON, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let users = client_for(&server).await.fetch_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "Leanne Graham");
    assert_eq!(users[1].username, "Antonette");
}

#[tokio::test]
async fn test_fetch_users_reports_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).await.fetch_users().await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 503 }));
    assert_eq!(err.to_string(), "Request failed with status code 503");
}

#[tokio::test]
async fn test_fetch_users_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"users": []}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).await.fetch_users().await.unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_users_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("[]", "application/json")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = UsersClient::new(
        &format!("{}/users", server.uri()),
        Some(Duration::from_millis(200)),
    )
    .unwrap();
    let err = client.fetch_users().await.unwrap_err();

    assert!(matches!(err, FetchError::Timeout));
}
