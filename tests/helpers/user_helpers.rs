use axum_test::TestServer;
use community_server::config::AppConfig;
use community_server::init::MODERATOR_USERNAME;
use community_server::routes::user_auth::login_routes::LoginResponse;
use community_server::routes::user_auth::register_routes::RegisterResponse;
use fake::{faker, Fake};
use serde_json::json;

pub const TEST_PASSWORD: &str = "some3242paSs#$";

#[allow(dead_code)]
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub token: String,
}

#[allow(dead_code)]
pub async fn create_fake_login_test_user(server: &TestServer) -> (&TestServer, TestUser) {
    let digits: String = faker::number::en::NumberWithFormat("########").fake();
    let username = format!("user_{digits}");

    let create_user = server
        .post("/api/register")
        .json(&json!({
            "username": username,
            "password": TEST_PASSWORD,
        }))
        .add_header("Accept", "application/json")
        .await;
    create_user.assert_status_success();
    let registered = create_user.json::<RegisterResponse>();

    (
        server,
        TestUser {
            id: registered.id,
            username: registered.username,
            token: registered.token,
        },
    )
}

#[allow(dead_code)]
pub async fn login_user(server: &TestServer, username: &str, password: &str) -> String {
    let login = server
        .post("/api/login")
        .json(&json!({
            "username": username,
            "password": password,
        }))
        .add_header("Accept", "application/json")
        .await;
    login.assert_status_success();
    login.json::<LoginResponse>().token
}

#[allow(dead_code)]
pub async fn login_as_moderator(server: &TestServer, config: &AppConfig) -> String {
    login_user(server, MODERATOR_USERNAME, &config.init_server_password).await
}
