#![allow(dead_code)]

use std::sync::Arc;

use auth::Algorithm;
use auth::CredentialRecord;
use auth::JwtHandler;
use auth::PasswordHasher;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::directory::InMemoryUserDirectory;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: Arc<JwtHandler>,
}

impl TestApp {
    /// Spawn the application with the default test users:
    /// - `ehab` / `ehab123`, active
    /// - `bruce` / `wayne123`, disabled
    pub async fn spawn() -> Self {
        Self::spawn_with_users(vec![
            credential_record("ehab", "ehab123", false),
            credential_record("bruce", "wayne123", true),
        ])
        .await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_users(users: Vec<CredentialRecord>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let jwt_handler = Arc::new(
            JwtHandler::new(TEST_SECRET, Algorithm::HS256).expect("Failed to build JWT handler"),
        );
        let directory = Arc::new(InMemoryUserDirectory::new(users));

        let router = create_router(
            directory,
            Arc::clone(&jwt_handler),
            chrono::Duration::minutes(30),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Submit the password-grant form to `/token`
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/token")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the access token, panicking on failure
    pub async fn access_token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }
}

/// Credential record with a freshly hashed password
pub fn credential_record(username: &str, password: &str, disabled: bool) -> CredentialRecord {
    CredentialRecord {
        username: username.to_string(),
        full_name: Some(format!("{} full name", username)),
        email: Some(format!("{}@example.com", username)),
        hashed_password: PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password"),
        disabled,
    }
}
