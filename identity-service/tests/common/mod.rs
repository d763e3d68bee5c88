use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use async_trait::async_trait;
use auth::Authenticator;
use identity_service::domain::user::errors::AuthError;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::AuthService;
use identity_service::inbound::http::router::create_router;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory credential store used by the API tests.
///
/// Mirrors the Postgres repository's contract, including case-insensitive
/// email uniqueness and lookup.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.write().expect("users lock poisoned");

        let email = user.email.as_str().to_lowercase();
        if users
            .values()
            .any(|u| u.email.as_str().to_lowercase() == email)
        {
            return Err(AuthError::EmailAlreadyExists);
        }

        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        let users = self.users.read().expect("users lock poisoned");
        Ok(users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().expect("users lock poisoned");
        let email = email.to_lowercase();
        Ok(users
            .values()
            .find(|u| u.email.as_str().to_lowercase() == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.write().expect("users lock poisoned");

        if !users.contains_key(&user.id.0) {
            return Err(AuthError::NotFound(user.id.to_string()));
        }

        let email = user.email.as_str().to_lowercase();
        if users
            .values()
            .any(|u| u.id != user.id && u.email.as_str().to_lowercase() == email)
        {
            return Err(AuthError::EmailAlreadyExists);
        }

        users.insert(user.id.0, user.clone());
        Ok(user)
    }
}

/// Test application that spawns a real server on a random port
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));
        let repository = Arc::new(InMemoryUserRepository::default());
        let auth_service = Arc::new(AuthService::new(repository, Arc::clone(&authenticator)));

        let router = create_router(auth_service, Arc::clone(&authenticator));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return the issued token
    pub async fn register(&self, email: &str, password: &str, role: &str) -> String {
        let response = self
            .post("/api/auth/register")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "first_name": "Test",
                "last_name": "User",
                "role": role
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert!(
            response.status().is_success(),
            "registration failed: {}",
            response.status()
        );

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"].as_str().expect("missing token").to_string()
    }
}
