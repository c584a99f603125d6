use std::sync::Arc;

use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::hashing::Argon2CredentialHasher;
use account_service::outbound::repositories::InMemoryUserRepository;
use credentials::HashCost;
use serde_json::json;
use serde_json::Value;

/// Test application that spawns a real server backed by the in-memory store
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub hasher: Arc<Argon2CredentialHasher>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(
            Argon2CredentialHasher::with_cost(HashCost {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            })
            .expect("Failed to build hasher"),
        );

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&hasher),
        ));
        let router = create_router(user_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            hasher,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Create a user through the API and return its id
    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .post("/users")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
                "password_confirm": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let users: Value = self
            .get("/users")
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        users
            .as_array()
            .and_then(|users| users.iter().find(|user| user["email"] == email))
            .and_then(|user| user["id"].as_str())
            .expect("Created user missing from listing")
            .to_string()
    }

    /// Stored hash for a user, read directly from the repository
    pub async fn stored_hash(&self, email: &str) -> String {
        use account_service::domain::user::ports::UserRepository;

        self.repository
            .find_by_email(email)
            .await
            .expect("Repository failure")
            .expect("User not found")
            .password_hash
    }
}
