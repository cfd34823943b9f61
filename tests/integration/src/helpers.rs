//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and seeding principals directly through the repository layer.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use calldesk_api::{create_app, create_app_state, AppState};
use calldesk_common::auth::{hash_password, ElevatedPin};
use calldesk_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, JwtConfig, RateLimitConfig,
    SecurityConfig, ServerConfig,
};
use calldesk_core::traits::PrincipalRepository;
use calldesk_core::{Principal, Role, UserCategory};
use calldesk_db::PgPrincipalRepository;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Elevated-action PIN used by every test server
pub const TEST_PIN: &str = "4821";

/// Password every seeded principal logs in with
pub const TEST_PASSWORD: &str = "TestPass123";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: AppState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        let config = test_config()?;

        let state = create_app_state(config).await?;

        // Apply migrations before the first request
        sqlx::migrate!("../../crates/calldesk-db/migrations")
            .run(state.pool())
            .await?;

        let app = create_app(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .put(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .delete(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }

    /// Seed a principal directly through the repository, returning it.
    ///
    /// The API has no self-registration, so tests create their actors here
    /// with [`TEST_PASSWORD`] as the secret.
    pub async fn seed_principal(&self, role: Role, minutes_allocated: i32) -> Result<Principal> {
        let repo = PgPrincipalRepository::new(self.state.pool().clone());
        let principal = Principal::new(
            Uuid::new_v4(),
            format!("{}-{}@example.com", role.as_str(), Uuid::new_v4()),
            format!("Test {}", role.as_str()),
            role,
            UserCategory::Sales,
            minutes_allocated,
        );
        let password_hash =
            hash_password(TEST_PASSWORD).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        repo.create(&principal, &password_hash)
            .await
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        Ok(principal)
    }

    /// Seed an admin and log it in, returning its access token
    pub async fn admin_token(&self) -> Result<String> {
        let admin = self.seed_principal(Role::Admin, 0).await?;
        self.login_token(&admin.email).await
    }

    /// Log a seeded principal in and return its access token
    pub async fn login_token(&self, email: &str) -> Result<String> {
        let response = self
            .post(
                "/api/v1/auth/login",
                &serde_json::json!({ "email": email, "password": TEST_PASSWORD }),
            )
            .await?;
        let body: serde_json::Value = assert_json(response, StatusCode::OK).await?;
        body["access_token"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| anyhow::anyhow!("no access_token in login response"))
    }
}

/// Create a test configuration.
///
/// Only DATABASE_URL comes from the environment; everything else is fixed so
/// the suite runs without a .env file.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL not set"))?;

    let elevated_pin_hash =
        ElevatedPin::hash_pin(TEST_PIN).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(AppConfig {
        app: AppSettings {
            name: "calldesk-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
        },
        jwt: JwtConfig {
            access_secret: "integration-test-access-secret".to_string(),
            refresh_secret: "integration-test-refresh-secret".to_string(),
            access_token_expiry: 86400,
            refresh_token_expiry: 604_800,
        },
        security: SecurityConfig {
            elevated_pin_hash,
            accounting_mode: calldesk_core::AccountingMode::Minutes,
        },
        rate_limit: RateLimitConfig {
            // High enough that the suite never trips it
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig::default(),
    })
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
