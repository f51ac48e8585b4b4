/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An app over a fresh in-memory store
/// - Test users with ready-made tokens
/// - A request helper returning status and JSON body

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, HasherConfig, JwtConfig};
use taskboard_shared::auth::jwt::{create_token, Claims};
use taskboard_shared::auth::password::Argon2Hasher;
use taskboard_shared::models::user::{CreateUser, User};
use taskboard_shared::models::Role;
use taskboard_shared::store::Store;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// A registered user and a token for them
pub struct TestUser {
    pub user: User,
    pub token: String,
}

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Store,
    pub app: Router,
    pub admin: TestUser,
    pub alice: TestUser,
    pub bob: TestUser,
}

impl TestContext {
    /// Creates a new test context with an empty store and three users
    pub async fn new() -> anyhow::Result<Self> {
        let config = test_config();
        let store = Store::new(Argon2Hasher::with_params(8, 1, 1));

        let admin = create_user(&store, "root", "root-password", Role::Admin).await?;
        let alice = create_user(&store, "alice", "alice-password", Role::User).await?;
        let bob = create_user(&store, "bob", "bob-password", Role::User).await?;

        let app = build_router(AppState::new(store.clone(), config));

        Ok(TestContext {
            store,
            app,
            admin,
            alice,
            bob,
        })
    }

    /// Sends a request through the router
    ///
    /// Returns the status and the parsed JSON body (`Null` when empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            expiration_hours: 1,
        },
        hasher: HasherConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        },
        seed_default_data: false,
    }
}

async fn create_user(
    store: &Store,
    username: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<TestUser> {
    let user = store
        .users
        .create(CreateUser {
            username: username.to_string(),
            password: password.to_string(),
            role,
        })
        .await?;

    let token = create_token(&Claims::new(user.id, user.role), JWT_SECRET)?;

    Ok(TestUser { user, token })
}
