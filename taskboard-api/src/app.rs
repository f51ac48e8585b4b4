/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use taskboard_shared::store::Store;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let store = Store::new(config.hasher.build());
/// let state = AppState::new(store, config);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::{Config, MAX_JWT_EXPIRATION_HOURS},
    routes,
};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    routing::{get, post, put},
    Router,
};
use chrono::Duration;
use std::sync::Arc;
use taskboard_shared::auth::middleware::jwt_auth_middleware;
use taskboard_shared::store::Store;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// In-memory repositories
    pub store: Store,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Lifetime of issued access tokens
    ///
    /// Clamped to `1..=MAX_JWT_EXPIRATION_HOURS` for configs built without
    /// `Config::from_env`.
    pub fn token_lifetime(&self) -> Duration {
        let hours = self
            .config
            .jwt
            .expiration_hours
            .clamp(1, MAX_JWT_EXPIRATION_HOURS);
        Duration::hours(hours)
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health                         # Health check (public)
/// ├── POST /login                          # Issue a token (public)
/// └── /api/
///     ├── /users/
///     │   ├── POST   /                     # Register (public)
///     │   ├── GET    /                     # List users (admin)
///     │   ├── GET    /:id
///     │   ├── GET    /username/:username
///     │   ├── PUT    /:id
///     │   └── DELETE /:id                  # Delete user (admin)
///     └── /todos/                          # JWT required
///         ├── POST   /
///         ├── GET    /
///         ├── GET    /:id
///         ├── PUT    /:id
///         ├── DELETE /:id
///         └── /items/
///             ├── POST   /:todo_id
///             ├── GET    /:todo_id
///             ├── PUT    /:todo_id/:item_id
///             └── DELETE /:todo_id/:item_id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    let secret = state.jwt_secret().to_string();
    let auth = middleware::from_fn(move |req: Request, next: Next| {
        jwt_auth_middleware(secret.clone(), req, next)
    });

    // Health check and login (public, no auth)
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/login", post(routes::auth::login));

    // Registration stays public; everything else on users needs a token
    let user_routes = Router::new()
        .route("/", get(routes::users::list_users))
        .route(
            "/:id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        .route("/username/:username", get(routes::users::get_user_by_username))
        .route_layer(auth.clone())
        .route("/", post(routes::users::register));

    let todo_routes = Router::new()
        .route(
            "/",
            get(routes::todos::list_todos).post(routes::todos::create_todo),
        )
        .route(
            "/:id",
            get(routes::todos::get_todo)
                .put(routes::todos::update_todo)
                .delete(routes::todos::delete_todo),
        )
        .route(
            "/items/:todo_id",
            get(routes::todo_items::list_items).post(routes::todo_items::create_item),
        )
        .route(
            "/items/:todo_id/:item_id",
            put(routes::todo_items::update_item).delete(routes::todo_items::delete_item),
        )
        .route_layer(auth);

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/todos", todo_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_permissive() {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, HasherConfig, JwtConfig};
    use taskboard_shared::auth::jwt::Claims;
    use taskboard_shared::auth::password::Argon2Hasher;
    use taskboard_shared::models::Role;

    fn config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
                expiration_hours: 2,
            },
            hasher: HasherConfig::default(),
            seed_default_data: false,
        }
    }

    #[test]
    fn test_app_state_accessors() {
        let state = AppState::new(Store::new(Argon2Hasher::with_params(8, 1, 1)), config());

        assert_eq!(state.jwt_secret(), "test-secret-key-at-least-32-bytes-long");
        assert_eq!(state.token_lifetime(), Duration::hours(2));
    }

    #[test]
    fn test_token_lifetime_is_clamped() {
        let mut config = config();
        config.jwt.expiration_hours = 10_000_000_000_000;
        let state = AppState::new(Store::new(Argon2Hasher::with_params(8, 1, 1)), config);

        assert_eq!(state.token_lifetime(), Duration::hours(MAX_JWT_EXPIRATION_HOURS));

        let claims = Claims::with_expiration(1, Role::User, state.token_lifetime());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_router_builds_with_restricted_cors() {
        let state = AppState::new(Store::new(Argon2Hasher::with_params(8, 1, 1)), config());
        let _router = build_router(state);
    }
}
