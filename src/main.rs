mod auth;
mod config;
mod orders;
mod rate_limit;
mod store;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{FromRef, Request},
    middleware::{self, Next},
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthService, RequireRole, TokenService};
use config::Config;
use orders::OrderService;
use rate_limit::RateLimiter;
use store::{PgOrderStore, PgUserStore};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        auth::handlers::login_handler,
        auth::handlers::register_handler,
        auth::handlers::refresh_handler,
        orders::handlers::create_order_handler,
        orders::handlers::get_user_orders_handler,
        orders::handlers::get_order_handler,
    ),
    components(
        schemas(
            auth::models::Role,
            auth::models::UserResponse,
            auth::models::AuthResponse,
            auth::models::LoginRequest,
            auth::models::RegisterRequest,
            auth::models::RefreshRequest,
            orders::models::Order,
            orders::models::OrderStatus,
            orders::models::CreateOrderRequest,
            orders::models::OrderSummary,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "orders", description = "Order management endpoints")
    ),
    info(
        title = "Threat Intelligence API",
        version = "1.0.0",
        description = "A secure threat intelligence order backend"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub order_service: OrderService,
    pub token_service: Arc<TokenService>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.token_service.clone()
    }
}

/// Handler for GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running")
    ),
    tag = "health"
)]
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "threat-intel-api",
    }))
}

/// Handler for GET /api/v1/admin/users (Admin only)
async fn admin_users_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Admin endpoint - list users" }))
}

/// Handler for GET /api/v1/analyst/reports (Analyst or above)
async fn analyst_reports_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Analyst endpoint - view reports" }))
}

/// Creates and configures the application router
pub fn create_router(state: AppState) -> Router {
    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin_guard = RequireRole::admin(state.token_service.clone());
    let admin_routes = Router::new()
        .route("/users", get(admin_users_handler))
        .layer(middleware::from_fn(move |request: Request, next: Next| {
            let guard = admin_guard.clone();
            async move { guard.middleware(request, next).await }
        }));

    let analyst_guard = RequireRole::analyst(state.token_service.clone());
    let analyst_routes = Router::new()
        .route("/reports", get(analyst_reports_handler))
        .layer(middleware::from_fn(move |request: Request, next: Next| {
            let guard = analyst_guard.clone();
            async move { guard.middleware(request, next).await }
        }));

    let api_routes = Router::new()
        .route(
            "/orders",
            post(orders::create_order_handler).get(orders::get_user_orders_handler),
        )
        .route("/orders/:id", get(orders::get_order_handler))
        .nest("/admin", admin_routes)
        .nest("/analyst", analyst_routes);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health_handler))
        // Auth routes
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/refresh", post(auth::refresh_handler))
        // Protected routes
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit::rate_limit,
        ))
        .layer(cors)
        .with_state(state)
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Threat Intel API - Starting...");

    let config = Config::from_env();

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = store::postgres::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    // Run migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Wire stores and services
    let user_store: Arc<dyn store::UserStore> = Arc::new(PgUserStore::new(db_pool.clone()));
    let order_store: Arc<dyn store::OrderStore> = Arc::new(PgOrderStore::new(db_pool));
    let token_service = Arc::new(TokenService::new(config.jwt_secret.clone()));

    let state = AppState {
        auth_service: AuthService::new(user_store.clone(), token_service.clone()),
        order_service: OrderService::new(order_store, user_store),
        token_service,
        rate_limiter: Arc::new(RateLimiter::new(
            config.rate_limit_max,
            Duration::from_secs(config.rate_limit_window_secs),
        )),
    };

    let app = create_router(state);

    // Start the Axum server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Threat Intel API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server exited");
}
