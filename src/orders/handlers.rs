// HTTP handlers for order endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::orders::{
    error::OrderError,
    models::{CreateOrderRequest, Order, OrderSummary},
};
use crate::AppState;

/// Handler for POST /api/v1/orders
/// Creates a new order for the authenticated user
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderSummary),
        (status = 400, description = "Invalid item or insufficient permissions"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "orders"
)]
pub async fn create_order_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderSummary>), OrderError> {
    request
        .validate()
        .map_err(|e| OrderError::ValidationError(e.to_string()))?;

    let summary = state
        .order_service
        .create_order(user.user_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(summary)))
}

/// Handler for GET /api/v1/orders
/// Retrieves all orders owned by the authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "Orders for the authenticated user", body = Vec<Order>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "orders"
)]
pub async fn get_user_orders_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Order>>, OrderError> {
    let orders = state.order_service.get_user_orders(user.user_id).await?;
    Ok(Json(orders))
}

/// Handler for GET /api/v1/orders/{id}
/// Retrieves a single order; allowed for its owner or any Analyst+
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 400, description = "Invalid order ID"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Order not found or access denied")
    ),
    tag = "orders"
)]
pub async fn get_order_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, OrderError> {
    let order = state
        .order_service
        .get_order(order_id, user.user_id)
        .await?;
    Ok(Json(order))
}
