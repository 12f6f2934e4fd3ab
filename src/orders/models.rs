// Order data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::models::UserResponse;
use crate::orders::error::OrderError;
use crate::orders::status_machine::StatusMachine;

/// Order status enum representing the lifecycle of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain model representing an order.
///
/// `user` is a denormalized copy of the owning user, populated on reads for
/// response convenience; it is not stored with the order row.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_id: String,
    pub quantity: i32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl Order {
    /// Instantiate a new order at Pending with a fresh ID.
    pub fn new(user_id: Uuid, item_id: &str, quantity: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            item_id: item_id.to_string(),
            quantity,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            user: None,
        }
    }

    pub fn confirm(&mut self) -> Result<(), OrderError> {
        self.transition_to(OrderStatus::Confirmed)
    }

    pub fn complete(&mut self) -> Result<(), OrderError> {
        self.transition_to(OrderStatus::Completed)
    }

    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.transition_to(OrderStatus::Cancelled)
    }

    /// Apply a status transition, refreshing the update timestamp. Illegal
    /// transitions are rejected and leave the order untouched.
    fn transition_to(&mut self, to: OrderStatus) -> Result<(), OrderError> {
        self.status = StatusMachine::transition(self.status, to)
            .map_err(OrderError::InvalidTransition)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Request DTO for creating a new order
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "item_id must not be empty"))]
    pub item_id: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Response DTO returned on order creation
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummary {
    pub order_id: Uuid,
    pub status: OrderStatus,
}
