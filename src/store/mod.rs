// Storage abstractions for users and orders
//
// Services depend on these traits only; the Postgres adapters back the running
// service and the in-memory adapters back tests and local development.

pub mod memory;
pub mod postgres;

use axum::async_trait;
use uuid::Uuid;

use crate::auth::models::User;
use crate::orders::models::Order;

pub use memory::{InMemoryOrderStore, InMemoryUserStore};
pub use postgres::{PgOrderStore, PgUserStore};

/// Storage failure surfaced to the orchestration layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other.to_string()),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert or overwrite a user.
    async fn save(&self, user: &User) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<User, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert or overwrite an order.
    async fn save(&self, order: &Order) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Order, StoreError>;
    /// All orders owned by a user, in storage order.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError>;
}
