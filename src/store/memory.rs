// In-memory store backends

use axum::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::models::User;
use crate::orders::models::Order;
use crate::store::{OrderStore, StoreError, UserStore};

/// Map-backed user store. Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn save(&self, user: &User) -> Result<(), StoreError> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

/// Vec-backed order store; insertion order is the storage order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save(&self, order: &Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|existing| existing.id == order.id) {
            Some(existing) => *existing = order.clone(),
            None => orders.push(order.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Order, StoreError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|order| order.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }
}
