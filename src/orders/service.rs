// Order service - business logic layer

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::auth::models::Role;
use crate::orders::{
    catalog,
    error::OrderError,
    models::{CreateOrderRequest, Order, OrderSummary},
};
use crate::store::{OrderStore, UserStore};

/// Service coordinating order creation and retrieval.
#[derive(Clone)]
pub struct OrderService {
    order_store: Arc<dyn OrderStore>,
    user_store: Arc<dyn UserStore>,
}

impl OrderService {
    pub fn new(order_store: Arc<dyn OrderStore>, user_store: Arc<dyn UserStore>) -> Self {
        Self {
            order_store,
            user_store,
        }
    }

    /// Create an order for a catalog item.
    ///
    /// The order is instantiated at Pending and immediately confirmed before
    /// being persisted; callers never observe the pending state.
    pub async fn create_order(
        &self,
        user_id: Uuid,
        request: CreateOrderRequest,
    ) -> Result<OrderSummary, OrderError> {
        if !catalog::is_valid_item(&request.item_id) {
            return Err(OrderError::InvalidItem);
        }

        let user = self
            .user_store
            .find_by_id(user_id)
            .await
            .map_err(|_| OrderError::UserNotFound)?;

        // Every valid role satisfies Viewer; this guards against a user row
        // that somehow lost its role.
        if !user.has_permission(Role::Viewer) {
            return Err(OrderError::InsufficientPermissions);
        }

        let mut order = Order::new(user_id, &request.item_id, request.quantity);
        order.confirm()?;

        self.order_store.save(&order).await?;

        info!(user_id = %user_id, order_id = %order.id, item_id = %order.item_id, "order created");

        Ok(OrderSummary {
            order_id: order.id,
            status: order.status,
        })
    }

    /// Fetch a single order.
    ///
    /// Allowed for the order's owner and for any user with at least
    /// Analyst-level permission. The returned order carries a denormalized
    /// copy of its owner.
    pub async fn get_order(
        &self,
        order_id: Uuid,
        requesting_user_id: Uuid,
    ) -> Result<Order, OrderError> {
        let mut order = self.order_store.find_by_id(order_id).await?;

        let requester = self
            .user_store
            .find_by_id(requesting_user_id)
            .await
            .map_err(|_| OrderError::UserNotFound)?;

        if order.user_id != requesting_user_id && !requester.has_permission(Role::Analyst) {
            return Err(OrderError::AccessDenied);
        }

        order.user = self
            .user_store
            .find_by_id(order.user_id)
            .await
            .ok()
            .map(Into::into);

        Ok(order)
    }

    /// All orders owned by a user, in storage order.
    pub async fn get_user_orders(&self, user_id: Uuid) -> Result<Vec<Order>, OrderError> {
        Ok(self.order_store.find_by_user_id(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::User;
    use crate::orders::models::OrderStatus;
    use crate::store::{InMemoryOrderStore, InMemoryUserStore};

    async fn test_service_with_user(role: Role) -> (OrderService, InMemoryUserStore, User) {
        let user_store = InMemoryUserStore::default();
        let order_store = InMemoryOrderStore::default();
        let user = User::new("owner@example.com", "password123", role).unwrap();
        user_store.save(&user).await.unwrap();

        let service = OrderService::new(Arc::new(order_store), Arc::new(user_store.clone()));
        (service, user_store, user)
    }

    fn order_request(item_id: &str, quantity: i32) -> CreateOrderRequest {
        CreateOrderRequest {
            item_id: item_id.to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_order_confirms_immediately() {
        let (service, _, user) = test_service_with_user(Role::Viewer).await;

        let summary = service
            .create_order(user.id, order_request("intel-basic", 1))
            .await
            .unwrap();

        assert_eq!(summary.status, OrderStatus::Confirmed);
        assert!(!summary.order_id.is_nil());
    }

    #[tokio::test]
    async fn test_create_order_rejects_unknown_item() {
        let (service, _, user) = test_service_with_user(Role::Admin).await;

        let result = service
            .create_order(user.id, order_request("bogus-item", 1))
            .await;
        assert!(matches!(result, Err(OrderError::InvalidItem)));
    }

    #[tokio::test]
    async fn test_create_order_rejects_unknown_user() {
        let (service, _, _) = test_service_with_user(Role::Viewer).await;

        let result = service
            .create_order(Uuid::new_v4(), order_request("intel-basic", 1))
            .await;
        assert!(matches!(result, Err(OrderError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_get_order_owner_succeeds() {
        let (service, _, user) = test_service_with_user(Role::Viewer).await;
        let summary = service
            .create_order(user.id, order_request("intel-premium", 3))
            .await
            .unwrap();

        let order = service.get_order(summary.order_id, user.id).await.unwrap();
        assert_eq!(order.user_id, user.id);
        assert_eq!(order.quantity, 3);
        // Denormalized owner is attached on reads
        assert_eq!(order.user.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_get_order_other_viewer_is_denied() {
        let (service, user_store, owner) = test_service_with_user(Role::Viewer).await;
        let summary = service
            .create_order(owner.id, order_request("intel-basic", 1))
            .await
            .unwrap();

        let stranger = User::new("stranger@example.com", "password123", Role::Viewer).unwrap();
        user_store.save(&stranger).await.unwrap();

        let result = service.get_order(summary.order_id, stranger.id).await;
        assert!(matches!(result, Err(OrderError::AccessDenied)));
    }

    #[tokio::test]
    async fn test_get_order_analyst_can_read_any_order() {
        let (service, user_store, owner) = test_service_with_user(Role::Viewer).await;
        let summary = service
            .create_order(owner.id, order_request("intel-basic", 1))
            .await
            .unwrap();

        let analyst = User::new("analyst@example.com", "password123", Role::Analyst).unwrap();
        user_store.save(&analyst).await.unwrap();

        let order = service.get_order(summary.order_id, analyst.id).await.unwrap();
        assert_eq!(order.user_id, owner.id);
    }

    #[tokio::test]
    async fn test_get_order_missing_order_is_not_found() {
        let (service, _, user) = test_service_with_user(Role::Viewer).await;

        let result = service.get_order(Uuid::new_v4(), user.id).await;
        assert!(matches!(result, Err(OrderError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_user_orders_preserves_storage_order() {
        let (service, _, user) = test_service_with_user(Role::Viewer).await;

        let first = service
            .create_order(user.id, order_request("intel-basic", 1))
            .await
            .unwrap();
        let second = service
            .create_order(user.id, order_request("intel-enterprise", 2))
            .await
            .unwrap();

        let orders = service.get_user_orders(user.id).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, first.order_id);
        assert_eq!(orders[1].id, second.order_id);
    }

    #[tokio::test]
    async fn test_get_user_orders_empty_for_new_user() {
        let (service, _, user) = test_service_with_user(Role::Viewer).await;

        let orders = service.get_user_orders(user.id).await.unwrap();
        assert!(orders.is_empty());
    }
}
