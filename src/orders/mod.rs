pub mod catalog;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;
pub mod status_machine;

pub use error::OrderError;
pub use handlers::{create_order_handler, get_order_handler, get_user_orders_handler};
pub use models::{CreateOrderRequest, Order, OrderStatus, OrderSummary};
pub use service::OrderService;
pub use status_machine::StatusMachine;
