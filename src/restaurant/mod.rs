//! Cloud Tea House: a menu, an order form and a priced confirmation.

pub mod menu;

mod order;

use axum::{Router, routing::get};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(order::main))
        .route("/main", get(order::main))
        .route("/order", get(order::order_page))
        .route("/confirmation", get(order::back_to_order).post(order::confirmation))
}
