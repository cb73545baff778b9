//! Order service handlers: creation with a stock-sufficiency check,
//! eager-loaded reads, and audited status transitions.
//!
//! Creation checks stock but does not decrement it; concurrent orders can
//! both pass the check.

use axum::extract::rejection::JsonRejection;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::repository::OrderRepository;
use crate::error::{ApiError, parse_uuid};
use crate::models::{Order, OrderDetail};
use crate::products::ProductRepository;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub product_id: Option<Uuid>,
    #[serde(default)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub quantity: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

fn total_price(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// POST /api/orders/
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let user_id = req
        .user_id
        .filter(|id| !id.is_nil())
        .ok_or_else(|| ApiError::BadRequest("UserID is required".to_string()))?;
    let product_id = req
        .product_id
        .filter(|id| !id.is_nil())
        .ok_or_else(|| ApiError::BadRequest("ProductID is required".to_string()))?;
    if req.quantity <= 0 {
        return Err(ApiError::BadRequest(
            "Quantity must be greater than zero".to_string(),
        ));
    }

    let product = ProductRepository::get_by_id(state.db.pool(), product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    if product.stock < req.quantity {
        return Err(ApiError::BadRequest("Insufficient stock".to_string()));
    }

    let total = total_price(product.price, req.quantity);
    let order =
        OrderRepository::create(state.db.pool(), user_id, product_id, req.quantity, total).await?;

    tracing::info!("Created order {} (total {})", order.id, order.total_price);
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderDetail>, ApiError> {
    let order_id = parse_uuid(&id, "Invalid order ID")?;

    OrderRepository::get_detail(state.db.pool(), order_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))
}

/// PUT /api/orders/{id}
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Json<Order>, ApiError> {
    let order_id = parse_uuid(&id, "Invalid order ID")?;
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if let Some(quantity) = req.quantity {
        if quantity <= 0 {
            return Err(ApiError::BadRequest(
                "Quantity must be greater than zero".to_string(),
            ));
        }
    }

    OrderRepository::update(state.db.pool(), order_id, req.quantity, req.status.as_deref())
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))
}

/// DELETE /api/orders/{id}
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let order_id = parse_uuid(&id, "Invalid order ID")?;

    if OrderRepository::soft_delete(state.db.pool(), order_id).await? {
        Ok(Json(
            serde_json::json!({"message": "Order deleted successfully"}),
        ))
    } else {
        Err(ApiError::NotFound("Order not found".to_string()))
    }
}

/// GET /api/orders/
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderDetail>>, ApiError> {
    let orders = OrderRepository::list_detail(state.db.pool()).await?;
    Ok(Json(orders))
}

/// PUT /api/orders/{id}/status
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<Order>, ApiError> {
    let order_id = parse_uuid(&id, "Invalid order ID")?;
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let status = req.status.trim();
    if status.is_empty() {
        return Err(ApiError::BadRequest("Status is required".to_string()));
    }

    let order = OrderRepository::set_status(state.db.pool(), order_id, status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    // Audit failure must not fail the transition itself.
    if let Err(err) = state.audit.append(order.id, &order.status) {
        tracing::warn!("Failed to log status update: {err}");
    }

    Ok(Json(order))
}
