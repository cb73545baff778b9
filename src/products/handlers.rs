//! Product service handlers: CRUD, search, and absolute stock updates.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

use super::repository::{ProductFilter, ProductRepository};
use crate::error::{ApiError, parse_uuid};
use crate::models::Product;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub stock: i32,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<Decimal>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<Decimal>,
    #[serde(rename = "inStock")]
    pub in_stock: Option<String>,
}

impl From<SearchParams> for ProductFilter {
    fn from(params: SearchParams) -> Self {
        Self {
            name: params.name.filter(|s| !s.is_empty()),
            description: params.description.filter(|s| !s.is_empty()),
            min_price: params.min_price,
            max_price: params.max_price,
            in_stock: params.in_stock.as_deref() == Some("true"),
        }
    }
}

/// Price and stock bounds shared by create and update.
fn validate_bounds(price: Decimal, stock: i32) -> Result<(), ApiError> {
    if price <= Decimal::ZERO {
        return Err(ApiError::BadRequest(
            "Price must be greater than zero".to_string(),
        ));
    }
    if stock < 0 {
        return Err(ApiError::BadRequest("Stock cannot be negative".to_string()));
    }
    Ok(())
}

/// POST /api/products/
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    validate_bounds(req.price, req.stock)?;

    let product = ProductRepository::create(
        state.db.pool(),
        &req.name,
        &req.description,
        req.price,
        req.stock,
    )
    .await?;

    tracing::info!("Created product {}", product.id);
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product_id = parse_uuid(&id, "Invalid product ID")?;

    ProductRepository::get_by_id(state.db.pool(), product_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let product_id = parse_uuid(&id, "Invalid product ID")?;
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    validate_bounds(req.price, req.stock)?;

    ProductRepository::update(
        state.db.pool(),
        product_id,
        &req.name,
        &req.description,
        req.price,
        req.stock,
    )
    .await?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let product_id = parse_uuid(&id, "Invalid product ID")?;

    if ProductRepository::soft_delete(state.db.pool(), product_id).await? {
        Ok(Json(
            serde_json::json!({"message": "Product deleted successfully"}),
        ))
    } else {
        Err(ApiError::NotFound("Product not found".to_string()))
    }
}

/// GET /api/products/
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = ProductRepository::list(state.db.pool()).await?;
    Ok(Json(products))
}

/// GET /api/products/search
pub async fn search_products(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let filter = ProductFilter::from(params);

    let products = ProductRepository::search(state.db.pool(), &filter).await?;
    Ok(Json(products))
}

/// PUT /api/products/{id}/stock
pub async fn update_stock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStockRequest>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let product_id = parse_uuid(&id, "Invalid product ID")?;
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if req.stock < 0 {
        return Err(ApiError::BadRequest("Stock cannot be negative".to_string()));
    }

    ProductRepository::set_stock(state.db.pool(), product_id, req.stock)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bounds() {
        assert!(validate_bounds(Decimal::new(999, 2), 0).is_ok());
        assert!(validate_bounds(Decimal::ONE, 10).is_ok());

        let err = validate_bounds(Decimal::ZERO, 10).unwrap_err();
        assert_eq!(err.to_string(), "Price must be greater than zero");

        let err = validate_bounds(Decimal::new(-100, 2), 10).unwrap_err();
        assert_eq!(err.to_string(), "Price must be greater than zero");

        let err = validate_bounds(Decimal::ONE, -1).unwrap_err();
        assert_eq!(err.to_string(), "Stock cannot be negative");
    }

    #[test]
    fn test_search_params_to_filter() {
        let params = SearchParams {
            name: Some("widget".to_string()),
            description: Some(String::new()),
            min_price: Some(Decimal::ONE),
            max_price: None,
            in_stock: Some("true".to_string()),
        };
        let filter = ProductFilter::from(params);

        assert_eq!(filter.name.as_deref(), Some("widget"));
        assert!(filter.description.is_none()); // empty string means unset
        assert_eq!(filter.min_price, Some(Decimal::ONE));
        assert!(filter.in_stock);
    }

    #[test]
    fn test_in_stock_requires_literal_true() {
        let params = SearchParams {
            name: None,
            description: None,
            min_price: None,
            max_price: None,
            in_stock: Some("yes".to_string()),
        };
        assert!(!ProductFilter::from(params).in_stock);
    }
}
