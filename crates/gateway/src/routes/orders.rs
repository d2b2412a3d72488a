//! Order mutation endpoint and order response types.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::{AccountId, ProductId};
use order::Order;
use serde::{Deserialize, Serialize};

use crate::aggregator::{Aggregator, RequestedItem};
use crate::error::GatewayError;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub account_id: String,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Deserialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub created_at: String,
    pub account_id: String,
    pub total_price_cents: i64,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub quantity: u32,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            created_at: order.created_at.to_rfc3339(),
            account_id: order.account_id.to_string(),
            total_price_cents: order.total_price.cents(),
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemResponse {
                    product_id: item.product_id.to_string(),
                    name: item.name,
                    description: item.description,
                    price_cents: item.price.cents(),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

// -- Handlers --

/// POST /orders — create an order for an account.
#[tracing::instrument(skip(aggregator, req))]
pub async fn create(
    State(aggregator): State<Arc<Aggregator>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), GatewayError> {
    let items = req
        .items
        .into_iter()
        .map(|item| RequestedItem {
            product_id: ProductId::new(item.product_id),
            quantity: item.quantity,
        })
        .collect();

    let order = aggregator
        .create_order(AccountId::new(req.account_id), items)
        .await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}
