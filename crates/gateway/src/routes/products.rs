//! Product query and mutation endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use catalog::Product;
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::aggregator::{Aggregator, PageInput, ProductSelector};
use crate::error::GatewayError;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
}

/// Query parameters for the products listing: an exact id, a
/// comma-separated id set, or a search query with a skip/take page.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub id: Option<String>,
    pub ids: Option<String>,
    pub query: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

// -- Response types --

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price_cents: product.price.cents(),
        }
    }
}

// -- Handlers --

/// POST /products — create a catalog product.
#[tracing::instrument(skip(aggregator, req))]
pub async fn create(
    State(aggregator): State<Arc<Aggregator>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), GatewayError> {
    let product = aggregator
        .create_product(&req.name, &req.description, Money::from_cents(req.price_cents))
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// GET /products — exact id, id set, or search/listing.
#[tracing::instrument(skip(aggregator))]
pub async fn list(
    State(aggregator): State<Arc<Aggregator>>,
    Query(params): Query<ProductsQuery>,
) -> Result<Json<Vec<ProductResponse>>, GatewayError> {
    let selector = ProductSelector {
        id: params.id.map(ProductId::new),
        ids: params.ids.map(|ids| {
            ids.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(ProductId::new)
                .collect()
        }),
        query: params.query,
        page: PageInput {
            skip: params.skip,
            take: params.take,
        },
    };

    let products = aggregator.products(selector).await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}
