//! Account query and mutation endpoints.

use std::sync::Arc;

use account::Account;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::AccountId;
use serde::{Deserialize, Serialize};

use crate::aggregator::{Aggregator, PageInput};
use crate::error::GatewayError;
use crate::routes::orders::OrderResponse;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
}

/// Query parameters for the accounts listing: either an exact id or a
/// skip/take page.
#[derive(Debug, Deserialize)]
pub struct AccountsQuery {
    pub id: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

// -- Response types --

#[derive(Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name,
        }
    }
}

#[derive(Serialize)]
pub struct AccountOverviewResponse {
    pub id: String,
    pub name: String,
    pub orders: Vec<OrderResponse>,
}

// -- Handlers --

/// POST /accounts — create an account.
#[tracing::instrument(skip(aggregator, req))]
pub async fn create(
    State(aggregator): State<Arc<Aggregator>>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), GatewayError> {
    let account = aggregator.create_account(&req.name).await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// GET /accounts — exact-id lookup or paginated listing.
#[tracing::instrument(skip(aggregator))]
pub async fn list(
    State(aggregator): State<Arc<Aggregator>>,
    Query(params): Query<AccountsQuery>,
) -> Result<Json<Vec<AccountResponse>>, GatewayError> {
    let page = PageInput {
        skip: params.skip,
        take: params.take,
    };
    let accounts = aggregator
        .accounts(params.id.map(AccountId::new), page)
        .await?;

    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// GET /accounts/{id} — account detail with its orders embedded.
#[tracing::instrument(skip(aggregator))]
pub async fn overview(
    State(aggregator): State<Arc<Aggregator>>,
    Path(id): Path<String>,
) -> Result<Json<AccountOverviewResponse>, GatewayError> {
    let (account, orders) = aggregator.account_overview(&AccountId::new(id)).await?;

    Ok(Json(AccountOverviewResponse {
        id: account.id.to_string(),
        name: account.name,
        orders: orders.into_iter().map(OrderResponse::from).collect(),
    }))
}

/// GET /accounts/{id}/orders — the orders of one account.
#[tracing::instrument(skip(aggregator))]
pub async fn orders(
    State(aggregator): State<Arc<Aggregator>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<OrderResponse>>, GatewayError> {
    let orders = aggregator.account_orders(&AccountId::new(id)).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
