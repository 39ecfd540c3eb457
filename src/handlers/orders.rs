use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{AddressDto, AppState, CreatedResponse};
use crate::domain::order::{OrderItemView, OrderSearch, OrderStatus, OrderView};
use crate::domain::order_query::{OrderHeader, OrderItemQueryView, OrderQueryView};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub member_id: Uuid,
    pub item_id: Uuid,
    pub count: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub order_price: String,
    pub count: i32,
    pub total_price: String,
}

impl From<OrderItemView> for OrderItemResponse {
    fn from(line: OrderItemView) -> Self {
        OrderItemResponse {
            total_price: line.total_price().to_string(),
            id: line.id,
            item_id: line.item_id,
            item_name: line.item_name,
            order_price: line.order_price.to_string(),
            count: line.count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub member_id: Uuid,
    pub member_name: String,
    pub order_date: String,
    pub status: String,
    pub delivery_status: String,
    pub address: AddressDto,
    pub total_price: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderView> for OrderResponse {
    fn from(order: OrderView) -> Self {
        OrderResponse {
            total_price: order.total_price().to_string(),
            id: order.id,
            member_id: order.member_id,
            member_name: order.member_name,
            order_date: order.order_date.to_rfc3339(),
            status: order.status.to_string(),
            delivery_status: order.delivery_status.as_str().to_string(),
            address: order.address.into(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummaryResponse {
    pub order_id: Uuid,
    pub name: String,
    pub order_date: String,
    pub order_status: String,
    pub address: AddressDto,
}

impl From<OrderHeader> for OrderSummaryResponse {
    fn from(h: OrderHeader) -> Self {
        OrderSummaryResponse {
            order_id: h.order_id,
            name: h.name,
            order_date: h.order_date.to_rfc3339(),
            order_status: h.order_status.to_string(),
            address: h.address.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemQueryResponse {
    pub order_id: Uuid,
    pub item_name: String,
    pub order_price: String,
    pub count: i32,
}

impl From<OrderItemQueryView> for OrderItemQueryResponse {
    fn from(v: OrderItemQueryView) -> Self {
        OrderItemQueryResponse {
            order_id: v.order_id,
            item_name: v.item_name,
            order_price: v.order_price.to_string(),
            count: v.count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderSummaryResponse,
    pub order_items: Vec<OrderItemQueryResponse>,
}

impl From<OrderQueryView> for OrderDetailResponse {
    fn from(v: OrderQueryView) -> Self {
        OrderDetailResponse {
            order: v.header.into(),
            order_items: v
                .order_items
                .into_iter()
                .map(OrderItemQueryResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderSearchParams {
    pub member_name: Option<String>,
    pub status: Option<String>,
}

impl OrderSearchParams {
    fn to_search(&self) -> Result<OrderSearch, AppError> {
        let order_status = match self.status.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(s.parse::<OrderStatus>()?),
            _ => None,
        };
        Ok(OrderSearch {
            member_name: self.member_name.clone(),
            order_status,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderPageParams {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub strategy: Option<String>,
}

fn default_limit() -> i64 {
    100
}

impl OrderPageParams {
    fn validate(&self) -> Result<(), AppError> {
        if self.offset < 0 {
            return Err(AppError::BadRequest(format!(
                "offset must not be negative, got {}",
                self.offset
            )));
        }
        if self.limit < 1 {
            return Err(AppError::BadRequest(format!(
                "limit must be at least 1, got {}",
                self.limit
            )));
        }
        Ok(())
    }

    fn per_order(&self) -> bool {
        self.strategy.as_deref() == Some("per_order")
    }
}

fn detail_body(views: Vec<OrderQueryView>) -> Vec<OrderDetailResponse> {
    views.into_iter().map(OrderDetailResponse::from).collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Places a single-item order. Stock is decremented in the same transaction.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = CreatedResponse),
        (status = 400, description = "Invalid count"),
        (status = 404, description = "Member or item not found"),
        (status = 409, description = "Not enough stock"),
    ),
    tag = "orders"
)]
pub async fn place_order(
    state: web::Data<AppState>,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let id = web::block(move || {
        state
            .orders
            .place_order(body.member_id, body.item_id, body.count)
    })
    .await??;
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// GET /orders
///
/// Orders newest first, optionally filtered by member name and status.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("member_name" = Option<String>, Query, description = "Substring of the member name"),
        ("status" = Option<String>, Query, description = "ORDER or CANCEL"),
    ),
    responses(
        (status = 200, description = "Matching orders", body = Vec<OrderResponse>),
        (status = 400, description = "Unknown status"),
    ),
    tag = "orders"
)]
pub async fn search_orders(
    state: web::Data<AppState>,
    query: web::Query<OrderSearchParams>,
) -> Result<HttpResponse, AppError> {
    let search = query.to_search()?;
    let orders = web::block(move || state.orders.search_orders(&search)).await??;
    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let order = web::block(move || state.orders.get_order(order_id)).await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// POST /orders/{id}/cancel
///
/// Cancels the order and returns its items to stock.
#[utoipa::path(
    post,
    path = "/orders/{id}/cancel",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 204, description = "Order cancelled"),
        (status = 400, description = "Order already cancelled"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already delivered"),
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    web::block(move || state.orders.cancel_order(order_id)).await??;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /orders/summaries
///
/// Order headers only, paged by `offset` and `limit`.
#[utoipa::path(
    get,
    path = "/orders/summaries",
    params(
        ("offset" = Option<i64>, Query, description = "Rows to skip (default 0)"),
        ("limit" = Option<i64>, Query, description = "Maximum rows (default 100)"),
    ),
    responses(
        (status = 200, description = "Order headers", body = Vec<OrderSummaryResponse>),
        (status = 400, description = "Invalid offset or limit"),
    ),
    tag = "orders"
)]
pub async fn order_summaries(
    state: web::Data<AppState>,
    query: web::Query<OrderPageParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;
    let headers = web::block(move || {
        state
            .order_queries
            .find_order_summaries(params.offset, params.limit)
    })
    .await??;
    let body: Vec<OrderSummaryResponse> =
        headers.into_iter().map(OrderSummaryResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /orders/details
///
/// Paged headers with their items. By default the items of the whole page
/// are loaded with one query; `strategy=per_order` loads them per header.
#[utoipa::path(
    get,
    path = "/orders/details",
    params(
        ("offset" = Option<i64>, Query, description = "Rows to skip (default 0)"),
        ("limit" = Option<i64>, Query, description = "Maximum rows (default 100)"),
        ("strategy" = Option<String>, Query, description = "per_order or batched (default)"),
    ),
    responses(
        (status = 200, description = "Orders with items", body = Vec<OrderDetailResponse>),
        (status = 400, description = "Invalid offset or limit"),
    ),
    tag = "orders"
)]
pub async fn order_details(
    state: web::Data<AppState>,
    query: web::Query<OrderPageParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;
    let views = web::block(move || {
        if params.per_order() {
            state
                .order_queries
                .find_orders_per_order(params.offset, params.limit)
        } else {
            state
                .order_queries
                .find_orders_batched(params.offset, params.limit)
        }
    })
    .await??;
    Ok(HttpResponse::Ok().json(detail_body(views)))
}

/// GET /orders/details/flat
///
/// Every order with its items, from a single join query. Unpaged.
#[utoipa::path(
    get,
    path = "/orders/details/flat",
    responses(
        (status = 200, description = "Orders with items", body = Vec<OrderDetailResponse>),
    ),
    tag = "orders"
)]
pub async fn order_details_flat(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let views = web::block(move || state.order_queries.find_orders_flat()).await??;
    Ok(HttpResponse::Ok().json(detail_body(views)))
}
