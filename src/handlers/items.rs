use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{AppState, CreatedResponse};
use crate::domain::item::{Item, ItemKind, ItemUpdate, NewItem};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Subtype attributes, selected by the `dtype` discriminator
/// (`B` book, `A` album, `M` movie).
#[derive(Debug, Deserialize, ToSchema)]
#[serde(tag = "dtype")]
pub enum ItemKindRequest {
    #[serde(rename = "B")]
    Book {
        author: Option<String>,
        isbn: Option<String>,
    },
    #[serde(rename = "A")]
    Album {
        artist: Option<String>,
        etc: Option<String>,
    },
    #[serde(rename = "M")]
    Movie {
        director: Option<String>,
        actor: Option<String>,
    },
}

impl From<ItemKindRequest> for ItemKind {
    fn from(kind: ItemKindRequest) -> Self {
        match kind {
            ItemKindRequest::Book { author, isbn } => ItemKind::Book { author, isbn },
            ItemKindRequest::Album { artist, etc } => ItemKind::Album { artist, etc },
            ItemKindRequest::Movie { director, actor } => ItemKind::Movie { director, actor },
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    pub name: String,
    /// Decimal price as a string, e.g. "10000.00"
    pub price: String,
    pub stock_quantity: i32,
    #[serde(flatten)]
    pub kind: ItemKindRequest,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    pub name: String,
    pub price: String,
    pub stock_quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemResponse {
    pub id: Uuid,
    pub dtype: String,
    pub name: String,
    pub price: String,
    pub stock_quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        let mut resp = ItemResponse {
            id: item.id,
            dtype: item.kind.dtype().to_string(),
            name: item.name,
            price: item.price.to_string(),
            stock_quantity: item.stock_quantity,
            author: None,
            isbn: None,
            artist: None,
            etc: None,
            director: None,
            actor: None,
        };
        match item.kind {
            ItemKind::Book { author, isbn } => {
                resp.author = author;
                resp.isbn = isbn;
            }
            ItemKind::Album { artist, etc } => {
                resp.artist = artist;
                resp.etc = etc;
            }
            ItemKind::Movie { director, actor } => {
                resp.director = director;
                resp.actor = actor;
            }
        }
        resp
    }
}

pub(crate) fn parse_price(value: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(value.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid price '{}': {}", value, e)))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /items
#[utoipa::path(
    post,
    path = "/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = CreatedResponse),
        (status = 400, description = "Invalid name, price or stock"),
    ),
    tag = "items"
)]
pub async fn create_item(
    state: web::Data<AppState>,
    body: web::Json<CreateItemRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let item = NewItem {
        price: parse_price(&body.price)?,
        name: body.name,
        stock_quantity: body.stock_quantity,
        kind: body.kind.into(),
    };
    let id = web::block(move || state.items.save_item(item)).await??;
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// GET /items
#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "All items", body = Vec<ItemResponse>),
    ),
    tag = "items"
)]
pub async fn list_items(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items = web::block(move || state.items.find_items()).await??;
    let body: Vec<ItemResponse> = items.into_iter().map(ItemResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// PUT /items/{id}
///
/// Replaces the common fields of an item. The subtype is fixed at creation.
#[utoipa::path(
    put,
    path = "/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item UUID"),
    ),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 400, description = "Invalid name, price or stock"),
        (status = 404, description = "Item not found"),
    ),
    tag = "items"
)]
pub async fn update_item(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateItemRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let update = ItemUpdate {
        price: parse_price(&body.price)?,
        name: body.name,
        stock_quantity: body.stock_quantity,
    };
    let item = web::block(move || state.items.update_item(id, update)).await??;
    Ok(HttpResponse::Ok().json(ItemResponse::from(item)))
}
